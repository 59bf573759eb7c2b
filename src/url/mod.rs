//! URL handling module for Wiki-Ripple
//!
//! This module maps article identifiers to URLs and back, and derives the
//! filesystem-safe cache name for a URL.

mod article;
mod cache_name;

pub use article::{article_id_from_href, article_url, validate_article_id, ARTICLE_PATH_PREFIX};
pub use cache_name::cache_file_name;
