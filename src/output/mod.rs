//! Output module for human inspection of the article graph
//!
//! This module handles:
//! - Rendering link trees rooted at an article
//! - Formatting per-page summaries and found paths
//! - Collecting and printing directory statistics

mod stats;
mod summary;
mod tree;

pub use stats::{collect_statistics, print_statistics, DirectoryStatistics};
pub use summary::{format_page_summary, format_path};
pub use tree::render_tree;
