//! Wiki-Ripple: a polite article graph explorer
//!
//! This crate incrementally builds a graph of interlinked encyclopedia articles
//! by fetching pages politely (cached, throttled and capped), and answers
//! bounded reachability queries over the part of the graph discovered so far.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Wiki-Ripple operations
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Request limit of {limit} reached, refusing to fetch {url}")]
    TooManyRequests { limit: u32, url: String },

    #[error("Failed to extract metadata for '{id}': {source}")]
    Extraction {
        id: String,
        source: ExtractionError,
    },

    #[error("Cache error at {path}: {source}")]
    Cache {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid article id: {0}")]
    InvalidArticleId(String),

    #[error("Article not in directory: {0}")]
    UnknownArticle(String),

    #[error("Article already in directory: {0}")]
    DuplicateArticle(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WikiError {
    /// Returns true if a graph expansion may skip the failing branch and carry on
    ///
    /// Everything that concerns a single link is recoverable. The rest (most
    /// importantly `TooManyRequests`) ends the expansion.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. }
                | Self::Extraction { .. }
                | Self::Cache { .. }
                | Self::InvalidArticleId(_)
                | Self::UrlParse(_)
        )
    }
}

/// Errors produced by a page metadata extractor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("page has no title")]
    MissingTitle,

    #[error("page has no last-edit footer")]
    MissingLastEdit,

    #[error("unparsable last-edit date '{0}'")]
    InvalidLastEdit(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wiki-Ripple operations
pub type Result<T> = std::result::Result<T, WikiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{GraphBuilder, HtmlMetadataExtractor, PageMetadataExtractor, PoliteFetcher};
pub use graph::{find_path, PageDirectory, PageNode};
