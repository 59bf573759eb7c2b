//! Crawler module for polite article fetching and graph building
//!
//! This module contains:
//! - The on-disk page cache
//! - The polite fetcher (cache, politeness delay, request ceiling)
//! - Page metadata extraction
//! - The incremental graph builder

mod builder;
mod cache;
mod fetcher;
mod parser;

pub use builder::{ExpansionReport, GraphBuilder};
pub use cache::PageCache;
pub use fetcher::{build_http_client, user_agent_string, PoliteFetcher};
pub use parser::{HtmlMetadataExtractor, PageMetadata, PageMetadataExtractor};

use crate::config::Config;
use crate::graph::{find_path_between, PageDirectory};
use crate::WikiError;

/// Result of one configured query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub from: String,
    pub to: String,
    pub path: Option<Vec<String>>,
}

/// Seeds and expands every configured starting article, in order
///
/// A seed that cannot be loaded is logged and skipped; a non-recoverable
/// error (notably `TooManyRequests`) ends the run.
pub async fn build_graph(
    config: &Config,
    fetcher: &mut PoliteFetcher,
    extractor: &dyn PageMetadataExtractor,
    directory: &mut PageDirectory,
) -> Result<(), WikiError> {
    let mut builder = GraphBuilder::new(fetcher, extractor, &config.fetcher.article_prefix);

    for seed in &config.seeds {
        if let Err(e) = builder.seed(directory, &seed.id).await {
            if e.is_recoverable() {
                tracing::warn!("Could not load seed '{}': {}", seed.id, e);
                continue;
            }
            return Err(e);
        }

        builder
            .expand(
                directory,
                &seed.id,
                seed.depth_budget(&config.crawl),
                seed.breadth_limit(&config.crawl),
            )
            .await?;
    }

    tracing::info!(
        "Directory holds {} pages after {} live requests",
        directory.len(),
        builder.fetcher().request_count()
    );

    Ok(())
}

/// Runs every configured query against the directory
pub fn run_queries(config: &Config, directory: &PageDirectory) -> Vec<QueryOutcome> {
    config
        .queries
        .iter()
        .map(|query| {
            if !directory.contains(&query.from) {
                tracing::warn!("Query start '{}' was never loaded", query.from);
            }

            QueryOutcome {
                from: query.from.clone(),
                to: query.to.clone(),
                path: find_path_between(
                    directory,
                    &query.from,
                    &query.to,
                    query.max_path_length(&config.crawl),
                ),
            }
        })
        .collect()
}
