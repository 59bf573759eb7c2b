//! Incremental graph building
//!
//! The builder grows a [`PageDirectory`] outwards from a known article: it
//! takes the first `breadth_limit` links of a page, loads every one not yet
//! registered, registers it, and recurses into it while depth budget remains.

use crate::crawler::{PageMetadataExtractor, PoliteFetcher};
use crate::graph::{build_page_node, PageDirectory, PageNode};
use crate::url::{article_url, validate_article_id};
use crate::WikiError;
use std::future::Future;
use std::pin::Pin;

type ExpandFuture<'a> = Pin<Box<dyn Future<Output = Result<(), WikiError>> + 'a>>;

/// Outcome of one top-level expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Articles newly registered in the directory
    pub pages_added: usize,

    /// Links whose branch was abandoned, with the reason
    pub failures: Vec<(String, String)>,
}

/// Loads articles into a directory through a polite fetcher
pub struct GraphBuilder<'a> {
    fetcher: &'a mut PoliteFetcher,
    extractor: &'a dyn PageMetadataExtractor,
    article_prefix: String,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        fetcher: &'a mut PoliteFetcher,
        extractor: &'a dyn PageMetadataExtractor,
        article_prefix: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            article_prefix: article_prefix.into(),
        }
    }

    pub fn fetcher(&self) -> &PoliteFetcher {
        self.fetcher
    }

    /// Fetches and parses one article without registering it
    pub async fn load_page(&mut self, id: &str) -> Result<PageNode, WikiError> {
        validate_article_id(id)?;

        let url = article_url(&self.article_prefix, id);
        tracing::info!("Creating page for '{}'", id);

        let content = self.fetcher.fetch(&url).await?;
        let metadata = self
            .extractor
            .extract(&content)
            .map_err(|source| WikiError::Extraction {
                id: id.to_string(),
                source,
            })?;

        Ok(build_page_node(id, &url, metadata))
    }

    /// Registers a starting article
    ///
    /// An id that is already known is returned as is; nothing is fetched.
    pub async fn seed<'d>(
        &mut self,
        directory: &'d mut PageDirectory,
        id: &str,
    ) -> Result<&'d PageNode, WikiError> {
        if !directory.contains(id) {
            let node = self.load_page(id).await?;
            directory.insert(node)?;
        }

        directory
            .get(id)
            .ok_or_else(|| WikiError::UnknownArticle(id.to_string()))
    }

    /// Loads the pages linked from `id`, recursively
    ///
    /// # Rules
    ///
    /// - Only the first `breadth_limit` links of each page are considered
    /// - A link already in the directory is skipped and never re-expanded
    /// - A new page is registered before it is recursed into, so a link back
    ///   to it is seen as known
    /// - New pages are expanded with `depth_budget - 1`; at budget 0 they are
    ///   registered but not expanded
    /// - A failure that concerns one link (fetch, cache, extraction, an
    ///   unusable id or URL) abandons that link only
    /// - Any other error (notably `TooManyRequests`) ends the whole expansion
    ///
    /// # Returns
    ///
    /// * `Ok(ExpansionReport)` - Pages added and branches abandoned
    /// * `Err(WikiError::UnknownArticle)` - `id` is not in the directory
    /// * `Err(WikiError)` - A non-recoverable error
    pub async fn expand(
        &mut self,
        directory: &mut PageDirectory,
        id: &str,
        depth_budget: u32,
        breadth_limit: usize,
    ) -> Result<ExpansionReport, WikiError> {
        let node = directory
            .get(id)
            .ok_or_else(|| WikiError::UnknownArticle(id.to_string()))?;

        tracing::info!(
            "Loading {} links from '{}', depth budget {}",
            breadth_limit,
            node.title,
            depth_budget
        );

        let links = shortlist(node, breadth_limit);
        let mut report = ExpansionReport::default();
        self.expand_links(directory, links, depth_budget, breadth_limit, &mut report)
            .await?;

        tracing::info!(
            "Expansion of '{}' added {} pages ({} failed)",
            id,
            report.pages_added,
            report.failures.len()
        );

        Ok(report)
    }

    fn expand_links<'b>(
        &'b mut self,
        directory: &'b mut PageDirectory,
        links: Vec<String>,
        depth_budget: u32,
        breadth_limit: usize,
        report: &'b mut ExpansionReport,
    ) -> ExpandFuture<'b> {
        Box::pin(async move {
            for link in links {
                if directory.contains(&link) {
                    tracing::debug!("'{}' already known, skipping", link);
                    continue;
                }

                let node = match self.load_page(&link).await {
                    Ok(node) => node,
                    Err(e) if e.is_recoverable() => {
                        tracing::warn!("Skipping '{}': {}", link, e);
                        report.failures.push((link, e.to_string()));
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                let child_links = shortlist(&node, breadth_limit);
                directory.insert(node)?;
                report.pages_added += 1;

                if depth_budget > 0 {
                    tracing::debug!(
                        "Descending into '{}', depth budget {}",
                        link,
                        depth_budget - 1
                    );
                    self.expand_links(
                        directory,
                        child_links,
                        depth_budget - 1,
                        breadth_limit,
                        report,
                    )
                    .await?;
                }
            }

            Ok(())
        })
    }
}

/// The first `breadth_limit` links of a page, in page order
fn shortlist(node: &PageNode, breadth_limit: usize) -> Vec<String> {
    node.outgoing_link_ids
        .iter()
        .take(breadth_limit)
        .cloned()
        .collect()
}
