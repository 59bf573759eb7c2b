use crate::crawler::PageMetadata;
use chrono::NaiveDate;

/// One article as discovered during a run
///
/// Nodes are immutable once built; the directory that stores a node owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNode {
    pub id: String,
    pub url: String,
    pub title: String,
    pub word_count: usize,
    pub last_edit: NaiveDate,

    /// Linked article ids in page order. Not deduplicated, and may name
    /// articles that were never fetched.
    pub outgoing_link_ids: Vec<String>,
}

/// Builds a node from freshly extracted metadata
pub fn build_page_node(id: &str, url: &str, metadata: PageMetadata) -> PageNode {
    PageNode {
        id: id.to_string(),
        url: url.to_string(),
        title: metadata.title,
        word_count: metadata.word_count,
        last_edit: metadata.last_edit,
        outgoing_link_ids: metadata.link_ids,
    }
}

/// Node with placeholder metadata, for tests that only care about links
#[cfg(test)]
pub(crate) fn stub_node(id: &str, links: &[&str]) -> PageNode {
    PageNode {
        id: id.to_string(),
        url: format!("https://en.wikipedia.org/wiki/{}", id),
        title: id.replace('_', " "),
        word_count: 100,
        last_edit: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        outgoing_link_ids: links.iter().map(|link| link.to_string()).collect(),
    }
}
