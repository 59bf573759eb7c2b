use crate::graph::PageNode;
use crate::WikiError;
use std::collections::HashMap;

/// Store of every article known in a run, keyed by article id
///
/// Entries are only ever added. An id that is present is never fetched or
/// overwritten again, which is what keeps mutually linked articles from being
/// loaded over and over.
#[derive(Debug, Default)]
pub struct PageDirectory {
    nodes: HashMap<String, PageNode>,

    /// Ids in insertion order
    order: Vec<String>,
}

impl PageDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&PageNode> {
        self.nodes.get(id)
    }

    /// Adds a node under its own id
    ///
    /// # Returns
    ///
    /// * `Ok(&PageNode)` - The stored node
    /// * `Err(WikiError::DuplicateArticle)` - The id is already present; the
    ///   existing node is left untouched
    pub fn insert(&mut self, node: PageNode) -> Result<&PageNode, WikiError> {
        if self.nodes.contains_key(&node.id) {
            return Err(WikiError::DuplicateArticle(node.id));
        }

        tracing::debug!("Registering '{}' ({} links)", node.id, node.outgoing_link_ids.len());

        let id = node.id.clone();
        self.order.push(id.clone());
        Ok(self.nodes.entry(id).or_insert(node))
    }

    /// Ids in the order they were registered
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Nodes in the order they were registered
    pub fn iter(&self) -> impl Iterator<Item = &PageNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The page with the fewest words; the earliest registered wins ties
    pub fn shortest_page(&self) -> Option<&PageNode> {
        self.iter().reduce(|best, node| {
            if node.word_count < best.word_count {
                node
            } else {
                best
            }
        })
    }

    /// The page edited longest ago; the earliest registered wins ties
    pub fn oldest_page(&self) -> Option<&PageNode> {
        self.iter().reduce(|best, node| {
            if node.last_edit < best.last_edit {
                node
            } else {
                best
            }
        })
    }

    /// Linked ids that no page in the directory covers yet, deduplicated,
    /// in discovery order
    pub fn frontier(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.iter()
            .flat_map(|node| node.outgoing_link_ids.iter())
            .map(String::as_str)
            .filter(|id| !self.contains(id))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}
