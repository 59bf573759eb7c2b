//! Link tree rendering
//!
//! A tree shows an article, the first few links of each page, and recurses
//! into links that are loaded. An id appears at most once per tree.

use crate::graph::PageDirectory;
use std::collections::HashSet;

/// One placed id and the ids placed beneath it
struct TreeEntry {
    id: String,
    children: Vec<TreeEntry>,
}

/// Renders the tree of pages reachable from `root_id`
///
/// Each node lists at most `display_limit` of its links, in link order. Links
/// that are not loaded appear as leaves. Placement is depth-first: a link is
/// placed and its own links are walked before the next sibling is looked at,
/// so an id reachable through an earlier sibling lands under that sibling.
///
/// # Example
///
/// ```text
/// Cat
/// ├── Felis
/// │   └── Felidae
/// └── Dog
/// ```
pub fn render_tree(directory: &PageDirectory, root_id: &str, display_limit: usize) -> String {
    let mut placed = HashSet::new();
    placed.insert(root_id.to_string());
    let children = place_children(directory, root_id, display_limit, &mut placed);

    let mut out = String::new();
    out.push_str(root_id);
    out.push('\n');
    draw(&children, "", &mut out);
    out
}

fn place_children(
    directory: &PageDirectory,
    id: &str,
    display_limit: usize,
    placed: &mut HashSet<String>,
) -> Vec<TreeEntry> {
    let Some(node) = directory.get(id) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for link in node.outgoing_link_ids.iter().take(display_limit) {
        if !placed.insert(link.clone()) {
            continue;
        }

        let children = place_children(directory, link, display_limit, placed);
        entries.push(TreeEntry {
            id: link.clone(),
            children,
        });
    }

    entries
}

fn draw(entries: &[TreeEntry], prefix: &str, out: &mut String) {
    for (i, entry) in entries.iter().enumerate() {
        let last = i + 1 == entries.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&entry.id);
        out.push('\n');

        draw(&entry.children, &format!("{}{}", prefix, indent), out);
    }
}
