//! Depth-limited path search over a partially known graph
//!
//! The search is a plain depth-first walk in link order. It returns the first
//! path it finds, which is not necessarily the shortest one: a different
//! directory state, or a different link order, can yield a longer or shorter
//! answer for the same endpoints.

use crate::graph::{PageDirectory, PageNode};

/// Looks for a path from `node` to `target`
///
/// # Search Rules
///
/// 1. The path so far plus `node` is the candidate path
/// 2. `node` is the target → return the candidate path
/// 3. `node` is already on `current_path` → give up on this branch (cycle)
/// 4. For each outgoing link in order:
///    - the link is the target → return the candidate path plus the target
///      (the target need not be in the directory)
///    - the link is in the directory and `current_path` is shorter than
///      `max_path_length` → search from that node; the first hit wins
/// 5. Nothing found → `None`
///
/// Ids missing from the directory are dead ends, never errors.
///
/// # Arguments
///
/// * `directory` - Known articles
/// * `node` - Article being visited
/// * `current_path` - Ids visited before `node`, in order
/// * `target` - Id being searched for
/// * `max_path_length` - Longest `current_path` from which the search still descends
pub fn find_path(
    directory: &PageDirectory,
    node: &PageNode,
    current_path: &[String],
    target: &str,
    max_path_length: usize,
) -> Option<Vec<String>> {
    let mut next_path = current_path.to_vec();
    next_path.push(node.id.clone());

    if node.id == target {
        return Some(next_path);
    }

    if current_path.contains(&node.id) {
        return None;
    }

    for link in &node.outgoing_link_ids {
        if link == target {
            next_path.push(link.clone());
            return Some(next_path);
        }

        if current_path.len() < max_path_length {
            if let Some(subpage) = directory.get(link) {
                if let Some(path) = find_path(directory, subpage, &next_path, target, max_path_length)
                {
                    return Some(path);
                }
            }
        }
    }

    None
}

/// Looks up `from` and searches for a path to `to` from there
///
/// Returns `None` if `from` is not in the directory.
pub fn find_path_between(
    directory: &PageDirectory,
    from: &str,
    to: &str,
    max_path_length: usize,
) -> Option<Vec<String>> {
    let start = directory.get(from)?;
    find_path(directory, start, &[], to, max_path_length)
}
