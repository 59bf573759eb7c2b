//! In-memory article graph
//!
//! - `PageNode`: one fetched article and its outgoing links
//! - `PageDirectory`: the id → node store every builder and query shares
//! - `find_path`: bounded, cycle-safe reachability search over the directory

mod directory;
mod node;
mod path;

pub use directory::PageDirectory;
pub use node::{build_page_node, PageNode};
pub use path::{find_path, find_path_between};

#[cfg(test)]
pub(crate) use node::stub_node;
