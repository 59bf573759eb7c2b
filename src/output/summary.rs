use crate::graph::PageNode;

/// Links shown at each end of a page summary's link list
const SUMMARY_LINK_SAMPLE: usize = 5;

/// Formats the facts recorded for one page
pub fn format_page_summary(node: &PageNode) -> String {
    let links = &node.outgoing_link_ids;
    let head = &links[..links.len().min(SUMMARY_LINK_SAMPLE)];
    let tail = &links[links.len().saturating_sub(SUMMARY_LINK_SAMPLE)..];

    let mut out = String::new();
    out.push_str(&format!("{} (title: '{}')\n", node.id, node.title));
    out.push_str(&format!("  URL:       {}\n", node.url));
    out.push_str(&format!("  Last edit: {}\n", node.last_edit.format("%-d %B %Y")));
    out.push_str(&format!("  Wordcount: {}\n", node.word_count));
    out.push_str(&format!(
        "  {} links:  {}...{}\n",
        links.len(),
        head.join(","),
        tail.join(",")
    ));
    out
}

/// Formats a query result as `A -> B -> C`
pub fn format_path(path: Option<&[String]>) -> String {
    match path {
        Some(ids) => ids.join(" -> "),
        None => "no path found".to_string(),
    }
}
