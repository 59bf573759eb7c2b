//! Statistics about the article directory
//!
//! This module summarises what a run has discovered and what it cost in
//! network requests.

use crate::crawler::PoliteFetcher;
use crate::graph::PageDirectory;
use chrono::NaiveDate;

/// Directory summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStatistics {
    /// Number of loaded pages
    pub total_pages: usize,

    /// Outgoing links across all pages, duplicates included
    pub total_links: usize,

    /// Linked ids not loaded yet
    pub frontier_size: usize,

    /// Id and word count of the shortest page
    pub shortest_page: Option<(String, usize)>,

    /// Id and last-edit date of the oldest page
    pub oldest_page: Option<(String, NaiveDate)>,

    /// Live requests issued by the fetcher
    pub live_requests: u32,

    /// Fetches answered from the cache
    pub cache_hits: u32,
}

/// Collects statistics from the directory and the fetcher that filled it
pub fn collect_statistics(directory: &PageDirectory, fetcher: &PoliteFetcher) -> DirectoryStatistics {
    DirectoryStatistics {
        total_pages: directory.len(),
        total_links: directory
            .iter()
            .map(|node| node.outgoing_link_ids.len())
            .sum(),
        frontier_size: directory.frontier().len(),
        shortest_page: directory
            .shortest_page()
            .map(|node| (node.id.clone(), node.word_count)),
        oldest_page: directory
            .oldest_page()
            .map(|node| (node.id.clone(), node.last_edit)),
        live_requests: fetcher.request_count(),
        cache_hits: fetcher.cache_hits(),
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &DirectoryStatistics) {
    println!("=== Directory Statistics ===\n");

    println!("Overview:");
    println!("  Pages loaded: {}", stats.total_pages);
    println!("  Links recorded: {}", stats.total_links);
    println!("  Frontier (linked, not loaded): {}", stats.frontier_size);
    println!();

    if let Some((id, words)) = &stats.shortest_page {
        println!("Shortest page: {} ({} words)", id, words);
    }
    if let Some((id, date)) = &stats.oldest_page {
        println!("Oldest page: {} (last edited {})", id, date.format("%-d %B %Y"));
    }
    println!();

    let total_fetches = stats.live_requests + stats.cache_hits;
    let hit_rate = if total_fetches > 0 {
        (stats.cache_hits as f64 / total_fetches as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Requests: {} live, {} from cache ({:.1}% cache hit rate)",
        stats.live_requests, stats.cache_hits, hit_rate
    );
}
