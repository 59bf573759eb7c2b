use serde::Deserialize;

/// Main configuration structure for Wiki-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub crawl: CrawlConfig,
    #[serde(default, rename = "seed")]
    pub seeds: Vec<SeedEntry>,
    #[serde(default, rename = "query")]
    pub queries: Vec<QueryEntry>,
}

/// Network access configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Prefix that turns an article id into its URL
    #[serde(rename = "article-prefix")]
    pub article_prefix: String,

    /// Directory holding one cached file per fetched URL
    #[serde(rename = "cache-dir")]
    pub cache_dir: String,

    /// Minimum time between two live requests (milliseconds)
    #[serde(rename = "min-request-interval")]
    pub min_request_interval: u64,

    /// Maximum number of live requests per run
    #[serde(rename = "max-requests")]
    pub max_requests: u32,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Skip cache reads (fresh content is still written back)
    #[serde(rename = "ignore-cache", default)]
    pub ignore_cache: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Default graph-building and search budgets
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Links expanded per article
    #[serde(rename = "breadth-limit")]
    pub breadth_limit: usize,

    /// Recursion levels below each seed
    #[serde(rename = "depth-budget")]
    pub depth_budget: u32,

    /// Longest path explored by queries
    #[serde(rename = "max-path-length")]
    pub max_path_length: usize,

    /// Links shown per node when printing trees
    #[serde(rename = "tree-display-limit", default = "default_tree_display_limit")]
    pub tree_display_limit: usize,
}

/// A starting article, optionally with its own budgets
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub id: String,

    #[serde(rename = "breadth-limit")]
    pub breadth_limit: Option<usize>,

    #[serde(rename = "depth-budget")]
    pub depth_budget: Option<u32>,
}

/// A reachability question asked once all seeds are expanded
#[derive(Debug, Clone, Deserialize)]
pub struct QueryEntry {
    pub from: String,
    pub to: String,

    #[serde(rename = "max-path-length")]
    pub max_path_length: Option<usize>,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_tree_display_limit() -> usize {
    15
}

impl SeedEntry {
    pub fn breadth_limit(&self, crawl: &CrawlConfig) -> usize {
        self.breadth_limit.unwrap_or(crawl.breadth_limit)
    }

    pub fn depth_budget(&self, crawl: &CrawlConfig) -> u32 {
        self.depth_budget.unwrap_or(crawl.depth_budget)
    }
}

impl QueryEntry {
    pub fn max_path_length(&self, crawl: &CrawlConfig) -> usize {
        self.max_path_length.unwrap_or(crawl.max_path_length)
    }
}
