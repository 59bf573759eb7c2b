//! Polite HTTP fetcher
//!
//! Every network access in the crate goes through [`PoliteFetcher`], which:
//! - Serves pages from the on-disk cache whenever an entry exists
//! - Spaces live requests at least `min-request-interval` apart
//! - Refuses to issue more than `max-requests` live requests per run
//! - Writes every freshly fetched page back to the cache

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::crawler::cache::PageCache;
use crate::WikiError;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Number of recent URLs included in the log when the request ceiling trips
const RECENT_URLS_LOGGED: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wiki_ripple::config::UserAgentConfig;
/// use wiki_ripple::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "WikiRipple".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Format: CrawlerName/Version (+ContactURL; ContactEmail)
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Cached, throttled and capped page fetcher
///
/// One instance holds all of a run's request bookkeeping; independent
/// instances share nothing but, possibly, a cache directory.
pub struct PoliteFetcher {
    client: Client,
    cache: PageCache,
    min_interval: Duration,
    max_requests: u32,
    ignore_cache: bool,

    /// When the most recent live request was issued
    last_request: Option<Instant>,

    /// Every URL requested from the network this run, in order
    requested_urls: Vec<String>,

    cache_hits: u32,
}

impl PoliteFetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig, user_agent: &UserAgentConfig) -> Result<Self, WikiError> {
        let client = build_http_client(user_agent, Duration::from_secs(config.request_timeout))?;

        Ok(Self::with_client(
            client,
            PageCache::new(&config.cache_dir),
            Duration::from_millis(config.min_request_interval),
            config.max_requests,
        )
        .ignore_cache(config.ignore_cache))
    }

    /// Creates a fetcher from explicit parts
    pub fn with_client(
        client: Client,
        cache: PageCache,
        min_interval: Duration,
        max_requests: u32,
    ) -> Self {
        Self {
            client,
            cache,
            min_interval,
            max_requests,
            ignore_cache: false,
            last_request: None,
            requested_urls: Vec::new(),
            cache_hits: 0,
        }
    }

    /// Skips cache reads when set; fetched content is still written back
    pub fn ignore_cache(mut self, ignore: bool) -> Self {
        self.ignore_cache = ignore;
        self
    }

    /// Number of live requests issued so far
    pub fn request_count(&self) -> u32 {
        self.requested_urls.len() as u32
    }

    /// Number of fetches answered from the cache so far
    pub fn cache_hits(&self) -> u32 {
        self.cache_hits
    }

    /// URLs requested from the network so far, oldest first
    pub fn requested_urls(&self) -> &[String] {
        &self.requested_urls
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Fetches the raw content of `url`
    ///
    /// # Request Flow
    ///
    /// 1. Cache hit → return it (no delay, not counted)
    /// 2. Request ceiling reached → `TooManyRequests`, nothing is sent
    /// 3. Sleep out the remainder of the politeness interval, if any
    /// 4. Stamp the request time and send the GET
    /// 5. Non-2xx, timeout or transport failure → `Fetch`
    /// 6. Store the body in the cache and return it
    ///
    /// No retries are attempted.
    pub async fn fetch(&mut self, url: &str) -> Result<String, WikiError> {
        let parsed = Url::parse(url)?;

        if !self.ignore_cache {
            if let Some(content) = self.cache.read(&parsed)? {
                self.cache_hits += 1;
                tracing::debug!(
                    "Loaded '{}' from cache '{}'",
                    url,
                    self.cache.path_for(&parsed).display()
                );
                return Ok(content);
            }
        }

        if self.request_count() >= self.max_requests {
            let start = self.requested_urls.len().saturating_sub(RECENT_URLS_LOGGED);
            tracing::error!(
                "Refusing to request {}: limit of {} requests reached, possible runaway recursion. Last URLs requested: {:?}",
                url,
                self.max_requests,
                &self.requested_urls[start..]
            );
            return Err(WikiError::TooManyRequests {
                limit: self.max_requests,
                url: url.to_string(),
            });
        }

        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::warn!("Last request was too recent, sleeping {:?} before {}", wait, url);
            tokio::time::sleep(wait).await;
        }

        let issued_at = Instant::now();
        self.last_request = Some(issued_at);
        self.requested_urls.push(url.to_string());

        let body = self.send(url).await?;

        tracing::info!(
            "Loaded {} from the network in {}ms",
            url,
            issued_at.elapsed().as_millis()
        );

        self.cache.write(&parsed, &body)?;

        Ok(body)
    }

    /// Returns how long to wait before the next live request may be issued
    ///
    /// `None` means a request can go out now.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    async fn send(&self, url: &str) -> Result<String, WikiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WikiError::Fetch {
                url: url.to_string(),
                message: classify_transport_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Fetch {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| WikiError::Fetch {
            url: url.to_string(),
            message: classify_transport_error(&e),
        })
    }
}

fn classify_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
