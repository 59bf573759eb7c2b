//! On-disk page cache
//!
//! One file per URL under a single directory. Entries never expire: a cached
//! URL is never requested from the origin again.

use crate::url::cache_file_name;
use crate::WikiError;
use std::path::PathBuf;
use url::Url;

/// Directory-backed store of raw page content keyed by URL
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// Creates a cache rooted at `dir`; the directory is created lazily
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file that holds (or would hold) the content of `url`
    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.dir.join(cache_file_name(url))
    }

    /// Reads the cached content for `url`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(String))` - The cached content
    /// * `Ok(None)` - No entry for this URL
    /// * `Err(WikiError::Cache)` - The entry exists but could not be read
    pub fn read(&self, url: &Url) -> Result<Option<String>, WikiError> {
        let path = self.path_for(url);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| WikiError::Cache {
                path: path.display().to_string(),
                source,
            })
    }

    /// Stores `content` verbatim as the entry for `url`
    pub fn write(&self, url: &Url, content: &str) -> Result<PathBuf, WikiError> {
        if !self.dir.exists() {
            tracing::info!("No cache directory yet, creating {}", self.dir.display());
            std::fs::create_dir_all(&self.dir).map_err(|source| WikiError::Cache {
                path: self.dir.display().to_string(),
                source,
            })?;
        }

        let path = self.path_for(url);
        std::fs::write(&path, content).map_err(|source| WikiError::Cache {
            path: path.display().to_string(),
            source,
        })?;

        Ok(path)
    }
}
