use sha2::{Digest, Sha256};
use url::Url;

/// Hex digits of the URL digest appended to every name
const DIGEST_LEN: usize = 8;

/// Derives the cache file name for a URL
///
/// The readable part is the second-to-last label of the host followed by the
/// path, with every run of non-alphanumeric characters collapsed into `_` and
/// trailing underscores trimmed. Paths that differ only in punctuation
/// (`/wiki/Dr` and `/wiki/Dr.`) collapse to the same readable part, so the
/// first hex digits of the SHA-256 of the full URL follow it.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_ripple::url::cache_file_name;
///
/// let url = Url::parse("https://en.wikipedia.org/wiki/Cat").unwrap();
/// assert_eq!(cache_file_name(&url), "wikipedia_wiki_Cat_495b690f.html");
/// ```
pub fn cache_file_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let labels: Vec<&str> = host.split('.').collect();
    let site = if labels.len() >= 2 {
        labels[labels.len() - 2]
    } else {
        host
    };

    let mut name = sanitize(site);
    name.push_str(&sanitize(url.path()));

    let digest = hex::encode(Sha256::digest(url.as_str().as_bytes()));

    let trimmed = name.trim_end_matches('_');
    format!("{}_{}.html", trimmed, &digest[..DIGEST_LEN])
}

fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    out
}
