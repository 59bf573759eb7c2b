use crate::WikiError;

/// Path prefix of same-site article links
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// Builds the URL of an article from the configured prefix
///
/// # Examples
///
/// ```
/// use wiki_ripple::url::article_url;
///
/// let url = article_url("https://en.wikipedia.org/wiki/", "Cat");
/// assert_eq!(url, "https://en.wikipedia.org/wiki/Cat");
/// ```
pub fn article_url(prefix: &str, id: &str) -> String {
    format!("{}{}", prefix, id)
}

/// Schemes that mark a string as a full URL
const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Rejects strings that are paths or URLs rather than bare article ids
///
/// Ids that merely start with the letters `http` (`Httpd`, `httpd`) are fine.
pub fn validate_article_id(id: &str) -> Result<(), WikiError> {
    if id.is_empty() {
        return Err(WikiError::InvalidArticleId(
            "article id cannot be empty".to_string(),
        ));
    }

    if id.starts_with(ARTICLE_PATH_PREFIX) {
        return Err(WikiError::InvalidArticleId(format!(
            "expected a bare article id, not an article path: '{}'",
            id
        )));
    }

    if URL_SCHEMES.iter().any(|scheme| id.starts_with(scheme)) {
        return Err(WikiError::InvalidArticleId(format!(
            "expected a bare article id, not a URL: '{}'",
            id
        )));
    }

    Ok(())
}

/// Extracts an article id from a link href
///
/// Only same-site article links qualify: the href must start with `/wiki/`,
/// contain neither a namespace separator (`:`) nor a fragment (`#`), and what
/// follows the prefix must pass [`validate_article_id`].
///
/// # Examples
///
/// ```
/// use wiki_ripple::url::article_id_from_href;
///
/// assert_eq!(article_id_from_href("/wiki/Cat"), Some("Cat"));
/// assert_eq!(article_id_from_href("/wiki/File:Cat.jpg"), None);
/// assert_eq!(article_id_from_href("https://example.com/wiki/Cat"), None);
/// ```
pub fn article_id_from_href(href: &str) -> Option<&str> {
    let id = href.strip_prefix(ARTICLE_PATH_PREFIX)?;

    if id.contains(':') || id.contains('#') {
        return None;
    }

    validate_article_id(id).ok()?;
    Some(id)
}
