//! Page metadata extraction
//!
//! This module turns fetched article HTML into the fixed metadata record the
//! graph needs:
//! - Page title (from the `<title>` tag, site suffix removed)
//! - Word count of the document text
//! - Date of the last edit (from the page footer)
//! - Same-site article ids linked from the page, in document order

use crate::url::article_id_from_href;
use crate::ExtractionError;
use chrono::NaiveDate;
use scraper::{Html, Selector};

/// Suffix the site appends to every article title
const TITLE_SUFFIX: &str = " - Wikipedia";

/// Element holding the "This page was last edited on ..." sentence
const LAST_EDIT_SELECTOR: &str = "#footer-info-lastmod";

/// Date format of the last-edit footer (e.g. "9 November 2021")
const LAST_EDIT_FORMAT: &str = "%d %B %Y";

/// Metadata extracted from one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub word_count: usize,
    pub last_edit: NaiveDate,

    /// Linked article ids in document order, duplicates kept
    pub link_ids: Vec<String>,
}

/// Capability that turns raw page content into [`PageMetadata`]
pub trait PageMetadataExtractor {
    fn extract(&self, content: &str) -> Result<PageMetadata, ExtractionError>;
}

/// Extractor for encyclopedia article HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlMetadataExtractor;

impl HtmlMetadataExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageMetadataExtractor for HtmlMetadataExtractor {
    /// Parses article HTML
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_ripple::crawler::{HtmlMetadataExtractor, PageMetadataExtractor};
    ///
    /// let html = r#"<html><head><title>Cat - Wikipedia</title></head><body>
    ///     <a href="/wiki/Felis">Felis</a>
    ///     <li id="footer-info-lastmod"> This page was last edited on 9 November 2021, at 01:02</li>
    /// </body></html>"#;
    /// let metadata = HtmlMetadataExtractor::new().extract(html).unwrap();
    /// assert_eq!(metadata.title, "Cat");
    /// assert_eq!(metadata.link_ids, vec!["Felis".to_string()]);
    /// ```
    fn extract(&self, content: &str) -> Result<PageMetadata, ExtractionError> {
        let document = Html::parse_document(content);

        let title = extract_title(&document).ok_or(ExtractionError::MissingTitle)?;
        let last_edit = extract_last_edit(&document)?;
        let word_count = count_words(&document);
        let link_ids = extract_link_ids(&document);

        Ok(PageMetadata {
            title,
            word_count,
            last_edit,
            link_ids,
        })
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|title| {
            let title = title.trim();
            title.strip_suffix(TITLE_SUFFIX).unwrap_or(title).to_string()
        })
        .filter(|s| !s.is_empty())
}

/// Extracts the date from "... last edited on 9 November 2021, at 01:02 ..."
fn extract_last_edit(document: &Html) -> Result<NaiveDate, ExtractionError> {
    let selector =
        Selector::parse(LAST_EDIT_SELECTOR).map_err(|_| ExtractionError::MissingLastEdit)?;

    let sentence = document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .ok_or(ExtractionError::MissingLastEdit)?;

    let start = sentence
        .find(" on ")
        .map(|i| i + " on ".len())
        .ok_or_else(|| ExtractionError::InvalidLastEdit(sentence.trim().to_string()))?;
    let end = sentence[start..]
        .find(", at")
        .map(|i| start + i)
        .unwrap_or(sentence.len());

    let date = sentence[start..end].trim();
    NaiveDate::parse_from_str(date, LAST_EDIT_FORMAT)
        .map_err(|_| ExtractionError::InvalidLastEdit(date.to_string()))
}

/// Counts whitespace-separated words across all text in the document
fn count_words(document: &Html) -> usize {
    document
        .root_element()
        .text()
        .map(|chunk| chunk.split_whitespace().count())
        .sum()
}

/// Extracts same-site article ids from every `<a href>` in document order
fn extract_link_ids(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(article_id_from_href)
        .map(str::to_string)
        .collect()
}
