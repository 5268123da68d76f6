//! HTML parser for extracting page title, sections and links
//!
//! Parsing never fails: html5ever recovers from any malformed markup, so a
//! broken page still yields whatever title, sections and anchors survive.

use crate::crawler::extractor::{extract_sections, Section};
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from the first <title> tag)
    pub title: Option<String>,

    /// Heading-delimited content sections
    pub sections: Vec<Section>,

    /// All anchor targets, resolved to absolute URLs, in document order
    pub links: Vec<String>,
}

/// Parses HTML content and extracts title, sections and links
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` is resolved against `base_url`. Links that cannot
/// resolve to an http(s) URL are dropped here:
/// - `javascript:`, `mailto:`, `tel:` and `data:` hrefs
/// - hrefs the URL parser rejects
///
/// Scope and duplicate filtering happen later, in the page processor.
///
/// # Example
///
/// ```
/// use campus_harvest::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.edu/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.edu/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        sections: extract_sections(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all resolvable anchor targets from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute http(s) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Convenience function for extracting just the links from HTML
///
/// Used for seed pages, where only the anchors matter.
pub fn extract_links_simple(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    extract_links(&document, base_url)
}
