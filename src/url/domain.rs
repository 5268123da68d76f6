use url::Url;

/// Extracts the lower-cased host of a URL, without any port
///
/// Returns `None` for URLs that carry no host (e.g. `mailto:` links).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use campus_harvest::url::extract_domain;
///
/// let url = Url::parse("https://FIN.UTDallas.edu:8443/faculty").unwrap();
/// assert_eq!(extract_domain(&url), Some("fin.utdallas.edu".to_string()));
///
/// let url = Url::parse("mailto:dean@utdallas.edu").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
