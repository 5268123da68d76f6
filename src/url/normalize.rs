use url::Url;

/// Normalizes a URL into the form used as the crawl's uniqueness key
///
/// # Normalization Steps
///
/// 1. Parse the URL (scheme and host come back lower-cased, default ports dropped)
/// 2. Lower-case the host for schemes the parser leaves untouched
/// 3. Remove the query string and the fragment
/// 4. Strip trailing slashes, default an empty path to `/`
/// 5. Collapse runs of `/` inside the path to a single slash
///
/// Input that does not parse as an absolute URL goes through the same steps
/// on the raw string, so this never fails. The steps are repeated until the
/// output is stable, which makes the result idempotent:
/// `normalize_url(&normalize_url(u)) == normalize_url(u)`.
///
/// # Examples
///
/// ```
/// use campus_harvest::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("HTTPS://Example.EDU/a//b/?q=1#top"),
///     "https://example.edu/a/b"
/// );
/// ```
pub fn normalize_url(url_str: &str) -> String {
    let mut current = normalize_once(url_str);
    for _ in 0..MAX_PASSES {
        let next = normalize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Upper bound on re-normalization passes; real inputs settle in one or two
const MAX_PASSES: usize = 8;

fn normalize_once(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(url) => normalize_parsed(url),
        Err(_) => normalize_raw(url_str),
    }
}

fn normalize_parsed(mut url: Url) -> String {
    url.set_query(None);
    url.set_fragment(None);

    if let Some(host) = url.host_str() {
        if host.chars().any(|c| c.is_ascii_uppercase()) {
            let lowered = host.to_ascii_lowercase();
            // Opaque hosts of non-special schemes accept any lower-cased form
            let _ = url.set_host(Some(&lowered));
        }
    }

    // mailto:, data: and friends have no hierarchical path to clean up
    if url.cannot_be_a_base() {
        return url.into();
    }

    let path = normalize_path(url.path());
    url.set_path(&path);
    url.into()
}

/// Best-effort normalization for strings the URL parser rejects
fn normalize_raw(raw: &str) -> String {
    // Same pre-processing the URL parser applies before it looks at the input
    let cleaned: String = raw
        .trim_matches(|c: char| c.is_ascii_control() || c == ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let without_fragment = cleaned.split('#').next().unwrap_or_default();
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or_default()
        .trim_end_matches(|c: char| c.is_ascii_control() || c == ' ');

    let (authority, path) = match without_query.find("://") {
        Some(idx) => {
            let after_scheme = idx + 3;
            let path_start = without_query[after_scheme..]
                .find('/')
                .map(|p| after_scheme + p)
                .unwrap_or(without_query.len());
            (
                without_query[..path_start].to_lowercase(),
                &without_query[path_start..],
            )
        }
        None => (String::new(), without_query),
    };

    format!("{}{}", authority, normalize_path(path))
}

/// Removes trailing slashes and collapses repeated slashes
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut normalized = String::with_capacity(trimmed.len());
    let mut previous_slash = false;
    for c in trimmed.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        normalized.push(c);
    }

    normalized
}
