//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured identifying headers
//! - GET requests with a fixed per-request timeout
//! - Classifying failures into page-level errors

use crate::config::UserAgentConfig;
use crate::{HarvestError, PageError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully fetched HTML response
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// Every request carries the configured User-Agent and Accept-Language
/// headers. Redirects are followed (up to reqwest's default of 10 hops).
///
/// # Example
///
/// ```no_run
/// use campus_harvest::config::UserAgentConfig;
/// use campus_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    if !config.accept_language.is_empty() {
        let value = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| HarvestError::InvalidHeader(format!("accept-language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL and returns its body if it is a 2xx HTML response
///
/// # Error Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection refused, DNS, TLS, timeout | `Transport` |
/// | Non-2xx status | `HttpStatus` |
/// | Content-Type without `text/html` | `UnsupportedContentType` |
/// | Body could not be read or decoded | `Transport` |
///
/// No retries are attempted.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, PageError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| transport_error(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(PageError::UnsupportedContentType {
            url: url.to_string(),
            content_type,
        });
    }

    let final_url = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(url, &e))?;

    Ok(FetchedPage { final_url, body })
}

fn transport_error(url: &Url, error: &reqwest::Error) -> PageError {
    let message = if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    PageError::Transport {
        url: url.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        let config = UserAgentConfig {
            user_agent: "TestHarvester/1.0".to_string(),
            accept_language: "en-US".to_string(),
        };
        build_http_client(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&UserAgentConfig::default(), Duration::from_secs(15)).is_ok());
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = UserAgentConfig {
            user_agent: "TestHarvester/1.0".to_string(),
            accept_language: "en\nUS".to_string(),
        };
        assert!(matches!(
            build_http_client(&config, Duration::from_secs(5)),
            Err(HarvestError::InvalidHeader(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_html_sends_identifying_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "TestHarvester/1.0"))
            .and(header("accept-language", "en-US"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let page = fetch_page(&test_client(), &url).await.unwrap();

        assert!(page.body.contains("hi"));
        assert!(page.final_url.ends_with("/page"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let result = fetch_page(&test_client(), &url).await;

        assert!(matches!(
            result,
            Err(PageError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/api", server.uri())).unwrap();
        let result = fetch_page(&test_client(), &url).await;

        assert!(matches!(
            result,
            Err(PageError::UnsupportedContentType { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener so the port is closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = Url::parse(&format!("http://127.0.0.1:{}/gone", port)).unwrap();
        let result = fetch_page(&test_client(), &url).await;

        assert!(matches!(result, Err(PageError::Transport { .. })));
    }
}
