use serde::Deserialize;

/// Domains of the business school subdomains crawled by default
const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "jindal.utdallas.edu",
    "accounting.utdallas.edu",
    "fin.utdallas.edu",
    "infosystems.utdallas.edu",
    "marketing.utdallas.edu",
    "osim.utdallas.edu",
    "om.utdallas.edu",
    "execed.utdallas.edu",
    "mba.utdallas.edu",
    "sem.utdallas.edu",
];

/// Path fragments that mark a link as a non-HTML download
const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".docx", ".xlsx"];

/// Main configuration structure for Campus-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub seeds: SeedConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hard cap on the number of URLs marked visited in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Pause after every dequeued URL (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            delay_ms: default_delay_ms(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Identifying headers sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Value of the Accept-Language header
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

/// Crawl scope: which hosts may be fetched and which paths are skipped
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Exact hostnames the crawler may fetch from (no wildcard expansion)
    #[serde(rename = "allowed-domains", default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,

    /// Extensions rejected when they appear anywhere in a URL path
    #[serde(rename = "excluded-extensions", default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
            excluded_extensions: default_excluded_extensions(),
        }
    }
}

/// Where the initial queue comes from
///
/// Sources are tried in order: explicit `urls`, then the root of every
/// allow-listed domain when `from-allowed-domains` is set, then the sitemap.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Explicit seed URLs; when non-empty no other source is consulted
    #[serde(default)]
    pub urls: Vec<String>,

    /// Seed with `https://{domain}/` for each allow-listed domain
    #[serde(rename = "from-allowed-domains", default)]
    pub from_allowed_domains: bool,

    /// Sitemap page whose in-scope anchors become the seeds
    ///
    /// An empty string disables the sitemap.
    #[serde(rename = "sitemap-url", default = "default_sitemap_url")]
    pub sitemap_url: Option<String>,
}

impl SeedConfig {
    /// The sitemap URL, if one is configured and non-blank
    pub fn sitemap(&self) -> Option<&str> {
        self.sitemap_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            from_allowed_domains: false,
            sitemap_url: default_sitemap_url(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file written at the end of the run
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_max_pages() -> usize {
    10_000
}

fn default_delay_ms() -> u64 {
    2_000
}

fn default_request_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

fn default_allowed_domains() -> Vec<String> {
    DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect()
}

fn default_excluded_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_sitemap_url() -> Option<String> {
    Some("https://jindal.utdallas.edu/sitemap/".to_string())
}

fn default_csv_path() -> String {
    "jindal_comprehensive_data.csv".to_string()
}
