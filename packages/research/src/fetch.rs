//! URL normalization and bounded content fetching.
//!
//! Normalization is purely syntactic (no network access). Fetching is
//! bounded in both time (per-request timeout) and size (content cap) so
//! untrusted external pages can be handed to the model safely.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;
use crate::types::ResearchConfig;

/// Browser identification sent with outbound fetches. Plain bot agents get
/// blocked or served empty shells by most marketing sites.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Validate and canonicalize a raw string into an absolute, schemed URL.
///
/// Trims whitespace and prepends `https://` when no scheme is present,
/// then parses strictly. Deterministic and idempotent; parse failure is a
/// terminal error naming the offending input.
pub fn normalize_url(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl { url: raw.to_string() });
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|_| FetchError::InvalidUrl {
        url: raw.to_string(),
    })?;

    if url.host_str().is_none() {
        return Err(FetchError::InvalidUrl { url: raw.to_string() });
    }

    Ok(url)
}

/// Outcome of one bounded fetch.
///
/// The fetcher never errors across its public boundary; every failure mode
/// is represented here so batch orchestration can treat units uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success {
        content: String,
        /// Whether the body was cut at the content cap. Truncation is
        /// recorded, not hidden.
        truncated: bool,
    },
    Failure {
        reason: String,
    },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Content fetching seam. Implementations must resolve every request to a
/// [`FetchOutcome`]; panicking or erroring would break fail-soft batching.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// HTTP fetcher with a wall-clock timeout and a content cap.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
    max_content_chars: usize,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::from_config(&ResearchConfig::default())
    }
}

impl HttpFetcher {
    /// Create a fetcher with default bounds (30s, 50k chars).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher bounded per the given config.
    pub fn from_config(config: &ResearchConfig) -> Self {
        Self {
            // The client timeout covers the whole request and cancels
            // exactly the one in-flight fetch when it elapses.
            client: reqwest::Client::builder()
                .timeout(config.fetch_timeout)
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_content_chars: config.max_content_chars,
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    async fn fetch_inner(&self, url: &Url) -> Result<(String, bool), FetchError> {
        debug!(url = %url, "fetch starting");

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| classify_reqwest_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(e, url))?;

        let (content, truncated) = truncate_chars(body, self.max_content_chars);

        debug!(
            url = %url,
            content_chars = content.chars().count(),
            truncated,
            "fetch completed"
        );

        Ok((content, truncated))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        match self.fetch_inner(url).await {
            Ok((content, truncated)) => FetchOutcome::Success { content, truncated },
            Err(e) => {
                warn!(url = %url, error = %e, "fetch failed");
                FetchOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn classify_reqwest_error(e: reqwest::Error, url: &Url) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport(e.to_string())
    }
}

/// Truncate to at most `max` characters on a char boundary, reporting
/// whether anything was cut.
fn truncate_chars(mut s: String, max: usize) -> (String, bool) {
    match s.char_indices().nth(max) {
        Some((idx, _)) => {
            s.truncate(idx);
            (s, true)
        }
        None => (s, false),
    }
}
