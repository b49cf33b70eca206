//! Typed errors for the research pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Number of characters of a raw model response kept for diagnostics.
pub const RAW_PREFIX_CHARS: usize = 500;

/// Errors that can occur during research operations.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Invalid input (missing fields, unknown stage, bad URL string)
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// Configuration error (missing credential)
    #[error("config error: {0}")]
    Config(String),

    /// Fetch operation failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// LLM provider unavailable or failed
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model returned text that does not parse as the expected JSON shape.
    ///
    /// Carries the full raw response so callers can degrade gracefully
    /// (e.g. wrap it as a free-text analysis); `raw_prefix` exposes the
    /// first [`RAW_PREFIX_CHARS`] characters for diagnosis.
    #[error("unparsable model response: {reason}")]
    UnparsableResponse { reason: String, raw: String },

    /// CSV input could not be parsed as tabular data
    #[error("CSV parse error: {reason}")]
    CsvParse { reason: String },
}

impl ResearchError {
    /// First [`RAW_PREFIX_CHARS`] characters of the offending raw response,
    /// if this is an `UnparsableResponse`.
    pub fn raw_prefix(&self) -> Option<&str> {
        match self {
            Self::UnparsableResponse { raw, .. } => {
                let end = raw
                    .char_indices()
                    .nth(RAW_PREFIX_CHARS)
                    .map(|(i, _)| i)
                    .unwrap_or(raw.len());
                Some(&raw[..end])
            }
            _ => None,
        }
    }
}

/// Errors that can occur while normalizing or fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL failed strict parsing after normalization
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    /// Wall-clock timeout elapsed
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("transport error: {0}")]
    Transport(String),

    /// A fetch outcome that resolved to failure; the reason is already
    /// rendered for the caller
    #[error("{reason}")]
    Failed { reason: String },
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;
