//! Configuration for the research pipeline.

use std::time::Duration;

/// Tunable knobs for the pipeline. Defaults match the production API
/// contract; tests lower the caps to keep fixtures small.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// Hard cap on competitor URLs attempted per run (extras are dropped,
    /// not queued).
    pub max_competitors: usize,

    /// Fetched page content is truncated to this many characters to
    /// respect the model's context budget.
    pub max_content_chars: usize,

    /// Wall-clock budget per competitor fetch.
    pub fetch_timeout: Duration,

    /// Rows of uploaded customer data embedded into the segmentation
    /// prompt.
    pub max_csv_rows: usize,

    /// Model used for all completions.
    pub model: String,

    /// Token budget for the stage-level synthesis call.
    pub synthesis_max_tokens: u32,

    /// Token budget for one competitor extraction call.
    pub extraction_max_tokens: u32,

    /// Token budget for the CSV segmentation call.
    pub segmentation_max_tokens: u32,

    /// Temperature for the synthesis call.
    pub synthesis_temperature: f32,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_competitors: 5,
            max_content_chars: 50_000,
            fetch_timeout: Duration::from_secs(30),
            max_csv_rows: 100,
            model: "claude-sonnet-4-20250514".to_string(),
            synthesis_max_tokens: 8000,
            extraction_max_tokens: 2048,
            segmentation_max_tokens: 3000,
            synthesis_temperature: 0.7,
        }
    }
}

impl ResearchConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the competitor cap.
    pub fn with_max_competitors(mut self, max: usize) -> Self {
        self.max_competitors = max;
        self
    }

    /// Set the content truncation budget.
    pub fn with_max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }

    /// Set the per-fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the CSV row cap.
    pub fn with_max_csv_rows(mut self, rows: usize) -> Self {
        self.max_csv_rows = rows;
        self
    }
}
