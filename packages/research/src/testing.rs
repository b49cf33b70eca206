//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the research
//! pipeline without making real model or network calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

use crate::ai::{CompletionRequest, AI};
use crate::error::{ResearchError, Result};
use crate::fetch::{normalize_url, Fetch, FetchOutcome};

/// A mock AI that replays scripted responses in order.
///
/// When the script runs out, it answers `{}` so schema-total types still
/// parse. Every request is recorded for assertions.
#[derive(Clone, Default)]
pub struct MockAI {
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

enum ScriptedResponse {
    Text(String),
    Error(String),
}

impl MockAI {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response text.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Text(text.into()));
        self
    }

    /// Queue a provider failure.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Error(message.into()));
        self
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request);

        match self.responses.lock().unwrap().pop_front() {
            Some(ScriptedResponse::Text(text)) => Ok(text),
            Some(ScriptedResponse::Error(message)) => Err(ResearchError::Model(Box::new(
                std::io::Error::other(message),
            ))),
            None => Ok("{}".to_string()),
        }
    }
}

/// A mock fetcher with per-URL scripted outcomes.
///
/// Unscripted URLs resolve to a failure outcome, keeping tests fail-soft
/// by construction. Keys are normalized so `"notion.so"` and
/// `"https://notion.so/"` script the same page.
#[derive(Clone, Default)]
pub struct MockFetcher {
    outcomes: Arc<Mutex<HashMap<String, FetchOutcome>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    /// Create a mock with no scripted pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful page body for a URL.
    pub fn with_page(self, url: &str, content: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().insert(
            Self::key(url),
            FetchOutcome::Success {
                content: content.into(),
                truncated: false,
            },
        );
        self
    }

    /// Script a failure outcome for a URL.
    pub fn with_failure(self, url: &str, reason: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().insert(
            Self::key(url),
            FetchOutcome::Failure {
                reason: reason.into(),
            },
        );
        self
    }

    /// URLs fetched so far, in request order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn key(url: &str) -> String {
        normalize_url(url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| url.to_string())
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        self.calls.lock().unwrap().push(url.to_string());

        self.outcomes
            .lock()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| FetchOutcome::Failure {
                reason: format!("no scripted outcome for {}", url),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ai_replays_in_order() {
        let ai = MockAI::new().with_response("one").with_error("down");

        let first = ai.complete(CompletionRequest::new("a", 10)).await.unwrap();
        assert_eq!(first, "one");

        let second = ai.complete(CompletionRequest::new("b", 10)).await;
        assert!(matches!(second, Err(ResearchError::Model(_))));

        // Script exhausted: falls back to an empty object.
        let third = ai.complete(CompletionRequest::new("c", 10)).await.unwrap();
        assert_eq!(third, "{}");

        assert_eq!(ai.call_count(), 3);
        assert_eq!(ai.calls()[1].prompt, "b");
    }

    #[tokio::test]
    async fn test_mock_fetcher_normalizes_keys() {
        let fetcher = MockFetcher::new().with_page("notion.so", "<html></html>");

        let url = normalize_url("https://notion.so").unwrap();
        assert!(fetcher.fetch(&url).await.is_success());

        let other = normalize_url("asana.com").unwrap();
        assert!(!fetcher.fetch(&other).await.is_success());

        assert_eq!(
            fetcher.fetched_urls(),
            vec!["https://notion.so/", "https://asana.com/"]
        );
    }
}
