//! Structured extraction - one model call, validated into a typed record.
//!
//! This is what turns "call an LLM" into a data contract: the reply is
//! sanitized and strictly parsed before anything downstream trusts it. A
//! parse failure is a hard, typed error carrying the raw text so callers
//! can choose between degrading gracefully and propagating.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use crate::ai::{CompletionRequest, AI};
use crate::error::{ResearchError, Result};

use super::sanitize::strip_code_fences;

/// Runs completions and validates the replies into typed records.
#[derive(Clone)]
pub struct Extractor {
    ai: Arc<dyn AI>,
}

impl Extractor {
    /// Create an extractor over the given model seam.
    pub fn new(ai: Arc<dyn AI>) -> Self {
        Self { ai }
    }

    /// Run one completion and parse the reply into `T`.
    ///
    /// Returns [`ResearchError::UnparsableResponse`] when the reply does
    /// not conform; never panics on model output.
    pub async fn extract<T: DeserializeOwned>(&self, request: CompletionRequest) -> Result<T> {
        let raw = self.ai.complete(request).await?;
        parse_structured(&raw)
    }
}

/// Sanitize and strictly parse a raw model reply into `T`.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let sanitized = strip_code_fences(raw);

    serde_json::from_str(&sanitized).map_err(|e| {
        let err = ResearchError::UnparsableResponse {
            reason: e.to_string(),
            raw: raw.to_string(),
        };
        warn!(
            reason = %e,
            raw_prefix = err.raw_prefix().unwrap_or_default(),
            "model response failed schema validation"
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompetitorExtraction;

    #[test]
    fn test_parse_valid_json() {
        let extraction: CompetitorExtraction =
            parse_structured(r#"{"description": "A project tool"}"#).unwrap();
        assert_eq!(extraction.description, "A project tool");
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"description\": \"fenced\"}\n```";
        let extraction: CompetitorExtraction = parse_structured(raw).unwrap();
        assert_eq!(extraction.description, "fenced");
    }

    #[test]
    fn test_parse_prose_is_typed_error() {
        let raw = "I'm sorry, I can't extract that.";
        let err = parse_structured::<CompetitorExtraction>(raw).unwrap_err();

        match &err {
            ResearchError::UnparsableResponse { raw: kept, .. } => assert_eq!(kept, raw),
            other => panic!("expected UnparsableResponse, got {:?}", other),
        }
        assert_eq!(err.raw_prefix(), Some(raw));
    }

    #[test]
    fn test_parse_schema_violation_is_typed_error() {
        // Valid JSON, wrong shape: an array where an object is required.
        let raw = r#"[1, 2, 3]"#;
        assert!(parse_structured::<CompetitorExtraction>(raw).is_err());
    }
}
