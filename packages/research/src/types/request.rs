//! Research request types and the startup stage enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ResearchError;

/// Startup stage. Fixed for the lifetime of a research run; each variant
/// selects a distinct prompt strategy and required context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    PreLaunch,
    EarlyStage,
    PostRevenue,
    ScaleUp,
}

impl Stage {
    /// All four stages, in escalation order.
    pub const ALL: [Stage; 4] = [
        Stage::PreLaunch,
        Stage::EarlyStage,
        Stage::PostRevenue,
        Stage::ScaleUp,
    ];

    /// The wire name for this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreLaunch => "pre-launch",
            Stage::EarlyStage => "early-stage",
            Stage::PostRevenue => "post-revenue",
            Stage::ScaleUp => "scale-up",
        }
    }

    /// Whether this stage's prompt consumes CSV segmentation results.
    pub fn uses_csv_analysis(&self) -> bool {
        matches!(self, Stage::PostRevenue | Stage::ScaleUp)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ResearchError;

    /// Strict parse: an unrecognized stage is a validation error, never a
    /// default. Silently falling back would corrupt the research semantics.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre-launch" => Ok(Stage::PreLaunch),
            "early-stage" => Ok(Stage::EarlyStage),
            "post-revenue" => Ok(Stage::PostRevenue),
            "scale-up" => Ok(Stage::ScaleUp),
            other => Err(ResearchError::Validation {
                reason: format!(
                    "unknown stage '{}' (expected pre-launch, early-stage, post-revenue, or scale-up)",
                    other
                ),
            }),
        }
    }
}

/// A validated research request.
///
/// `product` and `stage` are mandatory and checked at the HTTP boundary
/// before this type is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    pub product: String,
    pub stage: Stage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,

    /// Competitor URLs; only the first 5 are honored.
    #[serde(default)]
    pub competitors: Vec<String>,

    /// Free-form context (e.g. `customerPatterns` for early-stage runs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<serde_json::Value>,

    /// Prior CSV segmentation output, embedded verbatim into the prompt
    /// for post-revenue and scale-up runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_analysis: Option<serde_json::Value>,
}

impl ResearchRequest {
    /// Create a minimal request.
    pub fn new(product: impl Into<String>, stage: Stage) -> Self {
        Self {
            product: product.into(),
            stage,
            target_market: None,
            competitors: Vec::new(),
            additional_context: None,
            csv_analysis: None,
        }
    }

    /// Set the target market.
    pub fn with_target_market(mut self, market: impl Into<String>) -> Self {
        self.target_market = Some(market.into());
        self
    }

    /// Set competitor URLs.
    pub fn with_competitors(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.competitors = urls.into_iter().map(|u| u.into()).collect();
        self
    }

    /// Attach prior CSV segmentation output.
    pub fn with_csv_analysis(mut self, analysis: serde_json::Value) -> Self {
        self.csv_analysis = Some(analysis);
        self
    }

    /// Attach free-form context.
    pub fn with_additional_context(mut self, context: serde_json::Value) -> Self {
        self.additional_context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_unknown_stage_rejected() {
        let err = "growth".parse::<Stage>().unwrap_err();
        assert!(err.to_string().contains("unknown stage 'growth'"));
    }

    #[test]
    fn test_stage_serde_kebab_case() {
        let json = serde_json::to_string(&Stage::PostRevenue).unwrap();
        assert_eq!(json, "\"post-revenue\"");

        let stage: Stage = serde_json::from_str("\"scale-up\"").unwrap();
        assert_eq!(stage, Stage::ScaleUp);
    }

    #[test]
    fn test_stage_serde_rejects_unknown() {
        assert!(serde_json::from_str::<Stage>("\"seed\"").is_err());
    }

    #[test]
    fn test_csv_stages() {
        assert!(!Stage::PreLaunch.uses_csv_analysis());
        assert!(!Stage::EarlyStage.uses_csv_analysis());
        assert!(Stage::PostRevenue.uses_csv_analysis());
        assert!(Stage::ScaleUp.uses_csv_analysis());
    }
}
