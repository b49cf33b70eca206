//! Aggregated research result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::request::Stage;

/// The stage-level strategic synthesis parsed from one model call.
///
/// Framework bodies (market sizing, SWOT, Porter's, positioning, pricing,
/// GTM, action plan) are schema-validated JSON passed through without
/// semantic inspection; the pipeline's contract is "validated JSON with
/// these keys", not analyst-prose validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synthesis {
    #[serde(default)]
    pub competitors: Vec<Value>,

    #[serde(default)]
    pub icp_profiles: Vec<Value>,

    #[serde(default)]
    pub market_data: Value,

    #[serde(default)]
    pub swot_analyses: Vec<Value>,

    #[serde(default)]
    pub porters_five_forces: Value,

    #[serde(default)]
    pub positioning: Value,

    #[serde(default)]
    pub pricing: Value,

    #[serde(default)]
    pub gtm_channels: Vec<Value>,

    #[serde(default)]
    pub action_plan: Vec<Value>,

    /// Escape hatch: raw model text, set only when the synthesis reply
    /// could not be parsed and the run degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

/// Observability counters for one research run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchDepth {
    pub competitors_analyzed: usize,
    pub reviews_analyzed: usize,
    pub data_points_collected: usize,
}

/// A completed research run.
///
/// `request_id` and `timestamp` are assigned by the aggregator exactly
/// once, at final assembly; they identify a completed run, not an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResults {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub stage: Stage,

    #[serde(flatten)]
    pub synthesis: Synthesis,

    pub data_sources_cited: Vec<String>,
    pub research_depth: ResearchDepth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_total_on_sparse_json() {
        let synthesis: Synthesis = serde_json::from_str(r#"{"icpProfiles": [{}]}"#).unwrap();
        assert_eq!(synthesis.icp_profiles.len(), 1);
        assert!(synthesis.competitors.is_empty());
        assert!(synthesis.market_data.is_null());
        assert!(synthesis.analysis.is_none());
    }

    #[test]
    fn test_results_flatten_synthesis() {
        let results = ResearchResults {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            stage: Stage::PreLaunch,
            synthesis: Synthesis {
                gtm_channels: vec![serde_json::json!({"channel": "SEO"})],
                ..Default::default()
            },
            data_sources_cited: vec!["Competitor website analysis".into()],
            research_depth: ResearchDepth::default(),
        };

        let json = serde_json::to_value(&results).unwrap();
        // Synthesis fields appear at the top level, not nested.
        assert!(json.get("gtmChannels").is_some());
        assert!(json.get("synthesis").is_none());
        assert_eq!(json["stage"], "pre-launch");
        assert!(json.get("requestId").is_some());
    }
}
