//! Customer segmentation types produced by the CSV adapter.

use serde::{Deserialize, Serialize};

/// One customer segment identified in uploaded customer data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    /// Segment name (e.g. "Mid-Market SaaS CTOs")
    #[serde(default)]
    pub name: String,

    /// Number of customers in the segment
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub avg_deal_size: f64,

    /// Conversion rate as displayed (e.g. "34%")
    #[serde(default)]
    pub conversion_rate: String,

    /// Estimated lifetime value
    #[serde(default)]
    pub ltv: f64,

    /// Churn rate as displayed (e.g. "8%")
    #[serde(default)]
    pub churn_rate: String,

    /// Traits that define this segment
    #[serde(default)]
    pub traits: Vec<String>,
}

/// Segmentation analysis of uploaded customer data.
///
/// Produced once per CSV upload; immutable once returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentAnalysis {
    #[serde(default)]
    pub segments: Vec<CustomerSegment>,

    #[serde(default)]
    pub insights: Vec<String>,

    #[serde(default)]
    pub recommendations: Vec<String>,

    /// Description of the highest-value customer profile
    #[serde(default)]
    pub winning_profile: String,

    /// Segment to avoid (high churn, low value), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_to_avoid: Option<String>,
}

/// Envelope returned by the CSV adapter: the analysis plus how many rows
/// the upload actually contained (the prompt only sees the first 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReport {
    /// Total rows parsed from the upload, including rows beyond the
    /// prompt cap.
    pub total_records: usize,

    pub analysis: SegmentAnalysis,
}
