//! Structured data extracted from a competitor website.

use serde::{Deserialize, Serialize};

/// What the model extracted from one competitor's site.
///
/// Optional sub-fields default to empty collections, never null, so
/// downstream consumers stay total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorExtraction {
    /// Normalized URL of the scraped site, stamped by the orchestrator.
    #[serde(default)]
    pub url: String,

    /// Brief 1-2 sentence company description
    #[serde(default)]
    pub description: String,

    /// Published pricing tiers, if visible
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,

    /// Core product features
    #[serde(default)]
    pub features: Vec<String>,

    /// Who they target (e.g. "SMBs", "Enterprise teams")
    #[serde(default)]
    pub target_market: String,

    /// How they position themselves
    #[serde(default)]
    pub positioning: String,

    /// Customer testimonials, if visible
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

/// One pricing tier as published on a competitor's site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// Tier name (e.g. Free, Pro, Enterprise)
    #[serde(default)]
    pub tier: String,

    /// Price as displayed (e.g. "$49/mo", "Contact sales")
    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub features: Vec<String>,
}

/// A customer testimonial quoted on a competitor's site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default)]
    pub quote: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let json = r#"{"description": "A CRM for freelancers"}"#;
        let extraction: CompetitorExtraction = serde_json::from_str(json).unwrap();

        assert_eq!(extraction.description, "A CRM for freelancers");
        assert!(extraction.pricing_tiers.is_empty());
        assert!(extraction.features.is_empty());
        assert!(extraction.testimonials.is_empty());
        assert_eq!(extraction.target_market, "");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{
            "description": "desc",
            "pricingTiers": [{"tier": "Pro", "price": "$49/mo", "features": ["API"]}],
            "targetMarket": "SMBs"
        }"#;
        let extraction: CompetitorExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction.pricing_tiers[0].tier, "Pro");
        assert_eq!(extraction.target_market, "SMBs");

        let back = serde_json::to_value(&extraction).unwrap();
        assert!(back.get("pricingTiers").is_some());
        assert!(back.get("pricing_tiers").is_none());
    }
}
