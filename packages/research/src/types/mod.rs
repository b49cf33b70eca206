//! Wire and configuration types for the research pipeline.
//!
//! Everything serialized across the HTTP boundary uses camelCase field
//! names to preserve the JSON API shape consumed by the front-end.

pub mod competitor;
pub mod config;
pub mod request;
pub mod research;
pub mod segments;

pub use competitor::{CompetitorExtraction, PricingTier, Testimonial};
pub use config::ResearchConfig;
pub use request::{ResearchRequest, Stage};
pub use research::{ResearchDepth, ResearchResults, Synthesis};
pub use segments::{CustomerSegment, SegmentAnalysis, SegmentReport};
