//! Stage-Aware Market Research Pipeline
//!
//! Combines competitor web data with LLM reasoning into a structured
//! research artifact. Given a product, a startup stage, and competitor
//! URLs, the pipeline fetches and bounds untrusted external content,
//! validates every model reply into typed records, selects a stage-specific
//! prompt strategy, tolerates partial failure of any one competitor unit,
//! and always hands the caller a well-formed result.
//!
//! # Design Philosophy
//!
//! **The model is an untrusted external service.** Every completion is a
//! network RPC with a declared response shape and a mandatory validation
//! gate; nothing downstream consumes model output that has not been
//! sanitized and schema-checked.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use research::{AnthropicAI, ResearchPipeline, ResearchRequest, Stage};
//! use anthropic_client::AnthropicClient;
//!
//! let client = AnthropicClient::from_env()?;
//! let ai = Arc::new(AnthropicAI::new(client, "claude-sonnet-4-20250514"));
//! let pipeline = ResearchPipeline::new(ai);
//!
//! let request = ResearchRequest::new("CRM for freelancers", Stage::PreLaunch)
//!     .with_competitors(["https://notion.so", "https://asana.com"]);
//! let results = pipeline.run(&request).await?;
//! ```
//!
//! # Modules
//!
//! - [`fetch`] - URL normalization and bounded content fetching
//! - [`ai`] - LLM provider seam and the Anthropic adapter
//! - [`pipeline`] - extraction, prompts, fan-out, CSV adapter, aggregation
//! - [`testing`] - mock implementations for tests

pub mod ai;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use ai::{AnthropicAI, CompletionRequest, AI};
pub use error::{FetchError, ResearchError, Result, RAW_PREFIX_CHARS};
pub use fetch::{normalize_url, Fetch, FetchOutcome, HttpFetcher};
pub use pipeline::{
    analyze_segments, parse_csv, parse_structured, scrape_competitors, scrape_one,
    strip_code_fences, CompetitorBatch, CsvTable, Extractor, ResearchPipeline,
    ANALYST_SYSTEM_PROMPT,
};
pub use types::{
    CompetitorExtraction, CustomerSegment, PricingTier, ResearchConfig, ResearchDepth,
    ResearchRequest, ResearchResults, SegmentAnalysis, SegmentReport, Stage, Synthesis,
    Testimonial,
};

// Re-export testing utilities
pub use testing::{MockAI, MockFetcher};
