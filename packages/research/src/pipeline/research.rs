//! Research aggregation - the one place `ResearchResults` is assembled.
//!
//! Merges scraped competitor data, optional CSV segmentation context, and
//! the stage-level synthesis call into a single result. The caller is
//! guaranteed a well-formed record even when the model's synthesis reply is
//! malformed; only the synthesis call itself erroring propagates.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::{CompletionRequest, AI};
use crate::error::{ResearchError, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::types::{
    CompetitorExtraction, ResearchConfig, ResearchDepth, ResearchRequest, ResearchResults,
    SegmentReport, Synthesis,
};

use super::csv::{analyze_segments, parse_csv};
use super::extract::Extractor;
use super::prompts::{format_research_prompt, ANALYST_SYSTEM_PROMPT};
use super::scrape::{scrape_competitors, scrape_one, CompetitorBatch};

/// The full research pipeline: fan-out scraping, stage prompt selection,
/// synthesis, and final assembly.
#[derive(Clone)]
pub struct ResearchPipeline {
    fetcher: Arc<dyn Fetch>,
    extractor: Extractor,
    config: ResearchConfig,
}

impl ResearchPipeline {
    /// Create a pipeline over the given model seam with default bounds.
    pub fn new(ai: Arc<dyn AI>) -> Self {
        let config = ResearchConfig::default();
        Self {
            fetcher: Arc::new(HttpFetcher::from_config(&config)),
            extractor: Extractor::new(ai),
            config,
        }
    }

    /// Replace the config (rebuilds the HTTP fetcher with its bounds).
    pub fn with_config(mut self, config: ResearchConfig) -> Self {
        self.fetcher = Arc::new(HttpFetcher::from_config(&config));
        self.config = config;
        self
    }

    /// Substitute the fetcher (tests). Apply after `with_config`.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Scrape one competitor URL (the single-item boundary operation).
    pub async fn scrape_competitor(&self, raw_url: &str) -> Result<CompetitorExtraction> {
        scrape_one(self.fetcher.as_ref(), &self.extractor, &self.config, raw_url).await
    }

    /// Parse uploaded customer CSV data and synthesize segments.
    pub async fn analyze_csv(&self, csv_text: &str) -> Result<SegmentReport> {
        let table = parse_csv(csv_text)?;
        analyze_segments(&self.extractor, &self.config, &table).await
    }

    /// Run one complete research pass for a validated request.
    pub async fn run(&self, request: &ResearchRequest) -> Result<ResearchResults> {
        info!(
            product = %request.product,
            stage = %request.stage,
            competitors = request.competitors.len(),
            "starting research run"
        );

        let batch = if request.competitors.is_empty() {
            CompetitorBatch::default()
        } else {
            scrape_competitors(
                self.fetcher.as_ref(),
                &self.extractor,
                &self.config,
                &request.competitors,
            )
            .await
        };

        let prompt = format_research_prompt(request, &batch.competitors);
        let completion = CompletionRequest::new(prompt, self.config.synthesis_max_tokens)
            .with_system(ANALYST_SYSTEM_PROMPT)
            .with_temperature(self.config.synthesis_temperature);

        let synthesis = match self.extractor.extract::<Synthesis>(completion).await {
            Ok(synthesis) => synthesis,
            Err(ResearchError::UnparsableResponse { reason, raw }) => {
                let prefix: String = raw.chars().take(crate::error::RAW_PREFIX_CHARS).collect();
                warn!(
                    reason = %reason,
                    raw_prefix = %prefix,
                    "synthesis reply unparsable; degrading to raw analysis"
                );
                degraded_synthesis(&batch.competitors, raw)
            }
            // The call itself failing (network, API) makes the whole run
            // meaningless; propagate.
            Err(e) => return Err(e),
        };

        let results = ResearchResults {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            stage: request.stage,
            synthesis,
            data_sources_cited: data_sources(request),
            research_depth: ResearchDepth {
                competitors_analyzed: batch.competitors.len(),
                reviews_analyzed: 0,
                data_points_collected: batch.competitors.len() * 10,
            },
        };

        info!(
            request_id = %results.request_id,
            competitors_analyzed = results.research_depth.competitors_analyzed,
            degraded = results.synthesis.analysis.is_some(),
            "research run completed"
        );

        Ok(results)
    }
}

/// Build the fallback synthesis when the model's reply did not parse:
/// structured fields come from the data already scraped, the raw text
/// survives in the `analysis` escape hatch.
fn degraded_synthesis(competitors: &[CompetitorExtraction], raw: String) -> Synthesis {
    let competitor_values = competitors
        .iter()
        .filter_map(|c| serde_json::to_value(c).ok())
        .collect();

    Synthesis {
        competitors: competitor_values,
        analysis: Some(raw),
        ..Default::default()
    }
}

fn data_sources(request: &ResearchRequest) -> Vec<String> {
    let mut sources = vec![
        "Competitor website analysis".to_string(),
        "Claude AI market research".to_string(),
    ];
    if request.csv_analysis.is_some() {
        sources.push("Customer data analysis".to_string());
    }
    sources
}
