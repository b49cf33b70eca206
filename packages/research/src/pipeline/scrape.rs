//! Concurrent competitor scraping - fan-out, fail-soft, stable fan-in.
//!
//! Each URL runs normalize -> fetch -> extract as one independent unit with
//! no shared mutable state. A unit's failure never fails the batch; it is
//! logged and dropped, and the surviving extractions keep their submitted
//! relative order.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::ai::CompletionRequest;
use crate::error::{FetchError, ResearchError, Result};
use crate::fetch::{normalize_url, Fetch, FetchOutcome};
use crate::types::{CompetitorExtraction, ResearchConfig};

use super::extract::Extractor;
use super::prompts::format_competitor_prompt;

/// Fan-in result of one competitor batch.
#[derive(Debug, Default)]
pub struct CompetitorBatch {
    /// Successful extractions, in submitted relative order.
    pub competitors: Vec<CompetitorExtraction>,

    /// Units actually attempted (after the cap, before failures).
    pub attempted: usize,
}

/// Scrape a single competitor URL into a structured extraction.
///
/// Fails with `Fetch` for invalid URLs and fetch failures, and with
/// `UnparsableResponse`/`Model` when extraction goes wrong; callers decide
/// whether that is a dropped unit or a reportable error.
pub async fn scrape_one(
    fetcher: &dyn Fetch,
    extractor: &Extractor,
    config: &ResearchConfig,
    raw_url: &str,
) -> Result<CompetitorExtraction> {
    let url = normalize_url(raw_url)?;

    let content = match fetcher.fetch(&url).await {
        FetchOutcome::Success { content, truncated } => {
            if truncated {
                debug!(url = %url, "page content truncated to cap");
            }
            content
        }
        FetchOutcome::Failure { reason } => {
            return Err(ResearchError::Fetch(FetchError::Failed { reason }));
        }
    };

    let prompt = format_competitor_prompt(url.as_str(), &content);
    let mut extraction: CompetitorExtraction = extractor
        .extract(CompletionRequest::new(prompt, config.extraction_max_tokens))
        .await?;

    // The model never sees a reliable URL for itself; stamp the one we
    // actually fetched.
    extraction.url = url.to_string();

    Ok(extraction)
}

/// Scrape up to `config.max_competitors` URLs concurrently.
///
/// URLs beyond the cap are dropped, not queued. No retries; retrying is a
/// caller-level concern.
pub async fn scrape_competitors(
    fetcher: &dyn Fetch,
    extractor: &Extractor,
    config: &ResearchConfig,
    urls: &[String],
) -> CompetitorBatch {
    let capped = &urls[..urls.len().min(config.max_competitors)];
    if capped.len() < urls.len() {
        warn!(
            submitted = urls.len(),
            cap = config.max_competitors,
            "competitor list exceeds cap; extra URLs dropped"
        );
    }

    let units = capped.iter().map(|raw_url| async move {
        match scrape_one(fetcher, extractor, config, raw_url).await {
            Ok(extraction) => Some(extraction),
            Err(e) => {
                warn!(url = %raw_url, error = %e, "competitor unit failed; dropping");
                None
            }
        }
    });

    // join_all preserves submission order, so the filtered list is a
    // stable subset rather than a race-determined one.
    let outcomes = join_all(units).await;

    let attempted = outcomes.len();
    let competitors: Vec<CompetitorExtraction> = outcomes.into_iter().flatten().collect();

    info!(
        attempted,
        succeeded = competitors.len(),
        "competitor batch settled"
    );

    CompetitorBatch {
        competitors,
        attempted,
    }
}
