//! End-to-end pipeline tests over mock model and fetcher seams.

use std::sync::Arc;

use research::testing::{MockAI, MockFetcher};
use research::{
    scrape_competitors, Extractor, ResearchConfig, ResearchError, ResearchPipeline,
    ResearchRequest, Stage,
};

fn pipeline(ai: &MockAI, fetcher: &MockFetcher) -> ResearchPipeline {
    ResearchPipeline::new(Arc::new(ai.clone())).with_fetcher(Arc::new(fetcher.clone()))
}

fn competitor_json(description: &str) -> String {
    format!(r#"{{"description": "{}", "features": ["tasks"]}}"#, description)
}

const SYNTHESIS_JSON: &str = r#"{
    "competitors": [{"name": "Notion"}],
    "icpProfiles": [{"name": "Freelance designers", "priority": "primary"}],
    "marketData": {"tam": {"value": "$4B"}},
    "swotAnalyses": [],
    "portersFiveForces": {"competitiveRivalry": {"rating": "high"}},
    "positioning": {"recommendation": "own the freelancer niche"},
    "pricing": {"recommended": "$19/mo"},
    "gtmChannels": [{"channel": "SEO", "priority": 1}],
    "actionPlan": [{"phase": "Validate", "timeframe": "30 days"}]
}"#;

#[tokio::test]
async fn competitor_cap_limits_attempts() {
    let fetcher = {
        let mut f = MockFetcher::new();
        for i in 0..7 {
            f = f.with_page(&format!("https://c{}.com", i), "<html>pricing</html>");
        }
        f
    };
    let ai = MockAI::new();
    let config = ResearchConfig::default();
    let extractor = Extractor::new(Arc::new(ai.clone()));

    let urls: Vec<String> = (0..7).map(|i| format!("https://c{}.com", i)).collect();
    let batch = scrape_competitors(&fetcher, &extractor, &config, &urls).await;

    assert_eq!(batch.attempted, 5);
    assert_eq!(fetcher.fetched_urls().len(), 5);
    // The unscripted MockAI answers `{}`, which still parses as an
    // (empty) extraction, so all five attempted units succeed.
    assert_eq!(batch.competitors.len(), 5);
}

#[tokio::test]
async fn failed_units_are_dropped_in_stable_order() {
    let fetcher = MockFetcher::new()
        .with_page("https://notion.so", "<html>notion</html>")
        .with_failure("https://linear.app", "HTTP 503: Service Unavailable")
        .with_page("https://asana.com", "<html>asana</html>");
    let ai = MockAI::new()
        .with_response(competitor_json("Notion"))
        .with_response(competitor_json("Asana"));
    let config = ResearchConfig::default();
    let extractor = Extractor::new(Arc::new(ai.clone()));

    let urls = vec![
        "https://notion.so".to_string(),
        "not-a-url".to_string(), // rejected by the normalizer, this unit only
        "https://linear.app".to_string(),
        "https://asana.com".to_string(),
    ];
    let batch = scrape_competitors(&fetcher, &extractor, &config, &urls).await;

    assert_eq!(batch.attempted, 4);
    assert_eq!(batch.competitors.len(), 2);
    // Stamped URLs prove the surviving units kept their submitted order.
    assert_eq!(batch.competitors[0].url, "https://notion.so/");
    assert_eq!(batch.competitors[1].url, "https://asana.com/");
}

#[tokio::test]
async fn research_run_merges_scrapes_and_synthesis() {
    let fetcher = MockFetcher::new()
        .with_page("https://notion.so", "<html>notion</html>")
        .with_page("https://asana.com", "<html>asana</html>");
    let ai = MockAI::new()
        .with_response(competitor_json("Notion"))
        .with_response(competitor_json("Asana"))
        .with_response(SYNTHESIS_JSON);

    let request = ResearchRequest::new("CRM for freelancers", Stage::PreLaunch)
        .with_target_market("Freelance designers")
        .with_competitors(["https://notion.so", "not-a-url", "https://asana.com"]);

    let results = pipeline(&ai, &fetcher).run(&request).await.unwrap();

    assert_eq!(results.stage, Stage::PreLaunch);
    assert_eq!(results.research_depth.competitors_analyzed, 2);
    assert_eq!(results.research_depth.data_points_collected, 20);
    assert_eq!(results.synthesis.icp_profiles.len(), 1);
    assert!(results.synthesis.analysis.is_none());
    assert!(!results.request_id.is_nil());

    // Two extraction calls plus one synthesis call, which carries the
    // analyst system prompt and the scraped competitor data.
    let calls = ai.calls();
    assert_eq!(calls.len(), 3);
    let synthesis_call = &calls[2];
    assert!(synthesis_call.system.is_some());
    assert!(synthesis_call.prompt.contains("PRE-LAUNCH"));
    assert!(synthesis_call.prompt.contains("Competitor Data:"));
}

#[tokio::test]
async fn malformed_synthesis_degrades_instead_of_failing() {
    let fetcher = MockFetcher::new().with_page("https://notion.so", "<html>notion</html>");
    let ai = MockAI::new()
        .with_response(competitor_json("Notion"))
        .with_response("Here are my thoughts on the market, in prose.");

    let request = ResearchRequest::new("CRM for freelancers", Stage::PreLaunch)
        .with_competitors(["https://notion.so"]);

    let results = pipeline(&ai, &fetcher).run(&request).await.unwrap();

    assert_eq!(
        results.synthesis.analysis.as_deref(),
        Some("Here are my thoughts on the market, in prose.")
    );
    // Structured fields are backfilled from the data already scraped.
    assert_eq!(results.synthesis.competitors.len(), 1);
    assert_eq!(results.synthesis.competitors[0]["description"], "Notion");
    assert!(results.synthesis.icp_profiles.is_empty());
    assert_eq!(results.research_depth.competitors_analyzed, 1);
}

#[tokio::test]
async fn synthesis_provider_failure_propagates() {
    let fetcher = MockFetcher::new();
    let ai = MockAI::new().with_error("connection reset");

    let request = ResearchRequest::new("CRM for freelancers", Stage::EarlyStage);
    let err = pipeline(&ai, &fetcher).run(&request).await.unwrap_err();

    assert!(matches!(err, ResearchError::Model(_)));
}

#[tokio::test]
async fn scrape_competitor_reports_fetch_failure_as_typed_error() {
    let fetcher = MockFetcher::new().with_failure("https://notion.so", "HTTP 404: Not Found");
    let ai = MockAI::new();

    let err = pipeline(&ai, &fetcher)
        .scrape_competitor("https://notion.so")
        .await
        .unwrap_err();

    assert!(matches!(err, ResearchError::Fetch(_)));
    assert!(err.to_string().contains("HTTP 404"));
    // No model call is made for a page we never fetched.
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn csv_analysis_caps_prompt_rows_but_reports_total() {
    let mut csv_text = String::from("name,deal_size\n");
    for i in 0..150 {
        csv_text.push_str(&format!("Customer {},{}\n", i, 100 + i));
    }

    let analysis_json = r#"{
        "segments": [{"name": "Mid-market", "count": 90, "avgDealSize": 180.0,
                      "conversionRate": "31%", "ltv": 2400.0, "churnRate": "6%",
                      "traits": ["ops-led"]}],
        "insights": ["Mid-market converts best"],
        "recommendations": ["Focus outbound on ops leads"],
        "winningProfile": "Mid-market ops leads"
    }"#;

    let ai = MockAI::new().with_response(analysis_json);
    let report = pipeline(&ai, &MockFetcher::new())
        .analyze_csv(&csv_text)
        .await
        .unwrap();

    assert_eq!(report.total_records, 150);
    assert_eq!(report.analysis.segments[0].count, 90);
    assert!(report.analysis.segment_to_avoid.is_none());

    let prompt = &ai.calls()[0].prompt;
    assert!(prompt.contains("150 records"));
    assert!(prompt.contains("showing first 100 records"));
    assert!(prompt.contains("Customer 99"));
    assert!(!prompt.contains("Customer 149"));
}

#[tokio::test]
async fn csv_garbage_fails_before_any_model_call() {
    let ai = MockAI::new();
    let err = pipeline(&ai, &MockFetcher::new())
        .analyze_csv("")
        .await
        .unwrap_err();

    assert!(matches!(err, ResearchError::CsvParse { .. }));
    assert_eq!(ai.call_count(), 0);
}
