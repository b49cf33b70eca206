//! HTTP boundary for the research pipeline.
//!
//! Thin axum layer over [`research::ResearchPipeline`]: request validation,
//! status mapping, and the guarantee that every response body is JSON. All
//! research semantics live in the library.

pub mod routes;

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use anthropic_client::AnthropicClient;
use research::{AnthropicAI, ResearchPipeline};

use crate::routes::{analyze_csv_handler, research_handler, scrape_competitor_handler};

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    /// Anthropic credential. Optional at startup: the server boots without
    /// it and answers a JSON 500 on routes that need the model.
    pub anthropic_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port number: {}", raw))?,
            Err(_) => 3000,
        };

        Ok(Self {
            port,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
        })
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Absent when no credential was configured; handlers surface that as
    /// a per-request configuration error.
    pipeline: Option<Arc<ResearchPipeline>>,
}

impl AppState {
    /// Build state from config, constructing the real pipeline when a
    /// credential is present.
    pub fn from_config(config: &Config) -> Self {
        let pipeline = config.anthropic_api_key.as_ref().map(|key| {
            let client = AnthropicClient::new(key.clone());
            let default = research::ResearchConfig::default();
            let ai = Arc::new(AnthropicAI::new(client, default.model.clone()));
            Arc::new(ResearchPipeline::new(ai))
        });

        if pipeline.is_none() {
            tracing::warn!(
                "ANTHROPIC_API_KEY is not set; model-backed routes will return 500"
            );
        }

        Self { pipeline }
    }

    /// Build state over an existing pipeline (tests inject mocks here).
    pub fn with_pipeline(pipeline: ResearchPipeline) -> Self {
        Self {
            pipeline: Some(Arc::new(pipeline)),
        }
    }

    /// State with no pipeline configured.
    pub fn unconfigured() -> Self {
        Self { pipeline: None }
    }

    pub(crate) fn pipeline(&self) -> Option<&Arc<ResearchPipeline>> {
        self.pipeline.as_ref()
    }
}

/// Build the axum application router.
pub fn build_app(state: AppState) -> Router {
    // Permissive CORS: the API serves browser frontends on other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/scrape-competitor", post(scrape_competitor_handler))
        .route("/research", post(research_handler))
        .route("/analyze-csv", post(analyze_csv_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
