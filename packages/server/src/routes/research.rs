//! `POST /research` - run one complete research pass.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use research::{ResearchRequest, Stage};

use crate::routes::{invalid_body, missing_credential};
use crate::AppState;

/// Wire shape of the research request. Mandatory fields are `Option` here
/// so their absence is a clean 400 instead of a deserialization reject.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchBody {
    #[serde(default)]
    product: Option<String>,

    #[serde(default)]
    stage: Option<String>,

    #[serde(default)]
    target_market: Option<String>,

    #[serde(default)]
    competitors: Vec<String>,

    #[serde(default)]
    additional_context: Option<Value>,

    #[serde(default)]
    csv_analysis: Option<Value>,
}

pub async fn research_handler(
    State(state): State<AppState>,
    body: Result<Json<ResearchBody>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Some(pipeline) = state.pipeline() else {
        return missing_credential();
    };

    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    let (product, raw_stage) = match (
        body.product.filter(|p| !p.trim().is_empty()),
        body.stage.filter(|s| !s.trim().is_empty()),
    ) {
        (Some(product), Some(stage)) => (product, stage),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Product and stage are required" })),
            );
        }
    };

    // Unknown stages are rejected outright; silently defaulting would run
    // the wrong research strategy.
    let stage: Stage = match raw_stage.parse() {
        Ok(stage) => stage,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    let mut request = ResearchRequest::new(product, stage).with_competitors(body.competitors);
    request.target_market = body.target_market;
    request.additional_context = body.additional_context;
    request.csv_analysis = body.csv_analysis;

    match pipeline.run(&request).await {
        Ok(results) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "results": results,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "research run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Research failed",
                    "message": e.to_string(),
                })),
            )
        }
    }
}
