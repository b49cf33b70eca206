//! `POST /analyze-csv` - segment uploaded customer data.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use research::ResearchError;

use crate::routes::{invalid_body, missing_credential};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCsvRequest {
    #[serde(default)]
    csv_data: Option<String>,
}

/// Analyze uploaded CSV data into customer segments.
///
/// Unparsable CSV is the caller's problem (400); a model failure after a
/// successful parse is ours (500).
pub async fn analyze_csv_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeCsvRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Some(pipeline) = state.pipeline() else {
        return missing_credential();
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    let Some(csv_data) = request.csv_data.filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "CSV data is required as a string" })),
        );
    };

    match pipeline.analyze_csv(&csv_data).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "totalRecords": report.total_records,
                "analysis": report.analysis,
            })),
        ),
        Err(ResearchError::CsvParse { reason }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Failed to parse CSV: {}", reason) })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "CSV analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Analysis failed",
                    "message": e.to_string(),
                })),
            )
        }
    }
}
