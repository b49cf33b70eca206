//! `POST /scrape-competitor` - scrape one competitor site and extract
//! structured data.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use research::{normalize_url, ResearchError};

use crate::routes::{invalid_body, missing_credential};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    url: Option<String>,
}

/// Scrape a competitor URL.
///
/// Bad input is a 400 and a missing credential a 500; once a valid URL
/// reaches the pipeline the route always answers 200, reporting per-site
/// fetch or extraction failures in the body rather than as transport
/// errors. Callers batch over this endpoint and must be able to tell "your
/// request is broken" from "that site didn't cooperate".
pub async fn scrape_competitor_handler(
    State(state): State<AppState>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Some(pipeline) = state.pipeline() else {
        return missing_credential();
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    let Some(raw_url) = request.url.filter(|u| !u.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "URL is required",
                "message": "Please provide a URL to scrape",
            })),
        );
    };

    let url = match normalize_url(&raw_url) {
        Ok(url) => url,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "Invalid URL format",
                    "message": "Please provide a valid URL (e.g., https://example.com)",
                })),
            );
        }
    };

    match pipeline.scrape_competitor(&raw_url).await {
        Ok(extraction) => (
            StatusCode::OK,
            Json(json!({
                "url": url.as_str(),
                "success": true,
                "data": extraction,
            })),
        ),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "competitor scrape failed");

            let error = match &e {
                ResearchError::Fetch(fetch) => format!("Failed to fetch website: {}", fetch),
                other => format!("Failed to extract data: {}", other),
            };

            (
                StatusCode::OK,
                Json(json!({
                    "url": url.as_str(),
                    "success": false,
                    "error": error,
                })),
            )
        }
    }
}
