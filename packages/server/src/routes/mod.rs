//! Route handlers.
//!
//! Contract: every response on every path is JSON with an explicit status.
//! Request bodies are extracted with `Result<Json<T>, JsonRejection>` so a
//! malformed body becomes a JSON 400 instead of axum's plain-text reject.

mod analyze_csv;
mod research;
mod scrape;

pub use analyze_csv::analyze_csv_handler;
pub use research::research_handler;
pub use scrape::scrape_competitor_handler;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// 500 answered when no Anthropic credential was configured.
pub(crate) fn missing_credential() -> (StatusCode, Json<Value>) {
    tracing::error!("ANTHROPIC_API_KEY is not set");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "API configuration error",
            "message": "ANTHROPIC_API_KEY environment variable is not set",
        })),
    )
}

/// 400 answered when the request body was not valid JSON.
pub(crate) fn invalid_body(rejection: JsonRejection) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Invalid request body",
            "message": rejection.body_text(),
        })),
    )
}
