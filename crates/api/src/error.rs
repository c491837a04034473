//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally_shared::AppError;
use tracing::error;

/// Renders an application error as `{"error": ..., "message": ...}`.
///
/// Server-side failures are logged and answered with a generic message.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = if err.is_client_error() {
        match err {
            AppError::Validation(msg) | AppError::BusinessRule(msg) | AppError::Database(msg) => {
                msg.clone()
            }
        }
    } else {
        error!(error = %err, "Report request failed");
        "An error occurred".to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code().to_lowercase(),
            "message": message
        })),
    )
        .into_response()
}
