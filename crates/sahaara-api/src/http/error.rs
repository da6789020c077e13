//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sahaara_core::prompt::persona::NOT_CONFIGURED_MESSAGE;
use sahaara_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Validation error.
    Validation(String),
    /// No safety plan exists for the requested session.
    PlanNotFound,
    /// Model invocation failure.
    Llm(LlmError),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::PlanNotFound => (
                StatusCode::NOT_FOUND,
                "PLAN_NOT_FOUND",
                "No safety plan has been generated for this session".to_string(),
            ),
            AppError::Llm(LlmError::NotConfigured) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MODEL_NOT_CONFIGURED",
                NOT_CONFIGURED_MESSAGE.to_string(),
            ),
            AppError::Llm(e) => (
                StatusCode::BAD_GATEWAY,
                "MODEL_UNAVAILABLE",
                format!("The AI model is currently unavailable: {e}"),
            ),
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
