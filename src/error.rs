use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::game::DiceError;
use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Dice error: {0}")]
    Dice(#[from] DiceError),

    #[error("Text generation failed: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MissingField(field) => {
                tracing::warn!(field, "Rejected request with missing field");
                (StatusCode::BAD_REQUEST, format!("Missing required field: {}", field))
            }
            AppError::Dice(e) => {
                // Only reachable through a bug in the generator.
                tracing::error!("Dice error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred".to_string())
            }
            AppError::Llm(LlmError::RateLimited { retry_after_secs }) => {
                tracing::warn!(retry_after_secs, "Text generation rate limited");
                let body = Json(json!({ "error": "The story engine is busy, please try again shortly" }));
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after_secs.to_string())],
                    body,
                )
                    .into_response();
            }
            AppError::Llm(LlmError::Timeout) => {
                tracing::error!("Text generation timed out");
                (StatusCode::GATEWAY_TIMEOUT, "The story engine took too long to respond".to_string())
            }
            AppError::Llm(e) => {
                tracing::error!("Text generation error: {}", e);
                (StatusCode::BAD_GATEWAY, "The story engine is unavailable".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
