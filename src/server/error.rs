//! API error responses

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::engine::PipelineError;

/// Errors returned to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or empty
    #[error("{0}")]
    InvalidInput(String),

    /// Something failed inside the pipeline
    #[error("recipe generation failed")]
    Internal(#[source] anyhow::Error),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::EmptyIngredients => Self::InvalidInput(err.to_string()),
            PipelineError::Generation(e) => Self::Internal(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    r#type: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match &self {
            ApiError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), "invalid_request_error")
            }
            ApiError::Internal(e) => {
                // Internal detail goes to the log, not the client
                error!(error = ?e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "recipe generation failed".to_string(),
                    "server_error",
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorDetail {
                    message,
                    r#type: kind.to_string(),
                },
            }),
        )
            .into_response()
    }
}
