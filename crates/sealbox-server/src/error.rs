use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sealbox_core::EnvelopeError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Envelope failures reaching the transport happened before a
            // session key existed; their display strings are already
            // generic, so they can go on the wire as-is.
            AppError::Envelope(err) => (envelope_status(err), err.to_string()),
            AppError::BadRequest(e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Config(_) | AppError::Internal(_) => {
                // Cause detail stays in the log; the wire gets a generic line.
                tracing::error!(error = %self, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

fn envelope_status(err: &EnvelopeError) -> StatusCode {
    match err {
        EnvelopeError::ExpiredRequest | EnvelopeError::InvalidSignature => {
            StatusCode::UNAUTHORIZED
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

pub type Result<T, E = AppError> = core::result::Result<T, E>;
