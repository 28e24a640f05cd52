//! Plaintext debug endpoints.
//!
//! These bypass the envelope entirely and are mounted only when
//! `http.debug_mode` is enabled in the settings.

use axum::response::Json;
use sealbox_core::ServiceResponse;
use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    error::AppError,
    models::{TokenRequest, VerifyRequest},
    service,
};

/// Plaintext device verification (debug only)
#[utoipa::path(
    post,
    path = "/verify",
    responses(
        (status = 200, description = "Plain verification response", body = ServiceResponse),
        (status = 400, description = "Malformed request"),
    ),
    tag = "Debug"
)]
pub async fn debug_verify(
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<ServiceResponse>, AppError> {
    let authorization = payload
        .get("authorization")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let request: VerifyRequest = serde_json::from_value(Value::Object(payload))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    request.validate()?;

    Ok(Json(service::verify(&request, authorization.as_deref())))
}

/// Plaintext token issuance (debug only)
#[utoipa::path(
    post,
    path = "/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Plain token response", body = ServiceResponse),
        (status = 400, description = "Malformed request"),
    ),
    tag = "Debug"
)]
pub async fn debug_token(
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<ServiceResponse>, AppError> {
    let request: TokenRequest = serde_json::from_value(Value::Object(payload))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    request.validate()?;

    Ok(Json(service::issue_token(&request)))
}
