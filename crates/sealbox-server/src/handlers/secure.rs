//! Encrypted envelope endpoints.

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sealbox_core::{EncryptedEnvelope, SealedResponse, SecureService};

use crate::{error::AppError, state::AppState};

/// Device verification over the secure envelope
#[utoipa::path(
    post,
    path = "/verify",
    request_body = EncryptedEnvelope,
    responses(
        (status = 200, description = "Encrypted verification response", body = SealedResponse),
        (status = 400, description = "Envelope could not be decrypted"),
        (status = 401, description = "Stale or improperly signed envelope"),
    ),
    tag = "Secure"
)]
pub async fn secure_verify(
    State(state): State<AppState>,
    Json(envelope): Json<EncryptedEnvelope>,
) -> Result<Json<SealedResponse>, AppError> {
    let service: Arc<dyn SecureService> = state.verify_service.clone();
    process_envelope(state, envelope, service).await
}

/// Token issuance over the secure envelope
#[utoipa::path(
    post,
    path = "/token",
    request_body = EncryptedEnvelope,
    responses(
        (status = 200, description = "Encrypted token response", body = SealedResponse),
        (status = 400, description = "Envelope could not be decrypted"),
        (status = 401, description = "Stale or improperly signed envelope"),
    ),
    tag = "Secure"
)]
pub async fn secure_token(
    State(state): State<AppState>,
    Json(envelope): Json<EncryptedEnvelope>,
) -> Result<Json<SealedResponse>, AppError> {
    let service: Arc<dyn SecureService> = state.token_service.clone();
    process_envelope(state, envelope, service).await
}

/// RSA private-key work is CPU-bound, so the whole cycle runs on the
/// bounded blocking pool instead of stalling the async request path.
async fn process_envelope(
    state: AppState,
    envelope: EncryptedEnvelope,
    service: Arc<dyn SecureService>,
) -> Result<Json<SealedResponse>, AppError> {
    let pipeline = state.pipeline.clone();
    let sealed =
        tokio::task::spawn_blocking(move || pipeline.process(&envelope, service.as_ref()))
            .await
            .map_err(|e| AppError::Internal(format!("envelope worker failed: {e}")))??;
    Ok(Json(sealed))
}
