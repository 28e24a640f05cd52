//! Public bootstrap and health endpoints. No cryptographic state.

use axum::{extract::State, response::Json};
use serde_json::json;

use crate::state::AppState;

/// Serve the server public key for client initialization
#[utoipa::path(
    post,
    path = "/api/public_key",
    responses(
        (status = 200, description = "Current public key PEM and server time"),
    ),
    tag = "Public"
)]
pub async fn public_key(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": 100,
        "message": "public key issued",
        "public_key": state.keystore.public_key_pem(),
        "timestamp": sealbox_core::replay::unix_now(),
    }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "Health"
)]
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
    }))
}
