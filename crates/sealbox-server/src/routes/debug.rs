use axum::{routing::post, Router};
use utoipa::OpenApi;

use crate::{
    handlers::debug::{debug_token, debug_verify},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::debug::debug_verify,
        crate::handlers::debug::debug_token,
    ),
    tags(
        (name = "Debug", description = "Plaintext debug APIs")
    ),
)]
pub struct DebugApi;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/verify", post(debug_verify))
        .route("/token", post(debug_token))
}
