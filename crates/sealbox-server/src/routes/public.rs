use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;

use crate::{
    handlers::public::{ping, public_key},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::public::public_key,
        crate::handlers::public::ping,
    ),
    tags(
        (name = "Public", description = "Key bootstrap APIs"),
        (name = "Health", description = "Health APIs")
    ),
)]
pub struct PublicApi;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/public_key", post(public_key))
        .route("/ping", get(ping))
}
