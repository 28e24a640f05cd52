use axum::{routing::post, Router};
use utoipa::OpenApi;

use crate::{
    handlers::secure::{secure_token, secure_verify},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::secure::secure_verify,
        crate::handlers::secure::secure_token,
    ),
    tags(
        (name = "Secure", description = "Encrypted envelope APIs")
    ),
)]
pub struct SecureApi;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/verify", post(secure_verify))
        .route("/token", post(secure_token))
}
