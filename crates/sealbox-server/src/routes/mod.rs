mod debug;
mod public;
mod secure;

use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::{debug::DebugApi, public::PublicApi, secure::SecureApi};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sealbox Verification API",
        version = "1.0.0",
        description = "Secure-envelope verification server: hybrid RSA+AES-GCM \
                       encrypted request/response exchange over plain HTTP"
    ),
    nest(
        (path = "/api/secure", api = SecureApi),
        (path = "/api/debug", api = DebugApi),
    ),
)]
struct ApiDoc;

pub fn create_routes(state: AppState, debug_mode: bool) -> Router {
    let mut doc = ApiDoc::openapi();
    doc.merge(PublicApi::openapi());

    let mut router = Router::new()
        .merge(public::create_router())
        .nest("/api/secure", secure::create_router());

    // The debug surface exposes plaintext request handling; it only
    // exists when explicitly enabled.
    if debug_mode {
        tracing::warn!("debug mode enabled: plaintext endpoints are mounted");
        router = router.nest("/api/debug", debug::create_router());
    }

    router
        .layer(CorsLayer::permissive())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc))
        .with_state(state)
}
