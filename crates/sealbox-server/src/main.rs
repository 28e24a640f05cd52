mod error;
mod handlers;
mod logging;
mod models;
mod routes;
mod service;
mod settings;
mod state;

use sealbox_core::{KeyStore, ReplayGuard};
use settings::Settings;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    let settings = match Settings::load("config/services.toml") {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("sealbox-server: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = logging::init_tracing(&settings.logging.dir);

    // Key material must be ready before the listener binds.
    let keystore = match KeyStore::load_or_generate(
        &settings.keys.private_key_path,
        &settings.keys.public_key_path,
    ) {
        Ok(keystore) => keystore,
        Err(e) => {
            tracing::error!(error = %e, "key store initialization failed");
            std::process::exit(1);
        }
    };

    let replay = ReplayGuard::new(settings.security.replay_window_secs);
    let state = AppState::new(keystore, settings.signature_key(), replay);
    let router = routes::create_routes(state, settings.http.debug_mode);

    let addr = format!("0.0.0.0:{}", settings.http.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr, "cannot bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!("sealbox server listening on {addr}");
    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!(error = %e, "server terminated");
    }
}
