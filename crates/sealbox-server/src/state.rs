use std::sync::Arc;

use sealbox_core::{KeyStore, ReplayGuard, SecurePipeline};

use crate::service::{TokenService, VerifyService};

/// Shared application state.
///
/// Everything here is immutable after startup (the keystore and signing
/// secret are fixed for the process lifetime), so concurrent handlers
/// read it without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub keystore: Arc<KeyStore>,
    pub pipeline: Arc<SecurePipeline>,
    pub verify_service: Arc<VerifyService>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(keystore: KeyStore, signature_key: &str, replay: ReplayGuard) -> Self {
        let keystore = Arc::new(keystore);
        let pipeline = Arc::new(SecurePipeline::new(
            keystore.clone(),
            signature_key.as_bytes().to_vec(),
            replay,
        ));
        Self {
            keystore,
            pipeline,
            verify_service: Arc::new(VerifyService),
            token_service: Arc::new(TokenService),
        }
    }
}
