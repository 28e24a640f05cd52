//! Fixed-order request pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{
    codec::{EnvelopeCodec, SessionKey},
    envelope::{EncryptedEnvelope, SealedResponse},
    error::EnvelopeError,
    keystore::KeyStore,
    replay::{unix_now, ReplayGuard},
    signature::SignatureVerifier,
};

/// Business-logic collaborator invoked with the decrypted payload.
///
/// Implementations receive the payload mapping plus the caller-identity
/// context extracted from it (the `authorization` field, if present)
/// and return a plain response that the pipeline serializes and
/// encrypts unchanged. Account registries, token stores and similar
/// state live behind this trait, outside the envelope core.
pub trait SecureService: Send + Sync {
    fn handle(&self, payload: Map<String, Value>, authorization: Option<String>)
        -> ServiceResponse;
}

/// Plain result object produced by a [`SecureService`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    /// Numeric business status (100 success, 2xx client-side rejections,
    /// 500 generic failure)
    pub status: u16,
    /// Human-readable status message
    pub message: String,
    /// Issued or echoed access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Additional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Map<String, Value>>,
}

impl ServiceResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            token: None,
            data: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Generic failure sealed into the response when a stage past key
    /// recovery fails. Carries no diagnostic detail by design of the
    /// surfacing policy; the cause lives in the internal log only.
    pub fn internal_error() -> Self {
        Self::new(500, "internal server error")
    }
}

/// Orchestrates one request/response cycle in a fixed order: freshness,
/// signature, key unwrap, payload decrypt, collaborator, response
/// encrypt.
///
/// The order is load-bearing. The timestamp check is the cheapest and
/// runs first; the signature check runs before any RSA private-key
/// operation so forged envelopes cost no asymmetric work; decryption
/// precedes the collaborator so business logic only ever sees
/// authenticated plaintext.
pub struct SecurePipeline {
    codec: EnvelopeCodec,
    verifier: SignatureVerifier,
    replay: ReplayGuard,
}

impl SecurePipeline {
    pub fn new(
        keystore: Arc<KeyStore>,
        signature_key: impl Into<Vec<u8>>,
        replay: ReplayGuard,
    ) -> Self {
        Self {
            codec: EnvelopeCodec::new(keystore),
            verifier: SignatureVerifier::new(signature_key),
            replay,
        }
    }

    /// Run one full cycle against `service`.
    ///
    /// Failures before the session key is recovered surface as `Err`
    /// for the transport to report in plaintext (no key exists to seal
    /// anything with). Failures at or after payload decryption are
    /// sealed under the session key as a generic internal error, so the
    /// wire does not reveal whether protocol or business logic failed.
    pub fn process(
        &self,
        envelope: &EncryptedEnvelope,
        service: &dyn SecureService,
    ) -> Result<SealedResponse, EnvelopeError> {
        self.replay
            .check_freshness(envelope.ts, unix_now())
            .inspect_err(|_| {
                tracing::warn!(ts = envelope.ts, "rejected envelope outside replay window");
            })?;

        self.verifier.verify(envelope).inspect_err(|_| {
            tracing::warn!("rejected envelope with invalid signature");
        })?;

        let session_key = self.codec.unwrap_session_key(&envelope.wrapped_key()?)?;

        match self.run_decrypted(envelope, &session_key, service) {
            Ok(sealed) => Ok(sealed),
            Err(err) => {
                // The session key exists, so the failure itself is
                // sealed; only the log carries the cause.
                tracing::error!(error = %err, "sealing generic failure response");
                let fallback = serde_json::to_value(ServiceResponse::internal_error())
                    .map_err(|_| EnvelopeError::Serialization)?;
                self.codec.encrypt_response(fallback, &session_key)
            }
        }
    }

    fn run_decrypted(
        &self,
        envelope: &EncryptedEnvelope,
        session_key: &SessionKey,
        service: &dyn SecureService,
    ) -> Result<SealedResponse, EnvelopeError> {
        let (ciphertext, iv, tag) = envelope.cipher_parts()?;
        let payload = self
            .codec
            .decrypt_payload(&ciphertext, &iv, &tag, session_key)?;

        let authorization = payload
            .get("authorization")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let response = service.handle(payload, authorization);
        let value = serde_json::to_value(response).map_err(|_| EnvelopeError::Serialization)?;
        self.codec.encrypt_response(value, session_key)
    }
}
