//! Hybrid envelope encryption and decryption.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use sealbox_crypto::symmetric::aes::{Aes, KEY_LEN, NONCE_LEN, TAG_LEN};
use serde_json::{Map, Value};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    envelope::SealedResponse,
    error::EnvelopeError,
    keystore::KeyStore,
    replay::unix_now,
};

/// Ephemeral per-request symmetric key.
///
/// Recovered by unwrapping the envelope's `key` field and used for both
/// the inbound decrypt and the outbound encrypt. One bidirectional key
/// per request is a deliberate protocol choice kept for wire
/// compatibility; it trades the usual per-direction key separation for
/// a smaller envelope. The key lives on the request's own stack, is
/// never logged or persisted, and is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; KEY_LEN]);

impl SessionKey {
    /// Required session key length in bytes (AES-256-GCM).
    pub const LEN: usize = KEY_LEN;

    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// Performs the hybrid decrypt/encrypt pair for one request cycle.
pub struct EnvelopeCodec {
    keystore: Arc<KeyStore>,
}

impl EnvelopeCodec {
    pub fn new(keystore: Arc<KeyStore>) -> Self {
        Self { keystore }
    }

    /// RSA-OAEP-unwrap the per-request session key.
    ///
    /// Session keys must be exactly 32 bytes; other lengths are
    /// rejected here instead of being handed to the cipher.
    pub fn unwrap_session_key(&self, wrapped: &[u8]) -> Result<SessionKey, EnvelopeError> {
        let mut key_bytes = self.keystore.oaep_decrypt(wrapped).map_err(|e| {
            tracing::debug!(error = %e, "session key unwrap rejected");
            EnvelopeError::KeyUnwrap
        })?;

        if key_bytes.len() != SessionKey::LEN {
            tracing::debug!(len = key_bytes.len(), "unwrapped session key has wrong length");
            key_bytes.zeroize();
            return Err(EnvelopeError::KeyUnwrap);
        }

        let mut key = [0u8; SessionKey::LEN];
        key.copy_from_slice(&key_bytes);
        key_bytes.zeroize();
        Ok(SessionKey::from_bytes(key))
    }

    /// AEAD-decrypt the payload. The plaintext must parse as a JSON
    /// object.
    pub fn decrypt_payload(
        &self,
        ciphertext: &[u8],
        iv: &[u8; NONCE_LEN],
        tag: &[u8; TAG_LEN],
        session_key: &SessionKey,
    ) -> Result<Map<String, Value>, EnvelopeError> {
        let plaintext = Aes::new(session_key.as_bytes())
            .decrypt_detached(iv, ciphertext, tag)
            .map_err(|_| EnvelopeError::PayloadDecryption)?;

        match serde_json::from_slice::<Value>(&plaintext) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(EnvelopeError::MalformedPayload),
        }
    }

    /// Encrypt a response payload under the request's session key.
    ///
    /// A fresh random nonce is generated per response so the request
    /// nonce is never reused under the same key, and a server timestamp
    /// is injected into the payload as a freshness marker for the
    /// client (the server itself never validates it).
    pub fn encrypt_response(
        &self,
        payload: Value,
        session_key: &SessionKey,
    ) -> Result<SealedResponse, EnvelopeError> {
        let mut map = match payload {
            Value::Object(map) => map,
            _ => return Err(EnvelopeError::Serialization),
        };
        map.insert("ts".to_string(), Value::from(unix_now()));

        let plaintext = serde_json::to_vec(&map).map_err(|_| EnvelopeError::Serialization)?;
        let iv = Aes::generate_nonce();
        let (ciphertext, tag) = Aes::new(session_key.as_bytes())
            .encrypt_detached(&iv, &plaintext)
            .map_err(|_| EnvelopeError::Serialization)?;

        Ok(SealedResponse {
            iv: general_purpose::STANDARD.encode(iv),
            data: general_purpose::STANDARD.encode(ciphertext),
            tag: general_purpose::STANDARD.encode(tag),
        })
    }
}
