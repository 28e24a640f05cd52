//! Wire types for the envelope exchange.

use base64::{engine::general_purpose, Engine as _};
use sealbox_crypto::symmetric::aes::{NONCE_LEN, TAG_LEN};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::EnvelopeError;

/// Encrypted request envelope as received from a client.
///
/// All fields are required and non-empty. `key`, `data`, `iv` and `tag`
/// are base64; `sig` is the hex HMAC-SHA256 over the canonical field
/// concatenation; `ts` is the sender clock in epoch seconds.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EncryptedEnvelope {
    /// RSA-OAEP-wrapped session key (base64)
    pub key: String,
    /// AES-GCM ciphertext (base64)
    pub data: String,
    /// 12-byte AEAD nonce (base64)
    pub iv: String,
    /// 16-byte AEAD authentication tag (base64)
    pub tag: String,
    /// Sender timestamp, epoch seconds
    pub ts: i64,
    /// Hex HMAC-SHA256 request signature
    pub sig: String,
}

/// Encrypted response envelope.
///
/// Carries no key and no signature: the client already holds the
/// session key it generated for the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SealedResponse {
    /// 12-byte AEAD nonce (base64)
    pub iv: String,
    /// AES-GCM ciphertext (base64)
    pub data: String,
    /// 16-byte AEAD authentication tag (base64)
    pub tag: String,
}

impl EncryptedEnvelope {
    /// Decode the wrapped session key field.
    pub(crate) fn wrapped_key(&self) -> Result<Vec<u8>, EnvelopeError> {
        general_purpose::STANDARD
            .decode(&self.key)
            .map_err(|_| EnvelopeError::KeyUnwrap)
    }

    /// Decode ciphertext, nonce and tag, enforcing the wire lengths
    /// (12-byte nonce, 16-byte tag).
    pub(crate) fn cipher_parts(
        &self,
    ) -> Result<(Vec<u8>, [u8; NONCE_LEN], [u8; TAG_LEN]), EnvelopeError> {
        let ciphertext = general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|_| EnvelopeError::PayloadDecryption)?;
        let iv: [u8; NONCE_LEN] = general_purpose::STANDARD
            .decode(&self.iv)
            .map_err(|_| EnvelopeError::PayloadDecryption)?
            .try_into()
            .map_err(|_| EnvelopeError::PayloadDecryption)?;
        let tag: [u8; TAG_LEN] = general_purpose::STANDARD
            .decode(&self.tag)
            .map_err(|_| EnvelopeError::PayloadDecryption)?
            .try_into()
            .map_err(|_| EnvelopeError::PayloadDecryption)?;
        Ok((ciphertext, iv, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with(iv: &[u8], tag: &[u8]) -> EncryptedEnvelope {
        EncryptedEnvelope {
            key: general_purpose::STANDARD.encode([1u8; 256]),
            data: general_purpose::STANDARD.encode(b"ciphertext"),
            iv: general_purpose::STANDARD.encode(iv),
            tag: general_purpose::STANDARD.encode(tag),
            ts: 1_700_000_000,
            sig: "00".repeat(32),
        }
    }

    #[test]
    fn cipher_parts_accepts_wire_lengths() {
        let envelope = envelope_with(&[0u8; 12], &[0u8; 16]);
        let (ciphertext, iv, tag) = envelope.cipher_parts().unwrap();
        assert_eq!(ciphertext, b"ciphertext");
        assert_eq!(iv.len(), 12);
        assert_eq!(tag.len(), 16);
    }

    #[test]
    fn cipher_parts_rejects_wrong_iv_length() {
        let envelope = envelope_with(&[0u8; 16], &[0u8; 16]);
        assert!(matches!(
            envelope.cipher_parts(),
            Err(EnvelopeError::PayloadDecryption)
        ));
    }

    #[test]
    fn cipher_parts_rejects_wrong_tag_length() {
        let envelope = envelope_with(&[0u8; 12], &[0u8; 12]);
        assert!(matches!(
            envelope.cipher_parts(),
            Err(EnvelopeError::PayloadDecryption)
        ));
    }

    #[test]
    fn cipher_parts_rejects_invalid_base64() {
        let mut envelope = envelope_with(&[0u8; 12], &[0u8; 16]);
        envelope.data = "!!! not base64 !!!".to_string();
        assert!(envelope.cipher_parts().is_err());
    }

    #[test]
    fn wrapped_key_rejects_invalid_base64() {
        let mut envelope = envelope_with(&[0u8; 12], &[0u8; 16]);
        envelope.key = "!!! not base64 !!!".to_string();
        assert!(matches!(
            envelope.wrapped_key(),
            Err(EnvelopeError::KeyUnwrap)
        ));
    }
}
