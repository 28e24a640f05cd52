use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the secure-envelope pipeline.
///
/// Each variant is detected at exactly one pipeline stage, short-circuits
/// the request and is never retried internally. Display strings are
/// deliberately generic: they are what the transport layer may echo to a
/// client, while cause detail goes to the internal log only.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Timestamp drifted outside the replay window.
    #[error("request expired")]
    ExpiredRequest,

    /// HMAC mismatch over the canonicalized envelope fields.
    #[error("request signature invalid")]
    InvalidSignature,

    /// RSA-OAEP unwrap failed: malformed, wrong-size or foreign wrapped key.
    #[error("session key unwrap failed")]
    KeyUnwrap,

    /// AEAD tag mismatch while decrypting the payload.
    #[error("payload decryption failed")]
    PayloadDecryption,

    /// AEAD decrypt succeeded but the plaintext is not a JSON object.
    #[error("payload is not a structured object")]
    MalformedPayload,

    /// Response payload could not be serialized or sealed.
    #[error("response serialization failed")]
    Serialization,
}

impl EnvelopeError {
    /// Whether the failure can occur only after the session key was
    /// recovered. Such failures are sealed under the session key rather
    /// than reported in plaintext.
    pub fn session_key_available(&self) -> bool {
        matches!(
            self,
            Self::PayloadDecryption | Self::MalformedPayload | Self::Serialization
        )
    }
}

/// Failures while loading or creating the server keypair. All of these
/// are fatal at startup.
#[derive(Error, Debug)]
pub enum KeyStoreError {
    #[error("key file I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("key file at {path} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        source: sealbox_crypto::Error,
    },

    #[error("crypto error: {0}")]
    Crypto(#[from] sealbox_crypto::Error),
}
