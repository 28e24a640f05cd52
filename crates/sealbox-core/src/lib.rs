//! Sealbox secure-envelope protocol
//!
//! Implements the server side of the envelope exchange: a client wraps
//! a fresh symmetric session key under the server's RSA public key,
//! AEAD-encrypts its JSON payload under that key, signs the envelope
//! fields with a shared HMAC secret, and stamps it with its clock. The
//! pipeline here checks freshness, verifies the signature, unwraps the
//! session key, decrypts the payload, invokes a business collaborator
//! and encrypts the plain response under the same session key.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod keystore;
pub mod pipeline;
pub mod replay;
pub mod signature;

// Re-export commonly used types for convenience
pub use codec::{EnvelopeCodec, SessionKey};
pub use envelope::{EncryptedEnvelope, SealedResponse};
pub use error::{EnvelopeError, KeyStoreError};
pub use keystore::KeyStore;
pub use pipeline::{SecurePipeline, SecureService, ServiceResponse};
pub use replay::ReplayGuard;
pub use signature::SignatureVerifier;
