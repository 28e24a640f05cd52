//! Sealbox Cryptography Library
//!
//! Cryptographic primitives for the sealbox secure-envelope protocol:
//! RSA keypair handling with PKCS#8/SPKI serialization, RSA-OAEP key
//! wrapping, AES-256-GCM payload encryption with detached nonce and
//! tag, and HMAC-SHA256 request signatures.

pub mod error;

// Cryptographic algorithm modules
pub mod asymmetric;
pub mod mac;
pub mod symmetric;

// Re-export commonly used types for convenience
pub use ::rsa::RsaPublicKey;
pub use asymmetric::rsa::Rsa;
pub use error::{Error, Result};
pub use symmetric::aes::Aes;
