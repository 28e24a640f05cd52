//! Asymmetric cryptography
//!
//! RSA is the only asymmetric algorithm the envelope protocol uses: it
//! transports the per-request symmetric key, nothing else.

pub mod rsa;
