use thiserror::Error;

/// Error type for the crypto primitives
#[derive(Error, Debug)]
pub enum Error {
    #[error("PKCS8 error: {0}")]
    Pkcs8(#[from] pkcs8::Error),

    #[error("SPKI error: {0}")]
    Spki(#[from] pkcs8::spki::Error),

    #[error("RSA key generation failed: {0}")]
    KeyGeneration(String),

    #[error("RSA-OAEP encryption failed: {0}")]
    OaepEncrypt(String),

    #[error("RSA-OAEP decryption failed: {0}")]
    OaepDecrypt(String),

    #[error("AES-GCM encryption failed")]
    AeadEncrypt,

    #[error("AES-GCM decryption failed")]
    AeadDecrypt,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
