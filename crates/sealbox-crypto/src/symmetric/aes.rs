//! AES-GCM authenticated encryption
//!
//! AEAD encryption with 256-bit keys and the nonce and authentication
//! tag kept detached from the ciphertext, matching the envelope wire
//! format where `iv`, `data` and `tag` travel as separate fields.

use aes_gcm::{
    aead::{AeadCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};

use crate::error::{Error, Result};

/// AES-GCM nonce length in bytes
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// AES-256-GCM cipher wrapper
pub struct Aes {
    cipher: Aes256Gcm,
}

impl Aes {
    /// Create a new AES-256-GCM cipher from a 32-byte key
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Generate a random 12-byte nonce from OS entropy.
    ///
    /// A nonce must never be reused under the same key.
    pub fn generate_nonce() -> [u8; NONCE_LEN] {
        Aes256Gcm::generate_nonce(&mut OsRng).into()
    }

    /// Encrypt with a detached tag, no additional authenticated data.
    ///
    /// Returns the ciphertext and the 16-byte authentication tag as
    /// separate values.
    pub fn encrypt_detached(
        &self,
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, [u8; TAG_LEN])> {
        let mut buffer = plaintext.to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
            .map_err(|_| Error::AeadEncrypt)?;
        Ok((buffer, tag.into()))
    }

    /// Decrypt ciphertext carrying a detached tag.
    ///
    /// Fails on any tag mismatch: tampered ciphertext, wrong nonce or
    /// wrong key.
    pub fn decrypt_detached(
        &self,
        nonce: &[u8; NONCE_LEN],
        ciphertext: &[u8],
        tag: &[u8; TAG_LEN],
    ) -> Result<Vec<u8>> {
        let mut buffer = ciphertext.to_vec();
        self.cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(nonce),
                b"",
                &mut buffer,
                Tag::from_slice(tag),
            )
            .map_err(|_| Error::AeadDecrypt)?;
        Ok(buffer)
    }
}
