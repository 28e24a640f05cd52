//! HMAC-SHA256 request signatures.
//!
//! Envelope signatures travel as hex digests, so the helpers here work
//! in terms of hex strings. Verification is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fixed output length of HMAC-SHA256 in bytes.
pub const DIGEST_LEN: usize = 32;

/// Compute HMAC-SHA256 over `data` keyed by `key` and return the
/// lowercase hex digest.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC key size is always valid");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a hex HMAC-SHA256 digest in constant time.
///
/// Returns `false` for digests that are not valid hex or not 32 bytes;
/// otherwise the comparison goes through `Mac::verify_slice`, never a
/// direct equality check.
pub fn verify_hmac_sha256_hex(key: &[u8], data: &[u8], expected_hex: &str) -> bool {
    let Ok(expected) = hex::decode(expected_hex) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC key size is always valid");
    mac.update(data);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_roundtrip() {
        let key = b"shared secret";
        let data = b"keydataivtag1700000000";
        let digest = hmac_sha256_hex(key, data);
        assert_eq!(digest.len(), DIGEST_LEN * 2);
        assert!(verify_hmac_sha256_hex(key, data, &digest));
    }

    #[test]
    fn hmac_is_deterministic() {
        let key = b"shared secret";
        let data = b"determinism test";
        assert_eq!(hmac_sha256_hex(key, data), hmac_sha256_hex(key, data));
    }

    /// RFC 4231 Test Case 2: HMAC-SHA-256.
    #[test]
    fn rfc4231_test_case_2() {
        let digest = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn wrong_key_fails_verify() {
        let digest = hmac_sha256_hex(b"key one", b"data");
        assert!(!verify_hmac_sha256_hex(b"key two", b"data", &digest));
    }

    #[test]
    fn wrong_data_fails_verify() {
        let digest = hmac_sha256_hex(b"key", b"data");
        assert!(!verify_hmac_sha256_hex(b"key", b"other data", &digest));
    }

    #[test]
    fn tampered_digest_fails_verify() {
        let mut digest = hmac_sha256_hex(b"key", b"data");
        let flipped = if digest.ends_with('0') { '1' } else { '0' };
        digest.pop();
        digest.push(flipped);
        assert!(!verify_hmac_sha256_hex(b"key", b"data", &digest));
    }

    #[test]
    fn non_hex_digest_fails_verify() {
        assert!(!verify_hmac_sha256_hex(b"key", b"data", "not hex at all"));
    }

    #[test]
    fn truncated_digest_fails_verify() {
        let digest = hmac_sha256_hex(b"key", b"data");
        assert!(!verify_hmac_sha256_hex(b"key", b"data", &digest[..32]));
    }
}
