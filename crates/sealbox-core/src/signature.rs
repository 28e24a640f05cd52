//! HMAC request-signature verification.

use sealbox_crypto::mac;

use crate::{envelope::EncryptedEnvelope, error::EnvelopeError};

/// Verifies the HMAC-SHA256 signature over canonicalized envelope
/// fields, keyed by the static shared secret distributed out-of-band.
///
/// Verification runs before any decryption so a forged envelope is
/// rejected without spending an RSA private-key operation.
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Canonical message: `key ‖ data ‖ iv ‖ tag ‖ decimal(ts)`, fixed
    /// field order, no delimiters.
    ///
    /// The concatenation is not injective: two envelopes with different
    /// field boundaries can produce the same canonical string, so an
    /// attacker who controls field contents can shift bytes between
    /// adjacent fields without invalidating the signature. Kept as-is
    /// for wire compatibility; the ambiguity is pinned down by a test
    /// below rather than fixed.
    pub fn canonical_message(envelope: &EncryptedEnvelope) -> String {
        format!(
            "{}{}{}{}{}",
            envelope.key, envelope.data, envelope.iv, envelope.tag, envelope.ts
        )
    }

    /// Constant-time check of the envelope's `sig` field.
    pub fn verify(&self, envelope: &EncryptedEnvelope) -> Result<(), EnvelopeError> {
        let message = Self::canonical_message(envelope);
        if mac::verify_hmac_sha256_hex(&self.secret, message.as_bytes(), &envelope.sig) {
            Ok(())
        } else {
            Err(EnvelopeError::InvalidSignature)
        }
    }

    /// Sign an envelope's canonical message. This is the client half of
    /// the exchange, used by tests and tooling.
    pub fn sign(&self, envelope: &EncryptedEnvelope) -> String {
        mac::hmac_sha256_hex(&self.secret, Self::canonical_message(envelope).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test signing secret";

    fn signed_envelope() -> EncryptedEnvelope {
        let verifier = SignatureVerifier::new(SECRET);
        let mut envelope = EncryptedEnvelope {
            key: "d2hhdGV2ZXI=".to_string(),
            data: "Y2lwaGVydGV4dA==".to_string(),
            iv: "bm9uY2Vub25jZQ==".to_string(),
            tag: "dGFnZ3RhZ2d0YWdndGFn".to_string(),
            ts: 1_700_000_000,
            sig: String::new(),
        };
        envelope.sig = verifier.sign(&envelope);
        envelope
    }

    #[test]
    fn accepts_valid_signature() {
        let verifier = SignatureVerifier::new(SECRET);
        assert!(verifier.verify(&signed_envelope()).is_ok());
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = SignatureVerifier::new(b"another secret".as_slice());
        assert!(matches!(
            verifier.verify(&signed_envelope()),
            Err(EnvelopeError::InvalidSignature)
        ));
    }

    // Every signed field must be covered: mutating any one of them
    // without recomputing `sig` invalidates the envelope.
    #[test]
    fn rejects_mutation_of_each_signed_field() {
        let verifier = SignatureVerifier::new(SECRET);
        let base = signed_envelope();

        let mutations: Vec<Box<dyn Fn(&mut EncryptedEnvelope)>> = vec![
            Box::new(|e| e.key.push('A')),
            Box::new(|e| e.data.push('A')),
            Box::new(|e| e.iv.push('A')),
            Box::new(|e| e.tag.push('A')),
            Box::new(|e| e.ts += 1),
        ];

        for mutate in mutations {
            let mut envelope = base.clone();
            mutate(&mut envelope);
            assert!(
                matches!(
                    verifier.verify(&envelope),
                    Err(EnvelopeError::InvalidSignature)
                ),
                "mutated envelope must not verify"
            );
        }
    }

    #[test]
    fn rejects_empty_signature() {
        let verifier = SignatureVerifier::new(SECRET);
        let mut envelope = signed_envelope();
        envelope.sig = String::new();
        assert!(verifier.verify(&envelope).is_err());
    }

    // Documents the canonicalization weakness: with no delimiter between
    // fields, moving a byte from the front of `data` to the end of `key`
    // yields the same canonical string, so the original signature still
    // verifies for a differently-split envelope.
    #[test]
    fn delimiter_free_canonicalization_is_not_injective() {
        let verifier = SignatureVerifier::new(SECRET);
        let envelope = signed_envelope();

        let mut shifted = envelope.clone();
        let moved = shifted.data.remove(0);
        shifted.key.push(moved);

        assert_ne!(shifted.key, envelope.key);
        assert_ne!(shifted.data, envelope.data);
        assert_eq!(
            SignatureVerifier::canonical_message(&shifted),
            SignatureVerifier::canonical_message(&envelope)
        );
        assert!(
            verifier.verify(&shifted).is_ok(),
            "boundary-shifted envelope carries a valid signature"
        );
    }
}
