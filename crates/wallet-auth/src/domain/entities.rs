//! # Domain Entities
//!
//! Core data structures for challenge-signature verification.

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use shared_address::KeyHash;
use tracing::debug;

use super::errors::AuthError;

/// blake2b with 28-byte output, the credential key-hash digest.
type Blake2b224 = Blake2b<U28>;

/// Length in bytes of a raw verification key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// A validated Ed25519 verification key.
///
/// Supports hashing into a credential key hash and signature
/// verification. The same key serves as a payment-credential root for
/// Base addresses and as a stake-credential root for Reward addresses;
/// which role applies is decided by the address scheme, not the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    key: VerifyingKey,
}

impl PublicKey {
    /// Create from raw bytes, validating length and curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuthError> {
        let bytes: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            AuthError::MalformedPublicKey(format!(
                "expected {PUBLIC_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| AuthError::MalformedPublicKey("not a valid curve point".to_string()))?;
        Ok(Self { key })
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        self.key.as_bytes()
    }

    /// The credential key hash of this key (blake2b-224 digest).
    pub fn key_hash(&self) -> KeyHash {
        let digest = Blake2b224::digest(self.key.as_bytes());
        let mut bytes = [0u8; 28];
        bytes.copy_from_slice(&digest);
        KeyHash::from_bytes(bytes)
    }

    /// Verify a raw signature over a message.
    ///
    /// Undecodable signature bytes are an invalid signature, not an
    /// error: the verdict is `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
            debug!(len = signature.len(), "signature bytes do not decode");
            return false;
        };
        self.key.verify_strict(message, &signature).is_ok()
    }
}

/// One verification request at the hex boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Hex encoding of the claimed address bytes
    pub address: String,
    /// Hex encoding of the issued challenge payload
    pub payload: String,
    /// Hex encoding of the signed envelope
    pub envelope: String,
    /// Hex encoding of the key material
    pub key_material: String,
}

/// Result of batch verification.
#[derive(Debug)]
pub struct BatchVerificationResult {
    /// Individual verdicts, in request order
    pub results: Vec<Result<bool, AuthError>>,
    /// Whether every request verified successfully
    pub all_valid: bool,
    /// Count of successful verifications
    pub valid_count: usize,
    /// Count of failed verifications (false verdicts and errors)
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<Result<bool, AuthError>>) -> Self {
        let valid_count = results.iter().filter(|r| matches!(r, Ok(true))).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}
