//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem. Callable from
//! any boundary: an HTTP handler, an RPC method, a CLI.

use shared_cose::{KeyMaterial, SignedEnvelope};

use crate::domain::entities::{BatchVerificationResult, VerificationRequest};
use crate::domain::errors::AuthError;

/// Primary wallet-authentication API.
///
/// This is the main entry point for challenge-signature verification.
/// Implementations must be thread-safe (`Send + Sync`) and stateless:
/// every call is independent, retains nothing, and is safe to run
/// concurrently with any other call.
pub trait WalletAuthApi: Send + Sync {
    /// Verify a signed challenge at the hex boundary.
    ///
    /// # Errors
    /// * Malformed input (hex, envelope, key material, address claim)
    /// * `PayloadMismatch` / `AddressMismatch` gating failures
    ///
    /// Returns `Ok(false)` only when every structural check passed and
    /// the signature itself does not verify.
    fn verify(
        &self,
        address_hex: &str,
        payload_hex: &str,
        envelope_hex: &str,
        key_material_hex: &str,
    ) -> Result<bool, AuthError>;

    /// Verify a signed challenge over already-decoded structures.
    fn verify_decoded(
        &self,
        claimed_address: &[u8],
        expected_payload: &[u8],
        envelope: &SignedEnvelope,
        key_material: &KeyMaterial,
    ) -> Result<bool, AuthError>;

    /// Verify independent requests in parallel.
    ///
    /// # Performance
    /// Uses parallel processing for improved throughput.
    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult;
}
