//! # Wallet Authentication Service
//!
//! Application service layer that implements the `WalletAuthApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that implements the
//! inbound port and delegates verification to the domain layer. The
//! service holds no state: verified addresses are not cached, there is
//! no key registry, and each call is fully self-contained.

use shared_cose::{KeyMaterial, SignedEnvelope};

use crate::domain::entities::{BatchVerificationResult, VerificationRequest};
use crate::domain::errors::AuthError;
use crate::domain::verify;
use crate::ports::inbound::WalletAuthApi;

/// Wallet authentication service.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalletAuthService;

impl WalletAuthService {
    /// Create a new wallet authentication service.
    pub fn new() -> Self {
        Self
    }
}

impl WalletAuthApi for WalletAuthService {
    fn verify(
        &self,
        address_hex: &str,
        payload_hex: &str,
        envelope_hex: &str,
        key_material_hex: &str,
    ) -> Result<bool, AuthError> {
        verify::verify_hex(address_hex, payload_hex, envelope_hex, key_material_hex)
    }

    fn verify_decoded(
        &self,
        claimed_address: &[u8],
        expected_payload: &[u8],
        envelope: &SignedEnvelope,
        key_material: &KeyMaterial,
    ) -> Result<bool, AuthError> {
        verify::verify_decoded(claimed_address, expected_payload, envelope, key_material)
    }

    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult {
        verify::batch_verify(requests)
    }
}
