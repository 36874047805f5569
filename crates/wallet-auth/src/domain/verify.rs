//! # Challenge Verification Pipeline
//!
//! The ordered verification pipeline. Steps 1-5 are gating: they can
//! only fail fast with a tagged error. Step 6, the cryptographic
//! signature check, is the only step whose outcome becomes the
//! positive/negative verdict.
//!
//! ## Security Notes
//!
//! - **Byte-exact payload equality**: the payload comparison is a
//!   constant-time equality over the raw bytes, never an ordering
//!   comparison
//! - **Binding before verifying**: the address claim is proven against
//!   the public key before the signature is checked, so a valid
//!   signature from the wrong key never authenticates
//! - **Bounded inputs**: all hex inputs are length-bounded before any
//!   decoding; wallet responses are untrusted

use shared_cose::{KeyMaterial, Label, SignedEnvelope};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::binding::check_address_binding;
use super::entities::{BatchVerificationResult, PublicKey, VerificationRequest};
use super::errors::AuthError;

/// Protected-header label carrying the embedded address claim.
pub const ADDRESS_HEADER: &str = "address";

/// Size bounds on the hex inputs, in hex characters.
const MAX_ADDRESS_HEX: usize = 256;
const MAX_PAYLOAD_HEX: usize = 8 * 1024;
const MAX_ENVELOPE_HEX: usize = 16 * 1024;
const MAX_KEY_MATERIAL_HEX: usize = 2 * 1024;

/// Verify a signed challenge at the hex boundary.
///
/// # Arguments
/// * `address_hex` - hex encoding of the claimed address bytes
/// * `payload_hex` - hex encoding of the issued challenge payload
/// * `envelope_hex` - hex encoding of the signed envelope
/// * `key_material_hex` - hex encoding of the key material
///
/// # Errors
/// Fails on malformed input and on the gating payload/address checks;
/// returns `Ok(false)` only when everything is structurally sound and
/// the signature itself does not verify.
pub fn verify_hex(
    address_hex: &str,
    payload_hex: &str,
    envelope_hex: &str,
    key_material_hex: &str,
) -> Result<bool, AuthError> {
    bound("address", address_hex, MAX_ADDRESS_HEX)?;
    bound("payload", payload_hex, MAX_PAYLOAD_HEX)?;
    bound("envelope", envelope_hex, MAX_ENVELOPE_HEX)?;
    bound("key_material", key_material_hex, MAX_KEY_MATERIAL_HEX)?;

    let claimed_address = hex::decode(address_hex)?;
    let payload = hex::decode(payload_hex)?;
    let envelope = SignedEnvelope::from_bytes(&hex::decode(envelope_hex)?)?;
    let key_material = KeyMaterial::from_bytes(&hex::decode(key_material_hex)?)?;

    verify_decoded(&claimed_address, &payload, &envelope, &key_material)
}

/// Verify a signed challenge over already-decoded structures.
///
/// Pipeline order is load-bearing:
/// 1. embedded payload present
/// 2. payload equality (byte-exact)
/// 3. address claim extraction
/// 4. public key extraction
/// 5. address binding
/// 6. signature verification (the verdict)
pub fn verify_decoded(
    claimed_address: &[u8],
    expected_payload: &[u8],
    envelope: &SignedEnvelope,
    key_material: &KeyMaterial,
) -> Result<bool, AuthError> {
    let embedded_payload = envelope.payload().ok_or(AuthError::DetachedPayload)?;

    if !bool::from(embedded_payload.ct_eq(expected_payload)) {
        return Err(AuthError::PayloadMismatch);
    }

    let claim_bytes = envelope
        .protected()
        .get_bytes(&Label::text(ADDRESS_HEADER))
        .ok_or(AuthError::MissingAddressClaim)?;
    let embedded_address = shared_address::Address::from_bytes(claim_bytes)?;

    let key_bytes = key_material
        .public_key_bytes()
        .ok_or(AuthError::MissingPublicKey)?;
    let public_key = PublicKey::from_bytes(key_bytes)?;

    if !check_address_binding(claimed_address, &embedded_address, &public_key) {
        return Err(AuthError::AddressMismatch);
    }

    let signed_data = envelope.signed_data()?;
    let verdict = public_key.verify(&signed_data, envelope.signature());
    if !verdict {
        debug!("signature does not verify against the signed byte range");
    }
    Ok(verdict)
}

/// Verify independent requests in parallel.
///
/// Requests share no state; order of results matches order of requests.
pub fn batch_verify(requests: &[VerificationRequest]) -> BatchVerificationResult {
    use rayon::prelude::*;

    let results = requests
        .par_iter()
        .map(|req| verify_hex(&req.address, &req.payload, &req.envelope, &req.key_material))
        .collect();

    BatchVerificationResult::from_results(results)
}

fn bound(field: &'static str, input: &str, limit: usize) -> Result<(), AuthError> {
    if input.len() > limit {
        return Err(AuthError::InputTooLarge {
            field,
            actual: input.len(),
            limit,
        });
    }
    Ok(())
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
