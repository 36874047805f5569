//! # Authentication Errors
//!
//! Error types for challenge-signature verification. Structural
//! problems (undecodable input) are distinguished from authentication
//! failures so boundaries can answer "bad request" vs "denied".

use serde::Serialize;
use shared_address::AddressError;
use shared_cose::CoseError;
use thiserror::Error;

/// Errors that can occur during challenge verification.
///
/// An invalid signature is not an error: it is the `Ok(false)` verdict.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Hex decoding of an input failed
    #[error("Hex decoding failed: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    /// The envelope or key-material structure does not decode
    #[error("Envelope decoding failed: {0}")]
    MalformedEnvelope(#[from] CoseError),

    /// The embedded address claim does not decode into an address
    #[error("Address claim decoding failed: {0}")]
    MalformedAddress(#[from] AddressError),

    /// The envelope carries no embedded payload
    #[error("Envelope payload is detached; an embedded payload is required")]
    DetachedPayload,

    /// No address claim in the protected headers
    #[error("Protected headers carry no address claim")]
    MissingAddressClaim,

    /// No public key in the key material
    #[error("Key material carries no public key")]
    MissingPublicKey,

    /// The public-key bytes are not a usable verification key
    #[error("Invalid public key: {0}")]
    MalformedPublicKey(String),

    /// An input exceeds its size bound
    #[error("Input '{field}' too large: {actual} hex characters exceeds limit of {limit}")]
    InputTooLarge {
        /// Which input overflowed
        field: &'static str,
        /// Actual length
        actual: usize,
        /// Maximum accepted length
        limit: usize,
    },

    /// Embedded payload differs from the issued challenge
    #[error("Embedded payload does not match the issued challenge")]
    PayloadMismatch,

    /// Neither address-scheme reconstruction reproduces the claimed address
    #[error("Address claim is not bound to the signing key")]
    AddressMismatch,
}

/// Coarse error classification for boundary callers (e.g. respond
/// 400 for `MalformedInput`, 401 for the mismatches).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AuthErrorKind {
    /// Input could not be decoded; a request/protocol error.
    MalformedInput,
    /// Structurally valid but the payload check failed; denied.
    PayloadMismatch,
    /// Structurally valid but the address check failed; denied.
    AddressMismatch,
}

impl AuthError {
    /// Classify this error for boundary handling.
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::PayloadMismatch => AuthErrorKind::PayloadMismatch,
            AuthError::AddressMismatch => AuthErrorKind::AddressMismatch,
            _ => AuthErrorKind::MalformedInput,
        }
    }
}
