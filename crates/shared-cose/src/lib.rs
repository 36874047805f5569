//! # Shared COSE - Signed Envelope Codec
//!
//! Decodes and encodes the COSE_Sign1-style envelope that wallets
//! produce when signing a challenge, plus the key-material map that
//! carries the signer's public key.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `sign1` | Envelope decode/encode, signed byte range |
//! | `header_map` | Protected-header map with int/text labels |
//! | `key` | Key-material map, public-key slot |
//!
//! The envelope is consumed by the verifier as a parsed structure; this
//! crate owns all byte-level CBOR handling. Inputs originate from
//! untrusted wallet responses, so decoding is size-bounded and strict:
//! unknown trailing bytes are rejected.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod header_map;
pub mod key;
pub mod sign1;

// Re-exports
pub use errors::CoseError;
pub use header_map::{HeaderMap, Label, Value};
pub use key::{KeyMaterial, PUBLIC_KEY_SLOT};
pub use sign1::{EnvelopeBuilder, SignedEnvelope};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
