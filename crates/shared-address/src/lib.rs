//! # Shared Address - Chain Address Codec
//!
//! Parses and serializes chain-native addresses between their canonical
//! byte form and their bech32 human-readable form.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `address` | Header decoding, scheme classification, bech32 form |
//! | `credential` | Payment/stake credentials and 28-byte hashes |
//!
//! ## Address Schemes
//!
//! - **Base**: payment credential + stake credential (57 bytes)
//! - **Reward**: single stake credential (29 bytes)
//! - Anything else classifies as `Other` and is carried opaquely
//!
//! The bech32 string form is a pure function of the address bytes and is
//! the equality test used by consumers of this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod credential;
pub mod errors;

// Re-exports
pub use address::{Address, AddressKind, BaseAddress, RewardAddress, MAINNET, TESTNET};
pub use credential::{Credential, KeyHash, ScriptHash, HASH_LEN};
pub use errors::AddressError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
