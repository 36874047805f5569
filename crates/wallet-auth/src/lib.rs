//! # Wallet Authentication Core
//!
//! Verifies that a wallet address was the actual signer of a challenge
//! message issued by a backend ("login with wallet").
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure verification logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for the inbound API
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Verification Pipeline
//!
//! 1. Decode the signed envelope and compare its embedded payload
//!    against the issued challenge (byte-exact, constant time)
//! 2. Extract the embedded address claim from the protected headers
//! 3. Extract and validate the public key from the key material
//! 4. Prove the claim: reconstruct the address from the public key
//!    under its scheme and require identity with the claimed address
//! 5. Only then verify the signature over the envelope's signed bytes
//!
//! ## Security Notes
//!
//! - The embedded address claim is attacker-influenceable (the wallet,
//!   not the backend, produces the envelope); the binding check proves
//!   the signing key is cryptographically tied to the claimed address
//!   under the chain's derivation rule
//! - Gating checks fail fast and never pass a `false` through; only the
//!   final signature check produces the boolean verdict
//! - Every call is stateless and side-effect-free; logging is advisory

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::binding::check_address_binding;
pub use domain::entities::{BatchVerificationResult, PublicKey, VerificationRequest};
pub use domain::errors::{AuthError, AuthErrorKind};
pub use domain::verify::{batch_verify, verify_decoded, verify_hex};
pub use ports::inbound::WalletAuthApi;
pub use service::WalletAuthService;
