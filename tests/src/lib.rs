//! # WalletGate Test Suite
//!
//! Unified test crate containing cross-crate verification flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Backend-to-wallet choreography
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wg-tests
//!
//! # By category
//! cargo test -p wg-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
