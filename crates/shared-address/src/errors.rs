//! Address codec error types.

use thiserror::Error;

/// Errors produced while decoding or encoding addresses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The address byte string is empty
    #[error("Address bytes are empty")]
    Empty,

    /// The address exceeds the maximum supported length
    #[error("Address too long: {actual} bytes exceeds limit of {limit}")]
    TooLong {
        /// Actual length in bytes
        actual: usize,
        /// Maximum accepted length in bytes
        limit: usize,
    },

    /// The payload length does not match the scheme announced by the header
    #[error("Invalid length for address type {addr_type}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Address type nibble from the header byte
        addr_type: u8,
        /// Expected total length in bytes
        expected: usize,
        /// Actual total length in bytes
        actual: usize,
    },

    /// bech32 encoding of the canonical string form failed
    #[error("bech32 encoding failed: {0}")]
    Bech32(String),
}
