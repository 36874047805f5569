//! Envelope codec error types.

use thiserror::Error;

/// Errors produced while decoding or encoding envelopes and key material.
#[derive(Debug, Error)]
pub enum CoseError {
    /// Input exceeds the accepted size bound
    #[error("Input too large: {actual} bytes exceeds limit of {limit}")]
    TooLarge {
        /// Actual input length in bytes
        actual: usize,
        /// Maximum accepted length in bytes
        limit: usize,
    },

    /// Hex decoding failed
    #[error("Hex decoding failed: {0}")]
    Hex(#[from] hex::FromHexError),

    /// CBOR structure decoding failed
    #[error("Envelope decoding failed: {0}")]
    Decode(#[from] minicbor::decode::Error),

    /// CBOR structure encoding failed
    #[error("Envelope encoding failed: {0}")]
    Encode(String),
}
