//! # Signed Envelope (COSE_Sign1 Style)
//!
//! The envelope is a 4-element CBOR array, optionally tagged:
//!
//! ```text
//! [ protected : bstr (embedded header map),
//!   unprotected : map,
//!   payload : bstr / nil,
//!   signature : bstr ]
//! ```
//!
//! The signature does not cover the envelope bytes themselves but the
//! serialized `Signature1` sig-structure over the protected headers and
//! payload; [`SignedEnvelope::signed_data`] reproduces that exact byte
//! range for verification.

use minicbor::data::{Tag, Type};
use minicbor::decode::Error as DecodeError;
use minicbor::{Decoder, Encoder};

use crate::errors::CoseError;
use crate::header_map::{HeaderMap, Label, Value};

/// Registered tag for single-signer signed envelopes.
pub const COSE_SIGN1_TAG: u64 = 18;

/// Context string of the single-signer sig-structure.
const SIGNATURE_CONTEXT: &str = "Signature1";

/// Upper bound on accepted envelope sizes. Wallet responses are a few
/// hundred bytes; anything larger is refused before decoding.
const MAX_ENVELOPE_LEN: usize = 8 * 1024;

/// A decoded signed envelope.
///
/// Immutable once decoded; lives for the duration of one verification
/// call.
#[derive(Clone, Debug)]
pub struct SignedEnvelope {
    protected_bytes: Vec<u8>,
    protected: HeaderMap,
    unprotected: HeaderMap,
    payload: Option<Vec<u8>>,
    signature: Vec<u8>,
}

impl SignedEnvelope {
    /// Decode an envelope from its hex encoding.
    pub fn from_hex(input: &str) -> Result<Self, CoseError> {
        Self::from_bytes(&hex::decode(input)?)
    }

    /// Decode an envelope from raw bytes.
    ///
    /// Strict: definite lengths only, exactly 4 fields, no trailing
    /// bytes, size-bounded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoseError> {
        if bytes.len() > MAX_ENVELOPE_LEN {
            return Err(CoseError::TooLarge {
                actual: bytes.len(),
                limit: MAX_ENVELOPE_LEN,
            });
        }

        let mut d = Decoder::new(bytes);
        if d.datatype()? == Type::Tag {
            let tag = d.tag()?;
            if tag != Tag::new(COSE_SIGN1_TAG) {
                return Err(DecodeError::message("unexpected envelope tag").into());
            }
        }

        let len = d
            .array()?
            .ok_or_else(|| DecodeError::message("indefinite-length envelope not supported"))?;
        if len != 4 {
            return Err(DecodeError::message("envelope must have exactly 4 fields").into());
        }

        let protected_bytes = d.bytes()?.to_vec();
        let protected = HeaderMap::from_bytes(&protected_bytes)?;
        let unprotected = HeaderMap::decode(&mut d)?;

        let payload = match d.datatype()? {
            Type::Null => {
                d.null()?;
                None
            }
            Type::Bytes => Some(d.bytes()?.to_vec()),
            _ => return Err(DecodeError::message("envelope payload must be bytes or nil").into()),
        };

        let signature = d.bytes()?.to_vec();

        if d.position() != bytes.len() {
            return Err(DecodeError::message("trailing bytes after envelope").into());
        }

        Ok(Self {
            protected_bytes,
            protected,
            unprotected,
            payload,
            signature,
        })
    }

    /// The embedded payload, if not detached.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// The protected-header map.
    pub fn protected(&self) -> &HeaderMap {
        &self.protected
    }

    /// The unprotected-header map.
    pub fn unprotected(&self) -> &HeaderMap {
        &self.unprotected
    }

    /// The raw signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The exact byte range the signature covers: the serialized
    /// `Signature1` sig-structure over the protected headers, empty
    /// external data, and the payload.
    ///
    /// # Errors
    /// Fails when the payload is detached; this protocol requires an
    /// embedded payload.
    pub fn signed_data(&self) -> Result<Vec<u8>, CoseError> {
        let payload = self
            .payload
            .as_deref()
            .ok_or_else(|| DecodeError::message("envelope payload is detached"))?;
        sig_structure(&self.protected_bytes, payload)
    }

    /// Serialize back to envelope bytes (untagged).
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoseError> {
        let mut e = Encoder::new(Vec::new());
        e.array(4)
            .and_then(|e| e.bytes(&self.protected_bytes))
            .map_err(|err| CoseError::Encode(err.to_string()))?;
        self.unprotected.encode(&mut e)?;
        match &self.payload {
            Some(payload) => e.bytes(payload),
            None => e.null(),
        }
        .and_then(|e| e.bytes(&self.signature))
        .map_err(|err| CoseError::Encode(err.to_string()))?;
        Ok(e.into_writer())
    }

    /// Serialize back to hex.
    pub fn to_hex(&self) -> Result<String, CoseError> {
        Ok(hex::encode(self.to_bytes()?))
    }
}

/// Builds and signs an envelope. Used by wallet-side code and test
/// fixtures; verification never constructs envelopes.
#[derive(Clone, Debug, Default)]
pub struct EnvelopeBuilder {
    protected: HeaderMap,
    unprotected: HeaderMap,
    payload: Vec<u8>,
}

impl EnvelopeBuilder {
    /// Start an empty envelope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a protected header.
    pub fn protected_header(mut self, label: Label, value: Value) -> Self {
        self.protected.insert(label, value);
        self
    }

    /// Set an unprotected header.
    pub fn unprotected_header(mut self, label: Label, value: Value) -> Self {
        self.unprotected.insert(label, value);
        self
    }

    /// Set the payload.
    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    /// Serialize the sig-structure, obtain a signature over it from the
    /// caller, and assemble the envelope.
    pub fn sign_with<F>(self, sign: F) -> Result<SignedEnvelope, CoseError>
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        let protected_bytes = if self.protected.is_empty() {
            Vec::new()
        } else {
            let mut e = Encoder::new(Vec::new());
            self.protected.encode(&mut e)?;
            e.into_writer()
        };

        let to_sign = sig_structure(&protected_bytes, &self.payload)?;
        let signature = sign(&to_sign);

        Ok(SignedEnvelope {
            protected_bytes,
            protected: self.protected,
            unprotected: self.unprotected,
            payload: Some(self.payload),
            signature,
        })
    }
}

fn sig_structure(protected: &[u8], payload: &[u8]) -> Result<Vec<u8>, CoseError> {
    let mut e = Encoder::new(Vec::new());
    e.array(4)
        .and_then(|e| e.str(SIGNATURE_CONTEXT))
        .and_then(|e| e.bytes(protected))
        .and_then(|e| e.bytes(&[]))
        .and_then(|e| e.bytes(payload))
        .map_err(|err| CoseError::Encode(err.to_string()))?;
    Ok(e.into_writer())
}
