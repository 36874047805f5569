//! # Key Material
//!
//! The wallet ships its verification key as a labeled CBOR map alongside
//! the envelope. By protocol convention the raw public-key bytes sit in
//! slot `-2`; the other slots (key type, algorithm, curve) are carried
//! but not interpreted here.

use minicbor::decode::Error as DecodeError;
use minicbor::{Decoder, Encoder};

use crate::errors::CoseError;
use crate::header_map::{HeaderMap, Label, Value};

/// Slot holding the raw public-key bytes.
pub const PUBLIC_KEY_SLOT: i64 = -2;

/// Upper bound on accepted key-material sizes.
const MAX_KEY_MATERIAL_LEN: usize = 1024;

/// A decoded key-material map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMaterial {
    slots: HeaderMap,
}

impl KeyMaterial {
    /// Empty key material (builder-side starting point).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode key material from its hex encoding.
    pub fn from_hex(input: &str) -> Result<Self, CoseError> {
        Self::from_bytes(&hex::decode(input)?)
    }

    /// Decode key material from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoseError> {
        if bytes.len() > MAX_KEY_MATERIAL_LEN {
            return Err(CoseError::TooLarge {
                actual: bytes.len(),
                limit: MAX_KEY_MATERIAL_LEN,
            });
        }

        let mut d = Decoder::new(bytes);
        let slots = HeaderMap::decode(&mut d)?;
        if d.position() != bytes.len() {
            return Err(DecodeError::message("trailing bytes after key material").into());
        }
        Ok(Self { slots })
    }

    /// Set a slot value (builder-side).
    pub fn set_slot(mut self, label: i64, value: Value) -> Self {
        self.slots.insert(Label::Int(label), value);
        self
    }

    /// Look up a slot value.
    pub fn slot(&self, label: i64) -> Option<&Value> {
        self.slots.get(&Label::Int(label))
    }

    /// Look up a byte-blob slot.
    pub fn slot_bytes(&self, label: i64) -> Option<&[u8]> {
        self.slots.get_bytes(&Label::Int(label))
    }

    /// The raw public-key bytes from slot `-2`, if present.
    pub fn public_key_bytes(&self) -> Option<&[u8]> {
        self.slot_bytes(PUBLIC_KEY_SLOT)
    }

    /// Serialize to raw bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoseError> {
        let mut e = Encoder::new(Vec::new());
        self.slots.encode(&mut e)?;
        Ok(e.into_writer())
    }

    /// Serialize to hex.
    pub fn to_hex(&self) -> Result<String, CoseError> {
        Ok(hex::encode(self.to_bytes()?))
    }
}
