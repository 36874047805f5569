//! # Protected Header Map
//!
//! The envelope's protected headers form a CBOR map whose labels are
//! integers or text strings. Decoding is strict: definite lengths only,
//! duplicate labels rejected. Values the verifier does not understand
//! are consumed and kept as opaque entries so lookups stay total.

use minicbor::data::Type;
use minicbor::decode::Error as DecodeError;
use minicbor::{Decoder, Encoder};

use crate::errors::CoseError;

/// A header label: integer or text, per the envelope format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    /// Integer label.
    Int(i64),
    /// Text label.
    Text(String),
}

impl Label {
    /// Text label from a string slice.
    pub fn text(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::text(value)
    }
}

/// A header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Byte string.
    Bytes(Vec<u8>),
    /// Integer.
    Int(i64),
    /// Text string.
    Text(String),
    /// Any other CBOR item, consumed but not interpreted.
    Opaque,
}

/// Upper bound on header-map entries. The announced length is
/// attacker-controlled and must not drive allocation.
const MAX_ENTRIES: u64 = 128;

/// An ordered label → value mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(Label, Value)>,
}

impl HeaderMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a map from a standalone CBOR byte string.
    ///
    /// An empty input decodes to an empty map, matching the convention
    /// of serializing absent protected headers as a zero-length byte
    /// string.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoseError> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        let mut decoder = Decoder::new(bytes);
        let map = Self::decode(&mut decoder)?;
        if decoder.position() != bytes.len() {
            return Err(DecodeError::message("trailing bytes after header map").into());
        }
        Ok(map)
    }

    /// Decode a map at the decoder's current position.
    pub(crate) fn decode(d: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let len = d
            .map()?
            .ok_or_else(|| DecodeError::message("indefinite-length header map not supported"))?;
        if len > MAX_ENTRIES {
            return Err(DecodeError::message("too many header entries"));
        }

        let mut entries = Vec::with_capacity(len as usize);
        for _ in 0..len {
            let label = decode_label(d)?;
            if entries.iter().any(|(existing, _)| *existing == label) {
                return Err(DecodeError::message("duplicate header label"));
            }
            let value = decode_value(d)?;
            entries.push((label, value));
        }
        Ok(Self { entries })
    }

    /// Encode this map at the encoder's current position.
    ///
    /// # Errors
    /// Fails on [`Value::Opaque`] entries, which carry no data to encode.
    pub(crate) fn encode(&self, e: &mut Encoder<Vec<u8>>) -> Result<(), CoseError> {
        e.map(self.entries.len() as u64)
            .map_err(|err| CoseError::Encode(err.to_string()))?;
        for (label, value) in &self.entries {
            match label {
                Label::Int(n) => e.i64(*n),
                Label::Text(s) => e.str(s),
            }
            .map_err(|err| CoseError::Encode(err.to_string()))?;
            match value {
                Value::Bytes(b) => e.bytes(b),
                Value::Int(n) => e.i64(*n),
                Value::Text(s) => e.str(s),
                Value::Opaque => {
                    return Err(CoseError::Encode(
                        "opaque header value cannot be encoded".to_string(),
                    ))
                }
            }
            .map_err(|err| CoseError::Encode(err.to_string()))?;
        }
        Ok(())
    }

    /// Insert an entry, replacing any existing entry with the same label.
    pub fn insert(&mut self, label: Label, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            entry.1 = value;
        } else {
            self.entries.push((label, value));
        }
    }

    /// Look up a value by label.
    pub fn get(&self, label: &Label) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Look up a byte-string value by label.
    pub fn get_bytes(&self, label: &Label) -> Option<&[u8]> {
        match self.get(label) {
            Some(Value::Bytes(bytes)) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decode_label(d: &mut Decoder<'_>) -> Result<Label, DecodeError> {
    match d.datatype()? {
        Type::U8 | Type::U16 | Type::U32 | Type::U64 | Type::I8 | Type::I16 | Type::I32
        | Type::I64 | Type::Int => Ok(Label::Int(d.i64()?)),
        Type::String => Ok(Label::Text(d.str()?.to_string())),
        _ => Err(DecodeError::message("header label must be int or text")),
    }
}

fn decode_value(d: &mut Decoder<'_>) -> Result<Value, DecodeError> {
    match d.datatype()? {
        Type::Bytes => Ok(Value::Bytes(d.bytes()?.to_vec())),
        Type::U8 | Type::U16 | Type::U32 | Type::U64 | Type::I8 | Type::I16 | Type::I32
        | Type::I64 | Type::Int => Ok(Value::Int(d.i64()?)),
        Type::String => Ok(Value::Text(d.str()?.to_string())),
        _ => {
            d.skip()?;
            Ok(Value::Opaque)
        }
    }
}
