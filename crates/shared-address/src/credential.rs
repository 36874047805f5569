//! # Address Credentials
//!
//! A credential is the sub-component of an address that identifies who
//! controls it: either the hash of a verification key or the hash of a
//! script. Both hash kinds are 28 bytes; only key hashes are comparable
//! to hashes derived from public keys.

/// Length in bytes of credential hashes.
pub const HASH_LEN: usize = 28;

/// Digest of a verification key (28 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyHash([u8; HASH_LEN]);

impl KeyHash {
    /// Create from raw digest bytes.
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl From<[u8; HASH_LEN]> for KeyHash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

/// Digest of a script (28 bytes).
///
/// Scripts can control addresses but do not correspond to a single
/// signing key, so a script hash never reduces to a [`KeyHash`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScriptHash([u8; HASH_LEN]);

impl ScriptHash {
    /// Create from raw digest bytes.
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

/// A payment or stake credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Credential {
    /// Controlled by a verification key.
    KeyHash(KeyHash),
    /// Controlled by a script.
    Script(ScriptHash),
}

impl Credential {
    /// The key hash, if this credential is key-controlled.
    pub fn as_key_hash(&self) -> Option<&KeyHash> {
        match self {
            Credential::KeyHash(hash) => Some(hash),
            Credential::Script(_) => None,
        }
    }

    /// Raw 28-byte hash regardless of kind.
    pub fn hash_bytes(&self) -> &[u8; HASH_LEN] {
        match self {
            Credential::KeyHash(hash) => hash.as_bytes(),
            Credential::Script(hash) => hash.as_bytes(),
        }
    }

    /// Whether this credential is script-controlled.
    pub fn is_script(&self) -> bool {
        matches!(self, Credential::Script(_))
    }
}
