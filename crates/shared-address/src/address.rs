//! # Address Decoding and Classification
//!
//! Shelley-style single-byte header encoding: the high nibble of the
//! first byte selects the address scheme, the low nibble carries the
//! network id. Supported schemes:
//!
//! | Type nibble | Scheme | Payload |
//! |-------------|--------|---------|
//! | 0..=3 | Base | payment hash (28) + stake hash (28) |
//! | 14, 15 | Reward | stake hash (28) |
//!
//! For Base types, header bit 0 marks a script payment credential and
//! bit 1 a script stake credential. Type 15 is a script reward address.
//! All other type nibbles decode opaquely and classify as `Other`.

use crate::credential::{Credential, KeyHash, ScriptHash, HASH_LEN};
use crate::errors::AddressError;
use bech32::{Bech32, Hrp};

/// Network id of the main network.
pub const MAINNET: u8 = 1;
/// Network id of the test network.
pub const TESTNET: u8 = 0;

/// Total length of a Base address in bytes.
const BASE_LEN: usize = 1 + 2 * HASH_LEN;
/// Total length of a Reward address in bytes.
const REWARD_LEN: usize = 1 + HASH_LEN;
/// Upper bound on accepted address lengths. Inputs come from untrusted
/// wallet responses; decoding is refused beyond this.
const MAX_ADDRESS_LEN: usize = 128;

const TYPE_REWARD_KEY: u8 = 0b1110;
const TYPE_REWARD_SCRIPT: u8 = 0b1111;

/// A chain-native address, held in canonical byte form.
///
/// The bech32 string form is a pure function of these bytes and is the
/// equality test consumers should use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    bytes: Vec<u8>,
}

/// Scheme classification of an address.
///
/// Expected "not this scheme" conditions are represented here as normal
/// variants, never as errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressKind {
    /// Payment credential + stake credential.
    Base(BaseAddress),
    /// Single stake credential.
    Reward(RewardAddress),
    /// Recognized header but unsupported scheme; carried opaquely.
    Other,
}

impl Address {
    /// Decode an address from its canonical byte form.
    ///
    /// # Errors
    /// Rejects empty or oversized input, and payloads whose length does
    /// not match the scheme announced by the header byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.is_empty() {
            return Err(AddressError::Empty);
        }
        if bytes.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::TooLong {
                actual: bytes.len(),
                limit: MAX_ADDRESS_LEN,
            });
        }

        let addr_type = bytes[0] >> 4;
        let expected = match addr_type {
            0..=3 => Some(BASE_LEN),
            TYPE_REWARD_KEY | TYPE_REWARD_SCRIPT => Some(REWARD_LEN),
            _ => None,
        };
        if let Some(expected) = expected {
            if bytes.len() != expected {
                return Err(AddressError::InvalidLength {
                    addr_type,
                    expected,
                    actual: bytes.len(),
                });
            }
        }

        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Canonical byte form.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Network id from the header's low nibble.
    pub fn network_id(&self) -> u8 {
        self.bytes[0] & 0x0F
    }

    /// Classify this address into exactly one scheme.
    pub fn kind(&self) -> AddressKind {
        let addr_type = self.bytes[0] >> 4;
        let network = self.network_id();
        match addr_type {
            0..=3 => AddressKind::Base(BaseAddress {
                network,
                payment: credential(addr_type & 0b01 != 0, &self.bytes[1..1 + HASH_LEN]),
                stake: credential(addr_type & 0b10 != 0, &self.bytes[1 + HASH_LEN..BASE_LEN]),
            }),
            TYPE_REWARD_KEY | TYPE_REWARD_SCRIPT => AddressKind::Reward(RewardAddress {
                network,
                stake: credential(addr_type == TYPE_REWARD_SCRIPT, &self.bytes[1..REWARD_LEN]),
            }),
            _ => AddressKind::Other,
        }
    }

    /// The canonical human-readable form.
    pub fn to_bech32(&self) -> Result<String, AddressError> {
        let hrp = Hrp::parse(self.hrp()).map_err(|e| AddressError::Bech32(e.to_string()))?;
        bech32::encode::<Bech32>(hrp, &self.bytes).map_err(|e| AddressError::Bech32(e.to_string()))
    }

    fn hrp(&self) -> &'static str {
        let reward = matches!(self.bytes[0] >> 4, TYPE_REWARD_KEY | TYPE_REWARD_SCRIPT);
        match (reward, self.network_id()) {
            (false, MAINNET) => "addr",
            (false, _) => "addr_test",
            (true, MAINNET) => "stake",
            (true, _) => "stake_test",
        }
    }
}

/// Address scheme combining a payment credential and a stake credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseAddress {
    network: u8,
    payment: Credential,
    stake: Credential,
}

impl BaseAddress {
    /// Construct from network id and credentials.
    pub fn new(network: u8, payment: Credential, stake: Credential) -> Self {
        Self {
            network,
            payment,
            stake,
        }
    }

    /// Network id.
    pub fn network_id(&self) -> u8 {
        self.network
    }

    /// Payment credential.
    pub fn payment(&self) -> &Credential {
        &self.payment
    }

    /// Stake credential.
    pub fn stake(&self) -> &Credential {
        &self.stake
    }

    /// Serialize to canonical byte form.
    pub fn to_address(&self) -> Address {
        let addr_type =
            u8::from(self.payment.is_script()) | (u8::from(self.stake.is_script()) << 1);
        let mut bytes = Vec::with_capacity(BASE_LEN);
        bytes.push((addr_type << 4) | (self.network & 0x0F));
        bytes.extend_from_slice(self.payment.hash_bytes());
        bytes.extend_from_slice(self.stake.hash_bytes());
        Address { bytes }
    }
}

/// Address scheme containing only a stake credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardAddress {
    network: u8,
    stake: Credential,
}

impl RewardAddress {
    /// Construct from network id and stake credential.
    pub fn new(network: u8, stake: Credential) -> Self {
        Self { network, stake }
    }

    /// Network id.
    pub fn network_id(&self) -> u8 {
        self.network
    }

    /// Stake credential.
    pub fn stake(&self) -> &Credential {
        &self.stake
    }

    /// Serialize to canonical byte form.
    pub fn to_address(&self) -> Address {
        let addr_type = if self.stake.is_script() {
            TYPE_REWARD_SCRIPT
        } else {
            TYPE_REWARD_KEY
        };
        let mut bytes = Vec::with_capacity(REWARD_LEN);
        bytes.push((addr_type << 4) | (self.network & 0x0F));
        bytes.extend_from_slice(self.stake.hash_bytes());
        Address { bytes }
    }
}

fn credential(is_script: bool, hash: &[u8]) -> Credential {
    let mut bytes = [0u8; HASH_LEN];
    bytes.copy_from_slice(hash);
    if is_script {
        Credential::Script(ScriptHash::from_bytes(bytes))
    } else {
        Credential::KeyHash(KeyHash::from_bytes(bytes))
    }
}
