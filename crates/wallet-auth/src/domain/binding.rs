//! # Address Binding Check
//!
//! Proves that the public key that actually signed the envelope is
//! cryptographically tied to the claimed address under the chain's
//! address-derivation rule. The embedded address claim comes from the
//! wallet, not the backend, so plausible-looking bytes prove nothing on
//! their own: the address must be reconstructible from the key.
//!
//! Expected negative outcomes ("this address is not of this scheme")
//! are normal classification results and never raise errors; the check
//! reports a plain boolean.

use shared_address::{Address, AddressKind, BaseAddress, Credential, KeyHash, RewardAddress};
use tracing::{debug, warn};

use super::entities::PublicKey;

/// Verify that the claimed address, the embedded address claim, and the
/// public key are mutually consistent.
///
/// 1. The claimed bytes must decode into an address whose canonical
///    string is identical to the embedded claim's (identity, not mere
///    equivalence)
/// 2. A Base address must be reconstructible from the key hashed into
///    the payment role plus the claim's stake credential; no fallback
///    to the Reward scheme on mismatch
/// 3. A Reward address must be reconstructible from the same key hashed
///    into the stake role
pub fn check_address_binding(
    claimed_address: &[u8],
    embedded_address: &Address,
    public_key: &PublicKey,
) -> bool {
    let check_address = match Address::from_bytes(claimed_address) {
        Ok(address) => address,
        Err(err) => {
            debug!(%err, "claimed address does not decode");
            return false;
        }
    };

    let claimed = match check_address.to_bech32() {
        Ok(s) => s,
        Err(err) => {
            warn!(%err, "claimed address has no canonical form");
            return false;
        }
    };
    let embedded = match embedded_address.to_bech32() {
        Ok(s) => s,
        Err(err) => {
            warn!(%err, "embedded address claim has no canonical form");
            return false;
        }
    };
    if claimed != embedded {
        debug!("embedded address claim differs from claimed address");
        return false;
    }

    let network = check_address.network_id();
    match embedded_address.kind() {
        AddressKind::Base(base) => match base.stake().as_key_hash() {
            Some(stake_hash) => base_matches(network, public_key, *stake_hash, &claimed),
            None => {
                debug!("stake credential does not reduce to a key hash, trying reward scheme");
                reward_matches(network, public_key, &claimed)
            }
        },
        AddressKind::Reward(_) => reward_matches(network, public_key, &claimed),
        AddressKind::Other => {
            debug!("address is neither a base nor a reward address");
            false
        }
    }
}

/// Rebuild a Base address with the key in the payment role and compare
/// canonical forms.
fn base_matches(network: u8, public_key: &PublicKey, stake_hash: KeyHash, claimed: &str) -> bool {
    let rebuilt = BaseAddress::new(
        network,
        Credential::KeyHash(public_key.key_hash()),
        Credential::KeyHash(stake_hash),
    )
    .to_address();

    match rebuilt.to_bech32() {
        Ok(s) => s == claimed,
        Err(err) => {
            warn!(%err, "reconstructed base address has no canonical form");
            false
        }
    }
}

/// Rebuild a Reward address with the key in the stake role and compare
/// canonical forms.
fn reward_matches(network: u8, public_key: &PublicKey, claimed: &str) -> bool {
    let rebuilt =
        RewardAddress::new(network, Credential::KeyHash(public_key.key_hash())).to_address();

    match rebuilt.to_bech32() {
        Ok(s) => s == claimed,
        Err(err) => {
            warn!(%err, "reconstructed reward address has no canonical form");
            false
        }
    }
}
