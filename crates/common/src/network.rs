//! Network identity types.
//!
//! This module provides the [`NetworkId`] type, which represents a unique
//! identifier for a Stellar network derived from its passphrase. The network
//! ID is part of every transaction hash preimage, so pairing a ledger's
//! results with its envelopes requires knowing which network the ledger
//! belongs to.
//!
//! # Standard Networks
//!
//! | Network | Passphrase |
//! |---------|------------|
//! | Mainnet | `"Public Global Stellar Network ; September 2015"` |
//! | Testnet | `"Test SDF Network ; September 2015"` |

use crate::types::Hash256;

/// Passphrase of the Stellar public network.
pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the Stellar test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// A unique identifier for a Stellar network: `SHA256(passphrase)`.
///
/// # Example
///
/// ```rust
/// use henyey_common::NetworkId;
///
/// let testnet = NetworkId::testnet();
/// let mainnet = NetworkId::mainnet();
/// assert_ne!(testnet.as_bytes(), mainnet.as_bytes());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId(pub Hash256);

impl NetworkId {
    /// Creates a network ID from a passphrase string.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self(Hash256::hash(passphrase.as_bytes()))
    }

    /// Returns a reference to the underlying 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Returns the network ID for the Stellar public testnet.
    pub fn testnet() -> Self {
        Self::from_passphrase(TESTNET_PASSPHRASE)
    }

    /// Returns the network ID for the Stellar public mainnet.
    pub fn mainnet() -> Self {
        Self::from_passphrase(MAINNET_PASSPHRASE)
    }
}

impl From<NetworkId> for stellar_xdr::curr::Hash {
    fn from(id: NetworkId) -> Self {
        stellar_xdr::curr::Hash(id.0 .0)
    }
}
