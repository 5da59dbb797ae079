//! Shared primitives for henyey ingestion.
//!
//! This crate provides the types every other ingestion crate builds on:
//! the common error type, 32-byte hashes, network identities, lossless
//! wide-integer parts, StrKey/hex rendering of keys and addresses, total
//! order identifiers for ledgers/transactions/operations/events, and readers
//! for streams of XDR values.

pub mod asset;
pub mod error;
pub mod network;
pub mod numeric;
pub mod strkey;
pub mod toid;
pub mod types;
pub mod xdr_stream;

pub use error::{Error, Result};
pub use network::NetworkId;
pub use numeric::{Int128, Int256, UInt128, UInt256};
pub use toid::{EventId, Toid};
pub use types::Hash256;

/// Re-export stellar-xdr for convenience
pub use stellar_xdr;
