//! Conversion of Stellar ledgers from XDR into the henyey domain model.
//!
//! The entry point is [`convert_ledger`], which takes a [`LedgerCloseRecord`]
//! (built from a `LedgerCloseMeta` with
//! [`LedgerCloseRecord::from_ledger_close_meta`]) and returns a
//! [`henyey_model::LedgerRecord`]. The per-type converters are public as well
//! so callers can convert sub-trees on their own.
//!
//! Conversion is pure: no I/O and no state survives a call, so separate
//! ledgers may be converted on separate threads. Every protocol union is
//! matched exhaustively. [`henyey_common::Error::UnknownVariant`] is raised
//! where a discriminant arrives as raw bytes (ledger upgrades) or where an
//! operation result contradicts its operation.
//!
//! Contract events are run through `henyey_events` per operation, which
//! assigns event ids and decodes asset-standard events.
//!
//! # Example
//!
//! ```rust
//! use henyey_convert::{convert_ledger, ConvertOptions, LedgerCloseRecord};
//! use henyey_common::NetworkId;
//! use stellar_xdr::curr::{LedgerCloseMeta, LedgerCloseMetaV2};
//!
//! let meta = LedgerCloseMeta::V2(LedgerCloseMetaV2::default());
//! let record = LedgerCloseRecord::from_ledger_close_meta(&meta, &NetworkId::testnet()).unwrap();
//! let ledger = convert_ledger(&record, &ConvertOptions::default()).unwrap();
//! assert_eq!(ledger.summary.transaction_count, 0);
//! ```

mod codec;
mod config_setting;
mod entry;
mod event;
mod ledger;
mod meta;
mod operation;
mod options;
mod record;
mod result;
mod scval;
mod soroban;
#[cfg(test)]
mod test_util;
mod transaction;

pub use codec::{
    convert_asset, convert_change_trust_asset, convert_claim_predicate, convert_signer_key,
    convert_trust_line_asset,
};
pub use config_setting::{convert_config_setting, convert_config_setting_id};
pub use entry::{convert_ledger_entry, convert_ledger_entry_change, convert_ledger_key};
pub use event::convert_contract_event;
pub use ledger::{convert_ledger, convert_transaction};
pub use meta::{convert_transaction_meta, ConvertedMeta, OperationMeta};
pub use operation::convert_operation;
pub use options::ConvertOptions;
pub use record::{LedgerCloseRecord, TransactionCloseRecord};
pub use result::{convert_operation_result, convert_transaction_result};
pub use scval::{convert_sc_address, convert_sc_val};
pub use soroban::{convert_authorization_entry, convert_host_function, convert_soroban_data};
pub use transaction::{convert_envelope, envelope_operations, transaction_hash};
