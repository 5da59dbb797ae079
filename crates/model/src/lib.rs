//! Application-facing domain model for converted Stellar ledgers.
//!
//! The types in this crate mirror the protocol's object graph but are meant
//! for consumers that should not depend on XDR: keys are StrKey strings,
//! hashes are hex, wide integers are explicit parts and every protocol union
//! is a Rust enum serialized as `{"type": ..., "value": ...}`.
//!
//! Field names are snake_case and only ever added to. Optional protocol
//! fields are `Option`s, and an empty collection is never collapsed into an
//! absent one.
//!
//! # Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ledger`] | [`LedgerRecord`], [`LedgerSummary`], ledger upgrades |
//! | [`transaction`] | envelopes, preconditions, memos, per-transaction records |
//! | [`operation`] | the operation bodies |
//! | [`result`] | transaction and operation results |
//! | [`entry`] | ledger entries, keys and changes |
//! | [`config_setting`] | network configuration settings |
//! | [`scval`] | smart-contract values |
//! | [`soroban`] | host functions, authorization and resources |
//! | [`event`] | contract events and asset-standard events |
//! | [`asset`] | assets, signers, claimants |

pub mod asset;
pub mod config_setting;
pub mod entry;
pub mod event;
pub mod ledger;
pub mod operation;
pub mod result;
pub mod scval;
pub mod soroban;
pub mod transaction;

pub use asset::*;
pub use config_setting::*;
pub use entry::*;
pub use event::*;
pub use ledger::*;
pub use operation::*;
pub use result::*;
pub use scval::*;
pub use soroban::*;
pub use transaction::*;
