//! SEP-41 asset event classification and event identifiers.
//!
//! Contract events reach this crate as `stellar_xdr` values. For each
//! operation the harvester:
//!
//! 1. filters candidates (contract events raised in successful calls),
//! 2. classifies each one by its topic outline ([`classify`]),
//! 3. decodes recognized transfer/mint/clawback/burn events into
//!    [`henyey_model::AssetStandardEvent`] ([`decode_asset_event`]),
//! 4. stamps every emitted event with an [`henyey_common::EventId`].
//!
//! Classification failure is an ordinary outcome. A recognized name with
//! the wrong shape yields [`EventError::Malformed`], which the harvester
//! turns into a skip of that single event.
//!
//! # Example
//!
//! ```rust
//! use henyey_events::{harvest_operation, HarvestOptions};
//! use henyey_common::Toid;
//! use stellar_xdr::curr::ContractEvent;
//!
//! let events: Vec<ContractEvent> = Vec::new();
//! let op = Toid::new(100, 1, 1).unwrap();
//! let harvested = harvest_operation(op, &events, &HarvestOptions::default());
//! assert!(harvested.is_empty());
//! ```

pub mod classify;
pub mod decode;
pub mod error;
pub mod harvest;
pub mod kind;

pub use classify::{classify, Classification, Rejection};
pub use decode::{decode_asset_event, decode_with_asset};
pub use error::{EventError, Result};
pub use harvest::{harvest_operation, is_candidate, HarvestOptions, Harvested, SkipReason, SourceEvent};
pub use kind::{AssetEventKind, ASSET_EVENT_NAMES};
