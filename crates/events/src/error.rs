//! Event decoding errors.

use thiserror::Error;

use crate::kind::AssetEventKind;

/// Result type for event decoding.
pub type Result<T> = std::result::Result<T, EventError>;

/// An event matched an asset-standard name but not its shape.
///
/// This is an expected outcome for contracts that reuse a standard name for
/// their own events. It is local to one event and never aborts a ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("malformed {kind} event: {reason}")]
    Malformed {
        kind: AssetEventKind,
        reason: String,
    },
}

impl EventError {
    pub fn malformed(kind: AssetEventKind, reason: impl Into<String>) -> Self {
        EventError::Malformed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> AssetEventKind {
        match self {
            EventError::Malformed { kind, .. } => *kind,
        }
    }
}
