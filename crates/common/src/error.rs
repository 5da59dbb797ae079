//! Common error types for henyey ingestion.
//!
//! This module provides the unified error type [`enum@Error`] and the convenience
//! type alias [`Result`] used by the conversion crates.
//!
//! # Error Handling Philosophy
//!
//! Errors raised here are fatal to the enclosing conversion call. A caller
//! converting a ledger aborts on the first one and surfaces it with enough
//! context (container type, discriminant) to diagnose a protocol-version
//! mismatch. Per-event shape failures are *not* represented here: they are
//! local to the event harvester (see `henyey_events::EventError`).
//!
//! # Example
//!
//! ```rust
//! use henyey_common::{Error, Result};
//!
//! fn check_phase(version: i32) -> Result<()> {
//!     if version != 0 && version != 1 {
//!         return Err(Error::unknown_variant("TransactionPhase", version));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_phase(2).is_err());
//! ```

use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for henyey ingestion.
#[derive(Error, Debug)]
pub enum Error {
    /// A union carried a discriminant this layer does not recognize.
    ///
    /// Signals either a protocol upgrade the converter has not been taught
    /// about, or a payload whose kind contradicts its container (for example
    /// an operation result that does not mirror its operation).
    #[error("unknown variant of {container}: discriminant {discriminant}")]
    UnknownVariant {
        /// Name of the protocol union being converted.
        container: String,
        /// Raw discriminant value found in the input.
        discriminant: i32,
    },

    /// XDR encoding/decoding error.
    #[error("XDR error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid data error.
    ///
    /// Occurs when a value is out of range for its target representation,
    /// such as a TOID component that does not fit its bit field.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Resource not found error.
    ///
    /// Occurs when a transaction result cannot be paired with its envelope.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Build an [`Error::UnknownVariant`].
    pub fn unknown_variant(container: impl Into<String>, discriminant: i32) -> Self {
        Error::UnknownVariant {
            container: container.into(),
            discriminant,
        }
    }

    /// Returns `true` for errors caused by an unrecognized discriminant.
    pub fn is_unknown_variant(&self) -> bool {
        matches!(self, Error::UnknownVariant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_display() {
        let err = Error::unknown_variant("LedgerUpgrade", 42);
        assert_eq!(
            err.to_string(),
            "unknown variant of LedgerUpgrade: discriminant 42"
        );
        assert!(err.is_unknown_variant());
    }

    #[test]
    fn test_other_errors_are_not_unknown_variant() {
        let err = Error::NotFound("tx".to_string());
        assert!(!err.is_unknown_variant());
        assert_eq!(err.to_string(), "Not found: tx");
    }
}
