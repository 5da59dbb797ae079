//! Total order identifiers.
//!
//! A TOID packs a ledger sequence, a transaction's application order within
//! the ledger and an operation's order within the transaction into one
//! non-negative 64-bit integer:
//!
//! ```text
//!  63    62..32             31..12              11..0
//! +---+-----------------+-------------------+--------------+
//! | 0 | ledger sequence | transaction order | op order     |
//! +---+-----------------+-------------------+--------------+
//! ```
//!
//! Transaction and operation orders are 1-based; order `0` addresses the
//! enclosing ledger or transaction itself. Numeric ordering of TOIDs matches
//! the order in which the protocol applied the objects they name.
//!
//! [`EventId`] extends an operation TOID with a per-operation 1-based event
//! order and renders as `%019d-%010d`, so plain string comparison sorts event
//! ids the same way as the tuples they encode.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const LEDGER_BITS: u32 = 32;
const TX_BITS: u32 = 20;
const OP_BITS: u32 = 12;

/// Largest transaction order that fits the TOID layout.
pub const MAX_TX_ORDER: u32 = (1 << TX_BITS) - 1;
/// Largest operation order that fits the TOID layout.
pub const MAX_OP_ORDER: u32 = (1 << OP_BITS) - 1;
/// Largest ledger sequence that keeps the TOID non-negative.
pub const MAX_LEDGER_SEQ: u32 = i32::MAX as u32;

/// A packed (ledger, transaction, operation) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Toid(i64);

impl Toid {
    /// Pack the three components, rejecting values that overflow their field.
    pub fn new(ledger_seq: u32, tx_order: u32, op_order: u32) -> Result<Self> {
        if ledger_seq > MAX_LEDGER_SEQ {
            return Err(Error::InvalidData(format!(
                "ledger sequence {ledger_seq} does not fit a TOID"
            )));
        }
        if tx_order > MAX_TX_ORDER {
            return Err(Error::InvalidData(format!(
                "transaction order {tx_order} exceeds {MAX_TX_ORDER}"
            )));
        }
        if op_order > MAX_OP_ORDER {
            return Err(Error::InvalidData(format!(
                "operation order {op_order} exceeds {MAX_OP_ORDER}"
            )));
        }
        Ok(Self(
            ((ledger_seq as i64) << LEDGER_BITS)
                | ((tx_order as i64) << OP_BITS)
                | op_order as i64,
        ))
    }

    /// TOID of a ledger.
    pub fn ledger(ledger_seq: u32) -> Result<Self> {
        Self::new(ledger_seq, 0, 0)
    }

    /// TOID of a transaction (1-based `tx_order`).
    pub fn transaction(ledger_seq: u32, tx_order: u32) -> Result<Self> {
        Self::new(ledger_seq, tx_order, 0)
    }

    /// Wrap an already packed value.
    pub fn from_raw(raw: i64) -> Result<Self> {
        if raw < 0 {
            return Err(Error::InvalidData(format!("negative TOID {raw}")));
        }
        Ok(Self(raw))
    }

    /// TOID of the `op_order`-th (1-based) operation of this transaction.
    pub fn operation(self, op_order: u32) -> Result<Self> {
        Self::new(self.ledger_seq(), self.tx_order(), op_order)
    }

    pub fn raw(self) -> i64 {
        self.0
    }

    pub fn ledger_seq(self) -> u32 {
        (self.0 >> LEDGER_BITS) as u32
    }

    pub fn tx_order(self) -> u32 {
        ((self.0 >> OP_BITS) as u32) & MAX_TX_ORDER
    }

    pub fn op_order(self) -> u32 {
        (self.0 as u32) & MAX_OP_ORDER
    }
}

impl fmt::Display for Toid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Toid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Toid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Toid::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier of one emitted contract event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId {
    /// TOID of the operation that emitted the event.
    pub operation: Toid,
    /// 1-based position among the events emitted by that operation.
    pub order: u32,
}

impl EventId {
    pub fn new(operation: Toid, order: u32) -> Self {
        Self { operation, order }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:019}-{:010}", self.operation.raw(), self.order)
    }
}

impl FromStr for EventId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("malformed event id {s:?}"));
        let (op, order) = s.split_once('-').ok_or_else(invalid)?;
        if op.len() != 19 || order.len() != 10 {
            return Err(invalid());
        }
        let op: i64 = op.parse().map_err(|_| invalid())?;
        let order: u32 = order.parse().map_err(|_| invalid())?;
        Ok(Self::new(Toid::from_raw(op)?, order))
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
