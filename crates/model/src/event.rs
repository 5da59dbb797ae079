//! Contract events and decoded asset-standard events.

use henyey_common::{EventId, Int128};
use serde::{Deserialize, Serialize};

use crate::scval::ScVal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractEventType {
    System,
    Contract,
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Assigned to events emitted by operations of applied transactions.
    pub id: Option<EventId>,
    pub contract_id: Option<String>,
    pub event_type: ContractEventType,
    pub topics: Vec<ScVal>,
    pub data: ScVal,
    pub asset_event: Option<AssetEvent>,
}

/// A recognized asset-standard event with its decoded fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEvent {
    pub event: AssetStandardEvent,
    /// SEP-11 asset named by the last topic, when it names one.
    pub asset: Option<String>,
    /// Whether the emitting contract is the Stellar asset contract of `asset`.
    pub stellar_asset_contract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AssetStandardEvent {
    Transfer {
        from: String,
        to: String,
        amount: Int128,
    },
    Mint {
        admin: String,
        to: String,
        amount: Int128,
    },
    Clawback {
        admin: String,
        from: String,
        amount: Int128,
    },
    Burn {
        from: String,
        amount: Int128,
    },
}

impl AssetStandardEvent {
    pub fn amount(&self) -> Int128 {
        match self {
            AssetStandardEvent::Transfer { amount, .. }
            | AssetStandardEvent::Mint { amount, .. }
            | AssetStandardEvent::Clawback { amount, .. }
            | AssetStandardEvent::Burn { amount, .. } => *amount,
        }
    }

    /// Wire name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            AssetStandardEvent::Transfer { .. } => "transfer",
            AssetStandardEvent::Mint { .. } => "mint",
            AssetStandardEvent::Clawback { .. } => "clawback",
            AssetStandardEvent::Burn { .. } => "burn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub in_successful_contract_call: bool,
    pub event: ContractEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionEventStage {
    BeforeAllTxs,
    AfterTx,
    AfterAllTxs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub stage: TransactionEventStage,
    pub event: ContractEvent,
}
