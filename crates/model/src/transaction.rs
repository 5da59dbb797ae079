//! Transaction envelopes and per-transaction records.

use henyey_common::{Hash256, Toid};
use serde::{Deserialize, Serialize};

use crate::asset::SignerKey;
use crate::entry::LedgerEntryChange;
use crate::event::{ContractEvent, DiagnosticEvent, TransactionEvent};
use crate::operation::Operation;
use crate::result::{OperationResult, TransactionResult};
use crate::scval::ScVal;
use crate::soroban::SorobanTransactionData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TransactionEnvelope {
    TxV0(SignedTransaction),
    Tx(SignedTransaction),
    TxFeeBump(FeeBumpEnvelope),
}

impl TransactionEnvelope {
    /// The transaction whose operations are applied.
    pub fn inner(&self) -> &SignedTransaction {
        match self {
            TransactionEnvelope::TxV0(e) | TransactionEnvelope::Tx(e) => e,
            TransactionEnvelope::TxFeeBump(e) => &e.inner_tx,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.inner().tx.operations
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpEnvelope {
    pub fee_source: String,
    pub fee: i64,
    pub inner_tx: SignedTransaction,
    pub signatures: Vec<DecoratedSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    /// Hex-encoded 4-byte hint.
    pub hint: String,
    /// Hex-encoded signature.
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: String,
    pub fee: u32,
    pub seq_num: i64,
    pub preconditions: Preconditions,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    pub soroban_data: Option<SorobanTransactionData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Preconditions {
    None,
    Time(TimeBounds),
    V2(PreconditionsV2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_seq_num: Option<i64>,
    pub min_seq_age: u64,
    pub min_seq_ledger_gap: u32,
    pub extra_signers: Vec<SignerKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Memo {
    None,
    Text(String),
    Id(u64),
    Hash(Hash256),
    Return(Hash256),
}

/// One applied transaction with everything the ledger recorded about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: Hash256,
    /// 1-based position in the ledger's apply order.
    pub application_order: u32,
    pub toid: Toid,
    pub successful: bool,
    pub envelope: TransactionEnvelope,
    pub result: TransactionResult,
    /// Changes from charging the fee; `None` when ledger changes are not
    /// included in the output.
    pub fee_changes: Option<Vec<LedgerEntryChange>>,
    /// Changes from refunds applied after the transaction.
    pub post_apply_fee_changes: Option<Vec<LedgerEntryChange>>,
    pub meta: TransactionMeta,
    pub operations: Vec<OperationRecord>,
}

/// Transaction-level part of the apply metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMeta {
    pub version: u32,
    pub tx_changes_before: Option<Vec<LedgerEntryChange>>,
    pub tx_changes_after: Option<Vec<LedgerEntryChange>>,
    pub tx_events: Vec<TransactionEvent>,
    pub diagnostic_events: Vec<DiagnosticEvent>,
    pub soroban: Option<SorobanMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorobanMeta {
    pub return_value: Option<ScVal>,
    pub fees: Option<SorobanFees>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SorobanFees {
    pub total_non_refundable_resource_fee_charged: i64,
    pub total_refundable_resource_fee_charged: i64,
    pub rent_fee_charged: i64,
}

/// Per-operation view joining the operation's result, changes and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub toid: Toid,
    /// 1-based position in the transaction.
    pub application_order: u32,
    pub result: Option<OperationResult>,
    pub changes: Option<Vec<LedgerEntryChange>>,
    pub events: Vec<ContractEvent>,
}
