//! Ledger-level records.

use henyey_common::Hash256;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionRecord;

/// Summary of one closed ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub hash: Hash256,
    pub previous_hash: Hash256,
    pub sequence: u32,
    pub transaction_count: u32,
    pub successful_transaction_count: u32,
    pub failed_transaction_count: u32,
    /// Operations in all transactions of the ledger.
    pub operation_count: u32,
    /// Operations in successful transactions.
    pub successful_operation_count: u32,
    pub protocol_version: u32,
    /// Close time in seconds since the Unix epoch.
    pub close_time: u64,
    pub base_fee: u32,
    pub base_reserve: u32,
    pub max_tx_set_size: u32,
    pub total_coins: i64,
    pub fee_pool: i64,
    pub upgrades: Vec<LedgerUpgrade>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LedgerUpgrade {
    Version(u32),
    BaseFee(u32),
    MaxTxSetSize(u32),
    BaseReserve(u32),
    Flags(u32),
    Config {
        contract_id: String,
        content_hash: Hash256,
    },
    MaxSorobanTxSetSize(u32),
}

/// A fully converted ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub summary: LedgerSummary,
    pub transactions: Vec<TransactionRecord>,
}
