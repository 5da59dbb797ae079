//! Ledger entries, ledger keys and entry changes.
//!
//! Extension chains of the protocol (`AccountEntry` V1/V2/V3, `TrustLineEntry`
//! V1/V2, ...) are flattened into optional fields. A field is `None` when the
//! entry's extension version predates it.

use henyey_common::Hash256;
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, Claimant, Liabilities, LiquidityPoolParameters, Price, Signer, TrustLineAsset};
use crate::config_setting::{ConfigSettingEntry, ConfigSettingId};
use crate::scval::{ScAddress, ScVal};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LedgerEntryChange {
    Created(LedgerEntry),
    Updated(LedgerEntry),
    Removed(LedgerKey),
    State(LedgerEntry),
    Restored(LedgerEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub last_modified_ledger_seq: u32,
    /// Account sponsoring this entry's reserve, if any.
    pub sponsor: Option<String>,
    pub data: LedgerEntryData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LedgerEntryData {
    Account(AccountEntry),
    Trustline(TrustLineEntry),
    Offer(OfferEntry),
    Data(DataEntry),
    ClaimableBalance(ClaimableBalanceEntry),
    LiquidityPool(LiquidityPoolEntry),
    ContractData(ContractDataEntry),
    ContractCode(ContractCodeEntry),
    ConfigSetting(ConfigSettingEntry),
    Ttl(TtlEntry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub master_weight: u8,
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account_id: String,
    pub balance: i64,
    pub seq_num: i64,
    pub num_sub_entries: u32,
    pub inflation_dest: Option<String>,
    pub flags: u32,
    pub home_domain: String,
    pub thresholds: Thresholds,
    pub signers: Vec<Signer>,
    pub liabilities: Option<Liabilities>,
    pub num_sponsored: Option<u32>,
    pub num_sponsoring: Option<u32>,
    /// Sponsor of each signer, parallel to `signers`.
    pub signer_sponsoring_ids: Option<Vec<Option<String>>>,
    pub seq_ledger: Option<u32>,
    pub seq_time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustLineEntry {
    pub account_id: String,
    pub asset: TrustLineAsset,
    pub balance: i64,
    pub limit: i64,
    pub flags: u32,
    pub liabilities: Option<Liabilities>,
    pub liquidity_pool_use_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferEntry {
    pub seller_id: String,
    pub offer_id: i64,
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    pub flags: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub account_id: String,
    pub data_name: String,
    /// Hex-encoded value.
    pub data_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimableBalanceEntry {
    pub balance_id: String,
    pub claimants: Vec<Claimant>,
    pub asset: Asset,
    pub amount: i64,
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPoolEntry {
    pub liquidity_pool_id: String,
    pub body: LiquidityPoolBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LiquidityPoolBody {
    ConstantProduct(ConstantProductPool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductPool {
    pub params: LiquidityPoolParameters,
    pub reserve_a: i64,
    pub reserve_b: i64,
    pub total_pool_shares: i64,
    pub pool_shares_trust_line_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractDataDurability {
    Temporary,
    Persistent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDataEntry {
    pub contract: ScAddress,
    pub key: ScVal,
    pub durability: ContractDataDurability,
    pub val: ScVal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCodeEntry {
    pub hash: Hash256,
    /// Hex-encoded Wasm module.
    pub code: String,
    pub cost_inputs: Option<ContractCodeCostInputs>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCodeCostInputs {
    pub n_instructions: u32,
    pub n_functions: u32,
    pub n_globals: u32,
    pub n_table_entries: u32,
    pub n_types: u32,
    pub n_data_segments: u32,
    pub n_elem_segments: u32,
    pub n_imports: u32,
    pub n_exports: u32,
    pub n_data_segment_bytes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlEntry {
    pub key_hash: Hash256,
    pub live_until_ledger_seq: u32,
}

/// Key identifying one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LedgerKey {
    Account {
        account_id: String,
    },
    Trustline {
        account_id: String,
        asset: TrustLineAsset,
    },
    Offer {
        seller_id: String,
        offer_id: i64,
    },
    Data {
        account_id: String,
        data_name: String,
    },
    ClaimableBalance {
        balance_id: String,
    },
    LiquidityPool {
        liquidity_pool_id: String,
    },
    ContractData {
        contract: ScAddress,
        key: ScVal,
        durability: ContractDataDurability,
    },
    ContractCode {
        hash: Hash256,
    },
    ConfigSetting {
        config_setting_id: ConfigSettingId,
    },
    Ttl {
        key_hash: Hash256,
    },
}
