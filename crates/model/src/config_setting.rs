//! Network configuration settings stored in the ledger.
//!
//! Numeric settings are widened to `i64` so that the output schema does not
//! change when the protocol widens a field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSettingId {
    ContractMaxSizeBytes,
    ContractComputeV0,
    ContractLedgerCostV0,
    ContractHistoricalDataV0,
    ContractEventsV0,
    ContractBandwidthV0,
    ContractCostParamsCpuInstructions,
    ContractCostParamsMemoryBytes,
    ContractDataKeySizeBytes,
    ContractDataEntrySizeBytes,
    StateArchival,
    ContractExecutionLanes,
    LiveSorobanStateSizeWindow,
    EvictionIterator,
    ContractParallelComputeV0,
    ContractLedgerCostExtV0,
    ScpTiming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ConfigSettingEntry {
    ContractMaxSizeBytes(i64),
    ContractComputeV0 {
        ledger_max_instructions: i64,
        tx_max_instructions: i64,
        fee_rate_per_instructions_increment: i64,
        tx_memory_limit: i64,
    },
    ContractLedgerCostV0 {
        ledger_max_disk_read_entries: i64,
        ledger_max_disk_read_bytes: i64,
        ledger_max_write_ledger_entries: i64,
        ledger_max_write_bytes: i64,
        tx_max_disk_read_entries: i64,
        tx_max_disk_read_bytes: i64,
        tx_max_write_ledger_entries: i64,
        tx_max_write_bytes: i64,
        fee_disk_read_ledger_entry: i64,
        fee_write_ledger_entry: i64,
        fee_disk_read_1kb: i64,
        soroban_state_target_size_bytes: i64,
        rent_fee_1kb_soroban_state_size_low: i64,
        rent_fee_1kb_soroban_state_size_high: i64,
        soroban_state_rent_fee_growth_factor: i64,
    },
    ContractHistoricalDataV0 {
        fee_historical_1kb: i64,
    },
    ContractEventsV0 {
        tx_max_contract_events_size_bytes: i64,
        fee_contract_events_1kb: i64,
    },
    ContractBandwidthV0 {
        ledger_max_txs_size_bytes: i64,
        tx_max_size_bytes: i64,
        fee_tx_size_1kb: i64,
    },
    ContractCostParamsCpuInstructions(Vec<ContractCostParamEntry>),
    ContractCostParamsMemoryBytes(Vec<ContractCostParamEntry>),
    ContractDataKeySizeBytes(i64),
    ContractDataEntrySizeBytes(i64),
    StateArchival {
        max_entry_ttl: i64,
        min_persistent_ttl: i64,
        min_temporary_ttl: i64,
        persistent_rent_rate_denominator: i64,
        temp_rent_rate_denominator: i64,
        max_entries_to_archive: i64,
        live_soroban_state_size_window_sample_size: i64,
        live_soroban_state_size_window_sample_period: i64,
        eviction_scan_size: i64,
        starting_eviction_scan_level: i64,
    },
    ContractExecutionLanes {
        ledger_max_tx_count: i64,
    },
    LiveSorobanStateSizeWindow(Vec<u64>),
    EvictionIterator {
        bucket_list_level: i64,
        is_curr_bucket: bool,
        bucket_file_offset: u64,
    },
    ContractParallelComputeV0 {
        ledger_max_dependent_tx_clusters: i64,
    },
    ContractLedgerCostExtV0 {
        tx_max_footprint_entries: i64,
        fee_write_1kb: i64,
    },
    ScpTiming {
        ledger_target_close_time_milliseconds: i64,
        nomination_timeout_initial_milliseconds: i64,
        nomination_timeout_increment_milliseconds: i64,
        ballot_timeout_initial_milliseconds: i64,
        ballot_timeout_increment_milliseconds: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCostParamEntry {
    pub const_term: i64,
    pub linear_term: i64,
}
