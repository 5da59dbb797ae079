//! Network configuration settings.

use henyey_model as model;
use stellar_xdr::curr as xdr;

pub fn convert_config_setting_id(id: xdr::ConfigSettingId) -> model::ConfigSettingId {
    use model::ConfigSettingId as M;
    use xdr::ConfigSettingId as X;
    match id {
        X::ContractMaxSizeBytes => M::ContractMaxSizeBytes,
        X::ContractComputeV0 => M::ContractComputeV0,
        X::ContractLedgerCostV0 => M::ContractLedgerCostV0,
        X::ContractHistoricalDataV0 => M::ContractHistoricalDataV0,
        X::ContractEventsV0 => M::ContractEventsV0,
        X::ContractBandwidthV0 => M::ContractBandwidthV0,
        X::ContractCostParamsCpuInstructions => M::ContractCostParamsCpuInstructions,
        X::ContractCostParamsMemoryBytes => M::ContractCostParamsMemoryBytes,
        X::ContractDataKeySizeBytes => M::ContractDataKeySizeBytes,
        X::ContractDataEntrySizeBytes => M::ContractDataEntrySizeBytes,
        X::StateArchival => M::StateArchival,
        X::ContractExecutionLanes => M::ContractExecutionLanes,
        X::LiveSorobanStateSizeWindow => M::LiveSorobanStateSizeWindow,
        X::EvictionIterator => M::EvictionIterator,
        X::ContractParallelComputeV0 => M::ContractParallelComputeV0,
        X::ContractLedgerCostExtV0 => M::ContractLedgerCostExtV0,
        X::ScpTiming => M::ScpTiming,
    }
}

fn cost_params(params: &xdr::ContractCostParams) -> Vec<model::ContractCostParamEntry> {
    params
        .0
        .iter()
        .map(|p| model::ContractCostParamEntry {
            const_term: p.const_term,
            linear_term: p.linear_term,
        })
        .collect()
}

/// Convert one configuration setting, widening the 32-bit fields to `i64`.
pub fn convert_config_setting(entry: &xdr::ConfigSettingEntry) -> model::ConfigSettingEntry {
    use model::ConfigSettingEntry as M;
    use xdr::ConfigSettingEntry as X;

    match entry {
        X::ContractMaxSizeBytes(v) => M::ContractMaxSizeBytes(i64::from(*v)),
        X::ContractComputeV0(c) => M::ContractComputeV0 {
            ledger_max_instructions: i64::from(c.ledger_max_instructions),
            tx_max_instructions: i64::from(c.tx_max_instructions),
            fee_rate_per_instructions_increment: i64::from(c.fee_rate_per_instructions_increment),
            tx_memory_limit: i64::from(c.tx_memory_limit),
        },
        X::ContractLedgerCostV0(c) => M::ContractLedgerCostV0 {
            ledger_max_disk_read_entries: i64::from(c.ledger_max_disk_read_entries),
            ledger_max_disk_read_bytes: i64::from(c.ledger_max_disk_read_bytes),
            ledger_max_write_ledger_entries: i64::from(c.ledger_max_write_ledger_entries),
            ledger_max_write_bytes: i64::from(c.ledger_max_write_bytes),
            tx_max_disk_read_entries: i64::from(c.tx_max_disk_read_entries),
            tx_max_disk_read_bytes: i64::from(c.tx_max_disk_read_bytes),
            tx_max_write_ledger_entries: i64::from(c.tx_max_write_ledger_entries),
            tx_max_write_bytes: i64::from(c.tx_max_write_bytes),
            fee_disk_read_ledger_entry: i64::from(c.fee_disk_read_ledger_entry),
            fee_write_ledger_entry: i64::from(c.fee_write_ledger_entry),
            fee_disk_read_1kb: i64::from(c.fee_disk_read1_kb),
            soroban_state_target_size_bytes: i64::from(c.soroban_state_target_size_bytes),
            rent_fee_1kb_soroban_state_size_low: i64::from(c.rent_fee1_kb_soroban_state_size_low),
            rent_fee_1kb_soroban_state_size_high: i64::from(c.rent_fee1_kb_soroban_state_size_high),
            soroban_state_rent_fee_growth_factor: i64::from(c.soroban_state_rent_fee_growth_factor),
        },
        X::ContractHistoricalDataV0(c) => M::ContractHistoricalDataV0 {
            fee_historical_1kb: i64::from(c.fee_historical1_kb),
        },
        X::ContractEventsV0(c) => M::ContractEventsV0 {
            tx_max_contract_events_size_bytes: i64::from(c.tx_max_contract_events_size_bytes),
            fee_contract_events_1kb: i64::from(c.fee_contract_events1_kb),
        },
        X::ContractBandwidthV0(c) => M::ContractBandwidthV0 {
            ledger_max_txs_size_bytes: i64::from(c.ledger_max_txs_size_bytes),
            tx_max_size_bytes: i64::from(c.tx_max_size_bytes),
            fee_tx_size_1kb: i64::from(c.fee_tx_size1_kb),
        },
        X::ContractCostParamsCpuInstructions(p) => M::ContractCostParamsCpuInstructions(cost_params(p)),
        X::ContractCostParamsMemoryBytes(p) => M::ContractCostParamsMemoryBytes(cost_params(p)),
        X::ContractDataKeySizeBytes(v) => {
            M::ContractDataKeySizeBytes(i64::from(*v))
        }
        X::ContractDataEntrySizeBytes(v) => {
            M::ContractDataEntrySizeBytes(i64::from(*v))
        }
        X::StateArchival(s) => M::StateArchival {
            max_entry_ttl: i64::from(s.max_entry_ttl),
            min_persistent_ttl: i64::from(s.min_persistent_ttl),
            min_temporary_ttl: i64::from(s.min_temporary_ttl),
            persistent_rent_rate_denominator: i64::from(s.persistent_rent_rate_denominator),
            temp_rent_rate_denominator: i64::from(s.temp_rent_rate_denominator),
            max_entries_to_archive: i64::from(s.max_entries_to_archive),
            live_soroban_state_size_window_sample_size: i64::from(s.live_soroban_state_size_window_sample_size),
            live_soroban_state_size_window_sample_period: i64::from(s.live_soroban_state_size_window_sample_period),
            eviction_scan_size: i64::from(s.eviction_scan_size),
            starting_eviction_scan_level: i64::from(s.starting_eviction_scan_level),
        },
        X::ContractExecutionLanes(c) => M::ContractExecutionLanes {
            ledger_max_tx_count: i64::from(c.ledger_max_tx_count),
        },
        X::LiveSorobanStateSizeWindow(window) => M::LiveSorobanStateSizeWindow(window.to_vec()),
        X::EvictionIterator(it) => M::EvictionIterator {
            bucket_list_level: i64::from(it.bucket_list_level),
            is_curr_bucket: it.is_curr_bucket,
            bucket_file_offset: it.bucket_file_offset,
        },
        X::ContractParallelComputeV0(c) => M::ContractParallelComputeV0 {
            ledger_max_dependent_tx_clusters: i64::from(c.ledger_max_dependent_tx_clusters),
        },
        X::ContractLedgerCostExtV0(c) => M::ContractLedgerCostExtV0 {
            tx_max_footprint_entries: i64::from(c.tx_max_footprint_entries),
            fee_write_1kb: i64::from(c.fee_write1_kb),
        },
        X::ScpTiming(t) => M::ScpTiming {
            ledger_target_close_time_milliseconds: i64::from(t.ledger_target_close_time_milliseconds),
            nomination_timeout_initial_milliseconds: i64::from(t.nomination_timeout_initial_milliseconds),
            nomination_timeout_increment_milliseconds: i64::from(t.nomination_timeout_increment_milliseconds),
            ballot_timeout_initial_milliseconds: i64::from(t.ballot_timeout_initial_milliseconds),
            ballot_timeout_increment_milliseconds: i64::from(t.ballot_timeout_increment_milliseconds),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_settings_widen() {
        let entry = xdr::ConfigSettingEntry::ContractMaxSizeBytes(65_536);
        assert_eq!(
            convert_config_setting(&entry),
            model::ConfigSettingEntry::ContractMaxSizeBytes(65_536)
        );
    }

    #[test]
    fn test_historical_fee() {
        let entry = xdr::ConfigSettingEntry::ContractHistoricalDataV0(
            xdr::ConfigSettingContractHistoricalDataV0 {
                fee_historical1_kb: 100,
            },
        );
        assert_eq!(
            convert_config_setting(&entry),
            model::ConfigSettingEntry::ContractHistoricalDataV0 {
                fee_historical_1kb: 100
            }
        );
    }

    #[test]
    fn test_window_is_copied() {
        let entry = xdr::ConfigSettingEntry::LiveSorobanStateSizeWindow(
            vec![1u64, 2, 3].try_into().unwrap(),
        );
        assert_eq!(
            convert_config_setting(&entry),
            model::ConfigSettingEntry::LiveSorobanStateSizeWindow(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_ids_map_one_to_one() {
        assert_eq!(
            convert_config_setting_id(xdr::ConfigSettingId::ScpTiming),
            model::ConfigSettingId::ScpTiming
        );
        assert_eq!(
            convert_config_setting_id(xdr::ConfigSettingId::StateArchival),
            model::ConfigSettingId::StateArchival
        );
    }
}
