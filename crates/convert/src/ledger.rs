//! Ledger and transaction records.

use henyey_common::strkey::contract_id_to_strkey;
use henyey_common::{Error, Hash256, Result, Toid};
use henyey_model as model;
use stellar_xdr::curr::{self as xdr, Limits, ReadXdr};
use tracing::debug;

use crate::entry::convert_changes;
use crate::meta::{convert_transaction_meta, OperationMeta};
use crate::options::ConvertOptions;
use crate::record::{LedgerCloseRecord, TransactionCloseRecord};
use crate::result::convert_transaction_result;
use crate::transaction::{convert_envelope, envelope_operations};

/// Convert a closed ledger with all of its transactions.
///
/// Fails on the first transaction or upgrade that cannot be converted.
pub fn convert_ledger(record: &LedgerCloseRecord, options: &ConvertOptions) -> Result<model::LedgerRecord> {
    let header = &record.header.header;
    let ledger_seq = header.ledger_seq;

    let transactions = record
        .transactions
        .iter()
        .enumerate()
        .map(|(index, tx)| convert_transaction(tx, ledger_seq, index as u32 + 1, options))
        .collect::<Result<Vec<_>>>()?;

    let upgrades = header
        .scp_value
        .upgrades
        .iter()
        .map(convert_upgrade)
        .collect::<Result<Vec<_>>>()?;

    let successful = transactions.iter().filter(|tx| tx.successful).count() as u32;
    let operation_count: usize = transactions.iter().map(|tx| tx.operations.len()).sum();
    let successful_operation_count: usize = transactions
        .iter()
        .filter(|tx| tx.successful)
        .map(|tx| tx.operations.len())
        .sum();

    let summary = model::LedgerSummary {
        hash: Hash256::from(&record.header.hash),
        previous_hash: Hash256::from(&header.previous_ledger_hash),
        sequence: ledger_seq,
        transaction_count: transactions.len() as u32,
        successful_transaction_count: successful,
        failed_transaction_count: transactions.len() as u32 - successful,
        operation_count: operation_count as u32,
        successful_operation_count: successful_operation_count as u32,
        protocol_version: header.ledger_version,
        close_time: header.scp_value.close_time.0,
        base_fee: header.base_fee,
        base_reserve: header.base_reserve,
        max_tx_set_size: header.max_tx_set_size,
        total_coins: header.total_coins,
        fee_pool: header.fee_pool,
        upgrades,
    };
    debug!(
        ledger_seq,
        transactions = summary.transaction_count,
        failed = summary.failed_transaction_count,
        operations = summary.operation_count,
        "Converted ledger"
    );
    Ok(model::LedgerRecord {
        summary,
        transactions,
    })
}

/// Convert the transaction applied at `application_order` (1-based) in
/// ledger `ledger_seq`.
pub fn convert_transaction(
    tx: &TransactionCloseRecord,
    ledger_seq: u32,
    application_order: u32,
    options: &ConvertOptions,
) -> Result<model::TransactionRecord> {
    let toid = Toid::transaction(ledger_seq, application_order)?;
    let operations = envelope_operations(&tx.envelope);
    let result = convert_transaction_result(&tx.result.result, operations)?;
    let successful = result.is_success();
    let converted_meta = convert_transaction_meta(&tx.meta, toid, successful, options)?;

    let mut meta_ops = converted_meta.operations.into_iter();
    let operation_records = (0..operations.len())
        .map(|index| {
            let order = index as u32 + 1;
            let OperationMeta { changes, events } = meta_ops.next().unwrap_or_default();
            Ok(model::OperationRecord {
                toid: toid.operation(order)?,
                application_order: order,
                result: result
                    .effective_operation_results()
                    .and_then(|results| results.get(index))
                    .cloned(),
                changes,
                events,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let changes = |c: &xdr::LedgerEntryChanges| {
        options
            .include_ledger_changes
            .then(|| convert_changes(c.0.as_slice()))
    };
    let post_apply_fee_changes = match &tx.post_apply_fee_changes {
        Some(c) => changes(c),
        None => None,
    };

    let hash = Hash256::from(&tx.result.transaction_hash);
    debug!(
        %hash,
        %toid,
        successful,
        operations = operation_records.len(),
        "Converted transaction"
    );
    Ok(model::TransactionRecord {
        hash,
        application_order,
        toid,
        successful,
        envelope: convert_envelope(&tx.envelope),
        result,
        fee_changes: changes(&tx.fee_changes),
        post_apply_fee_changes,
        meta: converted_meta.meta,
        operations: operation_records,
    })
}

/// Decode one opaque upgrade from the header's SCP value.
fn convert_upgrade(upgrade: &xdr::UpgradeType) -> Result<model::LedgerUpgrade> {
    let bytes = upgrade.0.as_slice();
    let decoded = xdr::LedgerUpgrade::from_xdr(bytes, Limits::none())
        .map_err(|_| Error::unknown_variant("LedgerUpgrade", raw_discriminant(bytes)))?;
    Ok(match decoded {
        xdr::LedgerUpgrade::Version(v) => model::LedgerUpgrade::Version(v),
        xdr::LedgerUpgrade::BaseFee(fee) => model::LedgerUpgrade::BaseFee(fee),
        xdr::LedgerUpgrade::MaxTxSetSize(size) => model::LedgerUpgrade::MaxTxSetSize(size),
        xdr::LedgerUpgrade::BaseReserve(reserve) => model::LedgerUpgrade::BaseReserve(reserve),
        xdr::LedgerUpgrade::Flags(flags) => model::LedgerUpgrade::Flags(flags),
        xdr::LedgerUpgrade::Config(key) => model::LedgerUpgrade::Config {
            contract_id: contract_id_to_strkey(&key.contract_id),
            content_hash: Hash256::from(&key.content_hash),
        },
        xdr::LedgerUpgrade::MaxSorobanTxSetSize(size) => model::LedgerUpgrade::MaxSorobanTxSetSize(size),
    })
}

/// Leading big-endian discriminant of an XDR union, or -1 when the blob is
/// too short to carry one.
fn raw_discriminant(bytes: &[u8]) -> i32 {
    match bytes.get(..4) {
        Some(&[a, b, c, d]) => i32::from_be_bytes([a, b, c, d]),
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::WriteXdr;
    use xdr::UpgradeType;

    fn upgrade(value: &xdr::LedgerUpgrade) -> UpgradeType {
        UpgradeType(value.to_xdr(Limits::none()).unwrap().try_into().unwrap())
    }

    #[test]
    fn test_upgrades_decode() {
        assert_eq!(
            convert_upgrade(&upgrade(&xdr::LedgerUpgrade::BaseFee(200))).unwrap(),
            model::LedgerUpgrade::BaseFee(200)
        );
        let config = xdr::LedgerUpgrade::Config(xdr::ConfigUpgradeSetKey {
            contract_id: xdr::ContractId(xdr::Hash([3; 32])),
            content_hash: xdr::Hash([4; 32]),
        });
        match convert_upgrade(&upgrade(&config)).unwrap() {
            model::LedgerUpgrade::Config {
                contract_id,
                content_hash,
            } => {
                assert!(contract_id.starts_with('C'));
                assert_eq!(content_hash, Hash256::from([4; 32]));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_upgrade_discriminant() {
        let blob = UpgradeType(vec![0, 0, 0, 99, 0, 0, 0, 1].try_into().unwrap());
        let err = convert_upgrade(&blob).unwrap_err();
        match err {
            Error::UnknownVariant {
                container,
                discriminant,
            } => {
                assert_eq!(container, "LedgerUpgrade");
                assert_eq!(discriminant, 99);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_truncated_upgrade() {
        let blob = UpgradeType(vec![0, 0].try_into().unwrap());
        assert!(convert_upgrade(&blob).unwrap_err().is_unknown_variant());
    }
}
