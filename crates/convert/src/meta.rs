//! Transaction metadata: ledger changes, events and Soroban fee data.
//!
//! Operation events come from different places depending on the meta
//! version:
//!
//! | Version | Operation events |
//! |---------|------------------|
//! | V0-V2   | none |
//! | V3      | `soroban_meta.events`, or `soroban_meta.diagnostic_events` when configured, attributed to the single Soroban operation |
//! | V4      | `operations[i].events` |

use henyey_common::{Result, Toid};
use henyey_model as model;
use stellar_xdr::curr as xdr;
use tracing::trace;

use crate::entry::convert_changes;
use crate::event::{convert_diagnostic_event, convert_transaction_event, operation_events};
use crate::options::ConvertOptions;
use crate::scval::convert_sc_val;

/// Per-operation part of converted metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMeta {
    pub changes: Option<Vec<model::LedgerEntryChange>>,
    pub events: Vec<model::ContractEvent>,
}

/// Metadata of one transaction, split into its transaction-level part and
/// one entry per operation present in the meta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedMeta {
    pub meta: model::TransactionMeta,
    pub operations: Vec<OperationMeta>,
}

/// Convert `meta` of the transaction at `transaction`.
///
/// Operation events are harvested, and so receive identifiers, only when
/// `successful` is set.
pub fn convert_transaction_meta(
    meta: &xdr::TransactionMeta,
    transaction: Toid,
    successful: bool,
    options: &ConvertOptions,
) -> Result<ConvertedMeta> {
    let changes = |c: &xdr::LedgerEntryChanges| {
        options
            .include_ledger_changes
            .then(|| convert_changes(c.0.as_slice()))
    };
    let classic_operations = |ops: &[xdr::OperationMeta]| -> Vec<OperationMeta> {
        ops.iter()
            .map(|op| OperationMeta {
                changes: changes(&op.changes),
                events: Vec::new(),
            })
            .collect()
    };

    let mut converted = ConvertedMeta {
        meta: model::TransactionMeta {
            version: meta_version(meta),
            tx_changes_before: None,
            tx_changes_after: None,
            tx_events: Vec::new(),
            diagnostic_events: Vec::new(),
            soroban: None,
        },
        operations: Vec::new(),
    };

    match meta {
        xdr::TransactionMeta::V0(ops) => {
            converted.operations = classic_operations(ops.as_slice());
        }
        xdr::TransactionMeta::V1(v1) => {
            converted.meta.tx_changes_before = changes(&v1.tx_changes);
            converted.operations = classic_operations(v1.operations.as_slice());
        }
        xdr::TransactionMeta::V2(v2) => {
            converted.meta.tx_changes_before = changes(&v2.tx_changes_before);
            converted.meta.tx_changes_after = changes(&v2.tx_changes_after);
            converted.operations = classic_operations(v2.operations.as_slice());
        }
        xdr::TransactionMeta::V3(v3) => {
            converted.meta.tx_changes_before = changes(&v3.tx_changes_before);
            converted.meta.tx_changes_after = changes(&v3.tx_changes_after);
            converted.operations = classic_operations(v3.operations.as_slice());

            if let Some(soroban) = &v3.soroban_meta {
                let op = transaction.operation(1)?;
                let harvest = options.harvest_options();
                let events = if options.use_diagnostic_events {
                    operation_events(op, soroban.diagnostic_events.iter(), successful, &harvest)
                } else {
                    operation_events(op, soroban.events.iter(), successful, &harvest)
                };
                trace!(operation = %op, events = events.len(), "Converted V3 Soroban events");
                match converted.operations.first_mut() {
                    Some(first) => first.events = events,
                    None => converted.operations.push(OperationMeta {
                        changes: None,
                        events,
                    }),
                }

                if options.include_diagnostic_events {
                    converted.meta.diagnostic_events = soroban
                        .diagnostic_events
                        .iter()
                        .map(convert_diagnostic_event)
                        .collect();
                }
                converted.meta.soroban = Some(model::SorobanMeta {
                    return_value: Some(convert_sc_val(&soroban.return_value)),
                    fees: soroban_fees(&soroban.ext),
                });
            }
        }
        xdr::TransactionMeta::V4(v4) => {
            converted.meta.tx_changes_before = changes(&v4.tx_changes_before);
            converted.meta.tx_changes_after = changes(&v4.tx_changes_after);
            let harvest = options.harvest_options();
            converted.operations = v4
                .operations
                .iter()
                .enumerate()
                .map(|(index, op)| {
                    let toid = transaction.operation(index as u32 + 1)?;
                    Ok(OperationMeta {
                        changes: changes(&op.changes),
                        events: operation_events(toid, op.events.iter(), successful, &harvest),
                    })
                })
                .collect::<Result<_>>()?;

            converted.meta.tx_events = v4.events.iter().map(convert_transaction_event).collect();
            if options.include_diagnostic_events {
                converted.meta.diagnostic_events =
                    v4.diagnostic_events.iter().map(convert_diagnostic_event).collect();
            }
            if let Some(soroban) = &v4.soroban_meta {
                converted.meta.soroban = Some(model::SorobanMeta {
                    return_value: soroban.return_value.as_ref().map(convert_sc_val),
                    fees: soroban_fees(&soroban.ext),
                });
            }
        }
    }
    Ok(converted)
}

fn meta_version(meta: &xdr::TransactionMeta) -> u32 {
    match meta {
        xdr::TransactionMeta::V0(_) => 0,
        xdr::TransactionMeta::V1(_) => 1,
        xdr::TransactionMeta::V2(_) => 2,
        xdr::TransactionMeta::V3(_) => 3,
        xdr::TransactionMeta::V4(_) => 4,
    }
}

fn soroban_fees(ext: &xdr::SorobanTransactionMetaExt) -> Option<model::SorobanFees> {
    match ext {
        xdr::SorobanTransactionMetaExt::V0 => None,
        xdr::SorobanTransactionMetaExt::V1(v1) => Some(model::SorobanFees {
            total_non_refundable_resource_fee_charged: v1.total_non_refundable_resource_fee_charged,
            total_refundable_resource_fee_charged: v1.total_refundable_resource_fee_charged,
            rent_fee_charged: v1.rent_fee_charged,
        }),
    }
}
