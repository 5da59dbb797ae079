//! Assembly of ledger-close records from `LedgerCloseMeta`.
//!
//! A `LedgerCloseMeta` keeps envelopes in the transaction set (hash order or
//! phase order) and results in `tx_processing` (apply order). The two are
//! joined here by transaction hash, which is network-bound, so the network id
//! is needed to build a record.

use std::collections::HashMap;

use henyey_common::{Error, Hash256, NetworkId, Result};
use stellar_xdr::curr as xdr;
use tracing::{debug, warn};

use crate::transaction::transaction_hash;

/// One applied transaction, still in protocol form.
#[derive(Debug, Clone)]
pub struct TransactionCloseRecord {
    pub envelope: xdr::TransactionEnvelope,
    pub result: xdr::TransactionResultPair,
    pub fee_changes: xdr::LedgerEntryChanges,
    /// Refund changes applied after all transactions. Only present for
    /// `LedgerCloseMeta` V2.
    pub post_apply_fee_changes: Option<xdr::LedgerEntryChanges>,
    pub meta: xdr::TransactionMeta,
}

/// A closed ledger: its header and its transactions in apply order.
#[derive(Debug, Clone)]
pub struct LedgerCloseRecord {
    pub header: xdr::LedgerHeaderHistoryEntry,
    pub transactions: Vec<TransactionCloseRecord>,
}

/// Result side of one `tx_processing` entry, independent of the meta version.
struct Processing<'a> {
    result: &'a xdr::TransactionResultPair,
    fee_changes: &'a xdr::LedgerEntryChanges,
    post_apply_fee_changes: Option<&'a xdr::LedgerEntryChanges>,
    meta: &'a xdr::TransactionMeta,
}

impl LedgerCloseRecord {
    /// Build a record from any version of `LedgerCloseMeta`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when a result's transaction hash matches
    /// no envelope of the transaction set, and [`Error::Xdr`] when an
    /// envelope cannot be hashed.
    pub fn from_ledger_close_meta(meta: &xdr::LedgerCloseMeta, network_id: &NetworkId) -> Result<Self> {
        let (header, envelopes, processing): (_, Vec<&xdr::TransactionEnvelope>, Vec<Processing<'_>>) =
            match meta {
                xdr::LedgerCloseMeta::V0(v0) => (
                    &v0.ledger_header,
                    v0.tx_set.txs.iter().collect(),
                    v0.tx_processing.iter().map(Processing::from_v0).collect(),
                ),
                xdr::LedgerCloseMeta::V1(v1) => (
                    &v1.ledger_header,
                    generalized_transactions(&v1.tx_set),
                    v1.tx_processing.iter().map(Processing::from_v0).collect(),
                ),
                xdr::LedgerCloseMeta::V2(v2) => (
                    &v2.ledger_header,
                    generalized_transactions(&v2.tx_set),
                    v2.tx_processing.iter().map(Processing::from_v1).collect(),
                ),
            };

        let ledger_seq = header.header.ledger_seq;
        let transactions = pair_transactions(ledger_seq, &envelopes, processing, network_id)?;
        debug!(
            ledger_seq,
            envelopes = envelopes.len(),
            transactions = transactions.len(),
            "Assembled ledger close record"
        );
        Ok(Self {
            header: header.clone(),
            transactions,
        })
    }

    pub fn ledger_seq(&self) -> u32 {
        self.header.header.ledger_seq
    }
}

impl<'a> Processing<'a> {
    fn from_v0(p: &'a xdr::TransactionResultMeta) -> Self {
        Self {
            result: &p.result,
            fee_changes: &p.fee_processing,
            post_apply_fee_changes: None,
            meta: &p.tx_apply_processing,
        }
    }

    fn from_v1(p: &'a xdr::TransactionResultMetaV1) -> Self {
        Self {
            result: &p.result,
            fee_changes: &p.fee_processing,
            post_apply_fee_changes: Some(&p.post_tx_apply_fee_processing),
            meta: &p.tx_apply_processing,
        }
    }
}

/// Envelopes of a generalized set, in phase, stage and cluster order.
fn generalized_transactions(set: &xdr::GeneralizedTransactionSet) -> Vec<&xdr::TransactionEnvelope> {
    let xdr::GeneralizedTransactionSet::V1(set_v1) = set;
    let mut txs = Vec::new();
    for phase in set_v1.phases.iter() {
        match phase {
            xdr::TransactionPhase::V0(components) => {
                for component in components.iter() {
                    match component {
                        xdr::TxSetComponent::TxsetCompTxsMaybeDiscountedFee(c) => {
                            txs.extend(c.txs.iter());
                        }
                    }
                }
            }
            xdr::TransactionPhase::V1(parallel) => {
                for stage in parallel.execution_stages.iter() {
                    for cluster in stage.iter() {
                        txs.extend(cluster.0.iter());
                    }
                }
            }
        }
    }
    txs
}

/// Join results with envelopes.
///
/// The common case is a set whose envelopes already line up with the apply
/// order; only when a position disagrees is a hash index built.
fn pair_transactions(
    ledger_seq: u32,
    envelopes: &[&xdr::TransactionEnvelope],
    processing: Vec<Processing<'_>>,
    network_id: &NetworkId,
) -> Result<Vec<TransactionCloseRecord>> {
    let hashes = envelopes
        .iter()
        .map(|env| transaction_hash(env, network_id))
        .collect::<Result<Vec<_>>>()?;
    let mut by_hash: Option<HashMap<Hash256, usize>> = None;

    let mut transactions = Vec::with_capacity(processing.len());
    for (index, p) in processing.into_iter().enumerate() {
        let wanted = Hash256::from(&p.result.transaction_hash);
        let position = if hashes.get(index) == Some(&wanted) {
            Some(index)
        } else {
            let index_map = by_hash.get_or_insert_with(|| {
                warn!(
                    ledger_seq,
                    first_mismatch = index,
                    "Transaction set order differs from apply order; pairing by hash"
                );
                hashes.iter().enumerate().map(|(i, h)| (*h, i)).collect()
            });
            index_map.get(&wanted).copied()
        };
        let Some(position) = position else {
            return Err(Error::NotFound(format!(
                "envelope for transaction {wanted} in ledger {ledger_seq}"
            )));
        };

        transactions.push(TransactionCloseRecord {
            envelope: envelopes[position].clone(),
            result: p.result.clone(),
            fee_changes: p.fee_changes.clone(),
            post_apply_fee_changes: p.post_apply_fee_changes.cloned(),
            meta: p.meta.clone(),
        });
    }
    Ok(transactions)
}
