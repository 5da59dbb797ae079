//! Transaction envelopes and transaction hashes.

use henyey_common::{Hash256, NetworkId, Result};
use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::codec::{convert_signer_key, muxed, string_lossy};
use crate::operation::convert_operation;
use crate::soroban::convert_soroban_data;

/// Hash of `envelope` on the network identified by `network_id`.
///
/// This is the SHA-256 of the signature payload. A V0 envelope is hashed as
/// the equivalent V1 transaction; a fee-bump envelope hashes the outer
/// transaction.
pub fn transaction_hash(envelope: &xdr::TransactionEnvelope, network_id: &NetworkId) -> Result<Hash256> {
    let tagged_transaction = match envelope {
        xdr::TransactionEnvelope::TxV0(env) => {
            xdr::TransactionSignaturePayloadTaggedTransaction::Tx(v0_to_v1_transaction(&env.tx))
        }
        xdr::TransactionEnvelope::Tx(env) => {
            xdr::TransactionSignaturePayloadTaggedTransaction::Tx(env.tx.clone())
        }
        xdr::TransactionEnvelope::TxFeeBump(env) => {
            xdr::TransactionSignaturePayloadTaggedTransaction::TxFeeBump(env.tx.clone())
        }
    };
    let payload = xdr::TransactionSignaturePayload {
        network_id: xdr::Hash::from(*network_id),
        tagged_transaction,
    };
    Ok(Hash256::hash_xdr(&payload)?)
}

fn v0_to_v1_transaction(v0: &xdr::TransactionV0) -> xdr::Transaction {
    xdr::Transaction {
        source_account: xdr::MuxedAccount::Ed25519(v0.source_account_ed25519.clone()),
        fee: v0.fee,
        seq_num: v0.seq_num.clone(),
        cond: match &v0.time_bounds {
            Some(bounds) => xdr::Preconditions::Time(bounds.clone()),
            None => xdr::Preconditions::None,
        },
        memo: v0.memo.clone(),
        operations: v0.operations.clone(),
        ext: xdr::TransactionExt::V0,
    }
}

/// Operations of the transaction that actually executes. For a fee-bump
/// envelope that is the wrapped transaction.
pub fn envelope_operations(envelope: &xdr::TransactionEnvelope) -> &[xdr::Operation] {
    match envelope {
        xdr::TransactionEnvelope::TxV0(env) => &env.tx.operations,
        xdr::TransactionEnvelope::Tx(env) => &env.tx.operations,
        xdr::TransactionEnvelope::TxFeeBump(env) => match &env.tx.inner_tx {
            xdr::FeeBumpTransactionInnerTx::Tx(inner) => &inner.tx.operations,
        },
    }
}

pub fn convert_envelope(envelope: &xdr::TransactionEnvelope) -> model::TransactionEnvelope {
    match envelope {
        xdr::TransactionEnvelope::TxV0(env) => model::TransactionEnvelope::TxV0(model::SignedTransaction {
            tx: convert_transaction(&v0_to_v1_transaction(&env.tx)),
            signatures: convert_signatures(&env.signatures),
        }),
        xdr::TransactionEnvelope::Tx(env) => model::TransactionEnvelope::Tx(convert_v1_envelope(env)),
        xdr::TransactionEnvelope::TxFeeBump(env) => {
            let inner_tx = match &env.tx.inner_tx {
                xdr::FeeBumpTransactionInnerTx::Tx(inner) => convert_v1_envelope(inner),
            };
            model::TransactionEnvelope::TxFeeBump(model::FeeBumpEnvelope {
                fee_source: muxed(&env.tx.fee_source),
                fee: env.tx.fee,
                inner_tx,
                signatures: convert_signatures(&env.signatures),
            })
        }
    }
}

fn convert_v1_envelope(env: &xdr::TransactionV1Envelope) -> model::SignedTransaction {
    model::SignedTransaction {
        tx: convert_transaction(&env.tx),
        signatures: convert_signatures(&env.signatures),
    }
}

fn convert_signatures(signatures: &[xdr::DecoratedSignature]) -> Vec<model::DecoratedSignature> {
    signatures
        .iter()
        .map(|s| model::DecoratedSignature {
            hint: hex::encode(s.hint.0),
            signature: hex::encode(s.signature.0.as_slice()),
        })
        .collect()
}

fn convert_transaction(tx: &xdr::Transaction) -> model::Transaction {
    model::Transaction {
        source_account: muxed(&tx.source_account),
        fee: tx.fee,
        seq_num: tx.seq_num.0,
        preconditions: convert_preconditions(&tx.cond),
        memo: convert_memo(&tx.memo),
        operations: tx.operations.iter().map(convert_operation).collect(),
        soroban_data: match &tx.ext {
            xdr::TransactionExt::V0 => None,
            xdr::TransactionExt::V1(data) => Some(convert_soroban_data(data)),
        },
    }
}

fn time_bounds(b: &xdr::TimeBounds) -> model::TimeBounds {
    model::TimeBounds {
        min_time: b.min_time.0,
        max_time: b.max_time.0,
    }
}

fn convert_preconditions(cond: &xdr::Preconditions) -> model::Preconditions {
    match cond {
        xdr::Preconditions::None => model::Preconditions::None,
        xdr::Preconditions::Time(b) => model::Preconditions::Time(time_bounds(b)),
        xdr::Preconditions::V2(v2) => model::Preconditions::V2(model::PreconditionsV2 {
            time_bounds: v2.time_bounds.as_ref().map(time_bounds),
            ledger_bounds: v2.ledger_bounds.as_ref().map(|b| model::LedgerBounds {
                min_ledger: b.min_ledger,
                max_ledger: b.max_ledger,
            }),
            min_seq_num: v2.min_seq_num.as_ref().map(|s| s.0),
            min_seq_age: v2.min_seq_age.0,
            min_seq_ledger_gap: v2.min_seq_ledger_gap,
            extra_signers: v2.extra_signers.iter().map(convert_signer_key).collect(),
        }),
    }
}

fn convert_memo(memo: &xdr::Memo) -> model::Memo {
    match memo {
        xdr::Memo::None => model::Memo::None,
        xdr::Memo::Text(text) => model::Memo::Text(string_lossy(text.as_vec())),
        xdr::Memo::Id(id) => model::Memo::Id(*id),
        xdr::Memo::Hash(h) => model::Memo::Hash(Hash256::from(h)),
        xdr::Memo::Return(h) => model::Memo::Return(Hash256::from(h)),
    }
}
