//! Reading `LedgerCloseMeta` streams and writing JSON documents.

use std::io::{Read, Write};

use anyhow::Context;
use henyey_common::xdr_stream::{Values, XdrBase64Reader, XdrFrameReader};
use henyey_common::{Hash256, Toid};
use henyey_convert::{convert_ledger, ConvertOptions, LedgerCloseRecord};
use henyey_model::{ContractEvent, LedgerRecord};
use serde::Serialize;
use stellar_xdr::curr::LedgerCloseMeta;
use tracing::{debug, info};

/// Encoding of the input stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Size-prefixed binary frames, as written by stellar-core's metadata
    /// output stream.
    #[default]
    Stream,
    /// One base64 value per line.
    Base64,
}

/// Counters reported when a run finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub ledgers: u64,
    pub transactions: u64,
    pub events: u64,
}

/// One harvested event with the position it was emitted at.
#[derive(Debug, Serialize)]
struct EventLine<'a> {
    ledger: u32,
    transaction_hash: Hash256,
    operation: Toid,
    #[serde(flatten)]
    event: &'a ContractEvent,
}

fn ledger_metas<R: Read>(reader: R, format: InputFormat) -> Values<R, LedgerCloseMeta> {
    match format {
        InputFormat::Stream => XdrFrameReader::new(reader).values(),
        InputFormat::Base64 => XdrBase64Reader::new(reader).values(),
    }
}

fn convert_each<R, F>(
    reader: R,
    format: InputFormat,
    options: &ConvertOptions,
    mut sink: F,
) -> anyhow::Result<RunStats>
where
    R: Read,
    F: FnMut(&LedgerRecord) -> anyhow::Result<u64>,
{
    let mut stats = RunStats::default();
    for (index, meta) in ledger_metas(reader, format).enumerate() {
        let meta = meta.with_context(|| format!("Failed to read ledger #{}", index + 1))?;
        let record = LedgerCloseRecord::from_ledger_close_meta(&meta, &options.network_id)
            .with_context(|| format!("Failed to assemble ledger #{}", index + 1))?;
        let ledger_seq = record.ledger_seq();
        let ledger = convert_ledger(&record, options)
            .with_context(|| format!("Failed to convert ledger {ledger_seq}"))?;

        stats.ledgers += 1;
        stats.transactions += ledger.transactions.len() as u64;
        stats.events += sink(&ledger)?;
        debug!(ledger_seq, "Wrote ledger");
    }
    info!(
        ledgers = stats.ledgers,
        transactions = stats.transactions,
        events = stats.events,
        "Finished"
    );
    Ok(stats)
}

fn write_document<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Convert every ledger of `reader` and write one JSON document per ledger.
///
/// The event count in the returned stats covers identified events only, the
/// same set `classify_stream` writes.
pub fn convert_stream<R: Read, W: Write>(
    reader: R,
    format: InputFormat,
    writer: &mut W,
    options: &ConvertOptions,
    pretty: bool,
) -> anyhow::Result<RunStats> {
    let stats = convert_each(reader, format, options, |ledger| {
        write_document(writer, ledger, pretty)?;
        Ok(ledger
            .transactions
            .iter()
            .flat_map(|tx| &tx.operations)
            .flat_map(|op| &op.events)
            .filter(|e| e.id.is_some())
            .count() as u64)
    })?;
    writer.flush()?;
    Ok(stats)
}

/// Write only the events that received an identifier, one per line.
///
/// With `asset_only`, events that did not decode as asset-standard events
/// are left out as well.
pub fn classify_stream<R: Read, W: Write>(
    reader: R,
    format: InputFormat,
    writer: &mut W,
    options: &ConvertOptions,
    asset_only: bool,
) -> anyhow::Result<RunStats> {
    let stats = convert_each(reader, format, options, |ledger| {
        let mut written = 0;
        for tx in &ledger.transactions {
            for op in &tx.operations {
                let harvested = op
                    .events
                    .iter()
                    .filter(|e| e.id.is_some())
                    .filter(|e| !asset_only || e.asset_event.is_some());
                for event in harvested {
                    let line = EventLine {
                        ledger: ledger.summary.sequence,
                        transaction_hash: tx.hash,
                        operation: op.toid,
                        event,
                    };
                    write_document(writer, &line, false)?;
                    written += 1;
                }
            }
        }
        Ok(written)
    })?;
    writer.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{LedgerCloseMetaV2, Limits, WriteXdr};

    fn base64_input(seqs: &[u32]) -> String {
        seqs.iter()
            .map(|seq| {
                let mut v2 = LedgerCloseMetaV2::default();
                v2.ledger_header.header.ledger_seq = *seq;
                LedgerCloseMeta::V2(v2).to_xdr_base64(Limits::none()).unwrap()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_convert_writes_one_line_per_ledger() {
        let input = base64_input(&[7, 8]);
        let mut out = Vec::new();
        let stats = convert_stream(
            input.as_bytes(),
            InputFormat::Base64,
            &mut out,
            &ConvertOptions::default(),
            false,
        )
        .unwrap();

        assert_eq!(stats.ledgers, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["summary"]["sequence"], 7);
    }

    #[test]
    fn test_frame_input() {
        let meta = LedgerCloseMeta::V2(LedgerCloseMetaV2::default());
        let payload = meta.to_xdr(Limits::none()).unwrap();
        let mut input = ((payload.len() as u32) | 0x8000_0000).to_be_bytes().to_vec();
        input.extend_from_slice(&payload);

        let mut out = Vec::new();
        let stats = convert_stream(
            input.as_slice(),
            InputFormat::Stream,
            &mut out,
            &ConvertOptions::default(),
            false,
        )
        .unwrap();
        assert_eq!(stats.ledgers, 1);
    }

    #[test]
    fn test_bad_input_reports_position() {
        let input = format!("{}\nnot-base64\n", base64_input(&[1]));
        let mut out = Vec::new();
        let err = convert_stream(
            input.as_bytes(),
            InputFormat::Base64,
            &mut out,
            &ConvertOptions::default(),
            false,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("ledger #2"));
    }

    /// One ledger holding a single payment whose operation emitted a
    /// well-formed transfer event.
    fn ledger_with_transfer_event(tx_succeeds: bool) -> String {
        use henyey_common::NetworkId;
        use henyey_convert::transaction_hash;
        use stellar_xdr::curr as xdr;

        let envelope = xdr::TransactionEnvelope::Tx(xdr::TransactionV1Envelope {
            tx: xdr::Transaction {
                source_account: xdr::MuxedAccount::Ed25519(xdr::Uint256([1; 32])),
                fee: 100,
                seq_num: xdr::SequenceNumber(1),
                cond: xdr::Preconditions::None,
                memo: xdr::Memo::None,
                operations: vec![xdr::Operation {
                    source_account: None,
                    body: xdr::OperationBody::Payment(xdr::PaymentOp {
                        destination: xdr::MuxedAccount::Ed25519(xdr::Uint256([2; 32])),
                        asset: xdr::Asset::Native,
                        amount: 5,
                    }),
                }]
                .try_into()
                .unwrap(),
                ext: xdr::TransactionExt::V0,
            },
            signatures: xdr::VecM::default(),
        });

        let address = |seed: u8| {
            xdr::ScVal::Address(xdr::ScAddress::Contract(xdr::ContractId(xdr::Hash([seed; 32]))))
        };
        let event = xdr::ContractEvent {
            ext: xdr::ExtensionPoint::V0,
            contract_id: Some(xdr::ContractId(xdr::Hash([9; 32]))),
            type_: xdr::ContractEventType::Contract,
            body: xdr::ContractEventBody::V0(xdr::ContractEventV0 {
                topics: vec![
                    xdr::ScVal::Symbol(xdr::ScSymbol("transfer".try_into().unwrap())),
                    address(1),
                    address(2),
                    xdr::ScVal::String(xdr::ScString("native".try_into().unwrap())),
                ]
                .try_into()
                .unwrap(),
                data: xdr::ScVal::I128(xdr::Int128Parts { hi: 0, lo: 5 }),
            }),
        };
        let meta = xdr::TransactionMeta::V4(xdr::TransactionMetaV4 {
            ext: xdr::ExtensionPoint::V0,
            tx_changes_before: xdr::LedgerEntryChanges(xdr::VecM::default()),
            operations: vec![xdr::OperationMetaV2 {
                ext: xdr::ExtensionPoint::V0,
                changes: xdr::LedgerEntryChanges(xdr::VecM::default()),
                events: vec![event].try_into().unwrap(),
            }]
            .try_into()
            .unwrap(),
            tx_changes_after: xdr::LedgerEntryChanges(xdr::VecM::default()),
            soroban_meta: None,
            events: xdr::VecM::default(),
            diagnostic_events: xdr::VecM::default(),
        });

        let op_result = if tx_succeeds {
            xdr::PaymentResult::Success
        } else {
            xdr::PaymentResult::Underfunded
        };
        let op_results: xdr::VecM<xdr::OperationResult> =
            vec![xdr::OperationResult::OpInner(xdr::OperationResultTr::Payment(op_result))]
                .try_into()
                .unwrap();
        let hash = transaction_hash(&envelope, &NetworkId::testnet()).unwrap();

        let mut v2 = LedgerCloseMetaV2::default();
        v2.ledger_header.header.ledger_seq = 10;
        v2.tx_set = xdr::GeneralizedTransactionSet::V1(xdr::TransactionSetV1 {
            previous_ledger_hash: xdr::Hash([0; 32]),
            phases: vec![xdr::TransactionPhase::V0(
                vec![xdr::TxSetComponent::TxsetCompTxsMaybeDiscountedFee(
                    xdr::TxSetComponentTxsMaybeDiscountedFee {
                        base_fee: None,
                        txs: vec![envelope].try_into().unwrap(),
                    },
                )]
                .try_into()
                .unwrap(),
            )]
            .try_into()
            .unwrap(),
        });
        v2.tx_processing = vec![xdr::TransactionResultMetaV1 {
            ext: xdr::ExtensionPoint::V0,
            result: xdr::TransactionResultPair {
                transaction_hash: xdr::Hash(hash.0),
                result: xdr::TransactionResult {
                    fee_charged: 100,
                    result: if tx_succeeds {
                        xdr::TransactionResultResult::TxSuccess(op_results)
                    } else {
                        xdr::TransactionResultResult::TxFailed(op_results)
                    },
                    ext: xdr::TransactionResultExt::V0,
                },
            },
            fee_processing: xdr::LedgerEntryChanges(xdr::VecM::default()),
            tx_apply_processing: meta,
            post_tx_apply_fee_processing: xdr::LedgerEntryChanges(xdr::VecM::default()),
        }]
        .try_into()
        .unwrap();
        LedgerCloseMeta::V2(v2).to_xdr_base64(Limits::none()).unwrap()
    }

    #[test]
    fn test_convert_and_classify_count_the_same_events() {
        for (tx_succeeds, expected) in [(true, 1), (false, 0)] {
            let input = ledger_with_transfer_event(tx_succeeds);
            let options = ConvertOptions::default();

            let mut converted = Vec::new();
            let convert_stats =
                convert_stream(input.as_bytes(), InputFormat::Base64, &mut converted, &options, false)
                    .unwrap();
            let mut classified = Vec::new();
            let classify_stats =
                classify_stream(input.as_bytes(), InputFormat::Base64, &mut classified, &options, false)
                    .unwrap();

            assert_eq!(convert_stats.transactions, 1);
            assert_eq!(convert_stats.events, expected, "tx_succeeds = {tx_succeeds}");
            assert_eq!(classify_stats.events, expected, "tx_succeeds = {tx_succeeds}");
            // The failed transaction's event is still written, just without an id.
            let ledger: serde_json::Value =
                serde_json::from_slice(&converted[..converted.len() - 1]).unwrap();
            let events = &ledger["transactions"][0]["operations"][0]["events"];
            assert_eq!(events.as_array().map(Vec::len), Some(1));
            assert_eq!(events[0]["id"].is_null(), !tx_succeeds);
        }
    }

    #[test]
    fn test_classify_empty_ledgers_writes_nothing() {
        let input = base64_input(&[3]);
        let mut out = Vec::new();
        let stats = classify_stream(
            input.as_bytes(),
            InputFormat::Base64,
            &mut out,
            &ConvertOptions::default(),
            true,
        )
        .unwrap();
        assert_eq!(stats.events, 0);
        assert!(out.is_empty());
    }
}
