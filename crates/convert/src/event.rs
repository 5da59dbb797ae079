//! Contract, diagnostic and transaction-level events.

use henyey_common::strkey::contract_id_to_strkey;
use henyey_common::{EventId, Toid};
use henyey_events::{harvest_operation, HarvestOptions, Harvested, SourceEvent};
use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::scval::{convert_sc_val, convert_sc_vals};

/// Convert one contract event, attaching the identifier and decoded asset
/// payload assigned during harvesting.
pub fn convert_contract_event(
    event: &xdr::ContractEvent,
    id: Option<EventId>,
    asset_event: Option<model::AssetEvent>,
) -> model::ContractEvent {
    let xdr::ContractEventBody::V0(body) = &event.body;
    model::ContractEvent {
        id,
        contract_id: event.contract_id.as_ref().map(contract_id_to_strkey),
        event_type: match event.type_ {
            xdr::ContractEventType::System => model::ContractEventType::System,
            xdr::ContractEventType::Contract => model::ContractEventType::Contract,
            xdr::ContractEventType::Diagnostic => model::ContractEventType::Diagnostic,
        },
        topics: convert_sc_vals(&body.topics),
        data: convert_sc_val(&body.data),
        asset_event,
    }
}

pub(crate) fn convert_harvested(harvested: Harvested<'_>) -> model::ContractEvent {
    match harvested {
        Harvested::Emitted {
            id,
            event,
            asset_event,
        } => convert_contract_event(event, Some(id), asset_event),
        Harvested::Skipped { event, .. } => convert_contract_event(event, None, None),
    }
}

/// Harvest and convert the events of one operation.
///
/// Events of a failed transaction are converted without identifiers.
pub(crate) fn operation_events<'a, I, E>(
    operation: Toid,
    events: I,
    successful: bool,
    options: &HarvestOptions,
) -> Vec<model::ContractEvent>
where
    I: IntoIterator<Item = E>,
    E: Into<SourceEvent<'a>>,
{
    if !successful {
        return events
            .into_iter()
            .map(|e| {
                let source: SourceEvent<'a> = e.into();
                convert_contract_event(source.event, None, None)
            })
            .collect();
    }
    harvest_operation(operation, events, options)
        .into_iter()
        .map(convert_harvested)
        .collect()
}

pub(crate) fn convert_diagnostic_event(event: &xdr::DiagnosticEvent) -> model::DiagnosticEvent {
    model::DiagnosticEvent {
        in_successful_contract_call: event.in_successful_contract_call,
        event: convert_contract_event(&event.event, None, None),
    }
}

pub(crate) fn convert_transaction_event(event: &xdr::TransactionEvent) -> model::TransactionEvent {
    model::TransactionEvent {
        stage: match event.stage {
            xdr::TransactionEventStage::BeforeAllTxs => model::TransactionEventStage::BeforeAllTxs,
            xdr::TransactionEventStage::AfterTx => model::TransactionEventStage::AfterTx,
            xdr::TransactionEventStage::AfterAllTxs => model::TransactionEventStage::AfterAllTxs,
        },
        event: convert_contract_event(&event.event, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdr::{ContractEventBody, ContractEventV0, ContractId, ExtensionPoint, Hash, ScSymbol, StringM};

    fn event(name: &str) -> xdr::ContractEvent {
        xdr::ContractEvent {
            ext: ExtensionPoint::V0,
            contract_id: Some(ContractId(Hash([4; 32]))),
            type_: xdr::ContractEventType::Contract,
            body: ContractEventBody::V0(ContractEventV0 {
                topics: vec![xdr::ScVal::Symbol(ScSymbol(StringM::try_from(name).unwrap()))]
                    .try_into()
                    .unwrap(),
                data: xdr::ScVal::U32(1),
            }),
        }
    }

    #[test]
    fn test_contract_event_fields() {
        let converted = convert_contract_event(&event("ping"), None, None);
        assert!(converted.contract_id.as_deref().is_some_and(|c| c.starts_with('C')));
        assert_eq!(converted.event_type, model::ContractEventType::Contract);
        assert_eq!(converted.topics, vec![model::ScVal::Symbol("ping".into())]);
        assert_eq!(converted.data, model::ScVal::U32(1));
    }

    #[test]
    fn test_failed_transaction_events_have_no_ids() {
        let events = vec![event("a"), event("b")];
        let op = Toid::new(3, 1, 1).unwrap();
        let failed = operation_events(op, &events, false, &HarvestOptions::default());
        assert!(failed.iter().all(|e| e.id.is_none()));

        let applied = operation_events(op, &events, true, &HarvestOptions::default());
        assert_eq!(applied[1].id, Some(EventId::new(op, 2)));
    }
}
