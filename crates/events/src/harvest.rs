//! Per-operation event harvesting and identifier assignment.
//!
//! The harvester walks one operation's events in source order. Candidates
//! are events of the contract type that, when they come from a diagnostic
//! list, were raised inside a successful contract call. Every candidate is
//! emitted with an [`EventId`] whose order component counts emitted events
//! from 1, shared by plain contract events and asset-standard events. A
//! candidate that names an asset-standard kind but fails to decode is
//! skipped and does not consume an order value.

use henyey_common::{EventId, NetworkId, Toid};
use henyey_model::AssetEvent;
use stellar_xdr::curr::{ContractEvent, ContractEventType, DiagnosticEvent};
use tracing::{debug, trace};

use crate::classify::{classify, Classification};
use crate::decode::decode_with_asset;
use crate::error::EventError;

/// Harvest settings.
#[derive(Debug, Clone, Default)]
pub struct HarvestOptions {
    /// Classify and decode asset-standard events.
    pub decode_asset_events: bool,
    /// Network used to recognise Stellar asset contracts.
    pub network_id: Option<NetworkId>,
}

/// One event as handed to the harvester.
#[derive(Debug, Clone, Copy)]
pub struct SourceEvent<'a> {
    pub event: &'a ContractEvent,
    pub in_successful_contract_call: bool,
}

impl<'a> From<&'a ContractEvent> for SourceEvent<'a> {
    fn from(event: &'a ContractEvent) -> Self {
        Self {
            event,
            in_successful_contract_call: true,
        }
    }
}

impl<'a> From<&'a DiagnosticEvent> for SourceEvent<'a> {
    fn from(diagnostic: &'a DiagnosticEvent) -> Self {
        Self {
            event: &diagnostic.event,
            in_successful_contract_call: diagnostic.in_successful_contract_call,
        }
    }
}

/// Outcome for one source event, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Harvested<'a> {
    Emitted {
        id: EventId,
        event: &'a ContractEvent,
        asset_event: Option<AssetEvent>,
    },
    Skipped {
        event: &'a ContractEvent,
        reason: SkipReason,
    },
}

impl<'a> Harvested<'a> {
    pub fn event(&self) -> &'a ContractEvent {
        match self {
            Harvested::Emitted { event, .. } | Harvested::Skipped { event, .. } => event,
        }
    }

    pub fn id(&self) -> Option<EventId> {
        match self {
            Harvested::Emitted { id, .. } => Some(*id),
            Harvested::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Not raised in a successful call, or not a contract event.
    NotCandidate,
    Malformed(EventError),
}

/// Whether an event takes part in identifier assignment.
pub fn is_candidate(source: &SourceEvent<'_>) -> bool {
    source.in_successful_contract_call && source.event.type_ == ContractEventType::Contract
}

/// Harvest the events of the operation identified by `operation`.
pub fn harvest_operation<'a, I, E>(
    operation: Toid,
    events: I,
    options: &HarvestOptions,
) -> Vec<Harvested<'a>>
where
    I: IntoIterator<Item = E>,
    E: Into<SourceEvent<'a>>,
{
    let mut order: u32 = 0;
    events
        .into_iter()
        .map(Into::into)
        .map(|source: SourceEvent<'a>| {
            let event = source.event;
            if !is_candidate(&source) {
                trace!(%operation, "Skipping non-candidate event");
                return Harvested::Skipped {
                    event,
                    reason: SkipReason::NotCandidate,
                };
            }

            let asset_event = if options.decode_asset_events {
                match classify(event) {
                    Classification::Recognized(kind) => {
                        match decode_with_asset(kind, event, options.network_id.as_ref()) {
                            Ok(decoded) => Some(decoded),
                            Err(err) => {
                                debug!(%operation, error = %err, "Skipping malformed asset event");
                                return Harvested::Skipped {
                                    event,
                                    reason: SkipReason::Malformed(err),
                                };
                            }
                        }
                    }
                    Classification::NotRecognized(symbol) => {
                        trace!(%operation, %symbol, "Event is not an asset event");
                        None
                    }
                    Classification::NotCandidate(rejection) => {
                        trace!(%operation, ?rejection, "Event cannot be an asset event");
                        None
                    }
                }
            } else {
                None
            };

            order += 1;
            Harvested::Emitted {
                id: EventId::new(operation, order),
                event,
                asset_event,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{
        ContractEventBody, ContractEventV0, ContractId, ExtensionPoint, Hash, ScSymbol, ScVal,
        StringM,
    };

    fn contract_event(topics: Vec<ScVal>) -> ContractEvent {
        ContractEvent {
            ext: ExtensionPoint::V0,
            contract_id: Some(ContractId(Hash([2; 32]))),
            type_: ContractEventType::Contract,
            body: ContractEventBody::V0(ContractEventV0 {
                topics: topics.try_into().unwrap(),
                data: ScVal::Void,
            }),
        }
    }

    fn sym(s: &str) -> ScVal {
        ScVal::Symbol(ScSymbol(StringM::try_from(s).unwrap()))
    }

    #[test]
    fn test_orders_start_at_one() {
        let events = vec![contract_event(vec![sym("a")]), contract_event(vec![sym("b")])];
        let op = Toid::from_raw(42).unwrap();
        let harvested = harvest_operation(op, &events, &HarvestOptions::default());
        let ids: Vec<String> = harvested
            .iter()
            .filter_map(Harvested::id)
            .map(|id| id.to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["0000000000000000042-0000000001", "0000000000000000042-0000000002"]
        );
    }

    #[test]
    fn test_diagnostic_filtering() {
        let ok = DiagnosticEvent {
            in_successful_contract_call: true,
            event: contract_event(vec![sym("a")]),
        };
        let failed_call = DiagnosticEvent {
            in_successful_contract_call: false,
            event: contract_event(vec![sym("b")]),
        };
        let mut diagnostic_type = ok.clone();
        diagnostic_type.event.type_ = ContractEventType::Diagnostic;

        let events = vec![failed_call, diagnostic_type, ok];
        let op = Toid::from_raw(1).unwrap();
        let harvested = harvest_operation(op, &events, &HarvestOptions::default());
        assert_eq!(harvested.len(), 3);
        assert!(matches!(
            harvested[0],
            Harvested::Skipped {
                reason: SkipReason::NotCandidate,
                ..
            }
        ));
        assert!(matches!(harvested[1], Harvested::Skipped { .. }));
        assert_eq!(harvested[2].id(), Some(EventId::new(op, 1)));
    }

    #[test]
    fn test_no_decoding_when_disabled() {
        let events = vec![contract_event(vec![sym("transfer"), ScVal::Void, ScVal::Void])];
        let harvested = harvest_operation(
            Toid::from_raw(1).unwrap(),
            &events,
            &HarvestOptions::default(),
        );
        assert!(matches!(
            harvested[0],
            Harvested::Emitted {
                asset_event: None,
                ..
            }
        ));
    }
}
