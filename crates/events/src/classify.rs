//! Structural classification of contract events.

use stellar_xdr::curr::{ContractEvent, ContractEventBody, ContractEventType, ScVal};

use crate::kind::AssetEventKind;

/// Outcome of classifying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// First topic names a standard kind; shape is checked by the decoder.
    Recognized(AssetEventKind),
    /// First topic is a symbol that names no standard kind.
    NotRecognized(String),
    /// The event cannot be an asset-standard event at all.
    NotCandidate(Rejection),
}

/// Why an event was not considered for asset-standard decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotContractType,
    MissingContractId,
    TooFewTopics(usize),
    FirstTopicNotSymbol,
}

/// Decide whether `event` has the outline of an asset-standard event.
///
/// Checks, in order: contract event type with a contract id, more than two
/// topics, a symbol first topic, and finally the symbol itself.
pub fn classify(event: &ContractEvent) -> Classification {
    if event.type_ != ContractEventType::Contract {
        return Classification::NotCandidate(Rejection::NotContractType);
    }
    if event.contract_id.is_none() {
        return Classification::NotCandidate(Rejection::MissingContractId);
    }
    let ContractEventBody::V0(body) = &event.body;
    if body.topics.len() <= 2 {
        return Classification::NotCandidate(Rejection::TooFewTopics(body.topics.len()));
    }
    let symbol = match &body.topics[0] {
        ScVal::Symbol(sym) => {
            let bytes: &[u8] = sym.0.as_ref();
            String::from_utf8_lossy(bytes).into_owned()
        }
        _ => return Classification::NotCandidate(Rejection::FirstTopicNotSymbol),
    };
    match AssetEventKind::from_name(&symbol) {
        Some(kind) => Classification::Recognized(kind),
        None => Classification::NotRecognized(symbol),
    }
}
