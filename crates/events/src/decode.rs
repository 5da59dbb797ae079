//! Typed decoding of classified asset-standard events.

use henyey_common::asset::{asset_contract_id, parse_asset};
use henyey_common::strkey::sc_address_to_string;
use henyey_common::{Int128, NetworkId};
use henyey_model::{AssetEvent, AssetStandardEvent};
use stellar_xdr::curr::{ContractEvent, ContractEventBody, ScVal};

use crate::error::{EventError, Result};
use crate::kind::AssetEventKind;

/// Extract the typed fields of an event already classified as `kind`.
///
/// Transfer, mint and clawback need exactly four topics with addresses at
/// positions 1 and 2; burn needs exactly three with an address at position
/// 1. The data must be an `i128` in every case.
pub fn decode_asset_event(kind: AssetEventKind, event: &ContractEvent) -> Result<AssetStandardEvent> {
    let ContractEventBody::V0(body) = &event.body;
    let topics = body.topics.as_slice();
    if topics.len() != kind.topic_count() {
        return Err(EventError::malformed(
            kind,
            format!("expected {} topics, found {}", kind.topic_count(), topics.len()),
        ));
    }

    let amount = match &body.data {
        ScVal::I128(parts) => Int128::from(parts),
        other => {
            return Err(EventError::malformed(
                kind,
                format!("data is {} rather than i128", other.name()),
            ))
        }
    };

    let first = address_topic(kind, topics, 1)?;
    let event = match kind {
        AssetEventKind::Transfer => AssetStandardEvent::Transfer {
            from: first,
            to: address_topic(kind, topics, 2)?,
            amount,
        },
        AssetEventKind::Mint => AssetStandardEvent::Mint {
            admin: first,
            to: address_topic(kind, topics, 2)?,
            amount,
        },
        AssetEventKind::Clawback => AssetStandardEvent::Clawback {
            admin: first,
            from: address_topic(kind, topics, 2)?,
            amount,
        },
        AssetEventKind::Burn => AssetStandardEvent::Burn {
            from: first,
            amount,
        },
    };
    Ok(event)
}

fn address_topic(kind: AssetEventKind, topics: &[ScVal], index: usize) -> Result<String> {
    match topics.get(index) {
        Some(ScVal::Address(address)) => Ok(sc_address_to_string(address)),
        Some(other) => Err(EventError::malformed(
            kind,
            format!("topic {index} is {} rather than an address", other.name()),
        )),
        None => Err(EventError::malformed(kind, format!("topic {index} is missing"))),
    }
}

/// Decode `event` as `kind` and resolve the asset it names.
///
/// The asset is taken from the last topic when that topic is a SEP-11
/// string. With a network id, the emitting contract is also checked against
/// the Stellar asset contract id derived for that asset.
pub fn decode_with_asset(
    kind: AssetEventKind,
    event: &ContractEvent,
    network_id: Option<&NetworkId>,
) -> Result<AssetEvent> {
    let decoded = decode_asset_event(kind, event)?;
    let asset = asset_name(event);

    let stellar_asset_contract = match (network_id, &asset, &event.contract_id) {
        (Some(network_id), Some(name), Some(contract_id)) => parse_asset(name)
            .and_then(|asset| asset_contract_id(network_id, &asset))
            .map(|expected| &expected == contract_id)
            .unwrap_or(false),
        _ => false,
    };

    Ok(AssetEvent {
        event: decoded,
        asset,
        stellar_asset_contract,
    })
}

fn asset_name(event: &ContractEvent) -> Option<String> {
    let ContractEventBody::V0(body) = &event.body;
    match body.topics.last()? {
        ScVal::String(s) => {
            let name = std::str::from_utf8(s.0.as_ref()).ok()?;
            parse_asset(name).ok().map(|_| name.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{
        AccountId, ContractEventType, ContractEventV0, ContractId, ExtensionPoint, Hash,
        Int128Parts, PublicKey, ScAddress, ScBytes, ScString, ScSymbol, StringM, Uint256,
    };

    fn sym(s: &str) -> ScVal {
        ScVal::Symbol(ScSymbol(StringM::try_from(s).unwrap()))
    }

    fn account(seed: u8) -> ScVal {
        ScVal::Address(ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(
            Uint256([seed; 32]),
        ))))
    }

    fn i128_val(v: i128) -> ScVal {
        ScVal::I128(Int128Parts {
            hi: (v >> 64) as i64,
            lo: v as u64,
        })
    }

    fn event(topics: Vec<ScVal>, data: ScVal) -> ContractEvent {
        ContractEvent {
            ext: ExtensionPoint::V0,
            contract_id: Some(ContractId(Hash([7; 32]))),
            type_: ContractEventType::Contract,
            body: ContractEventBody::V0(ContractEventV0 {
                topics: topics.try_into().unwrap(),
                data,
            }),
        }
    }

    fn strkey(seed: u8) -> String {
        match account(seed) {
            ScVal::Address(a) => sc_address_to_string(&a),
            _ => unreachable!(),
        }
    }

    fn asset_bytes() -> ScVal {
        ScVal::Bytes(ScBytes(vec![1, 2, 3].try_into().unwrap()))
    }

    #[test]
    fn test_transfer() {
        let e = event(
            vec![sym("transfer"), account(1), account(2), asset_bytes()],
            i128_val(100),
        );
        let decoded = decode_asset_event(AssetEventKind::Transfer, &e).unwrap();
        assert_eq!(
            decoded,
            AssetStandardEvent::Transfer {
                from: strkey(1),
                to: strkey(2),
                amount: Int128::from_i128(100),
            }
        );
    }

    #[test]
    fn test_mint_and_clawback_roles() {
        let topics = |name| vec![sym(name), account(1), account(2), asset_bytes()];
        let mint = decode_asset_event(AssetEventKind::Mint, &event(topics("mint"), i128_val(5))).unwrap();
        assert_eq!(
            mint,
            AssetStandardEvent::Mint {
                admin: strkey(1),
                to: strkey(2),
                amount: Int128::from_i128(5),
            }
        );
        let clawback =
            decode_asset_event(AssetEventKind::Clawback, &event(topics("clawback"), i128_val(5))).unwrap();
        assert_eq!(
            clawback,
            AssetStandardEvent::Clawback {
                admin: strkey(1),
                from: strkey(2),
                amount: Int128::from_i128(5),
            }
        );
    }

    #[test]
    fn test_burn() {
        let e = event(vec![sym("burn"), account(1), asset_bytes()], i128_val(50));
        let decoded = decode_asset_event(AssetEventKind::Burn, &e).unwrap();
        assert_eq!(
            decoded,
            AssetStandardEvent::Burn {
                from: strkey(1),
                amount: Int128::from_i128(50),
            }
        );
    }

    #[test]
    fn test_negative_amount_keeps_parts() {
        let e = event(
            vec![sym("transfer"), account(1), account(2), asset_bytes()],
            ScVal::I128(Int128Parts { hi: -1, lo: 0 }),
        );
        let decoded = decode_asset_event(AssetEventKind::Transfer, &e).unwrap();
        assert_eq!(decoded.amount(), Int128 { hi: -1, lo: 0 });
    }

    #[test]
    fn test_shape_mismatches_are_malformed() {
        let wrong_count = event(vec![sym("transfer"), account(1), account(2)], i128_val(1));
        let non_address = event(
            vec![sym("transfer"), ScVal::U32(1), account(2), asset_bytes()],
            i128_val(1),
        );
        let second_not_address = event(
            vec![sym("transfer"), account(1), ScVal::Void, asset_bytes()],
            i128_val(1),
        );
        let wrong_data = event(
            vec![sym("transfer"), account(1), account(2), asset_bytes()],
            ScVal::I64(1),
        );
        let burn_with_four = event(
            vec![sym("burn"), account(1), account(2), asset_bytes()],
            i128_val(1),
        );

        for (kind, e) in [
            (AssetEventKind::Transfer, &wrong_count),
            (AssetEventKind::Transfer, &non_address),
            (AssetEventKind::Transfer, &second_not_address),
            (AssetEventKind::Transfer, &wrong_data),
            (AssetEventKind::Burn, &burn_with_four),
        ] {
            let err = decode_asset_event(kind, e).unwrap_err();
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_asset_string_and_contract_check() {
        let network = NetworkId::testnet();
        let contract_id = asset_contract_id(&network, &stellar_xdr::curr::Asset::Native).unwrap();
        let mut e = event(
            vec![
                sym("transfer"),
                account(1),
                account(2),
                ScVal::String(ScString(StringM::try_from("native").unwrap())),
            ],
            i128_val(10),
        );
        e.contract_id = Some(contract_id);

        let decoded = decode_with_asset(AssetEventKind::Transfer, &e, Some(&network)).unwrap();
        assert_eq!(decoded.asset.as_deref(), Some("native"));
        assert!(decoded.stellar_asset_contract);

        let other_network = decode_with_asset(
            AssetEventKind::Transfer,
            &e,
            Some(&NetworkId::mainnet()),
        )
        .unwrap();
        assert!(!other_network.stellar_asset_contract);

        let without_network = decode_with_asset(AssetEventKind::Transfer, &e, None).unwrap();
        assert_eq!(without_network.asset.as_deref(), Some("native"));
        assert!(!without_network.stellar_asset_contract);
    }

    #[test]
    fn test_bytes_asset_topic_has_no_name() {
        let e = event(
            vec![sym("transfer"), account(1), account(2), asset_bytes()],
            i128_val(10),
        );
        let decoded = decode_with_asset(AssetEventKind::Transfer, &e, None).unwrap();
        assert_eq!(decoded.asset, None);
    }
}
