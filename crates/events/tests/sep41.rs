//! Classification, decoding and identifier assignment over whole operations.

use henyey_common::strkey::sc_address_to_string;
use henyey_common::{EventId, Int128, NetworkId, Toid};
use henyey_events::{
    classify, harvest_operation, AssetEventKind, Classification, HarvestOptions, Harvested,
    SkipReason,
};
use henyey_model::AssetStandardEvent;
use stellar_xdr::curr::{
    AccountId, ContractEvent, ContractEventBody, ContractEventType, ContractEventV0, ContractId,
    ExtensionPoint, Hash, Int128Parts, PublicKey, ScAddress, ScBytes, ScSymbol, ScVal, StringM,
    Uint256,
};

fn sym(s: &str) -> ScVal {
    ScVal::Symbol(ScSymbol(StringM::try_from(s).unwrap()))
}

fn addr(seed: u8) -> ScAddress {
    ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256([seed; 32]))))
}

fn addr_val(seed: u8) -> ScVal {
    ScVal::Address(addr(seed))
}

fn i128_val(v: i128) -> ScVal {
    ScVal::I128(Int128Parts {
        hi: (v >> 64) as i64,
        lo: v as u64,
    })
}

fn asset_bytes() -> ScVal {
    ScVal::Bytes(ScBytes(b"asset".to_vec().try_into().unwrap()))
}

fn event(topics: Vec<ScVal>, data: ScVal) -> ContractEvent {
    ContractEvent {
        ext: ExtensionPoint::V0,
        contract_id: Some(ContractId(Hash([9; 32]))),
        type_: ContractEventType::Contract,
        body: ContractEventBody::V0(ContractEventV0 {
            topics: topics.try_into().unwrap(),
            data,
        }),
    }
}

fn decoding() -> HarvestOptions {
    HarvestOptions {
        decode_asset_events: true,
        network_id: Some(NetworkId::testnet()),
    }
}

#[test]
fn transfer_event_decodes_participants_and_amount() {
    let events = vec![event(
        vec![sym("transfer"), addr_val(1), addr_val(2), asset_bytes()],
        i128_val(100),
    )];
    let harvested = harvest_operation(Toid::new(10, 1, 1).unwrap(), &events, &decoding());

    match &harvested[0] {
        Harvested::Emitted {
            asset_event: Some(asset_event),
            ..
        } => assert_eq!(
            asset_event.event,
            AssetStandardEvent::Transfer {
                from: sc_address_to_string(&addr(1)),
                to: sc_address_to_string(&addr(2)),
                amount: Int128::from_i128(100),
            }
        ),
        other => panic!("expected decoded transfer, got {other:?}"),
    }
}

#[test]
fn burn_event_decodes_single_participant() {
    let events = vec![event(
        vec![sym("burn"), addr_val(1), asset_bytes()],
        i128_val(50),
    )];
    let harvested = harvest_operation(Toid::new(10, 1, 1).unwrap(), &events, &decoding());

    match &harvested[0] {
        Harvested::Emitted {
            asset_event: Some(asset_event),
            ..
        } => assert_eq!(
            asset_event.event,
            AssetStandardEvent::Burn {
                from: sc_address_to_string(&addr(1)),
                amount: Int128::from_i128(50),
            }
        ),
        other => panic!("expected decoded burn, got {other:?}"),
    }
}

#[test]
fn short_topic_lists_never_classify() {
    for topics in [
        vec![],
        vec![sym("transfer")],
        vec![sym("transfer"), addr_val(1)],
        vec![sym("burn"), addr_val(1)],
    ] {
        let e = event(topics, i128_val(1));
        assert!(matches!(classify(&e), Classification::NotCandidate(_)));
    }
}

#[test]
fn approve_is_not_recognized() {
    let e = event(
        vec![sym("approve"), addr_val(1), addr_val(2), ScVal::U32(100)],
        i128_val(1),
    );
    assert_eq!(classify(&e), Classification::NotRecognized("approve".to_string()));
}

#[test]
fn identifiers_are_shared_across_event_kinds() {
    let op = Toid::from_raw(42).unwrap();
    let events = vec![
        event(vec![sym("custom"), ScVal::U32(1)], ScVal::Void),
        event(
            vec![sym("mint"), addr_val(1), addr_val(2), asset_bytes()],
            i128_val(7),
        ),
        event(vec![sym("approve"), addr_val(1), addr_val(2), ScVal::Void], ScVal::Void),
    ];

    let harvested = harvest_operation(op, &events, &decoding());
    let ids: Vec<String> = harvested
        .iter()
        .map(|h| h.id().expect("every event is emitted").to_string())
        .collect();
    assert_eq!(
        ids,
        vec![
            "0000000000000000042-0000000001",
            "0000000000000000042-0000000002",
            "0000000000000000042-0000000003",
        ]
    );
    assert!(matches!(
        &harvested[1],
        Harvested::Emitted {
            asset_event: Some(_),
            ..
        }
    ));
}

#[test]
fn malformed_event_is_isolated_and_leaves_no_gap() {
    let op = Toid::new(5, 2, 1).unwrap();
    let events = vec![
        event(
            vec![sym("transfer"), addr_val(1), addr_val(2), asset_bytes()],
            i128_val(1),
        ),
        // second topic is not an address
        event(
            vec![sym("transfer"), ScVal::U64(3), addr_val(2), asset_bytes()],
            i128_val(2),
        ),
        event(
            vec![sym("clawback"), addr_val(1), addr_val(3), asset_bytes()],
            i128_val(3),
        ),
    ];

    let harvested = harvest_operation(op, &events, &decoding());
    assert_eq!(harvested.len(), 3);
    assert_eq!(harvested[0].id(), Some(EventId::new(op, 1)));
    match &harvested[1] {
        Harvested::Skipped {
            reason: SkipReason::Malformed(err),
            ..
        } => assert_eq!(err.kind(), AssetEventKind::Transfer),
        other => panic!("expected malformed skip, got {other:?}"),
    }
    assert_eq!(harvested[2].id(), Some(EventId::new(op, 2)));
    match &harvested[2] {
        Harvested::Emitted {
            asset_event: Some(asset_event),
            ..
        } => assert_eq!(asset_event.event.amount(), Int128::from_i128(3)),
        other => panic!("expected decoded clawback, got {other:?}"),
    }
}

#[test]
fn harvesting_is_deterministic() {
    let op = Toid::new(77, 3, 2).unwrap();
    let events = vec![
        event(vec![sym("x")], ScVal::Void),
        event(
            vec![sym("transfer"), addr_val(4), addr_val(5), asset_bytes()],
            i128_val(-9),
        ),
    ];
    let first = harvest_operation(op, &events, &decoding());
    let second = harvest_operation(op, &events, &decoding());
    assert_eq!(first, second);
}
