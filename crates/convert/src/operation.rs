//! Operation bodies.

use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::codec::{
    account, asset_code, balance_id, convert_asset, convert_assets, convert_change_trust_asset,
    convert_claimants, convert_price, convert_signer, convert_signer_key, muxed, pool_id,
    string_lossy,
};
use crate::entry::convert_ledger_key;
use crate::soroban::{convert_authorization_entry, convert_host_function};

pub fn convert_operation(op: &xdr::Operation) -> model::Operation {
    model::Operation {
        source_account: op.source_account.as_ref().map(muxed),
        body: convert_operation_body(&op.body),
    }
}

fn convert_operation_body(body: &xdr::OperationBody) -> model::OperationBody {
    use model::OperationBody as M;
    use xdr::OperationBody as X;

    match body {
        X::CreateAccount(op) => M::CreateAccount(model::CreateAccountOp {
            destination: account(&op.destination),
            starting_balance: op.starting_balance,
        }),
        X::Payment(op) => M::Payment(model::PaymentOp {
            destination: muxed(&op.destination),
            asset: convert_asset(&op.asset),
            amount: op.amount,
        }),
        X::PathPaymentStrictReceive(op) => {
            M::PathPaymentStrictReceive(model::PathPaymentStrictReceiveOp {
                send_asset: convert_asset(&op.send_asset),
                send_max: op.send_max,
                destination: muxed(&op.destination),
                dest_asset: convert_asset(&op.dest_asset),
                dest_amount: op.dest_amount,
                path: convert_assets(&op.path),
            })
        }
        X::ManageSellOffer(op) => M::ManageSellOffer(model::ManageSellOfferOp {
            selling: convert_asset(&op.selling),
            buying: convert_asset(&op.buying),
            amount: op.amount,
            price: convert_price(&op.price),
            offer_id: op.offer_id,
        }),
        X::CreatePassiveSellOffer(op) => M::CreatePassiveSellOffer(model::CreatePassiveSellOfferOp {
            selling: convert_asset(&op.selling),
            buying: convert_asset(&op.buying),
            amount: op.amount,
            price: convert_price(&op.price),
        }),
        X::SetOptions(op) => M::SetOptions(model::SetOptionsOp {
            inflation_dest: op.inflation_dest.as_ref().map(account),
            clear_flags: op.clear_flags,
            set_flags: op.set_flags,
            master_weight: op.master_weight,
            low_threshold: op.low_threshold,
            med_threshold: op.med_threshold,
            high_threshold: op.high_threshold,
            home_domain: op.home_domain.as_ref().map(|d| string_lossy(d.as_vec())),
            signer: op.signer.as_ref().map(convert_signer),
        }),
        X::ChangeTrust(op) => M::ChangeTrust(model::ChangeTrustOp {
            line: convert_change_trust_asset(&op.line),
            limit: op.limit,
        }),
        X::AllowTrust(op) => M::AllowTrust(model::AllowTrustOp {
            trustor: account(&op.trustor),
            asset_code: asset_code(&op.asset),
            authorize: op.authorize,
        }),
        X::AccountMerge(destination) => M::AccountMerge(muxed(destination)),
        X::Inflation => M::Inflation,
        X::ManageData(op) => M::ManageData(model::ManageDataOp {
            data_name: string_lossy(op.data_name.as_vec()),
            data_value: op.data_value.as_ref().map(|v| hex::encode(v.0.as_slice())),
        }),
        X::BumpSequence(op) => M::BumpSequence(model::BumpSequenceOp {
            bump_to: op.bump_to.0,
        }),
        X::ManageBuyOffer(op) => M::ManageBuyOffer(model::ManageBuyOfferOp {
            selling: convert_asset(&op.selling),
            buying: convert_asset(&op.buying),
            buy_amount: op.buy_amount,
            price: convert_price(&op.price),
            offer_id: op.offer_id,
        }),
        X::PathPaymentStrictSend(op) => M::PathPaymentStrictSend(model::PathPaymentStrictSendOp {
            send_asset: convert_asset(&op.send_asset),
            send_amount: op.send_amount,
            destination: muxed(&op.destination),
            dest_asset: convert_asset(&op.dest_asset),
            dest_min: op.dest_min,
            path: convert_assets(&op.path),
        }),
        X::CreateClaimableBalance(op) => M::CreateClaimableBalance(model::CreateClaimableBalanceOp {
            asset: convert_asset(&op.asset),
            amount: op.amount,
            claimants: convert_claimants(&op.claimants),
        }),
        X::ClaimClaimableBalance(op) => M::ClaimClaimableBalance(model::ClaimableBalanceOp {
            balance_id: balance_id(&op.balance_id),
        }),
        X::BeginSponsoringFutureReserves(op) => {
            M::BeginSponsoringFutureReserves(model::BeginSponsoringFutureReservesOp {
                sponsored_id: account(&op.sponsored_id),
            })
        }
        X::EndSponsoringFutureReserves => M::EndSponsoringFutureReserves,
        X::RevokeSponsorship(op) => M::RevokeSponsorship(match op {
            xdr::RevokeSponsorshipOp::LedgerEntry(key) => {
                model::RevokeSponsorshipOp::LedgerEntry(convert_ledger_key(key))
            }
            xdr::RevokeSponsorshipOp::Signer(s) => model::RevokeSponsorshipOp::Signer {
                account_id: account(&s.account_id),
                signer_key: convert_signer_key(&s.signer_key),
            },
        }),
        X::Clawback(op) => M::Clawback(model::ClawbackOp {
            asset: convert_asset(&op.asset),
            from: muxed(&op.from),
            amount: op.amount,
        }),
        X::ClawbackClaimableBalance(op) => M::ClawbackClaimableBalance(model::ClaimableBalanceOp {
            balance_id: balance_id(&op.balance_id),
        }),
        X::SetTrustLineFlags(op) => M::SetTrustLineFlags(model::SetTrustLineFlagsOp {
            trustor: account(&op.trustor),
            asset: convert_asset(&op.asset),
            clear_flags: op.clear_flags,
            set_flags: op.set_flags,
        }),
        X::LiquidityPoolDeposit(op) => M::LiquidityPoolDeposit(model::LiquidityPoolDepositOp {
            liquidity_pool_id: pool_id(&op.liquidity_pool_id),
            max_amount_a: op.max_amount_a,
            max_amount_b: op.max_amount_b,
            min_price: convert_price(&op.min_price),
            max_price: convert_price(&op.max_price),
        }),
        X::LiquidityPoolWithdraw(op) => M::LiquidityPoolWithdraw(model::LiquidityPoolWithdrawOp {
            liquidity_pool_id: pool_id(&op.liquidity_pool_id),
            amount: op.amount,
            min_amount_a: op.min_amount_a,
            min_amount_b: op.min_amount_b,
        }),
        X::InvokeHostFunction(op) => M::InvokeHostFunction(model::InvokeHostFunctionOp {
            host_function: convert_host_function(&op.host_function),
            auth: op.auth.iter().map(convert_authorization_entry).collect(),
        }),
        X::ExtendFootprintTtl(op) => M::ExtendFootprintTtl(model::ExtendFootprintTtlOp {
            extend_to: op.extend_to,
        }),
        X::RestoreFootprint(_) => M::RestoreFootprint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_all_variants, snake_case, type_tag};
    use xdr::{AccountId, MuxedAccount, PublicKey, Uint256};

    fn account_id(seed: u8) -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519(Uint256([seed; 32])))
    }

    #[test]
    fn test_payment_to_muxed_destination() {
        let op = xdr::Operation {
            source_account: None,
            body: xdr::OperationBody::Payment(xdr::PaymentOp {
                destination: MuxedAccount::MuxedEd25519(xdr::MuxedAccountMed25519 {
                    id: 7,
                    ed25519: Uint256([2; 32]),
                }),
                asset: xdr::Asset::Native,
                amount: 50,
            }),
        };
        let converted = convert_operation(&op);
        assert_eq!(converted.source_account, None);
        match converted.body {
            model::OperationBody::Payment(p) => {
                assert!(p.destination.starts_with('M'));
                assert_eq!(p.asset, model::Asset::Native);
                assert_eq!(p.amount, 50);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_set_options_absent_fields_stay_absent() {
        let op = xdr::Operation {
            source_account: Some(MuxedAccount::Ed25519(Uint256([1; 32]))),
            body: xdr::OperationBody::SetOptions(xdr::SetOptionsOp {
                inflation_dest: None,
                clear_flags: None,
                set_flags: Some(2),
                master_weight: None,
                low_threshold: None,
                med_threshold: None,
                high_threshold: None,
                home_domain: None,
                signer: None,
            }),
        };
        let converted = convert_operation(&op);
        assert!(converted.source_account.is_some());
        assert_eq!(
            converted.body,
            model::OperationBody::SetOptions(model::SetOptionsOp {
                set_flags: Some(2),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_revoke_signer_sponsorship() {
        let op = xdr::Operation {
            source_account: None,
            body: xdr::OperationBody::RevokeSponsorship(xdr::RevokeSponsorshipOp::Signer(
                xdr::RevokeSponsorshipOpSigner {
                    account_id: account_id(3),
                    signer_key: xdr::SignerKey::HashX(Uint256([5; 32])),
                },
            )),
        };
        match convert_operation(&op).body {
            model::OperationBody::RevokeSponsorship(model::RevokeSponsorshipOp::Signer {
                account_id: a,
                signer_key: model::SignerKey::HashX(k),
            }) => {
                assert_eq!(a, account(&account_id(3)));
                assert!(k.starts_with('X'));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    fn one_of_each_operation() -> Vec<xdr::OperationBody> {
        use xdr::OperationBody as B;

        let muxed = || MuxedAccount::Ed25519(Uint256([4; 32]));
        let price = xdr::Price { n: 1, d: 2 };
        let balance_id = || xdr::ClaimableBalanceId::ClaimableBalanceIdTypeV0(xdr::Hash([6; 32]));
        let pool = || xdr::PoolId(xdr::Hash([7; 32]));
        vec![
            B::CreateAccount(xdr::CreateAccountOp {
                destination: account_id(1),
                starting_balance: 100,
            }),
            B::Payment(xdr::PaymentOp {
                destination: muxed(),
                asset: xdr::Asset::Native,
                amount: 1,
            }),
            B::PathPaymentStrictReceive(xdr::PathPaymentStrictReceiveOp {
                send_asset: xdr::Asset::Native,
                send_max: 10,
                destination: muxed(),
                dest_asset: xdr::Asset::Native,
                dest_amount: 5,
                path: xdr::VecM::default(),
            }),
            B::ManageSellOffer(xdr::ManageSellOfferOp {
                selling: xdr::Asset::Native,
                buying: xdr::Asset::Native,
                amount: 3,
                price: price.clone(),
                offer_id: 0,
            }),
            B::CreatePassiveSellOffer(xdr::CreatePassiveSellOfferOp {
                selling: xdr::Asset::Native,
                buying: xdr::Asset::Native,
                amount: 3,
                price: price.clone(),
            }),
            B::SetOptions(xdr::SetOptionsOp {
                inflation_dest: None,
                clear_flags: None,
                set_flags: None,
                master_weight: None,
                low_threshold: None,
                med_threshold: None,
                high_threshold: None,
                home_domain: None,
                signer: None,
            }),
            B::ChangeTrust(xdr::ChangeTrustOp {
                line: xdr::ChangeTrustAsset::Native,
                limit: 1000,
            }),
            B::AllowTrust(xdr::AllowTrustOp {
                trustor: account_id(2),
                asset: xdr::AssetCode::CreditAlphanum4(xdr::AssetCode4(*b"USD\0")),
                authorize: 1,
            }),
            B::AccountMerge(muxed()),
            B::Inflation,
            B::ManageData(xdr::ManageDataOp {
                data_name: xdr::String64::try_from(b"key".to_vec()).unwrap(),
                data_value: None,
            }),
            B::BumpSequence(xdr::BumpSequenceOp {
                bump_to: xdr::SequenceNumber(9),
            }),
            B::ManageBuyOffer(xdr::ManageBuyOfferOp {
                selling: xdr::Asset::Native,
                buying: xdr::Asset::Native,
                buy_amount: 3,
                price: price.clone(),
                offer_id: 0,
            }),
            B::PathPaymentStrictSend(xdr::PathPaymentStrictSendOp {
                send_asset: xdr::Asset::Native,
                send_amount: 10,
                destination: muxed(),
                dest_asset: xdr::Asset::Native,
                dest_min: 5,
                path: xdr::VecM::default(),
            }),
            B::CreateClaimableBalance(xdr::CreateClaimableBalanceOp {
                asset: xdr::Asset::Native,
                amount: 1,
                claimants: xdr::VecM::default(),
            }),
            B::ClaimClaimableBalance(xdr::ClaimClaimableBalanceOp {
                balance_id: balance_id(),
            }),
            B::BeginSponsoringFutureReserves(xdr::BeginSponsoringFutureReservesOp {
                sponsored_id: account_id(3),
            }),
            B::EndSponsoringFutureReserves,
            B::RevokeSponsorship(xdr::RevokeSponsorshipOp::LedgerEntry(xdr::LedgerKey::Account(
                xdr::LedgerKeyAccount {
                    account_id: account_id(3),
                },
            ))),
            B::Clawback(xdr::ClawbackOp {
                asset: xdr::Asset::Native,
                from: muxed(),
                amount: 1,
            }),
            B::ClawbackClaimableBalance(xdr::ClawbackClaimableBalanceOp {
                balance_id: balance_id(),
            }),
            B::SetTrustLineFlags(xdr::SetTrustLineFlagsOp {
                trustor: account_id(2),
                asset: xdr::Asset::Native,
                clear_flags: 0,
                set_flags: 1,
            }),
            B::LiquidityPoolDeposit(xdr::LiquidityPoolDepositOp {
                liquidity_pool_id: pool(),
                max_amount_a: 10,
                max_amount_b: 10,
                min_price: price.clone(),
                max_price: price,
            }),
            B::LiquidityPoolWithdraw(xdr::LiquidityPoolWithdrawOp {
                liquidity_pool_id: pool(),
                amount: 5,
                min_amount_a: 1,
                min_amount_b: 1,
            }),
            B::InvokeHostFunction(xdr::InvokeHostFunctionOp {
                host_function: xdr::HostFunction::UploadContractWasm(vec![0, 97, 115, 109].try_into().unwrap()),
                auth: xdr::VecM::default(),
            }),
            B::ExtendFootprintTtl(xdr::ExtendFootprintTtlOp {
                ext: xdr::ExtensionPoint::V0,
                extend_to: 100,
            }),
            B::RestoreFootprint(xdr::RestoreFootprintOp {
                ext: xdr::ExtensionPoint::V0,
            }),
        ]
    }

    #[test]
    fn test_every_operation_kind_keeps_its_kind() {
        let bodies = one_of_each_operation();
        let mut seen = Vec::new();
        for body in &bodies {
            let kind = body.discriminant().name();
            let op = xdr::Operation {
                source_account: None,
                body: body.clone(),
            };
            let converted = convert_operation(&op);
            assert_eq!(
                type_tag(serde_json::to_value(&converted.body).unwrap()),
                snake_case(kind),
                "{kind}"
            );
            seen.push(kind);
        }
        let all: Vec<_> = xdr::OperationType::VARIANTS.iter().map(|t| t.name()).collect();
        assert_all_variants(&seen, &all);
    }

    #[test]
    fn test_unit_operations() {
        let op = xdr::Operation {
            source_account: None,
            body: xdr::OperationBody::Inflation,
        };
        assert_eq!(convert_operation(&op).body, model::OperationBody::Inflation);
    }
}
