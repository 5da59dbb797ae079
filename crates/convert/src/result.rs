//! Transaction and operation results.
//!
//! Each result union keeps its numeric code and protocol name. Payloads are
//! carried only for the codes that have one.

use henyey_common::{Error, Hash256, Result};
use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::codec::{account, balance_id, convert_asset, pool_id};
use crate::entry::convert_offer;

macro_rules! code {
    ($union:expr) => {
        model::ResultCode::new($union.discriminant() as i32, $union.name())
    };
}

/// Convert the result of a transaction whose (inner) operations are `operations`.
///
/// # Errors
///
/// [`Error::InvalidData`] when the number of operation results differs from
/// the number of operations, and [`Error::UnknownVariant`] when an operation
/// result does not mirror the kind of its operation.
pub fn convert_transaction_result(
    result: &xdr::TransactionResult,
    operations: &[xdr::Operation],
) -> Result<model::TransactionResult> {
    use xdr::TransactionResultResult as R;

    let mut converted = model::TransactionResult {
        fee_charged: result.fee_charged,
        code: code!(result.result),
        inner: None,
        operation_results: None,
    };
    match &result.result {
        R::TxFeeBumpInnerSuccess(pair) | R::TxFeeBumpInnerFailed(pair) => {
            converted.inner = Some(convert_inner_result(pair, operations)?);
        }
        R::TxSuccess(results) | R::TxFailed(results) => {
            converted.operation_results = Some(convert_operation_results(results, operations)?);
        }
        _ => {}
    }
    Ok(converted)
}

fn convert_inner_result(
    pair: &xdr::InnerTransactionResultPair,
    operations: &[xdr::Operation],
) -> Result<model::InnerTransactionResult> {
    use xdr::InnerTransactionResultResult as R;

    let inner = &pair.result;
    let operation_results = match &inner.result {
        R::TxSuccess(results) | R::TxFailed(results) => {
            Some(convert_operation_results(results, operations)?)
        }
        _ => None,
    };
    Ok(model::InnerTransactionResult {
        transaction_hash: Hash256::from(&pair.transaction_hash),
        fee_charged: inner.fee_charged,
        code: code!(inner.result),
        operation_results,
    })
}

fn convert_operation_results(
    results: &[xdr::OperationResult],
    operations: &[xdr::Operation],
) -> Result<Vec<model::OperationResult>> {
    if results.len() != operations.len() {
        return Err(Error::InvalidData(format!(
            "{} operation results for {} operations",
            results.len(),
            operations.len()
        )));
    }
    operations
        .iter()
        .zip(results)
        .map(|(op, result)| convert_operation_result(&op.body, result))
        .collect()
}

/// Convert one operation result, checking it against its operation.
pub fn convert_operation_result(
    operation: &xdr::OperationBody,
    result: &xdr::OperationResult,
) -> Result<model::OperationResult> {
    let body = match result {
        xdr::OperationResult::OpInner(tr) => {
            if tr.discriminant() != operation.discriminant() {
                return Err(Error::unknown_variant(
                    format!("OperationResult for {}", operation.name()),
                    tr.discriminant() as i32,
                ));
            }
            Some(convert_result_body(tr))
        }
        _ => None,
    };
    Ok(model::OperationResult {
        code: code!(result),
        body,
    })
}

fn convert_result_body(tr: &xdr::OperationResultTr) -> model::OperationResultBody {
    use model::OperationResultBody as M;
    use xdr::OperationResultTr as X;

    match tr {
        X::CreateAccount(r) => M::CreateAccount(code!(r)),
        X::Payment(r) => M::Payment(code!(r)),
        X::PathPaymentStrictReceive(r) => M::PathPaymentStrictReceive(model::PathPaymentResult {
            code: code!(r),
            success: match r {
                xdr::PathPaymentStrictReceiveResult::Success(s) => {
                    Some(path_payment_success(&s.offers, &s.last))
                }
                _ => None,
            },
            no_issuer: match r {
                xdr::PathPaymentStrictReceiveResult::NoIssuer(asset) => Some(convert_asset(asset)),
                _ => None,
            },
        }),
        X::ManageSellOffer(r) => M::ManageSellOffer(model::ManageOfferResult {
            code: code!(r),
            success: match r {
                xdr::ManageSellOfferResult::Success(s) => Some(manage_offer_success(s)),
                _ => None,
            },
        }),
        X::CreatePassiveSellOffer(r) => M::CreatePassiveSellOffer(model::ManageOfferResult {
            code: code!(r),
            success: match r {
                xdr::ManageSellOfferResult::Success(s) => Some(manage_offer_success(s)),
                _ => None,
            },
        }),
        X::SetOptions(r) => M::SetOptions(code!(r)),
        X::ChangeTrust(r) => M::ChangeTrust(code!(r)),
        X::AllowTrust(r) => M::AllowTrust(code!(r)),
        X::AccountMerge(r) => M::AccountMerge(model::AccountMergeResult {
            code: code!(r),
            source_account_balance: match r {
                xdr::AccountMergeResult::Success(balance) => Some(*balance),
                _ => None,
            },
        }),
        X::Inflation(r) => M::Inflation(model::InflationResult {
            code: code!(r),
            payouts: match r {
                xdr::InflationResult::Success(payouts) => Some(
                    payouts
                        .iter()
                        .map(|p| model::InflationPayout {
                            destination: account(&p.destination),
                            amount: p.amount,
                        })
                        .collect(),
                ),
                _ => None,
            },
        }),
        X::ManageData(r) => M::ManageData(code!(r)),
        X::BumpSequence(r) => M::BumpSequence(code!(r)),
        X::ManageBuyOffer(r) => M::ManageBuyOffer(model::ManageOfferResult {
            code: code!(r),
            success: match r {
                xdr::ManageBuyOfferResult::Success(s) => Some(manage_offer_success(s)),
                _ => None,
            },
        }),
        X::PathPaymentStrictSend(r) => M::PathPaymentStrictSend(model::PathPaymentResult {
            code: code!(r),
            success: match r {
                xdr::PathPaymentStrictSendResult::Success(s) => {
                    Some(path_payment_success(&s.offers, &s.last))
                }
                _ => None,
            },
            no_issuer: match r {
                xdr::PathPaymentStrictSendResult::NoIssuer(asset) => Some(convert_asset(asset)),
                _ => None,
            },
        }),
        X::CreateClaimableBalance(r) => M::CreateClaimableBalance(model::CreateClaimableBalanceResult {
            code: code!(r),
            balance_id: match r {
                xdr::CreateClaimableBalanceResult::Success(id) => Some(balance_id(id)),
                _ => None,
            },
        }),
        X::ClaimClaimableBalance(r) => M::ClaimClaimableBalance(code!(r)),
        X::BeginSponsoringFutureReserves(r) => M::BeginSponsoringFutureReserves(code!(r)),
        X::EndSponsoringFutureReserves(r) => M::EndSponsoringFutureReserves(code!(r)),
        X::RevokeSponsorship(r) => M::RevokeSponsorship(code!(r)),
        X::Clawback(r) => M::Clawback(code!(r)),
        X::ClawbackClaimableBalance(r) => M::ClawbackClaimableBalance(code!(r)),
        X::SetTrustLineFlags(r) => M::SetTrustLineFlags(code!(r)),
        X::LiquidityPoolDeposit(r) => M::LiquidityPoolDeposit(code!(r)),
        X::LiquidityPoolWithdraw(r) => M::LiquidityPoolWithdraw(code!(r)),
        X::InvokeHostFunction(r) => M::InvokeHostFunction(model::InvokeHostFunctionResult {
            code: code!(r),
            success: match r {
                xdr::InvokeHostFunctionResult::Success(hash) => Some(Hash256::from(hash)),
                _ => None,
            },
        }),
        X::ExtendFootprintTtl(r) => M::ExtendFootprintTtl(code!(r)),
        X::RestoreFootprint(r) => M::RestoreFootprint(code!(r)),
    }
}

fn path_payment_success(
    offers: &[xdr::ClaimAtom],
    last: &xdr::SimplePaymentResult,
) -> model::PathPaymentSuccess {
    model::PathPaymentSuccess {
        offers: offers.iter().map(convert_claim_atom).collect(),
        last: model::SimplePaymentResult {
            destination: account(&last.destination),
            asset: convert_asset(&last.asset),
            amount: last.amount,
        },
    }
}

fn manage_offer_success(s: &xdr::ManageOfferSuccessResult) -> model::ManageOfferSuccess {
    let offer = match &s.offer {
        xdr::ManageOfferSuccessResultOffer::Created(o) => {
            model::ManageOfferEffect::Created(convert_offer(o))
        }
        xdr::ManageOfferSuccessResultOffer::Updated(o) => {
            model::ManageOfferEffect::Updated(convert_offer(o))
        }
        xdr::ManageOfferSuccessResultOffer::Deleted => model::ManageOfferEffect::Deleted,
    };
    model::ManageOfferSuccess {
        offers_claimed: s.offers_claimed.iter().map(convert_claim_atom).collect(),
        offer,
    }
}

fn convert_claim_atom(atom: &xdr::ClaimAtom) -> model::ClaimAtom {
    match atom {
        xdr::ClaimAtom::V0(a) => model::ClaimAtom::V0(model::ClaimOfferAtom {
            seller_id: account(&xdr::AccountId(xdr::PublicKey::PublicKeyTypeEd25519(
                a.seller_ed25519.clone(),
            ))),
            offer_id: a.offer_id,
            asset_sold: convert_asset(&a.asset_sold),
            amount_sold: a.amount_sold,
            asset_bought: convert_asset(&a.asset_bought),
            amount_bought: a.amount_bought,
        }),
        xdr::ClaimAtom::OrderBook(a) => model::ClaimAtom::OrderBook(model::ClaimOfferAtom {
            seller_id: account(&a.seller_id),
            offer_id: a.offer_id,
            asset_sold: convert_asset(&a.asset_sold),
            amount_sold: a.amount_sold,
            asset_bought: convert_asset(&a.asset_bought),
            amount_bought: a.amount_bought,
        }),
        xdr::ClaimAtom::LiquidityPool(a) => model::ClaimAtom::LiquidityPool(model::ClaimLiquidityAtom {
            liquidity_pool_id: pool_id(&a.liquidity_pool_id),
            asset_sold: convert_asset(&a.asset_sold),
            amount_sold: a.amount_sold,
            asset_bought: convert_asset(&a.asset_bought),
            amount_bought: a.amount_bought,
        }),
    }
}
