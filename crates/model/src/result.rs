//! Transaction and operation results.
//!
//! Every result union is reduced to its code (numeric value and protocol
//! name) plus the payload the protocol attaches to particular codes.

use henyey_common::Hash256;
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::entry::OfferEntry;

/// A protocol result code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCode {
    pub code: i32,
    pub name: String,
}

impl ResultCode {
    pub fn new(code: i32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub fee_charged: i64,
    pub code: ResultCode,
    /// Result of the wrapped transaction of a fee bump.
    pub inner: Option<InnerTransactionResult>,
    /// Present for `txSUCCESS` and `txFAILED`.
    pub operation_results: Option<Vec<OperationResult>>,
}

impl TransactionResult {
    /// Whether the transaction (or the inner transaction of a fee bump) applied.
    pub fn is_success(&self) -> bool {
        match &self.inner {
            Some(inner) => inner.code.code == 0,
            None => self.code.code == 0,
        }
    }

    /// Operation results of the applied transaction, looking through fee bumps.
    pub fn effective_operation_results(&self) -> Option<&[OperationResult]> {
        match &self.inner {
            Some(inner) => inner.operation_results.as_deref(),
            None => self.operation_results.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerTransactionResult {
    pub transaction_hash: Hash256,
    pub fee_charged: i64,
    pub code: ResultCode,
    pub operation_results: Option<Vec<OperationResult>>,
}

/// Outer operation result; `body` is present only for `opINNER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub code: ResultCode,
    pub body: Option<OperationResultBody>,
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        self.body.as_ref().is_some_and(|b| b.code().code == 0)
    }
}

/// Inner result, one kind per operation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OperationResultBody {
    CreateAccount(ResultCode),
    Payment(ResultCode),
    PathPaymentStrictReceive(PathPaymentResult),
    ManageSellOffer(ManageOfferResult),
    CreatePassiveSellOffer(ManageOfferResult),
    SetOptions(ResultCode),
    ChangeTrust(ResultCode),
    AllowTrust(ResultCode),
    AccountMerge(AccountMergeResult),
    Inflation(InflationResult),
    ManageData(ResultCode),
    BumpSequence(ResultCode),
    ManageBuyOffer(ManageOfferResult),
    PathPaymentStrictSend(PathPaymentResult),
    CreateClaimableBalance(CreateClaimableBalanceResult),
    ClaimClaimableBalance(ResultCode),
    BeginSponsoringFutureReserves(ResultCode),
    EndSponsoringFutureReserves(ResultCode),
    RevokeSponsorship(ResultCode),
    Clawback(ResultCode),
    ClawbackClaimableBalance(ResultCode),
    SetTrustLineFlags(ResultCode),
    LiquidityPoolDeposit(ResultCode),
    LiquidityPoolWithdraw(ResultCode),
    InvokeHostFunction(InvokeHostFunctionResult),
    ExtendFootprintTtl(ResultCode),
    RestoreFootprint(ResultCode),
}

impl OperationResultBody {
    /// The inner result code.
    pub fn code(&self) -> &ResultCode {
        use OperationResultBody::*;
        match self {
            CreateAccount(c) | Payment(c) | SetOptions(c) | ChangeTrust(c) | AllowTrust(c)
            | ManageData(c) | BumpSequence(c) | ClaimClaimableBalance(c)
            | BeginSponsoringFutureReserves(c) | EndSponsoringFutureReserves(c)
            | RevokeSponsorship(c) | Clawback(c) | ClawbackClaimableBalance(c)
            | SetTrustLineFlags(c) | LiquidityPoolDeposit(c) | LiquidityPoolWithdraw(c)
            | ExtendFootprintTtl(c) | RestoreFootprint(c) => c,
            PathPaymentStrictReceive(r) | PathPaymentStrictSend(r) => &r.code,
            ManageSellOffer(r) | CreatePassiveSellOffer(r) | ManageBuyOffer(r) => &r.code,
            AccountMerge(r) => &r.code,
            Inflation(r) => &r.code,
            CreateClaimableBalance(r) => &r.code,
            InvokeHostFunction(r) => &r.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPaymentResult {
    pub code: ResultCode,
    pub success: Option<PathPaymentSuccess>,
    /// Asset whose issuer is missing, for the `NO_ISSUER` code.
    pub no_issuer: Option<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPaymentSuccess {
    pub offers: Vec<ClaimAtom>,
    pub last: SimplePaymentResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePaymentResult {
    pub destination: String,
    pub asset: Asset,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageOfferResult {
    pub code: ResultCode,
    pub success: Option<ManageOfferSuccess>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageOfferSuccess {
    pub offers_claimed: Vec<ClaimAtom>,
    pub offer: ManageOfferEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ManageOfferEffect {
    Created(OfferEntry),
    Updated(OfferEntry),
    Deleted,
}

/// One trade against an offer or a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ClaimAtom {
    V0(ClaimOfferAtom),
    OrderBook(ClaimOfferAtom),
    LiquidityPool(ClaimLiquidityAtom),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOfferAtom {
    pub seller_id: String,
    pub offer_id: i64,
    pub asset_sold: Asset,
    pub amount_sold: i64,
    pub asset_bought: Asset,
    pub amount_bought: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLiquidityAtom {
    pub liquidity_pool_id: String,
    pub asset_sold: Asset,
    pub amount_sold: i64,
    pub asset_bought: Asset,
    pub amount_bought: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMergeResult {
    pub code: ResultCode,
    pub source_account_balance: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationResult {
    pub code: ResultCode,
    pub payouts: Option<Vec<InflationPayout>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationPayout {
    pub destination: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClaimableBalanceResult {
    pub code: ResultCode,
    pub balance_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeHostFunctionResult {
    pub code: ResultCode,
    /// Hash of the invocation's return value and events.
    pub success: Option<Hash256>,
}
