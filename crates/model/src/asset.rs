//! Assets, prices, signers and claim predicates.

use serde::{Deserialize, Serialize};

/// A classic asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Asset {
    Native,
    CreditAlphanum4 { code: String, issuer: String },
    CreditAlphanum12 { code: String, issuer: String },
}

impl Asset {
    /// SEP-11 form: `native` or `CODE:ISSUER`.
    pub fn canonical(&self) -> String {
        match self {
            Asset::Native => "native".to_string(),
            Asset::CreditAlphanum4 { code, issuer } | Asset::CreditAlphanum12 { code, issuer } => {
                format!("{code}:{issuer}")
            }
        }
    }
}

/// Asset held by a trust line; pool shares are referenced by pool id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TrustLineAsset {
    Native,
    CreditAlphanum4 { code: String, issuer: String },
    CreditAlphanum12 { code: String, issuer: String },
    PoolShare(String),
}

/// Asset named by a `ChangeTrust` operation; pool shares carry the pool
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ChangeTrustAsset {
    Native,
    CreditAlphanum4 { code: String, issuer: String },
    CreditAlphanum12 { code: String, issuer: String },
    PoolShare(LiquidityPoolParameters),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LiquidityPoolParameters {
    ConstantProduct {
        asset_a: Asset,
        asset_b: Asset,
        fee: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Liabilities {
    pub buying: i64,
    pub selling: i64,
}

/// A signer key. Every kind carries its StrKey form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SignerKey {
    Ed25519(String),
    PreAuthTx(String),
    HashX(String),
    Ed25519SignedPayload {
        key: String,
        ed25519: String,
        /// Hex-encoded payload.
        payload: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimant {
    pub destination: String,
    pub predicate: ClaimPredicate,
}

/// Condition under which a claimant may claim a balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ClaimPredicate {
    Unconditional,
    And(Vec<ClaimPredicate>),
    Or(Vec<ClaimPredicate>),
    Not(Option<Box<ClaimPredicate>>),
    BeforeAbsoluteTime(i64),
    BeforeRelativeTime(i64),
}
