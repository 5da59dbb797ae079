//! Leaf conversions shared by the entity mappers: strings, keys, assets,
//! prices, signers and claim predicates.

use henyey_common::asset::{asset_code_name, asset_code_to_str};
use henyey_common::strkey::{
    account_id_to_strkey, claimable_balance_id_to_hex, ed25519_to_strkey, muxed_account_to_strkey,
    pool_id_to_hex, signer_key_to_strkey,
};
use henyey_model as model;
use stellar_xdr::curr as xdr;

pub(crate) fn string_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

pub(crate) fn account(id: &xdr::AccountId) -> String {
    account_id_to_strkey(id)
}

pub(crate) fn muxed(account: &xdr::MuxedAccount) -> String {
    muxed_account_to_strkey(account)
}

pub(crate) fn balance_id(id: &xdr::ClaimableBalanceId) -> String {
    claimable_balance_id_to_hex(id)
}

pub(crate) fn pool_id(id: &xdr::PoolId) -> String {
    pool_id_to_hex(id)
}

pub(crate) fn asset_code(code: &xdr::AssetCode) -> String {
    asset_code_name(code)
}

pub fn convert_asset(asset: &xdr::Asset) -> model::Asset {
    match asset {
        xdr::Asset::Native => model::Asset::Native,
        xdr::Asset::CreditAlphanum4(a) => model::Asset::CreditAlphanum4 {
            code: asset_code_to_str(&a.asset_code.0),
            issuer: account(&a.issuer),
        },
        xdr::Asset::CreditAlphanum12(a) => model::Asset::CreditAlphanum12 {
            code: asset_code_to_str(&a.asset_code.0),
            issuer: account(&a.issuer),
        },
    }
}

pub(crate) fn convert_assets(assets: &[xdr::Asset]) -> Vec<model::Asset> {
    assets.iter().map(convert_asset).collect()
}

pub fn convert_trust_line_asset(asset: &xdr::TrustLineAsset) -> model::TrustLineAsset {
    match asset {
        xdr::TrustLineAsset::Native => model::TrustLineAsset::Native,
        xdr::TrustLineAsset::CreditAlphanum4(a) => model::TrustLineAsset::CreditAlphanum4 {
            code: asset_code_to_str(&a.asset_code.0),
            issuer: account(&a.issuer),
        },
        xdr::TrustLineAsset::CreditAlphanum12(a) => model::TrustLineAsset::CreditAlphanum12 {
            code: asset_code_to_str(&a.asset_code.0),
            issuer: account(&a.issuer),
        },
        xdr::TrustLineAsset::PoolShare(id) => model::TrustLineAsset::PoolShare(pool_id(id)),
    }
}

pub fn convert_change_trust_asset(asset: &xdr::ChangeTrustAsset) -> model::ChangeTrustAsset {
    match asset {
        xdr::ChangeTrustAsset::Native => model::ChangeTrustAsset::Native,
        xdr::ChangeTrustAsset::CreditAlphanum4(a) => model::ChangeTrustAsset::CreditAlphanum4 {
            code: asset_code_to_str(&a.asset_code.0),
            issuer: account(&a.issuer),
        },
        xdr::ChangeTrustAsset::CreditAlphanum12(a) => model::ChangeTrustAsset::CreditAlphanum12 {
            code: asset_code_to_str(&a.asset_code.0),
            issuer: account(&a.issuer),
        },
        xdr::ChangeTrustAsset::PoolShare(params) => {
            model::ChangeTrustAsset::PoolShare(convert_pool_parameters(params))
        }
    }
}

pub(crate) fn convert_pool_parameters(
    params: &xdr::LiquidityPoolParameters,
) -> model::LiquidityPoolParameters {
    match params {
        xdr::LiquidityPoolParameters::LiquidityPoolConstantProduct(p) => {
            constant_product_parameters(p)
        }
    }
}

pub(crate) fn constant_product_parameters(
    p: &xdr::LiquidityPoolConstantProductParameters,
) -> model::LiquidityPoolParameters {
    model::LiquidityPoolParameters::ConstantProduct {
        asset_a: convert_asset(&p.asset_a),
        asset_b: convert_asset(&p.asset_b),
        fee: p.fee,
    }
}

pub(crate) fn convert_price(price: &xdr::Price) -> model::Price {
    model::Price {
        n: price.n,
        d: price.d,
    }
}

pub(crate) fn convert_liabilities(l: &xdr::Liabilities) -> model::Liabilities {
    model::Liabilities {
        buying: l.buying,
        selling: l.selling,
    }
}

pub fn convert_signer_key(key: &xdr::SignerKey) -> model::SignerKey {
    let strkey = signer_key_to_strkey(key);
    match key {
        xdr::SignerKey::Ed25519(_) => model::SignerKey::Ed25519(strkey),
        xdr::SignerKey::PreAuthTx(_) => model::SignerKey::PreAuthTx(strkey),
        xdr::SignerKey::HashX(_) => model::SignerKey::HashX(strkey),
        xdr::SignerKey::Ed25519SignedPayload(p) => model::SignerKey::Ed25519SignedPayload {
            key: strkey,
            ed25519: ed25519_to_strkey(&p.ed25519),
            payload: hex::encode(p.payload.as_slice()),
        },
    }
}

pub(crate) fn convert_signer(signer: &xdr::Signer) -> model::Signer {
    model::Signer {
        key: convert_signer_key(&signer.key),
        weight: signer.weight,
    }
}

pub(crate) fn convert_claimant(claimant: &xdr::Claimant) -> model::Claimant {
    match claimant {
        xdr::Claimant::ClaimantTypeV0(c) => model::Claimant {
            destination: account(&c.destination),
            predicate: convert_claim_predicate(&c.predicate),
        },
    }
}

pub(crate) fn convert_claimants(claimants: &[xdr::Claimant]) -> Vec<model::Claimant> {
    claimants.iter().map(convert_claimant).collect()
}

pub fn convert_claim_predicate(predicate: &xdr::ClaimPredicate) -> model::ClaimPredicate {
    match predicate {
        xdr::ClaimPredicate::Unconditional => model::ClaimPredicate::Unconditional,
        xdr::ClaimPredicate::And(preds) => {
            model::ClaimPredicate::And(preds.iter().map(convert_claim_predicate).collect())
        }
        xdr::ClaimPredicate::Or(preds) => {
            model::ClaimPredicate::Or(preds.iter().map(convert_claim_predicate).collect())
        }
        xdr::ClaimPredicate::Not(inner) => model::ClaimPredicate::Not(
            inner
                .as_ref()
                .map(|p| Box::new(convert_claim_predicate(p))),
        ),
        xdr::ClaimPredicate::BeforeAbsoluteTime(t) => model::ClaimPredicate::BeforeAbsoluteTime(*t),
        xdr::ClaimPredicate::BeforeRelativeTime(t) => model::ClaimPredicate::BeforeRelativeTime(*t),
    }
}
