//! Textual rendering of keys, accounts and addresses.
//!
//! Keys that users recognise by their StrKey form are rendered that way
//! (`G...` accounts, `M...` muxed accounts, `C...` contracts, `T...` pre-auth
//! transactions, `X...` hash-x signers, `P...` signed payloads). Identifiers
//! that are plain hashes (claimable balance ids, liquidity pool ids) are
//! rendered as lowercase hex.

use stellar_xdr::curr::{
    AccountId, ClaimableBalanceId, ContractId, MuxedAccount, MuxedEd25519Account, PoolId,
    PublicKey, ScAddress, SignerKey, Uint256,
};

use crate::error::{Error, Result};

/// Render an ed25519 public key as a `G...` account id.
pub fn ed25519_to_strkey(key: &Uint256) -> String {
    stellar_strkey::ed25519::PublicKey(key.0).to_string()
}

/// Render an [`AccountId`] as a `G...` StrKey.
pub fn account_id_to_strkey(account_id: &AccountId) -> String {
    match &account_id.0 {
        PublicKey::PublicKeyTypeEd25519(key) => ed25519_to_strkey(key),
    }
}

/// Parse a `G...` StrKey into an [`AccountId`].
pub fn account_id_from_strkey(s: &str) -> Result<AccountId> {
    let pk = stellar_strkey::ed25519::PublicKey::from_string(s)
        .map_err(|e| Error::InvalidData(format!("invalid account id {s}: {e}")))?;
    Ok(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(pk.0))))
}

/// Render a [`MuxedAccount`]: plain accounts as `G...`, multiplexed ones as `M...`.
pub fn muxed_account_to_strkey(account: &MuxedAccount) -> String {
    match account {
        MuxedAccount::Ed25519(key) => ed25519_to_strkey(key),
        MuxedAccount::MuxedEd25519(m) => stellar_strkey::ed25519::MuxedAccount {
            ed25519: m.ed25519.0,
            id: m.id,
        }
        .to_string(),
    }
}

fn muxed_ed25519_to_strkey(account: &MuxedEd25519Account) -> String {
    stellar_strkey::ed25519::MuxedAccount {
        ed25519: account.ed25519.0,
        id: account.id,
    }
    .to_string()
}

/// Render a contract id as a `C...` StrKey.
pub fn contract_id_to_strkey(contract_id: &ContractId) -> String {
    stellar_strkey::Contract(contract_id.0 .0).to_string()
}

/// Render a claimable balance id as hex of its V0 hash.
pub fn claimable_balance_id_to_hex(id: &ClaimableBalanceId) -> String {
    match id {
        ClaimableBalanceId::ClaimableBalanceIdTypeV0(hash) => hex::encode(hash.0),
    }
}

/// Render a liquidity pool id as hex.
pub fn pool_id_to_hex(id: &PoolId) -> String {
    hex::encode(id.0 .0)
}

/// Render any [`ScAddress`] as a single string.
///
/// Account, muxed account and contract addresses use StrKey. Claimable
/// balance and liquidity pool addresses use the same hex form as their
/// stand-alone ids.
pub fn sc_address_to_string(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(account_id) => account_id_to_strkey(account_id),
        ScAddress::Contract(contract_id) => contract_id_to_strkey(contract_id),
        ScAddress::MuxedAccount(muxed) => muxed_ed25519_to_strkey(muxed),
        ScAddress::ClaimableBalance(id) => claimable_balance_id_to_hex(id),
        ScAddress::LiquidityPool(id) => pool_id_to_hex(id),
    }
}

/// Render a [`SignerKey`] in its StrKey form.
pub fn signer_key_to_strkey(key: &SignerKey) -> String {
    match key {
        SignerKey::Ed25519(k) => ed25519_to_strkey(k),
        SignerKey::PreAuthTx(h) => stellar_strkey::PreAuthTx(h.0).to_string(),
        SignerKey::HashX(h) => stellar_strkey::HashX(h.0).to_string(),
        SignerKey::Ed25519SignedPayload(p) => stellar_strkey::ed25519::SignedPayload {
            ed25519: p.ed25519.0,
            payload: p.payload.to_vec(),
        }
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{Hash, MuxedAccountMed25519};

    const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    fn account(seed: u8) -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519(Uint256([seed; 32])))
    }

    #[test]
    fn test_zero_account_strkey() {
        assert_eq!(account_id_to_strkey(&account(0)), ZERO_ACCOUNT);
    }

    #[test]
    fn test_account_strkey_round_trip() {
        let id = account(7);
        let s = account_id_to_strkey(&id);
        assert!(s.starts_with('G'));
        assert_eq!(account_id_from_strkey(&s).unwrap(), id);
    }

    #[test]
    fn test_account_from_bad_strkey() {
        let err = account_id_from_strkey("not-a-key").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_muxed_account_rendering() {
        let plain = MuxedAccount::Ed25519(Uint256([0; 32]));
        assert_eq!(muxed_account_to_strkey(&plain), ZERO_ACCOUNT);

        let muxed = MuxedAccount::MuxedEd25519(MuxedAccountMed25519 {
            id: 42,
            ed25519: Uint256([3; 32]),
        });
        assert!(muxed_account_to_strkey(&muxed).starts_with('M'));
    }

    #[test]
    fn test_sc_address_rendering() {
        let contract = ScAddress::Contract(ContractId(Hash([1; 32])));
        assert!(sc_address_to_string(&contract).starts_with('C'));

        let account_addr = ScAddress::Account(account(0));
        assert_eq!(sc_address_to_string(&account_addr), ZERO_ACCOUNT);

        let pool = ScAddress::LiquidityPool(PoolId(Hash([0xab; 32])));
        assert_eq!(sc_address_to_string(&pool), "ab".repeat(32));

        let balance = ScAddress::ClaimableBalance(ClaimableBalanceId::ClaimableBalanceIdTypeV0(
            Hash([0x0f; 32]),
        ));
        assert_eq!(sc_address_to_string(&balance), "0f".repeat(32));
    }

    #[test]
    fn test_signer_key_prefixes() {
        assert!(signer_key_to_strkey(&SignerKey::Ed25519(Uint256([1; 32]))).starts_with('G'));
        assert!(signer_key_to_strkey(&SignerKey::PreAuthTx(Uint256([1; 32]))).starts_with('T'));
        assert!(signer_key_to_strkey(&SignerKey::HashX(Uint256([1; 32]))).starts_with('X'));
    }
}
