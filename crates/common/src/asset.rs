//! Asset naming helpers.
//!
//! Classic assets are written in their SEP-11 form: `native` for lumens and
//! `CODE:ISSUER` for credit assets. Stellar asset contracts put that string
//! in the last topic of the events they emit, and the contract id of such a
//! contract is derived from the network id and the asset.
//!
//! # Examples
//!
//! ```rust
//! use henyey_common::asset::asset_code_to_str;
//!
//! let code = [b'U', b'S', b'D', 0];
//! assert_eq!(asset_code_to_str(&code), "USD");
//! ```

use stellar_xdr::curr::{
    AlphaNum12, AlphaNum4, Asset, AssetCode, AssetCode12, AssetCode4, ContractId,
    ContractIdPreimage, Hash, HashIdPreimage, HashIdPreimageContractId,
};

use crate::error::{Error, Result};
use crate::network::NetworkId;
use crate::strkey::account_id_from_strkey;
use crate::types::Hash256;

/// SEP-11 name of the native asset.
pub const NATIVE_ASSET: &str = "native";

/// Convert an asset code byte array to a string.
///
/// Reads bytes until a null byte is encountered or the end of the array.
///
/// ```rust
/// use henyey_common::asset::asset_code_to_str;
///
/// let code12 = [b'M', b'Y', b'T', b'O', b'K', b'E', b'N', 0, 0, 0, 0, 0];
/// assert_eq!(asset_code_to_str(&code12), "MYTOKEN");
/// ```
pub fn asset_code_to_str<const N: usize>(code: &[u8; N]) -> String {
    let len = code.iter().position(|&b| b == 0).unwrap_or(N);
    String::from_utf8_lossy(&code[..len]).into_owned()
}

/// Code of an [`AssetCode`] as used by `AllowTrust`.
pub fn asset_code_name(code: &AssetCode) -> String {
    match code {
        AssetCode::CreditAlphanum4(c) => asset_code_to_str(&c.0),
        AssetCode::CreditAlphanum12(c) => asset_code_to_str(&c.0),
    }
}

/// Parse a SEP-11 asset string.
///
/// Codes of one to four bytes become `CreditAlphanum4`, five to twelve bytes
/// `CreditAlphanum12`.
pub fn parse_asset(s: &str) -> Result<Asset> {
    if s == NATIVE_ASSET {
        return Ok(Asset::Native);
    }
    let (code, issuer) = s
        .split_once(':')
        .ok_or_else(|| Error::InvalidData(format!("asset {s:?} is not CODE:ISSUER")))?;
    let issuer = account_id_from_strkey(issuer)?;
    let code_bytes = code.as_bytes();
    match code_bytes.len() {
        1..=4 => {
            let mut buf = [0u8; 4];
            buf[..code_bytes.len()].copy_from_slice(code_bytes);
            Ok(Asset::CreditAlphanum4(AlphaNum4 {
                asset_code: AssetCode4(buf),
                issuer,
            }))
        }
        5..=12 => {
            let mut buf = [0u8; 12];
            buf[..code_bytes.len()].copy_from_slice(code_bytes);
            Ok(Asset::CreditAlphanum12(AlphaNum12 {
                asset_code: AssetCode12(buf),
                issuer,
            }))
        }
        n => Err(Error::InvalidData(format!(
            "asset code {code:?} has invalid length {n}"
        ))),
    }
}

/// Contract id of the Stellar asset contract for `asset` on `network_id`.
pub fn asset_contract_id(network_id: &NetworkId, asset: &Asset) -> Result<ContractId> {
    let preimage = HashIdPreimage::ContractId(HashIdPreimageContractId {
        network_id: Hash::from(*network_id),
        contract_id_preimage: ContractIdPreimage::Asset(asset.clone()),
    });
    let hash = Hash256::hash_xdr(&preimage)?;
    Ok(ContractId(Hash::from(hash)))
}
