//! Soroban value conversion.

use henyey_common::strkey::sc_address_to_string;
use henyey_common::{Hash256, Int128, Int256, UInt128, UInt256};
use henyey_model as model;
use stellar_xdr::curr as xdr;

use crate::codec::string_lossy;

pub fn convert_sc_val(value: &xdr::ScVal) -> model::ScVal {
    match value {
        xdr::ScVal::Bool(b) => model::ScVal::Bool(*b),
        xdr::ScVal::Void => model::ScVal::Void,
        xdr::ScVal::Error(e) => model::ScVal::Error(convert_sc_error(e)),
        xdr::ScVal::U32(v) => model::ScVal::U32(*v),
        xdr::ScVal::I32(v) => model::ScVal::I32(*v),
        xdr::ScVal::U64(v) => model::ScVal::U64(*v),
        xdr::ScVal::I64(v) => model::ScVal::I64(*v),
        xdr::ScVal::Timepoint(t) => model::ScVal::Timepoint(t.0),
        xdr::ScVal::Duration(d) => model::ScVal::Duration(d.0),
        xdr::ScVal::U128(parts) => model::ScVal::U128(UInt128::from(parts)),
        xdr::ScVal::I128(parts) => model::ScVal::I128(Int128::from(parts)),
        xdr::ScVal::U256(parts) => model::ScVal::U256(UInt256::from(parts)),
        xdr::ScVal::I256(parts) => model::ScVal::I256(Int256::from(parts)),
        xdr::ScVal::Bytes(b) => model::ScVal::Bytes(hex::encode(b.0.as_slice())),
        xdr::ScVal::String(s) => model::ScVal::String(string_lossy(s.0.as_vec())),
        xdr::ScVal::Symbol(s) => model::ScVal::Symbol(string_lossy(s.0.as_vec())),
        xdr::ScVal::Vec(v) => model::ScVal::Vec(v.as_ref().map(|v| convert_sc_vals(&v.0))),
        xdr::ScVal::Map(m) => model::ScVal::Map(m.as_ref().map(|m| convert_sc_map(&m.0))),
        xdr::ScVal::Address(a) => model::ScVal::Address(convert_sc_address(a)),
        xdr::ScVal::ContractInstance(instance) => {
            model::ScVal::ContractInstance(model::ScContractInstance {
                executable: convert_contract_executable(&instance.executable),
                storage: instance.storage.as_ref().map(|m| convert_sc_map(&m.0)),
            })
        }
        xdr::ScVal::LedgerKeyContractInstance => model::ScVal::LedgerKeyContractInstance,
        xdr::ScVal::LedgerKeyNonce(key) => model::ScVal::LedgerKeyNonce(key.nonce),
    }
}

pub(crate) fn convert_sc_vals(values: &[xdr::ScVal]) -> Vec<model::ScVal> {
    values.iter().map(convert_sc_val).collect()
}

fn convert_sc_map(entries: &[xdr::ScMapEntry]) -> Vec<model::ScMapEntry> {
    entries
        .iter()
        .map(|e| model::ScMapEntry {
            key: convert_sc_val(&e.key),
            val: convert_sc_val(&e.val),
        })
        .collect()
}

pub fn convert_sc_address(address: &xdr::ScAddress) -> model::ScAddress {
    let rendered = sc_address_to_string(address);
    match address {
        xdr::ScAddress::Account(_) => model::ScAddress::Account(rendered),
        xdr::ScAddress::Contract(_) => model::ScAddress::Contract(rendered),
        xdr::ScAddress::MuxedAccount(_) => model::ScAddress::MuxedAccount(rendered),
        xdr::ScAddress::ClaimableBalance(_) => model::ScAddress::ClaimableBalance(rendered),
        xdr::ScAddress::LiquidityPool(_) => model::ScAddress::LiquidityPool(rendered),
    }
}

fn convert_sc_error(error: &xdr::ScError) -> model::ScError {
    let code = |c: &xdr::ScErrorCode| c.name().to_string();
    match error {
        xdr::ScError::Contract(c) => model::ScError::Contract(*c),
        xdr::ScError::WasmVm(c) => model::ScError::WasmVm(code(c)),
        xdr::ScError::Context(c) => model::ScError::Context(code(c)),
        xdr::ScError::Storage(c) => model::ScError::Storage(code(c)),
        xdr::ScError::Object(c) => model::ScError::Object(code(c)),
        xdr::ScError::Crypto(c) => model::ScError::Crypto(code(c)),
        xdr::ScError::Events(c) => model::ScError::Events(code(c)),
        xdr::ScError::Budget(c) => model::ScError::Budget(code(c)),
        xdr::ScError::Value(c) => model::ScError::Value(code(c)),
        xdr::ScError::Auth(c) => model::ScError::Auth(code(c)),
    }
}

pub(crate) fn convert_contract_executable(
    executable: &xdr::ContractExecutable,
) -> model::ContractExecutable {
    match executable {
        xdr::ContractExecutable::Wasm(hash) => model::ContractExecutable::Wasm(Hash256::from(hash)),
        xdr::ContractExecutable::StellarAsset => model::ContractExecutable::StellarAsset,
    }
}
