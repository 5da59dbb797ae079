//! Smart-contract values.

use henyey_common::{Hash256, Int128, Int256, UInt128, UInt256};
use serde::{Deserialize, Serialize};

/// A Soroban value.
///
/// `Vec` and `Map` keep the protocol's optional payload: `None` is an absent
/// collection, `Some(vec![])` a present but empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScVal {
    Bool(bool),
    Void,
    Error(ScError),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128(UInt128),
    I128(Int128),
    U256(UInt256),
    I256(Int256),
    /// Hex-encoded bytes.
    Bytes(String),
    String(String),
    Symbol(String),
    Vec(Option<Vec<ScVal>>),
    Map(Option<Vec<ScMapEntry>>),
    Address(ScAddress),
    ContractInstance(ScContractInstance),
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScMapEntry {
    pub key: ScVal,
    pub val: ScVal,
}

/// An address, rendered as StrKey for accounts and contracts and as hex for
/// claimable balances and liquidity pools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScAddress {
    Account(String),
    Contract(String),
    MuxedAccount(String),
    ClaimableBalance(String),
    LiquidityPool(String),
}

/// A contract error. Host error kinds carry the name of their error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScError {
    Contract(u32),
    WasmVm(String),
    Context(String),
    Storage(String),
    Object(String),
    Crypto(String),
    Events(String),
    Budget(String),
    Value(String),
    Auth(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContractExecutable {
    Wasm(Hash256),
    StellarAsset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScContractInstance {
    pub executable: ContractExecutable,
    pub storage: Option<Vec<ScMapEntry>>,
}
