//! Asset-standard event kinds and their wire names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a SEP-41 asset event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetEventKind {
    Transfer,
    Mint,
    Clawback,
    Burn,
}

/// Name to kind lookup. The names are the first-topic symbols the standard
/// defines and never change.
pub const ASSET_EVENT_NAMES: &[(&str, AssetEventKind)] = &[
    ("transfer", AssetEventKind::Transfer),
    ("mint", AssetEventKind::Mint),
    ("clawback", AssetEventKind::Clawback),
    ("burn", AssetEventKind::Burn),
];

impl AssetEventKind {
    /// Look up a kind by its first-topic symbol.
    pub fn from_name(name: &str) -> Option<Self> {
        ASSET_EVENT_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            AssetEventKind::Transfer => "transfer",
            AssetEventKind::Mint => "mint",
            AssetEventKind::Clawback => "clawback",
            AssetEventKind::Burn => "burn",
        }
    }

    /// Exact number of topics an event of this kind carries: the name, the
    /// participants and the asset.
    pub fn topic_count(self) -> usize {
        match self {
            AssetEventKind::Transfer | AssetEventKind::Mint | AssetEventKind::Clawback => 4,
            AssetEventKind::Burn => 3,
        }
    }
}

impl fmt::Display for AssetEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
