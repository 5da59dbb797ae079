//! Conversion settings.

use henyey_common::NetworkId;
use henyey_events::HarvestOptions;

/// Settings that shape the converted output.
///
/// These carry no I/O concerns; the binary builds them from its
/// configuration file.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Network whose passphrase binds transaction hashes and Stellar asset
    /// contract ids.
    pub network_id: NetworkId,
    /// Emit ledger entry changes (fee, transaction and operation level).
    pub include_ledger_changes: bool,
    /// Classify and decode asset-standard events.
    pub decode_asset_events: bool,
    /// Copy diagnostic events into the transaction meta.
    pub include_diagnostic_events: bool,
    /// For V3 meta, harvest operation events from the diagnostic list
    /// instead of the Soroban event list.
    pub use_diagnostic_events: bool,
}

impl ConvertOptions {
    pub fn new(network_id: NetworkId) -> Self {
        Self {
            network_id,
            include_ledger_changes: true,
            decode_asset_events: true,
            include_diagnostic_events: true,
            use_diagnostic_events: false,
        }
    }

    pub(crate) fn harvest_options(&self) -> HarvestOptions {
        HarvestOptions {
            decode_asset_events: self.decode_asset_events,
            network_id: Some(self.network_id),
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new(NetworkId::testnet())
    }
}
