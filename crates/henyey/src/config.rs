//! Configuration for henyey-ingest.
//!
//! Configuration is read from a TOML file with four sections. Every field
//! has a default, so an empty file (or no file at all) gives a testnet setup
//! that converts everything.
//!
//! ```toml
//! [network]
//! passphrase = "Test SDF Network ; September 2015"
//!
//! [events]
//! decode_asset_events = true
//! include_diagnostic_events = true
//! use_diagnostic_events = false
//!
//! [output]
//! include_ledger_changes = true
//! pretty = false
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```
//!
//! Environment variables override the file:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `HENYEY_INGEST_NETWORK_PASSPHRASE` | `network.passphrase` |
//! | `HENYEY_INGEST_LOG_LEVEL` | `logging.level` |
//! | `HENYEY_INGEST_LOG_FORMAT` | `logging.format` |

use std::path::Path;

use henyey_common::network::{MAINNET_PASSPHRASE, TESTNET_PASSPHRASE};
use henyey_common::NetworkId;
use henyey_convert::ConvertOptions;
use serde::{Deserialize, Serialize};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Complete ingestion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network the input ledgers were closed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network passphrase. Transaction hashes depend on it.
    #[serde(default = "default_passphrase")]
    pub passphrase: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            passphrase: default_passphrase(),
        }
    }
}

fn default_passphrase() -> String {
    TESTNET_PASSPHRASE.to_string()
}

/// Contract event handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Classify and decode SEP-41 transfer, mint, clawback and burn events.
    #[serde(default = "default_true")]
    pub decode_asset_events: bool,

    /// Copy diagnostic events into the output.
    #[serde(default = "default_true")]
    pub include_diagnostic_events: bool,

    /// Harvest V3 operation events from the diagnostic list.
    #[serde(default)]
    pub use_diagnostic_events: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            decode_asset_events: true,
            include_diagnostic_events: true,
            use_diagnostic_events: false,
        }
    }
}

/// Shape of the JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub include_ledger_changes: bool,

    /// Pretty-print documents instead of writing one per line.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_ledger_changes: true,
            pretty: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text or json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl IngestConfig {
    pub fn testnet() -> Self {
        Self::default()
    }

    pub fn mainnet() -> Self {
        Self {
            network: NetworkConfig {
                passphrase: MAINNET_PASSPHRASE.to_string(),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a file, then apply environment overrides.
    pub fn from_file_with_env(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HENYEY_INGEST_NETWORK_PASSPHRASE") {
            self.network.passphrase = val;
        }
        if let Ok(val) = std::env::var("HENYEY_INGEST_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("HENYEY_INGEST_LOG_FORMAT") {
            self.logging.format = val;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.network.passphrase.trim().is_empty() {
            anyhow::bail!("network.passphrase must not be empty");
        }
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "Unknown log level {:?} (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }
        let format = self.logging.format.to_lowercase();
        if !LOG_FORMATS.contains(&format.as_str()) {
            anyhow::bail!(
                "Unknown log format {:?} (expected text or json)",
                self.logging.format
            );
        }
        Ok(())
    }

    pub fn network_id(&self) -> NetworkId {
        NetworkId::from_passphrase(&self.network.passphrase)
    }

    /// The part of the configuration the converter sees.
    pub fn to_convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            network_id: self.network_id(),
            include_ledger_changes: self.output.include_ledger_changes,
            decode_asset_events: self.events.decode_asset_events,
            include_diagnostic_events: self.events.include_diagnostic_events,
            use_diagnostic_events: self.events.use_diagnostic_events,
        }
    }

    /// Generate a sample configuration file.
    pub fn sample_config() -> String {
        toml::to_string_pretty(&Self::testnet()).unwrap_or_default()
    }
}
