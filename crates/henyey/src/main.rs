//! henyey-ingest - convert Stellar ledgers into JSON
//!
//! This binary reads `LedgerCloseMeta` values, converts each one into the
//! henyey domain model and writes it as JSON, one document per line.
//!
//! # Quick Start
//!
//! ```bash
//! # Convert a stellar-core metadata stream
//! henyey-ingest --testnet convert --input meta.xdr
//!
//! # Convert base64 values, one per line, into a file
//! henyey-ingest convert --input ledgers.b64 --format base64 --output ledgers.jsonl
//!
//! # Print only SEP-41 asset events
//! henyey-ingest --mainnet classify --input meta.xdr --asset-only
//! ```
//!
//! # Commands
//!
//! - **convert**: Convert ledgers to JSON
//! - **classify**: Print the harvested contract events only
//! - **sample-config**: Print sample configuration
//!
//! # Configuration
//!
//! Configuration can be provided via:
//! - A TOML configuration file (`--config <FILE>`)
//! - Built-in network defaults (`--testnet` or `--mainnet`)
//! - Environment variables (prefixed with `HENYEY_INGEST_`)
//!
//! Use `-` as the input or output path for stdin or stdout.

mod config;
mod logging;
mod pipeline;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use config::IngestConfig;
use logging::{LogConfig, LogFormat};
use pipeline::{classify_stream, convert_stream, InputFormat};

/// Convert Stellar LedgerCloseMeta into JSON
#[derive(Parser)]
#[command(name = "henyey-ingest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Log output format (overrides the configuration)
    #[arg(long, global = true)]
    log_format: Option<CliLogFormat>,

    /// Ledgers come from testnet (default)
    #[arg(long, global = true)]
    testnet: bool,

    /// Ledgers come from mainnet
    #[arg(long, global = true)]
    mainnet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Log output format for CLI
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliLogFormat {
    Text,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(fmt: CliLogFormat) -> Self {
        match fmt {
            CliLogFormat::Text => LogFormat::Text,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Convert ledgers into JSON documents
    Convert {
        /// Input file, or `-` for stdin
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Input encoding
        #[arg(long, value_enum, default_value = "stream")]
        format: InputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the harvested contract events of each ledger
    Classify {
        /// Input file, or `-` for stdin
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Input encoding
        #[arg(long, value_enum, default_value = "stream")]
        format: InputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only print decoded asset-standard events
        #[arg(long)]
        asset_only: bool,
    },

    /// Print sample configuration
    SampleConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::SampleConfig = cli.command {
        return cmd_sample_config();
    }

    let config = load_config(&cli)?;
    init_logging(&cli, &config)?;
    tracing::debug!(
        passphrase = %config.network.passphrase,
        decode_asset_events = config.events.decode_asset_events,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Convert {
            input,
            format,
            output,
        } => cmd_convert(&config, &input, format, output.as_deref()),

        Commands::Classify {
            input,
            format,
            output,
            asset_only,
        } => cmd_classify(&config, &input, format, output.as_deref(), asset_only),

        Commands::SampleConfig => cmd_sample_config(),
    }
}

/// Initialize the logging subsystem.
///
/// `--trace` and `--verbose` win over the configured level, `--log-format`
/// over the configured format.
fn init_logging(cli: &Cli, config: &IngestConfig) -> anyhow::Result<()> {
    let level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let format = match cli.log_format {
        Some(format) => format.into(),
        None => LogFormat::from_name(&config.logging.format),
    };

    logging::init(&LogConfig::default().with_level(level).with_format(format))?;
    tracing::debug!("Logging initialized");
    Ok(())
}

/// Load configuration from file or use network defaults.
fn load_config(cli: &Cli) -> anyhow::Result<IngestConfig> {
    if cli.testnet && cli.mainnet {
        anyhow::bail!("--testnet and --mainnet are mutually exclusive");
    }

    let mut config = match &cli.config {
        Some(path) => IngestConfig::from_file_with_env(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => {
            let mut config = if cli.mainnet {
                IngestConfig::mainnet()
            } else {
                IngestConfig::testnet()
            };
            config.apply_env_overrides();
            config
        }
    };

    // Network flags override the file.
    if cli.config.is_some() {
        if cli.mainnet {
            config.network = IngestConfig::mainnet().network;
        } else if cli.testnet {
            config.network = IngestConfig::testnet().network;
        }
    }

    config.validate()?;
    Ok(config)
}

fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(Box::new(file))
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Convert command handler.
fn cmd_convert(
    config: &IngestConfig,
    input: &Path,
    format: InputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    tracing::info!(input = %input.display(), ?format, "Converting ledgers");
    let reader = open_input(input)?;
    let mut writer = open_output(output)?;
    convert_stream(
        reader,
        format,
        &mut writer,
        &config.to_convert_options(),
        config.output.pretty,
    )?;
    Ok(())
}

/// Classify command handler.
fn cmd_classify(
    config: &IngestConfig,
    input: &Path,
    format: InputFormat,
    output: Option<&Path>,
    asset_only: bool,
) -> anyhow::Result<()> {
    tracing::info!(input = %input.display(), ?format, asset_only, "Classifying events");
    let reader = open_input(input)?;
    let mut writer = open_output(output)?;
    classify_stream(
        reader,
        format,
        &mut writer,
        &config.to_convert_options(),
        asset_only,
    )?;
    Ok(())
}

/// Sample config command handler.
fn cmd_sample_config() -> anyhow::Result<()> {
    println!("{}", IngestConfig::sample_config());
    Ok(())
}
