//! Payment Reconcile - CLI Binary
//!
//! Reads a payment draft as JSON, replays its allocation edits and prints
//! the reconciliation report.
//!
//! # Usage
//!
//! ```bash
//! # Read the draft from stdin, write the report to stdout
//! payment-reconcile < draft.json
//!
//! # Explicit files and a custom currency list
//! payment-reconcile --input draft.json --output report.json --registry currencies.json --pretty
//! ```
//!
//! # Environment Variables
//!
//! * `RECONCILE_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: warn)
//! * `RECONCILE_LOG_JSON` - Emit logs as JSON lines (default: false)
//! * `RECONCILE_PRETTY` - Pretty-print the report (default: false)
//! * `RECONCILE_REGISTRY_PATH` - JSON currency list replacing the built-in one
//!
//! # Exit Status
//!
//! * `0` - the payment reconciles
//! * `1` - the draft could not be read or loaded
//! * `2` - the payment or one of its edits was rejected

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::CurrencyRegistry;
use interface_cli::config::CliConfig;
use interface_cli::dto::PaymentDraftDocument;
use interface_cli::{reconcile, ReconcileReport, EXIT_FAILURE};

#[derive(Parser, Debug)]
#[command(name = "payment-reconcile", version, about = "Reconcile a payment draft against its invoices")]
struct Cli {
    /// Draft document (default: stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Report destination (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// JSON currency list replacing the built-in registry
    #[arg(short = 'r', long = "registry")]
    registry: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long = "pretty")]
    pretty: bool,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env().unwrap_or_default();
    init_tracing(&config);

    match run(&cli, &config) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Loads the draft and registry, reconciles, and writes the report
fn run(cli: &Cli, config: &CliConfig) -> anyhow::Result<ReconcileReport> {
    let registry_path = cli
        .registry
        .clone()
        .or_else(|| config.registry_path.as_ref().map(PathBuf::from));
    let registry = load_registry(registry_path)?;

    let raw = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading draft {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading draft from stdin")?;
            buffer
        }
    };
    let document = PaymentDraftDocument::from_json(&raw).context("parsing draft")?;

    tracing::info!(
        invoices = document.invoices.len(),
        edits = document.edits.len(),
        currency = %document.currency,
        "Reconciling payment draft"
    );
    let report = reconcile(&document, &registry).context("loading draft")?;

    let rendered = if cli.pretty || config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    writeln!(writer, "{rendered}")?;
    writer.flush()?;

    Ok(report)
}

/// Reads a currency list, or falls back to the built-in registry
fn load_registry(path: Option<PathBuf>) -> anyhow::Result<CurrencyRegistry> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading registry {}", path.display()))?;
            let registry = CurrencyRegistry::from_json(&json)
                .with_context(|| format!("loading registry {}", path.display()))?;
            let codes: Vec<&str> = registry.iter().map(|c| c.code.as_str()).collect();
            tracing::debug!(currencies = ?codes, "custom currency registry loaded");
            Ok(registry)
        }
        None => Ok(CurrencyRegistry::with_defaults()),
    }
}

/// Initializes the tracing subscriber; logs go to stderr so stdout only
/// carries the report
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(io::stderr))
            .init();
    }
}
