//! Garment Costing CLI - run the cost derivation on documents stored as files.
//!
//! # Usage
//!
//! ```bash
//! # Recompute every derived field of a cost sheet (JSON or YAML)
//! costing cost-sheet sheets/abc-123.yaml
//!
//! # Same, overriding the default profit margin and zero-input policy
//! costing --profit-percentage 20 --input-policy truthy cost-sheet sheet.json
//!
//! # Recompute a sample-sales record, print YAML
//! costing --output yaml sample-sales sample.json
//!
//! # List the workflow actions a form would offer for a cost sheet
//! costing actions sheet.json
//! ```
//!
//! # Environment Variables
//!
//! - `COSTING_DEFAULT_PROFIT_PERCENTAGE` - see `garment_costing::config`
//! - `COSTING_INPUT_POLICY` - see `garment_costing::config`
//! - `COSTING_LOG_FORMAT` - `pretty` (default) or `json`
//! - `RUST_LOG` - log filter (default: `info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "costing")]
#[command(author, version, about = "Garment costing CLI tools")]
struct Cli {
    /// Default profit margin in percent (overrides `COSTING_DEFAULT_PROFIT_PERCENTAGE`)
    #[arg(long, global = true)]
    profit_percentage: Option<String>,

    /// Zero-input policy, `presence` or `truthy` (overrides `COSTING_INPUT_POLICY`)
    #[arg(long, global = true)]
    input_policy: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute a cost sheet's line items, totals and business key
    CostSheet {
        /// Path to a JSON or YAML cost sheet
        path: PathBuf,
    },
    /// Recompute a sample-sales record's amount and gross profit
    SampleSales {
        /// Path to a JSON or YAML sample-sales record
        path: PathBuf,
    },
    /// Show the workflow actions offered for a cost sheet
    Actions {
        /// Path to a JSON or YAML cost sheet
        path: PathBuf,
    },
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("COSTING_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let config = commands::resolve_config(
        cli.profit_percentage.as_deref(),
        cli.input_policy.as_deref(),
    )?;

    match cli.command {
        Commands::CostSheet { path } => commands::cost_sheet::recompute(&path, &config, cli.output),
        Commands::SampleSales { path } => {
            commands::sample_sales::recompute(&path, &config, cli.output)
        }
        Commands::Actions { path } => commands::cost_sheet::actions(&path, cli.output),
    }
}
