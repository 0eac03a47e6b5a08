//! CLI subcommands and the file handling they share.

pub mod cost_sheet;
pub mod sample_sales;

use std::path::Path;

use clap::ValueEnum;
use garment_costing::{ConfigError, EngineConfig, InputPolicy};
use garment_costing_core::Percentage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command-line flag has an invalid value.
    #[error("Invalid value for --{flag}: {reason}")]
    InvalidArgument { flag: &'static str, reason: String },

    /// The input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The input file is not a valid JSON document of the expected shape.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    /// The input file is not a valid YAML document of the expected shape.
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    /// The result could not be serialized.
    #[error("Cannot serialize output: {0}")]
    Output(String),
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Engine configuration from the environment, with flag overrides applied.
///
/// `.env` has already been loaded by `main`.
///
/// # Errors
///
/// Returns an error if an environment variable or flag cannot be parsed.
pub fn resolve_config(
    profit_percentage: Option<&str>,
    input_policy: Option<&str>,
) -> Result<EngineConfig, CommandError> {
    let config = EngineConfig::from_lookup(|key| std::env::var(key).ok())?;
    let config = apply_flags(config, profit_percentage, input_policy)?;

    tracing::debug!(
        default_profit = %config.default_profit,
        input_policy = %config.input_policy,
        "Resolved engine configuration"
    );
    Ok(config)
}

/// Overlay command-line flags on a configuration.
///
/// # Errors
///
/// Returns [`CommandError::InvalidArgument`] if a flag value cannot be parsed.
pub fn apply_flags(
    mut config: EngineConfig,
    profit_percentage: Option<&str>,
    input_policy: Option<&str>,
) -> Result<EngineConfig, CommandError> {
    if let Some(raw) = profit_percentage {
        let profit = raw
            .parse::<Percentage>()
            .map_err(|e| CommandError::InvalidArgument {
                flag: "profit-percentage",
                reason: e.to_string(),
            })?;
        config = config.with_default_profit(profit);
    }
    if let Some(raw) = input_policy {
        let policy = raw
            .parse::<InputPolicy>()
            .map_err(|reason| CommandError::InvalidArgument {
                flag: "input-policy",
                reason,
            })?;
        config = config.with_input_policy(policy);
    }
    Ok(config)
}

/// Read a document from a `.json`, `.yaml` or `.yml` file.
///
/// Files with any other extension are parsed as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: display.clone(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    tracing::info!(path = %path.display(), yaml = is_yaml, "Loading document");

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| CommandError::Yaml {
            path: display,
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| CommandError::Json {
            path: display,
            source,
        })
    }
}

/// Render a value in the requested format.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CommandError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| CommandError::Output(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CommandError::Output(e.to_string()))
        }
    }
}

/// Print a value to stdout in the requested format.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn emit<T: Serialize>(value: &T, format: OutputFormat) -> Result<(), CommandError> {
    let rendered = render(value, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}
