//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `COSTING_DEFAULT_PROFIT_PERCENTAGE` - Profit margin used when a cost sheet
//!   leaves it unset (default: 15)
//! - `COSTING_INPUT_POLICY` - `presence` or `truthy`; how zero-valued inputs
//!   are treated (default: presence)

use garment_costing_core::Percentage;
use thiserror::Error;

use crate::input::InputPolicy;

const DEFAULT_PROFIT_VAR: &str = "COSTING_DEFAULT_PROFIT_PERCENTAGE";
const INPUT_POLICY_VAR: &str = "COSTING_INPUT_POLICY";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Derivation engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Profit margin applied when a cost sheet has none
    pub default_profit: Percentage,
    /// Interpretation of zero-valued inputs
    pub input_policy: InputPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_profit: Percentage::DEFAULT_PROFIT,
            input_policy: InputPolicy::Presence,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_profit = match lookup(DEFAULT_PROFIT_VAR) {
            Some(raw) => raw.parse::<Percentage>().map_err(|e| {
                ConfigError::InvalidEnvVar(DEFAULT_PROFIT_VAR.to_string(), e.to_string())
            })?,
            None => defaults.default_profit,
        };

        let input_policy = match lookup(INPUT_POLICY_VAR) {
            Some(raw) => raw
                .parse::<InputPolicy>()
                .map_err(|e| ConfigError::InvalidEnvVar(INPUT_POLICY_VAR.to_string(), e))?,
            None => defaults.input_policy,
        };

        Ok(Self {
            default_profit,
            input_policy,
        })
    }

    /// Replace the zero-input policy.
    #[must_use]
    pub const fn with_input_policy(mut self, input_policy: InputPolicy) -> Self {
        self.input_policy = input_policy;
        self
    }

    /// Replace the default profit margin.
    #[must_use]
    pub const fn with_default_profit(mut self, default_profit: Percentage) -> Self {
        self.default_profit = default_profit;
        self
    }
}
