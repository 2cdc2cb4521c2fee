//! # Configuration Module
//!
//! Environment-driven settings for the bot, the report sink and its recovery
//! behaviour.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SHEETS_RANGE: &str = "Reports!A:G";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Recovery configuration for report sink calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryConfig {
    /// Maximum number of retry attempts after the first call
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Timeout for a single sink call in seconds
    pub operation_timeout_secs: u64,
    /// Circuit breaker failure threshold
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 500,
            max_retry_delay_ms: 5000,
            operation_timeout_secs: 10,
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

/// Google Sheets destination for problem reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// A1 range the rows are appended to, e.g. `Reports!A:G`
    pub range: String,
    /// OAuth bearer token with the spreadsheets scope
    pub access_token: String,
    pub api_base: String,
}

/// Complete bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Catalog file; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Reports are only logged when unset
    pub sheets: Option<SheetsConfig>,
    pub health_addr: SocketAddr,
    pub recovery: RecoveryConfig,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bot_token = var("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let sheets = match var("SHEETS_SPREADSHEET_ID") {
            Some(spreadsheet_id) => Some(SheetsConfig {
                spreadsheet_id,
                range: var("SHEETS_RANGE").unwrap_or_else(|| DEFAULT_SHEETS_RANGE.to_string()),
                access_token: var("SHEETS_ACCESS_TOKEN")
                    .ok_or(ConfigError::Missing("SHEETS_ACCESS_TOKEN"))?,
                api_base: var("SHEETS_API_BASE")
                    .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
            }),
            None => None,
        };

        let health_addr = var("HEALTH_ADDR").unwrap_or_else(|| DEFAULT_HEALTH_ADDR.to_string());
        let health_addr: SocketAddr = health_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "HEALTH_ADDR",
            value: health_addr.clone(),
        })?;

        let mut recovery = RecoveryConfig::default();
        if let Some(value) = var("SINK_MAX_RETRIES") {
            recovery.max_retries = parse_number("SINK_MAX_RETRIES", &value)?;
        }
        if let Some(value) = var("SINK_TIMEOUT_SECS") {
            recovery.operation_timeout_secs = parse_number("SINK_TIMEOUT_SECS", &value)?;
            // A zero timeout fails every sink call
            if recovery.operation_timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "SINK_TIMEOUT_SECS",
                    value,
                });
            }
        }

        Ok(Self {
            bot_token,
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
            sheets,
            health_addr,
            recovery,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
