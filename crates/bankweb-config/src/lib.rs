//! Configuration management for bankweb
//!
//! This module handles loading, validation, and management of
//! bankweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorDetails, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the data files
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// JSON file with the initial transaction records
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            transactions_file: default_transactions_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_transactions_file() -> String {
    "transactions.json".to_string()
}

/// Transaction history page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Days covered by the initial date filter
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
    /// Search input debounce, applied by the page
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Simulated refresh latency
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    /// Initial list layout
    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_window_days: default_window_days(),
            search_debounce_ms: default_search_debounce_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            default_view: ViewMode::default(),
        }
    }
}

fn default_window_days() -> u32 {
    30
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_refresh_delay_ms() -> u64 {
    1500
}

/// Transaction list layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One row per transaction
    List,
    /// Grid of cards
    Card,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::List
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "card" => Ok(ViewMode::Card),
            _ => Err(format!("Invalid view mode: {}", s)),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::List => write!(f, "list"),
            ViewMode::Card => write!(f, "card"),
        }
    }
}

/// Currency formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol placed before amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Flash notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a flash stays visible
    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_hide_ms: default_auto_hide_ms(),
        }
    }
}

fn default_auto_hide_ms() -> u64 {
    3000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data file settings
    #[serde(default)]
    pub data: DataConfig,
    /// Transaction history page settings
    #[serde(default)]
    pub history: HistoryConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Flash notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.history.default_window_days == 0 || self.history.default_window_days > 3650 {
            return Err(ConfigError::InvalidValue {
                field: "history.default_window_days".to_string(),
                reason: "Window must be between 1 and 3650 days".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the transaction data file
    pub fn transactions_path(&self) -> PathBuf {
        self.data.path.join(&self.data.transactions_file)
    }
}
