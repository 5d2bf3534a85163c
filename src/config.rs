//! Configuration management for the gas price integration
//!
//! Every setting has a default that reproduces the fixed upstream behaviour,
//! so an empty or missing YAML file yields a working configuration.

use crate::error::{GasPriceError, Result};
use crate::logging::parse_log_level;
use crate::timezone::Timezone;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// EnergyZero GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.energyzero.nl/v1/gql";

/// Refresh cadence of the coordinator
pub const DEFAULT_UPDATE_INTERVAL_SECONDS: u64 = 3600;

fn default_user_agent() -> String {
    format!("energyzero-gas-prices/{}", env!("APP_VERSION"))
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pricing API connection settings
    pub api: ApiConfig,

    /// Seconds between two scheduled refreshes
    pub update_interval_seconds: u64,

    /// `local` for the host clock, otherwise an IANA zone such as `Europe/Amsterdam`
    pub timezone: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Pricing API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// GraphQL endpoint receiving the price query
    pub endpoint: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Whether to emit JSON lines instead of plain text
    pub json_format: bool,

    /// Whether to log to stdout at all
    pub console_output: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            json_format: false,
            console_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            update_interval_seconds: DEFAULT_UPDATE_INTERVAL_SECONDS,
            timezone: "local".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from the first default location that exists, else defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            "energyzero_gas_config.yaml",
            "/data/energyzero_gas_config.yaml",
            "/etc/energyzero-gas/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_seconds)
    }

    /// Parsed form of [`Config::timezone`]
    pub fn timezone(&self) -> Result<Timezone> {
        self.timezone.parse()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.api.endpoint.trim();
        if endpoint.is_empty() {
            return Err(GasPriceError::validation(
                "api.endpoint",
                "Endpoint cannot be empty",
            ));
        }
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(GasPriceError::validation(
                "api.endpoint",
                format!("Unsupported URL scheme: {}", endpoint),
            ));
        }

        if self.api.timeout_seconds == 0 {
            return Err(GasPriceError::validation(
                "api.timeout_seconds",
                "Must be greater than 0",
            ));
        }

        if self.update_interval_seconds == 0 {
            return Err(GasPriceError::validation(
                "update_interval_seconds",
                "Must be greater than 0",
            ));
        }

        if let Err(e) = self.timezone() {
            return Err(GasPriceError::validation("timezone", e.to_string()));
        }

        if let Err(e) = parse_log_level(&self.logging.level) {
            return Err(GasPriceError::validation("logging.level", e.to_string()));
        }

        Ok(())
    }
}
