//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_STORE_NAME=acme                                         │
//! │     STOREFRONT_API_VERSION=2025-07                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $STOREFRONT_CONFIG, else                                           │
//! │     ~/.config/shop/storefront.toml (Linux)                             │
//! │     ~/Library/Application Support/com.storefront.shop/storefront.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     dev-store, 2025-07, development, USD, 500 ms add delay             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "acme"
//! api_version = "2025-07"
//! environment = "production"
//! currency_code = "EUR"
//! add_delay_ms = 250
//! catalog_path = "/srv/storefront/catalog.json"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::{Money, DEFAULT_CURRENCY_CODE};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has a value that is not allowed.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

// =============================================================================
// API Version
// =============================================================================

/// Storefront API version to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiVersion {
    #[serde(rename = "unstable")]
    Unstable,
    #[serde(rename = "2025-01")]
    V2025_01,
    #[serde(rename = "2025-04")]
    V2025_04,
    #[default]
    #[serde(rename = "2025-07")]
    V2025_07,
    #[serde(rename = "2025-10")]
    V2025_10,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::Unstable => "unstable",
            ApiVersion::V2025_01 => "2025-01",
            ApiVersion::V2025_04 => "2025-04",
            ApiVersion::V2025_07 => "2025-07",
            ApiVersion::V2025_10 => "2025-10",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unstable" => Ok(ApiVersion::Unstable),
            "2025-01" => Ok(ApiVersion::V2025_01),
            "2025-04" => Ok(ApiVersion::V2025_04),
            "2025-07" => Ok(ApiVersion::V2025_07),
            "2025-10" => Ok(ApiVersion::V2025_10),
            other => Err(invalid(
                "api_version",
                format!(
                    "unknown version '{}'. Valid options: unstable, 2025-01, 2025-04, 2025-07, 2025-10",
                    other
                ),
            )),
        }
    }
}

// =============================================================================
// Config File
// =============================================================================

/// On-disk settings; every key is optional and overrides the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_name: Option<String>,
    api_version: Option<ApiVersion>,
    environment: Option<String>,
    currency_code: Option<String>,
    currency_symbol: Option<String>,
    add_delay_ms: Option<u64>,
    catalog_path: Option<PathBuf>,
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shop subdomain, e.g. `acme` for `acme.myshopify.com`.
    pub store_name: String,

    pub api_version: ApiVersion,

    /// Deployment environment label (`development`, `preview`, `production`).
    pub environment: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Processing delay before a confirmed add reaches the cart.
    pub add_delay_ms: u64,

    /// Catalog payload to load; the bundled demo catalog when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ConfigState {
            store_name: "dev-store".to_string(),
            api_version: ApiVersion::default(),
            environment: "development".to_string(),
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            currency_symbol: symbol_for(DEFAULT_CURRENCY_CODE),
            add_delay_ms: 500,
            catalog_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`STOREFRONT_CONFIG` or the platform config dir)
    /// 3. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("STOREFRONT_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::load`] with an explicit file and env lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                config.apply_file(toml::from_str(&contents)?);
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(name) = file.store_name {
            self.store_name = name;
        }
        if let Some(version) = file.api_version {
            self.api_version = version;
        }
        if let Some(environment) = file.environment {
            self.environment = environment;
        }
        if let Some(code) = file.currency_code {
            self.currency_symbol = symbol_for(&code);
            self.currency_code = code;
        }
        if let Some(symbol) = file.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(delay) = file.add_delay_ms {
            self.add_delay_ms = delay;
        }
        if file.catalog_path.is_some() {
            self.catalog_path = file.catalog_path;
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = env("STOREFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(version) = env("STOREFRONT_API_VERSION") {
            self.api_version = version.parse()?;
        }

        if let Some(environment) = env("STOREFRONT_ENV") {
            self.environment = environment;
        }

        if let Some(path) = env("STOREFRONT_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(delay) = env("STOREFRONT_ADD_DELAY_MS") {
            self.add_delay_ms = delay
                .trim()
                .parse()
                .map_err(|_| invalid("add_delay_ms", format!("'{}' is not a number", delay)))?;
        }

        if let Some(code) = env("STOREFRONT_CURRENCY") {
            self.currency_symbol = symbol_for(&code);
            self.currency_code = code;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(invalid("store_name", "must not be empty"));
        }
        if self.store_name.contains('.') || self.store_name.contains('/') {
            return Err(invalid(
                "store_name",
                "expected the shop subdomain, not a full domain",
            ));
        }
        if self.currency_code.trim().is_empty() {
            return Err(invalid("currency_code", "must not be empty"));
        }
        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "shop")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// `{store_name}.myshopify.com`
    pub fn store_domain(&self) -> String {
        format!("{}.myshopify.com", self.store_name)
    }

    /// GraphQL endpoint for the configured store and API version.
    pub fn storefront_endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store_domain(),
            self.api_version
        )
    }

    pub fn add_delay(&self) -> Duration {
        Duration::from_millis(self.add_delay_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(&Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_price(&self, amount: &Money) -> String {
        let sign = if amount.cents() < 0 { "-" } else { "" };
        let magnitude = Money::from_cents(amount.cents().abs());
        format!("{}{}{}", sign, self.currency_symbol, magnitude)
    }
}

/// Display symbol for a currency code; unknown codes render as `"CODE "`.
fn symbol_for(code: &str) -> String {
    match code {
        "USD" | "CAD" | "AUD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{} ", other),
    }
}
