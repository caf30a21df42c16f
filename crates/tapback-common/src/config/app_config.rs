//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use tapback_core::Locale;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub reconcile: ReconcileConfig,
    pub log: LogConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Reconciliation job settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// JSON file holding the message history to reconcile
    pub history_path: PathBuf,
    /// Where to write the reconciled reactions; stdout when unset
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// Directory of `<locale>.json` string tables; bundled tables when unset
    #[serde(default)]
    pub strings_dir: Option<PathBuf>,
    /// Restrict catalog discovery to these locales; all candidates when empty
    #[serde(default)]
    pub locales: Vec<Locale>,
    #[serde(default)]
    pub worker_id: u16,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Force JSON log output regardless of environment
    #[serde(default)]
    pub json: bool,
}

fn default_app_name() -> String {
    "tapback-reconcile".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let worker_id = match lookup("WORKER_ID") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|id| *id < 1024)
                .ok_or(ConfigError::InvalidValue("WORKER_ID", raw))?,
            None => 0,
        };

        let locales = match lookup("TAPBACK_LOCALES") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(|tag| {
                    Locale::parse(tag).map_err(|e| ConfigError::InvalidValue("TAPBACK_LOCALES", e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let json = match lookup("LOG_JSON") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue("LOG_JSON", raw))?,
            None => false,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            reconcile: ReconcileConfig {
                history_path: lookup("TAPBACK_HISTORY_PATH")
                    .map(PathBuf::from)
                    .ok_or(ConfigError::MissingVar("TAPBACK_HISTORY_PATH"))?,
                output_path: lookup("TAPBACK_OUTPUT_PATH").map(PathBuf::from),
                strings_dir: lookup("TAPBACK_STRINGS_DIR").map(PathBuf::from),
                locales,
                worker_id,
            },
            log: LogConfig { json },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
