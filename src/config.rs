//! Application Configuration Module
//! Optional TOML file plus environment overrides; every field has a default.

use crate::stats::{DEFAULT_PRICE_COLUMN, DEFAULT_WINDOW};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CHART_TABLE_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "chart_table.toml";

const WINDOW_ENV: &str = "CHART_TABLE_WINDOW";
const COLUMN_ENV: &str = "CHART_TABLE_COLUMN";
const TIMEOUT_ENV: &str = "CHART_TABLE_FETCH_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Column holding the closing price.
    pub column: String,
    /// Moving average window, in rows.
    pub window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_PRICE_COLUMN.to_string(),
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Honor `HTTP(S)_PROXY` environment settings.
    pub use_system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            use_system_proxy: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load from `$CHART_TABLE_CONFIG` or `./chart_table.toml`, then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(p) => Some(PathBuf::from(p)),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            }
        };

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(column) = lookup(COLUMN_ENV) {
            self.analysis.column = column;
        }
        if let Some(value) = lookup(WINDOW_ENV) {
            self.analysis.window = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: WINDOW_ENV,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(TIMEOUT_ENV) {
            self.fetch.timeout_secs =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: TIMEOUT_ENV,
                    value: value.clone(),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.window == 0 {
            return Err(ConfigError::Invalid("analysis.window must be at least 1".into()));
        }
        if self.analysis.column.trim().is_empty() {
            return Err(ConfigError::Invalid("analysis.column must not be empty".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}
