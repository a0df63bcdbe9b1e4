//! Browser runtime configuration.
//!
//! Values are layered: built-in defaults, then `GENBROWSE_*` environment
//! variables, then explicit overrides from the caller (CLI flags).

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_DB_PATH: &str = "GENBROWSE_DB";
pub const ENV_LOG_LEVEL: &str = "GENBROWSE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GENBROWSE_LOG_DIR";

/// Database file used when neither env nor flags name one.
pub const DEFAULT_DB_FILE_NAME: &str = "genealogy.sqlite3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {0}")]
    LogLevel(#[from] LoggingError),
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Resolved browser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    pub db_path: PathBuf,
    /// Canonical level name accepted by `init_logging`.
    pub log_level: &'static str,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

/// Explicit values that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl BrowserConfig {
    /// Resolves settings from the process environment plus `overrides`.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), overrides)
    }

    /// Resolves settings from an arbitrary variable lookup plus `overrides`.
    pub fn resolve<F>(lookup: F, overrides: ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let db_path = overrides
            .db_path
            .or_else(|| lookup(ENV_DB_PATH).map(PathBuf::from));
        if let Some(path) = db_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Empty { name: ENV_DB_PATH });
            }
            config.db_path = path;
        }

        if let Some(level) = overrides.log_level.or_else(|| lookup(ENV_LOG_LEVEL)) {
            config.log_level = normalize_level(&level)?;
        }

        config.log_dir = overrides
            .log_dir
            .or_else(|| lookup(ENV_LOG_DIR).map(PathBuf::from))
            .filter(|dir| !dir.as_os_str().is_empty());

        Ok(config)
    }
}
