//! Configuration for the `todo` binary.
//!
//! Loaded from environment variables with defaults for everything.
//!
//! | variable | default |
//! |---|---|
//! | `TODO_LOG_FILTER` | `todo=info,tasklist_runtime=info` |
//! | `TODO_MAX_DISPATCH_DEPTH` | `16` |
//!
//! `RUST_LOG`, when set, takes precedence over `TODO_LOG_FILTER`.

use std::env;
use tasklist_runtime::StoreConfig;
use thiserror::Error;

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "todo=info,tasklist_runtime=info";

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to something that could not be used
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: &'static str,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Store runtime settings
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup("TODO_LOG_FILTER") {
            let filter = filter.trim();
            if filter.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: "TODO_LOG_FILTER",
                    value: filter.to_string(),
                    reason: "must not be empty",
                });
            }
            config.log_filter = filter.to_string();
        }

        if let Some(raw) = lookup("TODO_MAX_DISPATCH_DEPTH") {
            let depth = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|depth| *depth > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "TODO_MAX_DISPATCH_DEPTH",
                    value: raw.clone(),
                    reason: "expected a positive integer",
                })?;
            config.store = config.store.with_max_dispatch_depth(depth);
        }

        Ok(config)
    }
}
