//! services/quiz_service/src/config.rs
//!
//! Defines the service configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding one `<assignment>.json` file per assignment.
    pub question_bank_path: PathBuf,
    pub cache_ttl: chrono::Duration,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let question_bank_path = lookup("QUESTION_BANK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./questions"));

        let ttl_str = lookup("QUESTION_CACHE_TTL_SECS").unwrap_or_else(|| "300".to_string());
        let ttl_secs = ttl_str.trim().parse::<u32>().map_err(|e| {
            ConfigError::InvalidValue("QUESTION_CACHE_TTL_SECS".to_string(), e.to_string())
        })?;
        let cache_ttl = chrono::Duration::seconds(i64::from(ttl_secs));

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            question_bank_path,
            cache_ttl,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.question_bank_path, PathBuf::from("./questions"));
        assert_eq!(config.cache_ttl, chrono::Duration::seconds(300));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = Config::from_lookup(lookup_from(&[
            ("QUESTION_BANK_PATH", "/srv/quiz"),
            ("QUESTION_CACHE_TTL_SECS", "0"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.question_bank_path, PathBuf::from("/srv/quiz"));
        assert_eq!(config.cache_ttl, chrono::Duration::zero());
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = Config::from_lookup(lookup_from(&[("QUESTION_CACHE_TTL_SECS", "-5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "QUESTION_CACHE_TTL_SECS"));

        let err = Config::from_lookup(lookup_from(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "RUST_LOG"));
    }
}
