//! Runtime configuration.

use crate::poll::DEFAULT_POLL_INTERVAL;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Directory holding stored documents when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "companion-data";

const DATA_DIR_VAR: &str = "COMPANION_DATA_DIR";
const POLL_SECS_VAR: &str = "COMPANION_POLL_SECS";

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive whole number of seconds, got {value:?}")]
    InvalidPollInterval { var: &'static str, value: String },
}

/// Where documents live and how often views refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionConfig {
    pub data_dir: PathBuf,
    pub poll_interval: Duration,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl CompanionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `.env` if present, then read `COMPANION_DATA_DIR` and
    /// `COMPANION_POLL_SECS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(POLL_SECS_VAR) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidPollInterval {
                    var: POLL_SECS_VAR,
                    value: value.clone(),
                })?;
            config.poll_interval = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CompanionConfig::from_vars(lookup(&[])).unwrap();
        assert_eq!(config, CompanionConfig::default());
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_reads_vars() {
        let config = CompanionConfig::from_vars(lookup(&[
            ("COMPANION_DATA_DIR", "/tmp/table"),
            ("COMPANION_POLL_SECS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/table"));
        assert_eq!(config.poll_interval, Duration::from_secs(12));
    }

    #[test]
    fn test_rejects_bad_interval() {
        for bad in ["0", "soon", "-3"] {
            let result = CompanionConfig::from_vars(lookup(&[("COMPANION_POLL_SECS", bad)]));
            assert!(matches!(
                result,
                Err(ConfigError::InvalidPollInterval { .. })
            ));
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = CompanionConfig::new()
            .with_data_dir("elsewhere")
            .with_poll_interval(Duration::from_secs(1));
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
    }
}
