//! # Configuration
//!
//! Runtime settings, read from the process environment after loading an optional
//! `.env` file.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BAKERY_CHANNEL_BUFFER` | `32` | capacity of every actor's request channel |
//! | `BAKERY_LOG` | `info` | log filter used when `RUST_LOG` is not set |

use std::env;
use thiserror::Error;
use tracing::info;

const DEFAULT_CHANNEL_BUFFER: usize = 32;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("BAKERY_CHANNEL_BUFFER must be greater than zero")]
    ZeroBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub channel_buffer: usize,
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            channel_buffer = config.channel_buffer,
            log_filter = %config.log_filter,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Builds the configuration from an arbitrary key lookup. Missing keys fall back
    /// to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let channel_buffer = match lookup("BAKERY_CHANNEL_BUFFER") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "BAKERY_CHANNEL_BUFFER",
                    value: raw.clone(),
                })?,
            None => DEFAULT_CHANNEL_BUFFER,
        };
        if channel_buffer == 0 {
            return Err(ConfigError::ZeroBuffer);
        }

        let log_filter = lookup("BAKERY_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            channel_buffer,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SystemConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SystemConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = SystemConfig::from_lookup(lookup(&[
            ("BAKERY_CHANNEL_BUFFER", "8"),
            ("BAKERY_LOG", "bakery_market=debug"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.log_filter, "bakery_market=debug");
    }

    #[test]
    fn test_rejects_bad_buffer() {
        let err =
            SystemConfig::from_lookup(lookup(&[("BAKERY_CHANNEL_BUFFER", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "BAKERY_CHANNEL_BUFFER", .. }));

        let err = SystemConfig::from_lookup(lookup(&[("BAKERY_CHANNEL_BUFFER", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroBuffer);
    }
}
