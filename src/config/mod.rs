#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::DEFAULT_SYMBOLS;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_symbols, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Fully resolved client settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout_seconds: u64,
    pub reveal_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub symbols: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_seconds: 30,
            reveal_delay_ms: 1000,
            tick_interval_ms: 1000,
            seed: None,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let mut config = Self::default();
        config.apply_toml(file);
        config
    }

    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(url) = &file.server.base_url {
            self.server_url = url.clone();
        }
        if let Some(timeout) = file.server.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(delay) = file.game.reveal_delay_ms {
            self.reveal_delay_ms = delay;
        }
        if let Some(interval) = file.game.tick_interval_ms {
            self.tick_interval_ms = interval;
        }
        if file.game.seed.is_some() {
            self.seed = file.game.seed;
        }
        if let Some(symbols) = &file.game.symbols {
            self.symbols = symbols.clone();
        }
    }
}

impl ConfigProvider for ClientConfig {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn symbols(&self) -> &[String] {
        &self.symbols
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("server.base_url", &self.server_url)?;
        validate_positive_number("server.timeout_seconds", self.timeout_seconds, 1)?;
        validate_positive_number("game.reveal_delay_ms", self.reveal_delay_ms, 1)?;
        validate_positive_number("game.tick_interval_ms", self.tick_interval_ms, 1)?;
        validate_symbols("game.symbols", &self.symbols)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbols.len(), 8);
        assert_eq!(config.reveal_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let file = TomlConfig::from_toml_str("[game]\nreveal_delay_ms = 250\n").unwrap();
        let config = ClientConfig::from_toml(&file);

        assert_eq!(config.reveal_delay_ms, 250);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.server_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.symbols.clear();
        assert!(config.validate().is_err());
    }
}
