use crate::utils::error::{ClientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every key may be omitted; the CLI fills the rest.
///
/// ```toml
/// [server]
/// base_url = "http://localhost:5000"
/// timeout_seconds = 30
///
/// [game]
/// reveal_delay_ms = 1000
/// tick_interval_ms = 1000
/// seed = 42
/// symbols = ["A", "B", "C"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub game: GameSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSection {
    pub reveal_delay_ms: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub symbols: Option<Vec<String>>,
}

impl TomlConfig {
    /// Loads and parses a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        // Match ${VAR_NAME}
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            // Unset variables keep their placeholder
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
base_url = "http://localhost:5000"
timeout_seconds = 10

[game]
reveal_delay_ms = 500
tick_interval_ms = 1000
seed = 42
symbols = ["A", "B"]
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.server.timeout_seconds, Some(10));
        assert_eq!(config.game.reveal_delay_ms, Some(500));
        assert_eq!(config.game.seed, Some(42));
        assert_eq!(config.game.symbols, Some(vec!["A".to_string(), "B".to_string()]));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.base_url.is_none());
        assert!(config.game.symbols.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CORP_CENSUS_TEST_HOST", "census.internal");
        let config = TomlConfig::from_toml_str(
            "[server]\nbase_url = \"http://${CORP_CENSUS_TEST_HOST}:8080\"\n",
        )
        .unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://census.internal:8080")
        );

        let untouched = TomlConfig::from_toml_str(
            "[server]\nbase_url = \"${CORP_CENSUS_UNSET_VARIABLE}\"\n",
        )
        .unwrap();
        assert_eq!(
            untouched.server.base_url.as_deref(),
            Some("${CORP_CENSUS_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let result = TomlConfig::from_toml_str("[server\nbase_url = 1");
        assert!(matches!(result, Err(ClientError::ConfigError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[game]\nseed = 7").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.game.seed, Some(7));
    }
}
