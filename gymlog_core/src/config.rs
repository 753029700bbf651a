//! Configuration file support for Gymlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/gymlog/config.toml`.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Parser backend configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Body-part choices offered when starting a workout
    #[serde(default = "default_body_parts")]
    pub body_parts: Vec<String>,

    /// Polling cadence for the daily-rollover check, in seconds.
    /// A tunable, not a contract; the check itself is idempotent.
    #[serde(default = "default_rollover_poll_seconds")]
    pub rollover_poll_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            body_parts: default_body_parts(),
            rollover_poll_seconds: default_rollover_poll_seconds(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("gymlog")
}

fn default_base_url() -> String {
    crate::parser::DEFAULT_API_BASE_URL.to_string()
}

fn default_body_parts() -> Vec<String> {
    crate::types::DEFAULT_BODY_PARTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_rollover_poll_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("gymlog").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.session.rollover_poll_seconds, 30);
        assert!(config
            .session
            .body_parts
            .iter()
            .any(|p| p == "Legs"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[api]
base_url = "http://10.0.0.5:8000"

[session]
rollover_poll_seconds = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.session.rollover_poll_seconds, 5);
        assert!(!config.session.body_parts.is_empty()); // default
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.api.base_url, parsed.api.base_url);
        assert_eq!(config.session.body_parts, parsed.session.body_parts);
    }
}
