//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/q-rand/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::token::Token;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default values for fetching
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Measurement job settings
    #[serde(default)]
    pub job: JobConfig,

    /// Credential settings
    #[serde(default)]
    pub token: TokenConfig,
}

/// Default values for fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default randomness source
    #[serde(default = "default_source")]
    pub source: String,

    /// Default IBM Quantum backend
    #[serde(default = "default_backend")]
    pub backend: String,
}

/// Measurement job settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Shots per measurement job
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Poll interval for job status in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Maximum wait for job completion in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Credential settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenConfig {
    /// Token file path; empty means `~/.ibmq-token`
    #[serde(default)]
    pub path: String,
}

// Default value functions for serde
fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_shots() -> u32 {
    DEFAULT_SHOTS
}
fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// Implement Default traits
impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            job: JobConfig::default(),
            token: TokenConfig::default(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            backend: default_backend(),
        }
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            poll_interval_secs: default_poll_interval(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Resolve the token file path
    ///
    /// Empty `token.path` means the fixed default, `~/.ibmq-token`.
    pub fn token_path(&self) -> Result<PathBuf> {
        if self.token.path.is_empty() {
            Token::default_path()
        } else {
            Ok(PathBuf::from(&self.token.path))
        }
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "source"] => Some(self.defaults.source.clone()),
            ["defaults", "backend"] => Some(self.defaults.backend.clone()),

            ["job", "shots"] => Some(self.job.shots.to_string()),
            ["job", "poll_interval_secs"] => Some(self.job.poll_interval_secs.to_string()),
            ["job", "timeout_secs"] => Some(self.job.timeout_secs.to_string()),

            ["token", "path"] => Some(self.token.path.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "source"] => {
                self.defaults.source = value.to_string();
            }
            ["defaults", "backend"] => {
                self.defaults.backend = value.to_string();
            }

            ["job", "shots"] => {
                self.job.shots = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid shots value: {}", value)))?;
            }
            ["job", "poll_interval_secs"] => {
                self.job.poll_interval_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid interval value: {}", value)))?;
            }
            ["job", "timeout_secs"] => {
                self.job.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }

            ["token", "path"] => {
                self.token.path = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.source",
            "defaults.backend",
            "job.shots",
            "job.poll_interval_secs",
            "job.timeout_secs",
            "token.path",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.source, "ibmq");
        assert_eq!(config.defaults.backend, "ibmq_lima");
        assert_eq!(config.job.shots, 1024);
        assert_eq!(config.job.poll_interval_secs, 5);
        assert_eq!(config.job.timeout_secs, 3600);
        assert!(config.token.path.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(
            config.get("defaults.backend"),
            Some("ibmq_lima".to_string())
        );

        config.set("defaults.backend", "ibm_brisbane").unwrap();
        assert_eq!(
            config.get("defaults.backend"),
            Some("ibm_brisbane".to_string())
        );

        config.set("job.shots", "4096").unwrap();
        assert_eq!(config.get("job.shots"), Some("4096".to_string()));
        assert_eq!(config.job.shots, 4096);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        let result = config.set("invalid.key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        let result = config.set("job.shots", "not_a_number");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_path_override() {
        let mut config = Config::default();
        config.token.path = "/tmp/my-token".to_string();
        assert_eq!(config.token_path().unwrap(), PathBuf::from("/tmp/my-token"));
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.defaults.source = "pseudo".to_string();
            config.job.shots = 2048;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.defaults.source, "pseudo");
            assert_eq!(loaded.job.shots, 2048);
        });
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.defaults.source, "ibmq");
        assert_eq!(loaded.defaults.backend, "ibmq_lima");
        assert_eq!(loaded.job.shots, 1024);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[job]"));
        assert!(toml.contains("[token]"));
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"defaults.source"));
        assert!(keys.contains(&"defaults.backend"));
        assert!(keys.contains(&"job.shots"));
        assert!(keys.contains(&"token.path"));
    }
}
