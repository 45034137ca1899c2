//! Configuration Management
//!
//! Persistent settings for sfctl, stored as JSON under the user config dir.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Gateway address of a local development cluster.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:19080";

/// Environment variable holding a comma-separated endpoint list.
const ENDPOINT_ENV: &str = "SFCTL_ENDPOINTS";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Last used cluster endpoints
    #[serde(default)]
    pub endpoints: Vec<String>,
    /// Preferred output format ("json" or "yaml")
    #[serde(default)]
    pub output: Option<String>,
    /// Server CA bundle used for https endpoints
    #[serde(default)]
    pub ca_path: Option<PathBuf>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sfctl").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse stored configuration, falling back to defaults when malformed.
    fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective endpoints (CLI > config > environment > local cluster)
    pub fn effective_endpoints(&self, cli: &[String]) -> Vec<String> {
        if !cli.is_empty() {
            return cli.to_vec();
        }
        if !self.endpoints.is_empty() {
            return self.endpoints.clone();
        }
        std::env::var(ENDPOINT_ENV)
            .ok()
            .map(|v| split_endpoints(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_ENDPOINT.to_string()])
    }

    /// Set endpoints and save
    pub fn set_endpoints(&mut self, endpoints: &[String]) -> Result<()> {
        self.endpoints = endpoints.to_vec();
        self.save()
    }
}

fn split_endpoints(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_endpoints_win() {
        let config = Config {
            endpoints: vec!["http://saved:19080".to_string()],
            ..Default::default()
        };
        let cli = vec!["http://cli:19080".to_string()];
        assert_eq!(config.effective_endpoints(&cli), cli);
        assert_eq!(
            config.effective_endpoints(&[]),
            vec!["http://saved:19080".to_string()]
        );
    }

    #[test]
    fn test_split_endpoints() {
        assert_eq!(
            split_endpoints(" http://a:19080, ,http://b:19080 "),
            vec!["http://a:19080".to_string(), "http://b:19080".to_string()]
        );
    }

    #[test]
    fn test_malformed_config_falls_back() {
        assert_eq!(Config::parse("{not json"), Config::default());
        let parsed = Config::parse(r#"{"endpoints":["https://c:19080"],"output":"yaml"}"#);
        assert_eq!(parsed.endpoints, vec!["https://c:19080".to_string()]);
        assert_eq!(parsed.output.as_deref(), Some("yaml"));
    }
}
