//! Server configuration

use lexiserve_core::RequestLimits;
use lexiserve_engine::ModelConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model to load at startup
    #[serde(default)]
    pub model: ModelConfig,

    /// Per-request limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(model_dir) = &cli.model_dir {
            config.model.dir = model_dir.clone();
        }
        if let Some(model_name) = &cli.model_name {
            config.model.name = model_name.clone();
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            model: ModelConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Request admission limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted text length in characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// Per-request inference deadline in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl LimitsConfig {
    /// Limits handed to the request validator
    pub fn request_limits(&self) -> RequestLimits {
        RequestLimits {
            max_text_chars: self.max_text_chars,
        }
    }

    /// Per-request inference deadline
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
            request_timeout_ms: default_request_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_text_chars() -> usize {
    RequestLimits::default().max_text_chars
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.limits.max_text_chars, 512);
        assert_eq!(config.limits.request_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ServerConfig = serde_yaml::from_str(
            "port: 9000\nmodel:\n  name: test-model\n  dir: /opt/models\n",
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.model.name, "test-model");
        assert_eq!(config.model.en_fr_file, "en-fr.txt");
        assert_eq!(config.limits.max_text_chars, 512);
    }

    #[test]
    fn test_limits_yaml() {
        let config: ServerConfig =
            serde_yaml::from_str("limits:\n  max_text_chars: 64\n  request_timeout_ms: 250\n")
                .unwrap();
        assert_eq!(config.limits.request_limits().max_text_chars, 64);
        assert_eq!(config.limits.request_timeout(), Duration::from_millis(250));
    }
}
