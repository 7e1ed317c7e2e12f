//! Agent configuration.
//!
//! The gateway is handed the path of a JSON document on local storage. The
//! bridge core never reads its schema; only the embedded agent cares about
//! the bind address and the credential material. A missing or unreadable
//! file degrades to defaults so the agent can come up before the host has
//! finished provisioning.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AgentError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8765;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Workspace directory the agent operates in.
    pub workspace_dir: Option<PathBuf>,
    /// Provider credentials, keyed by provider name.
    pub api_keys: HashMap<String, String>,
    /// Optional integration tokens (messaging channels and the like).
    pub integration_tokens: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workspace_dir: None,
            api_keys: HashMap::new(),
            integration_tokens: HashMap::new(),
        }
    }
}

impl Config {
    /// Load the document at `path`, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            tracing::warn!("config file {:?} not found, using defaults", path);
            return Ok(Self::default().with_env_overrides());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| AgentError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config.with_env_overrides())
    }

    /// Environment values take precedence over the file.
    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("TAPBRIDGE_HOST") {
            self.host = host;
        }
        if let Some(port) = env::var("TAPBRIDGE_PORT").ok().and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        self
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys
            .get(&provider.to_lowercase())
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/definitely/not/here/config.json")).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn parses_partial_documents() {
        let config: Config =
            serde_json::from_str(r#"{ "port": 9000, "api_keys": { "anthropic": "sk-x" } }"#)
                .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.api_key("anthropic"), Some("sk-x"));
        assert_eq!(config.api_key("openai"), None);
    }

    #[test]
    fn empty_keys_are_treated_as_absent() {
        let config: Config =
            serde_json::from_str(r#"{ "api_keys": { "openai": "" } }"#).unwrap();
        assert_eq!(config.api_key("openai"), None);
    }
}
