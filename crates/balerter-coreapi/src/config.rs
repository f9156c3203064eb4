//! Configuration types for the core API client

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for a Balerter server
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the server, e.g. `http://localhost:2000`
    pub address: String,
    /// Raw value sent in the `Authorization` header; empty disables the header
    #[serde(default)]
    pub auth_token: String,
    /// Name of an environment variable holding the token, read by [`ClientConfig::resolve_secrets`]
    #[serde(default)]
    pub auth_token_env: Option<String>,
    /// Per-request timeout; the HTTP stack's default applies when absent
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("has_auth_token", &!self.auth_token.is_empty())
            .field("auth_token_env", &self.auth_token_env)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(address: &str, auth_token: &str) -> Self {
        Self {
            address: normalize_address(address),
            auth_token: auth_token.to_string(),
            auth_token_env: None,
            timeout_seconds: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Replace `auth_token` with the value of the variable named by `auth_token_env`
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        if let Some(var) = &self.auth_token_env {
            let token = std::env::var(var).map_err(|e| {
                crate::CoreApiError::Config(format!(
                    "Failed to read auth token from environment variable {}: {}",
                    var, e
                ))
            })?;
            tracing::debug!("Resolved auth token from environment variable {}", var);
            self.auth_token = token;
        }
        Ok(())
    }
}

/// Strip every leading and trailing `/` from a base address
pub fn normalize_address(address: &str) -> String {
    address.trim_matches('/').to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<ClientConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::CoreApiError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let mut config: ClientConfig = serde_json::from_str(&content)?;
    config.address = normalize_address(&config.address);
    Ok(config)
}
