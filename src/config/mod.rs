// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Prefix for structured environment overrides, e.g.
/// `TRANSLATE_GATEWAY_UPSTREAM__TIMEOUT_SECONDS=5`.
pub const ENV_PREFIX: &str = "TRANSLATE_GATEWAY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller via [`AppConfig::with_overrides`])
    /// 2. `ACCESS_TOKEN` / `PORT` environment variables
    /// 3. `TRANSLATE_GATEWAY_*` environment variables
    /// 4. Config file
    /// 5. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::base_builder(path)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("auth.access_token", legacy_env("ACCESS_TOKEN"))?
            .set_override_option("server.port", legacy_env("PORT"))?
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Load defaults merged with a config file, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::base_builder(Some(path))?
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    /// The configured access token, treating an empty string as unset.
    pub fn access_token(&self) -> Option<&str> {
        self.auth
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    fn base_builder(path: Option<&Path>) -> Result<ConfigBuilder<DefaultState>> {
        // An explicit path must exist; the default location is optional
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        Ok(Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".translate-gateway")
            .join("config.toml")
    }
}

/// Read one of the unprefixed variables. Set-but-empty counts as unset.
fn legacy_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_win() {
        let config = AppConfig::default().with_overrides(Some("127.0.0.1".into()), Some(8081));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_missing_overrides_keep_values() {
        let config = AppConfig::default().with_overrides(None, None);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_empty_access_token_is_unset() {
        let mut config = AppConfig::default();
        config.auth.access_token = Some(String::new());
        assert!(config.access_token().is_none());

        config.auth.access_token = Some("secret".into());
        assert_eq!(config.access_token(), Some("secret"));
    }

    #[test]
    fn test_blank_legacy_env_is_unset() {
        std::env::set_var("GATEWAY_LEGACY_BLANK_CHECK", "  ");
        assert!(legacy_env("GATEWAY_LEGACY_BLANK_CHECK").is_none());

        std::env::set_var("GATEWAY_LEGACY_BLANK_CHECK", "8080");
        assert_eq!(legacy_env("GATEWAY_LEGACY_BLANK_CHECK").as_deref(), Some("8080"));
        std::env::remove_var("GATEWAY_LEGACY_BLANK_CHECK");
    }

    #[test]
    fn test_auth_debug_is_redacted() {
        let auth = AuthConfig {
            access_token: Some("super-secret".into()),
        };
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
