//! Configuration module
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Access and refresh token configuration
//! - `environment` - Environment detection and logging configuration
//!
//! Configuration is read once at startup and handed to the components that
//! need it by value; nothing downstream reads the process environment again.

pub mod auth;
pub mod environment;

use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::debug;

use crate::errors::{ConfigError, ConfigResult};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix for environment overrides applied on top of a configuration file
pub const ENV_PREFIX: &str = "FORUM";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Token configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load `.env` files for the detected environment, then read the
    /// configuration from the process environment.
    ///
    /// `.env.<environment>` is applied before `.env`. Neither overrides a
    /// variable that is already set.
    pub fn load() -> ConfigResult<Self> {
        let environment = Environment::from_env();
        for file in [environment.env_file(), ".env"] {
            match dotenvy::from_filename(file) {
                Ok(path) => debug!(path = %path.display(), "loaded environment file"),
                Err(err) if err.not_found() => {}
                Err(err) => {
                    return Err(ConfigError::EnvFile {
                        file: file.to_string(),
                        message: err.to_string(),
                    })
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_vars(&lookup);
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            logging.format = format.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                value: format.clone(),
                reason,
            })?;
        }
        let jwt = JwtConfig::from_vars(&lookup)?;

        debug!(%environment, "configuration loaded from environment");
        Ok(Self {
            environment,
            jwt,
            logging,
        })
    }

    /// Load configuration from a file (format chosen by extension), with
    /// `FORUM__SECTION__KEY` environment variables layered on top.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let app: Self = settings.try_deserialize()?;
        debug!(path = %path.display(), environment = %app.environment, "configuration loaded from file");
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    #[test]
    fn test_app_config_from_vars() {
        let vars: HashMap<&str, &str> = [
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "compact"),
            ("JWT_SIGNING_KEY", "k1"),
            ("JWT_ACCESS_TOKEN_TTL", "120"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_vars(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.jwt.signing_key, "k1");
        assert_eq!(config.jwt.access_token_ttl_secs, 120);
        assert_eq!(config.jwt.refresh_token_ttl_secs, 604_800);
    }

    #[test]
    fn test_app_config_rejects_unknown_log_format() {
        let err = AppConfig::from_vars(|key| (key == "LOG_FORMAT").then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "LOG_FORMAT"));
    }

    #[test]
    fn test_app_config_from_file() {
        let path = env::temp_dir().join(format!("forum-config-{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
environment = "staging"

[jwt]
signing_key = "file-secret"
access_token_ttl_secs = 300

[logging]
level = "info"
format = "json"
"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path);
        fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.jwt.signing_key, "file-secret");
        assert_eq!(config.jwt.access_token_ttl_secs, 300);
        assert_eq!(config.jwt.refresh_token_ttl_secs, 604_800);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_app_config_missing_file_is_an_error() {
        let path = env::temp_dir().join("forum-config-does-not-exist.toml");
        assert!(matches!(AppConfig::from_file(path), Err(ConfigError::Source(_))));
    }
}
