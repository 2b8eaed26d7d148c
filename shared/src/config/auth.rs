//! Authentication token configuration

use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::errors::{ConfigError, ConfigResult};

/// Environment variable holding the HMAC signing secret
pub const JWT_SIGNING_KEY_VAR: &str = "JWT_SIGNING_KEY";
/// Environment variable holding the access token lifetime in seconds
pub const JWT_ACCESS_TOKEN_TTL_VAR: &str = "JWT_ACCESS_TOKEN_TTL";
/// Environment variable holding the refresh token lifetime in seconds
pub const JWT_REFRESH_TOKEN_TTL_VAR: &str = "JWT_REFRESH_TOKEN_TTL";

const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 900; // 15 minutes
const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 604_800; // 7 days

/// JWT token configuration.
///
/// Only deserializable: the signing key must never leave the process through
/// serialization, and `Debug` redacts it.
#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing access tokens
    #[serde(default)]
    pub signing_key: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_ttl_secs")]
    pub refresh_token_ttl_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("signing_key", &"***redacted***")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret and default lifetimes
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: u64) -> Self {
        self.access_token_ttl_secs = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_ttl_days(mut self, days: u64) -> Self {
        self.refresh_token_ttl_secs = days.saturating_mul(86_400);
        self
    }

    /// Access token lifetime as a duration
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    /// Refresh token lifetime as a duration
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    /// Create from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup.
    ///
    /// A missing signing key yields an empty key, which the token manager
    /// rejects at construction. Missing lifetimes fall back to the defaults;
    /// present but non-numeric lifetimes are an error.
    pub fn from_vars<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup(JWT_SIGNING_KEY_VAR).unwrap_or_default();
        let access_token_ttl_secs = parse_secs(
            JWT_ACCESS_TOKEN_TTL_VAR,
            lookup(JWT_ACCESS_TOKEN_TTL_VAR),
            DEFAULT_ACCESS_TOKEN_TTL_SECS,
        )?;
        let refresh_token_ttl_secs = parse_secs(
            JWT_REFRESH_TOKEN_TTL_VAR,
            lookup(JWT_REFRESH_TOKEN_TTL_VAR),
            DEFAULT_REFRESH_TOKEN_TTL_SECS,
        )?;

        Ok(Self {
            signing_key,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
        })
    }
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> ConfigResult<u64> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|err| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                reason: err.to_string(),
            }),
    }
}

fn default_access_token_ttl_secs() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL_SECS
}

fn default_refresh_token_ttl_secs() -> u64 {
    DEFAULT_REFRESH_TOKEN_TTL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert!(config.signing_key.is_empty());
        assert_eq!(config.access_token_ttl(), Duration::from_secs(900));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_ttl_minutes(30)
            .with_refresh_ttl_days(14);

        assert_eq!(config.signing_key, "my-secret");
        assert_eq!(config.access_token_ttl_secs, 1800);
        assert_eq!(config.refresh_token_ttl_secs, 1_209_600);
    }

    #[test]
    fn test_jwt_config_from_vars() {
        let config = JwtConfig::from_vars(lookup_from(&[
            (JWT_SIGNING_KEY_VAR, "forum-secret"),
            (JWT_ACCESS_TOKEN_TTL_VAR, " 60 "),
            (JWT_REFRESH_TOKEN_TTL_VAR, "3600"),
        ]))
        .unwrap();

        assert_eq!(config.signing_key, "forum-secret");
        assert_eq!(config.access_token_ttl_secs, 60);
        assert_eq!(config.refresh_token_ttl_secs, 3600);
    }

    #[test]
    fn test_jwt_config_missing_vars_use_defaults() {
        let config = JwtConfig::from_vars(lookup_from(&[])).unwrap();
        assert!(config.signing_key.is_empty());
        assert_eq!(config.access_token_ttl_secs, 900);
        assert_eq!(config.refresh_token_ttl_secs, 604_800);
    }

    #[test]
    fn test_jwt_config_rejects_non_numeric_ttl() {
        let err = JwtConfig::from_vars(lookup_from(&[(JWT_ACCESS_TOKEN_TTL_VAR, "15m")]))
            .unwrap_err();

        match err {
            ConfigError::InvalidValue { key, value, .. } => {
                assert_eq!(key, JWT_ACCESS_TOKEN_TTL_VAR);
                assert_eq!(value, "15m");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_jwt_config_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("redacted"));
    }
}
