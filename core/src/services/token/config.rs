//! Configuration for the token manager

use std::time::Duration;

use forum_shared::config::JwtConfig;
use zeroize::Zeroizing;

use crate::errors::ManagerError;

/// Shared HMAC secret. Zeroed on drop; `Debug` never shows the bytes.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"***redacted***")
            .finish()
    }
}

impl From<String> for SigningKey {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<&str> for SigningKey {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<Vec<u8>> for SigningKey {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for SigningKey {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

/// Configuration for the token manager
#[derive(Debug, Clone)]
pub struct TokenManagerConfig {
    /// HMAC-SHA256 signing secret
    pub signing_key: SigningKey,
    /// Lifetime of access tokens from issuance
    pub access_token_ttl: Duration,
    /// Lifetime of refresh tokens; enforced by the refresh token store
    pub refresh_token_ttl: Duration,
}

impl TokenManagerConfig {
    pub fn new(
        signing_key: impl Into<SigningKey>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            signing_key: signing_key.into(),
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    /// Checks, in order: signing key, access TTL, refresh TTL. The first
    /// failure wins.
    pub fn validate(&self) -> Result<(), ManagerError> {
        if self.signing_key.is_empty() {
            return Err(ManagerError::EmptySigningKey);
        }

        if self.access_token_ttl.is_zero() {
            return Err(ManagerError::EmptyAccessTokenTtl);
        }

        if self.refresh_token_ttl.is_zero() {
            return Err(ManagerError::EmptyRefreshTokenTtl);
        }

        Ok(())
    }
}

impl From<&JwtConfig> for TokenManagerConfig {
    fn from(config: &JwtConfig) -> Self {
        Self::new(
            config.signing_key.as_str(),
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        )
    }
}
