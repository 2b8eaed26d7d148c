//! Main token manager implementation

use std::time::Duration;

use chrono::{DateTime, Utc};
use forum_shared::config::JwtConfig;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, Identity, TokenHeader};
use crate::errors::{ManagerError, TokenError, TokenResult};

use super::codec::{decode_segment, encode_segment, TokenSigner};
use super::config::{SigningKey, TokenManagerConfig};
use super::traits::TokenManager;

/// Stateless manager for HS256 access tokens and opaque refresh tokens.
///
/// Immutable after construction; every operation takes `&self` and may run
/// concurrently from any number of threads.
#[derive(Debug, Clone)]
pub struct JwtManager {
    signer: TokenSigner,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl JwtManager {
    /// Creates a new token manager
    ///
    /// # Arguments
    ///
    /// * `signing_key` - Shared HMAC secret, must not be empty
    /// * `access_token_ttl` - Access token lifetime, must not be zero
    /// * `refresh_token_ttl` - Refresh token lifetime, must not be zero
    ///
    /// # Returns
    ///
    /// A ready manager, or the first configuration error in the order above
    pub fn new(
        signing_key: impl Into<SigningKey>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Result<Self, ManagerError> {
        Self::with_config(TokenManagerConfig::new(
            signing_key,
            access_token_ttl,
            refresh_token_ttl,
        ))
    }

    /// Creates a new token manager from a validated configuration
    pub fn with_config(config: TokenManagerConfig) -> Result<Self, ManagerError> {
        config.validate()?;
        let signer = TokenSigner::new(config.signing_key.as_bytes())?;

        debug!(
            access_token_ttl_secs = config.access_token_ttl.as_secs(),
            refresh_token_ttl_secs = config.refresh_token_ttl.as_secs(),
            "token manager configured"
        );

        Ok(Self {
            signer,
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        })
    }

    /// Creates a new token manager from the application's JWT configuration
    pub fn from_config(config: &JwtConfig) -> Result<Self, ManagerError> {
        Self::with_config(TokenManagerConfig::from(config))
    }

    /// Lifetime of access tokens from issuance
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Lifetime the refresh token store should apply to issued refresh tokens
    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    /// Issues an access token expiring `access_token_ttl` from now
    pub fn new_jwt(&self, subject_id: i64, role: i64) -> String {
        self.issue_at(subject_id, role, Utc::now())
    }

    /// Issues a random UUID v4 refresh token
    pub fn new_refresh_token(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Verifies an access token against the current time
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - Well formed, correctly signed and not expired
    /// * `Err(TokenError::ExpiredToken(identity))` - Authentic but expired
    /// * `Err(TokenError)` - Malformed, tampered or schema-violating
    pub fn parse(&self, token: &str) -> TokenResult<Identity> {
        let claims = self.decode_verified(token)?;
        check_expiry(claims, Utc::now())
    }

    pub(crate) fn issue_at(&self, subject_id: i64, role: i64, now: DateTime<Utc>) -> String {
        let header = encode_segment(TokenHeader::HS256.to_json().as_bytes());
        let claims = Claims::new(subject_id, role, expiry_after(now, self.access_token_ttl));
        let payload = encode_segment(claims.to_json().as_bytes());

        let signing_input = format!("{}.{}", header, payload);
        let signature = self.signer.sign(&signing_input);
        format!("{}.{}", signing_input, signature)
    }

    pub(crate) fn parse_at(&self, token: &str, now: DateTime<Utc>) -> TokenResult<Identity> {
        let claims = self.decode_verified(token)?;
        check_expiry(claims, now)
    }

    /// Structure, then signature, then claims. The payload is not decoded
    /// unless the signature matches.
    fn decode_verified(&self, token: &str) -> TokenResult<Claims> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(TokenError::InvalidFormat);
        }
        let (header, payload, signature) = (parts[0], parts[1], parts[2]);

        let signing_input = &token[..header.len() + 1 + payload.len()];
        if !self.signer.verify(signing_input, signature) {
            return Err(TokenError::InvalidSignature);
        }

        let payload_json = decode_segment(payload).map_err(|err| TokenError::InvalidClaims {
            reason: format!("payload is not base64url: {}", err),
        })?;
        Claims::from_json(&payload_json).map_err(|err| TokenError::InvalidClaims {
            reason: err.to_string(),
        })
    }
}

impl TokenManager for JwtManager {
    fn new_jwt(&self, subject_id: i64, role: i64) -> String {
        JwtManager::new_jwt(self, subject_id, role)
    }

    fn new_refresh_token(&self) -> String {
        JwtManager::new_refresh_token(self)
    }

    fn parse(&self, token: &str) -> TokenResult<Identity> {
        JwtManager::parse(self, token)
    }
}

fn check_expiry(claims: Claims, now: DateTime<Utc>) -> TokenResult<Identity> {
    if claims.is_expired_at(now) {
        return Err(TokenError::ExpiredToken(claims.identity()));
    }
    Ok(claims.identity())
}

/// Whole seconds of `now + ttl`, truncated; saturates instead of overflowing.
fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> i64 {
    let carry = (now.timestamp_subsec_nanos() + ttl.subsec_nanos()) / 1_000_000_000;
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    now.timestamp()
        .saturating_add(ttl_secs)
        .saturating_add(i64::from(carry))
}
