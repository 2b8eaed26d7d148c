//! Error types for token manager construction and token verification

use thiserror::Error;

use crate::domain::entities::token::Identity;

/// Configuration errors, raised only while constructing a manager
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagerError {
    #[error("JWT signing key is empty")]
    EmptySigningKey,

    #[error("Empty access token TTL for JWT")]
    EmptyAccessTokenTtl,

    #[error("Empty refresh token TTL for JWT")]
    EmptyRefreshTokenTtl,

    #[error("Signing key rejected by HMAC-SHA256")]
    InvalidSigningKey,
}

impl ManagerError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ManagerError::EmptySigningKey => "EMPTY_SIGNING_KEY",
            ManagerError::EmptyAccessTokenTtl => "EMPTY_ACCESS_TOKEN_TTL",
            ManagerError::EmptyRefreshTokenTtl => "EMPTY_REFRESH_TOKEN_TTL",
            ManagerError::InvalidSigningKey => "INVALID_SIGNING_KEY",
        }
    }
}

/// Verification errors returned by `parse`.
///
/// `ExpiredToken` is the one outcome that still carries the verified identity:
/// the token was well formed and correctly signed, only its lifetime is over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Wrong number of segments, or an empty segment
    #[error("Invalid token format")]
    InvalidFormat,

    /// Signature does not match the header and payload under this key
    #[error("Token signature verification failed")]
    InvalidSignature,

    /// Correctly signed, but the payload does not follow the claims schema
    #[error("Invalid token claims: {reason}")]
    InvalidClaims { reason: String },

    #[error("Token has expired")]
    ExpiredToken(Identity),
}

impl TokenError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::InvalidFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::InvalidClaims { .. } => "INVALID_CLAIMS",
            TokenError::ExpiredToken(_) => "TOKEN_EXPIRED",
        }
    }

    /// Whether this is the expired-but-authentic outcome
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::ExpiredToken(_))
    }

    /// Identity of an expired token, for refresh flows. `None` for every
    /// other error.
    pub fn expired_identity(&self) -> Option<Identity> {
        match self {
            TokenError::ExpiredToken(identity) => Some(*identity),
            _ => None,
        }
    }
}

pub type TokenResult<T> = Result<T, TokenError>;
