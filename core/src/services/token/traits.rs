//! Trait seam between the token manager and its callers

use crate::domain::entities::token::Identity;
use crate::errors::TokenResult;

/// Issues and verifies authentication tokens.
///
/// Implementations hold no mutable state and are shared across request
/// handlers, typically as `Arc<dyn TokenManager>`.
pub trait TokenManager: Send + Sync {
    /// Issues a signed access token for the subject and role
    fn new_jwt(&self, subject_id: i64, role: i64) -> String;

    /// Issues an opaque refresh token
    fn new_refresh_token(&self) -> String;

    /// Verifies an access token.
    ///
    /// An expired but otherwise valid token yields
    /// `Err(TokenError::ExpiredToken(identity))`.
    fn parse(&self, token: &str) -> TokenResult<Identity>;
}
