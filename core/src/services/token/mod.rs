//! Token service module
//!
//! This module handles the stateless token lifecycle:
//! - HS256 access token issuance and verification
//! - Opaque refresh token issuance (storage and revocation live elsewhere)
//! - Construction-time validation of the signing key and lifetimes

mod codec;
mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::{SigningKey, TokenManagerConfig};
pub use service::JwtManager;
pub use traits::TokenManager;
