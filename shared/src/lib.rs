//! Shared configuration and bootstrap utilities for the forum server
//!
//! This crate provides functionality used across server modules:
//! - Configuration types loaded from the environment, `.env` files or config files
//! - Configuration error types
//! - Logging bootstrap

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, LogFormat, LoggingConfig};
pub use errors::{ConfigError, ConfigResult};
