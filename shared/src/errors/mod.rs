//! Configuration error types

use thiserror::Error;

/// Errors raised while loading configuration or bootstrapping logging
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load environment file {file}: {message}")]
    EnvFile { file: String, message: String },

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Logging initialisation failed: {0}")]
    Logging(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
