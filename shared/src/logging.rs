//! Logging bootstrap

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{ConfigError, ConfigResult};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once returns `ConfigError::Logging` instead of panicking.
pub fn init(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|err| ConfigError::Logging(err.to_string()))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|err| ConfigError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_reported() {
        let config = LoggingConfig::default();
        let _ = init(&config);
        assert!(matches!(init(&config), Err(ConfigError::Logging(_))));
    }
}
