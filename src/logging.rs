//! Tracing subscriber setup.

use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// A non-empty `directive_override` (`RUST_LOG`) wins over the configured level.
fn build_filter(
    config: &LoggingConfig,
    directive_override: Option<&str>,
) -> Result<EnvFilter, LoggingError> {
    let directive = match directive_override {
        Some(d) if !d.is_empty() => d,
        _ => config.level.as_str(),
    };
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter(e.to_string()))
}

pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(io::stdout().is_terminal())
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
    }
    .map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: &str) -> LoggingConfig {
        LoggingConfig { level: level.to_string(), format: LogFormat::Text }
    }

    #[test]
    fn test_bad_filter_rejected() {
        let result = build_filter(&level("solarmap=verbose"), None);
        assert!(matches!(result, Err(LoggingError::InvalidFilter(_))));
    }

    #[test]
    fn test_configured_level_accepted() {
        assert!(build_filter(&LoggingConfig::default(), None).is_ok());
        assert!(build_filter(&level("solarmap=debug,tower_http=info"), None).is_ok());
    }

    #[test]
    fn test_override_wins_over_config() {
        let config = level("solarmap=verbose");
        assert!(build_filter(&config, Some("debug")).is_ok());
        assert!(matches!(
            build_filter(&level("info"), Some("solarmap=verbose")),
            Err(LoggingError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_empty_override_falls_back_to_config() {
        let result = build_filter(&level("solarmap=verbose"), Some(""));
        assert!(matches!(result, Err(LoggingError::InvalidFilter(_))));
    }
}
