//! Structured logging setup for the gateway binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogConfig, LogFormat};
use crate::error::BootstrapError;

/// Parse a log filter directive such as `info` or `market_gateway=debug,warn`.
///
/// # Errors
/// Returns [`BootstrapError::LogLevel`] if the directive does not parse.
pub fn filter(level: &str) -> Result<EnvFilter, BootstrapError> {
    EnvFilter::try_new(level).map_err(|e| BootstrapError::LogLevel {
        level: level.to_owned(),
        reason: e.to_string(),
    })
}

/// Install the global tracing subscriber.
///
/// `json` emits one object per event with the current span's fields
/// flattened in, for log collectors that index structured fields.
///
/// # Errors
/// Returns [`BootstrapError::LogLevel`] for a bad directive and
/// [`BootstrapError::Telemetry`] if a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), BootstrapError> {
    let registry = tracing_subscriber::registry().with(filter(&config.level)?);
    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(true))
            .try_init(),
    };
    installed.map_err(|e| BootstrapError::Telemetry(e.to_string()))
}
