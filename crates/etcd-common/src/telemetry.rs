//! Structured logging setup
//!
//! Installs a JSON `tracing-subscriber` with an `EnvFilter`. Libraries in this
//! workspace only emit `tracing` events and never install a subscriber
//! themselves. [`init_telemetry`] is the entry point for the binary that embeds
//! them (and for the integration test harness); call it once at startup.

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit log filter
pub const LOG_FILTER_ENV: &str = "ETCD_OPERATOR_LOG";

/// Filter used when neither the config nor `RUST_LOG` provides one
pub const DEFAULT_LOG_FILTER: &str = "info,etcd_operator=debug,etcd_common=debug";

/// Errors that can occur during telemetry initialization
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive string could not be parsed
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Directive string as given
        filter: String,
        /// Parser message
        message: String,
    },

    /// Failed to initialize tracing subscriber
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Configuration for telemetry initialization
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event (e.g., "etcd-operator")
    pub service_name: String,

    /// Explicit filter directives; takes precedence over `RUST_LOG`
    pub log_filter: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "etcd-operator".to_string(),
            log_filter: std::env::var(LOG_FILTER_ENV).ok(),
        }
    }
}

/// Resolve the filter: explicit config, then `RUST_LOG`, then the default.
fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match &config.log_filter {
        Some(filter) => {
            EnvFilter::try_new(filter).map_err(|e| TelemetryError::InvalidFilter {
                filter: filter.clone(),
                message: e.to_string(),
            })
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Initialize JSON structured logging
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(&config)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::SubscriberInit(e.to_string())
        })?;

    debug!(service = %config.service_name, "telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_is_used() {
        let config = TelemetryConfig {
            service_name: "test-service".to_string(),
            log_filter: Some("warn,etcd_common=trace".to_string()),
        };
        let filter = build_filter(&config).expect("valid filter");
        assert!(filter.to_string().contains("etcd_common=trace"));
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = TelemetryConfig {
            service_name: "test-service".to_string(),
            log_filter: Some("etcd_common=notalevel".to_string()),
        };
        let err = build_filter(&config).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }

    #[test]
    fn test_init_twice_fails() {
        let config = TelemetryConfig {
            service_name: "test-service".to_string(),
            log_filter: Some("info".to_string()),
        };
        init_telemetry(config.clone()).expect("first init");
        let err = init_telemetry(config).unwrap_err();
        assert!(matches!(err, TelemetryError::SubscriberInit(_)));
    }
}
