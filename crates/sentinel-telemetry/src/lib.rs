//! # Sentinel Telemetry
//!
//! Observability plumbing shared by the sentinel binary and its subsystems.
//!
//! ## Components
//!
//! - **Logs**: a `tracing-subscriber` registry with an `EnvFilter` and either a
//!   pretty or a JSON fmt layer
//! - **Metrics**: Prometheus text export of everything registered on the
//!   default registry (subsystem crates register there behind their
//!   `metrics` feature)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sentinel_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SENTINEL_SERVICE_NAME` | `node-sentinel` | Service name attached to logs |
//! | `SENTINEL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SENTINEL_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `SENTINEL_NETWORK` | `mainnet` | Network identifier |

mod config;
mod logging;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{render_metrics, UPTIME_SECONDS};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode Prometheus metrics: {0}")]
    MetricsEncode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global tracing subscriber.
///
/// Calling this twice returns [`TelemetryError::SubscriberInit`] rather than
/// panicking, so tests and embedders can call it freely.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(config)?;

    Ok(TelemetryGuard {
        service: config.service_name.clone(),
        started: std::time::Instant::now(),
    })
}

/// Guard held for the lifetime of the process. Logs shutdown on drop.
pub struct TelemetryGuard {
    service: String,
    started: std::time::Instant,
}

impl TelemetryGuard {
    /// Refresh the uptime gauge.
    pub fn touch(&self) {
        UPTIME_SECONDS.set(self.started.elapsed().as_secs() as i64);
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(
            service = %self.service,
            uptime_s = self.started.elapsed().as_secs(),
            "Shutting down telemetry"
        );
    }
}
