//! Prometheus text export.
//!
//! Subsystem crates register their collectors on the default registry, so
//! rendering here picks up whatever features the binary was built with.

use lazy_static::lazy_static;
use prometheus::{register_int_gauge, Encoder, IntGauge, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Seconds since telemetry was initialised
    pub static ref UPTIME_SECONDS: IntGauge = register_int_gauge!(
        "sentinel_uptime_seconds",
        "Seconds since the sentinel started"
    )
    .expect("Failed to create UPTIME_SECONDS metric");
}

/// Encode the default registry as Prometheus text format.
pub fn render_metrics() -> Result<String, TelemetryError> {
    lazy_static::initialize(&UPTIME_SECONDS);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}
