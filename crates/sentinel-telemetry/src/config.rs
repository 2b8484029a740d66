//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics export.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full directive
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to use ANSI colours in pretty output
    pub ansi: bool,

    /// Network identifier (mainnet, testnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "node-sentinel".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            ansi: true,
            network: "mainnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `SENTINEL_SERVICE_NAME`: Service name (default: node-sentinel)
    /// - `SENTINEL_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SENTINEL_JSON_LOGS`: JSON logs (default: false, true in containers)
    /// - `SENTINEL_NETWORK`: Network name (default: mainnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("SENTINEL_SERVICE_NAME")
                .unwrap_or_else(|_| "node-sentinel".to_string()),

            log_level: env::var("SENTINEL_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("SENTINEL_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            ansi: !is_container,

            network: env::var("SENTINEL_NETWORK").unwrap_or_else(|_| "mainnet".to_string()),
        }
    }

    /// Override the log level (CLI flags win over the environment).
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}

/// `true`/`1`/`yes`/`on`, case-insensitive.
pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
