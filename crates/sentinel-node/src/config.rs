//! # Node Configuration
//!
//! Runtime settings read from `SENTINEL_*` environment variables. Command
//! line flags are applied on top by `main`.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SENTINEL_DATA_DIR` | `./sentinel-data` | Persisted known-good and tuning state |
//! | `SENTINEL_CHECKPOINT_DIR` | `<data dir>/checkpoints` | One `<source>.json` per checkpoint source |
//! | `SENTINEL_CHAIN_INDEX` | unset | JSON chain index used to verify new hashes |
//! | `SENTINEL_POLL_INTERVAL` | `30` | Seconds between checkpoint directory scans |
//! | `SENTINEL_TUNING_INTERVAL` | `60` | Seconds between tuning cycles |
//! | `SENTINEL_AUTO_EXECUTE` | `true` | Apply validated tuning decisions |
//! | `SENTINEL_LOG_LEVEL` | `info` | Log filter |
//! | `SENTINEL_JSON_LOGS` | `false` | JSON log output |

use checkpoint_guard::GuardConfig;
use consensus_tuner::{HealthThresholds, TunerConfig};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value} is invalid: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Complete sentinel configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub data_dir: PathBuf,
    /// Overrides `<data_dir>/checkpoints`
    pub checkpoint_dir: Option<PathBuf>,
    /// Without an index every new epoch is reported as `ErrorBlockchainAccess`
    pub chain_index: Option<PathBuf>,
    pub poll_interval: Duration,
    pub log_level: String,
    pub json_logs: bool,
    pub guard: GuardConfig,
    pub tuner: TunerConfig,
    pub health: HealthThresholds,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./sentinel-data"),
            checkpoint_dir: None,
            chain_index: None,
            poll_interval: Duration::from_secs(30),
            log_level: "info".to_string(),
            json_logs: false,
            guard: GuardConfig::default(),
            tuner: TunerConfig::default(),
            health: HealthThresholds::default(),
        }
    }
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for variable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("SENTINEL_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("SENTINEL_CHECKPOINT_DIR") {
            config.checkpoint_dir = Some(PathBuf::from(dir));
        }
        if let Some(index) = lookup("SENTINEL_CHAIN_INDEX") {
            config.chain_index = Some(PathBuf::from(index));
        }
        if let Some(secs) = lookup("SENTINEL_POLL_INTERVAL") {
            config.poll_interval = parse_secs("SENTINEL_POLL_INTERVAL", &secs)?;
        }
        if let Some(secs) = lookup("SENTINEL_TUNING_INTERVAL") {
            config.tuner.interval = parse_secs("SENTINEL_TUNING_INTERVAL", &secs)?;
        }
        if let Some(flag) = lookup("SENTINEL_AUTO_EXECUTE") {
            config.tuner.auto_execute = parse_bool("SENTINEL_AUTO_EXECUTE", &flag)?;
        }
        if let Some(level) = lookup("SENTINEL_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(flag) = lookup("SENTINEL_JSON_LOGS") {
            config.json_logs = parse_bool("SENTINEL_JSON_LOGS", &flag)?;
        }

        Ok(config)
    }

    pub fn checkpoint_dir(&self) -> PathBuf {
        self.checkpoint_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("checkpoints"))
    }

    pub fn known_good_path(&self) -> PathBuf {
        self.data_dir.join("known_good.json")
    }

    pub fn tuning_state_path(&self) -> PathBuf {
        self.data_dir.join("tuning_state.json")
    }

    /// Prometheus text snapshot written at shutdown
    pub fn metrics_path(&self) -> PathBuf {
        self.data_dir.join("metrics.prom")
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "must be at least 1 second".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
