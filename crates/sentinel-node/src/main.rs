//! Node Sentinel
//!
//! ```text
//! sentinel-node run                 # scheduler + checkpoint poller until Ctrl+C
//! sentinel-node validate <file>     # one validation against persisted state
//! sentinel-node report              # persisted parameters and decisions
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use checkpoint_guard::adapters::JsonFileKnownGoodStore;
use checkpoint_guard::{CheckpointGuardApi, KnownGoodStore};
use clap::{Parser, Subcommand};
use consensus_tuner::{JsonFileTuningStore, TuningStateStore};
use sentinel_node::{NodeConfig, SentinelContainer, SentinelRuntime};
use sentinel_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

/// Checkpoint defense and adaptive consensus tuning for a full node
#[derive(Parser, Debug)]
#[command(name = "sentinel-node", version)]
struct Cli {
    /// State directory (overrides SENTINEL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON chain index used to verify new hashes (overrides SENTINEL_CHAIN_INDEX)
    #[arg(long, global = true)]
    chain_index: Option<PathBuf>,

    /// Log filter (overrides SENTINEL_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the tuning scheduler and the checkpoint poller until Ctrl+C
    Run {
        /// Directory of `<source>.json` checkpoint documents
        #[arg(long)]
        checkpoint_dir: Option<PathBuf>,

        /// Seconds between tuning cycles
        #[arg(long)]
        tuning_interval: Option<u64>,

        /// Seconds between checkpoint scans
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Record tuning decisions without applying them
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate one checkpoint document against the persisted known-good state
    Validate {
        file: PathBuf,

        /// Source name recorded in the audit trail
        #[arg(long, default_value = "cli")]
        source: String,
    },
    /// Print persisted consensus parameters and decision history
    Report {
        /// Number of recent decisions to show
        #[arg(long, default_value = "10")]
        decisions: usize,
    },
}

fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let mut config = NodeConfig::from_env().context("reading SENTINEL_* environment")?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(index) = &cli.chain_index {
        config.chain_index = Some(index.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if cli.json_logs {
        config.json_logs = true;
    }

    if let Command::Run {
        checkpoint_dir,
        tuning_interval,
        poll_interval,
        dry_run,
    } = &cli.command
    {
        if let Some(dir) = checkpoint_dir {
            config.checkpoint_dir = Some(dir.clone());
        }
        if let Some(secs) = tuning_interval {
            config.tuner.interval = Duration::from_secs((*secs).max(1));
        }
        if let Some(secs) = poll_interval {
            config.poll_interval = Duration::from_secs((*secs).max(1));
        }
        if *dry_run {
            config.tuner.auto_execute = false;
        }
    }
    Ok(config)
}

async fn run(config: NodeConfig) -> Result<ExitCode> {
    let runtime = SentinelRuntime::new(config)?;

    info!("Sentinel is running. Press Ctrl+C to stop.");
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };
    runtime.run_until(ctrl_c).await?;
    Ok(ExitCode::SUCCESS)
}

async fn validate(config: NodeConfig, file: PathBuf, source: String) -> Result<ExitCode> {
    let bytes = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let container = SentinelContainer::build(&config)?;

    let (outcome, _delta) = container.guard.validate_raw(&bytes, &source).await;
    if let Some(report) = container.guard.last_report() {
        println!("{}", report);
    }

    Ok(if outcome.is_valid() {
        ExitCode::SUCCESS
    } else if outcome.is_attack() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    })
}

fn report(config: NodeConfig, decisions: usize) -> Result<ExitCode> {
    let known_good = JsonFileKnownGoodStore::new(config.known_good_path())
        .load()
        .context("reading known-good state")?;
    match known_good {
        Some(known) => println!(
            "Known-good checkpoint: epoch {} ({} hashlines, adopted at {})",
            known.epoch_id,
            known.snapshot.len(),
            known.observed_at
        ),
        None => println!("Known-good checkpoint: none"),
    }

    let Some(state) = JsonFileTuningStore::new(config.tuning_state_path())
        .load()
        .context("reading tuning state")?
    else {
        println!("No tuning state persisted yet");
        return Ok(ExitCode::SUCCESS);
    };

    let p = &state.parameters;
    println!();
    println!("Consensus Parameters");
    println!("  Quorum:           {}%", p.quorum_pct);
    println!("  Block time:       {}s", p.block_time_s);
    println!("  Difficulty:       {}%", p.difficulty_multiplier);
    println!("  Tx pool size:     {}", p.tx_pool_size);
    println!("  Block size limit: {}", p.block_size_limit);
    println!("  Peer timeout:     {}s", p.peer_timeout_s);
    println!("  Last change:      {}", p.last_reason);
    println!("  Tuning cycles:    {}", state.cycles);

    println!();
    println!("Recent Decisions");
    let skip = state.decision_history.len().saturating_sub(decisions);
    for decision in state.decision_history.iter().skip(skip) {
        let status = match (&decision.rejection, decision.executed) {
            (Some(reason), _) => format!("rejected: {}", reason),
            (None, true) => "executed".to_string(),
            (None, false) if decision.adjustments.is_empty() => "no change".to_string(),
            (None, false) => "proposed".to_string(),
        };
        println!(
            "  {} [{}] trust {:.2}, {} adjustments, {}",
            decision.id,
            decision.condition,
            decision.confidence,
            decision.adjustments.len(),
            status
        );
        for adjustment in &decision.adjustments {
            println!("      {}", adjustment);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let telemetry = TelemetryConfig::from_env()
        .with_log_level(config.log_level.clone())
        .with_json_logs(config.json_logs);
    let _telemetry = init_telemetry(&telemetry).context("initializing telemetry")?;

    match cli.command {
        Command::Run { .. } => run(config).await,
        Command::Validate { file, source } => validate(config, file, source).await,
        Command::Report { decisions } => report(config, decisions),
    }
}
