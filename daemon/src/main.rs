//! Feedback daemon: entry point for serving a feedback board.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use feedback_board::Board;
use feedback_nullables::MemoryStore;
use feedback_rpc::RpcServer;
use feedback_store::BoardStore;
use feedback_store_lmdb::{check_data_dir, check_integrity, LmdbEnvironment};
use feedback_utils::{init_logging, LogFormat, ShutdownController};
use tracing::{error, info, warn};

use crate::config::{Backend, DaemonConfig};

#[derive(Parser)]
#[command(name = "feedback-daemon", about = "Feedback board daemon", version)]
struct Cli {
    /// Address for the HTTP API, e.g. "127.0.0.1:7080".
    #[arg(long, env = "FEEDBACK_LISTEN_ADDR")]
    listen_addr: Option<SocketAddr>,

    /// Storage backend.
    #[arg(long, value_enum, env = "FEEDBACK_BACKEND")]
    backend: Option<Backend>,

    /// Data directory for the LMDB backend.
    #[arg(long, env = "FEEDBACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Maximum LMDB map size in MiB.
    #[arg(long, env = "FEEDBACK_MAP_SIZE_MB")]
    map_size_mb: Option<usize>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FEEDBACK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FEEDBACK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "FEEDBACK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the HTTP API until SIGINT or SIGTERM.
    Run,
    /// Print the effective configuration as TOML and exit.
    PrintConfig,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<DaemonConfig> {
        let base = match &self.config {
            Some(path) => DaemonConfig::from_toml_file(path)?,
            None => DaemonConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, base: DaemonConfig) -> DaemonConfig {
        DaemonConfig {
            listen_addr: self.listen_addr.unwrap_or(base.listen_addr),
            backend: self.backend.unwrap_or(base.backend),
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir),
            map_size_mb: self.map_size_mb.unwrap_or(base.map_size_mb),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
        }
    }
}

fn open_store(config: &DaemonConfig) -> anyhow::Result<Arc<dyn BoardStore>> {
    match config.backend {
        Backend::Memory => {
            warn!("using the in-memory backend; records are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        Backend::Lmdb => {
            check_data_dir(&config.data_dir).map_err(anyhow::Error::msg)?;
            let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
                .with_context(|| format!("opening {}", config.data_dir.display()))?;

            let report = check_integrity(&env)?;
            if !report.is_healthy() {
                for problem in &report.errors {
                    error!(%problem, "integrity check");
                }
                anyhow::bail!(
                    "LMDB integrity check failed with {} error(s)",
                    report.errors.len()
                );
            }
            info!(
                databases = report.databases_checked,
                entries = report.total_entries,
                "LMDB integrity check passed"
            );
            Ok(Arc::new(env))
        }
    }
}

async fn run(config: DaemonConfig) -> anyhow::Result<()> {
    init_logging(config.log_format, &config.log_level)?;
    info!(
        listen_addr = %config.listen_addr,
        backend = ?config.backend,
        "starting feedback daemon"
    );

    let store = open_store(&config)?;
    let board = Arc::new(Board::new(store));

    let shutdown = ShutdownController::new();
    let server = RpcServer::new(config.listen_addr, board);
    let stopped = shutdown.signalled();

    let signals = shutdown.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    server.serve(stopped).await?;
    info!("feedback daemon exited cleanly");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command {
        Command::Run => run(config).await,
        Command::PrintConfig => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_store::{FeedbackStore, RoadmapStore};

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from([
            "feedback-daemon",
            "--backend",
            "memory",
            "--log-level",
            "debug",
            "run",
        ]);
        let base = DaemonConfig::from_toml_str(
            r#"
                listen_addr = "127.0.0.1:9100"
                log_level = "warn"
            "#,
        )
        .unwrap();
        let config = cli.apply_overrides(base);
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.listen_addr.port(), 9100);
    }

    #[test]
    fn memory_backend_opens_without_disk() {
        let config = DaemonConfig {
            backend: Backend::Memory,
            ..Default::default()
        };
        let store = open_store(&config).unwrap();
        assert!(store.list_items().unwrap().is_empty());
    }

    #[test]
    fn lmdb_backend_opens_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaemonConfig {
            data_dir: dir.path().join("board"),
            map_size_mb: 16,
            ..Default::default()
        };
        let store = open_store(&config).unwrap();
        assert!(store.list_roadmap_items().unwrap().is_empty());
    }
}
