//! Study portal API server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `PORTAL_*`
//! environment variables, opens the SQLite store and serves the JSON API.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use portal_api::{AdminSecret, AppState, DriveValidator};
use portal_server::{ServerConfig, app, cors_layer};
use portal_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Study portal API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  // Open SQLite store.
  let store_path = cfg.store_path();
  if let Some(dir) = store_path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create store directory {dir:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = ?store_path, "store opened");

  let drive = DriveValidator::with_probe_base(cfg.drive_probe_base.as_str())
    .context("failed to build Drive probe client")?;
  let state = AppState::new(store, AdminSecret::new(&cfg.admin_passcode), drive);
  let app = app(state, cors_layer(&cfg.cors_origins)?);

  let address = cfg.bind_address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c; serving until killed");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutdown requested");
}
