mod context;
mod database;
mod destinations;
mod notifications;
mod presence;
mod settings;
mod status;
mod watcher;

use anyhow::Result;
use clap::Parser;
use context::AppContext;
use settings::Settings;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Watches Steam presence and notifies destinations about status changes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file; defaults to `settings.toml` in the working directory
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RUST_LOG"))
        .init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load()?,
    };
    let context = AppContext::from_settings(&settings)?;

    let cancel = CancellationToken::new();
    let mut watcher_task_handle = context.watcher_service.clone().spawn_watcher(cancel.clone());
    debug!("started presence watcher");

    tokio::select! {
        result = &mut watcher_task_handle => {
            if let Err(e) = result {
                log::error!("Presence watcher task failed: {:?}", e);
            }
            return Ok(());
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    cancel.cancel();
    if let Err(e) = watcher_task_handle.await {
        log::error!("Presence watcher task failed: {:?}", e);
    }
    info!(accounts = context.status_db.len(), "Shut down");

    Ok(())
}
