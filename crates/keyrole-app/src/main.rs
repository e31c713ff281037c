use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use keyrole_lang_spanish::VocabularyLoader;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod command;
pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Spanish vocabulary trainer
#[derive(Parser, Debug)]
#[command(name = "keyrole", version)]
struct Cli {
    /// JSON config file, defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding saved progress
    #[arg(long)]
    data_dir: Option<String>,

    /// Extra vocabulary file, may be repeated
    #[arg(long = "vocabulary")]
    vocabulary: Vec<String>,

    /// Skip the bundled word list
    #[arg(long)]
    no_embedded: bool,

    /// Keep progress in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // stdout belongs to the renderer
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if cli.ephemeral {
        config.storage.ephemeral = true;
    }
    if cli.no_embedded {
        config.vocabulary.embedded = false;
    }
    config.vocabulary.additional_paths.extend(cli.vocabulary);

    let vocabulary = VocabularyLoader::load_configured(&config.vocabulary)
        .context("Failed to load vocabulary")?;
    tracing::info!(
        "Loaded {} words in {} categories",
        vocabulary.len(),
        vocabulary.categories().len()
    );

    let state = Arc::new(AppState::new(config, vocabulary));
    let controller = AppController::new(state).await;
    let mut tasks = controller.spawn_tasks().await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("Task finished"),
                Ok(Err(e)) => tracing::error!("Task exited: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("Task exited during shutdown: {e}");
        }
    }

    Ok(())
}
