//! folder-indexer - builds the destination catalog for LLM-assisted sorting.

use anyhow::{Context, Result};
use clap::Parser;
use folder_indexer::cli::{self, CliArgs};
use folder_indexer::config::{self, AppConfig};
use folder_indexer::core::{FolderCatalog, FolderIndexer, IndexProgress};
use std::io::Write;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    let mut app_config = if args.no_config {
        AppConfig::default()
    } else {
        AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Could not load config, using defaults: {:#}", e);
            AppConfig::default()
        })
    };

    let root = std::path::absolute(&args.root)
        .with_context(|| format!("Invalid root path {:?}", args.root))?;
    let options = args.index_options(&app_config);
    let indexer = FolderIndexer::new(options);

    let cancel_flag = Arc::new(AtomicBool::new(false));
    let interrupt_flag = cancel_flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupt received, stopping...");
            interrupt_flag.store(true, Ordering::SeqCst);
        }
    });

    let progress_callback = |progress: IndexProgress| {
        tracing::debug!(
            "{} folders found ({})",
            progress.folders_found,
            progress.current_path
        );
    };
    let indexing = indexer.index_with_progress(&root, cancel_flag.clone(), progress_callback);

    let index = match args.timeout_secs {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), indexing).await {
            Ok(result) => result?,
            Err(_) => {
                cancel_flag.store(true, Ordering::SeqCst);
                anyhow::bail!("Indexing did not finish within {secs}s");
            }
        },
        None => indexing.await?,
    };

    for skipped in &index.skipped {
        tracing::warn!("Skipped {:?}: {:?}", skipped.path, skipped.reason);
    }

    let catalog = FolderCatalog::new(root.clone(), options.max_depth, index);
    let output = cli::render(&catalog, args.format)?;
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;

    if !args.no_config {
        app_config.last_target_folder = Some(root);
        if let Err(e) = config::settings::save_config(&app_config) {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
