//! cinedb-ingest - Batch normalizer for the movie catalog
//!
//! Reads the flat movie export, normalizes it and replaces the `movies`,
//! `genres` and `movie_genres` relations in the catalog store. Re-run by hand
//! whenever the export is refreshed.

use anyhow::{Context, Result};
use cinedb_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "cinedb-ingest", version, about = "Normalize the movie export into the catalog store")]
struct Args {
    /// Root folder holding the export and the store
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Source export (overrides `source_csv` from config.toml)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Catalog store (overrides `database_file` from config.toml)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_result = TomlConfig::load_default();
    let toml = toml_result.as_ref().cloned().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(toml.log_level.as_deref().unwrap_or("info"))
            }),
        )
        .init();

    info!("Starting CineDB ingest (cinedb-ingest) v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = &toml_result {
        warn!("Ignoring config file: {}", e);
    }

    let root_folder = RootFolderResolver::new(args.root_folder)
        .with_toml(&toml)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let source = args
        .source
        .unwrap_or_else(|| initializer.source_path(&toml));
    let db_path = args
        .database
        .unwrap_or_else(|| initializer.database_path(&toml));
    info!("Database path: {}", db_path.display());

    match cinedb_ingest::run_ingest(&source, &db_path).await {
        Ok(report) => {
            info!(
                "✓ Ingest complete: {} movies, {} genres, {} movie_genres ({} rows dropped)",
                report.movies,
                report.genres,
                report.movie_genres,
                report.rows_dropped()
            );
            Ok(())
        }
        Err(e) => {
            error!("Ingest aborted, store left untouched: {}", e);
            Err(e.into())
        }
    }
}
