//! cinedb-browse - Read-only movie catalog browser
//!
//! Loads the normalized relations once, then serves filtered and paginated
//! listings, statistics and relation previews over HTTP. A store that cannot
//! be opened or read is fatal for the session.

use anyhow::{Context, Result};
use cinedb_browse::api::buildinfo::BuildInfo;
use cinedb_browse::{build_router, AppState, Catalog};
use cinedb_common::config::{
    EmptyResultPolicy, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "cinedb-browse", version, about = "Browse the normalized movie catalog")]
struct Args {
    /// Root folder holding the store
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Catalog store (overrides `database_file` from config.toml)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Listen address (overrides `bind_address` from config.toml)
    #[arg(long)]
    bind: Option<String>,

    /// What a listing shows when nothing matches: show_all or empty
    #[arg(long)]
    empty_result: Option<EmptyResultPolicy>,
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

    // Build identification first, before any database delays
    info!(
        "Starting CineDB catalog browser (cinedb-browse) {}",
        BuildInfo::CURRENT
    );

    if let Err(e) = &toml_result {
        warn!("Ignoring config file: {}", e);
    }

    let root_folder = RootFolderResolver::new(args.root_folder)
        .with_toml(&toml)
        .resolve();
    let db_path = args
        .database
        .unwrap_or_else(|| RootFolderInitializer::new(root_folder).database_path(&toml));
    info!("Database path: {}", db_path.display());

    let pool = match cinedb_browse::db::connect_readonly(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let catalog = Catalog::load(&pool)
        .await
        .context("Failed to load catalog relations")?;
    pool.close().await;

    let summary = catalog.summary();
    info!(
        "✓ Loaded catalog: {} movies, {} genres",
        summary.total_movies, summary.total_genres
    );

    let empty_result = toml.empty_result_policy(args.empty_result);
    if empty_result == EmptyResultPolicy::ShowAll {
        info!("Listings with no match fall back to the whole catalog");
    } else {
        info!("Listings with no match return an empty page");
    }

    let state = AppState::new(catalog, empty_result);
    let app = build_router(state);

    let bind_address = toml.bind_address(args.bind.as_deref());
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("cinedb-browse listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
