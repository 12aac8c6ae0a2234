//! cinedb-browse library - Movie catalog browser
//!
//! Loads the normalized relations once per session and serves filtered,
//! paginated listings and statistics over HTTP. Read-only.

use axum::Router;
use chrono::{DateTime, Utc};
use cinedb_common::config::EmptyResultPolicy;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod db;
pub mod error;
pub mod pagination;
pub mod query;
pub mod stats;

pub use crate::catalog::Catalog;
pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Session catalog, never modified after load
    pub catalog: Arc<Catalog>,
    /// Behavior of listings whose filter matches nothing
    pub empty_result: EmptyResultPolicy,
    /// When the catalog was loaded
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Catalog, empty_result: EmptyResultPolicy) -> Self {
        Self {
            catalog: Arc::new(catalog),
            empty_result,
            loaded_at: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/movies", get(api::list_movies))
        .route("/api/movies/export.csv", get(api::export_movies_csv))
        .route("/api/genres", get(api::list_genres))
        .route("/api/stats", get(api::get_stats))
        .route("/api/table/:name", get(api::get_table_data))
        .route("/api/semantics/:table_name", get(api::get_table_semantics))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
