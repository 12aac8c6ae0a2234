//! Health check endpoint
//!
//! Reports the build and the session catalog, so a probe can tell which
//! store snapshot is being served.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use cinedb_common::config::EmptyResultPolicy;
use serde::Serialize;

use super::buildinfo::BuildInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub build: BuildInfo,
    pub movies: usize,
    pub genres: usize,
    pub empty_result: EmptyResultPolicy,
    pub loaded_at: DateTime<Utc>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "cinedb-browse",
        build: BuildInfo::CURRENT,
        movies: state.catalog.movies().len(),
        genres: state.catalog.genres().len(),
        empty_result: state.empty_result,
        loaded_at: state.loaded_at,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
