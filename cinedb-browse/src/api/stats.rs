//! Statistics endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{stats::CatalogStats, AppState};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub loaded_at: DateTime<Utc>,
}

/// GET /api/stats
///
/// Counts over the whole catalog; listing filters do not apply.
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        stats: state.catalog.stats(),
        loaded_at: state.loaded_at,
    })
}
