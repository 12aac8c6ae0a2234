//! Genre picker list

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{query::ALL_GENRES, AppState};

#[derive(Debug, Serialize)]
pub struct GenreListResponse {
    /// Value meaning "no genre filter", also the first choice
    pub all: String,
    /// `all` followed by genre names in ascending order
    pub choices: Vec<String>,
}

/// GET /api/genres
pub async fn list_genres(State(state): State<AppState>) -> Json<GenreListResponse> {
    let choices = std::iter::once(ALL_GENRES)
        .chain(state.catalog.sorted_genres())
        .map(str::to_string)
        .collect();

    Json(GenreListResponse {
        all: ALL_GENRES.to_string(),
        choices,
    })
}
