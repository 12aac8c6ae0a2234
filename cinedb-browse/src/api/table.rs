//! Raw relation preview with pagination
//!
//! Pages through `movies`, `genres` or `movie_genres` exactly as stored, from
//! the session catalog rather than the store.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use cinedb_common::db::{GENRES_TABLE, MOVIES_TABLE, MOVIE_GENRES_TABLE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    catalog::Catalog,
    error::{ApiError, ApiResult},
    pagination::{calculate_pagination, PREVIEW_PAGE_SIZE},
    AppState,
};

/// Query parameters for table viewing
#[derive(Debug, Deserialize)]
pub struct TableQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Table data response
#[derive(Debug, Serialize)]
pub struct TableDataResponse {
    pub table_name: String,
    pub total_rows: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// GET /api/table/:name
///
/// Returns one page of a relation in storage order.
pub async fn get_table_data(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    query: Result<Query<TableQuery>, QueryRejection>,
) -> ApiResult<Json<TableDataResponse>> {
    let Query(query) = query?;
    let catalog = &state.catalog;
    let (columns, total_rows) = describe(catalog, &table_name)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown table: {}", table_name)))?;

    let p = calculate_pagination(total_rows, query.page, PREVIEW_PAGE_SIZE);

    let rows: Vec<Vec<Value>> = match table_name.as_str() {
        MOVIES_TABLE => p
            .slice(catalog.movies())
            .iter()
            .map(|m| {
                vec![
                    json!(m.tconst),
                    json!(m.primary_title),
                    json!(m.start_year),
                    json!(m.runtime_minutes),
                ]
            })
            .collect(),
        GENRES_TABLE => p
            .slice(catalog.genres())
            .iter()
            .map(|g| vec![json!(g)])
            .collect(),
        _ => p
            .slice(catalog.movie_genres())
            .iter()
            .map(|mg| vec![json!(mg.tconst), json!(mg.genre)])
            .collect(),
    };

    Ok(Json(TableDataResponse {
        table_name,
        total_rows,
        page: p.page,
        page_size: p.page_size,
        total_pages: p.total_pages,
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }))
}

const MOVIES_COLUMNS: &[&str] = &["tconst", "primaryTitle", "startYear", "runtimeMinutes"];
const GENRES_COLUMNS: &[&str] = &["genre"];
const MOVIE_GENRES_COLUMNS: &[&str] = &["tconst", "genre"];

/// Column names and row count of a known relation
fn describe(catalog: &Catalog, table_name: &str) -> Option<(&'static [&'static str], usize)> {
    match table_name {
        MOVIES_TABLE => Some((MOVIES_COLUMNS, catalog.movies().len())),
        GENRES_TABLE => Some((GENRES_COLUMNS, catalog.genres().len())),
        MOVIE_GENRES_TABLE => Some((MOVIE_GENRES_COLUMNS, catalog.movie_genres().len())),
        _ => None,
    }
}
