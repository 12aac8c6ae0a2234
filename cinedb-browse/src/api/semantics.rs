//! Table semantics API - provides column descriptions for the catalog relations

use axum::{extract::Path, Json};
use cinedb_common::db::{GENRES_TABLE, MOVIES_TABLE, MOVIE_GENRES_TABLE};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// Column description
#[derive(Debug, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub description: String,
}

/// Table semantics response
#[derive(Debug, Serialize)]
pub struct TableSemanticsResponse {
    pub table_name: String,
    pub description: String,
    pub columns: Vec<ColumnDescription>,
}

/// GET /api/semantics/:table_name
///
/// Returns concise descriptions for all columns in the specified table.
pub async fn get_table_semantics(
    Path(table_name): Path<String>,
) -> ApiResult<Json<TableSemanticsResponse>> {
    let (description, columns) = get_semantics(&table_name)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown table: {}", table_name)))?;

    Ok(Json(TableSemanticsResponse {
        table_name,
        description: description.to_string(),
        columns: columns
            .iter()
            .map(|(name, description)| ColumnDescription {
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }))
}

type Columns = &'static [(&'static str, &'static str)];

const MOVIES_SEMANTICS: Columns = &[
    ("tconst", "Unique title identifier from the source export"),
    ("primaryTitle", "Title the movie was promoted under"),
    ("startYear", "Release year"),
    ("runtimeMinutes", "Running time in minutes"),
];

const GENRES_SEMANTICS: Columns = &[("genre", "Genre name, whitespace trimmed")];

const MOVIE_GENRES_SEMANTICS: Columns = &[
    ("tconst", "References movies.tconst"),
    ("genre", "References genres.genre"),
];

/// Table description and column descriptions
fn get_semantics(table_name: &str) -> Option<(&'static str, Columns)> {
    match table_name {
        MOVIES_TABLE => Some((
            "Movies released 2015 or later, at least 90 minutes long, not adult",
            MOVIES_SEMANTICS,
        )),
        GENRES_TABLE => Some((
            "Every distinct genre used by at least one movie",
            GENRES_SEMANTICS,
        )),
        MOVIE_GENRES_TABLE => Some((
            "Links each movie to each of its genres, one row per pair",
            MOVIE_GENRES_SEMANTICS,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_relation_described() {
        for table in cinedb_common::db::RELATION_TABLES {
            assert!(get_semantics(table).is_some(), "missing semantics for {}", table);
        }
        assert!(get_semantics("sqlite_master").is_none());
    }
}
