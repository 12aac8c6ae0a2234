//! Database access layer for cinedb-browse
//!
//! The browser never writes: the store is opened read-only and the three
//! relations are read once at session start.

use cinedb_common::db::{Movie, MovieGenre, Relations};
use cinedb_common::{Error, Result};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

/// Connect to the store in read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found: {}\nRun cinedb-ingest first to build the catalog.",
            db_path.display()
        )));
    }

    // mode=ro: Read-only mode
    // immutable=1: SQLite won't write even for internal operations
    let db_url = format!("sqlite://{}?mode=ro&immutable=1", db_path.display());

    let pool = SqlitePool::connect(&db_url).await?;
    Ok(pool)
}

/// Read `movies`, `genres` and `movie_genres` in insertion order
pub async fn load_relations(pool: &SqlitePool) -> Result<Relations> {
    let movies = sqlx::query_as::<_, (String, String, i64, i64)>(
        "SELECT tconst, primaryTitle, startYear, runtimeMinutes FROM movies ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(tconst, primary_title, start_year, runtime_minutes)| Movie {
        tconst,
        primary_title,
        start_year,
        runtime_minutes,
    })
    .collect::<Vec<_>>();

    let genres: Vec<String> = sqlx::query_scalar("SELECT genre FROM genres ORDER BY rowid")
        .fetch_all(pool)
        .await?;

    let movie_genres = sqlx::query_as::<_, (String, String)>(
        "SELECT tconst, genre FROM movie_genres ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(tconst, genre)| MovieGenre { tconst, genre })
    .collect::<Vec<_>>();

    debug!(
        "Loaded {} movies, {} genres, {} movie_genres",
        movies.len(),
        genres.len(),
        movie_genres.len()
    );

    Ok(Relations {
        movies,
        genres,
        movie_genres,
    })
}
