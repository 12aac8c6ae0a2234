//! Relation persistence
//!
//! Each run replaces the three relations wholesale. All drops, creates and
//! inserts happen in one transaction: readers see either the previous
//! relations or the new ones, never a mix.

use cinedb_common::db::{
    Relations, CREATE_GENRES_TABLE, CREATE_MOVIES_TABLE, CREATE_MOVIE_GENRES_TABLE,
    RELATION_TABLES,
};
use cinedb_common::Result;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Rows per multi-row INSERT, kept well under SQLite's bound-parameter limit
const INSERT_BATCH_ROWS: usize = 500;

/// Replace `movies`, `genres` and `movie_genres` with `relations`
pub async fn replace_relations(pool: &SqlitePool, relations: &Relations) -> Result<()> {
    let mut tx = pool.begin().await?;

    for table in RELATION_TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(&mut *tx)
            .await?;
    }

    for ddl in [CREATE_MOVIES_TABLE, CREATE_GENRES_TABLE, CREATE_MOVIE_GENRES_TABLE] {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }

    insert_movies(&mut tx, relations).await?;
    insert_genres(&mut tx, relations).await?;
    insert_movie_genres(&mut tx, relations).await?;

    tx.commit().await?;

    info!(
        "Replaced relations: {} movies, {} genres, {} movie_genres",
        relations.movies.len(),
        relations.genres.len(),
        relations.movie_genres.len()
    );
    Ok(())
}

async fn insert_movies(conn: &mut SqliteConnection, relations: &Relations) -> Result<()> {
    for chunk in relations.movies.chunks(INSERT_BATCH_ROWS) {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO movies (tconst, primaryTitle, startYear, runtimeMinutes) ",
        );
        qb.push_values(chunk, |mut row, movie| {
            row.push_bind(movie.tconst.as_str())
                .push_bind(movie.primary_title.as_str())
                .push_bind(movie.start_year)
                .push_bind(movie.runtime_minutes);
        });
        qb.build().execute(&mut *conn).await?;
    }
    debug!("Inserted {} movies", relations.movies.len());
    Ok(())
}

async fn insert_genres(conn: &mut SqliteConnection, relations: &Relations) -> Result<()> {
    for chunk in relations.genres.chunks(INSERT_BATCH_ROWS) {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO genres (genre) ");
        qb.push_values(chunk, |mut row, genre| {
            row.push_bind(genre.as_str());
        });
        qb.build().execute(&mut *conn).await?;
    }
    debug!("Inserted {} genres", relations.genres.len());
    Ok(())
}

async fn insert_movie_genres(conn: &mut SqliteConnection, relations: &Relations) -> Result<()> {
    for chunk in relations.movie_genres.chunks(INSERT_BATCH_ROWS) {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO movie_genres (tconst, genre) ");
        qb.push_values(chunk, |mut row, mg| {
            row.push_bind(mg.tconst.as_str()).push_bind(mg.genre.as_str());
        });
        qb.build().execute(&mut *conn).await?;
    }
    debug!("Inserted {} movie_genres", relations.movie_genres.len());
    Ok(())
}
