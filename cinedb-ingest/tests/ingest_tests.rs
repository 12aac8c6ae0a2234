//! Integration tests for the ingest job
//!
//! Tests cover:
//! - Relation contents after a full run
//! - Destructive overwrite of previous relations
//! - Idempotence of repeated runs
//! - Abort without persistence on an unreadable source

use cinedb_ingest::{run_ingest, IngestError};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str =
    "tconst,titleType,primaryTitle,originalTitle,isAdult,startYear,endYear,runtimeMinutes,genres\n";

/// Test helper: write an export with the given data rows
fn write_export(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Test helper: open the store produced by a run
async fn open_store(db_path: &Path) -> SqlitePool {
    SqlitePool::connect(&format!("sqlite://{}", db_path.display()))
        .await
        .expect("Should open store")
}

async fn movies(pool: &SqlitePool) -> Vec<(String, String, i64, i64)> {
    sqlx::query_as(
        "SELECT tconst, primaryTitle, startYear, runtimeMinutes FROM movies ORDER BY rowid",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

async fn genres(pool: &SqlitePool) -> Vec<String> {
    sqlx::query_scalar("SELECT genre FROM genres ORDER BY rowid")
        .fetch_all(pool)
        .await
        .unwrap()
}

async fn movie_genres(pool: &SqlitePool) -> Vec<(String, String)> {
    sqlx::query_as("SELECT tconst, genre FROM movie_genres ORDER BY rowid")
        .fetch_all(pool)
        .await
        .unwrap()
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        "tt01,movie,Foo,Foo,0,2016,\\N,100,\"Action, Drama\"",
        "tt02,movie,Old Movie,Old Movie,0,2009,\\N,120,Drama",
        "tt03,movie,Short,Short,0,2018,\\N,45,Comedy",
        "tt04,movie,Adult Film,Adult Film,1,2019,\\N,95,Adult",
        "tt05,movie,No Runtime,No Runtime,0,2019,\\N,\\N,Horror",
        "tt06,movie,Bad Year,Bad Year,0,20l9,\\N,95,Horror",
        "tt07,tvSeries,Bar,Bar,0,2020,2022,110,\"Comedy,Drama,Romance\"",
        "tt08,movie,No Genres,No Genres,0,2021,\\N,100,\\N",
    ]
}

#[tokio::test]
async fn test_ingest_builds_three_relations() {
    let dir = TempDir::new().unwrap();
    let source = write_export(&dir, "movies.csv", &sample_rows());
    let db_path = dir.path().join("movies.db");

    let report = run_ingest(&source, &db_path).await.unwrap();
    assert_eq!(report.rows_read, 8);
    assert_eq!(report.movies, 2);
    assert_eq!(report.rejected_missing, 2);
    assert_eq!(report.rejected_unparseable, 1);
    assert_eq!(report.rejected_quality, 3);

    let pool = open_store(&db_path).await;
    assert_eq!(
        movies(&pool).await,
        vec![
            ("tt01".to_string(), "Foo".to_string(), 2016, 100),
            ("tt07".to_string(), "Bar".to_string(), 2020, 110),
        ]
    );
    assert_eq!(genres(&pool).await, ["Action", "Drama", "Comedy", "Romance"]);
    assert_eq!(
        movie_genres(&pool).await,
        vec![
            ("tt01".to_string(), "Action".to_string()),
            ("tt01".to_string(), "Drama".to_string()),
            ("tt07".to_string(), "Comedy".to_string()),
            ("tt07".to_string(), "Drama".to_string()),
            ("tt07".to_string(), "Romance".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_stored_movies_satisfy_quality_rule() {
    let dir = TempDir::new().unwrap();
    let source = write_export(&dir, "movies.csv", &sample_rows());
    let db_path = dir.path().join("movies.db");
    run_ingest(&source, &db_path).await.unwrap();

    let pool = open_store(&db_path).await;
    let violations: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM movies WHERE startYear < 2015 OR runtimeMinutes < 90",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(violations, 0);

    let orphans: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM movie_genres WHERE tconst NOT IN (SELECT tconst FROM movies)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans, 0, "Every association must reference a stored movie");
}

#[tokio::test]
async fn test_rerun_replaces_previous_relations() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("movies.db");

    let first = write_export(&dir, "first.csv", &sample_rows());
    run_ingest(&first, &db_path).await.unwrap();

    let second = write_export(&dir, "second.csv", &["tt99,movie,Baz,Baz,0,2022,\\N,130,Thriller"]);
    run_ingest(&second, &db_path).await.unwrap();

    let pool = open_store(&db_path).await;
    assert_eq!(
        movies(&pool).await,
        vec![("tt99".to_string(), "Baz".to_string(), 2022, 130)]
    );
    assert_eq!(genres(&pool).await, ["Thriller"]);
    assert_eq!(
        movie_genres(&pool).await,
        vec![("tt99".to_string(), "Thriller".to_string())]
    );
}

#[tokio::test]
async fn test_rerun_on_identical_input_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let source = write_export(&dir, "movies.csv", &sample_rows());
    let db_path = dir.path().join("movies.db");

    run_ingest(&source, &db_path).await.unwrap();
    let pool = open_store(&db_path).await;
    let before = (movies(&pool).await, genres(&pool).await, movie_genres(&pool).await);
    pool.close().await;

    run_ingest(&source, &db_path).await.unwrap();
    let pool = open_store(&db_path).await;
    let after = (movies(&pool).await, genres(&pool).await, movie_genres(&pool).await);

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_missing_source_aborts_without_touching_store() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("movies.db");

    let source = write_export(&dir, "movies.csv", &sample_rows());
    run_ingest(&source, &db_path).await.unwrap();

    let missing = dir.path().join("does-not-exist.csv");
    let err = run_ingest(&missing, &db_path).await.unwrap_err();
    assert!(matches!(err, IngestError::Source { .. }), "got {:?}", err);

    let pool = open_store(&db_path).await;
    assert_eq!(movies(&pool).await.len(), 2, "Previous relations must survive");
}

#[tokio::test]
async fn test_malformed_source_creates_no_store() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("movies.db");
    let source = write_export(
        &dir,
        "movies.csv",
        &["tt01,movie,Foo,Foo,0,2016,\\N,100,Drama", "tt02,movie,Truncated"],
    );

    let err = run_ingest(&source, &db_path).await.unwrap_err();
    assert!(matches!(err, IngestError::Source { .. }), "got {:?}", err);
    assert!(!db_path.exists(), "No store should be created for an unreadable source");
}
