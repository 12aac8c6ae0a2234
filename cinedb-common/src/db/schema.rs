//! Relation names and DDL
//!
//! Column names follow the source export so the store stays readable with
//! the export's own documentation.

/// Name of the movie relation
pub const MOVIES_TABLE: &str = "movies";
/// Name of the genre vocabulary relation
pub const GENRES_TABLE: &str = "genres";
/// Name of the movie/genre association relation
pub const MOVIE_GENRES_TABLE: &str = "movie_genres";

pub const CREATE_MOVIES_TABLE: &str = r#"
    CREATE TABLE movies (
        tconst TEXT NOT NULL,
        primaryTitle TEXT NOT NULL,
        startYear INTEGER NOT NULL,
        runtimeMinutes INTEGER NOT NULL
    )
"#;

pub const CREATE_GENRES_TABLE: &str = r#"
    CREATE TABLE genres (
        genre TEXT NOT NULL
    )
"#;

// No foreign key: readers assume every tconst exists in movies
pub const CREATE_MOVIE_GENRES_TABLE: &str = r#"
    CREATE TABLE movie_genres (
        tconst TEXT NOT NULL,
        genre TEXT NOT NULL
    )
"#;

/// Relations in the order they are written
pub const RELATION_TABLES: [&str; 3] = [MOVIES_TABLE, GENRES_TABLE, MOVIE_GENRES_TABLE];
