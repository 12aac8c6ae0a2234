//! Relation models

use serde::{Deserialize, Serialize};

/// One row of the `movies` relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub tconst: String,
    pub primary_title: String,
    pub start_year: i64,
    pub runtime_minutes: i64,
}

/// One row of the `movie_genres` relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieGenre {
    pub tconst: String,
    pub genre: String,
}

/// The three normalized relations, each in storage order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations {
    pub movies: Vec<Movie>,
    /// Distinct genre vocabulary
    pub genres: Vec<String>,
    pub movie_genres: Vec<MovieGenre>,
}
