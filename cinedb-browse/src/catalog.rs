//! Session catalog
//!
//! The three relations are materialized once per session and never change
//! afterwards. Associations are indexed by movie identifier for tag lookups;
//! filters and statistics scan the movie list.

use cinedb_common::db::{Movie, MovieGenre, Relations};
use cinedb_common::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::query::YearRange;

/// Immutable in-memory copy of the catalog relations
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    genres: Vec<String>,
    movie_genres: Vec<MovieGenre>,
    /// tconst -> positions in `movie_genres`, in relation order
    genres_by_movie: HashMap<String, Vec<usize>>,
    year_bounds: Option<YearRange>,
}

impl Catalog {
    pub fn new(relations: Relations) -> Self {
        let Relations {
            movies,
            genres,
            movie_genres,
        } = relations;

        let mut genres_by_movie: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, mg) in movie_genres.iter().enumerate() {
            genres_by_movie.entry(mg.tconst.clone()).or_default().push(idx);
        }

        let year_bounds = movies
            .iter()
            .map(|m| m.start_year)
            .fold(None, |bounds: Option<YearRange>, year| {
                Some(match bounds {
                    Some(r) => YearRange::new(r.min.min(year), r.max.max(year)),
                    None => YearRange::new(year, year),
                })
            });

        Self {
            movies,
            genres,
            movie_genres,
            genres_by_movie,
            year_bounds,
        }
    }

    /// Load the catalog from the store
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let relations = crate::db::load_relations(pool).await?;
        Ok(Self::new(relations))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn movie_genres(&self) -> &[MovieGenre] {
        &self.movie_genres
    }

    /// Oldest and newest release year, `None` for an empty catalog
    pub fn year_bounds(&self) -> Option<YearRange> {
        self.year_bounds
    }

    /// Genres of one movie, in association order
    pub fn genres_of<'a>(&'a self, tconst: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.genres_by_movie
            .get(tconst)
            .into_iter()
            .flatten()
            .map(move |&idx| self.movie_genres[idx].genre.as_str())
    }

    /// Genres of one movie joined for display
    pub fn genre_display(&self, tconst: &str) -> String {
        self.genres_of(tconst).collect::<Vec<_>>().join(", ")
    }

    pub fn has_genre(&self, tconst: &str, genre: &str) -> bool {
        self.genres_of(tconst).any(|g| g == genre)
    }

    /// Genre names sorted for a picker
    pub fn sorted_genres(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.genres.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
