//! Catalog statistics
//!
//! Always computed over the full relations; active filters never apply here.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::catalog::Catalog;
use crate::query::YearRange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i64,
    pub movies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    /// Number of `movie_genres` rows with this genre
    pub movies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total_movies: usize,
    pub total_genres: usize,
    pub years: Option<YearRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub summary: CatalogSummary,
    /// Ascending by year
    pub by_year: Vec<YearCount>,
    /// Descending by count, ties by genre name
    pub by_genre: Vec<GenreCount>,
}

impl Catalog {
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            total_movies: self.movies().len(),
            total_genres: self.genres().len(),
            years: self.year_bounds(),
        }
    }

    pub fn stats(&self) -> CatalogStats {
        let mut years: BTreeMap<i64, usize> = BTreeMap::new();
        for movie in self.movies() {
            *years.entry(movie.start_year).or_default() += 1;
        }

        let mut genres: HashMap<&str, usize> = HashMap::new();
        for mg in self.movie_genres() {
            *genres.entry(mg.genre.as_str()).or_default() += 1;
        }
        let mut by_genre: Vec<GenreCount> = genres
            .into_iter()
            .map(|(genre, movies)| GenreCount {
                genre: genre.to_string(),
                movies,
            })
            .collect();
        by_genre.sort_by(|a, b| b.movies.cmp(&a.movies).then_with(|| a.genre.cmp(&b.genre)));

        CatalogStats {
            summary: self.summary(),
            by_year: years
                .into_iter()
                .map(|(year, movies)| YearCount { year, movies })
                .collect(),
            by_genre,
        }
    }
}
