//! Catalog query engine
//!
//! A [`FilterSpec`] combines three conditions with AND:
//! - text: title contains the query ignoring case, OR the identifier contains it
//! - genre: the movie has an association with the genre
//! - years: release year inside the closed interval, the catalog bounds when
//!   none is given
//!
//! When nothing matches, [`EmptyResultPolicy::ShowAll`] substitutes the whole
//! catalog as the working set; [`EmptyResultPolicy::Empty`] keeps it empty.

use cinedb_common::config::EmptyResultPolicy;
use cinedb_common::db::Movie;
use serde::Serialize;

use crate::catalog::Catalog;

/// Genre picker value meaning "no genre filter"
pub const ALL_GENRES: &str = "All";

/// Inclusive release year interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i64,
    pub max: i64,
}

impl YearRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i64) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Genre condition of a filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    /// Picker value to filter; absent, empty and [`ALL_GENRES`] mean no filter
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL_GENRES) => Self::All,
            Some(genre) => Self::Only(genre.to_string()),
        }
    }
}

/// Filter specification supplied by the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub text: Option<String>,
    pub genre: GenreFilter,
    /// `None` applies the catalog's own year bounds
    pub years: Option<YearRange>,
}

impl FilterSpec {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = GenreFilter::Only(genre.into());
        self
    }

    pub fn with_years(mut self, min: i64, max: i64) -> Self {
        self.years = Some(YearRange::new(min, max));
        self
    }
}

/// The movies a listing pages over
#[derive(Debug, Clone)]
pub struct WorkingSet<'a> {
    /// Movies in catalog order
    pub movies: Vec<&'a Movie>,
    /// Movies that actually matched the filter
    pub matched: usize,
    /// True when the whole catalog replaced an empty match
    pub fell_back: bool,
    /// Year interval that was applied
    pub years: Option<YearRange>,
}

impl Catalog {
    /// Fill in missing year bounds from the catalog
    pub fn year_range(&self, min: Option<i64>, max: Option<i64>) -> Option<YearRange> {
        match (self.year_bounds(), min, max) {
            (_, Some(min), Some(max)) => Some(YearRange::new(min, max)),
            (Some(bounds), min, max) => Some(YearRange::new(
                min.unwrap_or(bounds.min),
                max.unwrap_or(bounds.max),
            )),
            // Empty catalog and a half-open request: nothing to bound against
            (None, _, _) => None,
        }
    }

    /// Apply `spec` and the empty-result policy
    pub fn search(&self, spec: &FilterSpec, policy: EmptyResultPolicy) -> WorkingSet<'_> {
        let years = spec.years.or_else(|| self.year_bounds());
        let text = spec
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| (t.to_lowercase(), t));

        let matched: Vec<&Movie> = self
            .movies()
            .iter()
            .filter(|movie| {
                let text_ok = text.as_ref().map_or(true, |(lower, raw)| {
                    movie.primary_title.to_lowercase().contains(lower.as_str())
                        || movie.tconst.contains(raw)
                });
                let genre_ok = match &spec.genre {
                    GenreFilter::All => true,
                    GenreFilter::Only(genre) => self.has_genre(&movie.tconst, genre),
                };
                let year_ok = years.map_or(true, |r| r.contains(movie.start_year));

                text_ok && genre_ok && year_ok
            })
            .collect();

        let matched_count = matched.len();
        if matched.is_empty() && policy == EmptyResultPolicy::ShowAll {
            return WorkingSet {
                movies: self.movies().iter().collect(),
                matched: 0,
                fell_back: !self.movies().is_empty(),
                years,
            };
        }

        WorkingSet {
            movies: matched,
            matched: matched_count,
            fell_back: false,
            years,
        }
    }
}
