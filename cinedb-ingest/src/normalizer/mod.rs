//! Normalizer: one flat export into three relations
//!
//! Pipeline, in order:
//! 1. column pruning (done while reading, see [`crate::source`])
//! 2. `\N` and empty fields become absent
//! 3. rows with any absent retained value are dropped
//! 4. `startYear` / `runtimeMinutes` are coerced to integers, failures drop the row
//! 5. quality rule: `startYear >= 2015`, `runtimeMinutes >= 90`, not adult
//! 6. projection into `movies`, `genres`, `movie_genres`

mod clean;
mod project;
mod tags;

pub use clean::{
    clean, normalize_missing, passes_quality_rule, CleanTitle, Rejection, MIN_RUNTIME_MINUTES,
    MIN_START_YEAR, MISSING_SENTINEL,
};
pub use project::project;
pub use tags::split_tags;

use cinedb_common::db::Relations;
use serde::Serialize;

use crate::source::RawTitle;

/// Aggregate counts of one normalizer run
///
/// Individual dropped rows are not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub rows_read: usize,
    pub rejected_missing: usize,
    pub rejected_unparseable: usize,
    pub rejected_quality: usize,
    pub duplicate_ids: usize,
    pub movies: usize,
    pub genres: usize,
    pub movie_genres: usize,
}

impl NormalizeReport {
    /// Rows dropped for any reason
    pub fn rows_dropped(&self) -> usize {
        self.rejected_missing + self.rejected_unparseable + self.rejected_quality + self.duplicate_ids
    }
}

/// Run the cleaning and projection steps over all source rows
pub fn normalize(rows: &[RawTitle]) -> (Relations, NormalizeReport) {
    let mut report = NormalizeReport {
        rows_read: rows.len(),
        ..NormalizeReport::default()
    };

    let mut kept = Vec::with_capacity(rows.len());
    for raw in rows {
        match clean(raw) {
            Ok(row) => kept.push(row),
            Err(Rejection::MissingValue) => report.rejected_missing += 1,
            Err(Rejection::Unparseable) => report.rejected_unparseable += 1,
            Err(Rejection::QualityRule) => report.rejected_quality += 1,
        }
    }

    let (relations, duplicate_ids) = project(&kept);
    report.duplicate_ids = duplicate_ids;
    report.movies = relations.movies.len();
    report.genres = relations.genres.len();
    report.movie_genres = relations.movie_genres.len();

    (relations, report)
}
