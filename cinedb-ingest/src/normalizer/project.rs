//! Relation projection
//!
//! Turns cleaned rows into the `movies`, `genres` and `movie_genres`
//! relations. Output order follows input order, so identical input always
//! yields identical relations.

use cinedb_common::db::{Movie, MovieGenre, Relations};
use std::collections::HashSet;

use super::clean::CleanTitle;
use super::tags::split_tags;

/// Project cleaned rows into the three relations
///
/// Returns the relations and the number of rows skipped because their
/// identifier was already taken by an earlier row.
pub fn project<'a, I>(rows: I) -> (Relations, usize)
where
    I: IntoIterator<Item = &'a CleanTitle>,
{
    let mut relations = Relations::default();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_genres: HashSet<&str> = HashSet::new();
    let mut duplicates = 0;

    for row in rows {
        if !seen_ids.insert(row.tconst.as_str()) {
            duplicates += 1;
            continue;
        }

        relations.movies.push(Movie {
            tconst: row.tconst.clone(),
            primary_title: row.primary_title.clone(),
            start_year: row.start_year,
            runtime_minutes: row.runtime_minutes,
        });

        for tag in split_tags(&row.genres) {
            if seen_genres.insert(tag) {
                relations.genres.push(tag.to_string());
            }
            relations.movie_genres.push(MovieGenre {
                tconst: row.tconst.clone(),
                genre: tag.to_string(),
            });
        }
    }

    (relations, duplicates)
}
