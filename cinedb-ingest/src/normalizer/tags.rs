//! Genre token splitting
//!
//! Plain `str` operations only, so the same tokens come out of every reader of
//! the comma-joined field.

/// Split a comma-joined genre field into trimmed tokens
///
/// Every comma-separated piece yields exactly one token, so tokens keep their
/// order and duplicates, and a piece of only whitespace becomes `""`.
///
/// ```
/// use cinedb_ingest::normalizer::split_tags;
///
/// let tags: Vec<&str> = split_tags(" Action,Drama ,Sci-Fi").collect();
/// assert_eq!(tags, ["Action", "Drama", "Sci-Fi"]);
/// ```
pub fn split_tags(genres: &str) -> impl Iterator<Item = &str> {
    genres.split(',').map(str::trim)
}
