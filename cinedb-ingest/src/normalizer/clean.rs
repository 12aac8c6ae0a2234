//! Row cleaning: missing values, type coercion and the catalog quality rule

use crate::source::RawTitle;

/// Missing-value marker used by the source export
pub const MISSING_SENTINEL: &str = "\\N";

/// Oldest release year kept in the catalog
pub const MIN_START_YEAR: i64 = 2015;

/// Shortest runtime kept in the catalog
pub const MIN_RUNTIME_MINUTES: i64 = 90;

/// A row that survived cleaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTitle {
    pub tconst: String,
    pub primary_title: String,
    pub start_year: i64,
    pub runtime_minutes: i64,
    /// Comma-joined genre list, split later
    pub genres: String,
}

/// Why a row was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A retained column was empty or held the sentinel
    MissingValue,
    /// Year, runtime or adult flag did not parse
    Unparseable,
    /// Parsed fine but failed the catalog quality rule
    QualityRule,
}

/// `None` for the empty field and for the `\N` sentinel
pub fn normalize_missing(field: &str) -> Option<&str> {
    if field.is_empty() || field == MISSING_SENTINEL {
        None
    } else {
        Some(field)
    }
}

/// Clean one row, or say why it is dropped
///
/// Order matters for the reported reason: absent values are checked over all
/// retained columns first, then parsing, then the quality rule. A field that
/// fails to parse is never replaced by zero.
pub fn clean(raw: &RawTitle) -> Result<CleanTitle, Rejection> {
    let (Some(tconst), Some(title), Some(is_adult), Some(start_year), Some(runtime), Some(genres)) = (
        normalize_missing(&raw.tconst),
        normalize_missing(&raw.primary_title),
        normalize_missing(&raw.is_adult),
        normalize_missing(&raw.start_year),
        normalize_missing(&raw.runtime_minutes),
        normalize_missing(&raw.genres),
    ) else {
        return Err(Rejection::MissingValue);
    };

    let (Some(start_year), Some(runtime_minutes), Some(is_adult)) =
        (parse_int(start_year), parse_int(runtime), parse_flag(is_adult))
    else {
        return Err(Rejection::Unparseable);
    };

    if !passes_quality_rule(start_year, runtime_minutes, is_adult) {
        return Err(Rejection::QualityRule);
    }

    Ok(CleanTitle {
        tconst: tconst.to_string(),
        primary_title: title.to_string(),
        start_year,
        runtime_minutes,
        genres: genres.to_string(),
    })
}

/// Fixed catalog rule: recent, feature-length, not adult
pub fn passes_quality_rule(start_year: i64, runtime_minutes: i64, is_adult: bool) -> bool {
    start_year >= MIN_START_YEAR && runtime_minutes >= MIN_RUNTIME_MINUTES && !is_adult
}

fn parse_int(field: &str) -> Option<i64> {
    field.trim().parse().ok()
}

fn parse_flag(field: &str) -> Option<bool> {
    match field.trim() {
        "0" => Some(false),
        "1" => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        _ => None,
    }
}
