//! Source export reader
//!
//! The export is a comma-separated file with a header row. Columns are looked
//! up by header name. Only the columns the catalog needs are kept:
//! `originalTitle`, `titleType` and `endYear` are read past and discarded.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{IngestError, IngestResult};

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "tconst",
    "primaryTitle",
    "isAdult",
    "startYear",
    "runtimeMinutes",
    "genres",
];

/// One source row after column pruning, all fields still raw text
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawTitle {
    pub tconst: String,
    #[serde(rename = "primaryTitle")]
    pub primary_title: String,
    #[serde(rename = "isAdult")]
    pub is_adult: String,
    #[serde(rename = "startYear")]
    pub start_year: String,
    #[serde(rename = "runtimeMinutes")]
    pub runtime_minutes: String,
    /// Comma-joined genre list
    pub genres: String,
}

/// Read the whole export at `path`
///
/// Any read failure aborts: a missing file, a missing required column, or a
/// row whose field count differs from the header.
pub fn read_source(path: &Path) -> IngestResult<Vec<RawTitle>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| IngestError::Source {
            path: path.to_path_buf(),
            source,
        })?;

    let rows = read_records(reader, path)?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read an export from any reader; `path` is only used for error messages
pub fn read_source_from<R: Read>(input: R, path: &Path) -> IngestResult<Vec<RawTitle>> {
    let reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);
    read_records(reader, path)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> IngestResult<Vec<RawTitle>> {
    let source_error = |source| IngestError::Source {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(source_error)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(IngestError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    reader
        .deserialize::<RawTitle>()
        .map(|row| row.map_err(source_error))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "tconst,titleType,primaryTitle,originalTitle,isAdult,startYear,endYear,runtimeMinutes,genres\n";

    #[test]
    fn test_prunes_unused_columns() {
        let data = format!(
            "{}tt01,movie,Foo,Le Foo,0,2016,\\N,100,\"Action, Drama\"\n",
            HEADER
        );
        let rows = read_source_from(data.as_bytes(), Path::new("test.csv")).unwrap();

        assert_eq!(
            rows,
            vec![RawTitle {
                tconst: "tt01".to_string(),
                primary_title: "Foo".to_string(),
                is_adult: "0".to_string(),
                start_year: "2016".to_string(),
                runtime_minutes: "100".to_string(),
                genres: "Action, Drama".to_string(),
            }]
        );
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let data = "genres,runtimeMinutes,startYear,isAdult,primaryTitle,tconst\nDrama,95,2019,0,Bar,tt02\n";
        let rows = read_source_from(data.as_bytes(), Path::new("test.csv")).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tconst, "tt02");
        assert_eq!(rows[0].genres, "Drama");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "tconst,primaryTitle,isAdult,startYear,genres\ntt01,Foo,0,2016,Drama\n";
        let err = read_source_from(data.as_bytes(), Path::new("test.csv")).unwrap_err();

        assert!(
            matches!(err, IngestError::MissingColumn { column: "runtimeMinutes", .. }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let data = format!("{}tt01,movie,Foo,Foo,0,2016\n", HEADER);
        let err = read_source_from(data.as_bytes(), Path::new("test.csv")).unwrap_err();

        assert!(matches!(err, IngestError::Source { .. }), "got {:?}", err);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_source(Path::new("/nonexistent/cinedb/movies.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Source { .. }), "got {:?}", err);
        assert!(err.to_string().contains("/nonexistent/cinedb/movies.csv"));
    }
}
