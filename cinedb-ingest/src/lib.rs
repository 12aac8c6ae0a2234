//! cinedb-ingest library
//!
//! Batch job turning the flat movie export into the `movies`, `genres` and
//! `movie_genres` relations. The run is all-or-nothing: the source is read
//! and normalized completely before the store is opened, and the relations
//! are replaced in a single transaction.

pub mod error;
pub mod normalizer;
pub mod persist;
pub mod source;

pub use crate::error::{IngestError, IngestResult};
pub use crate::normalizer::{normalize, NormalizeReport};

use std::path::Path;
use tracing::info;

/// Read `source`, normalize it and replace the relations stored at `db_path`
pub async fn run_ingest(source: &Path, db_path: &Path) -> IngestResult<NormalizeReport> {
    info!("Reading source export: {}", source.display());
    let rows = source::read_source(source)?;

    let (relations, report) = normalize(&rows);
    drop(rows);

    info!(
        rows_read = report.rows_read,
        rejected_missing = report.rejected_missing,
        rejected_unparseable = report.rejected_unparseable,
        rejected_quality = report.rejected_quality,
        duplicate_ids = report.duplicate_ids,
        "Normalized source: kept {} of {} rows",
        report.movies,
        report.rows_read
    );

    let pool = cinedb_common::db::open_database(db_path).await?;
    persist::replace_relations(&pool, &relations).await?;
    pool.close().await;

    Ok(report)
}
