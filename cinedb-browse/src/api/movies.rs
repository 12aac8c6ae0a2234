//! Catalog listing and CSV export
//!
//! Both endpoints run the same filter and empty-result policy. The listing
//! returns one page of the working set; the export returns all of it.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use cinedb_common::db::Movie;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{
    catalog::Catalog,
    error::{ApiError, ApiResult},
    pagination::{calculate_pagination, validate_page_size, DEFAULT_PAGE_SIZE},
    query::{FilterSpec, GenreFilter, YearRange},
    AppState,
};

/// File name offered for CSV downloads
pub const EXPORT_FILE_NAME: &str = "movies_filtered.csv";

/// Filter parameters shared by listing and export
#[derive(Debug, Deserialize)]
pub struct MovieFilter {
    /// Text matched against title (ignoring case) or identifier
    pub q: Option<String>,
    /// Genre name, or "All"
    pub genre: Option<String>,
    /// A cleared year field arrives as `year_min=` and means no bound
    #[serde(default, deserialize_with = "blank_as_none")]
    pub year_min: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub year_max: Option<i64>,
}

impl MovieFilter {
    fn to_spec(&self, catalog: &Catalog) -> FilterSpec {
        FilterSpec {
            text: self.q.clone(),
            genre: GenreFilter::from_param(self.genre.as_deref()),
            years: catalog.year_range(self.year_min, self.year_max),
        }
    }
}

/// Listing parameters: the filter plus the requested page
#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    #[serde(flatten)]
    pub filter: MovieFilter,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Parse an optional year, treating an empty value as absent
///
/// Flattened fields arrive as strings, so the number is parsed here.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(year) => year
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid year: {:?}", year))),
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// One listed movie with its genres resolved for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRow {
    pub tconst: String,
    pub primary_title: String,
    pub start_year: i64,
    pub runtime_minutes: i64,
    /// Genres in association order, comma separated
    pub genres: String,
}

impl MovieRow {
    fn new(catalog: &Catalog, movie: &Movie) -> Self {
        Self {
            tconst: movie.tconst.clone(),
            primary_title: movie.primary_title.clone(),
            start_year: movie.start_year,
            runtime_minutes: movie.runtime_minutes,
            genres: catalog.genre_display(&movie.tconst),
        }
    }
}

/// Listing response with results and pagination metadata
#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    /// Size of the working set being paged
    pub total_results: usize,
    /// Movies that matched the filter (0 when the listing fell back)
    pub matched_results: usize,
    /// True when an empty match was replaced by the whole catalog
    pub fell_back: bool,
    pub years: Option<YearRange>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// 1-based position of the first movie on the page, 0 for an empty page
    pub first_index: usize,
    /// 1-based position of the last movie on the page
    pub last_index: usize,
    pub movies: Vec<MovieRow>,
}

/// GET /api/movies?q=&genre=&year_min=&year_max=&page=&page_size=
pub async fn list_movies(
    State(state): State<AppState>,
    query: Result<Query<MovieQuery>, QueryRejection>,
) -> ApiResult<Json<MovieListResponse>> {
    let Query(query) = query?;
    let page_size = validate_page_size(query.page_size)?;
    let catalog = &state.catalog;

    let spec = query.filter.to_spec(catalog);
    let working = catalog.search(&spec, state.empty_result);
    let p = calculate_pagination(working.movies.len(), query.page, page_size);

    debug!(
        "Listing page {}/{}: {} matched, fell_back={}",
        p.page, p.total_pages, working.matched, working.fell_back
    );

    let movies = p
        .slice(&working.movies)
        .iter()
        .map(|movie| MovieRow::new(catalog, movie))
        .collect();

    Ok(Json(MovieListResponse {
        total_results: working.movies.len(),
        matched_results: working.matched,
        fell_back: working.fell_back,
        years: working.years,
        page: p.page,
        page_size: p.page_size,
        total_pages: p.total_pages,
        first_index: if p.end > p.offset { p.offset + 1 } else { 0 },
        last_index: p.end,
        movies,
    }))
}

/// GET /api/movies/export.csv?q=&genre=&year_min=&year_max=
///
/// Downloads the whole working set as CSV. Paging parameters are ignored.
pub async fn export_movies_csv(
    State(state): State<AppState>,
    filter: Result<Query<MovieFilter>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(filter) = filter?;
    let catalog = &state.catalog;
    let spec = filter.to_spec(catalog);
    let working = catalog.search(&spec, state.empty_result);

    let mut writer = csv::Writer::from_writer(Vec::new());
    if working.movies.is_empty() {
        // serialize() only emits the header together with the first row
        writer
            .write_record(["tconst", "primaryTitle", "startYear", "runtimeMinutes", "genres"])
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }
    for movie in &working.movies {
        writer
            .serialize(MovieRow::new(catalog, movie))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    debug!("Exported {} movies as CSV", working.movies.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}
