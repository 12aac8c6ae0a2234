//! HTTP API handlers for cinedb-browse

pub mod buildinfo;
pub mod genres;
pub mod health;
pub mod movies;
pub mod semantics;
pub mod stats;
pub mod table;

pub use buildinfo::get_build_info;
pub use genres::list_genres;
pub use health::health_routes;
pub use movies::{export_movies_csv, list_movies};
pub use semantics::get_table_semantics;
pub use stats::get_stats;
pub use table::get_table_data;
