//! # CineDB Common Library
//!
//! Shared code for the CineDB binaries:
//! - Relation models (movies, genres, movie_genres)
//! - Store opening and relation schemas
//! - Configuration loading and root folder resolution
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
