//! Database models and relation schemas

pub mod init;
pub mod models;
pub mod schema;

pub use init::*;
pub use models::*;
pub use schema::*;
