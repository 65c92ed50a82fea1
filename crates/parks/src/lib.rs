//! Theme park schema: row models, the table catalogue, the connection
//! provider and read-side queries.

pub mod config;
pub mod database;
pub mod errors;
pub mod models;

pub use config::DatabaseConfig;
pub use database::Database;
pub use errors::DbError;
