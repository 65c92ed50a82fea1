//! Database integration for seeding datasets.
//!
//! - [`SchemaManager`]: drops and creates the five tables
//! - [`Seeder`]: inserts a dataset in one transaction
//! - [`KeyMap`] / [`ResolvedKeys`]: name → id resolution between insert phases

mod error;
pub mod keys;
mod schema;
mod seeder;

pub use error::SeedError;
pub use keys::{KeyMap, ResolvedKeys};
pub use schema::{SchemaManager, ddl};
pub use seeder::{SeedSummary, Seeder, resolve_stall_foods};
