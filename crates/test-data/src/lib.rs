//! Dataset seeding for the theme parks schema.
//!
//! This crate rebuilds the five park tables and fills them with a dataset in
//! one transaction. Records in a [`dataset::Dataset`] refer to each other by
//! name; the seeder swaps those names for the ids Postgres generates.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let pool = DatabaseConfig::from_env()?.connect().await?;
//!
//! let dataset = DatasetBuilder::new()
//!     .park("Funland", 1990, 500_000)
//!     .food("Pretzel", true)
//!     .ride("Loop", 1995, 10, "Funland")
//!     .stall("Snack Hut", "Funland", ["Pretzel"])
//!     .build();
//!
//! let report = SeedPipeline::new(pool).run(&dataset).await?;
//! ```

pub mod builders;
pub mod config;
pub mod dataset;
pub mod db;
pub mod fixtures;
pub mod generators;
pub mod pipeline;

// Re-export core types from parks crate
pub use parks::models::{Food, Park, Ride, Stall, StallFood, Table};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::DatasetBuilder;
    pub use crate::config::{DatasetSource, SeedConfig};
    pub use crate::dataset::{Dataset, FoodSeed, ParkSeed, RideSeed, StallSeed};
    pub use crate::db::{KeyMap, ResolvedKeys, SchemaManager, SeedError, SeedSummary, Seeder};
    pub use crate::fixtures;
    pub use crate::generators::{DatasetGenerator, GeneratorConfig};
    pub use crate::pipeline::{PipelineReport, SeedPipeline};
    pub use crate::{Food, Park, Ride, Stall, StallFood, Table};
    pub use parks::{Database, DatabaseConfig};
}
