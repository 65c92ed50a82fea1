//! Fluent builder APIs for datasets.
//!
//! The [`DatasetBuilder`] provides a convenient way to write small,
//! hand-picked datasets inline, typically in tests.

mod dataset;

pub use dataset::DatasetBuilder;
