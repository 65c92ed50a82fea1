//! Dataset generators for test data.
//!
//! - [`DatasetGenerator`]: seeded random datasets whose references always resolve

pub mod dataset;

pub use dataset::{DatasetGenerator, GeneratorConfig};
