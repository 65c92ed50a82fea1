//! Configuration for seeding runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::Dataset;
use crate::fixtures::{self, FixtureError};
use crate::generators::DatasetGenerator;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown dataset {0:?} (expected development, test or generated)")]
    UnknownDataset(String),
    #[error("{key} has an invalid value: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where the dataset for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    /// Compiled-in development fixtures.
    Development,
    /// Compiled-in test fixtures.
    Test,
    /// Seeded random dataset from [`DatasetGenerator`].
    Generated { seed: u64 },
    /// JSON files in a directory.
    Directory(PathBuf),
}

impl DatasetSource {
    pub fn load(&self) -> Result<Dataset, FixtureError> {
        match self {
            DatasetSource::Development => fixtures::development(),
            DatasetSource::Test => fixtures::test(),
            DatasetSource::Generated { seed } => Ok(DatasetGenerator::new().generate_seeded(*seed)),
            DatasetSource::Directory(dir) => fixtures::from_dir(dir),
        }
    }
}

/// Configuration for seeding operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Dataset to seed.
    pub dataset: DatasetSource,

    /// Rows per multi-row INSERT.
    pub batch_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::Development,
            batch_size: 500,
        }
    }
}

impl SeedConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads `SEED_DATASET`, `SEED_GENERATOR_SEED`, `SEED_DATA_DIR` and
    /// `SEED_BATCH_SIZE` through `lookup`. `SEED_DATA_DIR` wins over
    /// `SEED_DATASET`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let seed = match lookup("SEED_GENERATOR_SEED") {
            Some(raw) => parse_var("SEED_GENERATOR_SEED", &raw)?,
            None => 42,
        };

        if let Some(name) = lookup("SEED_DATASET") {
            config.dataset = match name.trim().to_ascii_lowercase().as_str() {
                "development" | "dev" => DatasetSource::Development,
                "test" => DatasetSource::Test,
                "generated" => DatasetSource::Generated { seed },
                _ => return Err(ConfigError::UnknownDataset(name)),
            };
        }

        if let Some(dir) = lookup("SEED_DATA_DIR").filter(|d| !d.is_empty()) {
            config.dataset = DatasetSource::Directory(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("SEED_BATCH_SIZE") {
            config.batch_size = parse_var("SEED_BATCH_SIZE", &raw)?;
            if config.batch_size == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "SEED_BATCH_SIZE",
                    value: raw,
                });
            }
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SeedConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, SeedConfig::default());
        assert_eq!(config.dataset, DatasetSource::Development);
    }

    #[test]
    fn test_generated_with_seed() {
        let config = SeedConfig::from_vars(vars(&[
            ("SEED_DATASET", "Generated"),
            ("SEED_GENERATOR_SEED", "12345"),
            ("SEED_BATCH_SIZE", "50"),
        ]))
        .unwrap();
        assert_eq!(config.dataset, DatasetSource::Generated { seed: 12345 });
        assert_eq!(config.batch_size, 50);
    }

    #[test]
    fn test_data_dir_overrides_dataset() {
        let config = SeedConfig::from_vars(vars(&[
            ("SEED_DATASET", "test"),
            ("SEED_DATA_DIR", "/srv/fixtures"),
        ]))
        .unwrap();
        assert_eq!(
            config.dataset,
            DatasetSource::Directory(PathBuf::from("/srv/fixtures"))
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = SeedConfig::from_vars(vars(&[("SEED_DATASET", "prod")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDataset(_)));

        let err = SeedConfig::from_vars(vars(&[("SEED_BATCH_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SEED_BATCH_SIZE", .. }));

        let err = SeedConfig::from_vars(vars(&[("SEED_GENERATOR_SEED", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SEED_GENERATOR_SEED", .. }));
    }

    #[test]
    fn test_load_sources() {
        assert_eq!(DatasetSource::Test.load().unwrap().parks.len(), 3);
        assert_eq!(
            DatasetSource::Generated { seed: 5 }.load().unwrap(),
            DatasetGenerator::new().generate_seeded(5)
        );
    }
}
