//! Static fixture datasets.
//!
//! The development and test datasets are compiled into the crate. Custom
//! datasets can be loaded from a directory holding `parks.json`,
//! `foods.json`, `rides.json` and `stalls.json`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dataset::Dataset;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid fixture {name}: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
}

mod development_files {
    pub const PARKS: &str = include_str!("../data/development/parks.json");
    pub const FOODS: &str = include_str!("../data/development/foods.json");
    pub const RIDES: &str = include_str!("../data/development/rides.json");
    pub const STALLS: &str = include_str!("../data/development/stalls.json");
}

mod test_files {
    pub const PARKS: &str = include_str!("../data/test/parks.json");
    pub const FOODS: &str = include_str!("../data/test/foods.json");
    pub const RIDES: &str = include_str!("../data/test/rides.json");
    pub const STALLS: &str = include_str!("../data/test/stalls.json");
}

/// The development dataset.
pub fn development() -> Result<Dataset, FixtureError> {
    Ok(Dataset {
        parks: parse("development/parks.json", development_files::PARKS)?,
        foods: parse("development/foods.json", development_files::FOODS)?,
        rides: parse("development/rides.json", development_files::RIDES)?,
        stalls: parse("development/stalls.json", development_files::STALLS)?,
    })
}

/// The small dataset used by automated tests.
pub fn test() -> Result<Dataset, FixtureError> {
    Ok(Dataset {
        parks: parse("test/parks.json", test_files::PARKS)?,
        foods: parse("test/foods.json", test_files::FOODS)?,
        rides: parse("test/rides.json", test_files::RIDES)?,
        stalls: parse("test/stalls.json", test_files::STALLS)?,
    })
}

/// Loads a dataset from the four JSON files in `dir`.
pub fn from_dir(dir: impl AsRef<Path>) -> Result<Dataset, FixtureError> {
    let dir = dir.as_ref();

    Ok(Dataset {
        parks: read(dir, "parks.json")?,
        foods: read(dir, "foods.json")?,
        rides: read(dir, "rides.json")?,
        stalls: read(dir, "stalls.json")?,
    })
}

fn read<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, FixtureError> {
    let path = dir.join(file);
    let contents = std::fs::read_to_string(&path).map_err(|source| FixtureError::Io {
        path: path.clone(),
        source,
    })?;

    parse(&path.display().to_string(), &contents)
}

fn parse<T: DeserializeOwned>(name: &str, contents: &str) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str(contents).map_err(|source| FixtureError::Parse {
        name: name.to_string(),
        source,
    })
}
