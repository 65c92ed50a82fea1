//! Natural-key to surrogate-key resolution.
//!
//! Independent entities are inserted first and their generated ids recorded
//! in a [`KeyMap`] keyed by name. Dependent entities then look their
//! references up in those maps; a miss is an error, never a silent NULL.
//! A name carried by more than one row is ambiguous and never resolves.

use std::collections::{HashMap, HashSet};

use super::SeedError;

/// Name → id map for one entity, built from `RETURNING` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    entity: &'static str,
    ids: HashMap<String, i32>,
    ambiguous: HashSet<String>,
}

impl KeyMap {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            ids: HashMap::new(),
            ambiguous: HashSet::new(),
        }
    }

    /// Builds a map from `(id, name)` rows. A name that repeats with a
    /// different id is marked ambiguous.
    pub fn from_rows(
        entity: &'static str,
        rows: impl IntoIterator<Item = (i32, String)>,
    ) -> Self {
        let mut map = Self::new(entity);
        map.extend(rows);
        map
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = (i32, String)>) {
        for (id, name) in rows {
            match self.ids.get(&name) {
                Some(&existing) if existing != id => {
                    self.ambiguous.insert(name);
                }
                Some(_) => {}
                None => {
                    self.ids.insert(name, id);
                }
            }
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Id for `name`, or `None` when it is unknown or ambiguous.
    pub fn get(&self, name: &str) -> Option<i32> {
        if self.is_ambiguous(name) {
            return None;
        }
        self.ids.get(name).copied()
    }

    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous.contains(name)
    }

    /// Looks up `name`, failing with [`SeedError::UnresolvedReference`] on a
    /// miss and [`SeedError::AmbiguousReference`] when several rows share it.
    ///
    /// `referenced_by` describes the row holding the reference and only
    /// feeds the error message.
    pub fn resolve(
        &self,
        name: &str,
        referenced_by: impl FnOnce() -> String,
    ) -> Result<i32, SeedError> {
        if self.is_ambiguous(name) {
            return Err(SeedError::AmbiguousReference {
                entity: self.entity,
                name: name.to_string(),
                referenced_by: referenced_by(),
            });
        }

        self.get(name).ok_or_else(|| SeedError::UnresolvedReference {
            entity: self.entity,
            name: name.to_string(),
            referenced_by: referenced_by(),
        })
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Key maps produced during a seed run, passed from the independent-entity
/// phase to the dependent-entity phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKeys {
    pub parks: KeyMap,
    pub foods: KeyMap,
    pub stalls: KeyMap,
}

impl Default for ResolvedKeys {
    fn default() -> Self {
        Self {
            parks: KeyMap::new("park"),
            foods: KeyMap::new("food"),
            stalls: KeyMap::new("stall"),
        }
    }
}
