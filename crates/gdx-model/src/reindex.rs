//! Reindex maps: old-key to new-key pairs from primary-key renumbering.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A primary-key value was renumbered twice.
///
/// Old keys are unique by contract of the source data; a duplicate means
/// the upstream table is corrupt, not that the pipeline misbehaved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate primary key '{old_key}' in reindex map")]
pub struct DuplicateKeyError {
    pub old_key: String,
}

/// One renumbering: the key a record arrived with and the key it was
/// assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexEntry {
    pub old_key: String,
    pub new_key: u64,
}

impl ReindexEntry {
    pub fn new(old_key: impl Into<String>, new_key: u64) -> Self {
        Self {
            old_key: old_key.into(),
            new_key,
        }
    }
}

/// Materialized collection of reindex entries.
///
/// Entries keep arrival order; lookup by old key is constant time. The map
/// is fully populated by one pipeline run before any reader consults it,
/// so no interior synchronization is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReindexMap {
    entries: IndexMap<String, u64>,
}

impl ReindexMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, rejecting duplicate old keys.
    pub fn insert(&mut self, entry: ReindexEntry) -> Result<(), DuplicateKeyError> {
        match self.entries.entry(entry.old_key) {
            Entry::Occupied(occupied) => Err(DuplicateKeyError {
                old_key: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(entry.new_key);
                Ok(())
            }
        }
    }

    /// New key assigned to `old_key`, if one exists.
    pub fn resolve(&self, old_key: &str) -> Option<u64> {
        self.entries.get(old_key).copied()
    }

    /// Iterate entries in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, u64)> for ReindexMap {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_resolve() {
        let mut map = ReindexMap::new();
        map.insert(ReindexEntry::new("1", 101)).unwrap();
        map.insert(ReindexEntry::new("2", 102)).unwrap();

        assert_eq!(map.resolve("1"), Some(101));
        assert_eq!(map.resolve("2"), Some(102));
        assert_eq!(map.resolve("99"), None);
    }

    #[test]
    fn test_duplicate_old_key_rejected() {
        let mut map = ReindexMap::new();
        map.insert(ReindexEntry::new("1", 101)).unwrap();
        let err = map.insert(ReindexEntry::new("1", 105)).unwrap_err();
        assert_eq!(err.old_key, "1");
        // The original assignment is untouched.
        assert_eq!(map.resolve("1"), Some(101));
    }

    #[test]
    fn test_arrival_order_preserved() {
        let mut map = ReindexMap::new();
        map.insert(ReindexEntry::new("9", 0)).unwrap();
        map.insert(ReindexEntry::new("3", 1)).unwrap();
        map.insert(ReindexEntry::new("7", 2)).unwrap();

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["9", "3", "7"]);
    }
}
