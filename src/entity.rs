//! Keyed-collection differ
//!
//! Classifies the entries of two `{id: record}` mappings by key presence, then
//! splits the shared keys by deep structural equality of their records.
//! Used for components, variables and job info fields alike.

use serde::Serialize;
use serde_json::{Map, Value};

/// Classification of the keys of two mappings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityDiff {
    /// Only in the new mapping, in new-mapping order
    pub added: Vec<String>,
    /// Only in the old mapping, in old-mapping order
    pub removed: Vec<String>,
    /// In both with differing records, in new-mapping order
    pub modified: Vec<String>,
    /// In both with equal records, in new-mapping order
    pub unchanged: Vec<String>,
}

impl EntityDiff {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.modified.is_empty()
    }

    /// Number of added, removed and modified keys
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Diff two keyed collections.
///
/// Record equality is `serde_json::Value` equality: mappings compare
/// regardless of key order, arrays element by element.
pub fn diff_entities(old: &Map<String, Value>, new: &Map<String, Value>) -> EntityDiff {
    let mut diff = EntityDiff::default();

    for (key, new_record) in new {
        match old.get(key) {
            None => diff.added.push(key.clone()),
            Some(old_record) if old_record != new_record => diff.modified.push(key.clone()),
            Some(_) => diff.unchanged.push(key.clone()),
        }
    }

    diff.removed = old
        .keys()
        .filter(|key| !new.contains_key(key.as_str()))
        .cloned()
        .collect();

    diff
}
