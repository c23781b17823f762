// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Name-to-identifier lookup tables
//!
//! Every cross reference in the interchange format is a name. Earlier
//! import stages publish their entities as a [`NameIndex`], and later
//! stages resolve names against it. The tables are read-only once built,
//! which keeps the dependency order between stages explicit.

use crate::EntityId;
use indexmap::IndexMap;

/// Name lookup and reference resolution
pub trait NameResolver {
    /// Resolve a name to an entity id
    ///
    /// # Returns
    /// `Some(id)` if an entity with this name exists, `None` otherwise
    fn resolve(&self, name: &str) -> Option<EntityId>;

    /// Check whether a name resolves
    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Number of names in the table
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only name -> id table built from one entity collection
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
    exact: IndexMap<String, EntityId>,
    /// Upper-cased names, present only for case-insensitive tables
    folded: Option<IndexMap<String, EntityId>>,
}

impl NameIndex {
    /// Create an empty table
    pub fn new(case_insensitive: bool) -> Self {
        Self {
            exact: IndexMap::new(),
            folded: case_insensitive.then(IndexMap::new),
        }
    }

    /// Build a table from `(name, id)` pairs
    ///
    /// A repeated name keeps the last id, matching the last-write-wins rule
    /// of the entity collections.
    pub fn from_pairs<'a, I>(pairs: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = (&'a str, EntityId)>,
    {
        let mut index = Self::new(case_insensitive);
        for (name, id) in pairs {
            index.insert(name, id);
        }
        index
    }

    /// Add or replace a name
    pub fn insert(&mut self, name: &str, id: EntityId) {
        self.exact.insert(name.to_string(), id);
        if let Some(folded) = self.folded.as_mut() {
            folded.insert(name.to_uppercase(), id);
        }
    }

    /// Whether lookups fall back to a case-insensitive match
    pub fn is_case_insensitive(&self) -> bool {
        self.folded.is_some()
    }

    /// Iterate `(name, id)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.exact.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

impl NameResolver for NameIndex {
    fn resolve(&self, name: &str) -> Option<EntityId> {
        if let Some(id) = self.exact.get(name) {
            return Some(*id);
        }
        self.folded
            .as_ref()
            .and_then(|folded| folded.get(&name.to_uppercase()).copied())
    }

    fn len(&self) -> usize {
        self.exact.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdCategory;

    fn id(index: u32) -> EntityId {
        EntityId::new(IdCategory::Material, index)
    }

    #[test]
    fn test_exact_lookup() {
        let index = NameIndex::from_pairs([("A992Fy50", id(1)), ("4000Psi", id(2))], false);
        assert_eq!(index.resolve("A992Fy50"), Some(id(1)));
        assert_eq!(index.resolve("a992fy50"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let index = NameIndex::from_pairs([("A992Fy50", id(1))], true);
        assert_eq!(index.resolve("a992FY50"), Some(id(1)));
        assert!(index.contains("A992FY50"));
        assert!(!index.contains("A36"));
    }

    #[test]
    fn test_last_write_wins() {
        let index = NameIndex::from_pairs([("S1", id(1)), ("S1", id(5))], true);
        assert_eq!(index.resolve("S1"), Some(id(5)));
        assert_eq!(index.len(), 1);
    }
}
