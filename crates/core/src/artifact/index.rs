//! Bidirectional identifier ↔ dense index mappings.
//!
//! Every artifact addresses its matrix rows by dense `u32` indices and keeps
//! an [`IdIndex`] to translate between external identifiers (product strings,
//! customer ids) and those indices. The reverse direction is allowed to be
//! partial: an index with no canonical identifier is a tolerated lookup miss,
//! never a fatal condition.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A pair of mappings: identifier → dense index and index → identifier.
///
/// Used with `String` product identifiers and `i64` customer identifiers.
/// Where both directions carry an entry they must agree exactly; the reverse
/// map may omit indices (see [`IdIndex::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdIndex<K: Eq + Hash> {
    id_to_index: HashMap<K, u32>,
    index_to_id: HashMap<u32, K>,
}

impl<K: Eq + Hash + Clone> IdIndex<K> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            id_to_index: HashMap::new(),
            index_to_id: HashMap::new(),
        }
    }

    /// Builds a mapping from `(identifier, index)` pairs, populating both
    /// directions. Later pairs overwrite earlier ones for the same key.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
    {
        let mut idx = Self::new();
        for (id, index) in pairs {
            idx.insert(id, index);
        }
        idx
    }

    /// Inserts an identifier ↔ index pair into both directions.
    pub fn insert(&mut self, id: K, index: u32) {
        self.id_to_index.insert(id.clone(), index);
        self.index_to_id.insert(index, id);
    }

    /// Removes the reverse (index → identifier) entry for `index`, leaving
    /// the forward entry in place. Used to model artifacts whose reverse map
    /// has gaps.
    pub fn forget_reverse(&mut self, index: u32) {
        self.index_to_id.remove(&index);
    }

    /// Number of identifiers in the forward mapping.
    pub fn len(&self) -> usize {
        self.id_to_index.len()
    }

    /// True if the mapping holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.id_to_index.is_empty()
    }

    /// Looks up the dense index for an identifier.
    pub fn index_of<Q>(&self, id: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.id_to_index.get(id).copied()
    }

    /// Looks up the canonical identifier for a dense index.
    ///
    /// `None` means the index has no canonical identifier; callers skip such
    /// indices rather than failing.
    pub fn id_of(&self, index: u32) -> Option<&K> {
        self.index_to_id.get(&index)
    }

    /// Checks that the two directions are exact inverses where both are
    /// populated.
    ///
    /// Rules: every reverse entry must round-trip through the forward map,
    /// no two identifiers may share an index, and the reverse map can never
    /// hold more entries than the forward map.
    pub fn validate(&self) -> Result<(), String>
    where
        K: Debug,
    {
        if self.index_to_id.len() > self.id_to_index.len() {
            return Err(format!(
                "reverse map has {} entries but forward map has {}",
                self.index_to_id.len(),
                self.id_to_index.len()
            ));
        }

        let mut seen = HashSet::with_capacity(self.id_to_index.len());
        for (id, &index) in &self.id_to_index {
            if !seen.insert(index) {
                return Err(format!("index {index} is mapped by more than one identifier"));
            }
            if let Some(back) = self.index_to_id.get(&index) {
                if back != id {
                    return Err(format!(
                        "index {index} maps back to {back:?}, expected {id:?}"
                    ));
                }
            }
        }

        for (&index, id) in &self.index_to_id {
            match self.id_to_index.get(id) {
                Some(&forward) if forward == index => {}
                Some(&forward) => {
                    return Err(format!(
                        "identifier {id:?} maps to {forward} but reverse entry says {index}"
                    ));
                }
                None => {
                    return Err(format!(
                        "reverse entry for index {index} has no forward counterpart"
                    ));
                }
            }
        }

        Ok(())
    }
}

impl<K: Eq + Hash + Clone> Default for IdIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, u32)> for IdIndex<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_index() -> IdIndex<String> {
        IdIndex::from_pairs([
            ("prod-a".to_string(), 0),
            ("prod-b".to_string(), 1),
            ("prod-c".to_string(), 2),
        ])
    }

    #[test]
    fn test_round_trip() {
        let idx = product_index();
        assert_eq!(idx.index_of("prod-b"), Some(1));
        assert_eq!(idx.id_of(1).map(String::as_str), Some("prod-b"));
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let idx = product_index();
        assert_eq!(idx.index_of("prod-z"), None);
        assert_eq!(idx.id_of(99), None);
    }

    #[test]
    fn test_reverse_gap_tolerated() {
        let mut idx = product_index();
        idx.forget_reverse(2);
        assert_eq!(idx.id_of(2), None);
        // Forward direction still works and validation accepts the gap.
        assert_eq!(idx.index_of("prod-c"), Some(2));
        assert!(idx.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_inverse_maps() {
        assert!(product_index().validate().is_ok());
        assert!(IdIndex::<i64>::new().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_disagreeing_reverse() {
        let mut idx = product_index();
        idx.index_to_id.insert(0, "prod-b".to_string());
        assert!(idx.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_index() {
        let mut idx = product_index();
        idx.id_to_index.insert("prod-d".to_string(), 1);
        assert!(idx.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_orphan_reverse_entry() {
        let mut idx = product_index();
        idx.index_to_id.insert(7, "ghost".to_string());
        assert!(idx.validate().is_err());
    }

    #[test]
    fn test_customer_keys() {
        let idx: IdIndex<i64> = IdIndex::from_pairs([(1001, 0), (1002, 1)]);
        assert_eq!(idx.index_of(&1002), Some(1));
        assert_eq!(idx.id_of(0), Some(&1001));
    }
}
