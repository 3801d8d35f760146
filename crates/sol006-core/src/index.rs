//! Cross-reference lookup helpers
//!
//! Lookups are built per translation call and dropped with it. Lists keep
//! first-occurrence order so output never depends on hash iteration order.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Maps an id to the position of its entry in an output list
///
/// The first entry registered under an id wins; later duplicates are
/// ignored, matching a first-match linear scan.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    positions: HashMap<String, usize>,
}

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` at `position` unless it is already known
    pub fn insert(&mut self, id: &str, position: usize) {
        self.positions.entry(id.to_string()).or_insert(position);
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }
}

/// Keep the first occurrence of every key, preserving input order
pub fn dedup_ordered<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Group items by key; groups appear in order of their key's first occurrence
pub fn group_ordered<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();
    for item in items {
        let k = key(&item);
        match positions.get(&k) {
            Some(&position) => groups[position].1.push(item),
            None => {
                positions.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_index_first_wins() {
        let mut index = IdIndex::new();
        for (position, id) in ["a", "b", "a"].into_iter().enumerate() {
            index.insert(id, position);
        }
        assert_eq!(index.position("a"), Some(0));
        assert_eq!(index.position("b"), Some(1));
        assert_eq!(index.position("c"), None);
    }

    #[test]
    fn test_dedup_ordered_keeps_first() {
        let images = vec!["ubuntu", "cirros", "ubuntu", "alpine", "cirros"];
        assert_eq!(
            dedup_ordered(images, |s| s.to_string()),
            vec!["ubuntu", "cirros", "alpine"]
        );
    }

    #[test]
    fn test_group_ordered_preserves_first_occurrence() {
        let rows = vec![("2", "x"), ("1", "y"), ("2", "z")];
        let groups = group_ordered(rows, |(k, _)| k.to_string());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "2");
        assert_eq!(groups[0].1, vec![("2", "x"), ("2", "z")]);
        assert_eq!(groups[1].0, "1");
    }
}
