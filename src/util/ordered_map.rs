//! Insertion-ordered string-keyed map
//!
//! Configuration trees and compose manifests both need to keep keys in the
//! order they were first written so that output is stable and reads the way
//! the input did. Backed by `IndexMap`, so lookups and inserts stay O(1)
//! however large the configuration file is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Inserts or replaces a value. A replaced key keeps its first position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Returns the value for `key`, inserting the result of `default` first if absent.
    pub fn entry_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        match self.entries.get_index_of(key) {
            Some(idx) => &mut self.entries[idx],
            None => self.entries.entry(key.to_string()).or_insert_with(default),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = OrderedMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        assert_eq!(map.insert("b", 3), Some(1));

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(&3));
    }

    #[test]
    fn test_entry_or_insert_with() {
        let mut map: OrderedMap<Vec<u8>> = OrderedMap::new();
        map.entry_or_insert_with("x", Vec::new).push(1);
        map.entry_or_insert_with("x", Vec::new).push(2);
        assert_eq!(map.get("x"), Some(&vec![1, 2]));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_large_map_keeps_order_and_lookups() {
        let map: OrderedMap<usize> = (0..50_000).map(|i| (format!("key{}", i), i)).collect();
        assert_eq!(map.len(), 50_000);
        assert_eq!(map.keys().next(), Some("key0"));
        assert_eq!(map.keys().last(), Some("key49999"));
        assert_eq!(map.get("key31337"), Some(&31337));
    }

    #[test]
    fn test_yaml_serialization_preserves_order() {
        let map: OrderedMap<u16> = vec![("zeta", 1), ("alpha", 2)].into_iter().collect();
        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.find("zeta").unwrap() < yaml.find("alpha").unwrap());

        let back: OrderedMap<u16> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, map);
    }
}
