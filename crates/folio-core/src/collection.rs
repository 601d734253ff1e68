//! Ordered containers used throughout the descriptor graph.
//!
//! Two different roles are kept apart on purpose:
//!
//! - [`OwnedList`] holds values that belong to their container, such as the
//!   methods of a class or the classes of a file.
//! - [`Index`] is a keyed lookup table over shared handles, such as the
//!   global `classes` index or the children of a namespace. Looking up a
//!   missing key with [`Index::get_or_insert_with`] materialises a default.
//!
//! Both iterate in insertion order.

use std::{fmt, hash::Hash};

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::fqsen::Fqsen;

/// Raised when an [`Index`] entry is stored under an empty key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("The key of a collection must always be set")]
pub struct InvalidKeyError;

/// Keys accepted by an [`Index`].
pub trait IndexKey: Clone + Eq + Hash + fmt::Display {
    /// Returns `true` when the key carries no value.
    fn is_blank(&self) -> bool;
}

impl IndexKey for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl IndexKey for Fqsen {
    fn is_blank(&self) -> bool {
        false
    }
}

/// An ordered list of owned values.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedList<T> {
    items: Vec<T>,
}

impl<T> Default for OwnedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OwnedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value at the end of the list.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keeps only the values for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends every value of `other` after the values of `self`.
    pub fn merge(&mut self, other: OwnedList<T>) {
        self.items.extend(other.items);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> FromIterator<T> for OwnedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for OwnedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OwnedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An ordered lookup table.
///
/// # Examples
///
/// ```
/// use folio_core::collection::Index;
///
/// let mut index: Index<String, u32> = Index::new();
/// index.set("b".to_string(), 2).unwrap();
///
/// // A missing key is inserted with its default and kept.
/// assert_eq!(*index.get_or_insert_with("a".to_string(), || 1).unwrap(), 1);
/// assert_eq!(index.len(), 2);
///
/// assert!(index.set(String::new(), 3).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Index<K, T> {
    entries: IndexMap<K, T>,
}

impl<K, T> Default for Index<K, T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: IndexKey, T> Index<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Returns the entry for `key`, inserting `default()` first when absent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKeyError`] when `key` is blank.
    pub fn get_or_insert_with(
        &mut self,
        key: K,
        default: impl FnOnce() -> T,
    ) -> Result<&mut T, InvalidKeyError> {
        if key.is_blank() {
            debug!("Rejected lookup with a blank index key");
            return Err(InvalidKeyError);
        }
        Ok(self.entries.entry(key).or_insert_with(default))
    }

    /// Stores `value` under `key`, replacing an existing entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKeyError`] when `key` is blank.
    pub fn set(&mut self, key: K, value: T) -> Result<(), InvalidKeyError> {
        if key.is_blank() {
            debug!("Rejected entry with a blank index key");
            return Err(InvalidKeyError);
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entry for `key`, keeping the order of the others.
    pub fn remove(&mut self, key: &K) -> Option<T> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: IndexKey, T: Clone> Index<K, T> {
    /// Returns a new index holding the entries of both; entries of `other`
    /// win on conflicting keys.
    pub fn merge(&self, other: &Index<K, T>) -> Index<K, T> {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<'a, K, T> IntoIterator for &'a Index<K, T> {
    type Item = (&'a K, &'a T);
    type IntoIter = indexmap::map::Iter<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_owned_list_keeps_insertion_order() {
        let mut list = OwnedList::new();
        list.push("b");
        list.push("a");
        list.push("c");

        assert_eq!(list.as_slice(), &["b", "a", "c"]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1), Some(&"a"));
    }

    #[test]
    fn test_owned_list_merge_appends() {
        let mut first: OwnedList<i32> = [1, 2].into_iter().collect();
        first.merge([3].into_iter().collect());
        assert_eq!(first.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_get_or_insert_with_materialises_default() {
        let mut index: Index<String, Vec<u8>> = Index::new();
        index
            .get_or_insert_with("key".to_string(), Vec::new)
            .unwrap()
            .push(1);
        index
            .get_or_insert_with("key".to_string(), || vec![9])
            .unwrap()
            .push(2);

        assert_eq!(index.get(&"key".to_string()), Some(&vec![1, 2]));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let mut index: Index<String, u8> = Index::new();
        assert_eq!(index.set(String::new(), 1), Err(InvalidKeyError));
        assert!(index.get_or_insert_with(String::new(), || 1).is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut index: Index<String, u8> = Index::new();
        index.set("a".to_string(), 1).unwrap();
        index.set("b".to_string(), 2).unwrap();
        index.set("a".to_string(), 3).unwrap();

        let entries: Vec<_> = index.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut left: Index<String, u8> = Index::new();
        left.set("a".to_string(), 1).unwrap();
        left.set("b".to_string(), 2).unwrap();
        let mut right: Index<String, u8> = Index::new();
        right.set("b".to_string(), 20).unwrap();
        right.set("c".to_string(), 30).unwrap();

        let merged = left.merge(&right);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(&"b".to_string()), Some(&20));
        assert_eq!(left.get(&"b".to_string()), Some(&2));
    }

    proptest! {
        #[test]
        fn prop_index_iterates_in_first_insertion_order(keys in prop::collection::vec("[a-z]{1,4}", 0..20)) {
            let mut index: Index<String, usize> = Index::new();
            let mut expected: Vec<String> = Vec::new();
            for (position, key) in keys.iter().enumerate() {
                index.set(key.clone(), position).unwrap();
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
            }
            let actual: Vec<String> = index.keys().cloned().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
