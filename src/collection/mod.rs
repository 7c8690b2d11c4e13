//! Ordered key/value collections.
//!
//! This module provides [`Collection`], the structure every operation of the
//! iteration engine consumes and produces, and [`Key`], the integer-or-string
//! key used by dynamic values.
//!
//! # Invariants
//!
//! - Keys are unique within a collection.
//! - Iteration order equals insertion order.
//! - Re-inserting an existing key replaces its value in place; the entry
//!   keeps its original position.
//! - Removing a key keeps the relative order of the remaining entries.
//! - Equality is order-sensitive: two collections with the same entries in a
//!   different order are not equal.
//!
//! # Examples
//!
//! ```rust
//! use keylists::Collection;
//!
//! let mut collection: Collection<&str, i32> = [("b", 2), ("a", 1)].into();
//! collection.insert("c", 3);
//! collection.insert("b", 20);
//!
//! let keys: Vec<&&str> = collection.keys().collect();
//! assert_eq!(keys, vec![&"b", &"a", &"c"]);
//! assert_eq!(collection.get("b"), Some(&20));
//! ```

mod key;

pub use key::Key;

use indexmap::IndexMap;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// Hash builder used for collection indexes.
///
/// When the `fxhash` feature is enabled, this is `rustc_hash::FxBuildHasher`,
/// which is faster but not DoS-resistant.
///
/// When the `fxhash` feature is disabled (default), this is the standard
/// library's `RandomState`.
#[cfg(feature = "fxhash")]
pub(crate) type KeyHasher = rustc_hash::FxBuildHasher;

#[cfg(not(feature = "fxhash"))]
pub(crate) type KeyHasher = std::hash::RandomState;

/// Borrowing iterator over the entries of a [`Collection`].
pub type CollectionIterator<'a, K, V> = indexmap::map::Iter<'a, K, V>;

/// Borrowing iterator over the entries of a [`Collection`] with mutable values.
pub type CollectionIteratorMut<'a, K, V> = indexmap::map::IterMut<'a, K, V>;

/// Owning iterator over the entries of a [`Collection`].
pub type CollectionIntoIterator<K, V> = indexmap::map::IntoIter<K, V>;

/// An ordered key/value collection with unique keys.
///
/// # Type Parameters
///
/// * `K` - The key type. Lookups and insertion require `Hash + Eq`.
/// * `V` - The value type.
#[derive(Clone)]
pub struct Collection<K, V> {
    entries: IndexMap<K, V, KeyHasher>,
}

impl<K, V> Collection<K, V> {
    /// Creates a new empty collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::Collection;
    ///
    /// let collection: Collection<String, i32> = Collection::new();
    /// assert!(collection.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::with_hasher(KeyHasher::default()),
        }
    }

    /// Creates a new empty collection with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, KeyHasher::default()),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> CollectionIterator<'_, K, V> {
        self.entries.iter()
    }

    /// Returns an iterator over the entries in insertion order, with mutable
    /// access to the values.
    #[inline]
    pub fn iter_mut(&mut self) -> CollectionIteratorMut<'_, K, V> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.entries.keys()
    }

    /// Returns an iterator over the values in insertion order.
    #[inline]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.values()
    }

    /// Consumes the collection, returning its values in insertion order.
    #[inline]
    pub fn into_values(self) -> impl DoubleEndedIterator<Item = V> + ExactSizeIterator {
        self.entries.into_values()
    }

    /// Returns the first entry, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first()
    }
}

impl<K: Hash + Eq, V> Collection<K, V> {
    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::Collection;
    ///
    /// let collection: Collection<String, i32> = [("one".to_string(), 1)].into();
    /// assert_eq!(collection.get("one"), Some(&1));
    /// assert_eq!(collection.get("two"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Inserts `value` under `key`, returning the previous value.
    ///
    /// A new key is appended at the end; an existing key keeps its position.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Removes `key`, returning its value and keeping the order of the rest.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key)
    }

    /// Returns the value under `key`, inserting the result of `default`
    /// first when the key is absent.
    #[inline]
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.entries.entry(key).or_insert_with(default)
    }
}

impl<K: From<usize> + Hash + Eq, V> Collection<K, V> {
    /// Creates a collection keyed `0..n` from a sequence of values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::Collection;
    ///
    /// let collection: Collection<usize, char> = Collection::indexed(['a', 'b']);
    /// assert_eq!(collection.get(&1), Some(&'b'));
    /// ```
    pub fn indexed<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (K::from(index), value))
            .collect()
    }
}

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Collection<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Collection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Collection<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for Collection<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for Collection<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Collection<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for Collection<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for Collection<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> IntoIterator for Collection<K, V> {
    type Item = (K, V);
    type IntoIter = CollectionIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Collection<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = CollectionIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut Collection<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = CollectionIteratorMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

static_assertions::assert_impl_all!(Collection<String, i64>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for Collection<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct CollectionVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> CollectionVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for CollectionVisitor<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    type Value = Collection<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut collection = Collection::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            collection.insert(key, value);
        }
        Ok(collection)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for Collection<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(CollectionVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn letters() -> Collection<&'static str, i32> {
        [("a", 1), ("b", 2), ("c", 3)].into()
    }

    #[rstest]
    fn test_new_is_empty() {
        let collection: Collection<i32, i32> = Collection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert_eq!(collection.first(), None);
    }

    #[rstest]
    fn test_insertion_order_is_iteration_order() {
        let collection: Collection<&str, i32> = [("z", 1), ("a", 2), ("m", 3)].into();
        let keys: Vec<&str> = collection.keys().copied().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[rstest]
    fn test_reinsert_keeps_position_and_replaces_value() {
        let mut collection = letters();
        let previous = collection.insert("a", 10);

        assert_eq!(previous, Some(1));
        assert_eq!(collection.first(), Some((&"a", &10)));
        assert_eq!(collection.len(), 3);
    }

    #[rstest]
    fn test_remove_preserves_remaining_order() {
        let mut collection = letters();
        assert_eq!(collection.remove("b"), Some(2));
        assert_eq!(collection.remove("b"), None);

        let entries: Vec<(&str, i32)> = collection.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![("a", 1), ("c", 3)]);
    }

    #[rstest]
    fn test_equality_is_order_sensitive() {
        let forward: Collection<&str, i32> = [("a", 1), ("b", 2)].into();
        let backward: Collection<&str, i32> = [("b", 2), ("a", 1)].into();
        assert_ne!(forward, backward);
        assert_eq!(forward, forward.clone());
    }

    #[rstest]
    fn test_indexed_assigns_sequential_keys() {
        let collection: Collection<Key, &str> = Collection::indexed(["x", "y"]);
        assert_eq!(collection.get(&Key::Int(0)), Some(&"x"));
        assert_eq!(collection.get(&Key::Int(1)), Some(&"y"));
    }

    #[rstest]
    fn test_get_or_insert_with_inserts_once() {
        let mut collection: Collection<&str, Vec<i32>> = Collection::new();
        collection.get_or_insert_with("a", Vec::new).push(1);
        collection.get_or_insert_with("a", Vec::new).push(2);
        assert_eq!(collection.get("a"), Some(&vec![1, 2]));
    }

    #[rstest]
    fn test_ordering_is_lexicographic_over_entries() {
        let smaller: Collection<i32, i32> = [(0, 1)].into();
        let larger: Collection<i32, i32> = [(0, 2)].into();
        let longer: Collection<i32, i32> = [(0, 1), (1, 0)].into();
        assert!(smaller < larger);
        assert!(smaller < longer);
    }

    #[rstest]
    fn test_debug_renders_as_map() {
        let collection: Collection<&str, i32> = [("a", 1)].into();
        assert_eq!(format!("{collection:?}"), r#"{"a": 1}"#);
    }

    #[rstest]
    fn test_iter_mut_updates_values() {
        let mut collection = letters();
        for (_, value) in &mut collection {
            *value *= 10;
        }
        let values: Vec<i32> = collection.values().copied().collect();
        assert_eq!(values, vec![10, 20, 30]);
    }
}
