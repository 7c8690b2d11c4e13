use super::Container;
use crate::collection::Collection;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "value")]
use crate::collection::Key;
#[cfg(feature = "value")]
use crate::error::{Error, Result};
#[cfg(feature = "value")]
use crate::value::Value;

/// A dictionary-like container that keeps its keys through every operation.
///
/// # Examples
///
/// ```rust
/// use keylists::containers::{ArrayMap, Container};
///
/// let stock: ArrayMap<&str, u32> = [("apples", 3), ("pears", 0)].into();
/// let in_stock = stock.filter(|count, _| *count > 0);
/// assert_eq!(in_stock, [("apples", 3)].into());
///
/// let restocked = stock.merge(&[("pears", 8)].into());
/// assert_eq!(restocked.get(&"pears"), Some(&8));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ArrayMap<K, V> {
    items: Collection<K, V>,
}

impl<K, V> ArrayMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Collection::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Container for ArrayMap<K, V> {
    type Key = K;
    type Item = V;
    type Mapped<W: Clone> = ArrayMap<K, W>;

    fn items(&self) -> &Collection<K, V> {
        &self.items
    }

    fn into_items(self) -> Collection<K, V> {
        self.items
    }

    fn wrap(items: Collection<K, V>) -> Self {
        Self { items }
    }

    fn put(&mut self, key: K, value: V) -> &mut Self {
        self.items.insert(key, value);
        self
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.items.remove(key)
    }

    /// Entries of `other` overwrite equal keys in place; new keys append.
    fn merge(&self, other: &Self) -> Self {
        let mut items = self.items.clone();
        items.extend(other.items.iter().map(|(key, value)| (key.clone(), value.clone())));
        Self { items }
    }
}

impl<K, V> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ArrayMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.items.iter()).finish()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ArrayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for ArrayMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> From<Collection<K, V>> for ArrayMap<K, V> {
    fn from(items: Collection<K, V>) -> Self {
        Self { items }
    }
}

impl<'a, K, V> IntoIterator for &'a ArrayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = crate::collection::CollectionIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "value")]
impl From<ArrayMap<Key, Value>> for Value {
    fn from(map: ArrayMap<Key, Value>) -> Self {
        Self::Object(map.items)
    }
}

#[cfg(feature = "value")]
impl TryFrom<Value> for ArrayMap<Key, Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Array(items) | Value::Object(items) => Ok(Self { items }),
            scalar => Err(Error::type_mismatch("map", "array", scalar.type_name())),
        }
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for ArrayMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.items, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for ArrayMap<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Collection<K, V> as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}
