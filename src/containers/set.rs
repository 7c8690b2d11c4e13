use super::Container;
use crate::collection::Collection;
use std::fmt;

#[cfg(feature = "value")]
use crate::collection::Key;
#[cfg(feature = "value")]
use crate::value::Value;

/// A list-like container whose keys are always `0..n`.
///
/// Every rebuild renumbers: filtering `[a, b, c]` down to `a` and `c`
/// yields keys `0` and `1`.
///
/// # Examples
///
/// ```rust
/// use keylists::containers::{ArraySet, Container};
///
/// let mut set = ArraySet::new();
/// set.add("red");
/// set.add("green");
/// assert!(set.contains(&"green"));
/// assert_eq!(set.get(&1), Some(&"green"));
///
/// let merged = set.merge(&["blue"].into_iter().collect());
/// assert_eq!(merged.get(&2), Some(&"blue"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ArraySet<V> {
    items: Collection<usize, V>,
}

impl<V> ArraySet<V> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Collection::new(),
        }
    }

    /// Appends `value`, returning its key.
    pub fn add(&mut self, value: V) -> usize {
        let key = self.items.len();
        self.items.insert(key, value);
        key
    }

    /// Returns `true` if any element equals `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.items.values().any(|item| item == value)
    }
}

impl<V: Clone> Container for ArraySet<V> {
    type Key = usize;
    type Item = V;
    type Mapped<W: Clone> = ArraySet<W>;

    fn items(&self) -> &Collection<usize, V> {
        &self.items
    }

    fn into_items(self) -> Collection<usize, V> {
        self.items
    }

    fn wrap(items: Collection<usize, V>) -> Self {
        items.into_values().collect()
    }

    /// Replaces the element at `key`, or appends when `key` is past the end.
    fn put(&mut self, key: usize, value: V) -> &mut Self {
        match self.items.get_mut(&key) {
            Some(slot) => *slot = value,
            None => {
                self.add(value);
            }
        }
        self
    }

    /// Removes the element at `key`; later elements shift down by one.
    fn remove(&mut self, key: &usize) -> Option<V> {
        let removed = self.items.remove(key)?;
        self.items = Collection::indexed(std::mem::take(&mut self.items).into_values());
        Some(removed)
    }

    fn merge(&self, other: &Self) -> Self {
        self.items
            .values()
            .chain(other.items.values())
            .cloned()
            .collect()
    }
}

impl<V> Default for ArraySet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ArraySet<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.items.values()).finish()
    }
}

impl<V> FromIterator<V> for ArraySet<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: Collection::indexed(iter),
        }
    }
}

impl<V> From<Vec<V>> for ArraySet<V> {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, V> IntoIterator for &'a ArraySet<V> {
    type Item = (&'a usize, &'a V);
    type IntoIter = crate::collection::CollectionIterator<'a, usize, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "value")]
impl From<ArraySet<Value>> for Value {
    fn from(set: ArraySet<Value>) -> Self {
        Self::Array(Collection::indexed(set.items.into_values()))
    }
}

#[cfg(feature = "value")]
impl ArraySet<Value> {
    /// Collects the values of an array or object, dropping its keys.
    ///
    /// Scalars become a one-element set and `Null` an empty one.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::new(),
            Value::Array(items) | Value::Object(items) => items.values().cloned().collect(),
            scalar => std::iter::once(scalar.clone()).collect(),
        }
    }

    /// Looks up a dynamic key, which must be a non-negative integer.
    #[must_use]
    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        key.as_int()
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.items.get(&index))
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for ArraySet<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.items.values())
    }
}

#[cfg(feature = "serde")]
impl<'de, V: serde::Deserialize<'de>> serde::Deserialize<'de> for ArraySet<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<V> as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}
