//! Object-style façades over the iteration engine.
//!
//! [`ArraySet`] and [`ArrayMap`] both own a [`Collection`] and share one
//! engine through the [`Container`] trait. They differ in a single policy,
//! [`Container::wrap`]: a set renumbers its keys `0..n` whenever it is
//! rebuilt, a map keeps them.
//!
//! Operations that change the key type, [`Container::rename`] and
//! [`Container::group`], always produce an [`ArrayMap`].
//!
//! # Examples
//!
//! ```rust
//! use keylists::containers::{ArrayMap, ArraySet, Container};
//!
//! let set: ArraySet<i32> = [3, 1, 4, 1, 5].into_iter().collect();
//! let odd = set.filter(|number, _| number % 2 == 1);
//! assert_eq!(odd.keys().into_items().into_values().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
//!
//! let map: ArrayMap<&str, i32> = [("a", 3), ("b", 4)].into();
//! let even = map.filter(|number, _| number % 2 == 0);
//! assert!(even.has(&"b"));
//! assert!(!even.has(&"a"));
//! ```

mod map;
mod set;

pub use map::ArrayMap;
pub use set::ArraySet;

use crate::collection::{Collection, CollectionIterator};
use crate::iteration::{self, Limit, Step};
use std::cmp::Ordering;
use std::hash::Hash;

/// The shared interface of [`ArraySet`] and [`ArrayMap`].
///
/// Implementors provide storage access and a [`wrap`](Self::wrap) policy;
/// every other operation is provided on top of the iteration engine and never
/// modifies `self`.
pub trait Container: Sized {
    /// The key type.
    type Key: Hash + Eq + Clone;
    /// The element type.
    type Item: Clone;
    /// The same container kind holding `W` elements.
    type Mapped<W: Clone>: Container<Key = Self::Key, Item = W>;

    /// Borrows the underlying entries.
    fn items(&self) -> &Collection<Self::Key, Self::Item>;

    /// Consumes the container, returning its entries.
    fn into_items(self) -> Collection<Self::Key, Self::Item>;

    /// Builds a container of this kind from engine output.
    fn wrap(items: Collection<Self::Key, Self::Item>) -> Self;

    /// Stores `value` under `key`.
    fn put(&mut self, key: Self::Key, value: Self::Item) -> &mut Self;

    /// Removes the entry for `key`, returning its value.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Item>;

    /// Combines two containers of the same kind.
    fn merge(&self, other: &Self) -> Self;

    /// Returns `true` if `key` is present.
    fn has(&self, key: &Self::Key) -> bool {
        self.items().contains_key(key)
    }

    /// Returns the value stored under `key`.
    fn get(&self, key: &Self::Key) -> Option<&Self::Item> {
        self.items().get(key)
    }

    /// The keys, in order, as a set.
    fn keys(&self) -> ArraySet<Self::Key> {
        self.items().keys().cloned().collect()
    }

    /// The values, in order, as a set.
    fn values(&self) -> ArraySet<Self::Item> {
        self.items().values().cloned().collect()
    }

    /// Number of entries.
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Returns `true` when there are no entries.
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Iterates over `(key, value)` pairs in order.
    fn iter(&self) -> CollectionIterator<'_, Self::Key, Self::Item> {
        self.items().iter()
    }

    /// See [`iteration::each`]. Returns `self` for chaining.
    fn each<S, F>(&self, callback: F) -> &Self
    where
        S: Step,
        F: FnMut(&Self::Item, &Self::Key) -> S,
    {
        iteration::each(self.items(), callback);
        self
    }

    /// See [`iteration::map`].
    fn map<W, F>(&self, callback: F) -> Self::Mapped<W>
    where
        W: Clone,
        F: FnMut(&Self::Item, &Self::Key) -> W,
    {
        self.map_limit(callback, Limit::Unbounded)
    }

    /// [`map`](Self::map) with a result size limit.
    fn map_limit<W, F>(&self, callback: F, limit: Limit) -> Self::Mapped<W>
    where
        W: Clone,
        F: FnMut(&Self::Item, &Self::Key) -> W,
    {
        <Self::Mapped<W> as Container>::wrap(iteration::map(self.items(), callback, limit))
    }

    /// See [`iteration::filter`].
    fn filter<F>(&self, callback: F) -> Self
    where
        F: FnMut(&Self::Item, &Self::Key) -> bool,
    {
        self.filter_limit(callback, Limit::Unbounded)
    }

    /// [`filter`](Self::filter) with a result size limit.
    fn filter_limit<F>(&self, callback: F, limit: Limit) -> Self
    where
        F: FnMut(&Self::Item, &Self::Key) -> bool,
    {
        Self::wrap(iteration::filter(self.items(), callback, limit))
    }

    /// See [`iteration::map_filter`].
    fn map_filter<M, F, P>(&self, map: F, filter: P) -> Self
    where
        F: FnMut(&Self::Item, &Self::Key) -> M,
        P: FnMut(&M, &Self::Key) -> bool,
    {
        self.map_filter_limit(map, filter, Limit::Unbounded)
    }

    /// [`map_filter`](Self::map_filter) with a result size limit.
    fn map_filter_limit<M, F, P>(&self, map: F, filter: P, limit: Limit) -> Self
    where
        F: FnMut(&Self::Item, &Self::Key) -> M,
        P: FnMut(&M, &Self::Key) -> bool,
    {
        Self::wrap(iteration::map_filter(self.items(), map, filter, limit))
    }

    /// See [`iteration::reduce`].
    fn reduce<A, F>(&self, initial: A, callback: F) -> A
    where
        F: FnMut(A, &Self::Item, &Self::Key) -> A,
    {
        iteration::reduce(self.items(), initial, callback)
    }

    /// See [`iteration::rename`].
    fn rename<N, F>(&self, callback: F) -> ArrayMap<N, Self::Item>
    where
        N: Hash + Eq + Clone,
        F: FnMut(&Self::Item, &Self::Key) -> N,
    {
        ArrayMap::wrap(iteration::rename(self.items(), callback))
    }

    /// See [`iteration::group`].
    fn group<G, F>(&self, callback: F) -> ArrayMap<G, Collection<Self::Key, Self::Item>>
    where
        G: Hash + Eq + Clone,
        F: FnMut(&Self::Item, &Self::Key) -> G,
    {
        ArrayMap::wrap(iteration::group(self.items(), callback))
    }

    /// See [`iteration::sort`].
    fn sort(&self) -> Self
    where
        Self::Item: Ord,
    {
        Self::wrap(iteration::sort(self.items()))
    }

    /// See [`iteration::sort_by`].
    fn sort_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        Self::wrap(iteration::sort_by(self.items(), compare))
    }

    /// See [`iteration::sort_by_key`].
    fn sort_by_key<T, F>(&self, extract: F) -> Self
    where
        T: Ord,
        F: FnMut(&Self::Item, &Self::Key) -> T,
    {
        Self::wrap(iteration::sort_by_key(self.items(), extract))
    }

    /// See [`iteration::first`].
    fn first(&self) -> Option<&Self::Item> {
        iteration::first(self.items())
    }

    /// See [`iteration::first_by`].
    fn first_by<F>(&self, filter: F) -> Option<&Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Key) -> bool,
    {
        iteration::first_by(self.items(), filter)
    }
}

static_assertions::assert_impl_all!(ArraySet<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(ArrayMap<String, i64>: Send, Sync, Clone);
