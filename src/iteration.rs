//! The iteration engine: traversal, mapping, filtering, grouping, folding and
//! sorting over ordered key/value collections.
//!
//! Every operation takes the source [`Collection`] by reference and returns a
//! new collection; the source is never modified. The one exception is
//! [`each_mut`], which hands out mutable slots so the callback can replace
//! values in place (the key set never changes).
//!
//! # Callbacks
//!
//! Callbacks receive `(value, key)`. Wrap a callback that only needs the
//! value with [`keyless`].
//!
//! Every callback-taking operation has a `try_` twin whose callback returns a
//! `Result`. The first error stops the traversal and is returned unchanged;
//! this is how the fallible builders of [`maps`](crate::maps) plug in.
//!
//! # Limits
//!
//! [`map`], [`filter`] and [`map_filter`] take a [`Limit`] on the size of the
//! RESULT, not on the number of entries scanned: traversal stops as soon as
//! the result holds that many entries.
//!
//! # Examples
//!
//! ```rust
//! use keylists::Collection;
//! use keylists::iteration::{self, Limit};
//!
//! let scores: Collection<&str, i32> = [("ann", 7), ("bob", 3), ("cy", 9)].into();
//!
//! let high = iteration::filter(&scores, |score, _| *score > 5, Limit::Unbounded);
//! assert_eq!(high, [("ann", 7), ("cy", 9)].into());
//!
//! let doubled = iteration::map(&scores, |score, _| score * 2, Limit::AtMost(1));
//! assert_eq!(doubled, [("ann", 14)].into());
//!
//! let total = iteration::reduce(&scores, 0, |sum, score, _| sum + score);
//! assert_eq!(total, 19);
//! ```

use crate::collection::Collection;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::hash::Hash;
use std::ops::ControlFlow;

#[cfg(feature = "value")]
use crate::collection::Key;
#[cfg(feature = "value")]
use crate::error::Result;
#[cfg(feature = "value")]
use crate::maps::Mapper;
#[cfg(feature = "value")]
use crate::value::Value;

/// A bound on the size of an operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    /// No bound.
    #[default]
    Unbounded,
    /// Stop once the result holds this many entries.
    AtMost(usize),
}

impl Limit {
    #[inline]
    const fn is_reached(self, length: usize) -> bool {
        match self {
            Self::Unbounded => false,
            Self::AtMost(limit) => length >= limit,
        }
    }

    #[inline]
    fn capacity_for(self, length: usize) -> usize {
        match self {
            Self::Unbounded => length,
            Self::AtMost(limit) => limit.min(length),
        }
    }
}

impl From<usize> for Limit {
    fn from(limit: usize) -> Self {
        Self::AtMost(limit)
    }
}

/// Converts a callback result into a continue/stop signal for [`each`].
///
/// Only a boolean `false` (or an explicit [`ControlFlow::Break`]) stops the
/// traversal. Everything else, including other falsy values, continues.
pub trait Step {
    /// Returns the control flow this result asks for.
    fn into_control_flow(self) -> ControlFlow<()>;
}

impl Step for () {
    #[inline]
    fn into_control_flow(self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl Step for bool {
    #[inline]
    fn into_control_flow(self) -> ControlFlow<()> {
        if self {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }
}

impl Step for ControlFlow<()> {
    #[inline]
    fn into_control_flow(self) -> ControlFlow<()> {
        self
    }
}

#[cfg(feature = "value")]
impl Step for Value {
    #[inline]
    fn into_control_flow(self) -> ControlFlow<()> {
        if matches!(self, Self::Bool(false)) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[inline]
fn unwrap_infallible<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Adapts a value-only callback to the `(value, key)` shape.
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration::{self, keyless, Limit};
///
/// let words: Collection<usize, String> = Collection::indexed(["a".to_string()]);
/// let upper = iteration::map(&words, keyless(|word: &String| word.to_uppercase()), Limit::Unbounded);
/// assert_eq!(upper.get(&0).map(String::as_str), Some("A"));
/// ```
pub fn keyless<V, K, R, F>(mut callback: F) -> impl FnMut(&V, &K) -> R
where
    V: ?Sized,
    K: ?Sized,
    F: FnMut(&V) -> R,
{
    move |value, _| callback(value)
}

// =============================================================================
// each
// =============================================================================

/// Calls `callback(value, key)` for every entry in order.
///
/// Traversal halts, without visiting further entries, when the callback
/// returns `false` (see [`Step`]).
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration;
///
/// let numbers: Collection<usize, i32> = Collection::indexed([1, 2, 3, 4]);
/// let mut seen = Vec::new();
/// iteration::each(&numbers, |number, _| {
///     seen.push(*number);
///     *number < 2
/// });
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub fn each<K, V, S, F>(collection: &Collection<K, V>, mut callback: F)
where
    S: Step,
    F: FnMut(&V, &K) -> S,
{
    unwrap_infallible(try_each(collection, |value, key| {
        Ok::<_, Infallible>(callback(value, key))
    }));
}

/// Fallible [`each`]: the first error stops the traversal and is returned.
///
/// # Errors
///
/// Returns the first error produced by `callback`.
pub fn try_each<K, V, S, E, F>(collection: &Collection<K, V>, mut callback: F) -> std::result::Result<(), E>
where
    S: Step,
    F: FnMut(&V, &K) -> std::result::Result<S, E>,
{
    for (position, (key, value)) in collection.iter().enumerate() {
        if callback(value, key)?.into_control_flow().is_break() {
            tracing::trace!(position, "each: halted by callback");
            break;
        }
    }
    Ok(())
}

/// Like [`each`], but the callback receives a mutable slot and may replace
/// the value in place. The key set is never changed.
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration;
///
/// let mut words: Collection<usize, String> = Collection::indexed(["a".to_string(), "b".to_string()]);
/// iteration::each_mut(&mut words, |word, _| *word = word.to_uppercase());
/// assert_eq!(words, Collection::indexed(["A".to_string(), "B".to_string()]));
/// ```
pub fn each_mut<K, V, S, F>(collection: &mut Collection<K, V>, mut callback: F)
where
    S: Step,
    F: FnMut(&mut V, &K) -> S,
{
    for (position, (key, value)) in collection.iter_mut().enumerate() {
        if callback(value, key).into_control_flow().is_break() {
            tracing::trace!(position, "each_mut: halted by callback");
            break;
        }
    }
}

// =============================================================================
// map / filter / map_filter
// =============================================================================

/// Returns a collection with the same keys whose values are
/// `callback(value, key)`, bounded by `limit`.
pub fn map<K, V, W, F>(collection: &Collection<K, V>, mut callback: F, limit: Limit) -> Collection<K, W>
where
    K: Hash + Eq + Clone,
    F: FnMut(&V, &K) -> W,
{
    unwrap_infallible(try_map(
        collection,
        |value, key| Ok::<_, Infallible>(callback(value, key)),
        limit,
    ))
}

/// Fallible [`map`].
///
/// # Errors
///
/// Returns the first error produced by `callback`.
pub fn try_map<K, V, W, E, F>(
    collection: &Collection<K, V>,
    mut callback: F,
    limit: Limit,
) -> std::result::Result<Collection<K, W>, E>
where
    K: Hash + Eq + Clone,
    F: FnMut(&V, &K) -> std::result::Result<W, E>,
{
    let mut result = Collection::with_capacity(limit.capacity_for(collection.len()));
    if limit.is_reached(0) {
        return Ok(result);
    }
    try_each(collection, |value, key| {
        result.insert(key.clone(), callback(value, key)?);
        let reached = limit.is_reached(result.len());
        if reached {
            tracing::trace!(?limit, "map: limit reached");
        }
        Ok(!reached)
    })?;
    Ok(result)
}

/// Returns the entries for which `callback(value, key)` is `true`, keys
/// unchanged, bounded by `limit`.
pub fn filter<K, V, F>(collection: &Collection<K, V>, mut callback: F, limit: Limit) -> Collection<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&V, &K) -> bool,
{
    unwrap_infallible(try_filter(
        collection,
        |value, key| Ok::<_, Infallible>(callback(value, key)),
        limit,
    ))
}

/// Fallible [`filter`].
///
/// # Errors
///
/// Returns the first error produced by `callback`.
pub fn try_filter<K, V, E, F>(
    collection: &Collection<K, V>,
    mut callback: F,
    limit: Limit,
) -> std::result::Result<Collection<K, V>, E>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&V, &K) -> std::result::Result<bool, E>,
{
    let mut result = Collection::with_capacity(limit.capacity_for(collection.len()));
    if limit.is_reached(0) {
        return Ok(result);
    }
    try_each(collection, |value, key| {
        if callback(value, key)? {
            result.insert(key.clone(), value.clone());
        }
        let reached = limit.is_reached(result.len());
        if reached {
            tracing::trace!(?limit, "filter: limit reached");
        }
        Ok(!reached)
    })?;
    Ok(result)
}

/// Keeps the ORIGINAL entries whose mapped value passes `filter`.
///
/// `map` only decides inclusion; the stored values are never transformed.
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration::{self, Limit};
///
/// let letters: Collection<usize, &str> = Collection::indexed(["a", "b", "c"]);
/// let found = iteration::map_filter(
///     &letters,
///     |letter, _| letter.to_uppercase(),
///     |upper, _| upper == "B",
///     Limit::Unbounded,
/// );
/// assert_eq!(found, [(1, "b")].into());
/// ```
pub fn map_filter<K, V, M, F, P>(
    collection: &Collection<K, V>,
    mut map: F,
    mut filter: P,
    limit: Limit,
) -> Collection<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&V, &K) -> M,
    P: FnMut(&M, &K) -> bool,
{
    unwrap_infallible(try_map_filter(
        collection,
        |value, key| Ok::<_, Infallible>(map(value, key)),
        |mapped, key| Ok(filter(mapped, key)),
        limit,
    ))
}

/// Fallible [`map_filter`].
///
/// # Errors
///
/// Returns the first error produced by `map` or `filter`.
pub fn try_map_filter<K, V, M, E, F, P>(
    collection: &Collection<K, V>,
    mut map: F,
    mut filter: P,
    limit: Limit,
) -> std::result::Result<Collection<K, V>, E>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&V, &K) -> std::result::Result<M, E>,
    P: FnMut(&M, &K) -> std::result::Result<bool, E>,
{
    try_filter(
        collection,
        |value, key| {
            let mapped = map(value, key)?;
            filter(&mapped, key)
        },
        limit,
    )
}

// =============================================================================
// rename / group
// =============================================================================

/// Re-keys every value with `callback(value, key)`.
///
/// When two entries map to the same key, the later value overwrites the
/// earlier one, which keeps its position.
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration;
///
/// let colors: Collection<usize, (&str, i32)> = Collection::indexed([("red", 3), ("green", 2)]);
/// let by_name = iteration::rename(&colors, |color, _| color.0);
/// assert_eq!(by_name, [("red", ("red", 3)), ("green", ("green", 2))].into());
/// ```
pub fn rename<K, V, N, F>(collection: &Collection<K, V>, mut callback: F) -> Collection<N, V>
where
    N: Hash + Eq,
    V: Clone,
    F: FnMut(&V, &K) -> N,
{
    unwrap_infallible(try_rename(collection, |value, key| {
        Ok::<_, Infallible>(callback(value, key))
    }))
}

/// Fallible [`rename`].
///
/// # Errors
///
/// Returns the first error produced by `callback`.
pub fn try_rename<K, V, N, E, F>(
    collection: &Collection<K, V>,
    mut callback: F,
) -> std::result::Result<Collection<N, V>, E>
where
    N: Hash + Eq,
    V: Clone,
    F: FnMut(&V, &K) -> std::result::Result<N, E>,
{
    let mut result = Collection::with_capacity(collection.len());
    try_each(collection, |value, key| {
        let renamed = callback(value, key)?;
        if result.insert(renamed, value.clone()).is_some() {
            tracing::trace!("rename: key collision, earlier value dropped");
        }
        Ok(())
    })?;
    Ok(result)
}

/// Buckets entries by `callback(value, key)`, keeping each entry's original
/// key. Buckets appear in order of first appearance.
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration;
///
/// let numbers: Collection<usize, i32> = Collection::indexed([1, 2, 3, 4]);
/// let parity = iteration::group(&numbers, |number, _| number % 2 == 0);
/// assert_eq!(parity.get(&false), Some(&[(0, 1), (2, 3)].into()));
/// assert_eq!(parity.get(&true), Some(&[(1, 2), (3, 4)].into()));
/// ```
pub fn group<K, V, G, F>(collection: &Collection<K, V>, mut callback: F) -> Collection<G, Collection<K, V>>
where
    K: Hash + Eq + Clone,
    V: Clone,
    G: Hash + Eq,
    F: FnMut(&V, &K) -> G,
{
    unwrap_infallible(try_group(collection, |value, key| {
        Ok::<_, Infallible>(callback(value, key))
    }))
}

/// Fallible [`group`].
///
/// # Errors
///
/// Returns the first error produced by `callback`.
pub fn try_group<K, V, G, E, F>(
    collection: &Collection<K, V>,
    mut callback: F,
) -> std::result::Result<Collection<G, Collection<K, V>>, E>
where
    K: Hash + Eq + Clone,
    V: Clone,
    G: Hash + Eq,
    F: FnMut(&V, &K) -> std::result::Result<G, E>,
{
    let mut result: Collection<G, Collection<K, V>> = Collection::new();
    try_each(collection, |value, key| {
        let group = callback(value, key)?;
        let buckets = result.len();
        result
            .get_or_insert_with(group, Collection::new)
            .insert(key.clone(), value.clone());
        if result.len() > buckets {
            tracing::trace!(buckets = result.len(), "group: opened bucket");
        }
        Ok(())
    })?;
    Ok(result)
}

/// Groups dynamic values level by level: the first mapper groups the input,
/// each bucket is grouped again by the next mapper, and so on.
///
/// With no mappers the input is returned unchanged. Buckets are
/// [`Value::Array`]s keyed by the mapped group names, and the leaves keep the
/// original keys.
///
/// # Errors
///
/// Returns the first error produced by a mapper, including a group name that
/// cannot be used as a key.
///
/// # Examples
///
/// ```rust
/// use keylists::{Collection, Key, Value};
/// use keylists::{iteration, maps};
///
/// let shirts: Collection<Key, Value> = Collection::indexed([
///     Value::list(["red", "medium"]),
///     Value::list(["blue", "large"]),
///     Value::list(["red", "large"]),
/// ]);
/// let nested = iteration::groups(&shirts, &[maps::get([0]), maps::get([1])]).unwrap();
/// let red = nested.get(&Key::from("red")).unwrap();
/// assert!(red.get(&Key::from("medium")).is_some());
/// assert!(red.get(&Key::from("large")).is_some());
/// ```
#[cfg(feature = "value")]
pub fn groups(collection: &Collection<Key, Value>, mappers: &[Mapper]) -> Result<Collection<Key, Value>> {
    let Some((mapper, rest)) = mappers.split_first() else {
        return Ok(collection.clone());
    };
    try_group(collection, |value, key| mapper.call_key(value, key))?
        .into_iter()
        .map(|(group, bucket)| Ok((group, Value::Array(groups(&bucket, rest)?))))
        .collect()
}

// =============================================================================
// reduce
// =============================================================================

/// Left fold: `accumulator = callback(accumulator, value, key)` for every
/// entry. Returns `initial` unchanged when the collection is empty.
pub fn reduce<K, V, A, F>(collection: &Collection<K, V>, initial: A, mut callback: F) -> A
where
    F: FnMut(A, &V, &K) -> A,
{
    collection
        .iter()
        .fold(initial, |accumulator, (key, value)| callback(accumulator, value, key))
}

/// Fallible [`reduce`].
///
/// # Errors
///
/// Returns the first error produced by `callback`.
pub fn try_reduce<K, V, A, E, F>(
    collection: &Collection<K, V>,
    initial: A,
    mut callback: F,
) -> std::result::Result<A, E>
where
    F: FnMut(A, &V, &K) -> std::result::Result<A, E>,
{
    collection
        .iter()
        .try_fold(initial, |accumulator, (key, value)| callback(accumulator, value, key))
}

// =============================================================================
// sort
// =============================================================================

/// Stable sort by the values' natural ordering. Keys travel with their values.
///
/// For [`Value`](crate::value::Value) the natural ordering is the strict one:
/// strings compare as text, so `"10"` sorts before `"9"`. For numeric string
/// ordering, pass [`sort_by`] a comparator built on
/// [`Value::loose_cmp`](crate::value::Value::loose_cmp).
pub fn sort<K, V>(collection: &Collection<K, V>) -> Collection<K, V>
where
    K: Hash + Eq + Clone,
    V: Ord + Clone,
{
    sort_by(collection, Ord::cmp)
}

/// Stable sort with a comparator. Ties keep their input order.
pub fn sort_by<K, V, F>(collection: &Collection<K, V>, mut compare: F) -> Collection<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: FnMut(&V, &V) -> Ordering,
{
    let mut entries: Vec<(&K, &V)> = collection.iter().collect();
    entries.sort_by(|(_, left), (_, right)| compare(left, right));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Stable sort by a key extracted from each `(value, key)`, ascending.
///
/// # Examples
///
/// ```rust
/// use keylists::Collection;
/// use keylists::iteration;
///
/// let zeros: Collection<&str, i32> = [("b", 0), ("c", 0), ("a", 0)].into();
/// let sorted = iteration::sort_by_key(&zeros, |_, key| *key);
/// assert_eq!(sorted, [("a", 0), ("b", 0), ("c", 0)].into());
/// ```
pub fn sort_by_key<K, V, T, F>(collection: &Collection<K, V>, mut extract: F) -> Collection<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
    T: Ord,
    F: FnMut(&V, &K) -> T,
{
    unwrap_infallible(try_sort_by_key(collection, |value, key| {
        Ok::<_, Infallible>(extract(value, key))
    }))
}

/// Fallible [`sort_by_key`]. Every key is extracted once, before sorting.
///
/// # Errors
///
/// Returns the first error produced by `extract`.
pub fn try_sort_by_key<K, V, T, E, F>(
    collection: &Collection<K, V>,
    mut extract: F,
) -> std::result::Result<Collection<K, V>, E>
where
    K: Hash + Eq + Clone,
    V: Clone,
    T: Ord,
    F: FnMut(&V, &K) -> std::result::Result<T, E>,
{
    let mut entries = collection
        .iter()
        .map(|(key, value)| Ok((extract(value, key)?, key, value)))
        .collect::<std::result::Result<Vec<_>, E>>()?;
    entries.sort_by(|(left, _, _), (right, _, _)| left.cmp(right));
    Ok(entries
        .into_iter()
        .map(|(_, key, value)| (key.clone(), value.clone()))
        .collect())
}

// =============================================================================
// first
// =============================================================================

/// Returns the first value, or `None` for an empty collection.
#[inline]
pub fn first<K, V>(collection: &Collection<K, V>) -> Option<&V> {
    collection.first().map(|(_, value)| value)
}

/// Returns the first value passing `filter`, or `None` when no entry does.
pub fn first_by<K, V, F>(collection: &Collection<K, V>, mut filter: F) -> Option<&V>
where
    F: FnMut(&V, &K) -> bool,
{
    unwrap_infallible(try_first_by(collection, |value, key| {
        Ok::<_, Infallible>(filter(value, key))
    }))
}

/// Fallible [`first_by`].
///
/// # Errors
///
/// Returns the first error produced by `filter`.
pub fn try_first_by<K, V, E, F>(
    collection: &Collection<K, V>,
    mut filter: F,
) -> std::result::Result<Option<&V>, E>
where
    F: FnMut(&V, &K) -> std::result::Result<bool, E>,
{
    for (key, value) in collection {
        if filter(value, key)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers() -> Collection<usize, i32> {
        Collection::indexed([1, 2, 3, 4, 5])
    }

    #[rstest]
    fn test_each_only_stops_on_false() {
        let mut visited = 0;
        each(&numbers(), |_, _| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(visited, 5);

        let mut visited = 0;
        each(&numbers(), |number, _| {
            visited += 1;
            *number != 3
        });
        assert_eq!(visited, 3);
    }

    #[rstest]
    fn test_try_each_propagates_first_error() {
        let mut visited = Vec::new();
        let result = try_each(&numbers(), |number, _| {
            visited.push(*number);
            if *number == 2 { Err("two") } else { Ok(()) }
        });
        assert_eq!(result, Err("two"));
        assert_eq!(visited, vec![1, 2]);
    }

    #[rstest]
    #[case(Limit::Unbounded, 5)]
    #[case(Limit::AtMost(2), 2)]
    #[case(Limit::AtMost(0), 0)]
    #[case(Limit::AtMost(10), 5)]
    fn test_map_limit_bounds_result(#[case] limit: Limit, #[case] expected: usize) {
        assert_eq!(map(&numbers(), |number, _| number * 2, limit).len(), expected);
    }

    #[rstest]
    fn test_filter_limit_counts_results_not_scanned_entries() {
        let mut scanned = 0;
        let evens = filter(
            &numbers(),
            |number, _| {
                scanned += 1;
                number % 2 == 0
            },
            Limit::AtMost(1),
        );
        assert_eq!(evens, [(1, 2)].into());
        assert_eq!(scanned, 2);
    }

    #[rstest]
    fn test_map_stops_calling_back_once_limit_reached() {
        let mut calls = 0;
        let _ = map(
            &numbers(),
            |number, _| {
                calls += 1;
                *number
            },
            Limit::AtMost(3),
        );
        assert_eq!(calls, 3);
    }

    #[rstest]
    fn test_try_map_error_aborts() {
        let result = try_map(
            &numbers(),
            |number, _| if *number > 2 { Err(*number) } else { Ok(*number) },
            Limit::Unbounded,
        );
        assert_eq!(result, Err(3));
    }

    #[rstest]
    fn test_rename_collision_keeps_later_value_at_first_position() {
        let renamed = rename(&numbers(), |number, _| number % 2);
        assert_eq!(renamed, [(1, 5), (0, 4)].into());
    }

    #[rstest]
    fn test_rename_empty_collection() {
        let empty: Collection<usize, i32> = Collection::new();
        assert!(rename(&empty, |number, _| *number).is_empty());
    }

    #[rstest]
    fn test_reduce_returns_initial_for_empty() {
        let empty: Collection<usize, i32> = Collection::new();
        assert_eq!(reduce(&empty, 42, |sum, number, _| sum + number), 42);
    }

    #[rstest]
    fn test_sort_is_stable() {
        let pairs: Collection<usize, (i32, char)> =
            Collection::indexed([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        let sorted = sort_by_key(&pairs, |pair, _| pair.0);
        let order: Vec<char> = sorted.values().map(|pair| pair.1).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
        let keys: Vec<usize> = sorted.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 0, 2]);
    }

    #[rstest]
    fn test_sort_by_descending() {
        let sorted = sort_by(&numbers(), |left, right| right.cmp(left));
        let values: Vec<i32> = sorted.values().copied().collect();
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }

    #[rstest]
    fn test_first_and_first_by() {
        assert_eq!(first(&numbers()), Some(&1));
        assert_eq!(first_by(&numbers(), |number, _| *number > 3), Some(&4));
        assert_eq!(first_by(&numbers(), |number, _| *number > 9), None);

        let empty: Collection<usize, i32> = Collection::new();
        assert_eq!(first(&empty), None);
    }

    #[rstest]
    fn test_each_mut_replaces_values_until_stopped() {
        let mut collection = numbers();
        each_mut(&mut collection, |number, _| {
            *number *= 10;
            *number < 30
        });
        let values: Vec<i32> = collection.values().copied().collect();
        assert_eq!(values, vec![10, 20, 30, 4, 5]);
    }

    #[rstest]
    fn test_keyless_ignores_key() {
        let doubled = map(&numbers(), keyless(|number: &i32| number * 2), Limit::Unbounded);
        assert_eq!(doubled.get(&4), Some(&10));
    }
}
