//! Builders for reusable predicates and transforms over dynamic values.
//!
//! Every factory returns a [`Mapper`]: a cheap-to-clone callable of shape
//! `(value, key) -> Result<Value>`. Mappers plug into the `try_` operations of
//! [`iteration`](crate::iteration) directly, or into the closures of the
//! infallible ones through [`Mapper::call`] and [`Mapper::test`].
//!
//! Predicates return [`Value::Bool`]; transforms return the transformed
//! value. Mappers compose: [`not`], [`ands`] and [`ors`] take other mappers,
//! and [`size_of`] pre-maps before counting.
//!
//! # Examples
//!
//! ```rust
//! use keylists::{Collection, Key, Value};
//! use keylists::iteration::{self, Limit};
//! use keylists::maps;
//!
//! let people: Collection<Key, Value> = Collection::indexed([
//!     Value::object([("name", Value::from("ann")), ("age", Value::from(31))]),
//!     Value::object([("name", Value::from("bob")), ("age", Value::from(17))]),
//! ]);
//!
//! let adult = maps::ands([maps::has(["age"]), maps::get(["age"]).then(maps::at_least(18))]);
//! let adults = iteration::try_filter(&people, |value, key| adult.test(value, key), Limit::Unbounded)?;
//! assert_eq!(adults.len(), 1);
//!
//! let names = iteration::try_map(&people, |value, key| maps::get(["name"]).call(value, key), Limit::Unbounded)?;
//! assert_eq!(names.get(&Key::Int(1)), Some(&Value::from("bob")));
//! # Ok::<(), keylists::Error>(())
//! ```

use crate::collection::{Collection, Key};
use crate::error::{Error, Result};
use crate::reductions::Reduction;
use crate::value::Value;
use regex::Regex;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

type MapperFn = dyn Fn(&Value, &Key) -> Result<Value>;

/// Path segments for [`get`] and [`has`]; most paths are short.
type Path = SmallVec<[Key; 4]>;

/// A shared `(value, key) -> Result<Value>` callable.
///
/// Cloning a `Mapper` is a reference-count increment.
#[derive(Clone)]
pub struct Mapper(Rc<MapperFn>);

impl Mapper {
    /// Wraps a closure as a mapper.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::{Key, Value};
    /// use keylists::maps::Mapper;
    ///
    /// let shout = Mapper::new(|value, _| Ok(Value::from(value.to_text("shout")?.to_uppercase())));
    /// assert_eq!(shout.call(&Value::from("hi"), &Key::Int(0)), Ok(Value::from("HI")));
    /// ```
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&Value, &Key) -> Result<Value> + 'static,
    {
        Self(Rc::new(function))
    }

    /// Applies the mapper.
    ///
    /// # Errors
    ///
    /// Returns whatever error the mapper raises.
    #[inline]
    pub fn call(&self, value: &Value, key: &Key) -> Result<Value> {
        (self.0)(value, key)
    }

    /// Applies the mapper and reduces the result to its truthiness.
    ///
    /// # Errors
    ///
    /// Returns whatever error the mapper raises.
    #[inline]
    pub fn test(&self, value: &Value, key: &Key) -> Result<bool> {
        self.call(value, key).map(|result| result.is_truthy())
    }

    /// Applies the mapper and converts the result to a collection key.
    ///
    /// # Errors
    ///
    /// Returns whatever error the mapper raises, or [`Error::TypeMismatch`]
    /// when the result cannot be a key.
    #[inline]
    pub fn call_key(&self, value: &Value, key: &Key) -> Result<Key> {
        self.call(value, key)?.to_key()
    }

    /// Feeds this mapper's result into `next`. The key is passed to both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::{Key, Value};
    /// use keylists::maps;
    ///
    /// let long_name = maps::get(["name"]).then(maps::size_of(maps::parse(".").unwrap()));
    /// let person = Value::object([("name", Value::from("ann"))]);
    /// assert_eq!(long_name.call(&person, &Key::Int(0)), Ok(Value::from(1)));
    /// ```
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self::new(move |value, key| next.call(&self.call(value, key)?, key))
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Mapper(<function>)")
    }
}

fn predicate<F>(function: F) -> Mapper
where
    F: Fn(&Value, &Key) -> bool + 'static,
{
    Mapper::new(move |value, key| Ok(Value::Bool(function(value, key))))
}

fn transform<F>(function: F) -> Mapper
where
    F: Fn(&Value) -> Result<Value> + 'static,
{
    Mapper::new(move |value, _| function(value))
}

// =============================================================================
// Composition
// =============================================================================

/// Negates the truthiness of `mapper`.
#[must_use]
pub fn not(mapper: Mapper) -> Mapper {
    Mapper::new(move |value, key| Ok(Value::Bool(!mapper.test(value, key)?)))
}

/// True when every mapper is truthy. Stops at the first falsy one; an empty
/// list is true.
pub fn ands<I>(mappers: I) -> Mapper
where
    I: IntoIterator<Item = Mapper>,
{
    let mappers: Vec<Mapper> = mappers.into_iter().collect();
    Mapper::new(move |value, key| {
        for mapper in &mappers {
            if !mapper.test(value, key)? {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    })
}

/// True when any mapper is truthy. Stops at the first truthy one; an empty
/// list is false.
pub fn ors<I>(mappers: I) -> Mapper
where
    I: IntoIterator<Item = Mapper>,
{
    let mappers: Vec<Mapper> = mappers.into_iter().collect();
    Mapper::new(move |value, key| {
        for mapper in &mappers {
            if mapper.test(value, key)? {
                return Ok(Value::Bool(true));
            }
        }
        Ok(Value::Bool(false))
    })
}

/// Returns the value unchanged.
#[must_use]
pub fn identity() -> Mapper {
    transform(|value| Ok(value.clone()))
}

/// Returns the entry's key as a value.
#[must_use]
pub fn key() -> Mapper {
    Mapper::new(|_, key| Ok(Value::from(key)))
}

// =============================================================================
// Comparison
// =============================================================================

/// Strict equality with `expected`: `1`, `1.0` and `"1"` are all different.
pub fn equals(expected: impl Into<Value>) -> Mapper {
    let expected = expected.into();
    predicate(move |value, _| *value == expected)
}

fn compare_with(expected: Value, accept: fn(Ordering) -> bool) -> Mapper {
    predicate(move |value, _| value.loose_cmp(&expected).is_some_and(accept))
}

/// `value >= expected` under loose comparison.
pub fn at_least(expected: impl Into<Value>) -> Mapper {
    compare_with(expected.into(), Ordering::is_ge)
}

/// `value <= expected` under loose comparison.
pub fn at_most(expected: impl Into<Value>) -> Mapper {
    compare_with(expected.into(), Ordering::is_le)
}

/// `value > expected` under loose comparison.
pub fn more_than(expected: impl Into<Value>) -> Mapper {
    compare_with(expected.into(), Ordering::is_gt)
}

/// `value < expected` under loose comparison.
pub fn less_than(expected: impl Into<Value>) -> Mapper {
    compare_with(expected.into(), Ordering::is_lt)
}

// =============================================================================
// Type predicates
// =============================================================================

/// Strings only.
#[must_use]
pub fn is_string() -> Mapper {
    predicate(|value, _| matches!(value, Value::Str(_)))
}

/// Arrays only; objects are not arrays.
#[must_use]
pub fn is_array() -> Mapper {
    predicate(|value, _| matches!(value, Value::Array(_)))
}

/// Objects only.
#[must_use]
pub fn is_object() -> Mapper {
    predicate(|value, _| matches!(value, Value::Object(_)))
}

/// Integers; floats and numeric strings are not.
#[must_use]
pub fn is_integer() -> Mapper {
    predicate(|value, _| matches!(value, Value::Int(_)))
}

/// `true` or `false`.
#[must_use]
pub fn is_boolean() -> Mapper {
    predicate(|value, _| matches!(value, Value::Bool(_)))
}

/// Numbers and numeric strings.
#[must_use]
pub fn is_numeric() -> Mapper {
    predicate(|value, _| value.is_numeric())
}

/// `true` and only `true`.
#[must_use]
pub fn is_true() -> Mapper {
    predicate(|value, _| matches!(value, Value::Bool(true)))
}

/// `false` and only `false`.
#[must_use]
pub fn is_false() -> Mapper {
    predicate(|value, _| matches!(value, Value::Bool(false)))
}

/// Truthy values (see [`Value::is_truthy`]).
#[must_use]
pub fn is_truthy() -> Mapper {
    predicate(|value, _| value.is_truthy())
}

/// Values that are not truthy.
#[must_use]
pub fn is_falsey() -> Mapper {
    predicate(|value, _| !value.is_truthy())
}

// =============================================================================
// Structural access and membership
// =============================================================================

fn walk<'a>(value: &'a Value, path: &'a [Key]) -> std::result::Result<&'a Value, &'a Key> {
    path.iter().try_fold(value, |current, segment| {
        current
            .get(segment)
            .filter(|found| !found.is_null())
            .ok_or(segment)
    })
}

fn collect_path<I, T>(path: I) -> Path
where
    I: IntoIterator<Item = T>,
    T: Into<Key>,
{
    path.into_iter().map(Into::into).collect()
}

/// Walks nested arrays and objects by successive keys.
///
/// A segment holding `Null` counts as missing. An empty path returns the
/// value itself.
///
/// # Examples
///
/// ```rust
/// use keylists::{Error, Key, Value};
/// use keylists::maps;
///
/// let item = Value::object([("a", Value::object([("b", Value::from("c"))]))]);
/// assert_eq!(maps::get(["a", "b"]).call(&item, &Key::Int(0)), Ok(Value::from("c")));
/// assert_eq!(
///     maps::get(["a", "x"]).call(&item, &Key::Int(0)),
///     Err(Error::KeyNotFound { key: "x".to_string() })
/// );
/// ```
pub fn get<I, T>(path: I) -> Mapper
where
    I: IntoIterator<Item = T>,
    T: Into<Key>,
{
    let path = collect_path(path);
    transform(move |value| {
        walk(value, &path)
            .cloned()
            .map_err(|segment| Error::KeyNotFound {
                key: segment.to_string(),
            })
    })
}

/// Like [`get`], but reports whether the walk succeeds instead of failing.
pub fn has<I, T>(path: I) -> Mapper
where
    I: IntoIterator<Item = T>,
    T: Into<Key>,
{
    let path = collect_path(path);
    predicate(move |value, _| walk(value, &path).is_ok())
}

/// True when the value strictly equals one of `values`.
pub fn is_value_of<I, T>(values: I) -> Mapper
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    predicate(move |value, _| values.contains(value))
}

/// True when the value, cast to a key, is one of `keys`. Values that cannot
/// be keys are never members.
///
/// # Examples
///
/// ```rust
/// use keylists::{Key, Value};
/// use keylists::maps;
///
/// let known = maps::is_key_of(["red", "7"]);
/// assert_eq!(known.call(&Value::from(7), &Key::Int(0)), Ok(Value::Bool(true)));
/// assert_eq!(known.call(&Value::from("blue"), &Key::Int(0)), Ok(Value::Bool(false)));
/// ```
pub fn is_key_of<I, T>(keys: I) -> Mapper
where
    I: IntoIterator<Item = T>,
    T: Into<Key>,
{
    let keys: HashSet<Key> = keys.into_iter().map(Into::into).collect();
    predicate(move |value, _| value.to_key().is_ok_and(|key| keys.contains(&key)))
}

// =============================================================================
// Regex
// =============================================================================

/// True when `pattern` matches the value's text.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] when `pattern` does not compile.
pub fn regex(pattern: &str) -> Result<Mapper> {
    let pattern = Regex::new(pattern)?;
    Ok(transform(move |value| {
        Ok(Value::Bool(pattern.is_match(&value.to_text("regex")?)))
    }))
}

/// Returns the full match followed by every capture group as an array, or
/// `false` when `pattern` does not match. Groups that did not participate are
/// `""`, except trailing ones, which are left out.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] when `pattern` does not compile.
///
/// # Examples
///
/// ```rust
/// use keylists::{Key, Value};
/// use keylists::maps;
///
/// let version = maps::parse(r"(\d+)\.(\d+)").unwrap();
/// assert_eq!(
///     version.call(&Value::from("v1.22"), &Key::Int(0)),
///     Ok(Value::list(["1.22", "1", "22"]))
/// );
/// assert_eq!(version.call(&Value::from("none"), &Key::Int(0)), Ok(Value::Bool(false)));
/// ```
pub fn parse(pattern: &str) -> Result<Mapper> {
    let pattern = Regex::new(pattern)?;
    Ok(transform(move |value| {
        let text = value.to_text("parse")?;
        let Some(captures) = pattern.captures(&text) else {
            return Ok(Value::Bool(false));
        };
        let mut groups: Vec<Option<&str>> = captures
            .iter()
            .map(|group| group.map(|found| found.as_str()))
            .collect();
        while groups.last().is_some_and(Option::is_none) {
            groups.pop();
        }
        Ok(Value::list(groups.into_iter().map(Option::unwrap_or_default)))
    }))
}

// =============================================================================
// Arithmetic
// =============================================================================

/// Adds `amount` to the value.
pub fn offset(amount: impl Into<Value>) -> Mapper {
    let amount = amount.into();
    transform(move |value| {
        Ok(value
            .to_number("offset")?
            .add(amount.to_number("offset")?)
            .into())
    })
}

/// Multiplies the value by `factor`.
pub fn scale(factor: impl Into<Value>) -> Mapper {
    let factor = factor.into();
    transform(move |value| {
        Ok(value
            .to_number("scale")?
            .multiply(factor.to_number("scale")?)
            .into())
    })
}

/// Raises the value to `exponent`.
pub fn power(exponent: impl Into<Value>) -> Mapper {
    let exponent = exponent.into();
    transform(move |value| {
        Ok(value
            .to_number("power")?
            .power(exponent.to_number("power")?)
            .into())
    })
}

/// Logarithm of the value in `base`.
pub fn log(base: impl Into<Value>) -> Mapper {
    let base = base.into();
    transform(move |value| {
        let base = base.to_float("log")?;
        Ok(Value::Float(value.to_float("log")?.ln() / base.ln()))
    })
}

/// Rounds to `precision` decimal places, halves away from zero. A negative
/// precision rounds to tens, hundreds and so on.
///
/// # Examples
///
/// ```rust
/// use keylists::{Key, Value};
/// use keylists::maps;
///
/// let key = Key::Int(0);
/// assert_eq!(maps::round(0).call(&Value::from(2.5), &key), Ok(Value::from(3.0)));
/// assert_eq!(maps::round(1).call(&Value::from(-1.25), &key), Ok(Value::from(-1.3)));
/// assert_eq!(maps::round(-1).call(&Value::from(15), &key), Ok(Value::from(20.0)));
/// ```
#[must_use]
pub fn round(precision: i32) -> Mapper {
    let scale = 10_f64.powi(precision.abs());
    transform(move |value| {
        let number = value.to_float("round")?;
        let rounded = if precision >= 0 {
            (number * scale).round() / scale
        } else {
            (number / scale).round() * scale
        };
        Ok(Value::Float(rounded))
    })
}

/// Rounds down to a float.
#[must_use]
pub fn floor() -> Mapper {
    transform(|value| Ok(Value::Float(value.to_float("floor")?.floor())))
}

/// Rounds up to a float.
#[must_use]
pub fn ceil() -> Mapper {
    transform(|value| Ok(Value::Float(value.to_float("ceil")?.ceil())))
}

/// Integer remainder of the value by `divisor`, sign following the value.
///
/// # Errors
///
/// The mapper raises [`Error::DivisionByZero`] when `divisor` truncates to 0.
pub fn modulo(divisor: impl Into<Value>) -> Mapper {
    let divisor = divisor.into();
    transform(move |value| {
        Ok(value
            .to_number("modulo")?
            .remainder(divisor.to_number("modulo")?)?
            .into())
    })
}

// =============================================================================
// Sizes, folds and re-keying
// =============================================================================

fn count(value: &Value) -> Value {
    let size = match value {
        Value::Null => 0,
        Value::Array(items) | Value::Object(items) => items.len(),
        _ => 1,
    };
    Value::Int(i64::try_from(size).unwrap_or(i64::MAX))
}

/// Number of elements of an array or object. `Null` counts 0 and any other
/// scalar 1.
#[must_use]
pub fn size() -> Mapper {
    transform(|value| Ok(count(value)))
}

/// [`size`] of the value after applying `mapper`.
#[must_use]
pub fn size_of(mapper: Mapper) -> Mapper {
    Mapper::new(move |value, key| Ok(count(&mapper.call(value, key)?)))
}

/// Folds a nested array or object value with `reduction`, starting from
/// `initial`. Every call folds with a fresh copy of the reduction.
///
/// # Examples
///
/// ```rust
/// use keylists::{Key, Value};
/// use keylists::{maps, reductions};
///
/// let totals = maps::reduce(reductions::sum(), Value::Null);
/// assert_eq!(totals.call(&Value::list([1, 2, 3]), &Key::Int(0)), Ok(Value::from(6)));
/// assert_eq!(totals.call(&Value::list([4]), &Key::Int(1)), Ok(Value::from(4)));
/// ```
pub fn reduce(reduction: Reduction, initial: impl Into<Value>) -> Mapper {
    let initial = initial.into();
    transform(move |value| {
        let items = value
            .as_collection()
            .ok_or_else(|| Error::type_mismatch("reduce", "array", value.type_name()))?;
        reduction.clone().fold(items, initial.clone())
    })
}

/// Renumbers an array's keys `0..n`, keeping values in order.
#[must_use]
pub fn to_set() -> Mapper {
    transform(|value| {
        let items = value
            .as_collection()
            .ok_or_else(|| Error::type_mismatch("to_set", "array", value.type_name()))?;
        Ok(Value::Array(Collection::indexed(items.values().cloned())))
    })
}

/// Turns an array into an object with the same entries.
#[must_use]
pub fn to_map() -> Mapper {
    transform(|value| {
        let items = value
            .as_collection()
            .ok_or_else(|| Error::type_mismatch("to_map", "array", value.type_name()))?;
        Ok(Value::Object(items.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn apply(mapper: &Mapper, value: impl Into<Value>) -> Result<Value> {
        mapper.call(&value.into(), &Key::Int(0))
    }

    #[rstest]
    fn test_ands_short_circuits() {
        let exploding = Mapper::new(|_, _| Err(Error::type_mismatch("test", "nothing", "something")));
        let mapper = ands([is_string(), exploding]);
        assert_eq!(apply(&mapper, 5), Ok(Value::Bool(false)));
        assert!(apply(&mapper, "text").is_err());
    }

    #[rstest]
    fn test_empty_ands_and_ors() {
        assert_eq!(apply(&ands([]), Value::Null), Ok(Value::Bool(true)));
        assert_eq!(apply(&ors([]), Value::Null), Ok(Value::Bool(false)));
    }

    #[rstest]
    fn test_get_treats_null_as_missing() {
        let item = Value::object([("a", Value::Null)]);
        assert!(matches!(apply(&get(["a"]), item.clone()), Err(Error::KeyNotFound { .. })));
        assert_eq!(apply(&has(["a"]), item), Ok(Value::Bool(false)));
    }

    #[rstest]
    fn test_get_with_empty_path_returns_value() {
        assert_eq!(apply(&get(Vec::<Key>::new()), 5), Ok(Value::from(5)));
        assert_eq!(apply(&has(Vec::<Key>::new()), 5), Ok(Value::Bool(true)));
    }

    #[rstest]
    fn test_invalid_pattern_fails_at_build_time() {
        assert!(matches!(regex("("), Err(Error::InvalidPattern(_))));
        assert!(matches!(parse("[a"), Err(Error::InvalidPattern(_))));
    }

    #[rstest]
    fn test_parse_fills_inner_missing_groups() {
        let mapper = parse("(a)(x)?(b)(y)?").unwrap();
        assert_eq!(apply(&mapper, "ab"), Ok(Value::list(["ab", "a", "", "b"])));
    }

    #[rstest]
    fn test_modulo_by_zero() {
        assert_eq!(
            apply(&modulo(0), 5),
            Err(Error::DivisionByZero { operation: "modulo" })
        );
    }

    #[rstest]
    fn test_arithmetic_rejects_arrays() {
        assert!(matches!(
            apply(&offset(1), Value::list([1])),
            Err(Error::TypeMismatch { operation: "offset", .. })
        ));
    }

    #[rstest]
    fn test_mapper_clones_share_function() {
        let original = offset(1);
        let copy = original.clone();
        assert_eq!(apply(&copy, 1), apply(&original, 1));
    }
}
