//! Dynamically typed values.
//!
//! [`Value`] is the element type the builders in [`maps`](crate::maps) and
//! [`reductions`](crate::reductions) operate on. It models the loosely typed
//! data those builders were designed for: scalars plus ordered arrays and
//! objects keyed by [`Key`].
//!
//! # Truthiness
//!
//! | Value                     | Truthy            |
//! |---------------------------|-------------------|
//! | `Null`                    | never             |
//! | `Bool(flag)`              | `flag`            |
//! | `Int(n)` / `Float(n)`     | `n != 0`          |
//! | `Str(text)`               | not `""` or `"0"` |
//! | `Array(items)`            | non-empty         |
//! | `Object(_)`               | always            |
//!
//! # Examples
//!
//! ```rust
//! use keylists::{Key, Value};
//!
//! let record = Value::object([("name", Value::from("red")), ("size", Value::from(3))]);
//! assert!(record.is_truthy());
//! assert_eq!(record.get(&Key::from("size")), Some(&Value::from(3)));
//!
//! let empty = Value::list(Vec::<Value>::new());
//! assert!(!empty.is_truthy());
//! ```

mod compare;
mod number;

pub(crate) use number::Number;

use crate::collection::{Collection, Key};
use crate::error::{Error, Result};

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered array with integer and/or string keys.
    Array(Collection<Key, Self>),
    /// An object with named properties.
    Object(Collection<Key, Self>),
}

impl Value {
    /// Creates an array keyed `0..n` from a sequence of values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::{Key, Value};
    ///
    /// let list = Value::list(["a", "b"]);
    /// assert_eq!(list.get(&Key::Int(1)), Some(&Value::from("b")));
    /// ```
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Array(Collection::indexed(values.into_iter().map(Into::into)))
    }

    /// Creates an array from `(key, value)` pairs.
    pub fn array<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Key>,
        T: Into<Self>,
    {
        Self::Array(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Creates an object from `(key, value)` pairs.
    pub fn object<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Key>,
        T: Into<Self>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the name of the value's dynamic type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is a boolean.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float, if this is a float.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string, if this is a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the entries of an array or an object.
    #[inline]
    #[must_use]
    pub const fn as_collection(&self) -> Option<&Collection<Key, Self>> {
        match self {
            Self::Array(items) | Self::Object(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` in an array or object. Scalars have no entries.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Self> {
        self.as_collection().and_then(|items| items.get(key))
    }

    /// Returns the truthiness of the value (see the module table).
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Str(text) => !(text.is_empty() || text == "0"),
            Self::Array(items) => !items.is_empty(),
            Self::Object(_) => true,
        }
    }

    /// Returns `true` for numbers and numeric strings.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) | Self::Float(_) => true,
            Self::Str(text) => Number::parse(text).is_some(),
            _ => false,
        }
    }

    /// Converts a scalar to text: null and `false` become `""`, `true`
    /// becomes `"1"`. Arrays and objects are a [`Error::TypeMismatch`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for arrays and objects.
    pub fn to_text(&self, operation: &'static str) -> Result<String> {
        match self {
            Self::Null | Self::Bool(false) => Ok(String::new()),
            Self::Bool(true) => Ok("1".to_string()),
            Self::Int(value) => Ok(value.to_string()),
            Self::Float(value) => Ok(value.to_string()),
            Self::Str(text) => Ok(text.clone()),
            Self::Array(_) | Self::Object(_) => {
                Err(Error::type_mismatch(operation, "scalar", self.type_name()))
            }
        }
    }

    /// Converts the value to a collection key using array-key casting:
    /// null is `""`, booleans are `0`/`1`, floats truncate, strings follow
    /// [`Key::from`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for arrays, objects and non-finite floats.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_key(&self) -> Result<Key> {
        match self {
            Self::Null => Ok(Key::Str(String::new())),
            Self::Bool(flag) => Ok(Key::Int(i64::from(*flag))),
            Self::Int(value) => Ok(Key::Int(*value)),
            Self::Float(value) if value.is_finite() => Ok(Key::Int(value.trunc() as i64)),
            Self::Str(text) => Ok(Key::from(text.as_str())),
            Self::Float(_) | Self::Array(_) | Self::Object(_) => {
                Err(Error::type_mismatch("key", "scalar", self.type_name()))
            }
        }
    }

    /// Merges two arrays: integer keys of `other` are appended and the whole
    /// result is renumbered, string keys overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless both operands are arrays or
    /// objects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::Value;
    ///
    /// let merged = Value::list([1, 2]).merge(&Value::list([3])).unwrap();
    /// assert_eq!(merged, Value::list([1, 2, 3]));
    /// ```
    pub fn merge(&self, other: &Self) -> Result<Self> {
        let (Some(left), Some(right)) = (self.as_collection(), other.as_collection()) else {
            let found = if self.as_collection().is_some() {
                other.type_name()
            } else {
                self.type_name()
            };
            return Err(Error::type_mismatch("merge", "array", found));
        };
        let mut merged = Collection::with_capacity(left.len() + right.len());
        let mut next_index: i64 = 0;
        for (key, value) in left.iter().chain(right.iter()) {
            match key {
                Key::Int(_) => {
                    merged.insert(Key::Int(next_index), value.clone());
                    next_index += 1;
                }
                Key::Str(_) => {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(Self::Array(merged))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(index) => Self::Int(index),
            Key::Str(text) => Self::Str(text),
        }
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        Self::from(key.clone())
    }
}

impl From<Collection<Key, Self>> for Value {
    fn from(items: Collection<Key, Self>) -> Self {
        Self::Array(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<&Value> for Key {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_key()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(text) => serializer.serialize_str(text),
            Self::Array(items) if is_sequential(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for value in items.values() {
                    sequence.serialize_element(value)?;
                }
                sequence.end()
            }
            Self::Array(items) | Self::Object(items) => serde::Serialize::serialize(items, serializer),
        }
    }
}

#[cfg(feature = "serde")]
fn is_sequential(items: &Collection<Key, Value>) -> bool {
    items
        .keys()
        .enumerate()
        .all(|(index, key)| *key == Key::from(index))
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, flag: bool) -> std::result::Result<Self::Value, E> {
        Ok(Value::Bool(flag))
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
        Ok(Value::Int(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Int))
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E>(self, text: &str) -> std::result::Result<Self::Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E>(self, text: String) -> std::result::Result<Self::Value, E> {
        Ok(Value::Str(text))
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut values: Vec<Value> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(value) = access.next_element::<Value>()? {
            values.push(value);
        }
        Ok(Value::list(values))
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut entries = Collection::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            entries.insert(key, value);
        }
        Ok(Value::Object(entries))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================
