//! Dynamic collection keys.

use std::fmt;

/// A key of a dynamic collection: either an integer index or a string.
///
/// Strings that spell a canonical integer (`"0"`, `"42"`, `"-7"`, but not
/// `"07"`, `"-0"` or `"+1"`) are stored as integers, so `Key::from("1")` and
/// `Key::from(1)` address the same entry. Integer keys order before string
/// keys.
///
/// # Examples
///
/// ```rust
/// use keylists::Key;
///
/// assert_eq!(Key::from("3"), Key::Int(3));
/// assert_eq!(Key::from("03"), Key::Str("03".to_string()));
/// assert!(Key::Int(100) < Key::from("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An integer index.
    Int(i64),
    /// A string key that is not a canonical integer.
    Str(String),
}

impl Key {
    /// Returns the integer index, if this is an integer key.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(index) => Some(*index),
            Self::Str(_) => None,
        }
    }

    /// Returns the string, if this is a string key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(text) => Some(text),
        }
    }

    fn parse_canonical_int(text: &str) -> Option<i64> {
        let digits = text.strip_prefix('-').unwrap_or(text);
        let canonical = !digits.is_empty()
            && digits.bytes().all(|byte| byte.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'))
            && text != "-0";
        if canonical { text.parse().ok() } else { None }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Self::Int(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Int(i64::from(index))
    }
}

impl From<usize> for Key {
    #[allow(clippy::cast_possible_wrap)]
    fn from(index: usize) -> Self {
        Self::Int(index as i64)
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Self::parse_canonical_int(text).map_or_else(|| Self::Str(text.to_string()), Self::Int)
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Self::parse_canonical_int(&text).map_or(Self::Str(text), Self::Int)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(index) => write!(formatter, "{index}"),
            Self::Str(text) => formatter.write_str(text),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(index) => serializer.serialize_i64(*index),
            Self::Str(text) => serializer.serialize_str(text),
        }
    }
}

#[cfg(feature = "serde")]
struct KeyVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string key")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Key::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value)
            .map(Key::Int)
            .map_err(|_| E::custom("integer key out of range"))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Key::from(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Key::from(value))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}
