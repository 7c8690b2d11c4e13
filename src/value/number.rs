//! Loose numeric coercion and arithmetic for [`Value`].

use super::Value;
use crate::error::{Error, Result};

/// A coerced numeric operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parses a numeric string: optional surrounding whitespace, an optional
    /// sign, digits with an optional fraction and exponent.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix(['+', '-'])
            .unwrap_or(trimmed);
        let well_formed = body.bytes().any(|byte| byte.is_ascii_digit())
            && body
                .bytes()
                .all(|byte| byte.is_ascii_digit() || matches!(byte, b'.' | b'e' | b'E' | b'+' | b'-'))
            && !body.starts_with(['e', 'E']);
        if !well_formed {
            return None;
        }
        trimmed
            .parse::<i64>()
            .map(Self::Int)
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().map(Self::Float))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    pub(crate) fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_add(right)
                .map_or_else(|| Self::Float(self.as_f64() + other.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub(crate) fn multiply(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left
                .checked_mul(right)
                .map_or_else(|| Self::Float(self.as_f64() * other.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() * other.as_f64()),
        }
    }

    pub(crate) fn power(self, exponent: Self) -> Self {
        if let (Self::Int(base), Self::Int(exponent)) = (self, exponent)
            && let Ok(exponent) = u32::try_from(exponent)
            && let Some(result) = base.checked_pow(exponent)
        {
            return Self::Int(result);
        }
        Self::Float(self.as_f64().powf(exponent.as_f64()))
    }

    /// Integer remainder, truncating float operands the way an integer cast does.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn remainder(self, divisor: Self) -> Result<Self> {
        let truncate = |number: Self| match number {
            Self::Int(value) => value,
            Self::Float(value) => value as i64,
        };
        let (dividend, divisor) = (truncate(self), truncate(divisor));
        if divisor == 0 {
            return Err(Error::DivisionByZero {
                operation: "modulo",
            });
        }
        Ok(Self::Int(dividend.wrapping_rem(divisor)))
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(value) => Self::Int(value),
            Number::Float(value) => Self::Float(value),
        }
    }
}

impl Value {
    /// Coerces the value to a number: null and `false` are 0, `true` is 1,
    /// numeric strings parse. Anything else is a [`Error::TypeMismatch`].
    pub(crate) fn to_number(&self, operation: &'static str) -> Result<Number> {
        match self {
            Self::Null => Ok(Number::Int(0)),
            Self::Bool(flag) => Ok(Number::Int(i64::from(*flag))),
            Self::Int(value) => Ok(Number::Int(*value)),
            Self::Float(value) => Ok(Number::Float(*value)),
            Self::Str(text) => Number::parse(text)
                .ok_or_else(|| Error::type_mismatch(operation, "number", "non-numeric string")),
            Self::Array(_) | Self::Object(_) => {
                Err(Error::type_mismatch(operation, "number", self.type_name()))
            }
        }
    }

    /// Coerces the value to a float.
    pub(crate) fn to_float(&self, operation: &'static str) -> Result<f64> {
        self.to_number(operation).map(Number::as_f64)
    }
}
