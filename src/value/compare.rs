//! Orderings over [`Value`].
//!
//! Two orderings exist:
//!
//! - The natural ordering ([`Ord`]) is total and consistent with strict
//!   equality. Values of different kinds order by kind
//!   (null < bool < number < string < array < object); integers and floats
//!   share the number kind and compare numerically, with an integer placed
//!   before an equal float. Sorting uses this ordering.
//! - The loose ordering ([`Value::loose_cmp`]) coerces operands the way the
//!   comparison predicates expect. When either side is a boolean or null,
//!   both sides compare by truthiness, except null against a string, which
//!   compares `""` with the string. Otherwise numbers and numeric strings
//!   compare numerically and other strings compare as text.

use super::Value;
use super::number::Number;
use std::cmp::Ordering;

impl Value {
    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Str(_) => 3,
            Self::Array(_) => 4,
            Self::Object(_) => 5,
        }
    }

    /// Compares two values with loose coercion.
    ///
    /// A boolean or null operand turns the comparison into one of
    /// truthiness (`false < true`), so `true` is at least `5` and `null` is
    /// not more than `-5`. Null against a string compares `""` with the
    /// string.
    ///
    /// Returns `None` when the operands cannot be compared, such as an array
    /// against a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::Value;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Value::from(10).loose_cmp(&Value::from("9")), Some(Ordering::Greater));
    /// assert_eq!(Value::from(1).loose_cmp(&Value::from(1.0)), Some(Ordering::Equal));
    /// assert_eq!(Value::from("b").loose_cmp(&Value::from("a")), Some(Ordering::Greater));
    /// assert_eq!(Value::list([1]).loose_cmp(&Value::from("a")), None);
    /// assert_eq!(Value::Bool(true).loose_cmp(&Value::from(5)), Some(Ordering::Equal));
    /// assert_eq!(Value::Null.loose_cmp(&Value::from(-5)), Some(Ordering::Less));
    /// ```
    #[must_use]
    pub fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Str(text)) => Some("".cmp(text.as_str())),
            (Self::Str(text), Self::Null) => Some(text.as_str().cmp("")),
            (Self::Bool(_) | Self::Null, _) | (_, Self::Bool(_) | Self::Null) => {
                Some(self.is_truthy().cmp(&other.is_truthy()))
            }
            (Self::Array(left), Self::Array(right)) | (Self::Object(left), Self::Object(right)) => {
                Some(left.len().cmp(&right.len()).then_with(|| left.cmp(right)))
            }
            (Self::Array(_) | Self::Object(_), _) | (_, Self::Array(_) | Self::Object(_)) => None,
            (Self::Str(left), Self::Str(right)) => {
                match (Number::parse(left), Number::parse(right)) {
                    (Some(left), Some(right)) => compare_numbers(left, right),
                    _ => Some(left.cmp(right)),
                }
            }
            (Self::Str(text), number) | (number, Self::Str(text))
                if Number::parse(text).is_none() =>
            {
                let rendered = number.to_text("compare").ok()?;
                let ordering = rendered.as_str().cmp(text.as_str());
                Some(if matches!(self, Self::Str(_)) {
                    ordering.reverse()
                } else {
                    ordering
                })
            }
            _ => compare_numbers(self.to_number("compare").ok()?, other.to_number("compare").ok()?),
        }
    }
}

fn compare_numbers(left: Number, right: Number) -> Option<Ordering> {
    match (left, right) {
        (Number::Int(left), Number::Int(right)) => Some(left.cmp(&right)),
        _ => left.as_f64().partial_cmp(&right.as_f64()),
    }
}

#[allow(clippy::cast_precision_loss)]
fn compare_int_float(int: i64, float: f64) -> Ordering {
    (int as f64).total_cmp(&float).then(Ordering::Less)
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => left.total_cmp(right),
            (Self::Int(left), Self::Float(right)) => compare_int_float(*left, *right),
            (Self::Float(left), Self::Int(right)) => compare_int_float(*right, *left).reverse(),
            (Self::Str(left), Self::Str(right)) => left.cmp(right),
            (Self::Array(left), Self::Array(right)) | (Self::Object(left), Self::Object(right)) => {
                left.cmp(right)
            }
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_strict_equality_distinguishes_kinds() {
        assert_ne!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::from(0), Value::Bool(false));
        assert_ne!(Value::Null, Value::Bool(false));
        assert_ne!(Value::list(Vec::<Value>::new()), Value::object(Vec::<(&str, Value)>::new()));
        assert_eq!(Value::from("a"), Value::from("a"));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[rstest]
    fn test_natural_order_groups_by_kind() {
        let mut values = vec![
            Value::from("a"),
            Value::list([1]),
            Value::from(2.5),
            Value::Null,
            Value::from(2),
            Value::Bool(true),
            Value::from(3),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::from(2),
                Value::from(2.5),
                Value::from(3),
                Value::from("a"),
                Value::list([1]),
            ]
        );
    }

    #[rstest]
    fn test_integer_orders_before_equal_float() {
        assert_eq!(Value::from(1).cmp(&Value::from(1.0)), Ordering::Less);
        assert_eq!(Value::from(1.0).cmp(&Value::from(1)), Ordering::Greater);
    }

    #[rstest]
    #[case(Value::from(5), Value::from(5), Some(Ordering::Equal))]
    #[case(Value::from(5), Value::from(10), Some(Ordering::Less))]
    #[case(Value::from(0.5), Value::from(0), Some(Ordering::Greater))]
    #[case(Value::from("10"), Value::from("9"), Some(Ordering::Greater))]
    #[case(Value::from("abc"), Value::from("abd"), Some(Ordering::Less))]
    #[case(Value::Null, Value::from(0), Some(Ordering::Equal))]
    #[case(Value::Bool(true), Value::from(1), Some(Ordering::Equal))]
    #[case(Value::from(5), Value::from("a"), Some(Ordering::Less))]
    #[case(Value::from("a"), Value::from(5), Some(Ordering::Greater))]
    #[case(Value::list([1, 2]), Value::list([3]), Some(Ordering::Greater))]
    #[case(Value::list([1]), Value::from(1), None)]
    #[case(Value::Bool(true), Value::from(5), Some(Ordering::Equal))]
    #[case(Value::from(5), Value::Bool(false), Some(Ordering::Greater))]
    #[case(Value::Null, Value::from(-5), Some(Ordering::Less))]
    #[case(Value::Bool(true), Value::from("abc"), Some(Ordering::Equal))]
    #[case(Value::Bool(false), Value::from("0"), Some(Ordering::Equal))]
    #[case(Value::Null, Value::Bool(false), Some(Ordering::Equal))]
    #[case(Value::Bool(true), Value::list(Vec::<Value>::new()), Some(Ordering::Greater))]
    #[case(Value::Null, Value::from("abc"), Some(Ordering::Less))]
    #[case(Value::Null, Value::from(""), Some(Ordering::Equal))]
    #[case(Value::from("a"), Value::Null, Some(Ordering::Greater))]
    #[case(Value::from(f64::NAN), Value::from(1), None)]
    fn test_loose_cmp(#[case] left: Value, #[case] right: Value, #[case] expected: Option<Ordering>) {
        assert_eq!(left.loose_cmp(&right), expected);
    }
}
