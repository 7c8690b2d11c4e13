//! Stateful accumulators for folding dynamic values.
//!
//! Each factory returns a [`Reduction`], a reducer of shape
//! `(current, value, key) -> Result<Value>`. Feed it to
//! [`iteration::try_reduce`](crate::iteration::try_reduce) through
//! [`Reduction::into_fn`], or fold a collection directly with
//! [`Reduction::fold`].
//!
//! # Null seeds
//!
//! By default a reduction treats a `Null` seed as "no seed": on its first
//! invocation it substitutes the operation's identity (0 for [`sum`], 1 for
//! [`product`], `""` for [`implode`], the first element for [`max`] and so
//! on). Any other seed, `0` included, is always respected.
//! [`Reduction::keep_initial_null`] turns the substitution off, and the null
//! seed then takes part in the fold like any other value.
//!
//! # Examples
//!
//! ```rust
//! use keylists::{Collection, Key, Value};
//! use keylists::reductions;
//!
//! let words: Collection<Key, Value> = Collection::indexed([Value::from("a"), Value::from("b")]);
//!
//! assert_eq!(reductions::implode(",").fold(&words, Value::Null)?, Value::from("a,b"));
//! assert_eq!(
//!     reductions::implode(",").keep_initial_null().fold(&words, Value::Null)?,
//!     Value::from(",a,b")
//! );
//! # Ok::<(), keylists::Error>(())
//! ```

use crate::collection::{Collection, Key};
use crate::error::Result;
use crate::iteration;
use crate::maps::Mapper;
use crate::value::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
enum Operation {
    Sum,
    Product,
    Merge,
    Implode(String),
    Ands,
    Ors,
    Max,
    Min,
    Average,
}

impl Operation {
    const fn name(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Merge => "merge",
            Self::Implode(_) => "implode",
            Self::Ands => "ands",
            Self::Ors => "ors",
            Self::Max => "max",
            Self::Min => "min",
            Self::Average => "average",
        }
    }

    /// The neutral starting value. `None` means "start from the first element".
    fn identity(&self) -> Option<Value> {
        match self {
            Self::Sum | Self::Average => Some(Value::Int(0)),
            Self::Product => Some(Value::Int(1)),
            Self::Merge => Some(Value::Array(Collection::new())),
            Self::Implode(_) => Some(Value::Str(String::new())),
            Self::Ands => Some(Value::Bool(true)),
            Self::Ors => Some(Value::Bool(false)),
            Self::Max | Self::Min => None,
        }
    }
}

/// A stateful reducer built by the factories of this module.
///
/// A `Reduction` counts its invocations; reuse a fresh clone per fold.
#[derive(Debug, Clone)]
pub struct Reduction {
    operation: Operation,
    mapper: Option<Mapper>,
    ignore_initial_null: bool,
    calls: usize,
    samples: usize,
}

impl Reduction {
    const fn new(operation: Operation) -> Self {
        Self {
            operation,
            mapper: None,
            ignore_initial_null: true,
            calls: 0,
            samples: 0,
        }
    }

    /// Transforms every `(value, key)` with `mapper` before combining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keylists::{Collection, Key, Value};
    /// use keylists::{maps, reductions};
    ///
    /// let rows: Collection<Key, Value> = Collection::indexed([
    ///     Value::object([("qty", 2)]),
    ///     Value::object([("qty", 5)]),
    /// ]);
    /// let total = reductions::sum().map(maps::get(["qty"])).fold(&rows, Value::Null)?;
    /// assert_eq!(total, Value::from(7));
    /// # Ok::<(), keylists::Error>(())
    /// ```
    #[must_use]
    pub fn map(mut self, mapper: Mapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Keeps a `Null` seed instead of replacing it with the identity.
    #[must_use]
    pub const fn keep_initial_null(mut self) -> Self {
        self.ignore_initial_null = false;
        self
    }

    /// Number of times [`apply`](Self::apply) has run.
    ///
    /// This counts invocations, not samples. An [`average`] tracks its sample
    /// count separately, and a non-null seed adds one sample that no call made.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }

    /// Combines `current` with the (optionally mapped) `value`.
    ///
    /// # Errors
    ///
    /// Returns the mapper's error, or [`Error::TypeMismatch`](crate::Error::TypeMismatch) when an operand
    /// has the wrong dynamic type for the operation.
    pub fn apply(&mut self, current: Value, value: &Value, key: &Key) -> Result<Value> {
        let value = match &self.mapper {
            Some(mapper) => mapper.call(value, key)?,
            None => value.clone(),
        };
        let first = self.calls == 0;
        self.calls += 1;

        let current = if first && self.ignore_initial_null && current.is_null() {
            tracing::trace!(
                operation = self.operation.name(),
                "reduction: substituting identity for null seed"
            );
            match (&self.operation, self.operation.identity()) {
                (Operation::Implode(_), _) => return Ok(Value::Str(value.to_text("implode")?)),
                (_, Some(identity)) => identity,
                (_, None) => return Ok(value),
            }
        } else {
            if first && matches!(self.operation, Operation::Average) {
                self.samples = 1;
            }
            current
        };

        self.combine(current, value)
    }

    fn combine(&mut self, current: Value, value: Value) -> Result<Value> {
        let operation = self.operation.name();
        match &self.operation {
            Operation::Sum => Ok(current
                .to_number(operation)?
                .add(value.to_number(operation)?)
                .into()),
            Operation::Product => Ok(current
                .to_number(operation)?
                .multiply(value.to_number(operation)?)
                .into()),
            Operation::Merge => current.merge(&value),
            Operation::Implode(glue) => Ok(Value::Str(format!(
                "{}{glue}{}",
                current.to_text(operation)?,
                value.to_text(operation)?
            ))),
            Operation::Ands => Ok(Value::Bool(current.is_truthy() && value.is_truthy())),
            Operation::Ors => Ok(Value::Bool(current.is_truthy() || value.is_truthy())),
            Operation::Max => Ok(keep(current, value, Ordering::Greater)),
            Operation::Min => Ok(keep(current, value, Ordering::Less)),
            Operation::Average => {
                #[allow(clippy::cast_precision_loss)]
                let count = self.samples as f64;
                let mean = (current.to_float(operation)? * count + value.to_float(operation)?) / (count + 1.0);
                self.samples += 1;
                Ok(Value::Float(mean))
            }
        }
    }

    /// Turns the reduction into a closure for
    /// [`iteration::try_reduce`](crate::iteration::try_reduce).
    pub fn into_fn(mut self) -> impl FnMut(Value, &Value, &Key) -> Result<Value> {
        move |current, value, key| self.apply(current, value, key)
    }

    /// Folds `collection` starting from `initial`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while combining.
    pub fn fold(self, collection: &Collection<Key, Value>, initial: impl Into<Value>) -> Result<Value> {
        iteration::try_reduce(collection, initial.into(), self.into_fn())
    }
}

/// Keeps `value` over `current` only when it compares strictly `wanted`.
/// Incomparable operands keep `current`.
fn keep(current: Value, value: Value, wanted: Ordering) -> Value {
    if value.loose_cmp(&current) == Some(wanted) {
        value
    } else {
        current
    }
}

/// Adds numbers; integer overflow promotes to float.
#[must_use]
pub const fn sum() -> Reduction {
    Reduction::new(Operation::Sum)
}

/// Multiplies numbers.
#[must_use]
pub const fn product() -> Reduction {
    Reduction::new(Operation::Product)
}

/// Merges arrays: integer keys append and renumber, string keys overwrite.
#[must_use]
pub const fn merge() -> Reduction {
    Reduction::new(Operation::Merge)
}

/// Joins scalars as text with `glue` between them.
pub fn implode(glue: impl Into<String>) -> Reduction {
    Reduction::new(Operation::Implode(glue.into()))
}

/// Logical AND of truthiness.
#[must_use]
pub const fn ands() -> Reduction {
    Reduction::new(Operation::Ands)
}

/// Logical OR of truthiness.
#[must_use]
pub const fn ors() -> Reduction {
    Reduction::new(Operation::Ors)
}

/// Largest value under loose comparison; the earliest wins ties.
#[must_use]
pub const fn max() -> Reduction {
    Reduction::new(Operation::Max)
}

/// Smallest value under loose comparison; the earliest wins ties.
#[must_use]
pub const fn min() -> Reduction {
    Reduction::new(Operation::Min)
}

/// Running arithmetic mean.
///
/// `current` is taken as the mean so far and weighted by the number of
/// samples already seen. A non-null seed counts as one sample; a substituted
/// null seed does not.
///
/// # Examples
///
/// ```rust
/// use keylists::{Collection, Key, Value};
/// use keylists::reductions;
///
/// let samples: Collection<Key, Value> = Collection::indexed([0, 10, 99, -99].map(Value::from));
/// assert_eq!(reductions::average().fold(&samples, Value::Null)?, Value::from(2.5));
/// assert_eq!(reductions::average().fold(&samples, 5)?, Value::from(3.0));
/// # Ok::<(), keylists::Error>(())
/// ```
#[must_use]
pub const fn average() -> Reduction {
    Reduction::new(Operation::Average)
}
