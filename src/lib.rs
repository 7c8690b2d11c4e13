//! # keylists
//!
//! Ordered key/value collection utilities with a functional flavour.
//!
//! ## Overview
//!
//! The crate is built around [`Collection`], an insertion-ordered map, and an
//! iteration engine that never mutates its input:
//!
//! - **Iteration Engine**: each, map, filter, `map_filter`, rename, group,
//!   reduce, sort and first over any `Collection<K, V>`
//! - **Dynamic Values**: [`Value`], a loosely typed value with truthiness and
//!   loose comparison, keyed by [`Key`]
//! - **Mappers**: composable predicate and transform builders (`maps`)
//! - **Reductions**: stateful accumulators such as sum, implode and average
//! - **Containers**: `ArraySet` and `ArrayMap` façades sharing one engine
//!
//! ## Feature Flags
//!
//! - `value` (default): [`Value`], `maps`, `reductions` and multi-level
//!   grouping
//! - `containers` (default): `ArraySet` and `ArrayMap`
//! - `serde`: serialization support
//! - `fxhash`: a faster, non-randomized hasher for collection indexes
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use keylists::prelude::*;
//!
//! let shirts: Collection<Key, Value> = Collection::indexed([
//!     Value::list(["red", "medium"]),
//!     Value::list(["green", "large"]),
//!     Value::list(["red", "large"]),
//! ]);
//!
//! let by_color = iteration::try_group(&shirts, |shirt, key| maps::get([0]).call_key(shirt, key))?;
//! assert_eq!(by_color.len(), 2);
//!
//! let sizes = iteration::try_map(&shirts, |shirt, key| maps::get([1]).call(shirt, key), Limit::Unbounded)?;
//! let joined = reductions::implode(",").fold(&sizes, Value::Null)?;
//! assert_eq!(joined, Value::from("medium,large,large"));
//! # Ok::<(), keylists::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use keylists::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{Collection, Key};
    pub use crate::error::{Error, Result};
    pub use crate::iteration::{self, Limit, Step, keyless};

    #[cfg(feature = "value")]
    pub use crate::maps::{self, Mapper};
    #[cfg(feature = "value")]
    pub use crate::reductions::{self, Reduction};
    #[cfg(feature = "value")]
    pub use crate::value::Value;

    #[cfg(feature = "containers")]
    pub use crate::containers::{ArrayMap, ArraySet, Container};
}

pub mod collection;
pub mod error;
pub mod iteration;

#[cfg(feature = "value")]
pub mod maps;
#[cfg(feature = "value")]
pub mod reductions;
#[cfg(feature = "value")]
pub mod value;

#[cfg(feature = "containers")]
pub mod containers;

pub use collection::{Collection, Key};
pub use error::{Error, Result};

#[cfg(feature = "value")]
pub use value::Value;
