#![cfg(feature = "value")]
//! Table-driven tests for the reduction builders.

use keylists::reductions::{self, Reduction};
use keylists::{Collection, Error, Key, Value, iteration, maps};
use rstest::rstest;

fn list<I, T>(values: I) -> Collection<Key, Value>
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Collection::indexed(values.into_iter().map(Into::into))
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied())
}

fn no_values() -> Collection<Key, Value> {
    Collection::new()
}

// =============================================================================
// merge
// =============================================================================

#[rstest]
#[case(ints(&[]), ints(&[]), list([ints(&[]), ints(&[]), ints(&[])]))]
#[case(ints(&[1, 2, 3]), ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9]), list([ints(&[4, 5, 6]), ints(&[7, 8]), ints(&[9])]))]
#[case(ints(&[]), ints(&[4, 5, 6, 7, 8, 9]), list([ints(&[4, 5, 6]), ints(&[7, 8]), ints(&[9])]))]
#[case(Value::Null, ints(&[4, 5, 6, 7, 8, 9]), list([ints(&[4, 5, 6]), ints(&[7, 8]), ints(&[9])]))]
fn test_merge(#[case] initial: Value, #[case] expected: Value, #[case] input: Collection<Key, Value>) {
    assert_eq!(reductions::merge().fold(&input, initial), Ok(expected));
}

#[rstest]
fn test_merge_string_keys_overwrite() {
    let input = list([Value::array([("a", 1)]), Value::array([("a", 2), ("b", 3)])]);
    let merged = reductions::merge().fold(&input, Value::Null).unwrap();
    assert_eq!(merged, Value::array([("a", 2), ("b", 3)]));
}

// =============================================================================
// implode
// =============================================================================

#[rstest]
#[case(reductions::implode(""), Value::Null, Value::Null, no_values())]
#[case(reductions::implode(""), Value::from(""), Value::from(""), no_values())]
#[case(reductions::implode(","), Value::Null, Value::Null, no_values())]
#[case(reductions::implode(","), Value::from(""), Value::from(""), no_values())]
#[case(reductions::implode(","), Value::Null, Value::from(",,"), list(["", "", ""]))]
#[case(reductions::implode(",").keep_initial_null(), Value::Null, Value::from(",,,"), list(["", "", ""]))]
#[case(reductions::implode(","), Value::from(""), Value::from(",,,"), list(["", "", ""]))]
#[case(reductions::implode(","), Value::from("a"), Value::from("a,,,"), list(["", "", ""]))]
#[case(reductions::implode(","), Value::from("a"), Value::from("a,b,c,d"), list(["b", "c", "d"]))]
#[case(reductions::implode(",").map(maps::key()), Value::from("a"), Value::from("a,0,1,2"), list(["b", "c", "d"]))]
fn test_implode(
    #[case] reduction: Reduction,
    #[case] initial: Value,
    #[case] expected: Value,
    #[case] input: Collection<Key, Value>,
) {
    assert_eq!(reduction.fold(&input, initial), Ok(expected));
}

// =============================================================================
// sum / product
// =============================================================================

#[rstest]
#[case(Value::from(0), 6, &[1, 2, 3])]
#[case(Value::from(0), 0, &[])]
#[case(Value::from(13), 13, &[])]
#[case(Value::from(0), 0, &[5, -5])]
#[case(Value::from(0), 10, &[5, -10, 15])]
#[case(Value::Null, 10, &[5, -10, 15])]
fn test_sum(#[case] initial: Value, #[case] expected: i64, #[case] values: &[i64]) {
    assert_eq!(reductions::sum().fold(&list(values.iter().copied()), initial), Ok(Value::from(expected)));
}

#[rstest]
#[case(reductions::product(), Value::Null, 6, &[1, 2, 3])]
#[case(reductions::product(), Value::from(1), 1, &[])]
#[case(reductions::product(), Value::from(13), 13, &[])]
#[case(reductions::product(), Value::Null, -25, &[5, -5])]
#[case(reductions::product(), Value::Null, -750, &[5, -10, 15])]
#[case(reductions::product().keep_initial_null(), Value::Null, 0, &[5, -10, 15])]
fn test_product(#[case] reduction: Reduction, #[case] initial: Value, #[case] expected: i64, #[case] values: &[i64]) {
    assert_eq!(reduction.fold(&list(values.iter().copied()), initial), Ok(Value::from(expected)));
}

#[rstest]
fn test_sum_coerces_loosely() {
    let input = list([Value::from("2"), Value::Bool(true), Value::Null, Value::from(0.5)]);
    assert_eq!(reductions::sum().fold(&input, Value::Null), Ok(Value::from(3.5)));
}

#[rstest]
fn test_sum_rejects_words() {
    assert!(matches!(
        reductions::sum().fold(&list(["apple"]), 0),
        Err(Error::TypeMismatch { operation: "sum", .. })
    ));
}

// =============================================================================
// ands / ors
// =============================================================================

#[rstest]
#[case(reductions::ands(), Value::Bool(true), Value::Bool(true), &[])]
#[case(reductions::ands(), Value::Bool(false), Value::Bool(false), &[])]
#[case(reductions::ands(), Value::Null, Value::Bool(true), &[true])]
#[case(reductions::ands().keep_initial_null(), Value::Null, Value::Bool(false), &[true])]
#[case(reductions::ands(), Value::Bool(true), Value::Bool(true), &[true, true, true])]
#[case(reductions::ands(), Value::Bool(true), Value::Bool(false), &[true, true, false])]
#[case(reductions::ands(), Value::Bool(false), Value::Bool(false), &[true, false, true])]
#[case(reductions::ands(), Value::Bool(false), Value::Bool(false), &[false, false, false])]
#[case(reductions::ors(), Value::Null, Value::Null, &[])]
#[case(reductions::ors(), Value::Bool(true), Value::Bool(true), &[])]
#[case(reductions::ors(), Value::Bool(false), Value::Bool(false), &[])]
#[case(reductions::ors(), Value::Bool(true), Value::Bool(true), &[true, true, false])]
#[case(reductions::ors(), Value::Null, Value::Bool(true), &[true, false, true])]
#[case(reductions::ors(), Value::Null, Value::Bool(true), &[false, true, true])]
#[case(reductions::ors(), Value::Null, Value::Bool(false), &[false, false, false])]
fn test_logic(
    #[case] reduction: Reduction,
    #[case] initial: Value,
    #[case] expected: Value,
    #[case] values: &[bool],
) {
    assert_eq!(reduction.fold(&list(values.iter().copied()), initial), Ok(expected));
}

// =============================================================================
// max / min / average
// =============================================================================

#[rstest]
#[case(reductions::max(), Value::Null, &[])]
#[case(reductions::max(), Value::from(0), &[0])]
#[case(reductions::max(), Value::from(99), &[0, 10, 99, -99])]
#[case(reductions::min(), Value::Null, &[])]
#[case(reductions::min(), Value::from(0), &[0])]
#[case(reductions::min(), Value::from(-99), &[0, 10, 99, -99])]
fn test_extremes(#[case] reduction: Reduction, #[case] expected: Value, #[case] values: &[i64]) {
    assert_eq!(reduction.fold(&list(values.iter().copied()), Value::Null), Ok(expected));
}

#[rstest]
fn test_kept_null_seed_compares_by_truthiness() {
    let input = list([-5]);
    assert_eq!(reductions::max().keep_initial_null().fold(&input, Value::Null), Ok(Value::from(-5)));
    assert_eq!(reductions::min().keep_initial_null().fold(&input, Value::Null), Ok(Value::Null));
}

#[rstest]
fn test_max_first_of_ties_wins() {
    let input = list([Value::from(1), Value::from(1.0), Value::from("1")]);
    assert_eq!(reductions::max().fold(&input, Value::Null), Ok(Value::from(1)));
}

#[rstest]
#[case(Value::Null, Value::Null, &[])]
#[case(Value::from(10), Value::from(10), &[])]
#[case(Value::from(10), Value::from(5.0), &[0])]
#[case(Value::Null, Value::from(2.5), &[0, 10, 99, -99])]
#[case(Value::from(5), Value::from(3.0), &[0, 10, 99, -99])]
fn test_average(#[case] initial: Value, #[case] expected: Value, #[case] values: &[i64]) {
    assert_eq!(reductions::average().fold(&list(values.iter().copied()), initial), Ok(expected));
}

/// A substituted null seed must not count as a sample, while a real seed
/// must. Mixing the two up turns 2.5 into 2.0.
#[rstest]
fn test_average_null_seed_is_not_a_sample() {
    let input = list([0, 10, 99, -99]);
    assert_ne!(reductions::average().fold(&input, Value::Null), Ok(Value::from(2.0)));
    assert_eq!(reductions::average().fold(&input, 0), Ok(Value::from(2.0)));
}

// =============================================================================
// Reuse and engine integration
// =============================================================================

#[rstest]
fn test_into_fn_plugs_into_try_reduce() {
    let input = list([1, 2, 3]);
    let total = iteration::try_reduce(&input, Value::Null, reductions::sum().into_fn());
    assert_eq!(total, Ok(Value::from(6)));
}

#[rstest]
fn test_clones_start_fresh() {
    let template = reductions::implode("-");
    let first = template.clone().fold(&list(["a", "b"]), Value::Null);
    let second = template.clone().fold(&list(["c"]), Value::Null);
    assert_eq!(first, Ok(Value::from("a-b")));
    assert_eq!(second, Ok(Value::from("c")));
    assert_eq!(template.calls(), 0);
}

#[rstest]
fn test_mapper_errors_propagate() {
    let input = list([Value::object([("a", 1)])]);
    let result = reductions::sum().map(maps::get(["missing"])).fold(&input, Value::Null);
    assert_eq!(result, Err(Error::KeyNotFound { key: "missing".to_string() }));
}
