//! Binary success/failure algebra.
//!
//! [`Outcome`] is the result type threaded through every parser evaluation.
//! It offers two ways of composing results:
//!
//! - **dependent** sequencing with [`Outcome::and_then`], which short-circuits
//!   on the first failure, and
//! - **independent** composition with [`Outcome::tuple`], [`Outcome::tuple_with`]
//!   and [`Outcome::zip`], which look at both operands so that failures from
//!   unrelated branches can be merged.
//!
//! # Example
//!
//! ```rust
//! use biopsy::Outcome;
//!
//! let a: Outcome<i32, Vec<&str>> = Outcome::failure(vec!["a is wrong"]);
//! let b: Outcome<i32, Vec<&str>> = Outcome::failure(vec!["b is wrong"]);
//!
//! // Both errors survive when a combiner is supplied
//! let merged = a.tuple_with(b, |mut l, r| {
//!     l.extend(r);
//!     l
//! });
//! assert_eq!(merged.failure_value(), Some(vec!["a is wrong", "b is wrong"]));
//! ```

use stillwater::prelude::*;
use stillwater::Validation;

/// The outcome of a single evaluation step: a value or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<V, E> {
    /// The step produced a value.
    Success(V),
    /// The step failed with an error.
    Failure(E),
}

impl<V, E> Outcome<V, E> {
    /// Creates a successful outcome.
    pub fn success(value: V) -> Self {
        Outcome::Success(value)
    }

    /// Creates a failed outcome.
    pub fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    /// Returns true if this outcome holds a value.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns true if this outcome holds an error.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Transforms the success value, passing failures through untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Sequences a dependent step. A failure short-circuits and `f` is never called.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(V) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(v) => f(v),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Transforms the error, passing successes through untouched.
    pub fn map_failure<G, F>(self, f: F) -> Outcome<V, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(e) => Outcome::Failure(f(e)),
        }
    }

    /// Recovers from a failure by computing a new outcome from the error.
    pub fn or_else<G, F>(self, f: F) -> Outcome<V, G>
    where
        F: FnOnce(E) -> Outcome<V, G>,
    {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(e) => f(e),
        }
    }

    /// Collapses the outcome into a single value.
    pub fn fold<R>(self, on_success: impl FnOnce(V) -> R, on_failure: impl FnOnce(E) -> R) -> R {
        match self {
            Outcome::Success(v) => on_success(v),
            Outcome::Failure(e) => on_failure(e),
        }
    }

    /// Pairs two independent outcomes.
    ///
    /// When both fail, the error of `self` wins. Use [`Outcome::tuple_with`]
    /// or [`Outcome::zip`] to keep both errors.
    pub fn tuple<U>(self, other: Outcome<U, E>) -> Outcome<(V, U), E> {
        self.tuple_with(other, |left, _| left)
    }

    /// Pairs two independent outcomes, merging the errors when both fail.
    pub fn tuple_with<U, F>(self, other: Outcome<U, E>, combine: F) -> Outcome<(V, U), E>
    where
        F: FnOnce(E, E) -> E,
    {
        match (self, other) {
            (Outcome::Success(a), Outcome::Success(b)) => Outcome::Success((a, b)),
            (Outcome::Failure(e), Outcome::Success(_)) => Outcome::Failure(e),
            (Outcome::Success(_), Outcome::Failure(e)) => Outcome::Failure(e),
            (Outcome::Failure(e1), Outcome::Failure(e2)) => Outcome::Failure(combine(e1, e2)),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<V, E> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(e) => Err(e),
        }
    }

    /// Returns the success value, discarding any error.
    pub fn ok(self) -> Option<V> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    /// Returns the error, discarding any success value.
    pub fn failure_value(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    /// Borrows the contents.
    pub fn as_ref(&self) -> Outcome<&V, &E> {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Collects independent outcomes, merging every error with `combine`.
    ///
    /// All outcomes are inspected; a failure does not stop collection.
    pub fn sequence_with<I, F>(outcomes: I, mut combine: F) -> Outcome<Vec<V>, E>
    where
        I: IntoIterator<Item = Outcome<V, E>>,
        F: FnMut(E, E) -> E,
    {
        let mut acc: Outcome<Vec<V>, E> = Outcome::Success(Vec::new());
        for outcome in outcomes {
            acc = match (acc, outcome) {
                (Outcome::Success(mut values), Outcome::Success(v)) => {
                    values.push(v);
                    Outcome::Success(values)
                }
                (Outcome::Success(_), Outcome::Failure(e)) => Outcome::Failure(e),
                (failed @ Outcome::Failure(_), Outcome::Success(_)) => failed,
                (Outcome::Failure(e1), Outcome::Failure(e2)) => Outcome::Failure(combine(e1, e2)),
            };
        }
        acc
    }
}

impl<V, E: Semigroup> Outcome<V, E> {
    /// Pairs two independent outcomes, combining errors through their [`Semigroup`].
    pub fn zip<U>(self, other: Outcome<U, E>) -> Outcome<(V, U), E> {
        self.tuple_with(other, Semigroup::combine)
    }

    /// Collects independent outcomes, combining every error through its [`Semigroup`].
    pub fn sequence<I>(outcomes: I) -> Outcome<Vec<V>, E>
    where
        I: IntoIterator<Item = Outcome<V, E>>,
    {
        Self::sequence_with(outcomes, Semigroup::combine)
    }

    /// Maps every input to an outcome and collects them, combining every error.
    pub fn traverse<T, I, F>(inputs: I, f: F) -> Outcome<Vec<V>, E>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Outcome<V, E>,
    {
        Self::sequence(inputs.into_iter().map(f))
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Result<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        outcome.into_result()
    }
}

impl<V, E> From<Validation<V, E>> for Outcome<V, E> {
    fn from(validation: Validation<V, E>) -> Self {
        match validation {
            Validation::Success(v) => Outcome::Success(v),
            Validation::Failure(e) => Outcome::Failure(e),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Validation<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        match outcome {
            Outcome::Success(v) => Validation::Success(v),
            Outcome::Failure(e) => Validation::Failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Out = Outcome<i32, Vec<String>>;

    fn fail(msg: &str) -> Out {
        Outcome::failure(vec![msg.to_string()])
    }

    fn concat(mut l: Vec<String>, r: Vec<String>) -> Vec<String> {
        l.extend(r);
        l
    }

    #[test]
    fn test_left_identity() {
        let f = |x: i32| -> Out { Outcome::success(x * 2) };
        assert_eq!(Out::success(21).and_then(f), f(21));
    }

    #[test]
    fn test_right_identity() {
        let m = Out::success(7);
        assert_eq!(m.clone().and_then(Outcome::success), m);

        let m = fail("boom");
        assert_eq!(m.clone().and_then(Outcome::success), m);
    }

    #[test]
    fn test_associativity() {
        let f = |x: i32| -> Out { Outcome::success(x + 1) };
        let g = |x: i32| -> Out {
            if x > 10 {
                fail("too big")
            } else {
                Outcome::success(x * 3)
            }
        };

        for start in [1, 10, 11] {
            let m = Out::success(start);
            let left = m.clone().and_then(f).and_then(g);
            let right = m.and_then(|x| f(x).and_then(g));
            assert_eq!(left, right);
        }
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut called = false;
        let result = fail("first").and_then(|x| {
            called = true;
            Out::success(x)
        });
        assert!(!called);
        assert_eq!(result, fail("first"));
    }

    #[test]
    fn test_map_failure_leaves_success_alone() {
        let result = Out::success(3).map_failure(|e| e.len());
        assert_eq!(result, Outcome::Success(3));

        let result = fail("x").map_failure(|e| e.len());
        assert_eq!(result, Outcome::Failure(1));
    }

    #[test]
    fn test_tuple_left_error_wins() {
        let result = fail("left").tuple(fail("right"));
        assert_eq!(result.failure_value(), Some(vec!["left".to_string()]));
    }

    #[test]
    fn test_tuple_with_merges_in_order() {
        let result = fail("left").tuple_with(fail("right"), concat);
        assert_eq!(
            result.failure_value(),
            Some(vec!["left".to_string(), "right".to_string()])
        );
    }

    #[test]
    fn test_tuple_single_failure_propagates() {
        assert_eq!(
            Out::success(1).tuple(fail("right")).failure_value(),
            Some(vec!["right".to_string()])
        );
        assert_eq!(
            fail("left").tuple(Out::success(1)).failure_value(),
            Some(vec!["left".to_string()])
        );
    }

    #[test]
    fn test_tuple_pairs_values() {
        let result = Out::success(1).tuple(Outcome::<&str, Vec<String>>::success("a"));
        assert_eq!(result, Outcome::Success((1, "a")));
    }

    #[test]
    fn test_sequence_with_collects_every_error() {
        let outcomes = vec![Out::success(1), fail("a"), Out::success(3), fail("b")];
        let result = Outcome::sequence_with(outcomes, concat);
        assert_eq!(
            result.failure_value(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_sequence_with_keeps_order() {
        let outcomes = (1..=4).map(Out::success);
        assert_eq!(
            Outcome::sequence_with(outcomes, concat),
            Outcome::Success(vec![1, 2, 3, 4])
        );
    }

    #[test]
    fn test_sequence_handles_long_inputs() {
        let outcomes = (0..100_000).map(Out::success);
        let result = Outcome::sequence_with(outcomes, concat);
        assert_eq!(result.ok().map(|v| v.len()), Some(100_000));
    }

    #[test]
    fn test_result_round_trip() {
        let outcome: Outcome<i32, String> = Ok(5).into();
        assert_eq!(outcome.into_result(), Ok(5));

        let outcome: Outcome<i32, String> = Err("nope".to_string()).into();
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_validation_conversion() {
        let validation: Validation<i32, String> = Outcome::Success(1).into();
        assert!(validation.is_success());

        let outcome: Outcome<i32, String> = Validation::Failure("bad".to_string()).into();
        assert_eq!(outcome, Outcome::Failure("bad".to_string()));
    }

    #[test]
    fn test_fold() {
        assert_eq!(Out::success(2).fold(|v| v * 10, |_| 0), 20);
        assert_eq!(fail("x").fold(|v| v * 10, |_| -1), -1);
    }
}
