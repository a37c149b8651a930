//! Presence/absence helpers.
//!
//! Absence is modelled with the standard [`Option`]: `map`, `and_then` and
//! `filter` already behave as no-ops on `None`, and a `filter` never turns a
//! value into an error. This module only adds the bridge from "absent" to
//! "failed", used when a required parser finds nothing.

use crate::outcome::Outcome;

/// Extension methods lifting an [`Option`] into an [`Outcome`].
///
/// # Example
///
/// ```rust
/// use biopsy::{OptionExt, Outcome};
///
/// assert_eq!(Some(3).to_outcome("missing"), Outcome::Success(3));
/// assert_eq!(None::<i32>.to_outcome("missing"), Outcome::Failure("missing"));
/// ```
pub trait OptionExt<V> {
    /// `Some(v)` becomes `Success(v)`, `None` becomes `Failure(error)`.
    fn to_outcome<E>(self, error: E) -> Outcome<V, E>;

    /// Like [`OptionExt::to_outcome`], building the error only when needed.
    fn to_outcome_with<E, F>(self, error: F) -> Outcome<V, E>
    where
        F: FnOnce() -> E;
}

impl<V> OptionExt<V> for Option<V> {
    fn to_outcome<E>(self, error: E) -> Outcome<V, E> {
        match self {
            Some(v) => Outcome::Success(v),
            None => Outcome::Failure(error),
        }
    }

    fn to_outcome_with<E, F>(self, error: F) -> Outcome<V, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Some(v) => Outcome::Success(v),
            None => Outcome::Failure(error()),
        }
    }
}
