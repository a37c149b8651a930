//! Parse error types.
//!
//! This module provides [`ParseError`] for single failures, [`ParseErrors`]
//! for accumulating multiple failures, and [`FormattedError`], the flat record
//! handed to reporting code.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use stillwater::prelude::*;

/// A single parse failure with full context.
///
/// `ParseError` captures all relevant information about a failure:
/// - **message**: Human-readable description of the failure
/// - **expected**: Name of the expectation that was not met (usually a parser name)
/// - **actual**: Snapshot of the offending value, `null` when nothing was there
/// - **path**: Labels of the segments leading to the failing location
///
/// # Example
///
/// ```rust
/// use biopsy::ParseError;
/// use serde_json::json;
///
/// let error = ParseError::new("Type mismatch", "int", json!("abc"))
///     .with_prefix(&["user".to_string(), "age".to_string()]);
///
/// assert_eq!(error.path, vec!["user", "age"]);
/// assert_eq!(error.format().path, "user.age");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}: {message} (expected: {expected})", display_path(.path))]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Name of the expectation that was not met.
    pub expected: String,
    /// Snapshot of the value that failed.
    pub actual: Value,
    /// Segment labels from the root of the parsed tree to the failure.
    pub path: Vec<String>,
}

impl ParseError {
    /// Creates an error located at the root of the parsed value.
    pub fn new(message: impl Into<String>, expected: impl Into<String>, actual: Value) -> Self {
        Self {
            message: message.into(),
            expected: expected.into(),
            actual,
            path: Vec::new(),
        }
    }

    /// Creates an error located at `path`.
    pub fn at(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: Value,
        path: Vec<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: expected.into(),
            actual,
            path,
        }
    }

    /// Returns a copy with `prefix` prepended to the path.
    pub fn with_prefix(&self, prefix: &[String]) -> Self {
        let mut path = Vec::with_capacity(prefix.len() + self.path.len());
        path.extend_from_slice(prefix);
        path.extend_from_slice(&self.path);
        Self {
            path,
            ..self.clone()
        }
    }

    /// Returns the path joined with `.`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    /// Projects the error to a flat reporting record.
    pub fn format(&self) -> FormattedError {
        FormattedError {
            message: self.message.clone(),
            expected: self.expected.clone(),
            actual: self.actual.clone(),
            path: self.dotted_path(),
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    }
}

// ParseError only holds owned data; keep it that way so errors can cross threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ParseError>();
    assert_sync::<ParseError>();
};

/// A flat, serializable projection of a [`ParseError`].
///
/// The path is a single dotted string such as `items.[2].name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedError {
    /// What went wrong.
    pub message: String,
    /// Name of the parser that rejected the value.
    pub expected: String,
    /// Snapshot of the offending value, `null` when absent.
    pub actual: Value,
    /// Dotted path to the value, empty at the root.
    pub path: String,
}

impl Display for FormattedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(f, "{}: {} (expected: {})", path, self.message, self.expected)
    }
}

/// A non-empty collection of parse errors.
///
/// `ParseErrors` wraps a `NonEmptyVec<ParseError>` so that a failed
/// [`Outcome`](crate::Outcome) always explains itself with at least one error.
/// Errors are kept in the order they were discovered.
///
/// # Combining Errors
///
/// `ParseErrors` implements `Semigroup`; combining concatenates, left first:
///
/// ```rust
/// use biopsy::{ParseError, ParseErrors};
/// use serde_json::Value;
/// use stillwater::prelude::*;
///
/// let left = ParseErrors::single(ParseError::new("required", "name", Value::Null));
/// let right = ParseErrors::single(ParseError::new("invalid", "email", Value::Null));
///
/// let combined = left.combine(right);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().message, "required");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrors(NonEmptyVec<ParseError>);

impl ParseErrors {
    /// Creates a `ParseErrors` containing a single error.
    pub fn single(error: ParseError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ParseErrors` from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<ParseError>) -> Self {
        Self(errors)
    }

    /// Creates a `ParseErrors` from a `Vec`, or `None` if it is empty.
    pub fn try_from_vec(errors: Vec<ParseError>) -> Option<Self> {
        let mut iter = errors.into_iter();
        let head = iter.next()?;
        Some(iter.fold(Self::single(head), |acc, error| {
            acc.combine(Self::single(error))
        }))
    }

    /// Creates a `ParseErrors` from a `Vec<ParseError>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(errors: Vec<ParseError>) -> Self {
        Self::try_from_vec(errors).expect("ParseErrors requires at least one error")
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ParseError {
        self.0.head()
    }

    /// Returns all errors whose path is exactly `path`.
    pub fn at_path(&self, path: &[&str]) -> Vec<&ParseError> {
        self.0
            .iter()
            .filter(|e| e.path.iter().map(String::as_str).eq(path.iter().copied()))
            .collect()
    }

    /// Groups errors by dotted path, in order of first appearance.
    pub fn by_path(&self) -> IndexMap<String, Vec<&ParseError>> {
        let mut groups: IndexMap<String, Vec<&ParseError>> = IndexMap::new();
        for error in self.0.iter() {
            groups.entry(error.dotted_path()).or_default().push(error);
        }
        groups
    }

    /// Returns a copy with `prefix` prepended to every error's path.
    pub fn with_prefix(self, prefix: &[String]) -> Self {
        if prefix.is_empty() {
            return self;
        }
        Self::from_vec(self.0.iter().map(|e| e.with_prefix(prefix)).collect())
    }

    /// Projects every error to a flat reporting record.
    pub fn format(&self) -> Vec<FormattedError> {
        self.0.iter().map(ParseError::format).collect()
    }

    /// Converts this collection into a `Vec<ParseError>`.
    pub fn into_vec(self) -> Vec<ParseError> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<ParseError> {
        &self.0
    }
}

impl Semigroup for ParseErrors {
    fn combine(self, other: Self) -> Self {
        ParseErrors(self.0.combine(other.0))
    }
}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parsing failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = Box<dyn Iterator<Item = &'a ParseError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ParseErrors>();
    assert_sync::<ParseErrors>();
};
