//! Error types for parse failures.
//!
//! This module provides types for representing validation errors with the
//! structural path of the failing location, the name of the expectation and a
//! snapshot of the offending value.

mod parse_error;

pub use parse_error::{FormattedError, ParseError, ParseErrors};
