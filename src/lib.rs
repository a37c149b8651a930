//! # Biopsy
//!
//! Declarative parser combinators for validating tree-shaped data and turning
//! it into typed values, reporting every problem found with the structural
//! path of the offending node.
//!
//! ## Overview
//!
//! A [`Parser`] describes how to decode a value. Parsers for independent
//! fields are combined so that all of them run and all of their errors are
//! reported; dependent steps (decode a tag, then pick what to parse next) stop
//! at the first failure. Optional paths are first-class: absence anywhere
//! along a [`Parser::maybe_at`] path yields `None` rather than an error.
//!
//! Parsers never touch a concrete tree type. Every lookup goes through a
//! [`Navigator`], and [`JsonNavigator`] covers `serde_json::Value`.
//!
//! ## Core Types
//!
//! - [`Outcome`]: success or failure, with aggregating and short-circuiting composition
//! - [`Cursor`] and [`PathSegment`]: a position within a path into a tree
//! - [`Navigator`]: pluggable access to the tree being parsed
//! - [`Parser`]: the combinator algebra and its evaluator
//! - [`ParseError`] / [`ParseErrors`]: a single error with context / a non-empty collection
//!
//! ## Example
//!
//! ```rust
//! use biopsy::{zip3, JsonNavigator, Parser};
//! use serde_json::json;
//!
//! let user = zip3(
//!     Parser::non_empty_string(true).field("name"),
//!     Parser::int().filter(|age| {
//!         if *age < 0 { vec!["Age must be positive".to_string()] } else { vec![] }
//!     })
//!     .field("age"),
//!     Parser::string().maybe_at("contact", ["email"]),
//! );
//!
//! let ok = user.run(&JsonNavigator, Some(&json!({"name": "Ada", "age": 36})));
//! assert_eq!(ok.ok(), Some(("Ada".to_string(), 36, None)));
//!
//! // Every field is checked; both problems are reported
//! let report = user.parse(&JsonNavigator, Some(&json!({"name": " ", "age": -1})));
//! let errors = report.failure_value().unwrap();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors[0].path, "name");
//! assert_eq!(errors[1].message, "Age must be positive");
//! ```

pub mod error;
pub mod navigator;
pub mod option;
pub mod outcome;
pub mod parser;
pub mod path;
pub mod primitives;

pub use error::{FormattedError, ParseError, ParseErrors};
pub use navigator::{JsonNavigator, Navigator};
pub use option::OptionExt;
pub use outcome::Outcome;
pub use parser::{zip2, zip3, zip4, zip5, zip6, zip7, Parser};
pub use path::{Cursor, PathSegment};
pub use primitives::DateOptions;

/// Outcome of evaluating a parser.
pub type ParseResult<T> = Outcome<T, ParseErrors>;
