//! Leaf parsers for the common scalar shapes.
//!
//! Every leaf here is an ordinary [`Parser::value`] decoder. They report
//! `Null or missing value` when nothing is there and `Type mismatch` when the
//! value has the wrong shape, with `expected` set to the leaf's name.
//!
//! Leaves only look at the unboxed plain value, so they work with any
//! navigator, whatever its node type.
//!
//! # Example
//!
//! ```rust
//! use biopsy::{zip3, JsonNavigator, Parser};
//! use serde_json::json;
//!
//! let parser = zip3(
//!     Parser::string().field("name"),
//!     Parser::int_flex().field("age"),
//!     Parser::boolean().field("admin"),
//! );
//!
//! let input = json!({"name": "Ada", "age": "36", "admin": "TRUE"});
//! let result = parser.run(&JsonNavigator, Some(&input));
//! assert_eq!(result.ok(), Some(("Ada".to_string(), 36, true)));
//! ```

mod boolean;
mod date;
mod numeric;
mod string;

pub use date::DateOptions;

use serde_json::Value;

use crate::error::{ParseError, ParseErrors};
use crate::option::OptionExt;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::ParseResult;

impl<A: 'static, N: 'static> Parser<A, N> {
    /// A leaf that accepts any present value `extract` can convert.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::{json, Value};
    ///
    /// let small = Parser::typed("u8", |v: &Value| v.as_u64().and_then(|n| u8::try_from(n).ok()));
    ///
    /// assert_eq!(small.run(&JsonNavigator, Some(&json!(200))).ok(), Some(200));
    ///
    /// let errors = small.run(&JsonNavigator, Some(&json!(300))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "Type mismatch");
    /// assert_eq!(errors.first().expected, "u8");
    /// ```
    pub fn typed<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&Value) -> Option<A> + Send + Sync + 'static,
    {
        let name = name.into();
        Self::value(name.clone(), move |input| {
            not_null(&name, input).and_then(|v| match extract(v) {
                Some(a) => Outcome::Success(a),
                None => mismatch("Type mismatch", &name, v),
            })
        })
    }
}

impl<N: 'static> Parser<Vec<Value>, N> {
    /// A leaf that accepts any array and returns its raw elements.
    ///
    /// A non-array value fails with `Type mismatch`, expecting `<name>[]`.
    pub fn array_of_values(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::value(name.clone(), move |input| {
            not_null(&name, input).and_then(|v| match v {
                Value::Array(items) => Outcome::Success(items.clone()),
                other => mismatch("Type mismatch", &format!("{}[]", name), other),
            })
        })
    }
}

/// Fails with `Null or missing value` on absence.
pub(crate) fn not_null<'v>(name: &str, input: Option<&'v Value>) -> ParseResult<&'v Value> {
    input.to_outcome_with(|| {
        ParseErrors::single(ParseError::new("Null or missing value", name, Value::Null))
    })
}

/// A single-error failure capturing `actual`.
pub(crate) fn mismatch<T>(message: &str, expected: &str, actual: &Value) -> ParseResult<T> {
    Outcome::Failure(ParseErrors::single(ParseError::new(
        message,
        expected,
        actual.clone(),
    )))
}
