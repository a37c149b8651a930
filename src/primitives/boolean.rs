use serde_json::Value;

use crate::outcome::Outcome;
use crate::parser::Parser;

use super::mismatch;

impl<N: 'static> Parser<bool, N> {
    /// A JSON boolean, or the strings `"true"` / `"false"` in any letter case.
    ///
    /// A string that is neither fails with `Invalid bool`; any other shape
    /// fails with the string fallback's `Type mismatch`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::boolean();
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!(true))).ok(), Some(true));
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!("False"))).ok(), Some(false));
    /// assert!(parser.run(&JsonNavigator, Some(&json!("yes"))).is_failure());
    /// ```
    pub fn boolean() -> Self {
        Self::typed("boolean", Value::as_bool).or_else(
            Parser::string_named("boolFromString").transform("boolFromString", |s: String| {
                if s.eq_ignore_ascii_case("true") {
                    Outcome::Success(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Outcome::Success(false)
                } else {
                    mismatch("Invalid bool", "boolFromString", &Value::String(s))
                }
            }),
        )
    }
}
