//! String leaves.

use regex::Regex;
use serde_json::Value;

use crate::parser::Parser;

impl<N: 'static> Parser<String, N> {
    /// A JSON string.
    pub fn string() -> Self {
        Self::string_named("string")
    }

    /// Like [`Parser::string`], reporting `name` as the expected shape.
    pub fn string_named(name: impl Into<String>) -> Self {
        Self::typed(name, |v: &Value| v.as_str().map(str::to_owned))
    }

    /// A string that is not empty, optionally after trimming whitespace.
    ///
    /// When `trim` is set the trimmed string is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::non_empty_string(true);
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!("  hi "))).ok(), Some("hi".to_string()));
    ///
    /// let errors = parser.run(&JsonNavigator, Some(&json!("   "))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "String must be non-empty");
    /// ```
    pub fn non_empty_string(trim: bool) -> Self {
        Self::string_named("nonEmptyString")
            .map(move |s| if trim { s.trim().to_string() } else { s })
            .filter(|s| {
                if s.is_empty() {
                    vec!["String must be non-empty".to_string()]
                } else {
                    Vec::new()
                }
            })
    }

    /// A string matching the regular expression `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let code = Parser::pattern(r"^[A-Z]{3}$").unwrap();
    /// assert!(code.run(&JsonNavigator, Some(&json!("EUR"))).is_success());
    ///
    /// let errors = code.run(&JsonNavigator, Some(&json!("euro"))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "String does not match pattern ^[A-Z]{3}$");
    ///
    /// let invalid: Result<Parser<String>, _> = Parser::pattern("(");
    /// assert!(invalid.is_err());
    /// ```
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let message = format!("String does not match pattern {}", pattern);
        Ok(Self::string_named("pattern").filter(move |s| {
            if regex.is_match(s) {
                Vec::new()
            } else {
                vec![message.clone()]
            }
        }))
    }
}
