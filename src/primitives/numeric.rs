//! Integer and floating point leaves, with string coercions.

use serde_json::{Number, Value};

use crate::outcome::Outcome;
use crate::parser::Parser;

use super::{mismatch, not_null};

/// Largest magnitude an `f64` can hold while still converting exactly to `i64`.
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_807.0;

const OUT_OF_RANGE: &str = "Integer out of range";

impl<N: 'static> Parser<i64, N> {
    /// A JSON number with no fractional part.
    ///
    /// Non-numbers fail with `Type mismatch` and numbers with a fractional
    /// part fail with `Not an integer`. Whole numbers beyond `i64` report
    /// `Integer out of range`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// assert_eq!(Parser::int().run(&JsonNavigator, Some(&json!(42))).ok(), Some(42));
    /// assert_eq!(Parser::int().run(&JsonNavigator, Some(&json!(3.0))).ok(), Some(3));
    ///
    /// let errors = Parser::int().run(&JsonNavigator, Some(&json!(2.5))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "Not an integer");
    /// ```
    pub fn int() -> Self {
        Self::int_named("int")
    }

    /// Like [`Parser::int`], reporting `name` as the expected shape.
    pub fn int_named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::value(name.clone(), move |input| {
            not_null(&name, input).and_then(|v| match v {
                Value::Number(n) => match integral(n) {
                    Ok(i) => Outcome::Success(i),
                    Err(message) => mismatch(message, &name, v),
                },
                other => mismatch("Type mismatch", &name, other),
            })
        })
    }

    /// A string holding an integer, surrounding whitespace ignored.
    pub fn int_from_string() -> Self {
        Parser::string_named("intFromString").transform("intFromString", |s: String| {
            match parse_int(s.trim()) {
                Some(i) => Outcome::Success(i),
                None => mismatch("Invalid int", "intFromString", &Value::String(s)),
            }
        })
    }

    /// [`Parser::int`], falling back to [`Parser::int_from_string`].
    pub fn int_flex() -> Self {
        Self::int().or_else(Self::int_from_string())
    }
}

impl<N: 'static> Parser<f64, N> {
    /// A finite JSON number.
    pub fn float() -> Self {
        Self::value("float", |input| {
            not_null("float", input).and_then(|v| match v.as_f64() {
                Some(f) if f.is_finite() => Outcome::Success(f),
                Some(_) => mismatch("Not a float", "float", v),
                None => mismatch("Type mismatch", "float", v),
            })
        })
    }

    /// A string holding a finite number, surrounding whitespace ignored.
    pub fn float_from_string() -> Self {
        Parser::string_named("floatFromString").transform("floatFromString", |s: String| {
            match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Outcome::Success(f),
                _ => mismatch("Invalid float", "floatFromString", &Value::String(s)),
            }
        })
    }

    /// [`Parser::float`], falling back to [`Parser::float_from_string`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::float_flex();
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!(23))).ok(), Some(23.0));
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!(" 1.5 "))).ok(), Some(1.5));
    ///
    /// // Only the fallback's diagnosis is reported
    /// let errors = parser.run(&JsonNavigator, Some(&json!("abc"))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "Invalid float");
    /// ```
    pub fn float_flex() -> Self {
        Self::float().or_else(Self::float_from_string())
    }

    /// Any number: a JSON number, an integer string or a float string.
    pub fn number() -> Self {
        Self::typed("Number", Value::as_f64)
            .or_else(Parser::int_from_string().map(|i| i as f64))
            .or_else(Self::float_from_string())
    }
}

fn integral(n: &Number) -> Result<i64, &'static str> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(OUT_OF_RANGE);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => exact_int(f).ok_or(OUT_OF_RANGE),
        _ => Err("Not an integer"),
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(exact_int))
}

fn exact_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < I64_FLOAT_LIMIT {
        Some(f as i64)
    } else {
        None
    }
}
