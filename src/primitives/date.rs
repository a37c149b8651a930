//! Timestamp leaf accepting ISO-8601 strings and numeric epochs.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::ParseResult;

use super::{mismatch, not_null};

const NAME: &str = "DateTimeOffset";
const EXPECTED: &str = "Date";

/// How [`Parser::date_time_flex`] reads numeric epochs.
///
/// # Example
///
/// ```rust
/// use biopsy::DateOptions;
///
/// let options = DateOptions::default();
/// assert!(options.epoch_is_milliseconds);
///
/// let options = DateOptions::seconds();
/// assert!(!options.epoch_is_milliseconds);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOptions {
    /// Epochs count milliseconds when set, seconds otherwise.
    pub epoch_is_milliseconds: bool,
}

impl DateOptions {
    /// Epochs in milliseconds.
    pub fn milliseconds() -> Self {
        Self {
            epoch_is_milliseconds: true,
        }
    }

    /// Epochs in seconds.
    pub fn seconds() -> Self {
        Self {
            epoch_is_milliseconds: false,
        }
    }

    fn scale(&self) -> i64 {
        if self.epoch_is_milliseconds {
            1
        } else {
            1000
        }
    }

    fn scale_f64(&self) -> f64 {
        self.scale() as f64
    }
}

impl Default for DateOptions {
    fn default() -> Self {
        Self::milliseconds()
    }
}

impl<N: 'static> Parser<DateTime<Utc>, N> {
    /// A point in time.
    ///
    /// Accepts an RFC 3339 string, a `YYYY-MM-DD` date (midnight UTC), a
    /// string of digits holding an epoch, or any JSON number as an epoch.
    /// `options` says whether epochs count milliseconds or seconds; fractional
    /// epochs are rounded to the nearest millisecond.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{DateOptions, JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::date_time_flex(DateOptions::default());
    ///
    /// let from_epoch = parser.run(&JsonNavigator, Some(&json!("1762912054467"))).ok().unwrap();
    /// let from_text = parser
    ///     .run(&JsonNavigator, Some(&json!("2025-11-12T01:47:34.467Z")))
    ///     .ok()
    ///     .unwrap();
    /// assert_eq!(from_epoch, from_text);
    /// ```
    pub fn date_time_flex(options: DateOptions) -> Self {
        Self::value(NAME, move |input| {
            not_null(NAME, input).and_then(|v| decode(v, options))
        })
    }
}

fn decode(v: &Value, options: DateOptions) -> ParseResult<DateTime<Utc>> {
    match v {
        Value::String(s) => {
            let s = s.trim();
            let parsed = match s.parse::<i64>() {
                Ok(epoch) => from_epoch(epoch, options),
                Err(_) => parse_iso(s),
            };
            match parsed {
                Some(d) => Outcome::Success(d),
                None => mismatch("Invalid timestamp (expected ISO-8601 Roundtrip)", EXPECTED, v),
            }
        }
        Value::Number(n) => {
            let parsed = match n.as_i64() {
                Some(epoch) => from_epoch(epoch, options),
                None => n.as_f64().and_then(|epoch| from_float_epoch(epoch, options)),
            };
            match parsed {
                Some(d) => Outcome::Success(d),
                None => mismatch("Invalid timestamp: non-finite number", EXPECTED, v),
            }
        }
        other => mismatch("Invalid timestamp: non-finite number", EXPECTED, other),
    }
}

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}

fn from_epoch(epoch: i64, options: DateOptions) -> Option<DateTime<Utc>> {
    epoch
        .checked_mul(options.scale())
        .and_then(DateTime::from_timestamp_millis)
}

// `as` saturates, and chrono rejects anything that far out.
fn from_float_epoch(epoch: f64, options: DateOptions) -> Option<DateTime<Utc>> {
    let millis = (epoch * options.scale_f64()).round();
    if millis.is_finite() {
        DateTime::from_timestamp_millis(millis as i64)
    } else {
        None
    }
}
