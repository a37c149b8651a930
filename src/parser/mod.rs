//! The parser combinator algebra and its evaluator.
//!
//! A [`Parser`] is an immutable description of how to turn a (possibly absent)
//! node into a typed value. Parsers are built declaratively and evaluated later
//! with [`Parser::run`] against any tree reachable through a [`Navigator`].
//!
//! Composition follows two rules:
//!
//! - **independent** combinators ([`Parser::tuple`], [`Parser::apply`],
//!   [`Parser::seq`], [`zip2`] .. [`zip7`]) evaluate every branch and report
//!   every error found,
//! - **dependent** combinators ([`Parser::and_then`], [`Parser::transform`],
//!   [`Parser::filter`], path scoping) stop at the first failing step.
//!
//! [`Parser::or_else`] is the exception: a failed alternative's errors are
//! discarded and only the fallback's outcome is reported.
//!
//! # Example
//!
//! ```rust
//! use biopsy::{zip2, JsonNavigator, Parser};
//! use serde_json::json;
//!
//! let point = zip2(
//!     Parser::int().at("pos", ["x"]),
//!     Parser::int().at("pos", ["y"]),
//! );
//!
//! let result = point.run(&JsonNavigator, Some(&json!({"pos": {"x": 1, "y": 2}})));
//! assert_eq!(result.ok(), Some((1, 2)));
//!
//! // Both coordinates are reported, each with its own path
//! let errors = point
//!     .run(&JsonNavigator, Some(&json!({"pos": {"x": "a", "y": "b"}})))
//!     .failure_value()
//!     .unwrap();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.first().dotted_path(), "pos.x");
//! ```

mod navigate;
mod steps;
mod zip;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{FormattedError, ParseError, ParseErrors};
use crate::navigator::Navigator;
use crate::outcome::Outcome;
use crate::path::{Cursor, PathSegment};
use crate::ParseResult;

use steps::{ApplyStep, BindStep, MapStep, OptionalStep, SeqStep, Step, TransformStep};

pub use zip::{zip2, zip3, zip4, zip5, zip6, zip7};

/// Leaf decoding function: receives the unboxed plain value, or `None` when absent.
pub(crate) type Decoder<A> = Arc<dyn Fn(Option<&Value>) -> ParseResult<A> + Send + Sync>;

/// The closed set of parser variants.
///
/// Variants whose inner parser has a different output type hold a type-erased
/// [`Step`]; the others are evaluated directly in [`Parser::run`].
enum Kind<A, N> {
    Pure {
        name: String,
        make: Arc<dyn Fn() -> A + Send + Sync>,
    },
    Value {
        name: String,
        decode: Decoder<A>,
    },
    Map(Box<dyn Step<A, N>>),
    Bind(Box<dyn Step<A, N>>),
    Apply(Box<dyn Step<A, N>>),
    Transform(Box<dyn Step<A, N>>),
    OrElse(Parser<A, N>, Parser<A, N>),
    Path {
        cursor: Cursor<PathSegment>,
        labels: Vec<String>,
        inner: Parser<A, N>,
    },
    Seq(Box<dyn Step<A, N>>),
    Optional(Box<dyn Step<A, N>>),
    Renamed {
        name: String,
        inner: Parser<A, N>,
    },
    Fail(ParseErrors),
}

/// An immutable, shareable description of how to decode a value of type `A`
/// from a tree whose nodes are of type `N`.
///
/// Cloning a parser is cheap (it is reference counted), and a parser can be
/// evaluated any number of times, from any number of threads.
pub struct Parser<A, N = Value> {
    kind: Arc<Kind<A, N>>,
}

impl<A, N> Clone for Parser<A, N> {
    fn clone(&self) -> Self {
        Self {
            kind: Arc::clone(&self.kind),
        }
    }
}

impl<A, N> fmt::Debug for Parser<A, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").field("name", &self.name()).finish()
    }
}

impl<A, N> Parser<A, N> {
    fn from_kind(kind: Kind<A, N>) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    /// Returns the diagnostic name of this parser.
    ///
    /// The name is used as the `expected` field of errors raised on this
    /// parser's behalf.
    pub fn name(&self) -> String {
        match &*self.kind {
            Kind::Pure { name, .. } | Kind::Value { name, .. } | Kind::Renamed { name, .. } => {
                name.clone()
            }
            Kind::Map(step)
            | Kind::Bind(step)
            | Kind::Apply(step)
            | Kind::Transform(step)
            | Kind::Seq(step)
            | Kind::Optional(step) => step.name(),
            Kind::OrElse(first, second) => format!("{} || {}", first.name(), second.name()),
            Kind::Path { inner, .. } => inner.name(),
            Kind::Fail(_) => "Failure".to_string(),
        }
    }

    /// Evaluates this parser against an optional input node.
    ///
    /// `None` means "nothing there": leaves decide whether that is acceptable,
    /// [`Parser::optional`] turns it into `Success(None)`.
    pub fn run<Nav>(&self, nav: &Nav, input: Option<&N>) -> ParseResult<A>
    where
        Nav: Navigator<Node = N>,
    {
        self.eval(nav, input)
    }

    pub(crate) fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<A> {
        match &*self.kind {
            Kind::Pure { make, .. } => Outcome::Success(make()),
            Kind::Value { name, decode } => match input {
                None => decode(None),
                Some(node) => match nav.unbox(node) {
                    Outcome::Success(plain) => decode(plain.as_deref()),
                    Outcome::Failure(raw) => {
                        Outcome::Failure(unbox_error(name, nav.clone_node(raw)))
                    }
                },
            },
            Kind::Map(step)
            | Kind::Bind(step)
            | Kind::Apply(step)
            | Kind::Transform(step)
            | Kind::Seq(step)
            | Kind::Optional(step) => step.eval(nav, input),
            Kind::OrElse(first, second) => match first.eval(nav, input) {
                Outcome::Success(value) => Outcome::Success(value),
                Outcome::Failure(discarded) => {
                    trace!(
                        parser = %first.name(),
                        discarded = discarded.len(),
                        "alternative failed, trying fallback"
                    );
                    second.eval(nav, input)
                }
            },
            Kind::Path {
                cursor,
                labels,
                inner,
            } => navigate::navigate(nav, cursor, inner, input).and_then(|resolved| {
                inner
                    .eval(nav, resolved)
                    .map_failure(|errors| errors.with_prefix(labels))
            }),
            Kind::Renamed { inner, .. } => inner.eval(nav, input),
            Kind::Fail(errors) => Outcome::Failure(errors.clone()),
        }
    }

    /// Evaluates this parser and flattens every error into a reporting record.
    pub fn parse<Nav>(&self, nav: &Nav, input: Option<&N>) -> Outcome<A, Vec<FormattedError>>
    where
        Nav: Navigator<Node = N>,
    {
        let outcome = self.eval(nav, input);
        match &outcome {
            Outcome::Success(_) => trace!(parser = %self.name(), "parse succeeded"),
            Outcome::Failure(errors) => {
                debug!(parser = %self.name(), errors = errors.len(), "parse failed")
            }
        }
        outcome.map_failure(|errors| errors.format())
    }
}

impl<A: 'static, N: 'static> Parser<A, N> {
    /// A parser that always succeeds with `value`, ignoring its input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::pure(7);
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!("ignored"))).ok(), Some(7));
    /// assert_eq!(parser.run(&JsonNavigator, None).ok(), Some(7));
    /// ```
    pub fn pure(value: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        Self::pure_named("pure", value)
    }

    /// Like [`Parser::pure`], with a diagnostic name.
    pub fn pure_named(name: impl Into<String>, value: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        Self::from_kind(Kind::Pure {
            name: name.into(),
            make: Arc::new(move || value.clone()),
        })
    }

    /// A leaf parser.
    ///
    /// Present inputs are unboxed through the navigator before `decode` sees
    /// them; absent inputs reach `decode` as `None`, so the leaf decides
    /// whether absence is acceptable.
    pub fn value<F>(name: impl Into<String>, decode: F) -> Self
    where
        F: Fn(Option<&Value>) -> ParseResult<A> + Send + Sync + 'static,
    {
        Self::from_kind(Kind::Value {
            name: name.into(),
            decode: Arc::new(decode),
        })
    }

    /// A parser that always fails with a single error carrying `message`.
    ///
    /// Useful as the last branch of an exhaustive match inside
    /// [`Parser::and_then`].
    pub fn fail(message: impl Into<String>) -> Self {
        Self::fail_with(ParseErrors::single(ParseError::new(message, "", Value::Null)))
    }

    /// A parser that always fails with the given errors.
    pub fn fail_with(errors: ParseErrors) -> Self {
        Self::from_kind(Kind::Fail(errors))
    }

    /// Transforms the decoded value. Errors pass through unchanged.
    pub fn map<B, F>(self, f: F) -> Parser<B, N>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Parser::from_kind(Kind::Map(Box::new(MapStep::new(self, f))))
    }

    /// Chooses the next parser from the decoded value.
    ///
    /// Unlike a plain monadic bind, the parser returned by `f` is run against
    /// the **same input** this parser received, not against anything derived
    /// from it. This makes tagged unions straightforward: read a tag, then
    /// parse the rest of the same object accordingly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let shape = Parser::string().field("kind").and_then(|kind| match kind.as_str() {
    ///     "circle" => Parser::float().field("radius").map(|r| r * r * 3.0),
    ///     "square" => Parser::float().field("side").map(|s| s * s),
    ///     _ => Parser::fail("Unknown shape").field("kind"),
    /// });
    ///
    /// let area = shape.run(&JsonNavigator, Some(&json!({"kind": "square", "side": 3})));
    /// assert_eq!(area.ok(), Some(9.0));
    /// ```
    pub fn and_then<B, F>(self, f: F) -> Parser<B, N>
    where
        B: 'static,
        F: Fn(A) -> Parser<B, N> + Send + Sync + 'static,
    {
        Parser::from_kind(Kind::Bind(Box::new(BindStep::new(self, f))))
    }

    /// Runs both parsers on the same input and pairs their values.
    ///
    /// Both sides are always evaluated; when both fail, the errors of `self`
    /// come first, followed by the errors of `other`.
    pub fn tuple<B>(self, other: Parser<B, N>) -> Parser<(A, B), N>
    where
        B: 'static,
    {
        self.apply(other, |a, b| (a, b))
    }

    /// Runs both parsers on the same input and combines their values with `f`.
    pub fn apply<B, C, F>(self, other: Parser<B, N>, f: F) -> Parser<C, N>
    where
        B: 'static,
        C: 'static,
        F: Fn(A, B) -> C + Send + Sync + 'static,
    {
        Parser::from_kind(Kind::Apply(Box::new(ApplyStep::new(self, other, f))))
    }

    /// Rejects decoded values for which `check` returns any messages.
    ///
    /// Each message becomes one error named after this parser, with the
    /// rejected value captured as `actual`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let adult = Parser::int().filter(|age| {
    ///     if *age < 18 { vec!["Too young".to_string()] } else { vec![] }
    /// });
    ///
    /// let errors = adult.run(&JsonNavigator, Some(&json!(12))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "Too young");
    /// assert_eq!(errors.first().actual, json!(12));
    /// ```
    pub fn filter<F>(self, check: F) -> Self
    where
        A: Serialize,
        F: Fn(&A) -> Vec<String> + Send + Sync + 'static,
    {
        self.filter_with(check, |value: &A| {
            serde_json::to_value(value).unwrap_or(Value::Null)
        })
    }

    /// Like [`Parser::filter`] for values that are not `Serialize`.
    ///
    /// `snapshot` renders a rejected value into the `actual` field of each
    /// error; pass `|_| Value::Null` to record nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::{json, Value};
    ///
    /// struct Port(i64);
    ///
    /// let port = Parser::int().map(Port).filter_with(
    ///     |p| if p.0 > 65535 { vec!["Port out of range".to_string()] } else { vec![] },
    ///     |_| Value::Null,
    /// );
    ///
    /// let errors = port.run(&JsonNavigator, Some(&json!(70000))).failure_value().unwrap();
    /// assert_eq!(errors.first().message, "Port out of range");
    /// assert_eq!(errors.first().actual, Value::Null);
    /// ```
    pub fn filter_with<F, S>(self, check: F, snapshot: S) -> Self
    where
        F: Fn(&A) -> Vec<String> + Send + Sync + 'static,
        S: Fn(&A) -> Value + Send + Sync + 'static,
    {
        let name = self.name();
        Self::from_kind(Kind::Transform(Box::new(TransformStep::new(self, move |value: A| {
            let messages = check(&value);
            if messages.is_empty() {
                return Outcome::Success(value);
            }
            let actual = snapshot(&value);
            let errors = messages
                .into_iter()
                .map(|message| ParseError::new(message, name.clone(), actual.clone()))
                .collect();
            Outcome::Failure(ParseErrors::from_vec(errors))
        }))))
    }

    /// Re-decodes the value into a new type, possibly failing.
    ///
    /// The resulting parser is named `name`.
    pub fn transform<B, F>(self, name: impl Into<String>, f: F) -> Parser<B, N>
    where
        B: 'static,
        F: Fn(A) -> ParseResult<B> + Send + Sync + 'static,
    {
        Parser::from_kind(Kind::Transform(Box::new(TransformStep::new(
            self.with_name(name),
            f,
        ))))
    }

    /// Tries `other` on the same input when this parser fails.
    ///
    /// The errors of a failed first alternative are discarded; only the
    /// fallback's errors are reported.
    pub fn or_else(self, other: Parser<A, N>) -> Self {
        Self::from_kind(Kind::OrElse(self, other))
    }

    /// Scopes this parser to the node found at `head` followed by `tail`.
    ///
    /// A missing link before the last segment is an error; absence of the
    /// final segment is handed to this parser as `None`. Errors raised by this
    /// parser are prefixed with the full path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::int().at("a", ["b"]);
    ///
    /// let ok = parser.run(&JsonNavigator, Some(&json!({"a": {"b": 5}})));
    /// assert_eq!(ok.ok(), Some(5));
    ///
    /// let errors = parser
    ///     .run(&JsonNavigator, Some(&json!({"a": {}})))
    ///     .failure_value()
    ///     .unwrap();
    /// assert_eq!(errors.first().path, vec!["a", "b"]);
    /// ```
    pub fn at<S>(self, head: impl Into<PathSegment>, tail: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<PathSegment>,
    {
        self.at_cursor(Cursor::from_cons(
            head.into(),
            tail.into_iter().map(Into::into),
        ))
    }

    /// Scopes this parser to a single segment.
    pub fn field(self, segment: impl Into<PathSegment>) -> Self {
        self.at_cursor(Cursor::from_cons(segment.into(), []))
    }

    /// Scopes this parser to the path described by `cursor`, read from its first segment.
    pub fn at_cursor(self, cursor: Cursor<PathSegment>) -> Self {
        let cursor = cursor.rewind();
        let labels = cursor.labels();
        Self::from_kind(Kind::Path {
            cursor,
            labels,
            inner: self,
        })
    }

    /// Optional access by path.
    ///
    /// Absence at any segment, or a node that cannot be looked into, yields
    /// `Success(None)`. Only a value that is present at the end of the path
    /// and fails this parser produces errors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use biopsy::{JsonNavigator, Parser};
    /// use serde_json::json;
    ///
    /// let parser = Parser::int().maybe_at("x", ["y"]);
    ///
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!({}))).ok(), Some(None));
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!({"x": {}}))).ok(), Some(None));
    /// assert_eq!(parser.run(&JsonNavigator, Some(&json!({"x": {"y": 3}}))).ok(), Some(Some(3)));
    /// assert!(parser.run(&JsonNavigator, Some(&json!({"x": {"y": "no"}}))).is_failure());
    /// ```
    pub fn maybe_at<S>(
        self,
        head: impl Into<PathSegment>,
        tail: impl IntoIterator<Item = S>,
    ) -> Parser<Option<A>, N>
    where
        S: Into<PathSegment>,
    {
        let mut segments: Vec<PathSegment> = vec![head.into()];
        segments.extend(tail.into_iter().map(Into::into));

        segments
            .into_iter()
            .rev()
            .fold(self.optional(), |acc, segment| {
                acc.optional().field(segment).map(Option::flatten)
            })
            .optional()
            .map(Option::flatten)
    }

    /// Decodes every element of an array node with this parser.
    ///
    /// Every element is evaluated; errors of element `i` are prefixed with
    /// `[i]`. A non-array input fails with a `Type mismatch` named `<name>[]`.
    pub fn seq(self) -> Parser<Vec<A>, N> {
        Parser::from_kind(Kind::Seq(Box::new(SeqStep::new(self))))
    }

    /// Accepts absence: `None` input, or a node that unboxes to nothing,
    /// succeeds with `None`.
    pub fn optional(self) -> Parser<Option<A>, N> {
        Parser::from_kind(Kind::Optional(Box::new(OptionalStep::new(self))))
    }

    /// Same behaviour, different diagnostic name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self::from_kind(Kind::Renamed {
            name: name.into(),
            inner: self,
        })
    }
}

pub(crate) fn unbox_error(name: &str, actual: Value) -> ParseErrors {
    ParseErrors::single(ParseError::new("Could not unbox value", name, actual))
}
