//! Type-erased evaluation steps for variants that change the output type.
//!
//! Each struct here backs exactly one [`Kind`](super::Kind) variant. They hide
//! the inner parser's output type behind the [`Step`] trait so the variant set
//! stays a closed enum over `A` alone.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{ParseError, ParseErrors};
use crate::navigator::Navigator;
use crate::outcome::Outcome;
use crate::path::PathSegment;
use crate::ParseResult;

use super::{unbox_error, Parser};

/// A variant whose inner output type has been erased.
pub(super) trait Step<A, N>: Send + Sync {
    fn name(&self) -> String;

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<A>;
}

type MapFn<X, A> = Arc<dyn Fn(X) -> A + Send + Sync>;
type BindFn<X, A, N> = Arc<dyn Fn(X) -> Parser<A, N> + Send + Sync>;
type ApplyFn<X, Y, A> = Arc<dyn Fn(X, Y) -> A + Send + Sync>;
type CheckFn<X, A> = Arc<dyn Fn(X) -> ParseResult<A> + Send + Sync>;

pub(super) struct MapStep<X, A, N> {
    inner: Parser<X, N>,
    f: MapFn<X, A>,
}

impl<X, A, N> MapStep<X, A, N> {
    pub(super) fn new(inner: Parser<X, N>, f: impl Fn(X) -> A + Send + Sync + 'static) -> Self {
        Self {
            inner,
            f: Arc::new(f),
        }
    }
}

impl<X, A, N> Step<A, N> for MapStep<X, A, N> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<A> {
        self.inner.eval(nav, input).map(|x| (self.f)(x))
    }
}

/// Dependent step: the continuation's parser sees the original input.
pub(super) struct BindStep<X, A, N> {
    inner: Parser<X, N>,
    f: BindFn<X, A, N>,
}

impl<X, A, N> BindStep<X, A, N> {
    pub(super) fn new(
        inner: Parser<X, N>,
        f: impl Fn(X) -> Parser<A, N> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            f: Arc::new(f),
        }
    }
}

impl<X, A, N> Step<A, N> for BindStep<X, A, N> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<A> {
        self.inner
            .eval(nav, input)
            .and_then(|x| (self.f)(x).eval(nav, input))
    }
}

/// Independent step: both sides run, errors are concatenated left then right.
pub(super) struct ApplyStep<X, Y, A, N> {
    left: Parser<X, N>,
    right: Parser<Y, N>,
    f: ApplyFn<X, Y, A>,
}

impl<X, Y, A, N> ApplyStep<X, Y, A, N> {
    pub(super) fn new(
        left: Parser<X, N>,
        right: Parser<Y, N>,
        f: impl Fn(X, Y) -> A + Send + Sync + 'static,
    ) -> Self {
        Self {
            left,
            right,
            f: Arc::new(f),
        }
    }
}

impl<X, Y, A, N> Step<A, N> for ApplyStep<X, Y, A, N> {
    fn name(&self) -> String {
        format!("{} -> {}", self.left.name(), self.right.name())
    }

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<A> {
        let left = self.left.eval(nav, input);
        let right = self.right.eval(nav, input);
        left.zip(right).map(|(x, y)| (self.f)(x, y))
    }
}

/// Runs the inner parser, then a check that may reject or re-decode the value.
pub(super) struct TransformStep<X, A, N> {
    inner: Parser<X, N>,
    check: CheckFn<X, A>,
}

impl<X, A, N> TransformStep<X, A, N> {
    pub(super) fn new(
        inner: Parser<X, N>,
        check: impl Fn(X) -> ParseResult<A> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            check: Arc::new(check),
        }
    }
}

impl<X, A, N> Step<A, N> for TransformStep<X, A, N> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<A> {
        self.inner.eval(nav, input).and_then(|x| (self.check)(x))
    }
}

/// Decodes every element of an array node, keeping every element's errors.
pub(super) struct SeqStep<X, N> {
    inner: Parser<X, N>,
}

impl<X, N> SeqStep<X, N> {
    pub(super) fn new(inner: Parser<X, N>) -> Self {
        Self { inner }
    }
}

impl<X, N> Step<Vec<X>, N> for SeqStep<X, N> {
    fn name(&self) -> String {
        format!("{}[]", self.inner.name())
    }

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<Vec<X>> {
        let Some(node) = input else {
            return Outcome::Failure(ParseErrors::single(ParseError::new(
                "Null or missing value",
                self.name(),
                Value::Null,
            )));
        };

        match nav.items(node) {
            Outcome::Failure(raw) => Outcome::Failure(ParseErrors::single(ParseError::new(
                "Type mismatch",
                self.name(),
                nav.clone_node(raw),
            ))),
            Outcome::Success(elements) => {
                Outcome::traverse(elements.into_iter().enumerate(), |(index, element)| {
                    let prefix = [PathSegment::Index(index).to_string()];
                    self.inner
                        .eval(nav, element)
                        .map_failure(|errors| errors.with_prefix(&prefix))
                })
            }
        }
    }
}

/// Accepts absence, otherwise runs the inner parser and wraps its value.
pub(super) struct OptionalStep<X, N> {
    inner: Parser<X, N>,
}

impl<X, N> OptionalStep<X, N> {
    pub(super) fn new(inner: Parser<X, N>) -> Self {
        Self { inner }
    }
}

impl<X, N> Step<Option<X>, N> for OptionalStep<X, N> {
    fn name(&self) -> String {
        format!("Maybe({})", self.inner.name())
    }

    fn eval(&self, nav: &dyn Navigator<Node = N>, input: Option<&N>) -> ParseResult<Option<X>> {
        let Some(node) = input else {
            return Outcome::Success(None);
        };

        match nav.unbox(node) {
            Outcome::Failure(raw) => {
                Outcome::Failure(unbox_error(&self.name(), nav.clone_node(raw)))
            }
            Outcome::Success(None) => Outcome::Success(None),
            Outcome::Success(Some(_)) => self.inner.eval(nav, Some(node)).map(Some),
        }
    }
}
