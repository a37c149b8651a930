//! Path resolution for path-scoped parsers.

use tracing::trace;

use crate::error::{ParseError, ParseErrors};
use crate::navigator::Navigator;
use crate::outcome::Outcome;
use crate::path::{Cursor, PathSegment};
use crate::ParseResult;

use super::Parser;

/// Walks `cursor` from its first segment, starting at `input`.
///
/// - Absence propagates: once nothing is found, later segments see nothing.
/// - A node that cannot be looked into is treated as absent.
/// - A missing child before the last segment fails with the visited path.
/// - A missing final child resolves to `None` for the scoped parser to judge.
///
/// Errors are named after `owner`, the parser being scoped.
pub(super) fn navigate<'n, A, N>(
    nav: &dyn Navigator<Node = N>,
    cursor: &Cursor<PathSegment>,
    owner: &Parser<A, N>,
    input: Option<&'n N>,
) -> ParseResult<Option<&'n N>> {
    cursor.fold(Outcome::Success(input), |acc, position| {
        acc.and_then(|current| step(nav, position, owner, current))
    })
}

fn step<'n, A, N>(
    nav: &dyn Navigator<Node = N>,
    position: &Cursor<PathSegment>,
    owner: &Parser<A, N>,
    current: Option<&'n N>,
) -> ParseResult<Option<&'n N>> {
    let Some(node) = current else {
        return Outcome::Success(None);
    };

    let lookup = match position.focus() {
        PathSegment::Key(name) => nav.prop(node, name),
        PathSegment::Index(index) => nav.index(node, *index),
    };

    match lookup {
        Outcome::Failure(_) => Outcome::Success(None),
        Outcome::Success(Some(child)) => Outcome::Success(Some(child)),
        Outcome::Success(None) if position.is_last() => Outcome::Success(None),
        Outcome::Success(None) => {
            let mut path: Vec<String> = position.visited().iter().map(ToString::to_string).collect();
            path.push(position.focus().to_string());

            let message = match position.focus() {
                PathSegment::Key(name) => format!("Missing property {}", name),
                PathSegment::Index(index) => format!("Missing index {}", index),
            };
            trace!(path = %path.join("."), "missing link in path");

            Outcome::Failure(ParseErrors::single(ParseError::at(
                message,
                owner.name(),
                nav.clone_node(node),
                path,
            )))
        }
    }
}
