//! Fixed-arity independent combination.
//!
//! Every parser runs on the same input. Errors are reported in argument order.

use super::Parser;

/// Pairs two parsers. Same as [`Parser::tuple`].
pub fn zip2<A, B, N>(a: Parser<A, N>, b: Parser<B, N>) -> Parser<(A, B), N>
where
    A: 'static,
    B: 'static,
    N: 'static,
{
    a.tuple(b)
}

/// Combines three parsers into a triple.
///
/// # Example
///
/// ```rust
/// use biopsy::{zip3, JsonNavigator, Parser};
/// use serde_json::json;
///
/// let point = zip3(
///     Parser::float().field("x"),
///     Parser::float().field("y"),
///     Parser::float().field("z"),
/// );
///
/// let errors = point
///     .run(&JsonNavigator, Some(&json!({"x": 1.0, "y": "up"})))
///     .failure_value()
///     .unwrap();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn zip3<A, B, C, N>(a: Parser<A, N>, b: Parser<B, N>, c: Parser<C, N>) -> Parser<(A, B, C), N>
where
    A: 'static,
    B: 'static,
    C: 'static,
    N: 'static,
{
    a.apply(zip2(b, c), |a, (b, c)| (a, b, c))
}

/// Combines four parsers into a 4-tuple. See [`zip3`].
pub fn zip4<A, B, C, D, N>(
    a: Parser<A, N>,
    b: Parser<B, N>,
    c: Parser<C, N>,
    d: Parser<D, N>,
) -> Parser<(A, B, C, D), N>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    N: 'static,
{
    a.apply(zip3(b, c, d), |a, (b, c, d)| (a, b, c, d))
}

/// Combines five parsers into a 5-tuple. See [`zip3`].
pub fn zip5<A, B, C, D, E, N>(
    a: Parser<A, N>,
    b: Parser<B, N>,
    c: Parser<C, N>,
    d: Parser<D, N>,
    e: Parser<E, N>,
) -> Parser<(A, B, C, D, E), N>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    N: 'static,
{
    a.apply(zip4(b, c, d, e), |a, (b, c, d, e)| (a, b, c, d, e))
}

/// Combines six parsers into a 6-tuple. See [`zip3`].
pub fn zip6<A, B, C, D, E, F, N>(
    a: Parser<A, N>,
    b: Parser<B, N>,
    c: Parser<C, N>,
    d: Parser<D, N>,
    e: Parser<E, N>,
    f: Parser<F, N>,
) -> Parser<(A, B, C, D, E, F), N>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    F: 'static,
    N: 'static,
{
    a.apply(zip5(b, c, d, e, f), |a, (b, c, d, e, f)| (a, b, c, d, e, f))
}

/// Combines seven parsers into a 7-tuple. See [`zip3`].
pub fn zip7<A, B, C, D, E, F, G, N>(
    a: Parser<A, N>,
    b: Parser<B, N>,
    c: Parser<C, N>,
    d: Parser<D, N>,
    e: Parser<E, N>,
    f: Parser<F, N>,
    g: Parser<G, N>,
) -> Parser<(A, B, C, D, E, F, G), N>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    F: 'static,
    G: 'static,
    N: 'static,
{
    a.apply(zip6(b, c, d, e, f, g), |a, (b, c, d, e, f, g)| {
        (a, b, c, d, e, f, g)
    })
}
