//! Pluggable access to the tree being parsed.
//!
//! Parsers never look at a concrete tree type directly. Every inspection goes
//! through a [`Navigator`], so any host representation can be parsed by
//! implementing its handful of operations. [`JsonNavigator`] covers
//! `serde_json::Value`.

use std::borrow::Cow;

use serde_json::Value;

use crate::outcome::Outcome;

/// Field/index lookup, unboxing and snapshotting over a tree representation.
///
/// Lookups distinguish three situations:
/// - `Success(Some(child))`: the child exists and is not null,
/// - `Success(None)`: the node has the right shape but the child is absent or null,
/// - `Failure(node)`: the node does not have the right shape at all.
///
/// Children are borrowed from their parent, so walking a tree never copies it.
/// Only [`Navigator::clone_node`] copies, to capture a diagnostic snapshot.
///
/// # Example
///
/// ```rust
/// use biopsy::{JsonNavigator, Navigator, Outcome};
/// use serde_json::json;
///
/// let nav = JsonNavigator;
/// let tree = json!({"a": 1, "b": null});
///
/// assert_eq!(nav.prop(&tree, "a"), Outcome::Success(Some(&json!(1))));
/// assert_eq!(nav.prop(&tree, "b"), Outcome::Success(None));
/// assert!(nav.prop(&json!(5), "a").is_failure());
/// ```
pub trait Navigator {
    /// The node type of the tree.
    type Node;

    /// Looks up a named field.
    fn prop<'n>(&self, node: &'n Self::Node, name: &str)
        -> Outcome<Option<&'n Self::Node>, &'n Self::Node>;

    /// Looks up an array element.
    fn index<'n>(&self, node: &'n Self::Node, index: usize)
        -> Outcome<Option<&'n Self::Node>, &'n Self::Node>;

    /// Lists the elements of an array node; absent (null) elements are `None`.
    fn items<'n>(&self, node: &'n Self::Node) -> Outcome<Vec<Option<&'n Self::Node>>, &'n Self::Node>;

    /// Resolves a possibly wrapped node to a plain value for leaf decoders.
    fn unbox<'n>(&self, node: &'n Self::Node) -> Outcome<Option<Cow<'n, Value>>, &'n Self::Node>;

    /// Produces a detached snapshot of a node for diagnostics.
    fn clone_node(&self, node: &Self::Node) -> Value;
}

/// Navigator over `serde_json::Value`.
///
/// `null` is treated as absence everywhere: a null field, a null array
/// element, or a null node being unboxed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonNavigator;

impl Navigator for JsonNavigator {
    type Node = Value;

    fn prop<'n>(&self, node: &'n Value, name: &str) -> Outcome<Option<&'n Value>, &'n Value> {
        match node {
            Value::Object(map) => Outcome::Success(map.get(name).filter(|v| !v.is_null())),
            other => Outcome::Failure(other),
        }
    }

    fn index<'n>(&self, node: &'n Value, index: usize) -> Outcome<Option<&'n Value>, &'n Value> {
        match node {
            Value::Array(items) => Outcome::Success(items.get(index).filter(|v| !v.is_null())),
            other => Outcome::Failure(other),
        }
    }

    fn items<'n>(&self, node: &'n Value) -> Outcome<Vec<Option<&'n Value>>, &'n Value> {
        match node {
            Value::Array(items) => Outcome::Success(
                items
                    .iter()
                    .map(|v| if v.is_null() { None } else { Some(v) })
                    .collect(),
            ),
            other => Outcome::Failure(other),
        }
    }

    fn unbox<'n>(&self, node: &'n Value) -> Outcome<Option<Cow<'n, Value>>, &'n Value> {
        if node.is_null() {
            Outcome::Success(None)
        } else {
            Outcome::Success(Some(Cow::Borrowed(node)))
        }
    }

    fn clone_node(&self, node: &Value) -> Value {
        node.clone()
    }
}
