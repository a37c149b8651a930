//! Parsing a host tree type through a custom navigator.

use std::borrow::Cow;

use biopsy::{JsonNavigator, Navigator, Outcome, Parser};
use serde_json::{json, Map, Value};

/// A tree with wrapper nodes, standing in for a host representation.
#[derive(Debug, Clone)]
enum Node {
    Leaf(Value),
    Record(Vec<(String, Node)>),
    List(Vec<Node>),
    Boxed(Option<Box<Node>>),
    Opaque,
}

struct TreeNavigator;

impl Navigator for TreeNavigator {
    type Node = Node;

    fn prop<'n>(&self, node: &'n Node, name: &str) -> Outcome<Option<&'n Node>, &'n Node> {
        match node {
            Node::Record(fields) => Outcome::Success(
                fields
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, child)| child),
            ),
            other => Outcome::Failure(other),
        }
    }

    fn index<'n>(&self, node: &'n Node, index: usize) -> Outcome<Option<&'n Node>, &'n Node> {
        match node {
            Node::List(items) => Outcome::Success(items.get(index)),
            other => Outcome::Failure(other),
        }
    }

    fn items<'n>(&self, node: &'n Node) -> Outcome<Vec<Option<&'n Node>>, &'n Node> {
        match node {
            Node::List(items) => Outcome::Success(items.iter().map(Some).collect()),
            other => Outcome::Failure(other),
        }
    }

    fn unbox<'n>(&self, node: &'n Node) -> Outcome<Option<Cow<'n, Value>>, &'n Node> {
        match node {
            Node::Leaf(Value::Null) | Node::Boxed(None) => Outcome::Success(None),
            Node::Leaf(value) => Outcome::Success(Some(Cow::Borrowed(value))),
            Node::Boxed(Some(inner)) => self.unbox(inner),
            Node::Record(_) | Node::List(_) => Outcome::Success(Some(Cow::Owned(self.clone_node(node)))),
            Node::Opaque => Outcome::Failure(node),
        }
    }

    fn clone_node(&self, node: &Node) -> Value {
        match node {
            Node::Leaf(value) => value.clone(),
            Node::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), self.clone_node(child)))
                    .collect::<Map<String, Value>>(),
            ),
            Node::List(items) => Value::Array(items.iter().map(|n| self.clone_node(n)).collect()),
            Node::Boxed(inner) => inner
                .as_deref()
                .map(|n| self.clone_node(n))
                .unwrap_or(Value::Null),
            Node::Opaque => json!("<opaque>"),
        }
    }
}

fn record(fields: Vec<(&str, Node)>) -> Node {
    Node::Record(
        fields
            .into_iter()
            .map(|(key, node)| (key.to_string(), node))
            .collect(),
    )
}

fn leaf(value: Value) -> Node {
    Node::Leaf(value)
}

fn boxed(node: Node) -> Node {
    Node::Boxed(Some(Box::new(node)))
}

#[test]
fn test_boxed_leaf_is_unboxed() {
    let tree = record(vec![("age", boxed(boxed(leaf(json!(30)))))]);
    let parser: Parser<i64, Node> = Parser::int().field("age");
    assert_eq!(parser.run(&TreeNavigator, Some(&tree)).ok(), Some(30));
}

#[test]
fn test_empty_box_is_absent() {
    let tree = record(vec![("age", Node::Boxed(None))]);

    let optional: Parser<Option<i64>, Node> = Parser::int().optional().field("age");
    assert_eq!(optional.run(&TreeNavigator, Some(&tree)).ok(), Some(None));

    let required: Parser<i64, Node> = Parser::int().field("age");
    let errors = required
        .run(&TreeNavigator, Some(&tree))
        .failure_value()
        .unwrap();
    assert_eq!(errors.first().message, "Null or missing value");
    assert_eq!(errors.first().path, vec!["age"]);
}

#[test]
fn test_unbox_failure_in_leaf() {
    let tree = record(vec![("x", Node::Opaque)]);
    let parser: Parser<i64, Node> = Parser::int().field("x");

    let errors = parser
        .run(&TreeNavigator, Some(&tree))
        .failure_value()
        .unwrap();
    let error = errors.first();
    assert_eq!(error.message, "Could not unbox value");
    assert_eq!(error.expected, "int");
    assert_eq!(error.actual, json!("<opaque>"));
    assert_eq!(error.path, vec!["x"]);
}

#[test]
fn test_unbox_failure_in_optional() {
    let tree = record(vec![("x", Node::Opaque)]);
    let parser: Parser<Option<i64>, Node> = Parser::int().optional().field("x");

    let errors = parser
        .run(&TreeNavigator, Some(&tree))
        .failure_value()
        .unwrap();
    assert_eq!(errors.first().message, "Could not unbox value");
    assert_eq!(errors.first().expected, "Maybe(int)");
}

#[test]
fn test_sequence_over_host_list() {
    let tree = record(vec![(
        "scores",
        Node::List(vec![leaf(json!(1)), leaf(json!("two")), boxed(leaf(json!(3)))]),
    )]);
    let parser: Parser<Vec<i64>, Node> = Parser::int().seq().field("scores");

    let errors = parser
        .run(&TreeNavigator, Some(&tree))
        .failure_value()
        .unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().dotted_path(), "scores.[1]");
    assert_eq!(errors.first().actual, json!("two"));
}

#[test]
fn test_missing_link_snapshot_uses_clone_node() {
    let tree = record(vec![("a", record(vec![("z", boxed(leaf(json!(1))))]))]);
    let parser: Parser<i64, Node> = Parser::int().at("a", ["b", "c"]);

    let errors = parser
        .run(&TreeNavigator, Some(&tree))
        .failure_value()
        .unwrap();
    assert_eq!(errors.first().message, "Missing property b");
    assert_eq!(errors.first().actual, json!({"z": 1}));
}

#[test]
fn test_index_navigation() {
    let tree = Node::List(vec![record(vec![("n", leaf(json!(5)))])]);
    let parser: Parser<i64, Node> = Parser::int().at(0usize, ["n"]);
    assert_eq!(parser.run(&TreeNavigator, Some(&tree)).ok(), Some(5));
}

#[test]
fn test_same_leaves_work_with_json() {
    let parser = Parser::int().field("age");
    assert_eq!(
        parser.run(&JsonNavigator, Some(&json!({"age": 30}))).ok(),
        Some(30)
    );
}
