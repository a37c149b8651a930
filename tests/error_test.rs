//! Integration tests for ParseError, ParseErrors and reporting.

use biopsy::{zip2, JsonNavigator, ParseError, ParseErrors, Parser};
use serde_json::{json, Value};
use stillwater::prelude::*;

fn errors_for(input: Value) -> ParseErrors {
    let parser = zip2(
        Parser::string().at("user", ["name"]),
        Parser::int().seq().at("user", ["scores"]),
    );
    parser
        .run(&JsonNavigator, Some(&input))
        .failure_value()
        .unwrap()
}

#[test]
fn test_errors_never_empty() {
    let errors = ParseErrors::single(ParseError::new("test error", "x", Value::Null));
    assert!(!errors.is_empty());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_try_from_vec() {
    assert!(ParseErrors::try_from_vec(Vec::new()).is_none());

    let errors = ParseErrors::try_from_vec(vec![
        ParseError::new("a", "x", Value::Null),
        ParseError::new("b", "x", Value::Null),
    ])
    .unwrap();
    assert_eq!(errors.len(), 2);
}

#[test]
#[should_panic(expected = "at least one error")]
fn test_from_vec_panics_on_empty() {
    ParseErrors::from_vec(Vec::new());
}

#[test]
fn test_errors_combine_via_semigroup() {
    let e1 = ParseErrors::single(ParseError::new("name is required", "name", Value::Null));
    let e2 = ParseErrors::single(ParseError::new("email is invalid", "email", json!("x")));
    let e3 = ParseErrors::single(ParseError::new("age must be positive", "age", json!(-1)));

    let combined = e1.combine(e2).combine(e3);

    let messages: Vec<&str> = combined.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["name is required", "email is invalid", "age must be positive"]
    );
}

#[test]
fn test_parser_errors_carry_paths_and_snapshots() {
    let errors = errors_for(json!({"user": {"name": 5, "scores": [1, "two", 3, null]}}));

    let found: Vec<(String, &str, &Value)> = errors
        .iter()
        .map(|e| (e.dotted_path(), e.message.as_str(), &e.actual))
        .collect();
    assert_eq!(
        found,
        vec![
            ("user.name".to_string(), "Type mismatch", &json!(5)),
            ("user.scores.[1]".to_string(), "Type mismatch", &json!("two")),
            ("user.scores.[3]".to_string(), "Null or missing value", &Value::Null),
        ]
    );
}

#[test]
fn test_snapshot_survives_input_mutation() {
    let mut input = json!({"user": {"name": {"first": "Ada"}, "scores": []}});
    let errors = errors_for(input.clone());

    input["user"]["name"]["first"] = json!("Grace");

    assert_eq!(errors.first().actual, json!({"first": "Ada"}));
}

#[test]
fn test_by_path_groups_in_order() {
    let errors = ParseErrors::from_vec(vec![
        ParseError::at("a", "x", Value::Null, vec!["b".to_string()]),
        ParseError::at("b", "x", Value::Null, vec!["a".to_string()]),
        ParseError::at("c", "x", Value::Null, vec!["b".to_string()]),
    ]);

    let groups = errors.by_path();
    let keys: Vec<&String> = groups.keys().collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(groups["b"].len(), 2);
}

#[test]
fn test_at_path_on_parser_errors() {
    let errors = errors_for(json!({"user": {"name": 1, "scores": ["x"]}}));
    assert_eq!(errors.at_path(&["user", "name"]).len(), 1);
    assert_eq!(errors.at_path(&["user", "scores", "[0]"]).len(), 1);
    assert!(errors.at_path(&["user"]).is_empty());
}

#[test]
fn test_parse_formats_errors() {
    let parser = Parser::int().at("a", ["b", "c"]);
    let report = parser.parse(&JsonNavigator, Some(&json!({"a": {}})));

    let formatted = report.failure_value().unwrap();
    assert_eq!(formatted.len(), 1);
    assert_eq!(formatted[0].path, "a.b");
    assert_eq!(formatted[0].message, "Missing property b");
    assert_eq!(formatted[0].to_string(), "a.b: Missing property b (expected: int)");
}

#[test]
fn test_formatted_errors_serialize_as_json() {
    let parser = Parser::boolean().field("flag");
    let report = parser.parse(&JsonNavigator, Some(&json!({"flag": "maybe"})));

    let value = serde_json::to_value(report.failure_value().unwrap()).unwrap();
    assert_eq!(
        value,
        json!([{
            "message": "Invalid bool",
            "expected": "boolFromString",
            "actual": "maybe",
            "path": "flag"
        }])
    );
}

#[test]
fn test_errors_display() {
    let errors = errors_for(json!({"user": {"scores": []}}));
    let text = errors.to_string();
    assert!(text.starts_with("Parsing failed with 1 error(s):"));
    assert!(text.contains("user.name: Null or missing value (expected: string)"));
}

#[test]
fn test_errors_into_result() {
    let result: Result<i64, ParseErrors> = Parser::int()
        .run(&JsonNavigator, Some(&json!("x")))
        .into_result();
    let boxed: Box<dyn std::error::Error> = Box::new(result.unwrap_err());
    assert!(boxed.to_string().contains("Type mismatch"));
}

#[test]
fn test_owned_iteration() {
    let errors = errors_for(json!({"user": {"name": 1, "scores": 2}}));
    let expected: Vec<String> = errors.into_iter().map(|e| e.expected).collect();
    assert_eq!(expected, vec!["string", "int[]"]);
}
