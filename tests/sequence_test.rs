//! Integration tests for array decoding.

use biopsy::{JsonNavigator, Parser};
use serde_json::{json, Value};

fn positive() -> Parser<i64> {
    Parser::int().filter(|n| {
        if *n > 0 {
            vec![]
        } else {
            vec!["Must be positive".to_string()]
        }
    })
}

#[test]
fn test_sequence_success_preserves_order() {
    let parser = Parser::int().seq();
    let result = parser.run(&JsonNavigator, Some(&json!([3, 1, 2])));
    assert_eq!(result.ok(), Some(vec![3, 1, 2]));
}

#[test]
fn test_empty_array() {
    let parser = Parser::int().seq();
    assert_eq!(parser.run(&JsonNavigator, Some(&json!([]))).ok(), Some(vec![]));
}

#[test]
fn test_every_failing_element_is_reported() {
    let parser = positive().seq();
    let errors = parser
        .run(&JsonNavigator, Some(&json!([1, -1, 2, "x", 0])))
        .failure_value()
        .unwrap();

    let paths: Vec<String> = errors.iter().map(|e| e.dotted_path()).collect();
    assert_eq!(paths, vec!["[1]", "[3]", "[4]"]);

    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Must be positive", "Type mismatch", "Must be positive"]);
}

#[test]
fn test_null_element_is_missing() {
    let parser = Parser::int().seq();
    let errors = parser
        .run(&JsonNavigator, Some(&json!([1, null])))
        .failure_value()
        .unwrap();
    assert_eq!(errors.first().message, "Null or missing value");
    assert_eq!(errors.first().path, vec!["[1]"]);
}

#[test]
fn test_null_element_with_optional_inner() {
    let parser = Parser::int().optional().seq();
    let result = parser.run(&JsonNavigator, Some(&json!([1, null, 3])));
    assert_eq!(result.ok(), Some(vec![Some(1), None, Some(3)]));
}

#[test]
fn test_non_array_is_type_mismatch() {
    let parser = Parser::int().seq();
    let errors = parser
        .run(&JsonNavigator, Some(&json!({"0": 1})))
        .failure_value()
        .unwrap();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "Type mismatch");
    assert_eq!(errors.first().expected, "int[]");
    assert_eq!(errors.first().actual, json!({"0": 1}));
    assert!(errors.first().path.is_empty());
}

#[test]
fn test_absent_array() {
    let parser = Parser::int().seq();
    let errors = parser.run(&JsonNavigator, None).failure_value().unwrap();
    assert_eq!(errors.first().message, "Null or missing value");
    assert_eq!(errors.first().expected, "int[]");
}

#[test]
fn test_optional_absent_array() {
    let parser = Parser::int().seq().optional().field("tags");
    assert_eq!(parser.run(&JsonNavigator, Some(&json!({}))).ok(), Some(None));
}

#[test]
fn test_nested_sequences_prefix_both_indices() {
    let parser = Parser::string().field("name").seq().field("rows").seq();
    let input = json!([
        {"rows": [{"name": "a"}]},
        {"rows": [{"name": "b"}, {"name": 7}]}
    ]);

    let errors = parser
        .run(&JsonNavigator, Some(&input))
        .failure_value()
        .unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().dotted_path(), "[1].rows.[1].name");
}

#[test]
fn test_records_report_all_fields_of_all_elements() {
    let person = Parser::non_empty_string(true)
        .field("name")
        .tuple(positive().field("age"));
    let parser = person.seq();

    let input = json!([
        {"name": "", "age": 0},
        {"name": "ok", "age": 4},
        {"age": "x"}
    ]);

    let errors = parser
        .run(&JsonNavigator, Some(&input))
        .failure_value()
        .unwrap();
    let paths: Vec<String> = errors.iter().map(|e| e.dotted_path()).collect();
    assert_eq!(paths, vec!["[0].name", "[0].age", "[2].name", "[2].age"]);
}

#[test]
fn test_large_array() {
    let input = Value::Array((0..20_000).map(|i| json!(i)).collect());
    let parser = Parser::int().seq();
    let values = parser.run(&JsonNavigator, Some(&input)).ok().unwrap();
    assert_eq!(values.len(), 20_000);
    assert_eq!(values[19_999], 19_999);
}

#[test]
fn test_array_of_values_keeps_raw_elements() {
    let parser: Parser<Vec<Value>> = Parser::array_of_values("items").field("items");
    let input = json!({"items": [1, {"a": 2}]});
    assert_eq!(
        parser.run(&JsonNavigator, Some(&input)).ok(),
        Some(vec![json!(1), json!({"a": 2})])
    );
}
