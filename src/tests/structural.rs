use super::*;

fn parse(s: &str) -> (serde_json::Value, Vec<Repair>) {
    crate::loads_relaxed(s, &Options::default()).unwrap()
}

// === Missing colons ===

#[test]
fn missing_colon_string_value() {
    let (v, log) = parse(r#"{"name" "John"}"#);
    assert_eq!(v, serde_json::json!({"name": "John"}));
    assert!(log.iter().any(|r| r.kind == RepairKind::MissingColon));
}

#[test]
fn missing_colon_various_value_types() {
    let cases = [
        (r#"{"age" 30}"#, serde_json::json!({"age": 30})),
        (r#"{"price" 19.99}"#, serde_json::json!({"price": 19.99})),
        (r#"{"temp" -5}"#, serde_json::json!({"temp": -5})),
        (r#"{"active" true}"#, serde_json::json!({"active": true})),
        (r#"{"data" null}"#, serde_json::json!({"data": null})),
        (r#"{"config" {"a": 1}}"#, serde_json::json!({"config": {"a": 1}})),
        (r#"{"items" [1, 2]}"#, serde_json::json!({"items": [1, 2]})),
        (r#"{"empty" {}}"#, serde_json::json!({"empty": {}})),
    ];
    for (input, expected) in cases {
        let (v, log) = parse(input);
        assert_eq!(v, expected, "input: {}", input);
        assert!(
            log.iter().any(|r| r.kind == RepairKind::MissingColon),
            "no colon repair for {}",
            input
        );
    }
}

#[test]
fn multiple_missing_colons() {
    let (v, log) = parse(r#"{"a" 1, "b" 2, "c" 3}"#);
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(
        log.iter().filter(|r| r.kind == RepairKind::MissingColon).count(),
        3
    );
}

#[test]
fn missing_colon_nested() {
    let (v, _) = parse(r#"{"outer": {"inner" "value"}}"#);
    assert_eq!(v, serde_json::json!({"outer": {"inner": "value"}}));
}

#[test]
fn missing_colon_and_comma_together() {
    let (v, log) = parse(r#"{"a" 1 "b" 2}"#);
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2}));
    assert!(log.iter().any(|r| r.kind == RepairKind::MissingColon));
    assert!(log.iter().any(|r| r.kind == RepairKind::MissingComma));
}

#[test]
fn colon_in_string_value_untouched() {
    let (v, log) = parse(r#"{"time" "12:30:00"}"#);
    assert_eq!(v, serde_json::json!({"time": "12:30:00"}));
    assert_eq!(
        log.iter().filter(|r| r.kind == RepairKind::MissingColon).count(),
        1
    );
}

#[test]
fn present_colons_unchanged() {
    let (_, log) = parse(r#"{"a": 1, "b": 2}"#);
    assert!(log.is_empty());
}

// === Missing commas ===

#[test]
fn missing_comma_between_pairs() {
    let (v, log) = parse(r#"{"a": 1 "b": 2}"#);
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2}));
    assert_eq!(
        log.iter().filter(|r| r.kind == RepairKind::MissingComma).count(),
        1
    );
}

#[test]
fn missing_commas_multiple_pairs() {
    let (v, log) = parse(r#"{"a": 1 "b": 2 "c": 3}"#);
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2, "c": 3}));
    assert_eq!(
        log.iter().filter(|r| r.kind == RepairKind::MissingComma).count(),
        2
    );
}

#[test]
fn missing_comma_array_numbers() {
    let (v, _) = parse("[1 2 3 4 5]");
    assert_eq!(v, serde_json::json!([1, 2, 3, 4, 5]));
}

#[test]
fn missing_comma_array_strings() {
    let (v, _) = parse(r#"["a" "b" "c"]"#);
    assert_eq!(v, serde_json::json!(["a", "b", "c"]));
}

#[test]
fn missing_comma_array_mixed() {
    let (v, _) = parse(r#"[1 "two" true null]"#);
    assert_eq!(v, serde_json::json!([1, "two", true, null]));
}

#[test]
fn missing_comma_array_containers() {
    let (v, _) = parse(r#"[{"a": 1} {"b": 2}]"#);
    assert_eq!(v, serde_json::json!([{"a": 1}, {"b": 2}]));
    let (v, _) = parse("[[1, 2] [3, 4]]");
    assert_eq!(v, serde_json::json!([[1, 2], [3, 4]]));
}

#[test]
fn missing_comma_across_newlines() {
    let (v, _) = parse("{\"a\": 1\n\"b\": 2}");
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2}));
    let (v, _) = parse("[\n1\n2\n3\n]");
    assert_eq!(v, serde_json::json!([1, 2, 3]));
}

#[test]
fn negative_number_elements() {
    let (v, _) = parse("[1 -2 3]");
    assert_eq!(v, serde_json::json!([1, -2, 3]));
}

#[test]
fn exponent_number_elements() {
    let (v, _) = parse("[1e3 2.5e-2]");
    assert_eq!(v, serde_json::json!([1e3, 2.5e-2]));
}

#[test]
fn top_level_values_not_joined() {
    // Outside any container there is nothing to separate; the parse fails
    // instead of inventing a comma.
    assert!(!crate::can_parse("1 2"));
}

// === Auto-close ===

#[test]
fn close_single_object() {
    let (v, log) = parse(r#"{"a": 1"#);
    assert_eq!(v, serde_json::json!({"a": 1}));
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, RepairKind::MissingBracket);
    assert_eq!(log[0].replacement, "}");
}

#[test]
fn close_nested_mixed() {
    let (v, log) = parse(r#"{"a": {"b": [1, 2"#);
    assert_eq!(v, serde_json::json!({"a": {"b": [1, 2]}}));
    let closers: Vec<_> = log
        .iter()
        .filter(|r| r.kind == RepairKind::MissingBracket)
        .map(|r| r.replacement.as_str())
        .collect();
    assert_eq!(closers, vec!["]", "}", "}"]);
}

#[test]
fn close_positions_at_end_of_input() {
    let input = r#"[1, 2"#;
    let (_, log) = parse(input);
    assert_eq!(log[0].position, input.len());
}

#[test]
fn balanced_input_untouched() {
    let (_, log) = parse(r#"{"a": [1]}"#);
    assert!(log.is_empty());
}

#[test]
fn brackets_inside_strings_ignored() {
    let (v, log) = parse(r#"{"a": "[not open", "b": "{nor this"}"#);
    assert_eq!(v["a"], "[not open");
    assert!(log.is_empty());
}

// === Ellipsis markers ===

#[test]
fn array_truncation_marker() {
    let (v, log) = parse("[1, 2, ...]");
    assert_eq!(v, serde_json::json!([1, 2]));
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, RepairKind::TruncationMarker);
    assert_eq!(log[0].original, ", ...");
}

#[test]
fn unicode_ellipsis() {
    let (v, log) = parse("[1, 2, …]");
    assert_eq!(v, serde_json::json!([1, 2]));
    assert_eq!(log[0].kind, RepairKind::TruncationMarker);
}

#[test]
fn object_truncation_marker() {
    let (v, _) = parse(r#"{"a": 1, ...}"#);
    assert_eq!(v, serde_json::json!({"a": 1}));
}

#[test]
fn ellipsis_without_comma() {
    let (v, log) = parse("[...]");
    assert_eq!(v, serde_json::json!([]));
    assert_eq!(log[0].original, "...");
}

#[test]
fn dots_inside_string_kept() {
    let (v, log) = parse(r#"{"a": "wait..."}"#);
    assert_eq!(v["a"], "wait...");
    assert!(log.is_empty());
}

// === Double and leading commas ===

#[test]
fn double_comma_removed() {
    let (v, log) = parse("[1,,2]");
    assert_eq!(v, serde_json::json!([1, 2]));
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].kind, RepairKind::DoubleComma);
}

#[test]
fn run_of_commas() {
    let (v, log) = parse("[1,,,2]");
    assert_eq!(v, serde_json::json!([1, 2]));
    assert_eq!(
        log.iter().filter(|r| r.kind == RepairKind::DoubleComma).count(),
        2
    );
}

#[test]
fn leading_comma_removed() {
    let (v, log) = parse("[,1,2]");
    assert_eq!(v, serde_json::json!([1, 2]));
    assert_eq!(log[0].kind, RepairKind::DoubleComma);
}

#[test]
fn leading_comma_in_object() {
    let (v, _) = parse(r#"{,"a": 1}"#);
    assert_eq!(v, serde_json::json!({"a": 1}));
}
