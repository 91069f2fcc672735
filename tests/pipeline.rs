use json_ts::{
    json_str_to_typescript, json_to_typescript, CollisionPolicy, Error, Limits, Options,
};
use serde_json::json;

fn ts(v: serde_json::Value) -> String {
    json_to_typescript(&v, "Root", &Options::default()).unwrap()
}

fn field_type<'a>(out: &'a str, interface: &str, field: &str) -> Option<&'a str> {
    let header = format!("export interface {interface} {{\n");
    let body = &out[out.find(&header)? + header.len()..];
    let body = &body[..body.find("}\n")?];
    body.lines().find_map(|line| {
        line.trim().strip_prefix(&format!("{field}: "))?.strip_suffix(';')
    })
}

#[test]
fn primitive_fields_give_one_interface_in_key_order() {
    let out = ts(json!({"name": "n", "age": 3, "ok": true, "gone": null}));
    assert_eq!(out.matches("export interface").count(), 1);
    let fields: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with("  "))
        .map(|l| l.trim().split(':').next().unwrap_or_default())
        .collect();
    assert_eq!(fields, ["name", "age", "ok", "gone"]);
}

#[test]
fn scalar_field_types() {
    assert_eq!(field_type(&ts(json!({"a": "2024-01-01T00:00:00Z"})), "Root", "a"), Some("Date"));
    assert_eq!(field_type(&ts(json!({"a": "hello"})), "Root", "a"), Some("string"));
    assert_eq!(field_type(&ts(json!({"a": 3})), "Root", "a"), Some("number"));
    assert_eq!(field_type(&ts(json!({"a": true})), "Root", "a"), Some("boolean"));
    assert_eq!(field_type(&ts(json!({"a": null})), "Root", "a"), Some("null"));
}

#[test]
fn array_field_types() {
    assert_eq!(field_type(&ts(json!({"items": []})), "Root", "items"), Some("any[]"));
    assert_eq!(field_type(&ts(json!({"items": [1, 2, 3]})), "Root", "items"), Some("number[]"));

    let out = ts(json!({"items": [{"id": 1}]}));
    assert_eq!(field_type(&out, "Root", "items"), Some("ItemsItem[]"));
    assert_eq!(field_type(&out, "ItemsItem", "id"), Some("number"));
    assert_eq!(out.matches("export interface").count(), 2);
}

#[test]
fn heterogeneous_arrays_follow_first_element() {
    let out = ts(json!({"mixed": [1, "a", {"x": 1}]}));
    assert_eq!(field_type(&out, "Root", "mixed"), Some("number[]"));
    assert!(!out.contains("MixedItem"));
}

#[test]
fn root_name_is_normalized() {
    let out = json_to_typescript(&json!({"a": 1}), "my tool", &Options::default()).unwrap();
    assert!(out.starts_with("export interface MyTool {\n"));
}

#[test]
fn output_is_idempotent() {
    let src = r#"{"b": {"c": [{"d": "2020-02-02"}]}, "a": [[]], "e": {"f": null}}"#;
    let first = json_str_to_typescript(src, "Root", &Options::default()).unwrap();
    let second = json_str_to_typescript(src, "Root", &Options::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn declarations_sorted_by_name() {
    let out = ts(json!({"zoo": {"a": 1}, "apple": {"b": 2}, "mango": [{"c": 3}]}));
    let names: Vec<&str> = out
        .lines()
        .filter_map(|l| l.strip_prefix("export interface "))
        .map(|l| l.trim_end_matches(" {"))
        .collect();
    assert_eq!(names, ["Apple", "MangoItem", "Root", "Zoo"]);
}

// Known limitation, kept for compatibility: the second object whose key
// normalizes to an already used name is not declared.
#[test]
fn colliding_names_drop_second_declaration() {
    let out = ts(json!({"a-b": {"first": 1}, "a_b": {"second": 2}}));
    assert_eq!(out.matches("export interface AB {").count(), 1);
    assert_eq!(field_type(&out, "AB", "first"), Some("number"));
    assert_eq!(field_type(&out, "AB", "second"), None);
}

#[test]
fn colliding_names_can_be_reported() {
    let options = Options::default().with_collision(CollisionPolicy::Error);
    let err = json_to_typescript(&json!({"a-b": {"first": 1}, "a_b": {"second": 2}}), "Root", &options)
        .unwrap_err();
    assert_eq!(err.to_string(), "two different object shapes both map to the type name `AB`");
}

#[test]
fn invalid_json_never_reaches_the_engine() {
    let err = json_str_to_typescript("{\"a\": }", "Root", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidJson { .. }));
}

#[test]
fn non_object_root_is_an_error() {
    let err = json_str_to_typescript("[{\"a\": 1}]", "Root", &Options::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidRootShape { found: "array" }));
}

#[test]
fn limits_are_enforced() {
    let options = Options::default().with_limits(Limits::default().with_max_depth(2));
    let err = json_to_typescript(&json!({"a": {"b": {"c": 1}}}), "Root", &options).unwrap_err();
    assert!(matches!(err, Error::TooDeep { limit: 2 }));

    let options = Options::default().with_limits(Limits::default().with_max_fields(1));
    let err = json_to_typescript(&json!({"a": 1, "b": 2}), "Root", &options).unwrap_err();
    assert!(matches!(err, Error::TooWide { fields: 2, limit: 1 }));
}

#[test]
fn conversions_run_concurrently() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let v = json!({ "n": i, "child": { "k": [i] } });
                json_to_typescript(&v, "Root", &Options::default()).unwrap()
            })
        })
        .collect();
    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
