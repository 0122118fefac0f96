//! Binding pipeline integration tests.
//!
//! Exercises substitution end to end through the public binding API.

use cql_bind::binding::{
    count_placeholders, encode, encode_record, substitute, BindMode, LiteralPolicy, Value,
};
use pretty_assertions::assert_eq;

const UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

fn render(template: &str, bindings: &[Value]) -> String {
    substitute(template, bindings, LiteralPolicy::Full, BindMode::Faithful).unwrap()
}

#[test]
fn test_insert_with_every_value_kind() {
    let bindings = vec![
        Value::from(UUID),
        Value::from("Ann"),
        Value::Int(31),
        Value::Float(1.75),
        Value::Bool(false),
        Value::collection([
            ("street", Value::from("Main St")),
            ("geo", Value::collection([("lat", 52.5), ("lon", 13.4)])),
        ]),
    ];

    let cql = render(
        "INSERT INTO users (id, name, age, height, active, address) VALUES (?, ?, ?, ?, ?, ?)",
        &bindings,
    );

    assert_eq!(
        cql,
        "INSERT INTO users (id, name, age, height, active, address) VALUES \
         (550e8400-e29b-41d4-a716-446655440000, 'Ann', 31, 1.75, false, \
         {street: 'Main St',geo: {lat: '52.5',lon: '13.4'}})"
    );
}

#[test]
fn test_equal_counts_consume_every_marker() {
    let templates = [
        "SELECT * FROM t WHERE a = ?",
        "UPDATE t SET a = ?, b = ? WHERE k = ?",
        "?,?,?,?",
    ];
    for template in templates {
        let n = count_placeholders(template) as i64;
        let bindings: Vec<Value> = (0..n).map(Value::Int).collect();
        let cql = render(template, &bindings);
        assert_eq!(count_placeholders(&cql), 0, "{template}");
    }
}

#[test]
fn test_json_bindings_render_like_native_values() {
    let bindings: Vec<Value> =
        serde_json::from_str(r#"[42, "hello", {"a": 1, "b": {"c": 2}}]"#).unwrap();

    assert_eq!(
        render("INSERT INTO t (n, s, r) VALUES (?, ?, ?)", &bindings),
        "INSERT INTO t (n, s, r) VALUES (42, 'hello', {a: '1',b: {c: '2'}})"
    );
}

#[test]
fn test_question_marks_inside_values_survive() {
    let cql = render(
        "INSERT INTO faq (q, a) VALUES (?, ?)",
        &[Value::from("Is it ? or ??"), Value::from("yes")],
    );
    assert_eq!(cql, "INSERT INTO faq (q, a) VALUES ('Is it ? or ??', 'yes')");
}

#[test]
fn test_record_and_encode_agree_for_collections() {
    let record = Value::collection([("x", 1)]);
    assert_eq!(
        encode(&record, BindMode::Faithful),
        encode_record(&record, BindMode::Faithful)
    );
}

#[test]
fn test_uppercase_uuid_binding_is_bare() {
    let upper = UUID.to_uppercase();
    assert_eq!(
        render("SELECT * FROM t WHERE id = ?", &[Value::from(upper.as_str())]),
        format!("SELECT * FROM t WHERE id = {upper}")
    );
}

#[test]
fn test_hardened_closes_injection() {
    let hostile = Value::from("x'; DROP TABLE users; --");

    let faithful = render("SELECT * FROM t WHERE name = ?", &[hostile.clone()]);
    assert_eq!(
        faithful,
        "SELECT * FROM t WHERE name = 'x'; DROP TABLE users; --'"
    );

    let hardened = substitute(
        "SELECT * FROM t WHERE name = ?",
        &[hostile],
        LiteralPolicy::Full,
        BindMode::Hardened,
    )
    .unwrap();
    assert_eq!(
        hardened,
        "SELECT * FROM t WHERE name = 'x''; DROP TABLE users; --'"
    );
}
