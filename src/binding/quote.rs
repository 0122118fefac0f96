//! Quote decision for scalar binding values.

use super::Value;
use regex::Regex;
use std::sync::OnceLock;

/// Canonical 8-4-4-4-12 hexadecimal grouping, anchored at both ends.
const UUID_PATTERN: &str =
    r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}$";

fn uuid_regex() -> &'static Regex {
    static UUID_RE: OnceLock<Regex> = OnceLock::new();
    UUID_RE.get_or_init(|| Regex::new(UUID_PATTERN).expect("UUID pattern is valid"))
}

/// Returns true if the value is text shaped like a UUID.
pub fn is_uuid(value: &Value) -> bool {
    match value {
        Value::Text(s) => uuid_regex().is_match(s),
        _ => false,
    }
}

/// Decides whether a scalar value is emitted without surrounding quotes.
///
/// Checked in order: an empty type tag, a UUID-shaped text, an integer, a float.
/// The type tag check never fires for any current `Value` variant.
pub fn should_avoid_quoting(value: &Value) -> bool {
    value.type_tag().is_empty()
        || is_uuid(value)
        || matches!(value, Value::Int(_))
        || matches!(value, Value::Float(_))
}
