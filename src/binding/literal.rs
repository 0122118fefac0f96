//! Literal rendering for single binding values.

use super::quote::should_avoid_quoting;
use super::record::encode_record;
use super::{BindMode, Value};

/// Which rendering rules apply to a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralPolicy {
    /// Booleans as bare `true`/`false`, collections as record literals,
    /// other scalars through the quote decision.
    Full,
    /// Every value goes through the quote decision, collections included.
    ScalarOnly,
}

/// Renders a value using the full literal policy.
pub fn encode(value: &Value, mode: BindMode) -> String {
    encode_with(value, LiteralPolicy::Full, mode)
}

/// Renders a value under the given policy.
pub fn encode_with(value: &Value, policy: LiteralPolicy, mode: BindMode) -> String {
    match (policy, value) {
        (LiteralPolicy::Full, Value::Bool(b)) => b.to_string(),
        (LiteralPolicy::Full, Value::Collection(_)) => encode_record(value, mode),
        _ => encode_scalar(value, mode),
    }
}

fn encode_scalar(value: &Value, mode: BindMode) -> String {
    let text = value.text_form();
    if should_avoid_quoting(value) {
        text
    } else {
        quote(&text, mode)
    }
}

/// Wraps text in single quotes. Embedded quotes are doubled only in hardened mode.
pub(crate) fn quote(text: &str, mode: BindMode) -> String {
    match mode {
        BindMode::Faithful => format!("'{text}'"),
        BindMode::Hardened => format!("'{}'", text.replace('\'', "''")),
    }
}
