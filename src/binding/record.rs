//! Record literal rendering for collection bindings.
//!
//! Produces the brace-delimited form `{k1: 'v1',k2: {k3: 'v3'}}` used for
//! user-defined type and map values in CQL.

use super::literal::quote;
use super::{BindMode, Value};

/// Renders a collection value as a record literal.
///
/// Scalar leaves are always single-quoted whatever their type, nested
/// collections are emitted bare. Entries are comma-joined in iteration order.
/// Anything other than a collection renders as the empty string.
pub fn encode_record(value: &Value, mode: BindMode) -> String {
    let Value::Collection(entries) = value else {
        return String::new();
    };

    let body = entries
        .iter()
        .map(|(key, entry)| match entry {
            Value::Collection(_) => format!("{key}: {}", encode_record(entry, mode)),
            scalar => format!("{key}: {}", quote(&scalar.text_form(), mode)),
        })
        .collect::<Vec<_>>()
        .join(",");

    format!("{{{body}}}")
}
