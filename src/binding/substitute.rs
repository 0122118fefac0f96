//! Positional placeholder substitution.
//!
//! Fills each `?` marker in a statement template, left to right, with the
//! literal of the binding at the same position.

use super::literal::{encode_with, LiteralPolicy};
use super::{BindMode, Value};
use crate::error::{CqlBindError, Result};
use tracing::trace;

/// Marker standing for one positional binding.
pub const PLACEHOLDER: char = '?';

/// Counts the placeholder markers in a template.
pub fn count_placeholders(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Substitutes bindings into a template.
///
/// Binding `i` fills placeholder occurrence `i`. Scanning resumes after each
/// inserted literal, so markers inside a literal are never consumed.
///
/// In faithful mode surplus bindings are dropped and unmatched markers are
/// left verbatim. In hardened mode any count mismatch is an error.
pub fn substitute(
    template: &str,
    bindings: &[Value],
    policy: LiteralPolicy,
    mode: BindMode,
) -> Result<String> {
    if mode == BindMode::Hardened {
        let placeholders = count_placeholders(template);
        if placeholders != bindings.len() {
            return Err(CqlBindError::binding(format!(
                "statement has {placeholders} placeholder(s) but {} binding(s) were supplied",
                bindings.len()
            )));
        }
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    for (index, binding) in bindings.iter().enumerate() {
        let Some(pos) = rest.find(PLACEHOLDER) else {
            trace!("No placeholder left for binding {index}, ignoring remaining bindings");
            break;
        };
        output.push_str(&rest[..pos]);
        output.push_str(&encode_with(binding, policy, mode));
        rest = &rest[pos + PLACEHOLDER.len_utf8()..];
    }
    output.push_str(rest);

    Ok(output)
}
