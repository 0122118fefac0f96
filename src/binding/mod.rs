//! Statement binding for cql-bind.
//!
//! Turns a CQL template with positional `?` placeholders and an ordered list
//! of typed values into a fully materialized statement string.

mod literal;
mod quote;
mod record;
mod substitute;
mod value;

pub use literal::{encode, encode_with, LiteralPolicy};
pub use quote::{is_uuid, should_avoid_quoting};
pub use record::encode_record;
pub use substitute::{count_placeholders, substitute, PLACEHOLDER};
pub use value::Value;

use serde::{Deserialize, Serialize};

/// How strictly bindings are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// Reproduces the established output byte for byte: no escaping, no
    /// count validation, and the boolean/collection divergence between
    /// `statement` and `affecting_statement`.
    #[default]
    Faithful,
    /// Doubles embedded single quotes, rejects placeholder/binding count
    /// mismatches, and renders every statement with the full literal policy.
    Hardened,
}

impl BindMode {
    /// Returns the mode as a string for display and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faithful => "faithful",
            Self::Hardened => "hardened",
        }
    }

    /// Parses a mode from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "faithful" => Some(Self::Faithful),
            "hardened" | "strict" => Some(Self::Hardened),
            _ => None,
        }
    }
}

impl std::str::FromStr for BindMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Invalid binding mode: {s}. Expected: faithful or hardened")
        })
    }
}
