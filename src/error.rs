//! Error types for cql-bind.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for cql-bind operations.
#[derive(Error, Debug)]
pub enum CqlBindError {
    /// Session connection errors (node unreachable, auth failed, unknown keyspace, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution errors reported by the session.
    #[error("Query error: {0}")]
    Query(String),

    /// Binding errors (only raised in hardened mode, or for unparseable CLI bindings).
    #[error("Binding error: {0}")]
    Binding(String),

    /// Configuration errors (invalid config file, bad connection string, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CqlBindError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a binding error with the given message.
    pub fn binding(msg: impl Into<String>) -> Self {
        Self::Binding(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Binding(_) => "Binding Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using CqlBindError.
pub type Result<T> = std::result::Result<T, CqlBindError>;
