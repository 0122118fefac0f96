//! Session layer for cql-bind.
//!
//! Provides a trait-based interface to whatever executes the finished CQL
//! text, so the binding pipeline never depends on a particular driver.

mod cassandra;
mod mock;
mod types;

pub use cassandra::ScyllaSession;
pub use mock::{FailingSession, MockSession};
pub use types::{ColumnInfo, QueryResult, Row};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Supported session backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// Apache Cassandra or ScyllaDB over the native CQL protocol.
    #[default]
    Cassandra,
}

impl DatabaseBackend {
    /// Returns the backend as a string for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cassandra => "cassandra",
        }
    }

    /// Parses a backend from a string or URL scheme.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cassandra" | "scylla" | "scylladb" | "cql" => Some(Self::Cassandra),
            _ => None,
        }
    }

    /// Returns the default native protocol port for this backend.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Cassandra => 9042,
        }
    }

    /// Returns the driver name reported to callers.
    pub fn driver_name(&self) -> &'static str {
        match self {
            Self::Cassandra => "Cassandra",
        }
    }
}

/// Opens a session for the given configuration.
///
/// This is the central factory function for sessions.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn Session>> {
    match config.backend {
        DatabaseBackend::Cassandra => {
            let session = ScyllaSession::connect(config).await?;
            Ok(Box::new(session))
        }
    }
}

/// The collaborator that executes finished statement text.
///
/// Only the operations the statement executor invokes are exposed.
#[async_trait]
pub trait Session: Send + Sync {
    /// Executes a statement and reports whether it succeeded.
    async fn execute(&self, cql: &str) -> Result<bool>;

    /// Executes a statement and reports the number of rows it affected.
    async fn execute_affecting(&self, cql: &str) -> Result<u64>;

    /// Executes a statement and returns its result set.
    async fn query(&self, cql: &str) -> Result<QueryResult>;

    /// Closes the session.
    async fn close(&self) -> Result<()>;
}
