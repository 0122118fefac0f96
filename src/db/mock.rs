//! In-memory sessions for testing.
//!
//! `MockSession` records every statement it receives, `FailingSession`
//! rejects all of them.

use super::{ColumnInfo, QueryResult, Session};
use crate::binding::Value;
use crate::error::{CqlBindError, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A mock session that returns predefined results and records executed statements.
pub struct MockSession {
    affected_rows: u64,
    executed: Mutex<Vec<String>>,
}

impl MockSession {
    /// Creates a new mock session that reports one affected row per write.
    pub fn new() -> Self {
        Self::with_affected_rows(1)
    }

    /// Creates a mock session reporting the given affected-row count for writes.
    pub fn with_affected_rows(affected_rows: u64) -> Self {
        Self {
            affected_rows,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Returns every statement executed so far, oldest first.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the most recently executed statement.
    pub fn last_executed(&self) -> Option<String> {
        self.executed().pop()
    }

    fn record(&self, cql: &str) {
        if let Ok(mut guard) = self.executed.lock() {
            guard.push(cql.to_string());
        }
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

fn is_select(cql: &str) -> bool {
    cql.trim_start().to_uppercase().starts_with("SELECT")
}

#[async_trait]
impl Session for MockSession {
    async fn execute(&self, cql: &str) -> Result<bool> {
        self.record(cql);
        Ok(true)
    }

    async fn execute_affecting(&self, cql: &str) -> Result<u64> {
        self.record(cql);
        if is_select(cql) {
            Ok(0)
        } else {
            Ok(self.affected_rows)
        }
    }

    async fn query(&self, cql: &str) -> Result<QueryResult> {
        self.record(cql);

        if is_select(cql) {
            let columns = vec![ColumnInfo::new("result", "Text")];
            let rows = vec![vec![Value::Text(format!("Mock result for: {cql}"))]];
            Ok(QueryResult::with_data(columns, rows).with_execution_time(Duration::from_millis(1)))
        } else {
            Ok(QueryResult::new().with_execution_time(Duration::from_millis(1)))
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A session whose every call fails with a query error.
pub struct FailingSession {
    message: String,
}

impl FailingSession {
    /// Creates a failing session that reports the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Session for FailingSession {
    async fn execute(&self, _cql: &str) -> Result<bool> {
        Err(CqlBindError::query(self.message.clone()))
    }

    async fn execute_affecting(&self, _cql: &str) -> Result<u64> {
        Err(CqlBindError::query(self.message.clone()))
    }

    async fn query(&self, _cql: &str) -> Result<QueryResult> {
        Err(CqlBindError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
