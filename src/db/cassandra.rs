//! Cassandra/ScyllaDB session implementation.
//!
//! Provides the `ScyllaSession` struct that implements the `Session` trait
//! over the native CQL protocol using the `scylla` driver.

use crate::binding::Value;
use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, QueryResult, Row, Session};
use crate::error::{CqlBindError, Result};
use async_trait::async_trait;
use scylla::client::session::Session as DriverSession;
use scylla::client::session_builder::SessionBuilder;
use scylla::value::{CqlValue, Row as DriverRow};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Statement timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// Maximum number of connection retry attempts.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Column the server adds to lightweight transaction results.
const APPLIED_COLUMN: &str = "[applied]";

/// Session over a Cassandra or ScyllaDB cluster.
pub struct ScyllaSession {
    inner: DriverSession,
}

impl ScyllaSession {
    /// Wraps an already established driver session.
    pub fn from_session(inner: DriverSession) -> Self {
        Self { inner }
    }

    /// Connects to the node named by the configuration and switches to its keyspace.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let node = config.contact_point();

        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {} to {}", attempt, MAX_RETRY_ATTEMPTS, node);

            let mut builder = SessionBuilder::new()
                .known_node(&node)
                .use_keyspace(config.keyspace(), false);
            if !config.username().is_empty() {
                builder = builder.user(config.username(), config.password());
            }

            match builder.build().await {
                Ok(inner) => {
                    debug!("Connected to {}, keyspace '{}'", node, config.keyspace());
                    return Ok(Self { inner });
                }
                Err(e) => {
                    let message = e.to_string();
                    let is_transient = is_transient_error(&message);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                    last_error = Some(message);
                    if !is_transient {
                        break;
                    }
                }
            }
        }

        Err(map_connection_error(
            last_error.unwrap_or_else(|| "no connection attempt was made".to_string()),
            config,
        ))
    }

    async fn run(&self, cql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            self.inner.query_unpaged(cql, ()),
        )
        .await
        .map_err(|_| {
            CqlBindError::query(format!(
                "Statement timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| CqlBindError::query(e.to_string()))?;

        let execution_time = start.elapsed();

        if !result.is_rows() {
            return Ok(QueryResult::new().with_execution_time(execution_time));
        }

        let rows_result = result
            .into_rows_result()
            .map_err(|e| CqlBindError::query(format!("Failed to read result rows: {e}")))?;

        let columns: Vec<ColumnInfo> = rows_result
            .column_specs()
            .iter()
            .map(|spec| ColumnInfo::new(spec.name(), format!("{:?}", spec.typ())))
            .collect();

        let rows: Vec<Row> = rows_result
            .rows::<DriverRow>()
            .map_err(|e| CqlBindError::query(format!("Failed to read result rows: {e}")))?
            .map(|row| {
                row.map(convert_row)
                    .map_err(|e| CqlBindError::query(format!("Failed to decode row: {e}")))
            })
            .collect::<Result<_>>()?;

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }
}

#[async_trait]
impl Session for ScyllaSession {
    async fn execute(&self, cql: &str) -> Result<bool> {
        let result = self.run(cql).await?;
        Ok(applied_flag(&result).unwrap_or(true))
    }

    async fn execute_affecting(&self, cql: &str) -> Result<u64> {
        // CQL reports no affected-row count; only row results carry a size.
        let result = self.run(cql).await?;
        Ok(result.row_count as u64)
    }

    async fn query(&self, cql: &str) -> Result<QueryResult> {
        self.run(cql).await
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Reads the `[applied]` flag of a lightweight transaction result, if present.
fn applied_flag(result: &QueryResult) -> Option<bool> {
    let index = result
        .columns
        .iter()
        .position(|c| c.name == APPLIED_COLUMN)?;
    match result.rows.first()?.get(index)? {
        Value::Bool(applied) => Some(*applied),
        _ => None,
    }
}

fn convert_row(row: DriverRow) -> Row {
    row.columns
        .into_iter()
        .map(|column| column.map(convert_value).unwrap_or(Value::Null))
        .collect()
}

/// Converts a driver value to our Value type.
fn convert_value(value: CqlValue) -> Value {
    match value {
        CqlValue::Boolean(b) => Value::Bool(b),
        CqlValue::TinyInt(v) => Value::Int(v as i64),
        CqlValue::SmallInt(v) => Value::Int(v as i64),
        CqlValue::Int(v) => Value::Int(v as i64),
        CqlValue::BigInt(v) => Value::Int(v),
        CqlValue::Float(v) => Value::Float(v as f64),
        CqlValue::Double(v) => Value::Float(v),
        CqlValue::Text(s) | CqlValue::Ascii(s) => Value::Text(s),
        CqlValue::Uuid(uuid) => Value::Text(uuid.to_string()),
        CqlValue::List(items) | CqlValue::Set(items) => Value::Collection(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), convert_value(item)))
                .collect(),
        ),
        CqlValue::Map(entries) => Value::Collection(
            entries
                .into_iter()
                .map(|(k, v)| (convert_value(k).text_form(), convert_value(v)))
                .collect(),
        ),
        // Remaining types have no native counterpart; keep their debug rendering.
        other => Value::Text(format!("{other:?}")),
    }
}

/// Determines if a connection error is transient and worth retrying.
fn is_transient_error(message: &str) -> bool {
    let message = message.to_lowercase();

    if message.contains("authentication")
        || message.contains("keyspace")
        || message.contains("ssl")
        || message.contains("tls")
    {
        return false;
    }

    message.contains("connection refused")
        || message.contains("timed out")
        || message.contains("timeout")
        || message.contains("connection reset")
        || message.contains("broken pipe")
        || message.contains("unavailable")
}

/// Maps driver connection errors to user-friendly messages.
fn map_connection_error(message: String, config: &ConnectionConfig) -> CqlBindError {
    let node = config.contact_point();
    let lower = message.to_lowercase();

    if lower.contains("connection refused") {
        CqlBindError::connection(format!(
            "Cannot connect to {node}. Check that the node is running."
        ))
    } else if lower.contains("authentication") {
        CqlBindError::connection(format!(
            "Authentication failed for user '{}'. Check your credentials.",
            config.username()
        ))
    } else if lower.contains("keyspace") {
        CqlBindError::connection(format!(
            "Keyspace '{}' could not be used: {message}",
            config.keyspace()
        ))
    } else if lower.contains("timed out") || lower.contains("timeout") {
        CqlBindError::connection(format!(
            "Connection to {node} timed out. The cluster may be overloaded or unreachable."
        ))
    } else {
        CqlBindError::connection(message)
    }
}
