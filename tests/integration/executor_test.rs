//! Statement executor integration tests.
//!
//! Runs the three executor entry points against the in-memory session.

use cql_bind::binding::{BindMode, Value};
use cql_bind::db::{FailingSession, MockSession};
use cql_bind::query::StatementExecutor;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_statement_and_affecting_diverge_on_booleans() {
    let session = MockSession::new();
    let executor = StatementExecutor::new(&session);
    let template = "UPDATE flags SET on = ? WHERE id = ?";
    let bindings = [Value::Bool(true), Value::Int(1)];

    executor.statement(template, &bindings).await.unwrap();
    executor.affecting_statement(template, &bindings).await.unwrap();

    assert_eq!(
        session.executed(),
        vec![
            "UPDATE flags SET on = true WHERE id = 1".to_string(),
            "UPDATE flags SET on = '1' WHERE id = 1".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_numbers_are_bare_in_both_paths() {
    let session = MockSession::new();
    let executor = StatementExecutor::new(&session);
    let bindings = [Value::Int(-3), Value::Float(0.25)];

    executor
        .statement("UPDATE t SET a = ?, b = ?", &bindings)
        .await
        .unwrap();
    executor
        .affecting_statement("UPDATE t SET a = ?, b = ?", &bindings)
        .await
        .unwrap();

    let executed = session.executed();
    assert_eq!(executed.len(), 2);
    for cql in executed {
        assert_eq!(cql, "UPDATE t SET a = -3, b = 0.25");
    }
}

#[tokio::test]
async fn test_surplus_and_missing_bindings_are_tolerated() {
    let session = MockSession::new();
    let executor = StatementExecutor::new(&session);

    executor
        .statement("DELETE FROM t WHERE k = ?", &[Value::Int(1), Value::Int(2)])
        .await
        .unwrap();
    executor
        .statement("DELETE FROM t WHERE k = ? AND c = ?", &[Value::Int(1)])
        .await
        .unwrap();

    assert_eq!(
        session.executed(),
        vec![
            "DELETE FROM t WHERE k = 1".to_string(),
            "DELETE FROM t WHERE k = 1 AND c = ?".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_raw_passes_template_through() {
    let session = MockSession::new();
    let executor = StatementExecutor::new(&session);

    let result = executor.raw("SELECT * FROM t").await.unwrap();
    assert_eq!(result.row_count, 1);

    executor.raw("SELECT * FROM t WHERE k = ?").await.unwrap();
    assert_eq!(
        session.last_executed().as_deref(),
        Some("SELECT * FROM t WHERE k = ?")
    );
}

#[tokio::test]
async fn test_hardened_executor_validates_before_executing() {
    let session = MockSession::new();
    let executor = StatementExecutor::with_mode(&session, BindMode::Hardened);

    assert!(executor
        .affecting_statement("UPDATE t SET a = ? WHERE k = ?", &[Value::Int(1)])
        .await
        .is_err());
    assert!(session.executed().is_empty());

    let count = executor
        .affecting_statement(
            "UPDATE t SET a = ? WHERE k = ?",
            &[Value::collection([("x", "y")]), Value::Int(1)],
        )
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        session.last_executed().as_deref(),
        Some("UPDATE t SET a = {x: 'y'} WHERE k = 1")
    );
}

#[tokio::test]
async fn test_concurrent_renders_do_not_interfere() {
    let session = std::sync::Arc::new(MockSession::new());

    let mut handles = Vec::new();
    for i in 0..8i64 {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            let executor = StatementExecutor::new(session.as_ref());
            executor
                .render_statement("SELECT * FROM t WHERE k = ?", &[Value::Int(i)])
                .unwrap()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.await.unwrap(),
            format!("SELECT * FROM t WHERE k = {i}")
        );
    }
}

#[test]
fn test_session_failure_propagates_unchanged() {
    let session = FailingSession::new("Operation timed out - received only 0 responses");
    let executor = StatementExecutor::new(&session);

    let err = tokio_test::block_on(executor.statement("SELECT * FROM t", &[])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Query error: Operation timed out - received only 0 responses"
    );
}
