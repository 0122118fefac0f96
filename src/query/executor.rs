//! Statement execution with positional bindings.
//!
//! Substitutes bindings into a CQL template and hands the finished text to a
//! session. Each call is a one-shot render-then-execute pipeline.

use crate::binding::{substitute, BindMode, LiteralPolicy, Value};
use crate::db::{DatabaseBackend, QueryResult, Session};
use crate::error::Result;
use tracing::debug;

/// Binds and executes statements against a session.
pub struct StatementExecutor<'a> {
    session: &'a dyn Session,
    mode: BindMode,
}

impl<'a> StatementExecutor<'a> {
    /// Creates an executor in faithful mode.
    pub fn new(session: &'a dyn Session) -> Self {
        Self::with_mode(session, BindMode::Faithful)
    }

    /// Creates an executor with the given binding mode.
    pub fn with_mode(session: &'a dyn Session, mode: BindMode) -> Self {
        Self { session, mode }
    }

    /// Returns the binding mode.
    pub fn mode(&self) -> BindMode {
        self.mode
    }

    /// Returns the driver name of the underlying backend.
    pub fn driver_name(&self) -> &'static str {
        DatabaseBackend::Cassandra.driver_name()
    }

    /// Renders a statement with the full literal policy, without executing it.
    pub fn render_statement(&self, template: &str, bindings: &[Value]) -> Result<String> {
        substitute(template, bindings, LiteralPolicy::Full, self.mode)
    }

    /// Renders a statement the way `affecting_statement` does, without executing it.
    ///
    /// In faithful mode only the scalar quote decision applies, so booleans
    /// are quoted and collections collapse to `'{}'`.
    pub fn render_affecting(&self, template: &str, bindings: &[Value]) -> Result<String> {
        let policy = match self.mode {
            BindMode::Faithful => LiteralPolicy::ScalarOnly,
            BindMode::Hardened => LiteralPolicy::Full,
        };
        substitute(template, bindings, policy, self.mode)
    }

    /// Binds and executes a statement, returning the session's success flag.
    pub async fn statement(&self, template: &str, bindings: &[Value]) -> Result<bool> {
        let cql = self.render_statement(template, bindings)?;
        debug!("Executing statement: {}", cql);
        self.session.execute(&cql).await
    }

    /// Binds and executes a statement, returning the affected-row count.
    pub async fn affecting_statement(&self, template: &str, bindings: &[Value]) -> Result<u64> {
        let cql = self.render_affecting(template, bindings)?;
        debug!("Executing affecting statement: {}", cql);
        self.session.execute_affecting(&cql).await
    }

    /// Executes the template as-is. Placeholder markers are not touched.
    pub async fn raw(&self, template: &str) -> Result<QueryResult> {
        debug!("Executing raw statement: {}", template);
        self.session.query(template).await
    }
}
