//! cql-bind - Positional statement binding for Cassandra/ScyllaDB CQL.
//!
//! This library exposes the core modules for use in integration tests.

pub mod binding;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
