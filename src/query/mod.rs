//! Statement execution for cql-bind.
//!
//! This module isolates binding and execution from the command-line front end.

pub mod executor;

pub use executor::StatementExecutor;
