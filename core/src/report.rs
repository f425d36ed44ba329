//! Failure reporting hook.
//!
//! Every failed operation is handed to a `FailureReporter` before the error
//! is returned. `LogReporter` logs and swallows; `FailureLog` keeps the
//! failures so a stricter caller can act on them.

use std::fmt;

use parking_lot::Mutex;
use tracing::error;

use crate::error::ApiError;

/// The user-triggered operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Remove,
    Search,
    Sort,
    Update,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Remove => "remove",
            Operation::Search => "search",
            Operation::Sort => "sort",
            Operation::Update => "update",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait FailureReporter: Send + Sync {
    fn report(&self, operation: Operation, error: &ApiError);
}

/// Default reporter: one structured `error` event per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, operation: Operation, error: &ApiError) {
        error!(%operation, kind = error.kind(), %error, "operation failed");
    }
}

/// A recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub operation: Operation,
    pub kind: &'static str,
    pub message: String,
}

/// Logs like `LogReporter` and also keeps every failure.
#[derive(Debug, Default)]
pub struct FailureLog {
    failures: Mutex<Vec<Failure>>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<Failure> {
        self.failures.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }
}

impl FailureReporter for FailureLog {
    fn report(&self, operation: Operation, error: &ApiError) {
        LogReporter.report(operation, error);
        self.failures.lock().push(Failure {
            operation,
            kind: error.kind(),
            message: error.to_string(),
        });
    }
}
