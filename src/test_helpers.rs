//! Test support: a scripted in-memory executor.
//!
//! `MockExecutor` queues result sets and affected-row counts and records every
//! statement it receives, so tests can assert on the rendered SQL and bound values
//! without a database. It is compiled unconditionally because integration tests
//! consume it as part of the public API; it has no place in production code paths.

use crate::executor::{BuoyError, BuoyExecutor, JsonRow};
use sea_query::Values;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Scripted executor for tests
///
/// Result sets queue in FIFO order: each `query_all` (or `query_opt`) consumes one
/// queued set, each `execute` consumes one queued affected-row count. An exhausted
/// queue yields an empty result set / zero rows affected.
///
/// # Example
///
/// ```
/// use buoy::test_helpers::MockExecutor;
/// use buoy::BuoyExecutor;
/// use sea_query::Values;
///
/// let executor = MockExecutor::new().with_affected(2);
/// let affected = executor.execute("DELETE FROM \"users\"", &Values(vec![])).unwrap();
/// assert_eq!(affected, 2);
/// assert_eq!(executor.statements()[0].0, "DELETE FROM \"users\"");
/// ```
#[derive(Default)]
pub struct MockExecutor {
    results: RefCell<VecDeque<Vec<JsonRow>>>,
    affected: RefCell<VecDeque<u64>>,
    statements: RefCell<Vec<(String, Values)>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result set for the next query
    #[must_use]
    pub fn with_rows(self, rows: Vec<JsonRow>) -> Self {
        self.results.borrow_mut().push_back(rows);
        self
    }

    /// Queue an affected-row count for the next execute
    #[must_use]
    pub fn with_affected(self, affected: u64) -> Self {
        self.affected.borrow_mut().push_back(affected);
        self
    }

    /// Every statement received so far, with its bound values
    pub fn statements(&self) -> Vec<(String, Values)> {
        self.statements.borrow().clone()
    }

    fn record(&self, sql: &str, params: &Values) {
        self.statements
            .borrow_mut()
            .push((sql.to_string(), params.clone()));
    }
}

impl BuoyExecutor for MockExecutor {
    fn execute(&self, sql: &str, params: &Values) -> Result<u64, BuoyError> {
        self.record(sql, params);
        Ok(self.affected.borrow_mut().pop_front().unwrap_or(0))
    }

    fn query_all(&self, sql: &str, params: &Values) -> Result<Vec<JsonRow>, BuoyError> {
        self.record(sql, params);
        Ok(self.results.borrow_mut().pop_front().unwrap_or_default())
    }
}
