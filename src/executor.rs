//! `BuoyExecutor` Module
//!
//! Provides the `BuoyExecutor` trait that abstracts statement execution over whatever
//! driver the application uses.
//!
//! This trait is the seam between the builder layer and the database: every terminal
//! operation renders SQL with `sea-query` and hands it to an executor implementation,
//! allowing the ORM layer to work with any driver (or a mock in tests).

use sea_query::Values;
use std::fmt;

/// A result row, column name to JSON value.
///
/// Executors decode driver rows into JSON objects; models are deserialized from
/// these maps with `serde`.
pub type JsonRow = serde_json::Map<String, serde_json::Value>;

/// `BuoyExecutor` error type
#[derive(Debug)]
pub enum BuoyError {
    /// Driver-level failure reported by the executor implementation
    ExecutionError(String),
    /// An UPDATE was rendered with no SET assignments
    NoSetClauses,
    /// Row or object conversion error
    ConversionError(String),
    /// Construction-time configuration error
    ConfigError(String),
    /// Other execution errors
    Other(String),
}

impl fmt::Display for BuoyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuoyError::ExecutionError(s) => {
                write!(f, "Execution error: {s}")
            }
            BuoyError::NoSetClauses => {
                write!(f, "Update has no SET assignments")
            }
            BuoyError::ConversionError(s) => {
                write!(f, "Conversion error: {s}")
            }
            BuoyError::ConfigError(s) => {
                write!(f, "Configuration error: {s}")
            }
            BuoyError::Other(s) => {
                write!(f, "Error: {s}")
            }
        }
    }
}

impl std::error::Error for BuoyError {}

impl From<serde_json::Error> for BuoyError {
    fn from(err: serde_json::Error) -> Self {
        BuoyError::ConversionError(err.to_string())
    }
}

impl From<config::ConfigError> for BuoyError {
    fn from(err: config::ConfigError) -> Self {
        BuoyError::ConfigError(err.to_string())
    }
}

/// Trait for executing rendered statements
///
/// This trait abstracts statement execution, allowing different implementations
/// (direct client, pooled connection, transaction, mock) to be used interchangeably.
/// Parameters arrive as `sea_query::Values`; implementations bind them with whatever
/// placeholder convention their driver expects.
///
/// # Examples
///
/// ```no_run
/// use buoy::{BuoyExecutor, BuoyError, JsonRow};
/// use sea_query::Values;
///
/// struct MyExecutor;
///
/// impl BuoyExecutor for MyExecutor {
///     fn execute(&self, sql: &str, params: &Values) -> Result<u64, BuoyError> {
///         // bind params and run against the driver
///         todo!()
///     }
///
///     fn query_all(&self, sql: &str, params: &Values) -> Result<Vec<JsonRow>, BuoyError> {
///         todo!()
///     }
/// }
/// ```
pub trait BuoyExecutor {
    /// Execute a statement and return the number of rows affected
    ///
    /// # Errors
    ///
    /// Returns `BuoyError` if the statement execution fails.
    fn execute(&self, sql: &str, params: &Values) -> Result<u64, BuoyError>;

    /// Execute a query and return all matching rows
    ///
    /// Returns an empty `Vec` when no rows match; never an error for empty results.
    ///
    /// # Errors
    ///
    /// Returns `BuoyError` if the query execution fails.
    fn query_all(&self, sql: &str, params: &Values) -> Result<Vec<JsonRow>, BuoyError>;

    /// Execute a query and return the first row, or `None` if no rows match
    ///
    /// # Errors
    ///
    /// Returns `BuoyError` if the query execution fails.
    fn query_opt(&self, sql: &str, params: &Values) -> Result<Option<JsonRow>, BuoyError> {
        Ok(self.query_all(sql, params)?.into_iter().next())
    }
}
