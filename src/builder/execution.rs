//! Terminal operations for `EntityBuilder`.
//!
//! Each operation renders the appropriate condition set with `sea-query` and hands
//! the SQL plus bound values to the executor. Read operations consume the
//! query-scoped set, write operations the update-scoped set; the builder itself is
//! only borrowed, so it can be reused for a follow-up operation.

use crate::builder::EntityBuilder;
use crate::condition::render;
use crate::config::BuilderConfig;
use crate::convert;
use crate::entity::BuoyEntity;
use crate::executor::{BuoyError, BuoyExecutor};
use sea_query::PostgresQueryBuilder;

fn log_statement(sql: &str) {
    if BuilderConfig::global().log_statements {
        log::debug!("statement: {sql}");
    }
}

impl<E> EntityBuilder<E>
where
    E: BuoyEntity,
{
    fn table() -> &'static str {
        E::default().table_name()
    }

    /// Execute the query and return all matching rows
    ///
    /// Returns an empty `Vec` when nothing matches.
    ///
    /// # Errors
    ///
    /// Surfaces executor failures unchanged; row decoding failures become
    /// conversion errors.
    pub fn all(&self, executor: &dyn BuoyExecutor) -> Result<Vec<E::Model>, BuoyError> {
        let (sql, values) =
            render::select_statement(self.query_set(), Self::table()).build(PostgresQueryBuilder);
        log_statement(&sql);
        let rows = executor.query_all(&sql, &values)?;
        rows.into_iter().map(convert::from_row).collect()
    }

    /// Execute the query and return a single row, or `None` if nothing matches
    pub fn one(&self, executor: &dyn BuoyExecutor) -> Result<Option<E::Model>, BuoyError> {
        let (sql, values) =
            render::select_statement(self.query_set(), Self::table()).build(PostgresQueryBuilder);
        log_statement(&sql);
        match executor.query_opt(&sql, &values)? {
            Some(row) => Ok(Some(convert::from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Execute the query with a `LIMIT 1` probe and return the row, if any
    ///
    /// The limit is appended to a clone of the query-scoped set, so it never leaks
    /// into later operations on the same builder.
    pub fn one_limited(&self, executor: &dyn BuoyExecutor) -> Result<Option<E::Model>, BuoyError> {
        let probe = self.query_set().with_limit(1);
        let (sql, values) =
            render::select_statement(&probe, Self::table()).build(PostgresQueryBuilder);
        log_statement(&sql);
        match executor.query_opt(&sql, &values)? {
            Some(row) => Ok(Some(convert::from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Count rows matching the query-scoped conditions
    pub fn count(&self, executor: &dyn BuoyExecutor) -> Result<u64, BuoyError> {
        let (sql, values) =
            render::count_statement(self.query_set(), Self::table()).build(PostgresQueryBuilder);
        log_statement(&sql);
        let row = executor
            .query_opt(&sql, &values)?
            .ok_or_else(|| BuoyError::ExecutionError("count query returned no row".to_string()))?;
        row.values()
            .next()
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| BuoyError::ConversionError("count column is not numeric".to_string()))
    }

    /// Apply the SET assignments to all rows matching the update-scoped conditions
    ///
    /// Returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns [`BuoyError::NoSetClauses`] when nothing has been `set`.
    pub fn update(&self, executor: &dyn BuoyExecutor) -> Result<u64, BuoyError> {
        if self.update_set().is_unconstrained() {
            log::warn!("update on {} has no conditions", Self::table());
        }
        let (sql, values) =
            render::update_statement(self.update_set(), Self::table())?.build(PostgresQueryBuilder);
        log_statement(&sql);
        executor.execute(&sql, &values)
    }

    /// Delete all rows matching the update-scoped conditions
    ///
    /// Returns the number of rows affected.
    pub fn delete(&self, executor: &dyn BuoyExecutor) -> Result<u64, BuoyError> {
        if self.update_set().is_unconstrained() {
            log::warn!("delete on {} has no conditions", Self::table());
        }
        let (sql, values) =
            render::delete_statement(self.update_set(), Self::table()).build(PostgresQueryBuilder);
        log_statement(&sql);
        executor.execute(&sql, &values)
    }
}
