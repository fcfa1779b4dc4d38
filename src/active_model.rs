//! Insert and save-or-update primitives for persisted models.
//!
//! These are the write-side lifecycle operations the conversion service delegates
//! to. A model serializes to a field map; the primary-key column (from the entity's
//! column metadata) decides between insert and update-by-id.

use crate::condition::render::{ColName, TableName};
use crate::convert;
use crate::entity::{BuoyEntity, EntityColumn};
use crate::executor::{BuoyError, BuoyExecutor};
use sea_query::{Expr, ExprTrait, InsertStatement, PostgresQueryBuilder, UpdateStatement};

fn table<E: BuoyEntity>() -> &'static str {
    E::default().table_name()
}

fn primary_key_column<E: BuoyEntity>() -> Result<E::Column, BuoyError> {
    <E::Column as EntityColumn>::all()
        .iter()
        .copied()
        .find(|column| column.def().primary_key)
        .ok_or_else(|| {
            BuoyError::ConfigError(format!("entity {} declares no primary key", table::<E>()))
        })
}

/// INSERT a model's non-null fields
///
/// Returns the number of rows affected (1 on success).
///
/// # Errors
///
/// Fails when the model serializes to an empty field set, or on executor failure.
pub fn insert<E>(executor: &dyn BuoyExecutor, model: &E::Model) -> Result<u64, BuoyError>
where
    E: BuoyEntity,
{
    let fields = convert::non_null_values(model)?;
    if fields.is_empty() {
        return Err(BuoyError::Other("No fields to insert".to_string()));
    }

    let mut query = InsertStatement::default();
    query.into_table(TableName(table::<E>()));

    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (name, value) in fields {
        columns.push(ColName(name));
        values.push(Expr::val(value));
    }
    query.columns(columns);
    query.values_panic(values);

    let (sql, params) = query.build(PostgresQueryBuilder);
    executor.execute(&sql, &params)
}

/// UPDATE a model's non-primary-key fields, targeted by its primary key
///
/// Returns the number of rows affected (0 when no row carries the key).
///
/// # Errors
///
/// Fails when the entity declares no primary key, when the model's key field is
/// null, or on executor failure.
pub fn update_by_id<E>(executor: &dyn BuoyExecutor, model: &E::Model) -> Result<u64, BuoyError>
where
    E: BuoyEntity,
{
    let pk = primary_key_column::<E>()?;
    let fields = convert::non_null_values(model)?;

    let pk_value = fields
        .iter()
        .find(|(name, _)| name == pk.name())
        .map(|(_, value)| value.clone())
        .ok_or_else(|| {
            BuoyError::Other(format!("primary key {} is not set", pk.name()))
        })?;

    let mut query = UpdateStatement::default();
    query.table(TableName(table::<E>()));
    let mut assigned = 0usize;
    for (name, value) in fields {
        if name == pk.name() {
            continue;
        }
        query.value(ColName(name), Expr::val(value));
        assigned += 1;
    }
    if assigned == 0 {
        return Err(BuoyError::NoSetClauses);
    }
    query.and_where(Expr::col(ColName(pk.name().to_string())).eq(pk_value));

    let (sql, params) = query.build(PostgresQueryBuilder);
    executor.execute(&sql, &params)
}

/// Insert the model when its primary key is absent, update it by id otherwise
///
/// Returns `true` when a row was written.
pub fn save<E>(executor: &dyn BuoyExecutor, model: &E::Model) -> Result<bool, BuoyError>
where
    E: BuoyEntity,
{
    let pk = primary_key_column::<E>()?;
    let fields = convert::non_null_values(model)?;
    let has_key = fields.iter().any(|(name, _)| name == pk.name());

    let affected = if has_key {
        update_by_id::<E>(executor, model)?
    } else {
        insert::<E>(executor, model)?
    };
    Ok(affected > 0)
}
