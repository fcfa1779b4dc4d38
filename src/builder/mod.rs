//! Dual-scope fluent builder for entity queries and mutations.
//!
//! [`EntityBuilder`] holds two condition sets, one scoped to read filtering and one
//! to write targeting, and replays every predicate-affecting call onto both. A
//! single chained expression can therefore be reused to filter rows and to describe
//! which rows to mutate.
//!
//! Builder methods consume and return `self`, so chains pass ownership instead of
//! sharing mutable state. Terminal operations (in the execution module) borrow the
//! finished builder and clone what they must, which is why one builder can serve a
//! limited probe and a subsequent unlimited read without clause contamination.
//!
//! # Example
//!
//! ```no_run
//! use buoy::{BuoyEntity, BuoyEntityName, BuoyError, BuoyExecutor};
//! use serde::{Deserialize, Serialize};
//!
//! # #[derive(Default, Copy, Clone, Debug)]
//! # pub struct User;
//! # impl BuoyEntityName for User {
//! #     fn table_name(&self) -> &'static str { "users" }
//! # }
//! # buoy::columns! {
//! #     pub enum UserColumn {
//! #         Id: "id", BigInt, primary_key;
//! #         Name: "name", Text;
//! #         Age: "age", Integer;
//! #     }
//! # }
//! # #[derive(Serialize, Deserialize, Clone, Debug)]
//! # pub struct UserModel { id: Option<i64>, name: String, age: Option<i32> }
//! # impl BuoyEntity for User {
//! #     type Model = UserModel;
//! #     type Column = UserColumn;
//! # }
//! # let executor: &dyn BuoyExecutor = todo!();
//! let adults = User::builder()
//!     .ge(UserColumn::Age, 18)
//!     .like_prefix(UserColumn::Name, "qi")
//!     .order_by_desc(&[UserColumn::Id])
//!     .all(executor)?;
//! # Ok::<(), BuoyError>(())
//! ```

use crate::condition::clause::{Clause, ConditionSet, LikeMatch, Nesting, Predicate, SortOrder};
use crate::convert;
use crate::entity::{BuoyEntity, EntityColumn, FieldDef};
use crate::executor::BuoyError;
use sea_query::Value;
use std::marker::PhantomData;

pub mod execution;

/// Fluent builder holding one query-scoped and one update-scoped condition set
///
/// Obtain one per logical query or mutation via [`BuoyEntity::builder`]; builders
/// are not meant to be shared across unrelated operations.
pub struct EntityBuilder<E>
where
    E: BuoyEntity,
{
    query: ConditionSet,
    update: ConditionSet,
    _entity: PhantomData<E>,
}

impl<E> Default for EntityBuilder<E>
where
    E: BuoyEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EntityBuilder<E>
where
    E: BuoyEntity,
{
    /// Create a fresh builder with two empty condition sets
    pub fn new() -> Self {
        Self {
            query: ConditionSet::new(),
            update: ConditionSet::new(),
            _entity: PhantomData,
        }
    }

    /// The read-scoped condition set
    pub fn query_set(&self) -> &ConditionSet {
        &self.query
    }

    /// The write-scoped condition set
    pub fn update_set(&self) -> &ConditionSet {
        &self.update
    }

    /// Apply one mutation to both condition sets identically
    fn fan_out<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ConditionSet),
    {
        f(&mut self.query);
        f(&mut self.update);
        self
    }

    fn push_both(self, clause: Clause) -> Self {
        self.fan_out(|set| set.push(clause.clone()))
    }

    /// Seed a fully populated model as the implicit equals template on both sets
    ///
    /// Non-null serialized fields become implicit equals clauses at render time,
    /// ahead of the explicit clauses. Calling `by` again replaces the template.
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the model does not serialize to an object.
    pub fn by(self, model: &E::Model) -> Result<Self, BuoyError> {
        let entries = convert::non_null_values(model)?;
        Ok(self.fan_out(|set| set.seed_template(entries.clone())))
    }

    /// Conditional chaining: apply `f` to the builder only when `condition` holds
    ///
    /// ```rust,ignore
    /// let builder = User::builder()
    ///     .apply_if(name_filter.is_some(), |b| b.eq(UserColumn::Name, name_filter.unwrap()));
    /// ```
    pub fn apply_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }

    // ===== predicates (fanned out to both sets) =====

    /// `column = value`
    pub fn eq<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.eq_if(true, column, value)
    }

    /// `column = value`, appended only when `condition` holds
    pub fn eq_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.push_both(Predicate::eq(column.name(), value.into()).into())
    }

    /// `column <> value`
    pub fn ne<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.ne_if(true, column, value)
    }

    /// `column <> value`, appended only when `condition` holds
    pub fn ne_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Ne {
                column: column.name().to_string(),
                value: value.into(),
            }
            .into(),
        )
    }

    /// `column > value`
    pub fn gt<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.gt_if(true, column, value)
    }

    /// `column > value`, appended only when `condition` holds
    pub fn gt_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Gt {
                column: column.name().to_string(),
                value: value.into(),
            }
            .into(),
        )
    }

    /// `column >= value`
    pub fn ge<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.ge_if(true, column, value)
    }

    /// `column >= value`, appended only when `condition` holds
    pub fn ge_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Ge {
                column: column.name().to_string(),
                value: value.into(),
            }
            .into(),
        )
    }

    /// `column < value`
    pub fn lt<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.lt_if(true, column, value)
    }

    /// `column < value`, appended only when `condition` holds
    pub fn lt_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Lt {
                column: column.name().to_string(),
                value: value.into(),
            }
            .into(),
        )
    }

    /// `column <= value`
    pub fn le<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.le_if(true, column, value)
    }

    /// `column <= value`, appended only when `condition` holds
    pub fn le_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Le {
                column: column.name().to_string(),
                value: value.into(),
            }
            .into(),
        )
    }

    /// `column BETWEEN low AND high`
    pub fn between<V: Into<Value>>(self, column: E::Column, low: V, high: V) -> Self {
        self.between_if(true, column, low, high)
    }

    /// `column BETWEEN low AND high`, appended only when `condition` holds
    pub fn between_if<V: Into<Value>>(
        self,
        condition: bool,
        column: E::Column,
        low: V,
        high: V,
    ) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Between {
                column: column.name().to_string(),
                low: low.into(),
                high: high.into(),
                negated: false,
            }
            .into(),
        )
    }

    /// `column NOT BETWEEN low AND high`
    pub fn not_between<V: Into<Value>>(self, column: E::Column, low: V, high: V) -> Self {
        self.not_between_if(true, column, low, high)
    }

    /// `column NOT BETWEEN low AND high`, appended only when `condition` holds
    pub fn not_between_if<V: Into<Value>>(
        self,
        condition: bool,
        column: E::Column,
        low: V,
        high: V,
    ) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Between {
                column: column.name().to_string(),
                low: low.into(),
                high: high.into(),
                negated: true,
            }
            .into(),
        )
    }

    /// `column LIKE '%value%'`
    pub fn like<S: Into<String>>(self, column: E::Column, value: S) -> Self {
        self.like_if(true, column, value)
    }

    /// `column LIKE '%value%'`, appended only when `condition` holds
    pub fn like_if<S: Into<String>>(self, condition: bool, column: E::Column, value: S) -> Self {
        self.push_like(condition, column, value, LikeMatch::Contains, false)
    }

    /// `column NOT LIKE '%value%'`
    pub fn not_like<S: Into<String>>(self, column: E::Column, value: S) -> Self {
        self.not_like_if(true, column, value)
    }

    /// `column NOT LIKE '%value%'`, appended only when `condition` holds
    pub fn not_like_if<S: Into<String>>(
        self,
        condition: bool,
        column: E::Column,
        value: S,
    ) -> Self {
        self.push_like(condition, column, value, LikeMatch::Contains, true)
    }

    /// `column LIKE 'value%'`
    pub fn like_prefix<S: Into<String>>(self, column: E::Column, value: S) -> Self {
        self.like_prefix_if(true, column, value)
    }

    /// `column LIKE 'value%'`, appended only when `condition` holds
    pub fn like_prefix_if<S: Into<String>>(
        self,
        condition: bool,
        column: E::Column,
        value: S,
    ) -> Self {
        self.push_like(condition, column, value, LikeMatch::Prefix, false)
    }

    /// `column LIKE '%value'`
    pub fn like_suffix<S: Into<String>>(self, column: E::Column, value: S) -> Self {
        self.like_suffix_if(true, column, value)
    }

    /// `column LIKE '%value'`, appended only when `condition` holds
    pub fn like_suffix_if<S: Into<String>>(
        self,
        condition: bool,
        column: E::Column,
        value: S,
    ) -> Self {
        self.push_like(condition, column, value, LikeMatch::Suffix, false)
    }

    fn push_like<S: Into<String>>(
        self,
        condition: bool,
        column: E::Column,
        value: S,
        matching: LikeMatch,
        negated: bool,
    ) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::Like {
                column: column.name().to_string(),
                pattern: value.into(),
                matching,
                negated,
            }
            .into(),
        )
    }

    /// `column IS NULL`
    pub fn is_null(self, column: E::Column) -> Self {
        self.is_null_if(true, column)
    }

    /// `column IS NULL`, appended only when `condition` holds
    pub fn is_null_if(self, condition: bool, column: E::Column) -> Self {
        if !condition {
            return self;
        }
        self.push_both(Predicate::is_null(column.name()).into())
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(self, column: E::Column) -> Self {
        self.is_not_null_if(true, column)
    }

    /// `column IS NOT NULL`, appended only when `condition` holds
    pub fn is_not_null_if(self, condition: bool, column: E::Column) -> Self {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::IsNull {
                column: column.name().to_string(),
                negated: true,
            }
            .into(),
        )
    }

    /// `column IN (values...)`
    ///
    /// An empty collection appends no clause at all.
    pub fn is_in<V, I>(self, column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        self.is_in_if(true, column, values)
    }

    /// `column IN (values...)`, appended only when `condition` holds
    pub fn is_in_if<V, I>(self, condition: bool, column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::In {
                column: column.name().to_string(),
                values: values.into_iter().map(Into::into).collect(),
                negated: false,
            }
            .into(),
        )
    }

    /// `column NOT IN (values...)`
    pub fn is_not_in<V, I>(self, column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        self.is_not_in_if(true, column, values)
    }

    /// `column NOT IN (values...)`, appended only when `condition` holds
    pub fn is_not_in_if<V, I>(self, condition: bool, column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        if !condition {
            return self;
        }
        self.push_both(
            Predicate::In {
                column: column.name().to_string(),
                values: values.into_iter().map(Into::into).collect(),
                negated: true,
            }
            .into(),
        )
    }

    // ===== bulk equals =====

    /// Equals clause per entry; `None` values become IS NULL clauses
    pub fn all_eq<V, I>(self, entries: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = (E::Column, Option<V>)>,
    {
        self.all_eq_if(true, |_, _| true, entries, true)
    }

    /// Equals clause per entry with explicit null handling
    ///
    /// With `null_as_is_null` true a `None` value becomes an IS NULL clause;
    /// with false the entry is skipped.
    pub fn all_eq_nulls<V, I>(self, entries: I, null_as_is_null: bool) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = (E::Column, Option<V>)>,
    {
        self.all_eq_if(true, |_, _| true, entries, null_as_is_null)
    }

    /// Equals clause per entry admitted by `filter`
    pub fn all_eq_matching<V, I, F>(self, filter: F, entries: I, null_as_is_null: bool) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = (E::Column, Option<V>)>,
        F: FnMut(&E::Column, Option<&Value>) -> bool,
    {
        self.all_eq_if(true, filter, entries, null_as_is_null)
    }

    /// Full form: guard, per-entry filter, entries, null handling
    pub fn all_eq_if<V, I, F>(
        self,
        condition: bool,
        mut filter: F,
        entries: I,
        null_as_is_null: bool,
    ) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = (E::Column, Option<V>)>,
        F: FnMut(&E::Column, Option<&Value>) -> bool,
    {
        if !condition {
            return self;
        }
        let mut clauses = Vec::new();
        for (column, value) in entries {
            let value = value.map(Into::into);
            if !filter(&column, value.as_ref()) {
                continue;
            }
            match value {
                Some(value) => clauses.push(Clause::from(Predicate::eq(column.name(), value))),
                None if null_as_is_null => {
                    clauses.push(Clause::from(Predicate::is_null(column.name())));
                }
                None => {}
            }
        }
        self.fan_out(|set| {
            for clause in &clauses {
                set.push(clause.clone());
            }
        })
    }

    // ===== connectives and nesting =====

    /// Join the next clause with OR instead of AND
    pub fn or(self) -> Self {
        self.or_if(true)
    }

    /// Join the next clause with OR, only when `condition` holds
    pub fn or_if(self, condition: bool) -> Self {
        if !condition {
            return self;
        }
        self.push_both(Clause::Or)
    }

    /// `AND (...)` nested group
    ///
    /// ```rust,ignore
    /// let builder = User::builder()
    ///     .is_not_null(UserColumn::Email)
    ///     .and_nested(|b| b.eq(UserColumn::Name, "qi").or().eq(UserColumn::Name, "zq"));
    /// ```
    pub fn and_nested<F>(self, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        self.and_nested_if(true, f)
    }

    /// `AND (...)` nested group, appended only when `condition` holds
    pub fn and_nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        self.push_nested(condition, Nesting::And, f)
    }

    /// `OR (...)` nested group
    pub fn or_nested<F>(self, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        self.or_nested_if(true, f)
    }

    /// `OR (...)` nested group, appended only when `condition` holds
    pub fn or_nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        self.push_nested(condition, Nesting::Or, f)
    }

    /// Nested group joined with the pending connective
    pub fn nested<F>(self, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        self.nested_if(true, f)
    }

    /// Nested group joined with the pending connective, only when `condition` holds
    pub fn nested_if<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        self.push_nested(condition, Nesting::Plain, f)
    }

    fn push_nested<F>(self, condition: bool, nesting: Nesting, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        if !condition {
            return self;
        }
        // The inner set is built once, then cloned into both outer sets, so the
        // closure observes a single-scope builder.
        let inner = f(ConditionBuilder::new()).into_set();
        self.push_both(Clause::Nested { nesting, inner })
    }

    // ===== write-scope only =====

    /// SET fragment for UPDATE: `column = value`
    ///
    /// Applies to the update-scoped set only; a SET assignment has no meaning for
    /// a read filter.
    pub fn set<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.set_if(true, column, value)
    }

    /// SET fragment for UPDATE, appended only when `condition` holds
    pub fn set_if<V: Into<Value>>(mut self, condition: bool, column: E::Column, value: V) -> Self {
        if !condition {
            return self;
        }
        self.update.add_assignment(column.name(), value.into());
        self
    }

    // ===== read-scope only =====

    /// Restrict the projection to an explicit column list
    pub fn select_columns(mut self, columns: &[E::Column]) -> Self {
        for column in columns {
            self.query.add_projection(column.name());
        }
        self
    }

    /// Restrict the projection by a predicate over field metadata
    ///
    /// Primary-key columns are excluded from this filtering path.
    ///
    /// ```rust,ignore
    /// // only text columns
    /// let builder = User::builder().select_with(|def| def.kind.is_text());
    ///
    /// // only columns without a fill strategy
    /// let builder = User::builder().select_with(|def| def.fill == FieldFill::Default);
    /// ```
    pub fn select_with<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&FieldDef) -> bool,
    {
        for column in <E::Column as EntityColumn>::all() {
            let def = column.def();
            if def.primary_key {
                continue;
            }
            if predicate(&def) {
                self.query.add_projection(def.name);
            }
        }
        self
    }

    // ===== grouping and ordering (fanned out to both sets) =====

    /// `GROUP BY columns...`
    pub fn group_by(self, columns: &[E::Column]) -> Self {
        self.group_by_if(true, columns)
    }

    /// `GROUP BY columns...`, appended only when `condition` holds
    pub fn group_by_if(self, condition: bool, columns: &[E::Column]) -> Self {
        if !condition {
            return self;
        }
        let names: Vec<&'static str> = columns.iter().map(|c| c.name()).collect();
        self.fan_out(|set| {
            for name in &names {
                set.add_group_by(name);
            }
        })
    }

    /// `ORDER BY columns...` with an explicit direction flag
    pub fn order_by(self, ascending: bool, columns: &[E::Column]) -> Self {
        self.order_by_if(true, ascending, columns)
    }

    /// `ORDER BY columns...`, appended only when `condition` holds
    pub fn order_by_if(self, condition: bool, ascending: bool, columns: &[E::Column]) -> Self {
        if !condition {
            return self;
        }
        let order = if ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        let names: Vec<&'static str> = columns.iter().map(|c| c.name()).collect();
        self.fan_out(|set| {
            for name in &names {
                set.add_order_by(name, order);
            }
        })
    }

    /// `ORDER BY columns... ASC`
    pub fn order_by_asc(self, columns: &[E::Column]) -> Self {
        self.order_by_if(true, true, columns)
    }

    /// `ORDER BY columns... ASC`, appended only when `condition` holds
    pub fn order_by_asc_if(self, condition: bool, columns: &[E::Column]) -> Self {
        self.order_by_if(condition, true, columns)
    }

    /// `ORDER BY columns... DESC`
    pub fn order_by_desc(self, columns: &[E::Column]) -> Self {
        self.order_by_if(true, false, columns)
    }

    /// `ORDER BY columns... DESC`, appended only when `condition` holds
    pub fn order_by_desc_if(self, condition: bool, columns: &[E::Column]) -> Self {
        self.order_by_if(condition, false, columns)
    }
}

/// Single-scope builder used inside nested groups
///
/// Exposes the predicate vocabulary of [`EntityBuilder`] over one condition set.
/// The finished set is cloned into both outer sets by the nesting call, so the
/// dual-write invariant holds for nested clauses too.
pub struct ConditionBuilder<E>
where
    E: BuoyEntity,
{
    set: ConditionSet,
    _entity: PhantomData<E>,
}

impl<E> Default for ConditionBuilder<E>
where
    E: BuoyEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ConditionBuilder<E>
where
    E: BuoyEntity,
{
    pub fn new() -> Self {
        Self {
            set: ConditionSet::new(),
            _entity: PhantomData,
        }
    }

    pub(crate) fn into_set(self) -> ConditionSet {
        self.set
    }

    fn push(mut self, condition: bool, clause: Clause) -> Self {
        if condition {
            self.set.push(clause);
        }
        self
    }

    /// `column = value`
    pub fn eq<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.eq_if(true, column, value)
    }

    /// `column = value`, appended only when `condition` holds
    pub fn eq_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        let clause = Predicate::eq(column.name(), value.into()).into();
        self.push(condition, clause)
    }

    /// `column <> value`
    pub fn ne<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        self.ne_if(true, column, value)
    }

    /// `column <> value`, appended only when `condition` holds
    pub fn ne_if<V: Into<Value>>(self, condition: bool, column: E::Column, value: V) -> Self {
        let clause = Predicate::Ne {
            column: column.name().to_string(),
            value: value.into(),
        }
        .into();
        self.push(condition, clause)
    }

    /// `column > value`
    pub fn gt<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        let clause = Predicate::Gt {
            column: column.name().to_string(),
            value: value.into(),
        }
        .into();
        self.push(true, clause)
    }

    /// `column >= value`
    pub fn ge<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        let clause = Predicate::Ge {
            column: column.name().to_string(),
            value: value.into(),
        }
        .into();
        self.push(true, clause)
    }

    /// `column < value`
    pub fn lt<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        let clause = Predicate::Lt {
            column: column.name().to_string(),
            value: value.into(),
        }
        .into();
        self.push(true, clause)
    }

    /// `column <= value`
    pub fn le<V: Into<Value>>(self, column: E::Column, value: V) -> Self {
        let clause = Predicate::Le {
            column: column.name().to_string(),
            value: value.into(),
        }
        .into();
        self.push(true, clause)
    }

    /// `column BETWEEN low AND high`
    pub fn between<V: Into<Value>>(self, column: E::Column, low: V, high: V) -> Self {
        let clause = Predicate::Between {
            column: column.name().to_string(),
            low: low.into(),
            high: high.into(),
            negated: false,
        }
        .into();
        self.push(true, clause)
    }

    /// `column LIKE '%value%'`
    pub fn like<S: Into<String>>(self, column: E::Column, value: S) -> Self {
        let clause = Predicate::Like {
            column: column.name().to_string(),
            pattern: value.into(),
            matching: LikeMatch::Contains,
            negated: false,
        }
        .into();
        self.push(true, clause)
    }

    /// `column IS NULL`
    pub fn is_null(self, column: E::Column) -> Self {
        let clause = Predicate::is_null(column.name()).into();
        self.push(true, clause)
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(self, column: E::Column) -> Self {
        let clause = Predicate::IsNull {
            column: column.name().to_string(),
            negated: true,
        }
        .into();
        self.push(true, clause)
    }

    /// `column IN (values...)`
    pub fn is_in<V, I>(self, column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let clause = Predicate::In {
            column: column.name().to_string(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
        .into();
        self.push(true, clause)
    }

    /// `column NOT IN (values...)`
    pub fn is_not_in<V, I>(self, column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let clause = Predicate::In {
            column: column.name().to_string(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
        .into();
        self.push(true, clause)
    }

    /// Join the next clause with OR instead of AND
    pub fn or(self) -> Self {
        self.push(true, Clause::Or)
    }

    /// Nested group joined with the pending connective
    pub fn nested<F>(self, f: F) -> Self
    where
        F: FnOnce(ConditionBuilder<E>) -> ConditionBuilder<E>,
    {
        let inner = f(ConditionBuilder::new()).into_set();
        self.push(
            true,
            Clause::Nested {
                nesting: Nesting::Plain,
                inner,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_cfg::{User, UserColumn};
    use crate::entity::FieldFill;

    #[test]
    fn test_fan_out_keeps_sets_structurally_identical() {
        let builder = User::builder()
            .eq(UserColumn::Name, "qi")
            .ne(UserColumn::Email, "x@example.com")
            .between(UserColumn::Age, 18, 30)
            .is_not_null(UserColumn::Email)
            .is_in(UserColumn::Id, vec![1i64, 2, 3])
            .or()
            .like_prefix(UserColumn::Name, "z")
            .and_nested(|b| b.eq(UserColumn::Active, true).or().is_null(UserColumn::Age))
            .group_by(&[UserColumn::Age])
            .order_by_desc(&[UserColumn::Id]);

        assert_eq!(builder.query_set().clauses(), builder.update_set().clauses());
        assert_eq!(builder.query_set().group_by(), builder.update_set().group_by());
        assert_eq!(builder.query_set().order_by(), builder.update_set().order_by());
    }

    #[test]
    fn test_set_applies_to_update_scope_only() {
        let builder = User::builder()
            .eq(UserColumn::Id, 7i64)
            .set(UserColumn::Name, "renamed");

        assert_eq!(builder.query_set().clauses(), builder.update_set().clauses());
        assert!(builder.query_set().assignments().is_empty());
        assert_eq!(builder.update_set().assignments().len(), 1);
    }

    #[test]
    fn test_select_applies_to_query_scope_only() {
        let builder = User::builder().select_columns(&[UserColumn::Name, UserColumn::Age]);
        assert_eq!(builder.query_set().projection(), &["name", "age"]);
        assert!(builder.update_set().projection().is_empty());
    }

    #[test]
    fn test_guard_false_appends_nothing() {
        let builder = User::builder()
            .eq_if(false, UserColumn::Name, "qi")
            .is_null_if(false, UserColumn::Age)
            .or_if(false)
            .and_nested_if(false, |b| b.eq(UserColumn::Active, true))
            .group_by_if(false, &[UserColumn::Age])
            .order_by_if(false, true, &[UserColumn::Id])
            .set_if(false, UserColumn::Name, "x");

        assert!(builder.query_set().clauses().is_empty());
        assert!(builder.update_set().clauses().is_empty());
        assert!(builder.update_set().assignments().is_empty());
        assert!(builder.query_set().group_by().is_empty());
        assert!(builder.query_set().order_by().is_empty());
    }

    #[test]
    fn test_all_eq_null_handling() {
        // null_as_is_null = true: None becomes IS NULL
        let builder = User::builder().all_eq(vec![
            (UserColumn::Name, Some("qi")),
            (UserColumn::Age, None),
        ]);
        let clauses = builder.query_set().clauses();
        assert_eq!(clauses.len(), 2);
        assert!(matches!(&clauses[0], Clause::Predicate(Predicate::Eq { column, .. }) if column == "name"));
        assert!(
            matches!(&clauses[1], Clause::Predicate(Predicate::IsNull { column, negated: false }) if column == "age")
        );

        // null_as_is_null = false: None entries are skipped
        let builder = User::builder().all_eq_nulls(
            vec![(UserColumn::Name, Some("qi")), (UserColumn::Age, None)],
            false,
        );
        let clauses = builder.query_set().clauses();
        assert_eq!(clauses.len(), 1);
        assert!(matches!(&clauses[0], Clause::Predicate(Predicate::Eq { column, .. }) if column == "name"));
    }

    #[test]
    fn test_all_eq_filter_rejects_entries() {
        let builder = User::builder().all_eq_matching(
            |column, _| column.name() != "email",
            vec![
                (UserColumn::Name, Some("qi")),
                (UserColumn::Email, Some("x@example.com")),
            ],
            true,
        );
        let clauses = builder.query_set().clauses();
        assert_eq!(clauses.len(), 1);
        assert!(matches!(&clauses[0], Clause::Predicate(Predicate::Eq { column, .. }) if column == "name"));
    }

    #[test]
    fn test_all_eq_fans_out_to_both_sets() {
        let builder = User::builder().all_eq(vec![(UserColumn::Name, Some("qi"))]);
        assert_eq!(builder.query_set().clauses(), builder.update_set().clauses());
    }

    #[test]
    fn test_select_with_excludes_primary_key() {
        let builder = User::builder().select_with(|_| true);
        let projection = builder.query_set().projection();
        assert!(!projection.iter().any(|c| c == "id"));
        assert!(projection.iter().any(|c| c == "name"));
    }

    #[test]
    fn test_select_with_filters_on_metadata() {
        let builder = User::builder().select_with(|def| def.kind.is_text());
        let projection = builder.query_set().projection();
        assert!(projection.iter().any(|c| c == "name"));
        assert!(!projection.iter().any(|c| c == "age"));

        let builder = User::builder().select_with(|def| def.fill == FieldFill::Default);
        let projection = builder.query_set().projection();
        assert!(!projection.iter().any(|c| c == "created_at"));
    }

    #[test]
    fn test_by_seeds_template_on_both_sets() {
        let model = crate::tests_cfg::sample_user();
        let builder = User::builder().by(&model).unwrap();

        assert_eq!(builder.query_set().template(), builder.update_set().template());
        assert!(!builder.query_set().template().is_empty());
        // null fields are not seeded
        assert!(!builder
            .query_set()
            .template()
            .iter()
            .any(|(name, _)| name == "deleted_at"));
    }

    #[test]
    fn test_apply_if() {
        let builder = User::builder().apply_if(true, |b| b.eq(UserColumn::Name, "qi"));
        assert_eq!(builder.query_set().clauses().len(), 1);

        let builder = User::builder().apply_if(false, |b| b.eq(UserColumn::Name, "qi"));
        assert!(builder.query_set().clauses().is_empty());
    }

    #[test]
    fn test_nested_builder_clauses_fan_out() {
        let builder = User::builder().or_nested(|b| {
            b.ge(UserColumn::Age, 18)
                .le(UserColumn::Age, 30)
                .nested(|inner| inner.eq(UserColumn::Active, true))
        });

        let clauses = builder.query_set().clauses();
        assert_eq!(clauses.len(), 1);
        match &clauses[0] {
            Clause::Nested { nesting, inner } => {
                assert_eq!(*nesting, Nesting::Or);
                assert_eq!(inner.clauses().len(), 3);
            }
            other => panic!("expected nested clause, got {other:?}"),
        }
        assert_eq!(builder.query_set().clauses(), builder.update_set().clauses());
    }
}
