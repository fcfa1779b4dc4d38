//! Rendering of condition sets into `sea-query` statements.
//!
//! Clauses fold left-to-right: predicates join with AND by default, an `Or` marker
//! joins the next predicate (or nested group) with OR. Template seed values render
//! as implicit equals predicates ahead of the explicit clauses. Parenthesization is
//! handled by `sea-query`'s precedence rules.

use crate::condition::clause::{Clause, ConditionSet, LikeMatch, Nesting, Predicate, SortOrder};
use crate::executor::BuoyError;
use sea_query::{
    Asterisk, DeleteStatement, Expr, ExprTrait, Iden, Order, SelectStatement, UpdateStatement,
};

pub(crate) struct ColName(pub String);

impl Iden for ColName {
    fn unquoted(&self) -> &str {
        &self.0
    }
}

pub(crate) struct TableName(pub &'static str);

impl Iden for TableName {
    fn unquoted(&self) -> &str {
        self.0
    }
}

fn col(name: &str) -> Expr {
    Expr::col(ColName(name.to_string()))
}

/// Render one predicate to an expression.
///
/// Returns `None` for an `In`/`NotIn` over an empty collection: no SQL is appended
/// for it, matching the layer's documented membership semantics.
fn predicate_expr(predicate: &Predicate) -> Option<Expr> {
    let expr = match predicate {
        Predicate::Eq { column, value } => col(column).eq(value.clone()),
        Predicate::Ne { column, value } => col(column).ne(value.clone()),
        Predicate::Gt { column, value } => col(column).gt(value.clone()),
        Predicate::Ge { column, value } => col(column).gte(value.clone()),
        Predicate::Lt { column, value } => col(column).lt(value.clone()),
        Predicate::Le { column, value } => col(column).lte(value.clone()),
        Predicate::Between {
            column,
            low,
            high,
            negated,
        } => {
            if *negated {
                col(column).not_between(low.clone(), high.clone())
            } else {
                col(column).between(low.clone(), high.clone())
            }
        }
        Predicate::Like {
            column,
            pattern,
            matching,
            negated,
        } => {
            let pattern = match matching {
                LikeMatch::Contains => format!("%{pattern}%"),
                LikeMatch::Prefix => format!("{pattern}%"),
                LikeMatch::Suffix => format!("%{pattern}"),
            };
            if *negated {
                col(column).not_like(pattern)
            } else {
                col(column).like(pattern)
            }
        }
        Predicate::IsNull { column, negated } => {
            if *negated {
                col(column).is_not_null()
            } else {
                col(column).is_null()
            }
        }
        Predicate::In {
            column,
            values,
            negated,
        } => {
            if values.is_empty() {
                return None;
            }
            if *negated {
                col(column).is_not_in(values.clone())
            } else {
                col(column).is_in(values.clone())
            }
        }
    };
    Some(expr)
}

fn join(acc: Option<Expr>, expr: Expr, with_or: bool) -> Expr {
    match acc {
        None => expr,
        Some(prev) => {
            if with_or {
                prev.or(expr)
            } else {
                prev.and(expr)
            }
        }
    }
}

/// Fold a condition set's template and clauses into a single WHERE expression
pub(crate) fn where_expr(set: &ConditionSet) -> Option<Expr> {
    let mut acc: Option<Expr> = None;

    for (name, value) in set.template() {
        let expr = col(name).eq(value.clone());
        acc = Some(join(acc, expr, false));
    }

    let mut pending_or = false;
    for clause in set.clauses() {
        match clause {
            Clause::Or => pending_or = true,
            Clause::Predicate(predicate) => {
                if let Some(expr) = predicate_expr(predicate) {
                    acc = Some(join(acc, expr, pending_or));
                }
                pending_or = false;
            }
            Clause::Nested { nesting, inner } => {
                if let Some(expr) = where_expr(inner) {
                    let with_or = match nesting {
                        Nesting::Or => true,
                        Nesting::And => false,
                        Nesting::Plain => pending_or,
                    };
                    acc = Some(join(acc, expr, with_or));
                }
                pending_or = false;
            }
        }
    }

    acc
}

/// Render the read-scoped set into a SELECT statement
pub(crate) fn select_statement(set: &ConditionSet, table: &'static str) -> SelectStatement {
    let mut query = SelectStatement::default();

    if set.projection().is_empty() {
        query.column(Asterisk);
    } else {
        query.columns(set.projection().iter().map(|c| ColName(c.clone())));
    }
    query.from(TableName(table));

    if let Some(expr) = where_expr(set) {
        query.and_where(expr);
    }
    for column in set.group_by() {
        query.group_by_col(ColName(column.clone()));
    }
    for (column, order) in set.order_by() {
        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        query.order_by(ColName(column.clone()), order);
    }
    if let Some(limit) = set.limit() {
        query.limit(limit);
    }

    query
}

/// Render the read-scoped set into a COUNT(*) statement
///
/// Only the WHERE conditions carry over; projection, ordering, and the row-limit
/// annotation do not affect a count.
pub(crate) fn count_statement(set: &ConditionSet, table: &'static str) -> SelectStatement {
    let mut query = SelectStatement::default();
    query.expr(Expr::cust("COUNT(*)")).from(TableName(table));
    if let Some(expr) = where_expr(set) {
        query.and_where(expr);
    }
    query
}

/// Render the write-scoped set into an UPDATE statement
///
/// # Errors
///
/// Returns [`BuoyError::NoSetClauses`] when the set holds no SET assignments.
pub(crate) fn update_statement(
    set: &ConditionSet,
    table: &'static str,
) -> Result<UpdateStatement, BuoyError> {
    if set.assignments().is_empty() {
        return Err(BuoyError::NoSetClauses);
    }

    let mut query = UpdateStatement::default();
    query.table(TableName(table));
    for (column, value) in set.assignments() {
        query.value(ColName(column.clone()), Expr::val(value.clone()));
    }
    if let Some(expr) = where_expr(set) {
        query.and_where(expr);
    }

    Ok(query)
}

/// Render the write-scoped set into a DELETE statement
pub(crate) fn delete_statement(set: &ConditionSet, table: &'static str) -> DeleteStatement {
    let mut query = DeleteStatement::default();
    query.from_table(TableName(table));
    if let Some(expr) = where_expr(set) {
        query.and_where(expr);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::PostgresQueryBuilder;

    fn set_with(clauses: Vec<Clause>) -> ConditionSet {
        let mut set = ConditionSet::new();
        for clause in clauses {
            set.push(clause);
        }
        set
    }

    #[test]
    fn test_select_defaults_to_asterisk() {
        let set = ConditionSet::new();
        let (sql, values) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.starts_with("SELECT *"));
        assert!(sql.contains("FROM \"users\""));
        assert!(!sql.contains("WHERE"));
        assert!(values.0.is_empty());
    }

    #[test]
    fn test_clauses_join_with_and_by_default() {
        let set = set_with(vec![
            Predicate::eq("name", "qi".into()).into(),
            Predicate::is_null("age").into(),
        ]);
        let (sql, values) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains("WHERE"));
        assert!(sql.contains(" AND "));
        assert!(!sql.contains(" OR "));
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn test_or_marker_flips_next_connective() {
        let set = set_with(vec![
            Predicate::eq("name", "qi".into()).into(),
            Clause::Or,
            Predicate::eq("name", "zq".into()).into(),
        ]);
        let (sql, _) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains(" OR "));
        assert!(!sql.contains(" AND "));
    }

    #[test]
    fn test_trailing_or_marker_is_inert() {
        let set = set_with(vec![Predicate::eq("name", "qi".into()).into(), Clause::Or]);
        let (sql, _) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(!sql.contains(" OR "));
    }

    #[test]
    fn test_nested_group_renders_with_connective() {
        let mut inner = ConditionSet::new();
        inner.push(Predicate::eq("name", "qi".into()).into());
        inner.push(Clause::Or);
        inner.push(Predicate::eq("name", "zq".into()).into());

        let set = set_with(vec![
            Predicate::is_null("deleted_at").into(),
            Clause::Nested {
                nesting: Nesting::And,
                inner,
            },
        ]);
        let (sql, values) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains(" AND "));
        assert!(sql.contains(" OR "));
        assert_eq!(values.0.len(), 2);
    }

    #[test]
    fn test_empty_in_appends_no_sql() {
        let set = set_with(vec![Clause::Predicate(Predicate::In {
            column: "id".to_string(),
            values: vec![],
            negated: false,
        })]);
        let (sql, _) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_like_anchoring() {
        for (matching, expected) in [
            (LikeMatch::Contains, "%qi%"),
            (LikeMatch::Prefix, "qi%"),
            (LikeMatch::Suffix, "%qi"),
        ] {
            let set = set_with(vec![Clause::Predicate(Predicate::Like {
                column: "name".to_string(),
                pattern: "qi".to_string(),
                matching,
                negated: false,
            })]);
            let (_, values) = select_statement(&set, "users").build(PostgresQueryBuilder);
            assert_eq!(values.0, vec![expected.into()]);
        }
    }

    #[test]
    fn test_template_renders_before_clauses() {
        let mut set = set_with(vec![Predicate::is_null("deleted_at").into()]);
        set.seed_template(vec![("name".to_string(), "qi".into())]);
        let (sql, values) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains("WHERE"));
        assert!(sql.contains(" AND "));
        assert_eq!(values.0.len(), 1);
        let name_pos = sql.find("\"name\"").unwrap();
        let deleted_pos = sql.find("\"deleted_at\"").unwrap();
        assert!(name_pos < deleted_pos);
    }

    #[test]
    fn test_limit_annotation_renders() {
        let set = ConditionSet::new().with_limit(1);
        let (sql, _) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains("LIMIT"));
    }

    #[test]
    fn test_projection_group_and_order() {
        let mut set = ConditionSet::new();
        set.add_projection("name");
        set.add_projection("age");
        set.add_group_by("age");
        set.add_order_by("name", SortOrder::Desc);

        let (sql, _) = select_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains("\"name\", \"age\""));
        assert!(!sql.contains('*'));
        assert!(sql.contains("GROUP BY \"age\""));
        assert!(sql.contains("ORDER BY \"name\" DESC"));
    }

    #[test]
    fn test_update_requires_assignments() {
        let set = ConditionSet::new();
        let err = update_statement(&set, "users").unwrap_err();
        assert!(matches!(err, BuoyError::NoSetClauses));
    }

    #[test]
    fn test_update_renders_set_and_where() {
        let mut set = set_with(vec![Predicate::eq("id", 7i64.into()).into()]);
        set.add_assignment("name", "qi".into());

        let (sql, values) = update_statement(&set, "users")
            .unwrap()
            .build(PostgresQueryBuilder);
        assert!(sql.starts_with("UPDATE \"users\" SET"));
        assert!(sql.contains("\"name\""));
        assert!(sql.contains("WHERE"));
        assert_eq!(values.0.len(), 2);
    }

    #[test]
    fn test_delete_renders_where() {
        let set = set_with(vec![Predicate::eq("id", 7i64.into()).into()]);
        let (sql, _) = delete_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.starts_with("DELETE FROM \"users\""));
        assert!(sql.contains("WHERE"));
    }

    #[test]
    fn test_count_ignores_order_and_limit() {
        let mut set = set_with(vec![Predicate::eq("active", true.into()).into()]);
        set.add_order_by("id", SortOrder::Asc);
        let set = set.with_limit(1);

        let (sql, _) = count_statement(&set, "users").build(PostgresQueryBuilder);
        assert!(sql.contains("COUNT(*)"));
        assert!(sql.contains("WHERE"));
        assert!(!sql.contains("ORDER BY"));
        assert!(!sql.contains("LIMIT"));
    }
}
