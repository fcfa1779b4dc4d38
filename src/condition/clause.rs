//! Clause model for condition sets.
//!
//! Predicates store column names and `sea_query::Value` operands, never driver
//! handles, so a set can be rendered any number of times and compared for equality.

use sea_query::Value;

/// Sort direction for ORDER BY entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Pattern anchoring for LIKE predicates
///
/// `Contains` renders `%value%`, `Prefix` renders `value%`, `Suffix` renders
/// `%value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMatch {
    Contains,
    Prefix,
    Suffix,
}

/// Connective a nested group joins with
///
/// `Plain` groups join with whatever connective is pending at their position
/// (AND by default, OR after an [`Clause::Or`] marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    And,
    Or,
    Plain,
}

/// One predicate clause: column reference, operator, operand(s)
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { column: String, value: Value },
    Ne { column: String, value: Value },
    Gt { column: String, value: Value },
    Ge { column: String, value: Value },
    Lt { column: String, value: Value },
    Le { column: String, value: Value },
    Between {
        column: String,
        low: Value,
        high: Value,
        negated: bool,
    },
    Like {
        column: String,
        pattern: String,
        matching: LikeMatch,
        negated: bool,
    },
    IsNull { column: String, negated: bool },
    In {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },
}

impl Predicate {
    pub(crate) fn eq(column: &str, value: Value) -> Self {
        Predicate::Eq {
            column: column.to_string(),
            value,
        }
    }

    pub(crate) fn is_null(column: &str) -> Self {
        Predicate::IsNull {
            column: column.to_string(),
            negated: false,
        }
    }

    /// The column this predicate references
    pub fn column(&self) -> &str {
        match self {
            Predicate::Eq { column, .. }
            | Predicate::Ne { column, .. }
            | Predicate::Gt { column, .. }
            | Predicate::Ge { column, .. }
            | Predicate::Lt { column, .. }
            | Predicate::Le { column, .. }
            | Predicate::Between { column, .. }
            | Predicate::Like { column, .. }
            | Predicate::IsNull { column, .. }
            | Predicate::In { column, .. } => column,
        }
    }
}

/// One entry in a condition set's clause list
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// A predicate, joined with the pending connective (AND by default)
    Predicate(Predicate),
    /// Connective marker: join the next clause with OR instead of AND
    Or,
    /// A nested group with its own clause list
    Nested { nesting: Nesting, inner: ConditionSet },
}

impl From<Predicate> for Clause {
    fn from(p: Predicate) -> Self {
        Clause::Predicate(p)
    }
}

/// Ordered clause list plus the statement annotations that ride along with it
///
/// Two instances exist per builder lifetime: one scoped to read filtering, one to
/// write targeting. They are kept structurally identical by construction except for
/// SET assignments (write scope only) and the projection (read scope only).
///
/// `Clone` exists for limit-probe isolation: the limited-to-one terminal operation
/// clones the read set before appending its row limit, so the annotation never
/// leaks into later use of the same builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionSet {
    clauses: Vec<Clause>,
    projection: Vec<String>,
    group_by: Vec<String>,
    order_by: Vec<(String, SortOrder)>,
    assignments: Vec<(String, Value)>,
    template: Vec<(String, Value)>,
    limit: Option<u64>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause
    pub(crate) fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub(crate) fn add_projection(&mut self, column: &str) {
        self.projection.push(column.to_string());
    }

    pub(crate) fn add_group_by(&mut self, column: &str) {
        self.group_by.push(column.to_string());
    }

    pub(crate) fn add_order_by(&mut self, column: &str, order: SortOrder) {
        self.order_by.push((column.to_string(), order));
    }

    pub(crate) fn add_assignment(&mut self, column: &str, value: Value) {
        self.assignments.push((column.to_string(), value));
    }

    pub(crate) fn seed_template(&mut self, entries: Vec<(String, Value)>) {
        self.template = entries;
    }

    /// Return a copy of this set with a row-limit annotation appended
    pub(crate) fn with_limit(&self, limit: u64) -> Self {
        let mut cloned = self.clone();
        cloned.limit = Some(limit);
        cloned
    }

    /// The clause list, in append order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Projection columns; empty means `*`
    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    /// GROUP BY columns
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// ORDER BY entries
    pub fn order_by(&self) -> &[(String, SortOrder)] {
        &self.order_by
    }

    /// SET assignments (write scope only)
    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }

    /// Template seed values (implicit equals clauses)
    pub fn template(&self) -> &[(String, Value)] {
        &self.template
    }

    /// Row-limit annotation, if any
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Whether the set constrains rows at all
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty() && self.template.is_empty()
    }
}
