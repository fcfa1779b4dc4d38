//! Entity and column metadata traits.
//!
//! This module provides the statically declared metadata the builder layer works
//! against: an entity names its table and its model/column types through associated
//! types, and each column enum exposes a `FieldDef` describing name, type category,
//! and fill strategy. There is no runtime reflection; everything is declared at the
//! definition site (see the `columns!` macro).

use crate::builder::EntityBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Trait for naming the table an entity maps to
pub trait BuoyEntityName {
    /// The table name for this entity
    fn table_name(&self) -> &'static str;
}

/// Trait for entity definitions
///
/// An entity ties together a table name, a persisted model type, and a column enum.
/// Models are plain serde structs; field names double as column names, so a model
/// row-trips through the executor's JSON rows without per-entity glue code.
///
/// # Example
///
/// ```no_run
/// use buoy::{BuoyEntity, BuoyEntityName, columns};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Copy, Clone, Debug)]
/// struct User;
///
/// impl BuoyEntityName for User {
///     fn table_name(&self) -> &'static str {
///         "users"
///     }
/// }
///
/// columns! {
///     pub enum UserColumn {
///         Id: "id", BigInt, primary_key;
///         Name: "name", Text;
///     }
/// }
///
/// #[derive(Serialize, Deserialize, Clone, Debug)]
/// struct UserModel {
///     id: Option<i64>,
///     name: String,
/// }
///
/// impl BuoyEntity for User {
///     type Model = UserModel;
///     type Column = UserColumn;
/// }
///
/// let builder = User::builder();
/// ```
pub trait BuoyEntity: BuoyEntityName + Default {
    /// The persisted model type for this entity
    type Model: Serialize + DeserializeOwned + Clone + fmt::Debug;
    /// The column enum for this entity
    type Column: EntityColumn;

    /// Start a fresh builder for this entity
    ///
    /// Each logical query or mutation must own its own builder; builders are not
    /// reused across unrelated operations.
    fn builder() -> EntityBuilder<Self>
    where
        Self: Sized,
    {
        EntityBuilder::new()
    }
}

/// Trait for column enums
///
/// Implemented by the `columns!` macro. Columns are `Copy` identifiers resolved at
/// compile time; the builder stores their static names, never closures or strings
/// supplied at runtime.
pub trait EntityColumn: Copy + 'static {
    /// The column name as it appears in SQL
    fn name(self) -> &'static str;

    /// Field metadata for this column
    fn def(self) -> FieldDef;

    /// All columns of the entity, in declaration order
    fn all() -> &'static [Self];
}

/// Column type category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    Text,
    Boolean,
    Timestamp,
    Date,
    Uuid,
    Json,
    Binary,
}

impl FieldKind {
    /// Whether this category holds character data
    pub const fn is_text(self) -> bool {
        matches!(self, FieldKind::Text)
    }

    /// Whether this category holds numeric data
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            FieldKind::Integer
                | FieldKind::BigInt
                | FieldKind::Float
                | FieldKind::Double
                | FieldKind::Decimal
        )
    }
}

/// Fill strategy for a column
///
/// Describes when a column's value is populated automatically (by a `before_put`
/// hook or by the database). `Default` means the caller always supplies the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFill {
    Default,
    Insert,
    Update,
    InsertUpdate,
}

/// Field metadata: name, type category, fill strategy, primary-key flag
///
/// This is the vocabulary `EntityBuilder::select_with` predicates filter on.
///
/// # Example
///
/// ```
/// use buoy::{FieldDef, FieldKind, FieldFill};
///
/// let def = FieldDef::new("created_at", FieldKind::Timestamp).fill(FieldFill::Insert);
/// assert_eq!(def.name, "created_at");
/// assert_eq!(def.fill, FieldFill::Insert);
/// assert!(!def.primary_key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Column name as it appears in SQL
    pub name: &'static str,
    /// Type category
    pub kind: FieldKind,
    /// Fill strategy
    pub fill: FieldFill,
    /// Whether this column is (part of) the primary key
    pub primary_key: bool,
}

impl FieldDef {
    /// Create a definition with default fill and no primary-key flag
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            fill: FieldFill::Default,
            primary_key: false,
        }
    }

    /// Mark this field as the primary key
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set the fill strategy
    pub const fn fill(mut self, fill: FieldFill) -> Self {
        self.fill = fill;
        self
    }
}
