//! # Buoy
//!
//! Dual-scope fluent query construction and transfer/persisted object conversion
//! on top of a pluggable SQL executor.
//!
//! One [`EntityBuilder`] chain describes both a read filter and a write target:
//! every predicate call fans out to a query-scoped and an update-scoped condition
//! set, so the same expression can list rows, probe for one, update, or delete.
//! SQL rendering is delegated to `sea-query`; execution to a [`BuoyExecutor`]
//! implementation supplied by the application.
//!
//! The [`VoService`] trait adds the transfer-object side: shallow field copies
//! between VO and persisted model, save-or-update with before/after hooks, and
//! bulk listing.

pub mod active_model;
pub mod builder;
pub mod condition;
pub mod config;
pub mod convert;
pub mod entity;
pub mod executor;
mod macros;
pub mod service;
pub mod test_helpers;
#[cfg(test)]
mod tests_cfg;

// The SQL builder is part of the public API (operand values, executor params).
pub use sea_query;

#[doc(inline)]
pub use builder::{ConditionBuilder, EntityBuilder};
#[doc(inline)]
pub use condition::{Clause, ConditionSet, LikeMatch, Nesting, Predicate, SortOrder};
#[doc(inline)]
pub use config::BuilderConfig;
#[doc(inline)]
pub use convert::{copy, copy_list};
#[doc(inline)]
pub use entity::{BuoyEntity, BuoyEntityName, EntityColumn, FieldDef, FieldFill, FieldKind};
#[doc(inline)]
pub use executor::{BuoyError, BuoyExecutor, JsonRow};
#[doc(inline)]
pub use service::VoService;
