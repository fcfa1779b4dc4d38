//! Shared fixture entities for unit tests.
#![allow(dead_code)]

use crate::entity::{BuoyEntity, BuoyEntityName};
use crate::executor::JsonRow;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Default, Copy, Clone, Debug)]
pub struct User;

impl BuoyEntityName for User {
    fn table_name(&self) -> &'static str {
        "users"
    }
}

crate::columns! {
    pub enum UserColumn {
        Id: "id", BigInt, primary_key;
        Name: "name", Text;
        Age: "age", Integer;
        Email: "email", Text;
        Active: "active", Boolean;
        CreatedAt: "created_at", Timestamp, fill_insert;
        DeletedAt: "deleted_at", Timestamp;
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserModel {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BuoyEntity for User {
    type Model = UserModel;
    type Column = UserColumn;
}

pub fn sample_user() -> UserModel {
    UserModel {
        id: Some(7),
        name: "qi".to_string(),
        age: Some(30),
        email: Some("qi@example.com".to_string()),
        active: true,
        created_at: None,
        deleted_at: None,
    }
}

pub fn user_row(id: i64, name: &str) -> JsonRow {
    let mut row = JsonRow::new();
    row.insert("id".to_string(), serde_json::json!(id));
    row.insert("name".to_string(), serde_json::json!(name));
    row.insert("active".to_string(), serde_json::json!(true));
    row
}

// A second fixture with non-integer key and decimal column, used where type
// variety matters.
#[derive(Default, Copy, Clone, Debug)]
pub struct Order;

impl BuoyEntityName for Order {
    fn table_name(&self) -> &'static str {
        "orders"
    }
}

crate::columns! {
    pub enum OrderColumn {
        Id: "id", Uuid, primary_key;
        Total: "total", Decimal;
        PlacedAt: "placed_at", Timestamp, fill_insert;
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderModel {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub total: Decimal,
    #[serde(default)]
    pub placed_at: Option<DateTime<Utc>>,
}

impl BuoyEntity for Order {
    type Model = OrderModel;
    type Column = OrderColumn;
}
