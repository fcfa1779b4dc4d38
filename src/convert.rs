//! Field-copy mechanics for transfer/persisted object conversion.
//!
//! Copies go through a JSON object: the source serializes to a map, the target
//! deserializes from it. Matching is by field name and compatible type; fields the
//! target does not know are silently skipped. A field the target requires but the
//! source does not carry must declare a serde default on the target type, otherwise
//! the copy reports a conversion error.

use crate::executor::{BuoyError, JsonRow};
use sea_query::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Shallow-copy matching fields from `source` into a fresh `T`
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct UserVo {
///     name: String,
///     nickname: String,
/// }
///
/// #[derive(Deserialize)]
/// struct UserModel {
///     name: String,
/// }
///
/// let vo = UserVo { name: "qi".to_string(), nickname: "q".to_string() };
/// let model: UserModel = buoy::convert::copy(&vo).unwrap();
/// assert_eq!(model.name, "qi");
/// // `nickname` was dropped, not errored
/// ```
///
/// # Errors
///
/// Returns a conversion error when the source does not serialize to an object or
/// the target rejects the resulting map.
pub fn copy<S, T>(source: &S) -> Result<T, BuoyError>
where
    S: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let value = serde_json::to_value(source)?;
    Ok(serde_json::from_value(value)?)
}

/// Shallow-copy every element of `items` into a `Vec<T>`
///
/// Returns an empty `Vec` for an empty input.
pub fn copy_list<S, T>(items: &[S]) -> Result<Vec<T>, BuoyError>
where
    S: Serialize,
    T: DeserializeOwned,
{
    items.iter().map(|item| copy(item)).collect()
}

/// Deserialize a model from an executor row
pub(crate) fn from_row<T>(row: JsonRow) -> Result<T, BuoyError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(serde_json::Value::Object(row))?)
}

/// Serialize an object into a column-name-to-JSON-value map
pub(crate) fn to_field_map<S>(source: &S) -> Result<JsonRow, BuoyError>
where
    S: Serialize + ?Sized,
{
    match serde_json::to_value(source)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(BuoyError::ConversionError(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Map a JSON value to a bindable `sea_query::Value`; `None` for JSON null
pub(crate) fn json_to_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some((*b).into()),
        serde_json::Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        }),
        serde_json::Value::String(s) => Some(s.clone().into()),
        // arrays and objects bind as JSON
        other => Some(other.clone().into()),
    }
}

/// Serialize an object and keep only its non-null fields as bindable values
pub(crate) fn non_null_values<S>(source: &S) -> Result<Vec<(String, Value)>, BuoyError>
where
    S: Serialize + ?Sized,
{
    let map = to_field_map(source)?;
    Ok(map
        .iter()
        .filter_map(|(name, value)| json_to_value(value).map(|v| (name.clone(), v)))
        .collect())
}
