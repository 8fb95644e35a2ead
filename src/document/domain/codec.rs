//! Conversion between typed documents and raw field maps.

use super::Fields;
use serde::{Serialize, de::DeserializeOwned, ser::Error as _};
use serde_json::Value;

/// Serialises a value into top-level document fields.
///
/// # Errors
///
/// Returns a serialisation error when the value fails to serialise or does
/// not serialise to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(serde_json::Error::custom(
            "documents must serialise to a JSON object",
        )),
    }
}

/// Deserialises top-level document fields into a typed value.
///
/// # Errors
///
/// Returns a deserialisation error when the fields do not match `T`.
pub fn from_fields<T: DeserializeOwned>(fields: Fields) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(fields))
}
