//! Conversion of generated values to JSON.
//!
//! - bytes are base64 encoded
//! - dates are `YYYY-MM-DD`, times `HH:MM:SS`, date-times RFC 3339
//! - durations are whole seconds as a number
//! - decimals are strings, to keep their scale

use base64::Engine;
use seedfill_core::{GeneratedValue, PopulatedObject};
use serde_json::json;
use std::collections::HashMap;

/// Convert a map of generated values to a JSON object.
fn hashmap_to_json(map: &HashMap<String, GeneratedValue>) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (key, value) in map {
        obj.insert(key.clone(), generated_value_to_json(value));
    }
    serde_json::Value::Object(obj)
}

/// Convert a generated value to a JSON value.
pub fn generated_value_to_json(value: &GeneratedValue) -> serde_json::Value {
    match value {
        GeneratedValue::Null => serde_json::Value::Null,
        GeneratedValue::Bool(b) => json!(*b),
        GeneratedValue::Int32(i) => json!(*i),
        GeneratedValue::Int64(i) => json!(*i),
        GeneratedValue::Float64(f) => json!(*f),
        GeneratedValue::String(s) => json!(s),
        GeneratedValue::Bytes(b) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(b);
            json!(encoded)
        }
        GeneratedValue::Uuid(u) => json!(u.to_string()),
        GeneratedValue::Ulid(u) => json!(u.to_string()),
        GeneratedValue::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
        GeneratedValue::Time(t) => json!(t.format("%H:%M:%S").to_string()),
        GeneratedValue::DateTime(dt) => json!(dt.to_rfc3339()),
        GeneratedValue::Duration(d) => json!(d.as_secs()),
        GeneratedValue::Decimal { value, .. } => json!(value),
        GeneratedValue::Array(arr) => {
            json!(arr.iter().map(generated_value_to_json).collect::<Vec<_>>())
        }
        GeneratedValue::Object(map) => hashmap_to_json(map),
    }
}

/// Convert a populated object to a JSON object of its fields.
pub fn populated_object_to_json(object: &PopulatedObject) -> serde_json::Value {
    hashmap_to_json(&object.fields)
}
