//! Value representations produced by generators.
//!
//! `GeneratedValue` is the type-erased output of every randomizer, and
//! `PopulatedObject` is one fully populated instance of a schema type.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use ulid::Ulid;
use uuid::Uuid;

/// Raw generated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// String value
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// UUID value
    Uuid(Uuid),

    /// ULID value
    Ulid(Ulid),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Date/time in UTC
    DateTime(DateTime<Utc>),

    /// Time duration
    Duration(Duration),

    /// Decimal value stored as string with precision info
    Decimal {
        /// String representation of the decimal value
        value: String,
        /// Total number of digits
        precision: u8,
        /// Number of digits after decimal point
        scale: u8,
    },

    /// Array of values
    Array(Vec<GeneratedValue>),

    /// Nested object
    Object(HashMap<String, GeneratedValue>),

    /// Null value
    Null,
}

impl GeneratedValue {
    /// Create a new decimal value.
    pub fn decimal(value: impl Into<String>, precision: u8, scale: u8) -> Self {
        Self::Decimal {
            value: value.into(),
            precision,
            scale,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Int32(i) => Some(*i as i64),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an array slice.
    pub fn as_array(&self) -> Option<&[GeneratedValue]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Try to get this value as a nested object.
    pub fn as_object(&self) -> Option<&HashMap<String, GeneratedValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for GeneratedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for GeneratedValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<i16> for GeneratedValue {
    fn from(value: i16) -> Self {
        Self::Int32(value as i32)
    }
}

impl From<f64> for GeneratedValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<f32> for GeneratedValue {
    fn from(value: f32) -> Self {
        Self::Float64(value as f64)
    }
}

impl From<Vec<u8>> for GeneratedValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<String> for GeneratedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Uuid> for GeneratedValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<Ulid> for GeneratedValue {
    fn from(value: Ulid) -> Self {
        Self::Ulid(value)
    }
}

impl From<NaiveDate> for GeneratedValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for GeneratedValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<DateTime<Utc>> for GeneratedValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Duration> for GeneratedValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl<T: Into<GeneratedValue>> From<Option<T>> for GeneratedValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One populated instance of a schema type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedObject {
    /// Name of the type this object was built from
    pub type_name: String,

    /// Position of this object within the population pass
    pub index: u64,

    /// Field values keyed by field name
    pub fields: HashMap<String, GeneratedValue>,
}

impl PopulatedObject {
    /// Create a new populated object.
    pub fn new(
        type_name: impl Into<String>,
        index: u64,
        fields: HashMap<String, GeneratedValue>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            index,
            fields,
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&GeneratedValue> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Convert into a nested object value.
    pub fn into_value(self) -> GeneratedValue {
        GeneratedValue::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(GeneratedValue::Int32(7).as_i32(), Some(7));
        assert_eq!(GeneratedValue::Int32(7).as_i64(), Some(7));
        assert_eq!(GeneratedValue::Int64(7).as_i32(), None);
        assert_eq!(GeneratedValue::from("abc").as_str(), Some("abc"));
        assert!(GeneratedValue::Null.is_null());
        assert!(!GeneratedValue::Bool(false).is_null());
    }

    #[test]
    fn test_from_option() {
        let none: Option<i32> = None;
        assert_eq!(GeneratedValue::from(none), GeneratedValue::Null);
        assert_eq!(GeneratedValue::from(Some(3)), GeneratedValue::Int32(3));
    }

    #[test]
    fn test_populated_object() {
        let mut fields = HashMap::new();
        fields.insert("age".to_string(), GeneratedValue::Int32(30));
        let object = PopulatedObject::new("person", 4, fields);

        assert_eq!(object.type_name, "person");
        assert_eq!(object.index, 4);
        assert_eq!(object.field_count(), 1);
        assert_eq!(object.get_field("age"), Some(&GeneratedValue::Int32(30)));
        assert!(object.get_field("missing").is_none());

        let value = object.into_value();
        assert_eq!(
            value.as_object().and_then(|m| m.get("age")),
            Some(&GeneratedValue::Int32(30))
        );
    }
}
