//! Field types understood by the populator.
//!
//! This module defines `FieldType`, the declared type of a field in an
//! object schema. Registries use it to pick a default generator and the
//! populator uses it to decide when to recurse.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Declared type of a field.
///
/// # YAML Format
///
/// Simple types can be specified as strings:
/// ```yaml
/// type: uuid
/// type: int
/// type: text
/// ```
///
/// Complex types use object format:
/// ```yaml
/// type:
///   type: var_char
///   length: 255
/// type:
///   type: object
///   name: address
/// type:
///   type: array
///   element_type: text
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Boolean value
    Bool,

    /// 16-bit signed integer
    Int16,

    /// 32-bit signed integer
    Int32,

    /// 64-bit signed integer
    Int64,

    /// 32-bit floating point
    Float32,

    /// 64-bit floating point
    Float64,

    /// Exact decimal with specified precision and scale
    Decimal {
        /// Total number of digits
        precision: u8,
        /// Number of digits after the decimal point
        scale: u8,
    },

    /// Fixed-length character string
    Char {
        /// Exact length
        length: u16,
    },

    /// Variable-length character string with max length
    VarChar {
        /// Maximum length
        length: u16,
    },

    /// Unlimited text
    Text,

    /// Binary data
    Bytes,

    /// UUID (128-bit)
    Uuid,

    /// ULID
    Ulid,

    /// Calendar date (YYYY-MM-DD)
    Date,

    /// Time of day (HH:MM:SS)
    Time,

    /// Date and time in UTC
    DateTime,

    /// Time duration
    Duration,

    /// One of a fixed set of string values
    Enum {
        /// Allowed values
        values: Vec<String>,
    },

    /// Collection of elements of a single type
    Array {
        /// Element type
        element_type: Box<FieldType>,
    },

    /// Nested object described by another type in the schema
    Object {
        /// Name of the referenced type
        name: String,
    },
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Bool => serializer.serialize_str("bool"),
            Self::Int16 => serializer.serialize_str("small_int"),
            Self::Int32 => serializer.serialize_str("int"),
            Self::Int64 => serializer.serialize_str("big_int"),
            Self::Float32 => serializer.serialize_str("float"),
            Self::Float64 => serializer.serialize_str("double"),
            Self::Text => serializer.serialize_str("text"),
            Self::Bytes => serializer.serialize_str("bytes"),
            Self::Uuid => serializer.serialize_str("uuid"),
            Self::Ulid => serializer.serialize_str("ulid"),
            Self::Date => serializer.serialize_str("date"),
            Self::Time => serializer.serialize_str("time"),
            Self::DateTime => serializer.serialize_str("date_time"),
            Self::Duration => serializer.serialize_str("duration"),

            Self::Decimal { precision, scale } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "decimal")?;
                map.serialize_entry("precision", precision)?;
                map.serialize_entry("scale", scale)?;
                map.end()
            }
            Self::Char { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "char")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::VarChar { length } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "var_char")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::Enum { values } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "enum")?;
                map.serialize_entry("values", values)?;
                map.end()
            }
            Self::Array { element_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("element_type", element_type)?;
                map.end()
            }
            Self::Object { name } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
        }
    }
}

/// Parse the string form shared by simple types in both formats.
fn simple_type(name: &str) -> Option<FieldType> {
    match name {
        "bool" | "boolean" => Some(FieldType::Bool),
        "small_int" | "smallint" => Some(FieldType::Int16),
        "int" | "integer" => Some(FieldType::Int32),
        "big_int" | "bigint" | "long" => Some(FieldType::Int64),
        "float" => Some(FieldType::Float32),
        "double" => Some(FieldType::Float64),
        "text" | "string" => Some(FieldType::Text),
        "bytes" => Some(FieldType::Bytes),
        "uuid" => Some(FieldType::Uuid),
        "ulid" => Some(FieldType::Ulid),
        "date" => Some(FieldType::Date),
        "time" => Some(FieldType::Time),
        "date_time" | "datetime" => Some(FieldType::DateTime),
        "duration" => Some(FieldType::Duration),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct FieldTypeVisitor;

        impl<'de> Visitor<'de> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string or map representing a FieldType")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                simple_type(value).ok_or_else(|| E::custom(format!("unknown simple type: {value}")))
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                if let Some(simple) = simple_type(&type_name) {
                    return Ok(simple);
                }

                match type_name.as_str() {
                    "decimal" => {
                        let precision = get_field_required(&fields, "precision")?;
                        let scale = get_field_required(&fields, "scale")?;
                        Ok(FieldType::Decimal { precision, scale })
                    }
                    "char" => {
                        let length = get_field_required(&fields, "length")?;
                        Ok(FieldType::Char { length })
                    }
                    "var_char" | "varchar" => {
                        let length = get_field_required(&fields, "length")?;
                        Ok(FieldType::VarChar { length })
                    }
                    "enum" => {
                        let values = get_field_required(&fields, "values")?;
                        Ok(FieldType::Enum { values })
                    }
                    "array" | "list" => {
                        let element_type: FieldType = get_field_required(&fields, "element_type")?;
                        Ok(FieldType::Array {
                            element_type: Box::new(element_type),
                        })
                    }
                    "object" => {
                        let name = get_field_required(&fields, "name")?;
                        Ok(FieldType::Object { name })
                    }
                    _ => Err(M::Error::custom(format!("unknown type: {type_name}"))),
                }
            }
        }

        deserializer.deserialize_any(FieldTypeVisitor)
    }
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.get(key).ok_or_else(|| E::missing_field(key))?;
    serde_yaml::from_value(value.clone())
        .map_err(|e| E::custom(format!("invalid field '{key}': {e}")))
}

impl FieldType {
    /// Create a new Decimal type with the given precision and scale.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::Decimal { precision, scale }
    }

    /// Create a new VarChar type with the given length.
    pub fn varchar(length: u16) -> Self {
        Self::VarChar { length }
    }

    /// Create a new Array type with the given element type.
    pub fn array(element_type: FieldType) -> Self {
        Self::Array {
            element_type: Box::new(element_type),
        }
    }

    /// Create a new Enum type with the given values.
    pub fn enumeration(values: Vec<String>) -> Self {
        Self::Enum { values }
    }

    /// Create a reference to another type in the schema.
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object { name: name.into() }
    }

    /// Check if this type represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Float32
                | Self::Float64
                | Self::Decimal { .. }
        )
    }

    /// Check if this type represents a string type.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Char { .. } | Self::VarChar { .. } | Self::Text)
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime | Self::Duration)
    }

    /// Check if values of this type are built by the populator rather than a
    /// single generator.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array { .. } | Self::Object { .. })
    }

    /// Name of the referenced type, for object fields.
    pub fn object_name(&self) -> Option<&str> {
        match self {
            Self::Object { name } => Some(name),
            _ => None,
        }
    }
}
