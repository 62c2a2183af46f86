//! Object schemas for the populator.
//!
//! A schema lists the object types that can be populated. Each type is a
//! list of fields, and each field carries its declared [`FieldType`] plus
//! optional declarative generator metadata.
//!
//! ## Type Hierarchy
//!
//! - `FieldDefinition` - a field as written in the YAML file
//! - `TypeDefinition` - a named object type
//! - `ObjectSchema` - the full schema, with population parameters
//! - `FieldDescriptor` - a field bound to its owning type, handed to registries

use crate::types::FieldType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Type not found in schema
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Type declared more than once
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    /// Field refers to a type the schema does not define
    #[error("Field '{field}' of type '{owner}' refers to unknown type '{target}'")]
    UnknownReference {
        owner: String,
        field: String,
        target: String,
    },

    /// Population parameters are inconsistent
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

// ============================================================================
// Generator Metadata
// ============================================================================

/// Declarative generator metadata attached to a field.
///
/// `Named` refers to a generator registered by name; the other variants are
/// inline configurations built by the metadata registry itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Use the generator registered under this name
    Named {
        /// Registered generator name
        name: String,
    },

    /// Generate UUIDs (v4)
    UuidV4,

    /// Generate sequential integers
    Sequential {
        /// Starting value
        #[serde(default)]
        start: i64,
    },

    /// Generate values using a pattern with placeholders
    Pattern {
        /// Pattern string (supports {index}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Generate alphanumeric strings with a length in the given range
    StringLength {
        /// Minimum length (inclusive)
        min: usize,
        /// Maximum length (inclusive)
        max: usize,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate random decimals in a range
    DecimalRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate timestamps in a range
    TimestampRange {
        /// Start timestamp (RFC 3339 or YYYY-MM-DD)
        start: String,
        /// End timestamp (RFC 3339 or YYYY-MM-DD)
        end: String,
    },

    /// Generate weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Generate random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Generate arrays by sampling from a pool
    SampleArray {
        /// Pool of values to sample from
        pool: Vec<String>,
        /// Minimum array length
        #[serde(default)]
        min_length: usize,
        /// Maximum array length
        max_length: usize,
    },

    /// Generate a static value
    Static {
        /// The static value to use
        value: serde_yaml::Value,
    },

    /// Generate null values
    Null,
}

impl GeneratorConfig {
    /// Reference a generator registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// Short label used in diagnostics.
    pub fn label(&self) -> String {
        match self {
            Self::Named { name } => name.clone(),
            Self::UuidV4 => "uuid_v4".to_string(),
            Self::Sequential { .. } => "sequential".to_string(),
            Self::Pattern { .. } => "pattern".to_string(),
            Self::StringLength { .. } => "string_length".to_string(),
            Self::IntRange { .. } => "int_range".to_string(),
            Self::FloatRange { .. } => "float_range".to_string(),
            Self::DecimalRange { .. } => "decimal_range".to_string(),
            Self::TimestampRange { .. } => "timestamp_range".to_string(),
            Self::WeightedBool { .. } => "weighted_bool".to_string(),
            Self::OneOf { .. } => "one_of".to_string(),
            Self::SampleArray { .. } => "sample_array".to_string(),
            Self::Static { .. } => "static".to_string(),
            Self::Null => "null".to_string(),
        }
    }
}

// ============================================================================
// Fields and Types
// ============================================================================

/// A field as declared in the schema file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Declared field type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Optional generator metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorConfig>,

    /// Free-form tags, matched by custom predicates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl FieldDefinition {
    /// Create a field without generator metadata.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            generator: None,
            tags: Vec::new(),
        }
    }

    /// Attach generator metadata.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A named object type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDefinition {
    /// Type name
    pub name: String,

    /// Field definitions, in population order
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    /// Create a new type definition.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Descriptors for every field, bound to this type.
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|f| FieldDescriptor::from_definition(&self.name, f))
            .collect()
    }
}

/// A field bound to the type that owns it.
///
/// This is what registries see when asked for a generator. It is immutable
/// once built from the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Name of the owning type
    pub owner: String,

    /// Field name
    pub name: String,

    /// Declared field type
    pub field_type: FieldType,

    /// Declarative generator metadata, if any
    pub generator: Option<GeneratorConfig>,

    /// Free-form tags
    pub tags: Vec<String>,
}

impl FieldDescriptor {
    /// Create a descriptor without metadata.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            field_type,
            generator: None,
            tags: Vec::new(),
        }
    }

    /// Bind a schema field to its owner.
    pub fn from_definition(owner: &str, field: &FieldDefinition) -> Self {
        Self {
            owner: owner.to_string(),
            name: field.name.clone(),
            field_type: field.field_type.clone(),
            generator: field.generator.clone(),
            tags: field.tags.clone(),
        }
    }

    /// Attach generator metadata.
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Fully qualified field path, `owner.name`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    /// Check whether the field carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Descriptor for the elements of an array field.
    ///
    /// Element descriptors never carry the field's generator metadata, which
    /// applies to the array as a whole.
    pub fn element_descriptor(&self) -> Option<FieldDescriptor> {
        match &self.field_type {
            FieldType::Array { element_type } => Some(FieldDescriptor {
                owner: self.owner.clone(),
                name: format!("{}[]", self.name),
                field_type: element_type.as_ref().clone(),
                generator: None,
                tags: self.tags.clone(),
            }),
            _ => None,
        }
    }
}

// ============================================================================
// Population Parameters
// ============================================================================

/// Inclusive size range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeRange {
    /// Minimum (inclusive)
    pub min: usize,
    /// Maximum (inclusive)
    pub max: usize,
}

impl SizeRange {
    /// Create a new size range.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Check whether `value` lies within the range.
    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First date (inclusive)
    pub start: NaiveDate,
    /// Last date (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Parameters controlling a population pass.
///
/// Loaded from the `parameters` block of a schema file; every key is
/// optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopulateParameters {
    /// Seed for deterministic population; `None` draws from system entropy
    pub seed: Option<u64>,

    /// Length range for generated collections
    pub collection_size: SizeRange,

    /// Length range for generated strings without an explicit length
    pub string_length: SizeRange,

    /// Range for generated dates and date-times
    pub date_range: DateRange,

    /// Maximum nesting depth for object fields
    pub randomization_depth: usize,

    /// Fields left null, as `type.field` paths or bare field names
    pub excluded_fields: Vec<String>,
}

impl Default for PopulateParameters {
    fn default() -> Self {
        Self {
            seed: None,
            collection_size: SizeRange::new(1, 10),
            string_length: SizeRange::new(1, 32),
            date_range: DateRange::default(),
            randomization_depth: 5,
            excluded_fields: Vec::new(),
        }
    }
}

impl PopulateParameters {
    /// Set the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the collection size range.
    pub fn collection_size(mut self, min: usize, max: usize) -> Self {
        self.collection_size = SizeRange::new(min, max);
        self
    }

    /// Set the string length range.
    pub fn string_length(mut self, min: usize, max: usize) -> Self {
        self.string_length = SizeRange::new(min, max);
        self
    }

    /// Set the date range.
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }

    /// Set the maximum nesting depth.
    pub fn randomization_depth(mut self, depth: usize) -> Self {
        self.randomization_depth = depth;
        self
    }

    /// Exclude a field, by `type.field` path or bare name.
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.excluded_fields.push(field.into());
        self
    }

    /// Check the ranges are well formed.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.collection_size.min > self.collection_size.max {
            return Err(SchemaError::InvalidParameters(format!(
                "collection_size min {} exceeds max {}",
                self.collection_size.min, self.collection_size.max
            )));
        }
        if self.string_length.min > self.string_length.max {
            return Err(SchemaError::InvalidParameters(format!(
                "string_length min {} exceeds max {}",
                self.string_length.min, self.string_length.max
            )));
        }
        if self.date_range.start > self.date_range.end {
            return Err(SchemaError::InvalidParameters(format!(
                "date_range start {} is after end {}",
                self.date_range.start, self.date_range.end
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Schema
// ============================================================================

fn default_version() -> u32 {
    1
}

/// Full schema: the populatable types and default parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default population parameters
    #[serde(default)]
    pub parameters: PopulateParameters,

    /// Type definitions
    pub types: Vec<TypeDefinition>,

    /// Cached type lookup (not serialized)
    #[serde(skip)]
    type_map: HashMap<String, usize>,
}

impl ObjectSchema {
    /// Build a schema from type definitions, with default parameters.
    pub fn new(types: Vec<TypeDefinition>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            parameters: PopulateParameters::default(),
            types,
            type_map: HashMap::new(),
        };
        schema.build_type_map()?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: ObjectSchema = serde_yaml::from_str(yaml)?;
        schema.build_type_map()?;
        schema.validate()?;
        Ok(schema)
    }

    /// Replace the default parameters.
    pub fn with_parameters(mut self, parameters: PopulateParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Build the internal type lookup map.
    fn build_type_map(&mut self) -> Result<(), SchemaError> {
        self.type_map.clear();
        for (idx, ty) in self.types.iter().enumerate() {
            if self.type_map.insert(ty.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateType(ty.name.clone()));
            }
        }
        Ok(())
    }

    /// Check every object reference resolves and the parameters are sane.
    fn validate(&self) -> Result<(), SchemaError> {
        for ty in &self.types {
            for field in &ty.fields {
                if let Some(target) = referenced_type(&field.field_type) {
                    if !self.type_map.contains_key(target) {
                        return Err(SchemaError::UnknownReference {
                            owner: ty.name.clone(),
                            field: field.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }
            }
        }
        self.parameters.validate()
    }

    /// Get a type definition by name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_map
            .get(name)
            .and_then(|&idx| self.types.get(idx))
    }

    /// Get a type definition by name, or an error.
    pub fn require_type(&self, name: &str) -> Result<&TypeDefinition, SchemaError> {
        self.get_type(name)
            .ok_or_else(|| SchemaError::TypeNotFound(name.to_string()))
    }

    /// Get all type names in the schema.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Object type referenced by a field, looking through arrays.
fn referenced_type(field_type: &FieldType) -> Option<&str> {
    match field_type {
        FieldType::Object { name } => Some(name),
        FieldType::Array { element_type } => referenced_type(element_type),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn person_yaml() -> &'static str {
        r#"
version: 1
parameters:
  seed: 42
  collection_size:
    min: 1
    max: 3
types:
  - name: person
    fields:
      - name: id
        type: uuid
      - name: birth_day
        type: int
        generator:
          type: named
          name: day
      - name: address
        type:
          type: object
          name: address
      - name: nicknames
        type:
          type: array
          element_type: text
        tags: [pii]
  - name: address
    fields:
      - name: street
        type:
          type: var_char
          length: 40
"#
    }

    #[test]
    fn test_schema_from_yaml() {
        let schema = ObjectSchema::from_yaml(person_yaml()).unwrap();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.type_names(), vec!["person", "address"]);
        assert_eq!(schema.parameters.seed, Some(42));
        assert_eq!(schema.parameters.collection_size, SizeRange::new(1, 3));
        // Unspecified parameters keep their defaults
        assert_eq!(schema.parameters.string_length, SizeRange::new(1, 32));

        let person = schema.get_type("person").unwrap();
        assert_eq!(person.field_names(), vec!["id", "birth_day", "address", "nicknames"]);
        assert_eq!(
            person.get_field("birth_day").unwrap().generator,
            Some(GeneratorConfig::named("day"))
        );
        assert!(schema.get_type("missing").is_none());
    }

    #[test]
    fn test_descriptors_bind_owner() {
        let schema = ObjectSchema::from_yaml(person_yaml()).unwrap();
        let descriptors = schema.get_type("person").unwrap().descriptors();

        assert_eq!(descriptors.len(), 4);
        assert_eq!(descriptors[1].path(), "person.birth_day");
        assert!(descriptors[3].has_tag("pii"));
        assert!(!descriptors[0].has_tag("pii"));
    }

    #[test]
    fn test_element_descriptor() {
        let field = FieldDescriptor::new("person", "scores", FieldType::array(FieldType::Int32))
            .with_generator(GeneratorConfig::Null)
            .with_tag("stats");

        let element = field.element_descriptor().unwrap();
        assert_eq!(element.path(), "person.scores[]");
        assert_eq!(element.field_type, FieldType::Int32);
        assert!(element.generator.is_none());
        assert!(element.has_tag("stats"));

        let scalar = FieldDescriptor::new("person", "age", FieldType::Int32);
        assert!(scalar.element_descriptor().is_none());
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let yaml = r#"
types:
  - name: person
    fields:
      - name: pets
        type:
          type: array
          element_type:
            type: object
            name: pet
"#;
        let err = ObjectSchema::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownReference { ref target, .. } if target == "pet"
        ));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let result = ObjectSchema::new(vec![
            TypeDefinition::new("person", vec![]),
            TypeDefinition::new("person", vec![]),
        ]);
        assert!(matches!(result, Err(SchemaError::DuplicateType(_))));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let yaml = r#"
parameters:
  collection_size:
    min: 5
    max: 2
types: []
"#;
        let err = ObjectSchema::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParameters(_)));
    }

    #[test]
    fn test_parameters_builder() {
        let params = PopulateParameters::default()
            .seed(7)
            .collection_size(2, 4)
            .randomization_depth(1)
            .exclude("person.email");

        assert_eq!(params.seed, Some(7));
        assert!(params.collection_size.contains(3));
        assert!(!params.collection_size.contains(5));
        assert_eq!(params.randomization_depth, 1);
        assert_eq!(params.excluded_fields, vec!["person.email".to_string()]);
        assert!(params.validate().is_ok());

        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert!(PopulateParameters::default()
            .date_range(start, end)
            .validate()
            .is_err());
    }

    #[test]
    fn test_generator_config_parsing() {
        let yaml = r#"
type: int_range
min: 18
max: 80
"#;
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config, GeneratorConfig::IntRange { min: 18, max: 80 });
        assert_eq!(config.label(), "int_range");
        assert_eq!(GeneratorConfig::named("day").label(), "day");
    }
}
