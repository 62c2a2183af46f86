//! Core types for seedfill.
//!
//! This crate provides the foundational types shared by the generator crate
//! and the command-line tool:
//!
//! - [`FieldType`] - declared type of a field
//! - [`GeneratedValue`] - raw generated values
//! - [`PopulatedObject`] - one populated instance of a schema type
//! - [`ObjectSchema`] - type definitions loaded from YAML
//! - [`FieldDescriptor`] - a field bound to its owning type
//!
//! # Architecture
//!
//! ```text
//! seedfill-core (this crate)
//!    │
//!    └─── seedfill-generator  (randomizers, registries, populator)
//!            │
//!            └─── seedfill    (command-line tool, JSON output)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seedfill_core::{FieldType, ObjectSchema};
//!
//! let schema = ObjectSchema::from_yaml(r#"
//! types:
//!   - name: person
//!     fields:
//!       - name: age
//!         type: int
//! "#).unwrap();
//!
//! let person = schema.get_type("person").unwrap();
//! assert_eq!(person.fields[0].field_type, FieldType::Int32);
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{
    DateRange, FieldDefinition, FieldDescriptor, GeneratorConfig, ObjectSchema,
    PopulateParameters, SchemaError, SizeRange, TypeDefinition,
};
pub use types::FieldType;
pub use values::{GeneratedValue, PopulatedObject};
