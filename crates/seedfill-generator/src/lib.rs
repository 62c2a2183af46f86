//! Seedable randomizers and the object populator for seedfill.
//!
//! This crate turns an [`ObjectSchema`](seedfill_core::ObjectSchema) into
//! populated objects. Every field is handed to a [`RegistryChain`], which
//! asks its registries in ascending priority order for a randomizer:
//!
//! ```text
//! ObjectSchema (YAML)
//!        │
//!        ▼
//! ┌──────────────────┐      ┌──────────────────────────────┐
//! │    Populator     │─────►│        RegistryChain         │
//! │                  │      │  exclusion   -256            │
//! │  - cache/field   │◄─────│  custom      -255            │
//! │  - collections   │      │  metadata    -254 (table)    │
//! │  - depth limit   │      │  time         254            │
//! └────────┬─────────┘      │  internal     255            │
//!          │                └──────────────────────────────┘
//!          ▼
//!    PopulatedObject { type_name, index, fields }
//! ```
//!
//! # Example
//!
//! ```rust
//! use seedfill_core::{ObjectSchema, PopulateParameters};
//! use seedfill_generator::Populator;
//!
//! let schema = ObjectSchema::from_yaml(r#"
//! types:
//!   - name: person
//!     fields:
//!       - name: birth_day
//!         type: int
//!         generator:
//!           type: named
//!           name: day
//!       - name: email
//!         type: text
//!         generator:
//!           type: pattern
//!           pattern: "user_{index}@example.com"
//! "#).unwrap();
//!
//! let mut populator = Populator::new(schema, PopulateParameters::default().seed(42)).unwrap();
//! let person = populator.populate("person").unwrap();
//! assert_eq!(person.get_field("email").unwrap().as_str(), Some("user_0@example.com"));
//! ```
//!
//! # Generators
//!
//! Field metadata (`generator:` in the schema) supports:
//!
//! - `named` - a generator registered in the [`GeneratorTable`]
//!   (built-ins: `day`, `month`, `year`, `hour`, `minute`, `second`)
//! - `uuid_v4` - Random UUID v4
//! - `sequential` - Sequential integers
//! - `pattern` - Pattern strings with placeholders (`{index}`, `{uuid}`, `{rand:N}`)
//! - `string_length` - Alphanumeric strings with a length range
//! - `int_range` / `float_range` / `decimal_range` - Numbers in a range
//! - `timestamp_range` - Timestamps in a date range
//! - `weighted_bool` - Boolean with configurable true probability
//! - `one_of` - Random selection from a list
//! - `sample_array` - Array of random samples from a pool
//! - `static` - Static value
//! - `null` - Null value

pub mod error;
pub mod generators;
pub mod populator;
pub mod randomizer;
pub mod registry;

// Re-exports for convenience
pub use error::{ConstructionError, GeneratorError};
pub use populator::{FieldResolution, PopulateIter, Populator};
pub use randomizer::{boxed, derive_seed, BoxedRandomizer, Randomizer};
pub use registry::{
    CustomRegistry, GeneratorRegistry, GeneratorTable, RegistryChain, Resolution,
    ResolutionFailure,
};
