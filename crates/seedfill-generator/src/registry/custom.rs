//! User-supplied generator overrides.
//!
//! Each registration pairs a [`FieldPredicate`] with a [`GeneratorFactory`].
//! The first registration whose predicate accepts the field builds its
//! randomizer.
//!
//! ```rust
//! use seedfill_generator::generators::text::PatternRandomizer;
//! use seedfill_generator::randomizer::boxed;
//! use seedfill_generator::registry::{predicates, CustomRegistry};
//!
//! let mut custom = CustomRegistry::new();
//! custom.register("email", predicates::named("email"), |seed| {
//!     Ok(boxed(PatternRandomizer::new("user_{index}@example.com", seed)))
//! });
//! assert_eq!(custom.len(), 1);
//! ```

use super::{GeneratorRegistry, Resolution};
use crate::error::ConstructionError;
use crate::randomizer::BoxedRandomizer;
use seedfill_core::FieldDescriptor;
use std::fmt;
use std::sync::Arc;

/// Decides whether a registration applies to a field.
pub type FieldPredicate = Arc<dyn Fn(&FieldDescriptor) -> bool + Send + Sync>;

/// Builds a randomizer from an optional seed.
pub type GeneratorFactory =
    Arc<dyn Fn(Option<u64>) -> Result<BoxedRandomizer, ConstructionError> + Send + Sync>;

/// Common field predicates.
pub mod predicates {
    use super::FieldPredicate;
    use seedfill_core::{FieldDescriptor, FieldType};
    use std::sync::Arc;

    /// Fields with this name, on any type.
    pub fn named(name: impl Into<String>) -> FieldPredicate {
        let name = name.into();
        Arc::new(move |field: &FieldDescriptor| field.name == name)
    }

    /// The field at `owner.name`.
    pub fn path(path: impl Into<String>) -> FieldPredicate {
        let path = path.into();
        Arc::new(move |field: &FieldDescriptor| field.path() == path)
    }

    /// Every field of the given type.
    pub fn owned_by(owner: impl Into<String>) -> FieldPredicate {
        let owner = owner.into();
        Arc::new(move |field: &FieldDescriptor| field.owner == owner)
    }

    /// Fields declared with this field type.
    pub fn of_type(field_type: FieldType) -> FieldPredicate {
        Arc::new(move |field: &FieldDescriptor| field.field_type == field_type)
    }

    /// Fields carrying this tag.
    pub fn tagged(tag: impl Into<String>) -> FieldPredicate {
        let tag = tag.into();
        Arc::new(move |field: &FieldDescriptor| field.has_tag(&tag))
    }

    /// Fields accepted by both predicates.
    pub fn and(left: FieldPredicate, right: FieldPredicate) -> FieldPredicate {
        Arc::new(move |field: &FieldDescriptor| left(field) && right(field))
    }
}

#[derive(Clone)]
struct Entry {
    label: String,
    predicate: FieldPredicate,
    factory: GeneratorFactory,
}

/// Registry of user overrides, consulted in registration order.
#[derive(Clone, Default)]
pub struct CustomRegistry {
    entries: Vec<Entry>,
}

impl CustomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for fields accepted by `predicate`.
    ///
    /// `label` names the override in diagnostics.
    pub fn register<F>(
        &mut self,
        label: impl Into<String>,
        predicate: FieldPredicate,
        factory: F,
    ) -> &mut Self
    where
        F: Fn(Option<u64>) -> Result<BoxedRandomizer, ConstructionError> + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            label: label.into(),
            predicate,
            factory: Arc::new(factory),
        });
        self
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty registry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CustomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.label))
            .finish()
    }
}

impl GeneratorRegistry for CustomRegistry {
    fn name(&self) -> &str {
        "custom"
    }

    fn resolve(&self, field: &FieldDescriptor, seed: Option<u64>) -> Resolution {
        match self.entries.iter().find(|entry| (entry.predicate)(field)) {
            Some(entry) => Resolution::from_result(&entry.label, (entry.factory)(seed)),
            None => Resolution::NoMatch,
        }
    }
}
