//! Registry for fields excluded from population.

use super::{GeneratorRegistry, Resolution};
use crate::generators::value::NullRandomizer;
use crate::randomizer::boxed;
use seedfill_core::FieldDescriptor;

/// Resolves excluded fields to a randomizer that always yields null.
///
/// An entry matches either a full path (`person.email`) or a bare field
/// name (`email`), which excludes that field on every type.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRegistry {
    excluded: Vec<String>,
}

impl ExclusionRegistry {
    /// Registry excluding the given fields.
    pub fn new(excluded: Vec<String>) -> Self {
        Self { excluded }
    }

    /// Check whether `field` is excluded.
    pub fn is_excluded(&self, field: &FieldDescriptor) -> bool {
        let path = field.path();
        self.excluded
            .iter()
            .any(|entry| *entry == path || *entry == field.name)
    }
}

impl GeneratorRegistry for ExclusionRegistry {
    fn name(&self) -> &str {
        "exclusion"
    }

    fn resolve(&self, field: &FieldDescriptor, _seed: Option<u64>) -> Resolution {
        if self.is_excluded(field) {
            Resolution::Resolved(boxed(NullRandomizer))
        } else {
            Resolution::NoMatch
        }
    }
}
