//! Registry driven by the `generator:` metadata declared on fields.
//!
//! Inline metadata (`int_range`, `pattern`, ...) is built directly. A
//! `named` entry refers to a constructor in a [`GeneratorTable`]; when the
//! name is unknown or its constructor fails, the registry reports the
//! failure and the chain moves on.

use super::custom::GeneratorFactory;
use super::{GeneratorRegistry, Resolution};
use crate::error::ConstructionError;
use crate::generators::from_config;
use crate::generators::time::{
    DayRandomizer, HourRandomizer, MinuteRandomizer, MonthRandomizer, SecondRandomizer,
    YearRandomizer,
};
use crate::randomizer::{boxed, BoxedRandomizer, Randomizer};
use seedfill_core::{FieldDescriptor, GeneratedValue, GeneratorConfig};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Named generator constructors.
#[derive(Clone, Default)]
pub struct GeneratorTable {
    constructors: BTreeMap<String, GeneratorFactory>,
}

impl GeneratorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the calendar generators registered as `day`, `month`,
    /// `year`, `hour`, `minute` and `second`.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table
            .register_seeded("day", DayRandomizer::from_seed)
            .register_seeded("month", MonthRandomizer::from_seed)
            .register_seeded("year", YearRandomizer::from_seed)
            .register_seeded("hour", HourRandomizer::from_seed)
            .register_seeded("minute", MinuteRandomizer::from_seed)
            .register_seeded("second", SecondRandomizer::from_seed);
        table
    }

    /// Register a fallible constructor under `name`, replacing any previous
    /// one.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(Option<u64>) -> Result<BoxedRandomizer, ConstructionError> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    /// Register an infallible constructor taking the seed.
    pub fn register_seeded<F, R>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(Option<u64>) -> R + Send + Sync + 'static,
        R: Randomizer + Send + 'static,
        R::Output: Into<GeneratedValue>,
    {
        self.register(name, move |seed| Ok(boxed(constructor(seed))))
    }

    /// Register a randomizer built through [`Default`]. It ignores the seed.
    pub fn register_default<G>(&mut self, name: impl Into<String>) -> &mut Self
    where
        G: Randomizer + Default + Send + 'static,
        G::Output: Into<GeneratedValue>,
    {
        self.register(name, |_seed| Ok(boxed(G::default())))
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Build the randomizer registered under `name`.
    pub fn create(
        &self,
        name: &str,
        seed: Option<u64>,
    ) -> Result<BoxedRandomizer, ConstructionError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ConstructionError::NotRegistered(name.to_string()))?;
        constructor(seed)
    }
}

impl fmt::Debug for GeneratorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

/// Resolves fields from their declared generator metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    table: GeneratorTable,
}

impl MetadataRegistry {
    /// Registry resolving named generators against `table`.
    pub fn new(table: GeneratorTable) -> Self {
        Self { table }
    }

    /// The generator table.
    pub fn table(&self) -> &GeneratorTable {
        &self.table
    }
}

impl GeneratorRegistry for MetadataRegistry {
    fn name(&self) -> &str {
        "metadata"
    }

    fn resolve(&self, field: &FieldDescriptor, seed: Option<u64>) -> Resolution {
        let Some(config) = &field.generator else {
            return Resolution::NoMatch;
        };

        match config {
            GeneratorConfig::Named { name } => {
                Resolution::from_result(name, self.table.create(name, seed))
            }
            inline => Resolution::from_result(inline.label(), from_config(inline, field, seed)),
        }
    }
}
