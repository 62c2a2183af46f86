//! Populator producing fully populated objects from a schema.

use crate::error::GeneratorError;
use crate::randomizer::{derive_optional_seed, rng_from_seed, BoxedRandomizer, Randomizer};
use crate::registry::{
    CustomRegistry, GeneratorRegistry, GeneratorTable, RegistryChain, ResolutionFailure,
};
use rand::rngs::StdRng;
use rand::Rng;
use seedfill_core::{
    FieldDescriptor, FieldType, GeneratedValue, ObjectSchema, PopulateParameters, PopulatedObject,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Key of the random stream used for collection lengths.
const COLLECTION_STREAM: &str = "collections";

/// Populator that fills schema types with random values.
///
/// Generators are resolved through a [`RegistryChain`] once per field and
/// cached for the life of the populator. With a seed configured, every
/// field's generator is seeded from the seed and the field path, so the
/// same schema and seed always produce the same objects.
pub struct Populator {
    /// Schema defining the types
    schema: ObjectSchema,
    /// Parameters of this pass
    parameters: PopulateParameters,
    /// Named generator constructors
    table: GeneratorTable,
    /// User overrides
    custom: CustomRegistry,
    /// Registries added on top of the standard chain
    extra: Vec<(i32, Arc<dyn GeneratorRegistry>)>,
    /// Assembled registry chain
    chain: RegistryChain,
    /// Resolved generators by field path; `None` when nothing resolved
    cache: HashMap<String, Option<BoxedRandomizer>>,
    /// Random source for collection lengths
    collection_rng: StdRng,
    /// Index of the next populated object
    index: u64,
}

impl Populator {
    /// Create a populator with the built-in generator table and no custom
    /// overrides.
    ///
    /// Fails when the parameters hold an inverted size or date range.
    pub fn new(
        schema: ObjectSchema,
        parameters: PopulateParameters,
    ) -> Result<Self, GeneratorError> {
        parameters.validate()?;

        let table = GeneratorTable::with_builtins();
        let custom = CustomRegistry::new();
        let chain = RegistryChain::standard(&parameters, table.clone(), custom.clone());
        let collection_rng =
            rng_from_seed(derive_optional_seed(parameters.seed, COLLECTION_STREAM));

        Ok(Self {
            schema,
            parameters,
            table,
            custom,
            extra: Vec::new(),
            chain,
            cache: HashMap::new(),
            collection_rng,
            index: 0,
        })
    }

    /// Create a populator using the parameters declared in the schema.
    pub fn from_schema(schema: ObjectSchema) -> Result<Self, GeneratorError> {
        let parameters = schema.parameters.clone();
        Self::new(schema, parameters)
    }

    /// Replace the named generator table.
    pub fn with_table(mut self, table: GeneratorTable) -> Self {
        self.table = table;
        self.rebuild_chain();
        self
    }

    /// Replace the custom overrides.
    pub fn with_custom(mut self, custom: CustomRegistry) -> Self {
        self.custom = custom;
        self.rebuild_chain();
        self
    }

    /// Add a registry to the chain at `priority`.
    pub fn with_registry<R>(mut self, priority: i32, registry: R) -> Self
    where
        R: GeneratorRegistry + 'static,
    {
        self.extra.push((priority, Arc::new(registry)));
        self.rebuild_chain();
        self
    }

    fn rebuild_chain(&mut self) {
        let mut chain =
            RegistryChain::standard(&self.parameters, self.table.clone(), self.custom.clone());
        for (priority, registry) in &self.extra {
            chain.register_shared(*priority, Arc::clone(registry));
        }
        self.chain = chain;
        self.cache.clear();
    }

    /// Get a reference to the schema.
    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    /// Get the parameters of this pass.
    pub fn parameters(&self) -> &PopulateParameters {
        &self.parameters
    }

    /// Get the registry chain.
    pub fn chain(&self) -> &RegistryChain {
        &self.chain
    }

    /// Get the index of the next populated object.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Populate one instance of `type_name`.
    pub fn populate(&mut self, type_name: &str) -> Result<PopulatedObject, GeneratorError> {
        let type_name = self.require_type_name(type_name)?;
        let index = self.index;

        let fields = self.populate_fields(&type_name, 0)?;
        self.index += 1;

        debug!(type_name = %type_name, index, "Populated object");
        Ok(PopulatedObject::new(type_name, index, fields))
    }

    /// Populate `count` instances of `type_name`.
    ///
    /// Returns an iterator that lazily populates objects.
    pub fn populate_many(
        &mut self,
        type_name: &str,
        count: u64,
    ) -> Result<PopulateIter<'_>, GeneratorError> {
        let type_name = self.require_type_name(type_name)?;
        Ok(PopulateIter {
            populator: self,
            type_name,
            remaining: count,
        })
    }

    /// Report, for every field of `type_name`, which registry resolves it.
    ///
    /// Nothing is logged and the generator cache is untouched.
    pub fn describe(&self, type_name: &str) -> Result<Vec<FieldResolution>, GeneratorError> {
        let type_def = self
            .schema
            .get_type(type_name)
            .ok_or_else(|| GeneratorError::TypeNotFound(type_name.to_string()))?;

        let resolutions = type_def
            .descriptors()
            .into_iter()
            .map(|field| {
                let seed = derive_optional_seed(self.parameters.seed, &field.path());
                let lookup = self.chain.lookup(&field, seed);
                FieldResolution {
                    path: field.path(),
                    field_type: field.field_type,
                    registry: lookup.resolved.map(|resolved| resolved.registry),
                    failures: lookup.failures,
                }
            })
            .collect();
        Ok(resolutions)
    }

    fn require_type_name(&self, type_name: &str) -> Result<String, GeneratorError> {
        self.schema
            .get_type(type_name)
            .map(|t| t.name.clone())
            .ok_or_else(|| GeneratorError::TypeNotFound(type_name.to_string()))
    }

    /// Populate the fields of `type_name` at nesting `depth`.
    fn populate_fields(
        &mut self,
        type_name: &str,
        depth: usize,
    ) -> Result<HashMap<String, GeneratedValue>, GeneratorError> {
        let descriptors = self.schema.require_type(type_name)?.descriptors();

        let mut fields = HashMap::with_capacity(descriptors.len());
        for field in descriptors {
            let value = self.field_value(&field, depth)?;
            fields.insert(field.name, value);
        }
        Ok(fields)
    }

    /// Produce the value of one field.
    ///
    /// A generator from the chain always wins. Without one, objects recurse
    /// and arrays are built element by element; anything else is null.
    fn field_value(
        &mut self,
        field: &FieldDescriptor,
        depth: usize,
    ) -> Result<GeneratedValue, GeneratorError> {
        if let Some(randomizer) = self.generator_for(field) {
            return Ok(randomizer.next_value());
        }

        match &field.field_type {
            FieldType::Object { name } => {
                let child_depth = depth + 1;
                if child_depth > self.parameters.randomization_depth {
                    debug!(field = %field.path(), depth = child_depth, "Depth limit reached");
                    return Ok(GeneratedValue::Null);
                }
                Ok(GeneratedValue::Object(
                    self.populate_fields(name, child_depth)?,
                ))
            }
            FieldType::Array { .. } => {
                let Some(element) = field.element_descriptor() else {
                    return Ok(GeneratedValue::Null);
                };
                let size = self.parameters.collection_size;
                let length = self.collection_rng.gen_range(size.min..=size.max);

                let mut items = Vec::with_capacity(length);
                for _ in 0..length {
                    items.push(self.field_value(&element, depth)?);
                }
                Ok(GeneratedValue::Array(items))
            }
            _ => {
                debug!(field = %field.path(), "No generator resolved, leaving null");
                Ok(GeneratedValue::Null)
            }
        }
    }

    /// Cached generator for `field`, resolving it on first use.
    fn generator_for(&mut self, field: &FieldDescriptor) -> Option<&mut BoxedRandomizer> {
        let path = field.path();
        if !self.cache.contains_key(&path) {
            let seed = derive_optional_seed(self.parameters.seed, &path);
            let resolved = self.chain.resolve(field, seed).map(|resolved| {
                debug!(field = %path, registry = %resolved.registry, "Resolved generator");
                resolved.randomizer
            });
            self.cache.insert(path.clone(), resolved);
        }
        self.cache.get_mut(&path).and_then(Option::as_mut)
    }
}

/// How one field resolves through the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolution {
    /// Field path, `owner.name`
    pub path: String,
    /// Declared field type
    pub field_type: FieldType,
    /// Resolving registry; `None` when the populator builds the value itself
    /// or leaves it null
    pub registry: Option<String>,
    /// Construction failures met on the way
    pub failures: Vec<ResolutionFailure>,
}

/// Iterator that lazily populates objects.
///
/// Yields exactly the requested number of items; a failed object is
/// yielded as an error rather than ending the iteration.
pub struct PopulateIter<'a> {
    populator: &'a mut Populator,
    type_name: String,
    remaining: u64,
}

impl Iterator for PopulateIter<'_> {
    type Item = Result<PopulatedObject, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.populator.populate(&self.type_name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PopulateIter<'_> {}
