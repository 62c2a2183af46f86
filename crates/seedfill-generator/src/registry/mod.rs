//! Generator registries and the priority chain that consults them.
//!
//! A registry maps a [`FieldDescriptor`] to a randomizer. It either
//! resolves the field, declines it ([`Resolution::NoMatch`]), or reports
//! that a matching generator could not be built ([`Resolution::Failed`]).
//!
//! The [`RegistryChain`] asks its registries in ascending priority order and
//! takes the first resolution. Failures do not stop the walk; they are
//! collected and, through [`RegistryChain::resolve`], logged once each.
//!
//! ```text
//! field ──► exclusion (-256) ──► custom (-255) ──► metadata (-254)
//!                                                      │
//!             internal (255) ◄── time (254) ◄──────────┘
//! ```

pub mod custom;
pub mod exclusion;
pub mod internal;
pub mod metadata;
pub mod time;

use crate::error::ConstructionError;
use crate::randomizer::BoxedRandomizer;
use seedfill_core::{FieldDescriptor, PopulateParameters};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub use custom::{predicates, CustomRegistry, FieldPredicate, GeneratorFactory};
pub use exclusion::ExclusionRegistry;
pub use internal::InternalRegistry;
pub use metadata::{GeneratorTable, MetadataRegistry};
pub use time::TimeRegistry;

/// Priority of the exclusion registry.
pub const EXCLUSION_PRIORITY: i32 = -256;
/// Priority of the custom registry.
pub const CUSTOM_PRIORITY: i32 = -255;
/// Priority of the metadata registry.
pub const METADATA_PRIORITY: i32 = -254;
/// Priority of the time registry.
pub const TIME_PRIORITY: i32 = 254;
/// Priority of the internal fallback registry.
pub const INTERNAL_PRIORITY: i32 = 255;

/// Source of randomizers for fields.
pub trait GeneratorRegistry: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Resolve a randomizer for `field`, seeded with `seed` when given.
    ///
    /// Implementations must not log; failures are returned.
    fn resolve(&self, field: &FieldDescriptor, seed: Option<u64>) -> Resolution;
}

/// Outcome of asking one registry for a field's randomizer.
pub enum Resolution {
    /// The registry built a randomizer for the field.
    Resolved(BoxedRandomizer),

    /// The registry does not handle this field.
    NoMatch,

    /// The registry handles this field but its generator failed to build.
    Failed {
        /// Generator the registry tried to build
        generator: String,
        /// Why it failed
        cause: ConstructionError,
    },
}

impl Resolution {
    /// Failure building `generator`.
    pub fn failed(generator: impl Into<String>, cause: ConstructionError) -> Self {
        Self::Failed {
            generator: generator.into(),
            cause,
        }
    }

    /// Wrap a construction result.
    pub fn from_result(
        generator: impl Into<String>,
        result: Result<BoxedRandomizer, ConstructionError>,
    ) -> Self {
        match result {
            Ok(randomizer) => Self::Resolved(randomizer),
            Err(cause) => Self::failed(generator, cause),
        }
    }

    /// Check for a resolved randomizer.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Check for no match.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(_) => f.write_str("Resolved(..)"),
            Self::NoMatch => f.write_str("NoMatch"),
            Self::Failed { generator, cause } => f
                .debug_struct("Failed")
                .field("generator", generator)
                .field("cause", cause)
                .finish(),
        }
    }
}

/// A generator that a registry matched but could not build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("registry '{registry}' could not build generator '{generator}' for field {field}: {source}")]
pub struct ResolutionFailure {
    /// Registry that reported the failure
    pub registry: String,
    /// Field path, `owner.name`
    pub field: String,
    /// Generator that failed
    pub generator: String,
    /// Underlying construction error
    #[source]
    pub source: ConstructionError,
}

/// A registry with its place in the chain.
#[derive(Clone)]
pub struct Registration {
    /// Lower values are consulted first
    pub priority: i32,
    /// The registry
    pub registry: Arc<dyn GeneratorRegistry>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("priority", &self.priority)
            .field("registry", &self.registry.name())
            .finish()
    }
}

/// A randomizer together with the registry that produced it.
pub struct ResolvedGenerator {
    /// Name of the resolving registry
    pub registry: String,
    /// The randomizer
    pub randomizer: BoxedRandomizer,
}

impl fmt::Debug for ResolvedGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedGenerator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Result of walking the chain for one field, without side effects.
#[derive(Debug, Default)]
pub struct ChainLookup {
    /// First resolution, if any registry resolved the field
    pub resolved: Option<ResolvedGenerator>,
    /// Failures reported by registries consulted before the resolution
    pub failures: Vec<ResolutionFailure>,
}

/// Registries ordered by ascending priority.
#[derive(Debug, Clone, Default)]
pub struct RegistryChain {
    registrations: Vec<Registration>,
}

impl RegistryChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The exclusion, custom, metadata, time and internal registries at
    /// their standard priorities.
    pub fn standard(
        parameters: &PopulateParameters,
        table: GeneratorTable,
        custom: CustomRegistry,
    ) -> Self {
        let mut chain = Self::new();
        chain
            .register(
                EXCLUSION_PRIORITY,
                ExclusionRegistry::new(parameters.excluded_fields.clone()),
            )
            .register(CUSTOM_PRIORITY, custom)
            .register(METADATA_PRIORITY, MetadataRegistry::new(table))
            .register(TIME_PRIORITY, TimeRegistry::new(parameters.date_range))
            .register(
                INTERNAL_PRIORITY,
                InternalRegistry::new(parameters.string_length),
            );
        chain
    }

    /// Add a registry. Registries sharing a priority keep registration order.
    pub fn register<R>(&mut self, priority: i32, registry: R) -> &mut Self
    where
        R: GeneratorRegistry + 'static,
    {
        self.register_shared(priority, Arc::new(registry))
    }

    /// Add a shared registry.
    pub fn register_shared(
        &mut self,
        priority: i32,
        registry: Arc<dyn GeneratorRegistry>,
    ) -> &mut Self {
        let position = self
            .registrations
            .partition_point(|registration| registration.priority <= priority);
        self.registrations
            .insert(position, Registration { priority, registry });
        self
    }

    /// Registrations in consultation order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Number of registries.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check for an empty chain.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Walk the chain for `field` and report what happened.
    pub fn lookup(&self, field: &FieldDescriptor, seed: Option<u64>) -> ChainLookup {
        let mut lookup = ChainLookup::default();

        for registration in &self.registrations {
            let registry = registration.registry.as_ref();
            match registry.resolve(field, seed) {
                Resolution::Resolved(randomizer) => {
                    lookup.resolved = Some(ResolvedGenerator {
                        registry: registry.name().to_string(),
                        randomizer,
                    });
                    break;
                }
                Resolution::NoMatch => {}
                Resolution::Failed { generator, cause } => {
                    lookup.failures.push(ResolutionFailure {
                        registry: registry.name().to_string(),
                        field: field.path(),
                        generator,
                        source: cause,
                    });
                }
            }
        }

        lookup
    }

    /// Resolve `field`, logging every construction failure at warn level.
    pub fn resolve(&self, field: &FieldDescriptor, seed: Option<u64>) -> Option<ResolvedGenerator> {
        let lookup = self.lookup(field, seed);

        for failure in &lookup.failures {
            warn!(
                generator = %failure.generator,
                registry = %failure.registry,
                field = %failure.field,
                "Failed to build generator '{}' for field {}: {}",
                failure.generator,
                failure.field,
                failure.source
            );
        }

        lookup.resolved
    }
}
