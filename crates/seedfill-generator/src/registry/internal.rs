//! Fallback registry producing a value for every scalar field type.

use super::{GeneratorRegistry, Resolution};
use crate::generators::identifier::{UlidRandomizer, UuidRandomizer};
use crate::generators::numeric::{BoolRandomizer, DecimalRandomizer, RangeRandomizer};
use crate::generators::text::{BytesRandomizer, StringRandomizer};
use crate::generators::value::OneOfRandomizer;
use crate::randomizer::{boxed, from_fn, rng_from_seed, BoxedRandomizer};
use rand::Rng;
use seedfill_core::{FieldDescriptor, FieldType, SizeRange};

/// Resolves scalar fields from their declared type alone.
///
/// Integers span their full range, floats lie in `[0, 1)`, decimals fill
/// their precision, and strings and byte strings take their length from
/// the configured range (capped by the declared length, if any).
/// Temporal and composite types are left to other registries and the
/// populator.
#[derive(Debug, Clone)]
pub struct InternalRegistry {
    string_length: SizeRange,
}

impl InternalRegistry {
    /// Registry drawing unbounded string lengths from `string_length`.
    pub fn new(string_length: SizeRange) -> Self {
        Self { string_length }
    }

    fn unit_float(seed: Option<u64>) -> BoxedRandomizer {
        let mut rng = rng_from_seed(seed);
        boxed(from_fn(move || rng.gen::<f64>()))
    }
}

impl Default for InternalRegistry {
    fn default() -> Self {
        Self::new(SizeRange::new(1, 32))
    }
}

impl GeneratorRegistry for InternalRegistry {
    fn name(&self) -> &str {
        "internal"
    }

    fn resolve(&self, field: &FieldDescriptor, seed: Option<u64>) -> Resolution {
        let randomizer = match &field.field_type {
            FieldType::Bool => boxed(BoolRandomizer::new(seed)),
            FieldType::Int16 => boxed(RangeRandomizer::bounded(i16::MIN, i16::MAX, seed)),
            FieldType::Int32 => boxed(RangeRandomizer::bounded(i32::MIN, i32::MAX, seed)),
            FieldType::Int64 => boxed(RangeRandomizer::bounded(i64::MIN, i64::MAX, seed)),
            FieldType::Float32 | FieldType::Float64 => Self::unit_float(seed),
            FieldType::Decimal { precision, scale } => {
                boxed(DecimalRandomizer::for_type(*precision, *scale, seed))
            }
            FieldType::Char { length } => boxed(StringRandomizer::exact(*length as usize, seed)),
            FieldType::VarChar { length } => boxed(StringRandomizer::capped(
                self.string_length,
                *length as usize,
                seed,
            )),
            FieldType::Text => match StringRandomizer::new(self.string_length, seed) {
                Ok(randomizer) => boxed(randomizer),
                Err(cause) => return Resolution::failed("text", cause),
            },
            FieldType::Bytes => match BytesRandomizer::new(self.string_length, seed) {
                Ok(randomizer) => boxed(randomizer),
                Err(cause) => return Resolution::failed("bytes", cause),
            },
            FieldType::Uuid => boxed(UuidRandomizer::new(seed)),
            FieldType::Ulid => boxed(UlidRandomizer::new(seed)),
            FieldType::Enum { values } => boxed(OneOfRandomizer::from_strings(values, seed)),
            FieldType::Date
            | FieldType::Time
            | FieldType::DateTime
            | FieldType::Duration
            | FieldType::Array { .. }
            | FieldType::Object { .. } => return Resolution::NoMatch,
        };
        Resolution::Resolved(randomizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::Randomizer;
    use seedfill_core::GeneratedValue;

    fn draw(field_type: FieldType) -> GeneratedValue {
        let field = FieldDescriptor::new("sample", "value", field_type);
        match InternalRegistry::default().resolve(&field, Some(42)) {
            Resolution::Resolved(mut randomizer) => randomizer.next_value(),
            other => panic!("Expected Resolved, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_shapes() {
        assert!(matches!(draw(FieldType::Bool), GeneratedValue::Bool(_)));
        assert!(matches!(draw(FieldType::Int16), GeneratedValue::Int32(v) if i16::try_from(v).is_ok()));
        assert!(matches!(draw(FieldType::Int32), GeneratedValue::Int32(_)));
        assert!(matches!(draw(FieldType::Int64), GeneratedValue::Int64(_)));
        assert!(matches!(draw(FieldType::Uuid), GeneratedValue::Uuid(_)));
        assert!(matches!(draw(FieldType::Ulid), GeneratedValue::Ulid(_)));
        assert!(matches!(draw(FieldType::Bytes), GeneratedValue::Bytes(_)));
        assert!(matches!(draw(FieldType::decimal(5, 2)), GeneratedValue::Decimal { .. }));
    }

    #[test]
    fn test_floats_in_unit_interval() {
        let field = FieldDescriptor::new("sample", "ratio", FieldType::Float64);
        let Resolution::Resolved(mut randomizer) = InternalRegistry::default().resolve(&field, None)
        else {
            panic!("Expected Resolved");
        };
        for _ in 0..100 {
            let value = randomizer.next_value().as_f64().unwrap();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_string_lengths() {
        match draw(FieldType::Char { length: 3 }) {
            GeneratedValue::String(s) => assert_eq!(s.len(), 3),
            other => panic!("Expected String, got {other:?}"),
        }
        match draw(FieldType::varchar(4)) {
            GeneratedValue::String(s) => assert!(s.len() <= 4),
            other => panic!("Expected String, got {other:?}"),
        }
        match draw(FieldType::Text) {
            GeneratedValue::String(s) => assert!((1..=32).contains(&s.len())),
            other => panic!("Expected String, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_picks_declared_value() {
        let values = vec!["active".to_string(), "inactive".to_string()];
        match draw(FieldType::enumeration(values.clone())) {
            GeneratedValue::String(s) => assert!(values.contains(&s)),
            other => panic!("Expected String, got {other:?}"),
        }
    }

    #[test]
    fn test_temporal_and_composite_not_handled() {
        let registry = InternalRegistry::default();
        for field_type in [
            FieldType::Date,
            FieldType::DateTime,
            FieldType::array(FieldType::Int32),
            FieldType::object("address"),
        ] {
            let field = FieldDescriptor::new("sample", "value", field_type);
            assert!(registry.resolve(&field, None).is_no_match());
        }
    }
}
