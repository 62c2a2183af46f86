//! Built-in randomizers and the constructor for inline generator metadata.
//!
//! Each submodule holds randomizers of one family:
//!
//! - `numeric` - integer, float and decimal ranges, booleans
//! - `time` - day/month/year/hour/minute/second, dates, times, durations
//! - `text` - alphanumeric strings, patterns, bytes
//! - `identifier` - UUIDs, ULIDs, sequences
//! - `value` - static values, one-of pools, sampled arrays, nulls

pub mod identifier;
pub mod numeric;
pub mod text;
pub mod time;
pub mod value;

use crate::error::ConstructionError;
use crate::randomizer::{boxed, BoxedRandomizer};
use seedfill_core::{FieldDescriptor, FieldType, GeneratorConfig, SizeRange};

use identifier::{SequentialRandomizer, UuidRandomizer};
use numeric::{BoolRandomizer, DecimalRandomizer, RangeRandomizer};
use text::{PatternRandomizer, StringRandomizer};
use time::DateTimeRandomizer;
use value::{
    yaml_to_generated_value, NullRandomizer, OneOfRandomizer, SampleArrayRandomizer,
    StaticRandomizer,
};

/// Build the randomizer for inline generator metadata.
///
/// `Named` metadata is resolved against a generator table by the metadata
/// registry; reaching this function with it means nothing was registered.
pub fn from_config(
    config: &GeneratorConfig,
    field: &FieldDescriptor,
    seed: Option<u64>,
) -> Result<BoxedRandomizer, ConstructionError> {
    let randomizer = match config {
        GeneratorConfig::Named { name } => {
            return Err(ConstructionError::NotRegistered(name.clone()))
        }

        GeneratorConfig::UuidV4 => boxed(UuidRandomizer::new(seed)),

        GeneratorConfig::Sequential { start } => boxed(SequentialRandomizer::new(*start)),

        GeneratorConfig::Pattern { pattern } => boxed(PatternRandomizer::new(pattern, seed)),

        GeneratorConfig::StringLength { min, max } => {
            boxed(StringRandomizer::new(SizeRange::new(*min, *max), seed)?)
        }

        GeneratorConfig::IntRange { min, max } => int_range(*min, *max, &field.field_type, seed)?,

        GeneratorConfig::FloatRange { min, max } => {
            boxed(RangeRandomizer::float(*min, *max, seed)?)
        }

        GeneratorConfig::DecimalRange { min, max } => {
            let (precision, scale) = match field.field_type {
                FieldType::Decimal { precision, scale } => (precision, scale),
                _ => (38, 2),
            };
            boxed(DecimalRandomizer::new(*min, *max, precision, scale, seed)?)
        }

        GeneratorConfig::TimestampRange { start, end } => {
            boxed(DateTimeRandomizer::parse(start, end, seed)?)
        }

        GeneratorConfig::WeightedBool { true_weight } => {
            boxed(BoolRandomizer::weighted(*true_weight, seed)?)
        }

        GeneratorConfig::OneOf { values } => boxed(OneOfRandomizer::from_yaml(values, seed)),

        GeneratorConfig::SampleArray {
            pool,
            min_length,
            max_length,
        } => {
            let element_type = match &field.field_type {
                FieldType::Array { element_type } => element_type.as_ref().clone(),
                _ => FieldType::Text,
            };
            boxed(SampleArrayRandomizer::new(
                pool.clone(),
                *min_length,
                *max_length,
                element_type,
                seed,
            )?)
        }

        GeneratorConfig::Static { value } => {
            boxed(StaticRandomizer::new(yaml_to_generated_value(value)))
        }

        GeneratorConfig::Null => boxed(NullRandomizer),
    };
    Ok(randomizer)
}

/// Integer range producing values of the field's width.
fn int_range(
    min: i64,
    max: i64,
    field_type: &FieldType,
    seed: Option<u64>,
) -> Result<BoxedRandomizer, ConstructionError> {
    match field_type {
        FieldType::Int16 | FieldType::Int32 => {
            let (Ok(min32), Ok(max32)) = (i32::try_from(min), i32::try_from(max)) else {
                return Err(ConstructionError::invalid_config(format!(
                    "range [{min}, {max}] does not fit a 32-bit field"
                )));
            };
            Ok(boxed(RangeRandomizer::from_seed(min32, max32, seed)?))
        }
        _ => Ok(boxed(RangeRandomizer::from_seed(min, max, seed)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::Randomizer;
    use seedfill_core::GeneratedValue;

    fn field(field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor::new("person", "value", field_type)
    }

    #[test]
    fn test_int_range_follows_field_width() {
        let config = GeneratorConfig::IntRange { min: 18, max: 80 };

        let mut narrow = from_config(&config, &field(FieldType::Int32), Some(42)).unwrap();
        let value = narrow.next_value();
        assert!(matches!(value, GeneratedValue::Int32(v) if (18..=80).contains(&v)));

        let mut wide = from_config(&config, &field(FieldType::Int64), Some(42)).unwrap();
        assert!(matches!(wide.next_value(), GeneratedValue::Int64(v) if (18..=80).contains(&v)));
    }

    #[test]
    fn test_int_range_overflowing_narrow_field() {
        let config = GeneratorConfig::IntRange {
            min: 0,
            max: i64::MAX,
        };
        let result = from_config(&config, &field(FieldType::Int32), None);
        assert!(matches!(result, Err(ConstructionError::InvalidConfig(_))));
    }

    #[test]
    fn test_inverted_range_fails() {
        let config = GeneratorConfig::IntRange { min: 10, max: 1 };
        let result = from_config(&config, &field(FieldType::Int64), None);
        assert!(matches!(result, Err(ConstructionError::InvalidRange { .. })));
    }

    #[test]
    fn test_named_is_not_constructed_here() {
        let config = GeneratorConfig::named("day");
        let result = from_config(&config, &field(FieldType::Int32), None);
        assert_eq!(
            result.err(),
            Some(ConstructionError::NotRegistered("day".to_string()))
        );
    }

    #[test]
    fn test_decimal_range_uses_field_scale() {
        let config = GeneratorConfig::DecimalRange {
            min: 1.0,
            max: 2.0,
        };
        let mut randomizer =
            from_config(&config, &field(FieldType::decimal(6, 3)), Some(42)).unwrap();

        match randomizer.next_value() {
            GeneratedValue::Decimal { value, scale, .. } => {
                assert_eq!(scale, 3);
                assert_eq!(value.split('.').nth(1).map(str::len), Some(3));
            }
            other => panic!("Expected Decimal, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_array_uses_element_type() {
        let config = GeneratorConfig::SampleArray {
            pool: vec!["5".to_string()],
            min_length: 1,
            max_length: 1,
        };
        let mut randomizer =
            from_config(&config, &field(FieldType::array(FieldType::Int64)), Some(42)).unwrap();
        assert_eq!(
            randomizer.next_value(),
            GeneratedValue::Array(vec![GeneratedValue::Int64(5)])
        );
    }

    #[test]
    fn test_timestamp_range_parse_failure() {
        let config = GeneratorConfig::TimestampRange {
            start: "yesterday".to_string(),
            end: "2024-01-01".to_string(),
        };
        let result = from_config(&config, &field(FieldType::DateTime), None);
        assert!(matches!(result, Err(ConstructionError::InvalidConfig(_))));
    }

    #[test]
    fn test_static_and_null() {
        let config = GeneratorConfig::Static {
            value: serde_yaml::Value::String("fixed".to_string()),
        };
        let mut fixed = from_config(&config, &field(FieldType::Text), None).unwrap();
        assert_eq!(fixed.next_value(), GeneratedValue::from("fixed"));

        let mut null = from_config(&GeneratorConfig::Null, &field(FieldType::Text), None).unwrap();
        assert!(null.next_value().is_null());
    }
}
