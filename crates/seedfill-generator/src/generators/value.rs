//! Randomizers over fixed values: static values, pools and nulls.

use crate::randomizer::{rng_from_seed, Randomizer};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use seedfill_core::{FieldType, GeneratedValue};
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;

/// Convert a YAML value to a GeneratedValue.
pub fn yaml_to_generated_value(yaml: &YamlValue) -> GeneratedValue {
    match yaml {
        YamlValue::Null => GeneratedValue::Null,
        YamlValue::Bool(b) => GeneratedValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                GeneratedValue::Int64(i)
            } else if let Some(f) = n.as_f64() {
                GeneratedValue::Float64(f)
            } else {
                GeneratedValue::String(n.to_string())
            }
        }
        YamlValue::String(s) => GeneratedValue::String(s.clone()),
        YamlValue::Sequence(arr) => {
            GeneratedValue::Array(arr.iter().map(yaml_to_generated_value).collect())
        }
        YamlValue::Mapping(map) => {
            let values: HashMap<String, GeneratedValue> = map
                .iter()
                .filter_map(|(k, v)| {
                    let key = k.as_str()?.to_string();
                    Some((key, yaml_to_generated_value(v)))
                })
                .collect();
            GeneratedValue::Object(values)
        }
        YamlValue::Tagged(tagged) => yaml_to_generated_value(&tagged.value),
    }
}

/// Convert a pool entry to a value of the element type, falling back to a
/// string when it does not parse.
fn string_to_typed_value(s: &str, target_type: &FieldType) -> GeneratedValue {
    match target_type {
        FieldType::Int16 | FieldType::Int32 => match s.parse::<i32>() {
            Ok(i) => GeneratedValue::Int32(i),
            Err(_) => GeneratedValue::String(s.to_string()),
        },
        FieldType::Int64 => match s.parse::<i64>() {
            Ok(i) => GeneratedValue::Int64(i),
            Err(_) => GeneratedValue::String(s.to_string()),
        },
        FieldType::Float32 | FieldType::Float64 | FieldType::Decimal { .. } => {
            match s.parse::<f64>() {
                Ok(f) => GeneratedValue::Float64(f),
                Err(_) => GeneratedValue::String(s.to_string()),
            }
        }
        FieldType::Bool => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => GeneratedValue::Bool(true),
            "false" | "0" | "no" => GeneratedValue::Bool(false),
            _ => GeneratedValue::String(s.to_string()),
        },
        _ => GeneratedValue::String(s.to_string()),
    }
}

/// Always the same value.
pub struct StaticRandomizer {
    value: GeneratedValue,
}

impl StaticRandomizer {
    /// Randomizer returning `value` on every call.
    pub fn new(value: GeneratedValue) -> Self {
        Self { value }
    }
}

impl Randomizer for StaticRandomizer {
    type Output = GeneratedValue;

    fn next_value(&mut self) -> GeneratedValue {
        self.value.clone()
    }
}

/// Always null. Used for excluded and explicitly nulled fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRandomizer;

impl Randomizer for NullRandomizer {
    type Output = GeneratedValue;

    fn next_value(&mut self) -> GeneratedValue {
        GeneratedValue::Null
    }
}

/// Uniform choice from a pool of values. An empty pool yields null.
pub struct OneOfRandomizer {
    values: Vec<GeneratedValue>,
    rng: StdRng,
}

impl OneOfRandomizer {
    /// Choice over `values`.
    pub fn new(values: Vec<GeneratedValue>, seed: Option<u64>) -> Self {
        Self {
            values,
            rng: rng_from_seed(seed),
        }
    }

    /// Choice over YAML values.
    pub fn from_yaml(values: &[YamlValue], seed: Option<u64>) -> Self {
        Self::new(values.iter().map(yaml_to_generated_value).collect(), seed)
    }

    /// Choice over strings, as used by enumerations.
    pub fn from_strings(values: &[String], seed: Option<u64>) -> Self {
        Self::new(
            values.iter().map(|v| GeneratedValue::String(v.clone())).collect(),
            seed,
        )
    }
}

impl Randomizer for OneOfRandomizer {
    type Output = GeneratedValue;

    fn next_value(&mut self) -> GeneratedValue {
        self.values
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or(GeneratedValue::Null)
    }
}

/// Arrays sampled with replacement from a pool of strings, converted to
/// the element type.
pub struct SampleArrayRandomizer {
    pool: Vec<String>,
    min_length: usize,
    max_length: usize,
    element_type: FieldType,
    rng: StdRng,
}

impl SampleArrayRandomizer {
    /// Sampler drawing between `min_length` and `max_length` items.
    pub fn new(
        pool: Vec<String>,
        min_length: usize,
        max_length: usize,
        element_type: FieldType,
        seed: Option<u64>,
    ) -> Result<Self, crate::error::ConstructionError> {
        if min_length > max_length {
            return Err(crate::error::ConstructionError::InvalidRange {
                min: min_length.to_string(),
                max: max_length.to_string(),
            });
        }
        Ok(Self {
            pool,
            min_length,
            max_length,
            element_type,
            rng: rng_from_seed(seed),
        })
    }
}

impl Randomizer for SampleArrayRandomizer {
    type Output = GeneratedValue;

    fn next_value(&mut self) -> GeneratedValue {
        if self.pool.is_empty() || self.max_length == 0 {
            return GeneratedValue::Array(vec![]);
        }

        let length = self.rng.gen_range(self.min_length..=self.max_length);
        let items = (0..length)
            .filter_map(|_| self.pool.choose(&mut self.rng))
            .map(|item| string_to_typed_value(item, &self.element_type))
            .collect();

        GeneratedValue::Array(items)
    }
}
