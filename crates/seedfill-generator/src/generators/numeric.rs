//! Numeric randomizers.

use crate::error::ConstructionError;
use crate::randomizer::{rng_from_seed, Randomizer};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::Rng;
use seedfill_core::GeneratedValue;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Uniform values in an inclusive range.
///
/// Every value drawn lies in `[min, max]`, for every seed.
pub struct RangeRandomizer<T> {
    min: T,
    max: T,
    rng: StdRng,
}

impl<T> RangeRandomizer<T>
where
    T: SampleUniform + PartialOrd + Copy + Debug,
{
    /// Unseeded randomizer over `[min, max]`.
    pub fn new(min: T, max: T) -> Result<Self, ConstructionError> {
        Self::from_seed(min, max, None)
    }

    /// Seeded randomizer over `[min, max]`.
    pub fn with_seed(min: T, max: T, seed: u64) -> Result<Self, ConstructionError> {
        Self::from_seed(min, max, Some(seed))
    }

    /// Randomizer over `[min, max]`, seeded when `seed` is given.
    pub fn from_seed(min: T, max: T, seed: Option<u64>) -> Result<Self, ConstructionError> {
        match min.partial_cmp(&max) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self::bounded(min, max, seed)),
            _ => Err(ConstructionError::InvalidRange {
                min: format!("{min:?}"),
                max: format!("{max:?}"),
            }),
        }
    }

    /// Build without checking the bounds; callers pass constant, ordered bounds.
    pub(crate) fn bounded(min: T, max: T, seed: Option<u64>) -> Self {
        Self {
            min,
            max,
            rng: rng_from_seed(seed),
        }
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T> Randomizer for RangeRandomizer<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    type Output = T;

    fn next_value(&mut self) -> T {
        self.rng.gen_range(self.min..=self.max)
    }
}

impl RangeRandomizer<f64> {
    /// Float randomizer over `[min, max]`.
    ///
    /// Both bounds must be finite and so must the width of the range.
    pub fn float(min: f64, max: f64, seed: Option<u64>) -> Result<Self, ConstructionError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConstructionError::invalid_config(format!(
                "float range bounds must be finite, got [{min}, {max}]"
            )));
        }
        // Uniform sampling scales the width by 1 / (1 - EPSILON)
        if !((max - min) / (1.0 - f64::EPSILON)).is_finite() {
            return Err(ConstructionError::invalid_config(format!(
                "float range [{min}, {max}] is too wide"
            )));
        }
        Self::from_seed(min, max, seed)
    }
}

/// Decimal values in a range, formatted with a fixed scale.
pub struct DecimalRandomizer {
    range: RangeRandomizer<f64>,
    precision: u8,
    scale: u8,
}

impl DecimalRandomizer {
    /// Decimal randomizer over `[min, max]`.
    pub fn new(
        min: f64,
        max: f64,
        precision: u8,
        scale: u8,
        seed: Option<u64>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            range: RangeRandomizer::float(min, max, seed)?,
            precision,
            scale,
        })
    }

    /// Decimal randomizer covering every non-negative value the precision
    /// and scale can hold.
    pub fn for_type(precision: u8, scale: u8, seed: Option<u64>) -> Self {
        let integer_digits = precision.saturating_sub(scale) as i32;
        let max = (10f64.powi(integer_digits) - 10f64.powi(-(scale as i32))).max(0.0);
        Self {
            range: RangeRandomizer::bounded(0.0, max, seed),
            precision,
            scale,
        }
    }
}

impl Randomizer for DecimalRandomizer {
    type Output = GeneratedValue;

    fn next_value(&mut self) -> GeneratedValue {
        let value = self.range.next_value();
        GeneratedValue::Decimal {
            value: format!("{value:.prec$}", prec = self.scale as usize),
            precision: self.precision,
            scale: self.scale,
        }
    }
}

/// Boolean values, true with a configurable probability.
pub struct BoolRandomizer {
    true_weight: f64,
    rng: StdRng,
}

impl BoolRandomizer {
    /// Fair coin.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            true_weight: 0.5,
            rng: rng_from_seed(seed),
        }
    }

    /// Coin landing true with probability `true_weight`.
    pub fn weighted(true_weight: f64, seed: Option<u64>) -> Result<Self, ConstructionError> {
        if !(0.0..=1.0).contains(&true_weight) {
            return Err(ConstructionError::invalid_config(format!(
                "true_weight must be within [0, 1], got {true_weight}"
            )));
        }
        Ok(Self {
            true_weight,
            rng: rng_from_seed(seed),
        })
    }
}

impl Randomizer for BoolRandomizer {
    type Output = bool;

    fn next_value(&mut self) -> bool {
        self.rng.gen_bool(self.true_weight)
    }
}
