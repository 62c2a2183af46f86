//! String and binary randomizers.
//!
//! [`PatternRandomizer`] supports placeholders:
//! - `{index}` - number of values drawn so far
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number

use crate::error::ConstructionError;
use crate::generators::identifier::random_uuid_v4;
use crate::randomizer::{rng_from_seed, Randomizer};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::Rng;
use seedfill_core::SizeRange;

/// Alphanumeric strings with a length drawn from a range.
pub struct StringRandomizer {
    length: SizeRange,
    rng: StdRng,
}

impl StringRandomizer {
    /// Strings whose length lies in `length`.
    pub fn new(length: SizeRange, seed: Option<u64>) -> Result<Self, ConstructionError> {
        if length.min > length.max {
            return Err(ConstructionError::InvalidRange {
                min: length.min.to_string(),
                max: length.max.to_string(),
            });
        }
        Ok(Self {
            length,
            rng: rng_from_seed(seed),
        })
    }

    /// Strings of exactly `length` characters.
    pub fn exact(length: usize, seed: Option<u64>) -> Self {
        Self {
            length: SizeRange::new(length, length),
            rng: rng_from_seed(seed),
        }
    }

    /// Strings within `defaults`, capped at `max_length` characters.
    pub fn capped(defaults: SizeRange, max_length: usize, seed: Option<u64>) -> Self {
        let max = defaults.max.min(max_length);
        let min = defaults.min.min(max);
        Self {
            length: SizeRange::new(min, max),
            rng: rng_from_seed(seed),
        }
    }
}

impl Randomizer for StringRandomizer {
    type Output = String;

    fn next_value(&mut self) -> String {
        let length = self.rng.gen_range(self.length.min..=self.length.max);
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

/// Strings built from a pattern with placeholders.
pub struct PatternRandomizer {
    pattern: String,
    index: u64,
    rng: StdRng,
}

impl PatternRandomizer {
    /// Randomizer expanding `pattern`.
    pub fn new(pattern: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            pattern: pattern.into(),
            index: 0,
            rng: rng_from_seed(seed),
        }
    }
}

impl Randomizer for PatternRandomizer {
    type Output = String;

    fn next_value(&mut self) -> String {
        let value = expand_pattern(&self.pattern, &mut self.rng, self.index);
        self.index += 1;
        value
    }
}

/// Expand the placeholders of `pattern`.
fn expand_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> String {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &random_uuid_v4(rng).to_string(), 1);
    }

    // Resume scanning after each expansion so malformed placeholders are kept
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(close) = result[start..].find('}') else {
            break;
        };
        let end = start + close;
        match result[start + 6..end].parse::<usize>() {
            Ok(digits) => {
                let random_num = random_digits(rng, digits);
                search_from = start + random_num.len();
                result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
            }
            Err(_) => search_from = end + 1,
        }
    }

    result
}

/// Generate a random number with exactly N digits.
fn random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.gen_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }

    result
}

/// Random byte strings with a length drawn from a range.
pub struct BytesRandomizer {
    length: SizeRange,
    rng: StdRng,
}

impl BytesRandomizer {
    /// Byte strings whose length lies in `length`.
    pub fn new(length: SizeRange, seed: Option<u64>) -> Result<Self, ConstructionError> {
        if length.min > length.max {
            return Err(ConstructionError::InvalidRange {
                min: length.min.to_string(),
                max: length.max.to_string(),
            });
        }
        Ok(Self {
            length,
            rng: rng_from_seed(seed),
        })
    }
}

impl Randomizer for BytesRandomizer {
    type Output = Vec<u8>;

    fn next_value(&mut self) -> Vec<u8> {
        let length = self.rng.gen_range(self.length.min..=self.length.max);
        let mut bytes = vec![0u8; length];
        self.rng.fill(bytes.as_mut_slice());
        bytes
    }
}
