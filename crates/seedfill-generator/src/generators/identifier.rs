//! Identifier randomizers: UUIDs, ULIDs and sequences.

use crate::randomizer::{rng_from_seed, Randomizer};
use rand::rngs::StdRng;
use rand::Rng;
use ulid::Ulid;
use uuid::Uuid;

/// Generate a random UUID v4 using the provided RNG.
pub fn random_uuid_v4<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Random version 4 UUIDs.
pub struct UuidRandomizer {
    rng: StdRng,
}

impl UuidRandomizer {
    /// UUID randomizer seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_seed(seed),
        }
    }
}

impl Randomizer for UuidRandomizer {
    type Output = Uuid;

    fn next_value(&mut self) -> Uuid {
        random_uuid_v4(&mut self.rng)
    }
}

/// Random ULIDs with a random 48-bit timestamp part.
pub struct UlidRandomizer {
    rng: StdRng,
}

impl UlidRandomizer {
    /// ULID randomizer seeded when `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_seed(seed),
        }
    }
}

impl Randomizer for UlidRandomizer {
    type Output = Ulid;

    fn next_value(&mut self) -> Ulid {
        let timestamp_ms = self.rng.gen::<u64>() >> 16;
        let random = self.rng.gen::<u128>();
        Ulid::from_parts(timestamp_ms, random)
    }
}

/// Consecutive integers from a starting value.
pub struct SequentialRandomizer {
    next: i64,
}

impl SequentialRandomizer {
    /// Sequence starting at `start`.
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }
}

impl Randomizer for SequentialRandomizer {
    type Output = i64;

    fn next_value(&mut self) -> i64 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_version_and_uniqueness() {
        let mut randomizer = UuidRandomizer::new(Some(42));
        let first = randomizer.next_value();
        let second = randomizer.next_value();

        assert_eq!(first.get_version_num(), 4);
        assert_ne!(first, second);
    }

    #[test]
    fn test_uuid_deterministic() {
        let mut first = UuidRandomizer::new(Some(42));
        let mut second = UuidRandomizer::new(Some(42));
        assert_eq!(first.next_value(), second.next_value());
    }

    #[test]
    fn test_ulid_deterministic() {
        let mut first = UlidRandomizer::new(Some(42));
        let mut second = UlidRandomizer::new(Some(42));
        let value = first.next_value();
        assert_eq!(value, second.next_value());
        assert!(value.timestamp_ms() < (1 << 48));
    }

    #[test]
    fn test_sequential() {
        let mut randomizer = SequentialRandomizer::new(100);
        assert_eq!(randomizer.next_value(), 100);
        assert_eq!(randomizer.next_value(), 101);
        assert_eq!(randomizer.next_value(), 102);
    }
}
