//! The randomizer contract.
//!
//! A randomizer owns its random state and hands out one value per call.
//! When built from a seed it is a pure function of that seed: two
//! randomizers with the same seed produce the same sequence.

use rand::rngs::StdRng;
use rand::SeedableRng;
use seedfill_core::GeneratedValue;

/// Produces successive values of one type.
pub trait Randomizer {
    /// Type of the produced values.
    type Output;

    /// Produce the next value, advancing the internal random state.
    fn next_value(&mut self) -> Self::Output;
}

impl<R: Randomizer + ?Sized> Randomizer for Box<R> {
    type Output = R::Output;

    fn next_value(&mut self) -> Self::Output {
        (**self).next_value()
    }
}

/// Type-erased randomizer, as handed out by registries.
pub type BoxedRandomizer = Box<dyn Randomizer<Output = GeneratedValue> + Send>;

/// Adapter converting a typed randomizer's output into [`GeneratedValue`].
struct ValueRandomizer<R>(R);

impl<R> Randomizer for ValueRandomizer<R>
where
    R: Randomizer,
    R::Output: Into<GeneratedValue>,
{
    type Output = GeneratedValue;

    fn next_value(&mut self) -> GeneratedValue {
        self.0.next_value().into()
    }
}

/// Erase the output type of a randomizer.
pub fn boxed<R>(randomizer: R) -> BoxedRandomizer
where
    R: Randomizer + Send + 'static,
    R::Output: Into<GeneratedValue>,
{
    Box::new(ValueRandomizer(randomizer))
}

/// Randomizer backed by a closure.
pub struct FnRandomizer<F>(F);

impl<F, T> Randomizer for FnRandomizer<F>
where
    F: FnMut() -> T,
{
    type Output = T;

    fn next_value(&mut self) -> T {
        (self.0)()
    }
}

/// Build a randomizer from a closure.
pub fn from_fn<F, T>(f: F) -> FnRandomizer<F>
where
    F: FnMut() -> T,
{
    FnRandomizer(f)
}

/// Random source for a generator: seeded when a seed is given, otherwise
/// seeded from system entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Derive a seed for a named sub-generator from a base seed.
///
/// The key is hashed with FNV-1a so the result does not depend on the
/// standard library's hasher.
pub fn derive_seed(seed: u64, key: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let hash = key.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    });
    seed.wrapping_add(hash.wrapping_mul(0x9E3779B97F4A7C15))
}

/// Derive an optional seed, keeping `None` unseeded.
pub fn derive_optional_seed(seed: Option<u64>, key: &str) -> Option<u64> {
    seed.map(|seed| derive_seed(seed, key))
}
