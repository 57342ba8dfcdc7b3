//! Seeded pseudo-random sources.
//!
//! Noise lattices, sand grain and crystal sparkle all draw from a [`Random`]
//! so that a fixed seed reproduces every asset. Each material gets its own
//! stream via [`PositionalRandom::with_hash_of`], which keeps a material's
//! output independent of where it sits in the catalog.

pub mod xoroshiro;

/// A source of pseudo-random numbers.
pub trait Random {
    /// Returns a uniformly distributed `f64` in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

/// A factory deriving independent random sources from names.
pub trait PositionalRandom {
    /// The generator type this factory produces.
    type Output: Random;

    /// Derives a source from the MD5 of `name`.
    fn with_hash_of(&self, name: &str) -> Self::Output;
}
