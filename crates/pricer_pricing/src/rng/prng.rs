//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper that offers
//! reproducible standard-normal generation with batch operations.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use super::streams::stream_seed;

/// Monte Carlo simulation random number generator.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    ///
    /// // Same seed produces identical sequences
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator for sub-stream `stream` of a run seeded with
    /// `seed`.
    ///
    /// The generator is seeded with [`stream_seed`]`(seed, stream)`, which is
    /// what [`seed`](Self::seed) reports.
    #[inline]
    pub fn from_stream(seed: u64, stream: u32) -> Self {
        Self::from_seed(stream_seed(seed, stream))
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal (mean=0, std=1) variates.
    ///
    /// The buffer must be pre-allocated by the caller. Empty buffers are a
    /// no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
