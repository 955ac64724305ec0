//! # Random Number Generation Infrastructure
//!
//! Seeded standard-normal shocks for path simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: The same seed always yields the same shock matrices
//! - **Independent streams**: Each stream index derives its own seed from the
//!   run seed, so the Heston price and variance shocks never share a sequence
//! - **Seed once**: Every stream is seeded exactly once per run and its matrix
//!   is read-only thereafter; no generator is shared across threads
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//! - [`streams`]: Stream-seed derivation and shock-matrix generation
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::NormalStreams;
//!
//! let streams = NormalStreams::new(42);
//!
//! // 1 000 paths by 50 grid points from stream 0
//! let z1 = streams.normal_matrix(0, 1_000, 50);
//! assert_eq!(z1.n_paths(), 1_000);
//! assert_eq!(z1.n_steps(), 50);
//!
//! // Same inputs, same matrix
//! assert_eq!(z1, streams.normal_matrix(0, 1_000, 50));
//! ```

pub mod prng;
pub mod streams;

// Public re-exports
pub use prng::PricerRng;
pub use streams::{stream_seed, NormalStreams};
