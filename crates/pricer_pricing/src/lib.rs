//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing prices American options by Least-Squares Monte Carlo:
//! - Seed-reproducible, independent standard-normal streams (`rng`)
//! - Validated run configuration and row-parallel path simulation for
//!   GBM and Heston (`mc`)
//! - Longstaff-Schwartz backward induction with per-step cubic regression
//!   (`lsm`)
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `PricingError`, `TimeGrid`, `PolynomialFit`
//! - Layer 2 (pricer_models): `OptionDirection`, `ExerciseValuator`,
//!   `StochasticModelEnum`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::OptionDirection;
//! use pricer_pricing::lsm::AmericanPricer;
//! use pricer_pricing::mc::SimulationParameters;
//!
//! let params = SimulationParameters::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.03)
//!     .volatility(0.2)
//!     .n_paths(1_000)
//!     .n_steps(50)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let pricer = AmericanPricer::new(params);
//! let result = pricer.price(OptionDirection::Put).unwrap();
//!
//! // Same inputs, same rounded price
//! assert_eq!(result.price, pricer.price(OptionDirection::Put).unwrap().price);
//! ```
//!
//! ## Logging
//!
//! The engine emits `tracing` spans and events (run parameters and result
//! at `INFO`, per-step in-the-money and exercise counts at `DEBUG`).
//! Installing a subscriber is left to the application.
//!
//! ## Determinism
//!
//! Results depend only on the parameters and the seed, never on the rayon
//! thread count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod lsm;
pub mod mc;
pub mod rng;

// Re-export commonly used items for convenience
pub use lsm::{AmericanPricer, PricingResult};
pub use mc::{PricingRunConfig, SimulationParameters};
