//! Monte Carlo simulation layer.
//!
//! # Architecture
//!
//! ```text
//! SimulationParameters  (validated run configuration, TOML or builder)
//! └── PathSimulator
//!     ├── NormalStreams (stream 0, and stream 1 for Heston)
//!     ├── StochasticModelEnum::evolve_step (row-parallel)
//!     └── SimulatedPaths (price matrix, optional variance matrix)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{PathSimulator, SimulationParameters};
//!
//! let params = SimulationParameters::from_toml_str(r#"
//!     spot = 100.0
//!     strike = 100.0
//!     rate = 0.03
//!     volatility = 0.2
//!     n_paths = 256
//!     n_steps = 50
//!     seed = 42
//! "#).unwrap();
//!
//! let paths = PathSimulator::new(&params).simulate().unwrap();
//! assert_eq!(paths.prices().n_paths(), 256);
//! ```

pub mod config;
pub mod error;
pub mod paths;

// Re-exports for convenient access
pub use config::{
    PricingRunConfig, SimulationParameters, SimulationParametersBuilder,
    StochasticVolatilityParams, DEFAULT_SEED, DEFAULT_TRADING_DAYS, MAX_PATHS, MAX_STEPS,
};
pub use error::ConfigError;
pub use paths::{PathMatrix, PathSimulator, SimulatedPaths};
