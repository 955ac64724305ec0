//! Stochastic process models (GBM, Heston).
//!
//! This module provides single-step path models for Monte Carlo simulation:
//! - `StochasticModel` trait: Unified interface for all models
//! - `StochasticModelEnum`: Static dispatch enum carrying validated parameters
//! - `GBMModel`: Geometric Brownian Motion model
//! - `HestonModel`: Heston stochastic-volatility model
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{GBMParams, StochasticModelEnum};
//!
//! let model = StochasticModelEnum::gbm(GBMParams::new(100.0, 0.05, 0.2).unwrap());
//!
//! // Evolve one daily step without a shock
//! let dt = 1.0 / 250.0;
//! let next = model.evolve_step(model.initial_state(), dt, &[0.0]);
//! assert!(next.price() > 100.0);
//! ```

pub mod gbm;
pub mod heston;
pub mod model_enum;
pub mod stochastic;

// Re-export core trait types
pub use stochastic::{SingleState, StochasticModel, StochasticState, TwoFactorState};

// Re-export models
pub use gbm::{GBMModel, GBMParams};
pub use heston::{HestonModel, HestonParams};

// Re-export enum types for static dispatch
pub use model_enum::{ModelState, StochasticModelEnum};
