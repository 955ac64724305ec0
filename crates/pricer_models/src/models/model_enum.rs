//! Static dispatch enum for stochastic models.
//!
//! This module provides `StochasticModelEnum` for zero-cost selection between
//! the path models at run time. Each variant carries its validated
//! parameters, so a value of this type is everything a simulator needs to
//! evolve a path.
//!
//! ## Shock alignment
//!
//! Both models consume a matrix of normals with one column per grid point.
//! The step into grid point `t` reads:
//! - GBM: column `t - 1`
//! - Heston: column `t` (column 0 is never read)
//!
//! [`StochasticModelEnum::shock_column`] encodes this; reproducing reference
//! paths depends on it.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{GBMParams, StochasticModelEnum};
//!
//! let model = StochasticModelEnum::gbm(GBMParams::new(100.0, 0.05, 0.2).unwrap());
//!
//! assert_eq!(model.model_name(), "GBM");
//! assert_eq!(model.brownian_dim(), 1);
//! assert!(!model.is_two_factor());
//! assert_eq!(model.shock_column(1), 0);
//! ```

use super::gbm::{GBMModel, GBMParams};
use super::heston::{HestonModel, HestonParams};
use super::stochastic::{SingleState, StochasticModel, StochasticState, TwoFactorState};

/// Unified state type for all models.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModelState {
    /// Single-factor state (GBM)
    Single(SingleState),
    /// Two-factor state (Heston)
    TwoFactor(TwoFactorState),
}

impl ModelState {
    /// Get the price component.
    pub fn price(&self) -> f64 {
        match self {
            ModelState::Single(s) => s.price(),
            ModelState::TwoFactor(s) => s.price(),
        }
    }

    /// Get variance component if available.
    pub fn variance(&self) -> Option<f64> {
        match self {
            ModelState::Single(s) => s.variance(),
            ModelState::TwoFactor(s) => s.variance(),
        }
    }
}

/// Static dispatch enum for stochastic models.
///
/// # Supported Models
///
/// - `GBM`: Geometric Brownian Motion (1 shock per step)
/// - `Heston`: Stochastic volatility (2 independent shocks per step)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StochasticModelEnum {
    /// Geometric Brownian Motion model
    GBM(GBMParams),
    /// Heston stochastic-volatility model
    Heston(HestonParams),
}

impl StochasticModelEnum {
    /// Create a GBM model.
    pub fn gbm(params: GBMParams) -> Self {
        StochasticModelEnum::GBM(params)
    }

    /// Create a Heston model.
    pub fn heston(params: HestonParams) -> Self {
        StochasticModelEnum::Heston(params)
    }

    /// Get the model name.
    pub fn model_name(&self) -> &'static str {
        match self {
            StochasticModelEnum::GBM(_) => GBMModel::model_name(),
            StochasticModelEnum::Heston(_) => HestonModel::model_name(),
        }
    }

    /// Get the number of independent shocks required per step.
    pub fn brownian_dim(&self) -> usize {
        match self {
            StochasticModelEnum::GBM(_) => GBMModel::brownian_dim(),
            StochasticModelEnum::Heston(_) => HestonModel::brownian_dim(),
        }
    }

    /// Check if this is a two-factor model.
    pub fn is_two_factor(&self) -> bool {
        matches!(self, StochasticModelEnum::Heston(_))
    }

    /// Initial spot price.
    pub fn spot(&self) -> f64 {
        match self {
            StochasticModelEnum::GBM(p) => p.spot,
            StochasticModelEnum::Heston(p) => p.spot,
        }
    }

    /// Risk-free rate.
    pub fn rate(&self) -> f64 {
        match self {
            StochasticModelEnum::GBM(p) => p.rate,
            StochasticModelEnum::Heston(p) => p.rate,
        }
    }

    /// Column of the shock matrix read by the step into grid point `step`.
    ///
    /// `step` must be at least 1.
    #[inline]
    pub fn shock_column(&self, step: usize) -> usize {
        match self {
            StochasticModelEnum::GBM(_) => step - 1,
            StochasticModelEnum::Heston(_) => step,
        }
    }

    /// Get initial state for the model.
    pub fn initial_state(&self) -> ModelState {
        match self {
            StochasticModelEnum::GBM(p) => ModelState::Single(GBMModel::initial_state(p)),
            StochasticModelEnum::Heston(p) => ModelState::TwoFactor(HestonModel::initial_state(p)),
        }
    }

    /// Evolve a state by one step.
    ///
    /// A state of the wrong shape is restarted from the model's initial state
    /// before stepping.
    pub fn evolve_step(&self, state: ModelState, dt: f64, dw: &[f64]) -> ModelState {
        match (self, state) {
            (StochasticModelEnum::GBM(p), ModelState::Single(s)) => {
                ModelState::Single(GBMModel::evolve_step(s, dt, dw, p))
            }
            (StochasticModelEnum::Heston(p), ModelState::TwoFactor(s)) => {
                ModelState::TwoFactor(HestonModel::evolve_step(s, dt, dw, p))
            }
            (model, _) => model.evolve_step(model.initial_state(), dt, dw),
        }
    }
}
