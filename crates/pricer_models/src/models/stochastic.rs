//! StochasticModel trait for a unified single-step interface.
//!
//! This module defines the core trait abstraction for the path models
//! (GBM, Heston). A model only knows how to advance one state by one time
//! step given its Brownian shocks; drawing the shocks and laying states out
//! into path matrices is the simulator's job.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch only**: Use enum-based dispatch, not `Box<dyn Trait>`
//! - **Pure steps**: `evolve_step` reads its inputs and returns a new state

/// State representation for stochastic models.
///
/// Different models carry different state variables:
/// - GBM: Single value (price)
/// - Heston: Two values (price, variance)
pub trait StochasticState: Clone + Copy {
    /// Asset price component.
    fn price(&self) -> f64;

    /// Instantaneous variance component, if the model carries one.
    fn variance(&self) -> Option<f64>;
}

/// Single-factor state (GBM price)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingleState(pub f64);

impl StochasticState for SingleState {
    fn price(&self) -> f64 {
        self.0
    }

    fn variance(&self) -> Option<f64> {
        None
    }
}

/// Two-factor state (Heston price and variance)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoFactorState {
    /// Asset price
    pub price: f64,
    /// Instantaneous variance
    pub variance: f64,
}

impl StochasticState for TwoFactorState {
    fn price(&self) -> f64 {
        self.price
    }

    fn variance(&self) -> Option<f64> {
        Some(self.variance)
    }
}

/// Unified trait interface for stochastic process models.
///
/// # Static Dispatch Only
/// Do NOT use `Box<dyn StochasticModel>`. Use
/// [`StochasticModelEnum`](super::model_enum::StochasticModelEnum) to select a
/// model at run time.
pub trait StochasticModel {
    /// Model-specific state type (GBM: `SingleState`, Heston: `TwoFactorState`)
    type State: StochasticState;

    /// Model parameters type
    type Params: Clone;

    /// Evolve state by one time step.
    ///
    /// # Arguments
    /// * `state` - Current state
    /// * `dt` - Time step size (must be positive)
    /// * `dw` - Independent standard normal shocks (length `brownian_dim()`)
    /// * `params` - Model parameters
    fn evolve_step(state: Self::State, dt: f64, dw: &[f64], params: &Self::Params) -> Self::State;

    /// Initial state from model parameters.
    fn initial_state(params: &Self::Params) -> Self::State;

    /// Number of independent standard normal shocks required per step.
    fn brownian_dim() -> usize;

    /// Model name for logging and debugging.
    fn model_name() -> &'static str;
}
