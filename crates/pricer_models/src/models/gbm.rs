//! Geometric Brownian Motion (GBM) model implementation.
//!
//! GBM is the fundamental model for asset price dynamics, described by:
//! ```text
//! dS = r * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - r = risk-free rate
//! - sigma = volatility
//! - dW = Wiener process increment
//!
//! ## Log-space formulation
//!
//! We use the exact discretisation of the multiplicative process:
//! ```text
//! S(t+dt) = S(t) * exp((r - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//! which keeps every simulated price strictly positive.

use pricer_core::types::PricingError;

use super::stochastic::{SingleState, StochasticModel};

/// GBM model parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GBMParams {
    /// Initial spot price
    pub spot: f64,
    /// Risk-free rate (annualised)
    pub rate: f64,
    /// Volatility (annualised)
    pub volatility: f64,
}

impl GBMParams {
    /// Create new GBM parameters with validation.
    ///
    /// # Arguments
    /// * `spot` - Initial spot price (must be positive)
    /// * `rate` - Risk-free rate (must be finite)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// `InvalidParameter` naming the first offending field.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "spot",
                format!("must be positive and finite, got {}", spot),
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", rate),
            ));
        }
        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                format!("must be positive and finite, got {}", volatility),
            ));
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }
}

impl Default for GBMParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            volatility: 0.2,
        }
    }
}

/// Geometric Brownian Motion model.
#[derive(Clone, Copy, Debug, Default)]
pub struct GBMModel;

impl StochasticModel for GBMModel {
    type State = SingleState;
    type Params = GBMParams;

    fn evolve_step(state: Self::State, dt: f64, dw: &[f64], params: &Self::Params) -> Self::State {
        let sigma = params.volatility;

        // Drift term: (r - 0.5 * sigma^2) * dt
        let drift = (params.rate - 0.5 * sigma * sigma) * dt;

        // Diffusion term: sigma * sqrt(dt) * Z
        let diffusion = sigma * dt.sqrt() * dw[0];

        SingleState(state.0 * (drift + diffusion).exp())
    }

    fn initial_state(params: &Self::Params) -> Self::State {
        SingleState(params.spot)
    }

    fn brownian_dim() -> usize {
        1
    }

    fn model_name() -> &'static str {
        "GBM"
    }
}
