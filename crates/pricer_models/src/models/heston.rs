//! Heston stochastic-volatility model.
//!
//! ```text
//! dS = r S dt + sqrt(V) S dW₂
//! dV = κ(θ - V) dt + ξ sqrt(V) dW₁
//! dW₁ dW₂ = ρ dt
//! ```
//!
//! ## Discretisation
//!
//! Euler scheme with reflection on the variance and a log-Euler price step
//! that uses the variance from the *previous* grid point in both drift and
//! diffusion:
//!
//! ```text
//! V[t] = | V[t-1] + κ(θ - V[t-1]) dt + ξ sqrt(V[t-1] dt) Z₁ |
//! S[t] = S[t-1] exp((r - V[t-1]/2) dt + sqrt(V[t-1] dt) Z₂)
//! Z₂   = ρ Z₁ + sqrt(1 - ρ²) Z⊥
//! ```
//!
//! The lag is part of the scheme and results depend on it. `Z⊥` must be
//! drawn independently of `Z₁`; the model receives both as separate shocks.

use pricer_core::types::PricingError;
use tracing::warn;

use super::stochastic::{StochasticModel, TwoFactorState};

/// Heston model parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonParams {
    /// Initial spot price (S₀)
    pub spot: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Initial variance (V₀)
    pub v0: f64,
    /// Mean-reversion speed (κ)
    pub kappa: f64,
    /// Long-run variance (θ)
    pub theta: f64,
    /// Volatility of variance (ξ)
    pub xi: f64,
    /// Correlation between the price and variance shocks (ρ)
    pub rho: f64,
}

impl HestonParams {
    /// Create new Heston parameters with validation.
    ///
    /// A violated Feller condition (2κθ ≤ ξ²) is logged as a warning but not
    /// rejected; the reflected variance stays non-negative regardless.
    ///
    /// # Errors
    /// `InvalidParameter` if:
    /// - `spot` or `xi` is not positive
    /// - `v0`, `kappa` or `theta` is negative
    /// - `rho` lies outside [-1, 1]
    /// - any value is non-finite
    pub fn new(
        spot: f64,
        rate: f64,
        v0: f64,
        kappa: f64,
        theta: f64,
        xi: f64,
        rho: f64,
    ) -> Result<Self, PricingError> {
        let params = Self {
            spot,
            rate,
            v0,
            kappa,
            theta,
            xi,
            rho,
        };
        params.validate()?;

        if !params.feller_satisfied() {
            warn!(
                kappa,
                theta,
                xi,
                "Feller condition 2*kappa*theta > xi^2 violated; variance will touch zero"
            );
        }

        Ok(params)
    }

    /// Validates every field.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "spot",
                format!("must be positive and finite, got {}", self.spot),
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        for (name, value) in [("v0", self.v0), ("kappa", self.kappa), ("theta", self.theta)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PricingError::invalid_parameter(
                    name,
                    format!("must be non-negative and finite, got {}", value),
                ));
            }
        }
        if !(self.xi > 0.0 && self.xi.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "vol_of_vol",
                format!("must be positive and finite, got {}", self.xi),
            ));
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(PricingError::invalid_parameter(
                "correlation",
                format!("must lie in [-1, 1], got {}", self.rho),
            ));
        }
        Ok(())
    }

    /// Whether 2κθ > ξ², under which the continuous variance stays positive.
    #[inline]
    pub fn feller_satisfied(&self) -> bool {
        2.0 * self.kappa * self.theta > self.xi * self.xi
    }
}

/// Heston stochastic-volatility model.
#[derive(Clone, Copy, Debug, Default)]
pub struct HestonModel;

impl StochasticModel for HestonModel {
    type State = TwoFactorState;
    type Params = HestonParams;

    /// `dw[0]` drives the variance, `dw[1]` is the independent shock mixed
    /// into the price by the correlation.
    fn evolve_step(state: Self::State, dt: f64, dw: &[f64], params: &Self::Params) -> Self::State {
        let v = state.variance;
        let z1 = dw[0];
        let z2 = params.rho * z1 + (1.0 - params.rho * params.rho).sqrt() * dw[1];
        let sqrt_v_dt = (v * dt).sqrt();

        let variance =
            (v + params.kappa * (params.theta - v) * dt + params.xi * sqrt_v_dt * z1).abs();
        let price = state.price * ((params.rate - 0.5 * v) * dt + sqrt_v_dt * z2).exp();

        TwoFactorState { price, variance }
    }

    fn initial_state(params: &Self::Params) -> Self::State {
        TwoFactorState {
            price: params.spot,
            variance: params.v0,
        }
    }

    fn brownian_dim() -> usize {
        2
    }

    fn model_name() -> &'static str {
        "Heston"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn standard() -> HestonParams {
        HestonParams::new(100.0, 0.03, 0.04, 1.0, 0.04, 0.3, -0.7).unwrap()
    }

    #[test]
    fn test_params_valid() {
        let p = standard();
        assert_eq!(p.v0, 0.04);
        assert!(p.feller_satisfied());
    }

    #[test]
    fn test_params_reject_correlation_out_of_range() {
        let err = HestonParams::new(100.0, 0.03, 0.04, 1.0, 0.04, 0.3, 1.5).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter {
                name: "correlation",
                ..
            }
        ));
        assert!(HestonParams::new(100.0, 0.03, 0.04, 1.0, 0.04, 0.3, -1.01).is_err());
    }

    #[test]
    fn test_params_accept_correlation_bounds() {
        assert!(HestonParams::new(100.0, 0.03, 0.04, 1.0, 0.04, 0.3, 1.0).is_ok());
        assert!(HestonParams::new(100.0, 0.03, 0.04, 1.0, 0.04, 0.3, -1.0).is_ok());
    }

    #[test]
    fn test_params_reject_negative_variance_inputs() {
        assert!(HestonParams::new(100.0, 0.03, -0.04, 1.0, 0.04, 0.3, 0.0).is_err());
        assert!(HestonParams::new(100.0, 0.03, 0.04, -1.0, 0.04, 0.3, 0.0).is_err());
        assert!(HestonParams::new(100.0, 0.03, 0.04, 1.0, -0.04, 0.3, 0.0).is_err());
        assert!(HestonParams::new(100.0, 0.03, 0.04, 1.0, 0.04, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_feller_violation_is_not_an_error() {
        let p = HestonParams::new(100.0, 0.03, 0.04, 0.5, 0.02, 1.0, 0.0).unwrap();
        assert!(!p.feller_satisfied());
    }

    #[test]
    fn test_price_uses_lagged_variance() {
        let p = standard();
        let state = TwoFactorState {
            price: 100.0,
            variance: 0.09,
        };
        let dt = 0.01;
        let next = HestonModel::evolve_step(state, dt, &[1.5, 0.0], &p);

        let z2 = -0.7 * 1.5;
        let expected_price = 100.0 * ((0.03 - 0.5 * 0.09) * dt + (0.09_f64 * dt).sqrt() * z2).exp();
        assert_relative_eq!(next.price, expected_price, epsilon = 1e-12);

        let expected_variance =
            (0.09 + 1.0 * (0.04 - 0.09) * dt + 0.3 * (0.09_f64 * dt).sqrt() * 1.5).abs();
        assert_relative_eq!(next.variance, expected_variance, epsilon = 1e-15);
    }

    #[test]
    fn test_variance_reflected_at_zero() {
        let p = HestonParams::new(100.0, 0.03, 0.01, 1.0, 0.01, 2.0, 0.0).unwrap();
        let state = HestonModel::initial_state(&p);
        let next = HestonModel::evolve_step(state, 0.1, &[-4.0, 0.0], &p);

        // 0.01 + 0 - 2 * sqrt(0.001) * 4 < 0 before reflection
        assert!(next.variance > 0.0);
        assert_relative_eq!(
            next.variance,
            (0.01 - 2.0 * (0.001_f64).sqrt() * 4.0).abs(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_zero_correlation_ignores_variance_shock_in_price() {
        let p = HestonParams::new(100.0, 0.0, 0.04, 1.0, 0.04, 0.3, 0.0).unwrap();
        let state = HestonModel::initial_state(&p);
        let a = HestonModel::evolve_step(state, 0.01, &[2.0, 0.5], &p);
        let b = HestonModel::evolve_step(state, 0.01, &[-2.0, 0.5], &p);
        assert_relative_eq!(a.price, b.price, epsilon = 1e-12);
        assert!(a.variance != b.variance);
    }

    #[test]
    fn test_model_metadata() {
        assert_eq!(HestonModel::model_name(), "Heston");
        assert_eq!(HestonModel::brownian_dim(), 2);
        let state = HestonModel::initial_state(&standard());
        assert_eq!(state.price, 100.0);
        assert_eq!(state.variance, 0.04);
    }
}
