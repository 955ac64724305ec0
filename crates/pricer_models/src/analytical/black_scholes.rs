//! Black-Scholes prices for European options.
//!
//! ## Formulas
//!
//! **Call**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! An American call on a non-dividend asset is worth exactly the European
//! call, and an American put is worth at least the European put. Both facts
//! make these prices the natural yardstick for a Least-Squares Monte Carlo
//! estimate.

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::OptionDirection;

/// Expiries at or below this are treated as already expired.
const EXPIRY_EPSILON: f64 = 1e-10;

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::zero)
}

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (`f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// At expiry this saturates to ±100 (or 0 at the money).
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            let large: T = lit(100.0);
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let half: T = lit(0.5);
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price. Returns intrinsic value at expiry.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            return (self.spot - strike).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// European put price. Returns intrinsic value at expiry.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= lit(EXPIRY_EPSILON) {
            return (strike - self.spot).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }

    /// European price for either direction.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionDirection;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.03, 0.2).unwrap();
    /// assert_eq!(bs.price(100.0, 0.2, OptionDirection::Put), bs.price_put(100.0, 0.2));
    /// ```
    #[inline]
    pub fn price(&self, strike: T, expiry: T, direction: OptionDirection) -> T {
        match direction {
            OptionDirection::Call => self.price_call(strike, expiry),
            OptionDirection::Put => self.price_put(strike, expiry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn standard() -> BlackScholes<f64> {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_inputs() {
        assert!(matches!(
            BlackScholes::new(0.0_f64, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.05, -0.2),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(BlackScholes::new(f64::NAN, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(100.0_f64, -0.01, 0.2).is_ok());
    }

    #[test]
    fn test_accessors() {
        let bs = standard();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_d1_d2_atm() {
        let bs = standard();
        // d1 = (0.05 + 0.02) / 0.2 = 0.35
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.35, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_at_expiry_saturates() {
        let bs = standard();
        assert_eq!(bs.d1(90.0, 0.0), 100.0);
        assert_eq!(bs.d1(110.0, 0.0), -100.0);
        assert_eq!(bs.d1(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_reference_values() {
        let bs = standard();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.450583572185565, epsilon = 1e-4);
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.573526022256971, epsilon = 1e-4);
    }

    #[test]
    fn test_intrinsic_at_expiry() {
        let bs = standard();
        assert_eq!(bs.price_call(90.0, 0.0), 10.0);
        assert_eq!(bs.price_call(110.0, 0.0), 0.0);
        assert_eq!(bs.price_put(110.0, 0.0), 10.0);
        assert_eq!(bs.price_put(90.0, 0.0), 0.0);
    }

    #[test]
    fn test_put_call_parity() {
        for &(strike, expiry, rate) in &[
            (80.0, 0.5, 0.03),
            (100.0, 0.2, 0.03),
            (120.0, 2.0, 0.05),
            (100.0, 1.0, -0.01),
        ] {
            let bs = BlackScholes::new(100.0_f64, rate, 0.25).unwrap();
            let lhs = bs.price_call(strike, expiry) - bs.price_put(strike, expiry);
            let rhs = 100.0 - strike * (-rate * expiry).exp();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_price_dispatches_on_direction() {
        let bs = standard();
        assert_eq!(
            bs.price(95.0, 0.5, OptionDirection::Call),
            bs.price_call(95.0, 0.5)
        );
        assert_eq!(
            bs.price(95.0, 0.5, OptionDirection::Put),
            bs.price_put(95.0, 0.5)
        );
    }

    #[test]
    fn test_deep_itm_put_above_discounted_intrinsic() {
        let bs = BlackScholes::new(80.0_f64, 0.03, 0.25).unwrap();
        let put = bs.price_put(100.0, 0.2);
        assert!(put >= 100.0 * (-0.03_f64 * 0.2).exp() - 80.0 - 1e-9);
    }

    #[test]
    fn test_f32_compatibility() {
        let bs = BlackScholes::new(100.0_f32, 0.05, 0.2).unwrap();
        assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-3);
    }
}
