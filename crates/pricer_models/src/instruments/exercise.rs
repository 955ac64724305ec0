//! Intrinsic exercise value.
//!
//! The exercise value is the payoff received if the option is exercised at
//! the current price:
//!
//! ```text
//! call: max(S - K, 0)
//! put:  max(K - S, 0)
//! ```
//!
//! A path is in-the-money when its exercise value is strictly positive.

use pricer_core::types::PricingError;

use super::direction::OptionDirection;

/// Intrinsic value of exercising at `price`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{exercise_value, OptionDirection};
///
/// assert_eq!(exercise_value(110.0, 100.0, OptionDirection::Call), 10.0);
/// assert_eq!(exercise_value(110.0, 100.0, OptionDirection::Put), 0.0);
/// ```
#[inline]
pub fn exercise_value(price: f64, strike: f64, direction: OptionDirection) -> f64 {
    match direction {
        OptionDirection::Call => (price - strike).max(0.0),
        OptionDirection::Put => (strike - price).max(0.0),
    }
}

/// Exercise valuator bound to one contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseValuator, OptionDirection};
///
/// let put = ExerciseValuator::new(100.0, OptionDirection::Put).unwrap();
/// assert_eq!(put.values(&[80.0, 100.0, 120.0]), vec![20.0, 0.0, 0.0]);
/// assert!(put.is_in_the_money(99.0));
/// assert!(!put.is_in_the_money(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseValuator {
    strike: f64,
    direction: OptionDirection,
}

impl ExerciseValuator {
    /// Creates a valuator for the given strike and direction.
    ///
    /// # Errors
    /// `InvalidParameter` if `strike` is not positive and finite.
    pub fn new(strike: f64, direction: OptionDirection) -> Result<Self, PricingError> {
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "strike",
                format!("must be positive and finite, got {}", strike),
            ));
        }
        Ok(Self { strike, direction })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the contract direction.
    #[inline]
    pub fn direction(&self) -> OptionDirection {
        self.direction
    }

    /// Exercise value at a single price.
    #[inline]
    pub fn value(&self, price: f64) -> f64 {
        exercise_value(price, self.strike, self.direction)
    }

    /// Exercise values at every price.
    pub fn values(&self, prices: &[f64]) -> Vec<f64> {
        prices.iter().map(|&s| self.value(s)).collect()
    }

    /// Whether exercising at `price` pays strictly more than zero.
    #[inline]
    pub fn is_in_the_money(&self, price: f64) -> bool {
        self.value(price) > 0.0
    }
}
