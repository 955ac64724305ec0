//! Continuation-value regression.
//!
//! At each backward step the expected discounted value of holding on is
//! estimated by a cubic polynomial in the current price, fitted on the
//! in-the-money paths only and then evaluated on every path.

use pricer_core::math::{PolynomialFit, RegressionError};
use rayon::prelude::*;

/// Degree of the polynomial basis in price.
pub const BASIS_DEGREE: usize = 3;

/// A fitted continuation-value estimate for one backward step.
///
/// Built fresh at each step and dropped afterwards.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsm::ContinuationEstimator;
///
/// let prices = [80.0, 85.0, 90.0, 95.0];
/// let cashflows = [19.0, 14.5, 10.0, 5.5];
///
/// let estimator = ContinuationEstimator::fit(&prices, &cashflows).unwrap();
/// let values = estimator.evaluate_all(&[82.5, 120.0]);
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuationEstimator {
    fit: PolynomialFit,
}

impl ContinuationEstimator {
    /// Fits the estimator on the in-the-money subset.
    ///
    /// # Arguments
    /// * `prices_itm` - Current prices of the in-the-money paths
    /// * `cashflows_itm` - Their discounted future cashflows
    ///
    /// # Errors
    /// Propagates [`RegressionError`] for an empty, mismatched or non-finite
    /// sample.
    pub fn fit(prices_itm: &[f64], cashflows_itm: &[f64]) -> Result<Self, RegressionError> {
        PolynomialFit::fit(prices_itm, cashflows_itm, BASIS_DEGREE).map(|fit| Self { fit })
    }

    /// Degree actually fitted (lower than [`BASIS_DEGREE`] for a sample with
    /// too few distinct prices).
    #[inline]
    pub fn degree(&self) -> usize {
        self.fit.degree()
    }

    /// Estimated continuation value at one price.
    #[inline]
    pub fn evaluate(&self, price: f64) -> f64 {
        self.fit.evaluate(price)
    }

    /// Estimated continuation values at every price.
    pub fn evaluate_all(&self, prices: &[f64]) -> Vec<f64> {
        prices.par_iter().map(|&s| self.fit.evaluate(s)).collect()
    }
}
