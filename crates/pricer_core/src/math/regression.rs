//! Least-squares polynomial regression.
//!
//! [`PolynomialFit`] fits `y ≈ Σ cₖ uᵏ` where `u` is the abscissa mapped
//! affinely from `[min(x), max(x)]` onto `[-1, 1]`. Working on the scaled
//! domain keeps the normal equations well conditioned for price-level inputs
//! (a cubic in raw prices around 100 has moments up to 10¹²).
//!
//! ## Algorithm
//!
//! 1. Map every `x` to `u = (x - centre) * half_width⁻¹`
//! 2. Accumulate the power moments `Σ uᵏ` and `Σ uᵏ y`
//! 3. Solve the normal equations `(XᵀX) c = Xᵀy` by Cholesky decomposition
//!
//! When the sample cannot support the requested degree (fewer points than
//! coefficients, or too few distinct abscissae) the degree is lowered until
//! the system is positive definite. Degree 0 is the sample mean and always
//! succeeds for a non-empty sample.

use thiserror::Error;

/// Relative pivot tolerance below which the Cholesky factorisation is
/// treated as singular.
const PIVOT_TOLERANCE: f64 = 1e-10;

/// Regression errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegressionError {
    /// No observations were supplied.
    #[error("Regression requires at least one observation")]
    EmptySample,

    /// Abscissae and ordinates differ in length.
    #[error("Length mismatch: {x_len} abscissae, {y_len} ordinates")]
    LengthMismatch {
        /// Number of abscissae
        x_len: usize,
        /// Number of ordinates
        y_len: usize,
    },

    /// An observation is NaN or infinite.
    #[error("Non-finite observation at index {index}")]
    NonFinite {
        /// Index of the offending observation
        index: usize,
    },
}

/// A fitted least-squares polynomial.
///
/// The fit is a plain value: it owns its coefficients and the affine map of
/// the domain it was fitted on, and carries no other state.
///
/// # Examples
/// ```
/// use pricer_core::math::regression::PolynomialFit;
///
/// let xs = [90.0, 95.0, 100.0, 105.0, 110.0];
/// let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x - 50.0).collect();
///
/// let fit = PolynomialFit::fit(&xs, &ys, 3).unwrap();
/// assert_eq!(fit.degree(), 3);
/// assert!((fit.evaluate(120.0) - 190.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialFit {
    /// Coefficients in the scaled variable, lowest order first.
    coefficients: Vec<f64>,
    /// Midpoint of the fitted domain.
    centre: f64,
    /// Reciprocal half-width of the fitted domain (0 for a degenerate domain).
    inv_half_width: f64,
}

impl PolynomialFit {
    /// Fits a polynomial of degree at most `max_degree` by least squares.
    ///
    /// # Arguments
    /// * `xs` - Abscissae
    /// * `ys` - Ordinates (same length as `xs`)
    /// * `max_degree` - Requested degree; lowered if the sample cannot support it
    ///
    /// # Errors
    /// - `RegressionError::EmptySample` if `xs` is empty
    /// - `RegressionError::LengthMismatch` if the slices differ in length
    /// - `RegressionError::NonFinite` if any observation is NaN or infinite
    pub fn fit(xs: &[f64], ys: &[f64], max_degree: usize) -> Result<Self, RegressionError> {
        if xs.len() != ys.len() {
            return Err(RegressionError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(RegressionError::EmptySample);
        }
        if let Some(index) = xs
            .iter()
            .zip(ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(RegressionError::NonFinite { index });
        }

        let (lo, hi) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let centre = 0.5 * (lo + hi);
        let (inv_half_width, mut degree) = if hi > lo {
            (2.0 / (hi - lo), max_degree.min(xs.len() - 1))
        } else {
            (0.0, 0)
        };

        // Power moments for the largest candidate degree
        let n_moments = 2 * degree + 1;
        let mut moments = vec![0.0; n_moments];
        let mut projections = vec![0.0; degree + 1];
        for (&x, &y) in xs.iter().zip(ys) {
            let u = (x - centre) * inv_half_width;
            let mut power = 1.0;
            for k in 0..n_moments {
                moments[k] += power;
                if k <= degree {
                    projections[k] += power * y;
                }
                power *= u;
            }
        }

        loop {
            let size = degree + 1;
            let gram: Vec<Vec<f64>> = (0..size)
                .map(|i| (0..size).map(|j| moments[i + j]).collect())
                .collect();

            if let Some(coefficients) = solve_cholesky(&gram, &projections[..size]) {
                return Ok(Self {
                    coefficients,
                    centre,
                    inv_half_width,
                });
            }

            // moments[0] = n > 0, so degree 0 never reaches this point
            degree -= 1;
        }
    }

    /// Returns the degree actually fitted.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Returns the coefficients in the scaled variable, lowest order first.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` (Horner's method).
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        let u = (x - self.centre) * self.inv_half_width;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * u + c)
    }

    /// Evaluates the polynomial at every point of `xs`.
    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Solve Ax = b for symmetric positive definite A using Cholesky decomposition.
///
/// Returns `None` when a pivot falls below [`PIVOT_TOLERANCE`] relative to the
/// corresponding diagonal entry.
fn solve_cholesky(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Cholesky decomposition: A = L L^T
    let mut l = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum <= PIVOT_TOLERANCE * a[i][i].abs() {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Solve L y = b (forward substitution)
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Solve L^T x = y (backward substitution)
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_recovers_exact_cubic() {
        let xs: Vec<f64> = (0..20).map(|i| 80.0 + i as f64 * 2.0).collect();
        let cubic = |x: f64| 0.001 * x * x * x - 0.2 * x * x + 3.0 * x - 7.0;
        let ys: Vec<f64> = xs.iter().map(|&x| cubic(x)).collect();

        let fit = PolynomialFit::fit(&xs, &ys, 3).unwrap();

        assert_eq!(fit.degree(), 3);
        for &x in &[81.0, 95.5, 117.0] {
            assert_relative_eq!(fit.evaluate(x), cubic(x), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_least_squares_line_through_noise() {
        // Symmetric residuals around y = x cancel exactly
        let xs = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        let ys = [0.5, 1.5, 1.5, 2.5, 2.5, 3.5];

        let fit = PolynomialFit::fit(&xs, &ys, 1).unwrap();

        assert_relative_eq!(fit.evaluate(2.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.evaluate(5.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_observation_is_constant() {
        let fit = PolynomialFit::fit(&[97.0], &[4.2], 3).unwrap();
        assert_eq!(fit.degree(), 0);
        assert_relative_eq!(fit.evaluate(50.0), 4.2);
        assert_relative_eq!(fit.evaluate(150.0), 4.2);
    }

    #[test]
    fn test_identical_abscissae_give_mean() {
        let fit = PolynomialFit::fit(&[90.0, 90.0, 90.0], &[1.0, 2.0, 6.0], 3).unwrap();
        assert_eq!(fit.degree(), 0);
        assert_relative_eq!(fit.evaluate(90.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degree_lowered_for_few_points() {
        let fit = PolynomialFit::fit(&[1.0, 2.0, 3.0], &[1.0, 4.0, 9.0], 3).unwrap();
        assert_eq!(fit.degree(), 2);
        assert_relative_eq!(fit.evaluate(4.0), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degree_lowered_for_few_distinct_points() {
        // Many observations but only two distinct abscissae
        let xs = [10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
        let ys = [1.0, 2.0, 3.0, 5.0, 6.0, 7.0];

        let fit = PolynomialFit::fit(&xs, &ys, 3).unwrap();

        assert!(fit.degree() <= 1);
        assert_relative_eq!(fit.evaluate(10.0), 2.0, epsilon = 1e-8);
        assert_relative_eq!(fit.evaluate(20.0), 6.0, epsilon = 1e-8);
    }

    #[test]
    fn test_evaluate_all_matches_evaluate() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 3.0, 5.0, 4.0, 6.0];
        let fit = PolynomialFit::fit(&xs, &ys, 3).unwrap();

        let probes = [0.0, 2.5, 7.0];
        let values = fit.evaluate_all(&probes);
        for (value, &x) in values.iter().zip(&probes) {
            assert_eq!(*value, fit.evaluate(x));
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            PolynomialFit::fit(&[], &[], 3).unwrap_err(),
            RegressionError::EmptySample
        );
        assert_eq!(
            PolynomialFit::fit(&[1.0, 2.0], &[1.0], 3).unwrap_err(),
            RegressionError::LengthMismatch { x_len: 2, y_len: 1 }
        );
        assert_eq!(
            PolynomialFit::fit(&[1.0, f64::NAN], &[1.0, 2.0], 3).unwrap_err(),
            RegressionError::NonFinite { index: 1 }
        );
    }

    #[test]
    fn test_cholesky_simple() {
        let a = vec![vec![4.0, 2.0], vec![2.0, 3.0]];
        let b = vec![2.0, 1.0];
        let x = solve_cholesky(&a, &b).unwrap();
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(x[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cholesky_singular() {
        let a = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        assert!(solve_cholesky(&a, &[1.0, 1.0]).is_none());
    }

    proptest! {
        #[test]
        fn prop_residuals_orthogonal_to_constant(
            ys in prop::collection::vec(-50.0..50.0_f64, 8..40)
        ) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| 60.0 + i as f64).collect();
            let fit = PolynomialFit::fit(&xs, &ys, 3).unwrap();

            // Least squares with an intercept leaves zero-mean residuals
            let residual_sum: f64 = xs
                .iter()
                .zip(&ys)
                .map(|(&x, &y)| y - fit.evaluate(x))
                .sum();
            prop_assert!(residual_sum.abs() < 1e-6);
        }
    }
}
