//! Simulation time grid.
//!
//! A [`TimeGrid`] is an evenly spaced sequence of points spanning
//! `[0, maturity]`. Point 0 is the valuation date; the last point is expiry.
//!
//! ## Trading-day convention
//!
//! Under the trading-day convention each grid point is one trading day, so a
//! grid of `n` points under a `d`-day year has maturity `n / d` years. The
//! step size is then
//!
//! ```text
//! dt = maturity / (n - 1)
//! ```
//!
//! and is constant across the grid.

use super::error::PricingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evenly spaced simulation grid.
///
/// # Examples
/// ```
/// use pricer_core::types::TimeGrid;
///
/// let grid = TimeGrid::from_trading_days(250, 250).unwrap();
/// assert_eq!(grid.n_points(), 250);
/// assert!((grid.maturity() - 1.0).abs() < 1e-12);
/// assert!((grid.dt() - 1.0 / 249.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeGrid {
    n_points: usize,
    maturity: f64,
    dt: f64,
}

impl TimeGrid {
    /// Creates a grid of `n_points` spanning `maturity` years.
    ///
    /// # Errors
    /// - `InvalidParameter` if `n_points < 2`
    /// - `InvalidParameter` if `maturity` is not positive and finite
    pub fn new(n_points: usize, maturity: f64) -> Result<Self, PricingError> {
        if n_points < 2 {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                format!("must be at least 2, got {}", n_points),
            ));
        }
        if !(maturity > 0.0 && maturity.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "maturity",
                format!("must be positive and finite, got {}", maturity),
            ));
        }

        Ok(Self {
            n_points,
            maturity,
            dt: maturity / (n_points - 1) as f64,
        })
    }

    /// Creates a grid with one point per trading day.
    ///
    /// # Errors
    /// - `InvalidParameter` if `trading_days == 0` or `n_points < 2`
    pub fn from_trading_days(n_points: usize, trading_days: u32) -> Result<Self, PricingError> {
        if trading_days == 0 {
            return Err(PricingError::invalid_parameter(
                "trading_days",
                "must be at least 1",
            ));
        }
        Self::new(n_points, n_points as f64 / f64::from(trading_days))
    }

    /// Returns the number of grid points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Returns the number of intervals (`n_points - 1`).
    #[inline]
    pub fn n_intervals(&self) -> usize {
        self.n_points - 1
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the constant step size in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the time in years of grid point `index`.
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        index as f64 * self.dt
    }

    /// Returns every grid time, from 0 to maturity.
    pub fn times(&self) -> Vec<f64> {
        (0..self.n_points).map(|i| self.time(i)).collect()
    }

    /// One-period discount factor `exp(-r * dt)`.
    #[inline]
    pub fn discount_factor(&self, rate: f64) -> f64 {
        (-rate * self.dt).exp()
    }
}
