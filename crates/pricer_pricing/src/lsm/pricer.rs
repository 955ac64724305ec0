//! Least-Squares Monte Carlo pricer for American options.
//!
//! # Algorithm
//!
//! With T grid points and one-period discount factor `D = exp(-r·dt)`:
//!
//! 1. Cashflow at maturity is the intrinsic value at column T-1
//! 2. For t = T-2 down to 1 ([`backward_step`]):
//!    - cashflow ← D · cashflow
//!    - fit the continuation value on in-the-money paths at column t,
//!      evaluate it on all paths
//!    - where in-the-money and exercise > continuation, cashflow ← exercise
//!      value (undiscounted, as of t)
//! 3. Price = mean(D · cashflow), rounded to 4 decimal places
//!
//! Column 0 is never considered for exercise. A step with no path in the
//! money passes the discounted cashflow through untouched.
//!
//! Steps run strictly in sequence; work within a step is split across
//! paths with rayon.

use pricer_core::types::PricingError;
use pricer_models::instruments::{ExerciseValuator, OptionDirection};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use super::continuation::ContinuationEstimator;
use crate::mc::{PathSimulator, SimulatedPaths, SimulationParameters};

/// Decimal places of the reported price.
pub const PRICE_DECIMALS: i32 = 4;

/// Result of one backward step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Cashflow per path as of the step's grid point.
    pub cashflow: Vec<f64>,
    /// Number of paths in the money at this step.
    pub in_the_money: usize,
    /// Whether each path exercised at this step.
    pub exercised: Vec<bool>,
}

impl StepOutcome {
    /// Number of paths that exercised at this step.
    pub fn exercised_count(&self) -> usize {
        self.exercised.iter().filter(|&&e| e).count()
    }
}

/// One backward-induction step.
///
/// Pure: reads the incoming cashflow and the prices at grid point `step`,
/// returns the outgoing cashflow.
///
/// # Arguments
/// * `cashflow` - Cashflow per path as of grid point `step + 1`
/// * `prices` - Price per path at grid point `step`
/// * `valuator` - Contract exercise value
/// * `discount` - One-period discount factor
/// * `step` - Grid index, for error reporting
///
/// # Errors
/// `PricingError::Regression` if the continuation fit rejects its sample.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{ExerciseValuator, OptionDirection};
/// use pricer_pricing::lsm::backward_step;
///
/// let put = ExerciseValuator::new(100.0, OptionDirection::Put).unwrap();
///
/// // Nothing in the money: discounted pass-through
/// let outcome = backward_step(&[1.0, 0.0], &[110.0, 120.0], &put, 0.5, 3).unwrap();
/// assert_eq!(outcome.cashflow, vec![0.5, 0.0]);
/// assert_eq!(outcome.in_the_money, 0);
/// ```
pub fn backward_step(
    cashflow: &[f64],
    prices: &[f64],
    valuator: &ExerciseValuator,
    discount: f64,
    step: usize,
) -> Result<StepOutcome, PricingError> {
    if cashflow.len() != prices.len() {
        return Err(PricingError::invalid_parameter(
            "cashflow",
            format!(
                "length {} does not match {} prices",
                cashflow.len(),
                prices.len()
            ),
        ));
    }

    let discounted: Vec<f64> = cashflow.par_iter().map(|c| c * discount).collect();
    let exercise: Vec<f64> = prices.par_iter().map(|&s| valuator.value(s)).collect();

    let (itm_prices, itm_cashflows): (Vec<f64>, Vec<f64>) = prices
        .iter()
        .zip(&exercise)
        .zip(&discounted)
        .filter(|((_, e), _)| **e > 0.0)
        .map(|((&s, _), &c)| (s, c))
        .unzip();

    if itm_prices.is_empty() {
        return Ok(StepOutcome {
            exercised: vec![false; discounted.len()],
            cashflow: discounted,
            in_the_money: 0,
        });
    }

    let estimator = ContinuationEstimator::fit(&itm_prices, &itm_cashflows)
        .map_err(|source| PricingError::Regression { step, source })?;
    let continuation = estimator.evaluate_all(prices);

    let (cashflow, exercised): (Vec<f64>, Vec<bool>) = discounted
        .par_iter()
        .zip(exercise.par_iter())
        .zip(continuation.par_iter())
        .map(|((&held, &now), &expected)| {
            if now > 0.0 && now > expected {
                (now, true)
            } else {
                (held, false)
            }
        })
        .unzip();

    Ok(StepOutcome {
        cashflow,
        in_the_money: itm_prices.len(),
        exercised,
    })
}

/// Outcome of pricing one American option.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsm::PricingResult;
///
/// let result = PricingResult {
///     price: 4.4737,
///     estimate: 4.47368,
///     std_error: 0.18,
///     n_paths: 1_000,
///     early_exercise_count: 312,
/// };
/// assert!((result.confidence_95() - 0.3528).abs() < 1e-12);
/// assert!((result.early_exercise_fraction() - 0.312).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingResult {
    /// Price rounded to four decimal places.
    pub price: f64,
    /// Unrounded Monte Carlo estimate.
    pub estimate: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Paths exercised before maturity.
    pub early_exercise_count: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Share of paths exercised before maturity.
    #[inline]
    pub fn early_exercise_fraction(&self) -> f64 {
        self.early_exercise_count as f64 / self.n_paths as f64
    }
}

/// American option pricer.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::OptionDirection;
/// use pricer_pricing::lsm::AmericanPricer;
/// use pricer_pricing::mc::SimulationParameters;
///
/// let params = SimulationParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.03)
///     .volatility(0.2)
///     .n_paths(1_000)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let result = AmericanPricer::new(params).price(OptionDirection::Put).unwrap();
/// assert!(result.price > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct AmericanPricer {
    params: SimulationParameters,
}

impl AmericanPricer {
    /// Creates a pricer for validated run parameters.
    #[inline]
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    /// Returns the run parameters.
    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Simulates paths and prices the option.
    ///
    /// # Errors
    /// `NumericalInstability` from the simulation, `Regression` from a
    /// backward step.
    pub fn price(&self, direction: OptionDirection) -> Result<PricingResult, PricingError> {
        self.simulate_and_price(direction).map(|(result, _)| result)
    }

    /// Simulates paths, prices the option and hands the paths back.
    #[instrument(skip(self), fields(
        model = self.params.model().model_name(),
        n_paths = self.params.n_paths(),
        n_steps = self.params.n_steps(),
        seed = self.params.seed()
    ))]
    pub fn simulate_and_price(
        &self,
        direction: OptionDirection,
    ) -> Result<(PricingResult, SimulatedPaths), PricingError> {
        let paths = PathSimulator::new(&self.params).simulate()?;
        let result = self.price_paths(&paths, direction)?;
        Ok((result, paths))
    }

    /// Prices the option on paths the caller already holds.
    ///
    /// # Errors
    /// `InvalidParameter` if the paths do not have the grid length of the
    /// run parameters.
    pub fn price_paths(
        &self,
        paths: &SimulatedPaths,
        direction: OptionDirection,
    ) -> Result<PricingResult, PricingError> {
        let grid = self.params.time_grid();
        let n_steps = paths.n_steps();
        if n_steps != grid.n_points() {
            return Err(PricingError::invalid_parameter(
                "paths",
                format!(
                    "have {} grid points, parameters expect {}",
                    n_steps,
                    grid.n_points()
                ),
            ));
        }

        let valuator = ExerciseValuator::new(self.params.strike(), direction)?;
        let discount = grid.discount_factor(self.params.rate());
        let prices = paths.prices();

        info!(
            %direction,
            strike = self.params.strike(),
            spot = self.params.spot(),
            maturity = grid.maturity(),
            "pricing American option"
        );

        let mut cashflow = valuator.values(&prices.column(n_steps - 1));
        let mut exercised_early = vec![false; paths.n_paths()];

        for step in (1..n_steps - 1).rev() {
            let outcome = backward_step(&cashflow, &prices.column(step), &valuator, discount, step)?;
            debug!(
                step,
                in_the_money = outcome.in_the_money,
                exercised = outcome.exercised_count(),
                "backward step"
            );

            for (flag, &now) in exercised_early.iter_mut().zip(&outcome.exercised) {
                *flag |= now;
            }
            cashflow = outcome.cashflow;
        }

        let (estimate, std_error) = mean_and_std_error(cashflow.iter().map(|c| c * discount));
        let result = PricingResult {
            price: round_to(estimate, PRICE_DECIMALS),
            estimate,
            std_error,
            n_paths: paths.n_paths(),
            early_exercise_count: exercised_early.iter().filter(|&&e| e).count(),
        };

        info!(
            price = result.price,
            std_error = result.std_error,
            early_exercise = result.early_exercise_count,
            "pricing complete"
        );
        Ok(result)
    }
}

/// Sample mean and standard error of the mean.
fn mean_and_std_error(values: impl ExactSizeIterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    if n == 1 {
        return (mean, 0.0);
    }
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, (variance / n as f64).sqrt())
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
