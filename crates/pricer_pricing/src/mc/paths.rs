//! Path generation for Monte Carlo simulation.
//!
//! [`PathSimulator`] turns [`SimulationParameters`] into [`SimulatedPaths`]:
//! an M × T price matrix and, for the Heston variant, the matching variance
//! matrix.
//!
//! # Memory Layout
//!
//! Matrices are stored in row-major order: `data[path_idx * n_steps + step_idx]`
//! where `step_idx = 0` holds the initial spot (and initial variance).
//!
//! # Parallelism
//!
//! Shock matrices are drawn up front, one stream at a time. Rows are then
//! evolved in parallel with rayon; each row is a strictly sequential walk
//! over the time grid, so the result does not depend on the thread count.

use pricer_core::types::{PricingError, TimeGrid};
use pricer_models::models::{ModelState, StochasticModelEnum};
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::config::SimulationParameters;
use crate::rng::streams::{INDEPENDENT_STREAM, PRIMARY_STREAM};
use crate::rng::NormalStreams;

/// Row-major M × T matrix of simulated values.
///
/// Row = one path; column = one grid point.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl PathMatrix {
    /// Wraps row-major `data` as an `n_paths × n_steps` matrix.
    ///
    /// # Panics
    /// Panics if `data.len() != n_paths * n_steps`.
    pub fn from_vec(data: Vec<f64>, n_paths: usize, n_steps: usize) -> Self {
        assert_eq!(
            data.len(),
            n_paths * n_steps,
            "matrix data does not match {} x {}",
            n_paths,
            n_steps
        );
        Self {
            data,
            n_paths,
            n_steps,
        }
    }

    /// Returns the number of rows (paths).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of columns (grid points).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Value on `path` at grid point `step`.
    #[inline]
    pub fn get(&self, path: usize, step: usize) -> f64 {
        self.data[path * self.n_steps + step]
    }

    /// One path.
    #[inline]
    pub fn row(&self, path: usize) -> &[f64] {
        let start = path * self.n_steps;
        &self.data[start..start + self.n_steps]
    }

    /// Every path's value at grid point `step`.
    pub fn column(&self, step: usize) -> Vec<f64> {
        self.data
            .iter()
            .skip(step)
            .step_by(self.n_steps.max(1))
            .take(self.n_paths)
            .copied()
            .collect()
    }

    /// Underlying row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.n_steps.max(1)).take(self.n_paths)
    }
}

/// Output of one simulation run. Owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedPaths {
    prices: PathMatrix,
    variances: Option<PathMatrix>,
}

impl SimulatedPaths {
    /// Bundles a price matrix with an optional variance matrix of the same
    /// shape.
    ///
    /// # Errors
    /// `InvalidParameter` if the shapes differ, the matrix has no paths or
    /// it has fewer than two grid points.
    pub fn new(prices: PathMatrix, variances: Option<PathMatrix>) -> Result<Self, PricingError> {
        if prices.n_paths() == 0 {
            return Err(PricingError::invalid_parameter(
                "n_paths",
                "must be at least 1",
            ));
        }
        if prices.n_steps() < 2 {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                format!("must be at least 2, got {}", prices.n_steps()),
            ));
        }
        if let Some(v) = &variances {
            if (v.n_paths(), v.n_steps()) != (prices.n_paths(), prices.n_steps()) {
                return Err(PricingError::invalid_parameter(
                    "variances",
                    format!(
                        "shape {} x {} does not match prices {} x {}",
                        v.n_paths(),
                        v.n_steps(),
                        prices.n_paths(),
                        prices.n_steps()
                    ),
                ));
            }
        }
        Ok(Self { prices, variances })
    }

    /// Simulated prices.
    #[inline]
    pub fn prices(&self) -> &PathMatrix {
        &self.prices
    }

    /// Simulated variances (Heston only).
    #[inline]
    pub fn variances(&self) -> Option<&PathMatrix> {
        self.variances.as_ref()
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.prices.n_paths()
    }

    /// Number of grid points per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.prices.n_steps()
    }

    /// Splits into the price and variance matrices.
    pub fn into_parts(self) -> (PathMatrix, Option<PathMatrix>) {
        (self.prices, self.variances)
    }
}

/// Simulates price (and variance) paths for one model on one time grid.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PathSimulator, SimulationParameters};
///
/// let params = SimulationParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.03)
///     .volatility(0.2)
///     .n_paths(100)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let paths = PathSimulator::new(&params).simulate().unwrap();
/// assert_eq!(paths.n_paths(), 100);
/// assert_eq!(paths.n_steps(), 50);
/// assert!(paths.prices().column(0).iter().all(|&s| s == 100.0));
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    model: StochasticModelEnum,
    grid: TimeGrid,
    n_paths: usize,
    streams: NormalStreams,
}

impl PathSimulator {
    /// Creates a simulator from validated run parameters.
    pub fn new(params: &SimulationParameters) -> Self {
        Self {
            model: params.model(),
            grid: params.time_grid(),
            n_paths: params.n_paths(),
            streams: NormalStreams::new(params.seed()),
        }
    }

    /// Creates a simulator from its parts.
    ///
    /// # Errors
    /// `InvalidParameter` if `n_paths` is zero.
    pub fn from_parts(
        model: StochasticModelEnum,
        grid: TimeGrid,
        n_paths: usize,
        seed: u64,
    ) -> Result<Self, PricingError> {
        if n_paths == 0 {
            return Err(PricingError::invalid_parameter(
                "n_paths",
                "must be at least 1",
            ));
        }
        Ok(Self {
            model,
            grid,
            n_paths,
            streams: NormalStreams::new(seed),
        })
    }

    /// Returns the path model.
    #[inline]
    pub fn model(&self) -> StochasticModelEnum {
        self.model
    }

    /// Returns the time grid.
    #[inline]
    pub fn time_grid(&self) -> TimeGrid {
        self.grid
    }

    /// Runs the simulation.
    ///
    /// # Errors
    /// `NumericalInstability` if a price becomes non-positive or non-finite,
    /// or a variance non-finite. When several paths fail, any one of them
    /// may be the one reported.
    #[instrument(skip(self), fields(model = self.model.model_name(), n_paths = self.n_paths, n_steps = self.grid.n_points()))]
    pub fn simulate(&self) -> Result<SimulatedPaths, PricingError> {
        let m = self.n_paths;
        let t = self.grid.n_points();

        let z1 = self.streams.normal_matrix(PRIMARY_STREAM, m, t);
        let z_indep = self
            .model
            .is_two_factor()
            .then(|| self.streams.normal_matrix(INDEPENDENT_STREAM, m, t));

        let mut prices = vec![0.0; m * t];
        let variances = match &z_indep {
            None => {
                prices
                    .par_chunks_mut(t)
                    .zip(z1.as_slice().par_chunks(t))
                    .enumerate()
                    .try_for_each(|(path, (price_row, z1_row))| {
                        self.evolve_row(path, z1_row, None, price_row, None)
                    })?;
                None
            }
            Some(z2) => {
                let mut variances = vec![0.0; m * t];
                prices
                    .par_chunks_mut(t)
                    .zip(variances.par_chunks_mut(t))
                    .zip(z1.as_slice().par_chunks(t))
                    .zip(z2.as_slice().par_chunks(t))
                    .enumerate()
                    .try_for_each(|(path, (((price_row, var_row), z1_row), z2_row))| {
                        self.evolve_row(path, z1_row, Some(z2_row), price_row, Some(var_row))
                    })?;
                Some(PathMatrix::from_vec(variances, m, t))
            }
        };

        debug!("simulation complete");
        SimulatedPaths::new(PathMatrix::from_vec(prices, m, t), variances)
    }

    /// Evolves one path across the whole grid.
    fn evolve_row(
        &self,
        path: usize,
        z1: &[f64],
        z_indep: Option<&[f64]>,
        prices: &mut [f64],
        mut variances: Option<&mut [f64]>,
    ) -> Result<(), PricingError> {
        let dt = self.grid.dt();
        let dim = self.model.brownian_dim();
        let mut dw = [0.0; 2];

        let mut state = self.model.initial_state();
        record(&state, 0, prices, variances.as_deref_mut());

        for step in 1..prices.len() {
            let column = self.model.shock_column(step);
            dw[0] = z1[column];
            if let Some(z) = z_indep {
                dw[1] = z[column];
            }

            state = self.model.evolve_step(state, dt, &dw[..dim]);
            check_state(&state, path, step)?;
            record(&state, step, prices, variances.as_deref_mut());
        }
        Ok(())
    }
}

#[inline]
fn record(state: &ModelState, step: usize, prices: &mut [f64], variances: Option<&mut [f64]>) {
    prices[step] = state.price();
    if let (Some(row), Some(v)) = (variances, state.variance()) {
        row[step] = v;
    }
}

#[inline]
fn check_state(state: &ModelState, path: usize, step: usize) -> Result<(), PricingError> {
    let price = state.price();
    if !(price > 0.0 && price.is_finite()) {
        return Err(PricingError::NumericalInstability {
            quantity: "price",
            path,
            step,
            value: price,
        });
    }
    if let Some(variance) = state.variance() {
        if !variance.is_finite() {
            return Err(PricingError::NumericalInstability {
                quantity: "variance",
                path,
                step,
                value: variance,
            });
        }
    }
    Ok(())
}
