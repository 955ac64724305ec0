//! Simulation configuration.
//!
//! [`SimulationParameters`] is the immutable input of one pricing run. It is
//! built through [`SimulationParametersBuilder`], either in code or from a
//! TOML document, and every construction path runs the same validation.
//!
//! ## TOML layout
//!
//! ```toml
//! spot = 100.0
//! strike = 100.0
//! rate = 0.03
//! volatility = 0.2
//! n_paths = 1000
//! n_steps = 50
//! seed = 42            # default 6644
//! trading_days = 250   # default 250
//! # maturity = 0.5     # default n_steps / trading_days
//!
//! [stochastic_volatility]
//! kappa = 1.5
//! theta = 0.04
//! rho = -0.7
//! # vol_of_vol = 0.3   # default: volatility
//! ```
//!
//! A [`PricingRunConfig`] document wraps the table above as `[simulation]`
//! and adds the contract `direction`.

use std::path::Path;

use pricer_core::types::{PricingError, TimeGrid};
use pricer_models::instruments::OptionDirection;
use pricer_models::models::{GBMParams, HestonParams, StochasticModelEnum};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Trading days per year used when none is given.
pub const DEFAULT_TRADING_DAYS: u32 = 250;

/// Run seed used when none is given.
pub const DEFAULT_SEED: u64 = 6644;

/// Parameters of the Heston variant.
///
/// The initial variance is always the square of the simulation volatility.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StochasticVolatilityParams {
    /// Mean-reversion speed (κ).
    pub kappa: f64,
    /// Long-run variance (θ).
    pub theta: f64,
    /// Correlation between price and variance shocks (ρ).
    pub rho: f64,
    /// Volatility of variance (ξ); the simulation volatility when absent.
    #[serde(default)]
    pub vol_of_vol: Option<f64>,
}

impl StochasticVolatilityParams {
    /// Creates Heston parameters with ξ defaulting to the simulation
    /// volatility.
    #[inline]
    pub fn new(kappa: f64, theta: f64, rho: f64) -> Self {
        Self {
            kappa,
            theta,
            rho,
            vol_of_vol: None,
        }
    }

    /// Sets an explicit volatility of variance.
    #[inline]
    pub fn with_vol_of_vol(mut self, vol_of_vol: f64) -> Self {
        self.vol_of_vol = Some(vol_of_vol);
        self
    }
}

/// Immutable configuration of one pricing run.
///
/// Use [`SimulationParameters::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
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
///     .expect("valid parameters");
///
/// assert_eq!(params.trading_days(), 250);
/// assert!((params.maturity() - 0.2).abs() < 1e-12);
/// assert_eq!(params.model().model_name(), "GBM");
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "SimulationParametersBuilder")]
pub struct SimulationParameters {
    strike: f64,
    volatility: f64,
    n_paths: usize,
    trading_days: u32,
    seed: u64,
    stochastic_volatility: Option<StochasticVolatilityParams>,
    grid: TimeGrid,
    model: StochasticModelEnum,
}

impl SimulationParameters {
    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// - `ConfigError::Parse` for malformed TOML, unknown keys or wrong types
    /// - `ConfigError::Invalid` if a value fails validation
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let builder: SimulationParametersBuilder = toml::from_str(text)?;
        Ok(builder.build()?)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    /// As [`from_toml_str`](Self::from_toml_str), plus `ConfigError::Io` if
    /// the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns the initial spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.model.spot()
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the continuously compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.model.rate()
    }

    /// Returns the volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the number of simulated paths (M).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of grid points per path (T).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.grid.n_points()
    }

    /// Returns the trading-day convention.
    #[inline]
    pub fn trading_days(&self) -> u32 {
        self.trading_days
    }

    /// Returns the run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.grid.maturity()
    }

    /// Returns the Heston parameters, if this run uses stochastic volatility.
    #[inline]
    pub fn stochastic_volatility(&self) -> Option<&StochasticVolatilityParams> {
        self.stochastic_volatility.as_ref()
    }

    /// Returns the simulation time grid.
    #[inline]
    pub fn time_grid(&self) -> TimeGrid {
        self.grid
    }

    /// Returns the validated path model.
    #[inline]
    pub fn model(&self) -> StochasticModelEnum {
        self.model
    }
}

impl TryFrom<SimulationParametersBuilder> for SimulationParameters {
    type Error = PricingError;

    fn try_from(builder: SimulationParametersBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// Builder for [`SimulationParameters`].
///
/// Also the deserialisation target of a TOML document, so file-based and
/// code-based construction validate identically.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{SimulationParameters, StochasticVolatilityParams};
///
/// let params = SimulationParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.03)
///     .volatility(0.2)
///     .n_paths(1_000)
///     .n_steps(50)
///     .stochastic_volatility(StochasticVolatilityParams::new(1.5, 0.04, -0.7))
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.model().model_name(), "Heston");
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationParametersBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    rate: Option<f64>,
    volatility: Option<f64>,
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    trading_days: Option<u32>,
    seed: Option<u64>,
    maturity: Option<f64>,
    stochastic_volatility: Option<StochasticVolatilityParams>,
}

impl SimulationParametersBuilder {
    /// Sets the initial spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the number of paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of grid points per path, in [2, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the trading days per year (default 250).
    #[inline]
    pub fn trading_days(mut self, trading_days: u32) -> Self {
        self.trading_days = Some(trading_days);
        self
    }

    /// Sets the run seed (default 6644).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the maturity in years (default `n_steps / trading_days`).
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Switches the run to the Heston variant.
    #[inline]
    pub fn stochastic_volatility(mut self, params: StochasticVolatilityParams) -> Self {
        self.stochastic_volatility = Some(params);
        self
    }

    /// Validates and builds the parameters.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` naming the first missing or offending field:
    /// - `spot`, `strike`, `volatility` not positive and finite
    /// - `rate` not finite
    /// - `n_paths` outside [1, 10_000_000]
    /// - `n_steps` outside [2, 10_000]
    /// - `trading_days` zero, or `maturity` not positive
    /// - Heston: `kappa`/`theta` negative, `vol_of_vol` not positive,
    ///   `correlation` outside [-1, 1]
    pub fn build(self) -> Result<SimulationParameters, PricingError> {
        let spot = require(self.spot, "spot")?;
        let strike = require(self.strike, "strike")?;
        let rate = require(self.rate, "rate")?;
        let volatility = require(self.volatility, "volatility")?;
        let n_paths = require(self.n_paths, "n_paths")?;
        let n_steps = require(self.n_steps, "n_steps")?;
        let trading_days = self.trading_days.unwrap_or(DEFAULT_TRADING_DAYS);
        let seed = self.seed.unwrap_or(DEFAULT_SEED);

        if !(strike > 0.0 && strike.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "strike",
                format!("must be positive and finite, got {}", strike),
            ));
        }
        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                format!("must be positive and finite, got {}", volatility),
            ));
        }
        if n_paths == 0 || n_paths > MAX_PATHS {
            return Err(PricingError::invalid_parameter(
                "n_paths",
                format!("must be in range [1, {}], got {}", MAX_PATHS, n_paths),
            ));
        }
        if n_steps > MAX_STEPS {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                format!("must be at most {}, got {}", MAX_STEPS, n_steps),
            ));
        }

        let grid = match self.maturity {
            Some(maturity) => {
                if trading_days == 0 {
                    return Err(PricingError::invalid_parameter(
                        "trading_days",
                        "must be at least 1",
                    ));
                }
                TimeGrid::new(n_steps, maturity)?
            }
            None => TimeGrid::from_trading_days(n_steps, trading_days)?,
        };

        let model = match self.stochastic_volatility {
            None => StochasticModelEnum::gbm(GBMParams::new(spot, rate, volatility)?),
            Some(sv) => StochasticModelEnum::heston(HestonParams::new(
                spot,
                rate,
                volatility * volatility,
                sv.kappa,
                sv.theta,
                sv.vol_of_vol.unwrap_or(volatility),
                sv.rho,
            )?),
        };

        Ok(SimulationParameters {
            strike,
            volatility,
            n_paths,
            trading_days,
            seed,
            stochastic_volatility: self.stochastic_volatility,
            grid,
            model,
        })
    }
}

fn require<T>(value: Option<T>, name: &'static str) -> Result<T, PricingError> {
    value.ok_or_else(|| PricingError::invalid_parameter(name, "must be specified"))
}

/// A complete pricing request: the contract direction plus the simulation.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::OptionDirection;
/// use pricer_pricing::mc::PricingRunConfig;
///
/// let config = PricingRunConfig::from_toml_str(r#"
///     direction = "put"
///
///     [simulation]
///     spot = 100.0
///     strike = 100.0
///     rate = 0.03
///     volatility = 0.2
///     n_paths = 1000
///     n_steps = 50
///     seed = 42
/// "#).unwrap();
///
/// assert_eq!(config.direction, OptionDirection::Put);
/// assert_eq!(config.simulation.seed(), 42);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PricingRunConfig {
    /// Contract direction.
    pub direction: OptionDirection,
    /// Simulation parameters.
    pub simulation: SimulationParameters,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRunConfig {
    direction: String,
    simulation: SimulationParametersBuilder,
}

impl PricingRunConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// - `ConfigError::Parse` for malformed TOML
    /// - `ConfigError::Invalid` for an unrecognised direction or a simulation
    ///   value that fails validation
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawRunConfig = toml::from_str(text)?;
        Ok(Self {
            direction: raw.direction.parse::<OptionDirection>()?,
            simulation: raw.simulation.build()?,
        })
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> SimulationParametersBuilder {
        SimulationParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.03)
            .volatility(0.2)
            .n_paths(1_000)
            .n_steps(50)
    }

    fn invalid_name(result: Result<SimulationParameters, PricingError>) -> &'static str {
        match result {
            Err(PricingError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let params = base().build().unwrap();
        assert_eq!(params.seed(), DEFAULT_SEED);
        assert_eq!(params.trading_days(), DEFAULT_TRADING_DAYS);
        assert_eq!(params.n_paths(), 1_000);
        assert_eq!(params.n_steps(), 50);
        assert_relative_eq!(params.maturity(), 0.2, epsilon = 1e-15);
        assert_relative_eq!(params.time_grid().dt(), 0.2 / 49.0, epsilon = 1e-15);
        assert!(params.stochastic_volatility().is_none());
        assert_eq!(params.model().model_name(), "GBM");
    }

    #[test]
    fn test_maturity_override() {
        let params = base().maturity(1.0).build().unwrap();
        assert_eq!(params.maturity(), 1.0);
        assert_relative_eq!(params.time_grid().dt(), 1.0 / 49.0, epsilon = 1e-15);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(invalid_name(SimulationParameters::builder().build()), "spot");
        let no_paths = SimulationParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.03)
            .volatility(0.2)
            .n_steps(50)
            .build();
        assert_eq!(invalid_name(no_paths), "n_paths");
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert_eq!(invalid_name(base().spot(0.0).build()), "spot");
        assert_eq!(invalid_name(base().strike(-1.0).build()), "strike");
        assert_eq!(invalid_name(base().volatility(0.0).build()), "volatility");
        assert_eq!(invalid_name(base().volatility(-0.2).build()), "volatility");
        assert_eq!(invalid_name(base().rate(f64::NAN).build()), "rate");
        assert_eq!(invalid_name(base().n_paths(0).build()), "n_paths");
        assert_eq!(invalid_name(base().n_paths(MAX_PATHS + 1).build()), "n_paths");
        assert_eq!(invalid_name(base().n_steps(1).build()), "n_steps");
        assert_eq!(invalid_name(base().n_steps(MAX_STEPS + 1).build()), "n_steps");
        assert_eq!(invalid_name(base().trading_days(0).build()), "trading_days");
        assert_eq!(invalid_name(base().maturity(0.0).build()), "maturity");
    }

    #[test]
    fn test_minimal_grid_accepted() {
        let params = base().n_paths(1).n_steps(2).build().unwrap();
        assert_eq!(params.n_paths(), 1);
        assert_eq!(params.time_grid().n_intervals(), 1);
    }

    #[test]
    fn test_heston_defaults_from_volatility() {
        let params = base()
            .stochastic_volatility(StochasticVolatilityParams::new(1.5, 0.04, -0.7))
            .build()
            .unwrap();
        match params.model() {
            StochasticModelEnum::Heston(h) => {
                assert_relative_eq!(h.v0, 0.04, epsilon = 1e-15);
                assert_eq!(h.xi, 0.2);
                assert_eq!(h.rho, -0.7);
            }
            other => panic!("expected Heston, got {:?}", other),
        }
    }

    #[test]
    fn test_heston_explicit_vol_of_vol() {
        let params = base()
            .stochastic_volatility(StochasticVolatilityParams::new(1.5, 0.04, 0.0).with_vol_of_vol(0.5))
            .build()
            .unwrap();
        let StochasticModelEnum::Heston(h) = params.model() else {
            panic!("expected Heston");
        };
        assert_eq!(h.xi, 0.5);
    }

    #[test]
    fn test_heston_rejects_correlation() {
        let result = base()
            .stochastic_volatility(StochasticVolatilityParams::new(1.5, 0.04, 1.2))
            .build();
        assert_eq!(invalid_name(result), "correlation");

        let result = base()
            .stochastic_volatility(StochasticVolatilityParams::new(-1.0, 0.04, 0.0))
            .build();
        assert_eq!(invalid_name(result), "kappa");
    }

    #[test]
    fn test_from_toml_str() {
        let params = SimulationParameters::from_toml_str(
            r#"
            spot = 80.0
            strike = 100.0
            rate = 0.03
            volatility = 0.25
            n_paths = 500
            n_steps = 50
            seed = 7

            [stochastic_volatility]
            kappa = 2.0
            theta = 0.0625
            rho = -0.5
            "#,
        )
        .unwrap();

        assert_eq!(params.spot(), 80.0);
        assert_eq!(params.seed(), 7);
        assert_eq!(params.trading_days(), 250);
        assert_eq!(
            params.stochastic_volatility(),
            Some(&StochasticVolatilityParams::new(2.0, 0.0625, -0.5))
        );
    }

    #[test]
    fn test_from_toml_str_validation_error() {
        let err = SimulationParameters::from_toml_str(
            r#"
            spot = 100.0
            strike = 100.0
            rate = 0.03
            volatility = 0.2
            n_paths = 0
            n_steps = 50
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(PricingError::InvalidParameter { name: "n_paths", .. })
        ));
    }

    #[test]
    fn test_from_toml_str_unknown_key() {
        let err = SimulationParameters::from_toml_str("spot = 100.0\nantithetic = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let result: Result<SimulationParameters, _> = toml::from_str(
            r#"
            spot = 100.0
            strike = 100.0
            rate = 0.03
            volatility = -0.2
            n_paths = 10
            n_steps = 5
            "#,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("volatility"));

        let ok: SimulationParameters = toml::from_str(
            "spot = 100.0\nstrike = 100.0\nrate = 0.03\nvolatility = 0.2\nn_paths = 10\nn_steps = 5\n",
        )
        .unwrap();
        assert_eq!(ok.n_steps(), 5);
    }

    #[test]
    fn test_run_config_direction() {
        let text = |direction: &str| {
            format!(
                "direction = \"{}\"\n[simulation]\nspot = 100.0\nstrike = 100.0\nrate = 0.03\nvolatility = 0.2\nn_paths = 10\nn_steps = 5\n",
                direction
            )
        };

        let call = PricingRunConfig::from_toml_str(&text("Call")).unwrap();
        assert_eq!(call.direction, OptionDirection::Call);

        let err = PricingRunConfig::from_toml_str(&text("straddle")).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Invalid(PricingError::UnrecognizedDirection(d)) if d == "straddle"
        ));
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimulationParameters::load("/nonexistent/neutryx-lsm.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("neutryx-lsm-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "direction = \"put\"\n[simulation]\nspot = 100.0\nstrike = 95.0\nrate = 0.03\nvolatility = 0.2\nn_paths = 10\nn_steps = 5\n",
        )
        .unwrap();

        let config = PricingRunConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.direction, OptionDirection::Put);
        assert_eq!(config.simulation.strike(), 95.0);
    }
}
