//! Closed-form European prices used to validate simulation estimates.
//!
//! The simulation engine never calls into this module. Tests and benchmarks
//! use it as the reference a Least-Squares Monte Carlo estimate is compared
//! against (an American put is bounded below by its European counterpart; an
//! American call without dividends equals it).
//!
//! - [`BlackScholes`]: European call/put prices under lognormal dynamics
//! - [`norm_cdf`]: Standard normal CDF

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
