//! Least-Squares Monte Carlo (Longstaff-Schwartz) backward induction.
//!
//! - [`continuation`]: Per-step polynomial regression of the hold value
//! - [`pricer`]: Backward step and the [`AmericanPricer`] driver

pub mod continuation;
pub mod pricer;

pub use continuation::{ContinuationEstimator, BASIS_DEGREE};
pub use pricer::{backward_step, AmericanPricer, PricingResult, StepOutcome, PRICE_DECIMALS};
