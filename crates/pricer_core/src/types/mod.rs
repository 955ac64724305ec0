//! Core time and error types.
//!
//! This module provides:
//! - `time`: The evenly spaced simulation grid (`TimeGrid`)
//! - `error`: Structured error type for pricing runs (`PricingError`)
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`TimeGrid`] from `time`
//! - [`PricingError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use time::TimeGrid;
