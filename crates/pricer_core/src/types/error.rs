//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised while validating, simulating or pricing

use thiserror::Error;

use crate::math::regression::RegressionError;

/// Categorised pricing errors.
///
/// Every failure is reported synchronously at the point of detection, before
/// any partial price is returned. The computation is pure, so none of these
/// errors is transient and nothing is retried.
///
/// # Variants
/// - `InvalidParameter`: Rejected at construction, before any simulation runs
/// - `NumericalInstability`: A simulated quantity left the finite domain
/// - `UnrecognizedDirection`: Contract direction text is neither call nor put
/// - `Regression`: The continuation regression rejected its sample
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("volatility", "must be positive, got -0.2");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility': must be positive, got -0.2"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Invalid configuration value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the violated constraint
        reason: String,
    },

    /// A simulated price or variance became non-finite (or a price non-positive).
    #[error("Numerical instability: {quantity} = {value} on path {path} at step {step}")]
    NumericalInstability {
        /// Simulated quantity ("price" or "variance")
        quantity: &'static str,
        /// Path (row) index
        path: usize,
        /// Time step (column) index
        step: usize,
        /// Offending value
        value: f64,
    },

    /// Contract direction is not one of {call, put}.
    #[error("Unrecognised option direction '{0}': expected 'call' or 'put'")]
    UnrecognizedDirection(String),

    /// The continuation regression at a backward step failed.
    #[error("Regression failed at step {step}: {source}")]
    Regression {
        /// Time step (column) index
        step: usize,
        /// Underlying regression error
        #[source]
        source: RegressionError,
    },
}

impl PricingError {
    /// Creates an [`PricingError::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised during parameter validation.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PricingError::invalid_parameter("n_steps", "must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'n_steps': must be at least 2, got 1"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = PricingError::NumericalInstability {
            quantity: "variance",
            path: 3,
            step: 17,
            value: f64::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("variance"));
        assert!(msg.contains("path 3"));
        assert!(msg.contains("step 17"));
        assert!(!err.is_invalid_parameter());
    }

    #[test]
    fn test_unrecognized_direction_display() {
        let err = PricingError::UnrecognizedDirection("straddle".to_string());
        assert_eq!(
            err.to_string(),
            "Unrecognised option direction 'straddle': expected 'call' or 'put'"
        );
    }

    #[test]
    fn test_regression_error_keeps_source() {
        use std::error::Error as _;

        let err = PricingError::Regression {
            step: 12,
            source: RegressionError::EmptySample,
        };
        assert!(err.to_string().starts_with("Regression failed at step 12"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<PricingError>();
    }
}
