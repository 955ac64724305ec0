//! Error types for configuration loading.
//!
//! Validation failures carry the underlying [`PricingError`]; I/O and TOML
//! syntax failures keep their source error.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the pricing engine.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::PricingError;
/// use pricer_pricing::mc::ConfigError;
///
/// let err: ConfigError = PricingError::invalid_parameter("n_paths", "must be at least 1").into();
/// assert!(err.to_string().contains("n_paths"));
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML or does not match the expected shape.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but describes an invalid simulation.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] PricingError),
}
