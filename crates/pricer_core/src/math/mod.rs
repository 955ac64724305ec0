//! Numerical kernels.
//!
//! - [`regression`]: Least-squares polynomial regression on a scaled domain

pub mod regression;

pub use regression::{PolynomialFit, RegressionError};
