//! # pricer_core: Numerical Foundation for Least-Squares Monte Carlo Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the 3-layer architecture, providing:
//! - Error types shared by every layer: `PricingError` (`types::error`)
//! - The simulation time grid: `TimeGrid` (`types::time`)
//! - Least-squares polynomial regression: `PolynomialFit` (`math::regression`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::regression::PolynomialFit;
//! use pricer_core::types::TimeGrid;
//!
//! // 50 daily grid points under a 250-day year
//! let grid = TimeGrid::from_trading_days(50, 250).unwrap();
//! assert!((grid.maturity() - 0.2).abs() < 1e-12);
//!
//! // Exact quadratic recovered by a cubic fit
//! let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
//! let fit = PolynomialFit::fit(&xs, &ys, 3).unwrap();
//! assert!((fit.evaluate(6.0) - 36.0).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `TimeGrid`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
