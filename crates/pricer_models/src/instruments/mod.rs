//! Option contract definitions.
//!
//! This module provides:
//! - [`OptionDirection`]: Call or put, always stated explicitly
//! - [`ExerciseValuator`]: Intrinsic value of exercising now
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{exercise_value, ExerciseValuator, OptionDirection};
//!
//! let direction: OptionDirection = "put".parse().unwrap();
//! assert_eq!(exercise_value(90.0, 100.0, direction), 10.0);
//!
//! let valuator = ExerciseValuator::new(100.0, OptionDirection::Call).unwrap();
//! assert_eq!(valuator.value(90.0), 0.0);
//! ```

pub mod direction;
pub mod exercise;

pub use direction::OptionDirection;
pub use exercise::{exercise_value, ExerciseValuator};
