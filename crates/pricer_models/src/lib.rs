//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, exercise payoffs and stochastic path models.
//!
//! This crate provides:
//! - Contract direction and intrinsic exercise value (`instruments`)
//! - Single-step evolution of Geometric Brownian Motion and the Heston
//!   stochastic-volatility model (`models`)
//! - Closed-form European Black-Scholes prices for validation (`analytical`)
//!
//! ## Design Principles
//!
//! - **Explicit direction**: a contract is a call or a put because the caller
//!   says so, never because of where spot sits relative to strike
//! - **Enum-based models** for static dispatch over the path models
//! - **Validated construction**: invalid parameters never reach a simulation

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
