//! Arbitrage pricing engine.
//!
//! This crate contains the pure math of the monitor: bridge rate
//! tracking, per-coin difference calculation and opportunity detection.

pub mod calculator;
pub mod detector;
pub mod rates;

pub use calculator::*;
pub use detector::*;
pub use rates::*;
