//! Option-writing yield calculator.
//!
//! [`engine::derive_all`] turns instrument snapshots into analysis rows:
//! margin-offset CE/PE strikes on a grid, heuristic premiums, margin
//! required, annualized return on margin and 52-week percentile. Providers
//! feed it; report and chart adapters consume it.

pub mod engine;
pub mod model;
pub mod validate;

#[cfg(feature = "full")]
pub mod analyze;
#[cfg(feature = "full")]
pub mod chart;
#[cfg(feature = "full")]
pub mod provider;
#[cfg(feature = "full")]
pub mod report;
