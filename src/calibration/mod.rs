//! Test-kit calibration module
//!
//! This module holds the chemistry parameters, the reference color charts
//! they are read against, and the confidence curve applied to a match.

pub mod parameter;
pub mod chart;
pub mod confidence;

pub use parameter::Parameter;
pub use chart::{ChartEntry, MatchResult, ReferenceChart};
pub use confidence::confidence;
