//! Color extraction module
//!
//! This module defines the color and region primitives and extracts
//! representative colors from indicator patches of a kit photo.

pub mod conversion;
pub mod analysis;

pub use conversion::{Color, Region};
pub use analysis::{RegionExtractor, RegionSample};
