//! Test-kit detection module
//!
//! This module decides which calibrated kit layout a water-test photo
//! should be read with.

pub mod kit;

pub use kit::{select_kit, KitSelection, TestKit};
