//! # Aquarium Analyzer
//!
//! A Rust crate for reading aquarium water-test kits and tank photos.
//!
//! This library turns photos into published tank state by:
//! - Selecting the test-kit layout a photo should be read with
//! - Extracting a robust color from each indicator patch
//! - Matching patch colors against calibrated reference charts
//! - Scoring every match with a confidence value
//! - Aggregating subsystem scores into an overall tank status
//!
//! ## Example
//!
//! ```rust,no_run
//! use aquarium_analyzer::{analyze_water_test, AnalyzerConfig};
//! use std::path::Path;
//!
//! let config = AnalyzerConfig::default_calibration();
//! let report = analyze_water_test(Path::new("strip.jpg"), Some("api"), &config)?;
//! for (parameter, reading) in &report.readings {
//!     println!("{}: {} ({:.1}%)", parameter, reading.value, reading.confidence);
//! }
//! # Ok::<(), aquarium_analyzer::AnalysisError>(())
//! ```

use std::path::Path;

pub mod error;
pub mod constants;
pub mod config;
pub mod image_loader;
pub mod color;
pub mod calibration;
pub mod detection;
pub mod water;
pub mod status;
pub mod inspection;
pub mod publish;
pub mod service;

pub use error::{AnalysisError, Result};
pub use config::AnalyzerConfig;
pub use calibration::Parameter;
pub use color::{Color, Region};
pub use detection::TestKit;
pub use water::{ParameterReading, WaterTestAnalyzer, WaterTestReport};
pub use status::{OverallStatus, StatusAggregator, Subsystem};
pub use publish::{Publisher, RetainedStore};
pub use service::{AnalysisRequest, AnalysisType, AquariumAnalyzer};

/// Read a water-test photo from disk
///
/// Convenience entry point for one-off analysis outside the request
/// service. Relative paths are taken as given, not against the photo root.
///
/// # Arguments
///
/// * `image_path` - Path to the image file
/// * `test_type` - Kit hint such as "api" or "badge"; `None` infers the kit
/// * `config` - Kit calibration to read with
///
/// # Errors
///
/// Returns `AnalysisError` if the image cannot be found or decoded.
/// Per-parameter problems are reported in [`WaterTestReport::failures`].
pub fn analyze_water_test(
    image_path: &Path,
    test_type: Option<&str>,
    config: &AnalyzerConfig,
) -> Result<WaterTestReport> {
    let image = image_loader::load_image(image_path)?;
    Ok(WaterTestAnalyzer::new(config).analyze(&image, test_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_photo() {
        let config = AnalyzerConfig::default_calibration();
        let result = analyze_water_test(Path::new("/nonexistent/strip.jpg"), None, &config);
        assert!(matches!(result, Err(AnalysisError::ImageNotFound { .. })));
    }

    #[test]
    fn test_request_serialization() {
        let request = AnalysisRequest::new(AnalysisType::WaterTest, "strip.jpg").with_test_type("api");

        let json = serde_json::to_string(&request).unwrap();
        let deserialized: AnalysisRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request, deserialized);
    }
}
