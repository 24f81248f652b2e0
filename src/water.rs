//! Water-test analysis
//!
//! Reads every parameter of the selected kit from a photo: extract the patch
//! color, match it against the parameter's chart, score the match.
//! Parameters the kit calibration does not cover are skipped silently;
//! parameters with broken calibration fail on their own without affecting
//! the rest of the run.

use std::time::{Duration, Instant};

use image::RgbImage;
use log::{debug, error, warn};

use crate::calibration::{confidence, Parameter};
use crate::color::{Color, RegionExtractor};
use crate::config::{AnalyzerConfig, KitCalibration};
use crate::detection::{select_kit, KitSelection};
use crate::{AnalysisError, Result};

/// Reading of one chemistry parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterReading {
    /// Chart value of the best match (ppm, or pH units)
    pub value: f64,
    /// Match confidence in [0, 100]
    pub confidence: f64,
    /// Representative color measured in the patch
    pub color: Color,
    /// Weighted distance to the matched reference color
    pub distance: f64,
}

/// Outcome of one water-test run
#[derive(Debug)]
pub struct WaterTestReport {
    pub selection: KitSelection,
    /// Readings in the kit's parameter order
    pub readings: Vec<(Parameter, ParameterReading)>,
    /// Parameters that were calibrated but could not be read
    pub failures: Vec<(Parameter, AnalysisError)>,
    pub processing_time: Duration,
}

impl WaterTestReport {
    /// Label of the kit the photo was read as
    pub fn source_label(&self) -> &'static str {
        self.selection.source_label()
    }

    pub fn reading(&self, parameter: Parameter) -> Option<&ParameterReading> {
        self.readings
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, reading)| reading)
    }

    /// Mean confidence over all readings, `None` if nothing was read
    pub fn mean_confidence(&self) -> Option<f64> {
        if self.readings.is_empty() {
            return None;
        }
        let total: f64 = self.readings.iter().map(|(_, r)| r.confidence).sum();
        Some(total / self.readings.len() as f64)
    }
}

/// Kit-aware water-test reader over a shared calibration
pub struct WaterTestAnalyzer<'a> {
    config: &'a AnalyzerConfig,
    extractor: RegionExtractor,
}

impl<'a> WaterTestAnalyzer<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self {
            config,
            extractor: RegionExtractor::new(),
        }
    }

    /// Read all parameters of the kit selected for this photo
    ///
    /// `test_type` is the request's free-text kit hint; `None` or "auto"
    /// infers the kit from the photo's aspect ratio.
    pub fn analyze(&self, image: &RgbImage, test_type: Option<&str>) -> WaterTestReport {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        let selection = select_kit(test_type, width, height);
        let calibration = self.config.kit(selection.kit);

        debug!(
            "Reading {}x{} photo as {}",
            width,
            height,
            selection.source_label()
        );

        let mut readings = Vec::new();
        let mut failures = Vec::new();

        for &parameter in selection.kit.parameters() {
            match self.read_parameter(image, calibration, parameter) {
                None => debug!("{} not calibrated for {}, skipping", parameter, selection.kit),
                Some(Ok(reading)) => {
                    debug!(
                        "{}: color {} -> {} (distance {:.2}, confidence {:.1})",
                        parameter, reading.color, reading.value, reading.distance, reading.confidence
                    );
                    readings.push((parameter, reading));
                }
                Some(Err(err)) => {
                    match &err {
                        AnalysisError::ConfigurationError { .. } => {
                            error!("{} reading failed for {}: {}", parameter, selection.kit, err)
                        }
                        _ => warn!("{} skipped for {}: {}", parameter, selection.kit, err),
                    }
                    failures.push((parameter, err));
                }
            }
        }

        WaterTestReport {
            selection,
            readings,
            failures,
            processing_time: start.elapsed(),
        }
    }

    /// Read one parameter; `None` when the kit has no region or chart for it
    fn read_parameter(
        &self,
        image: &RgbImage,
        calibration: &KitCalibration,
        parameter: Parameter,
    ) -> Option<Result<ParameterReading>> {
        let region = calibration.region(parameter)?;
        let chart = calibration.chart(parameter)?;

        Some(region.and_then(|region| {
            let color = self.extractor.extract(image, region)?;
            let matched = chart.match_color(color).map_err(|e| match e {
                AnalysisError::ConfigurationError { source, .. } => {
                    AnalysisError::ConfigurationError {
                        reason: format!("{} chart has no entries", parameter),
                        source,
                    }
                }
                other => other,
            })?;
            Ok(ParameterReading {
                value: matched.value,
                confidence: confidence(matched.distance),
                color,
                distance: matched.distance,
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{ChartEntry, ReferenceChart};
    use crate::detection::TestKit;
    use image::Rgb;

    /// 1200x300 strip photo, listed pads painted, the rest left off-white
    fn strip_photo(config: &AnalyzerConfig, pads: &[(Parameter, [u8; 3])]) -> RgbImage {
        let mut img = RgbImage::from_pixel(1200, 300, Rgb([245, 245, 245]));
        for &(parameter, rgb) in pads {
            let region = config.kits.strip.region(parameter).unwrap().unwrap();
            for y in region.y1()..region.y2() {
                for x in region.x1()..region.x2() {
                    img.put_pixel(x, y, Rgb(rgb));
                }
            }
        }
        img
    }

    #[test]
    fn test_strip_exact_ph_match() {
        let config = AnalyzerConfig::default_calibration();
        let img = strip_photo(&config, &[(Parameter::Ph, [210, 120, 60])]);

        let report = WaterTestAnalyzer::new(&config).analyze(&img, None);
        assert_eq!(report.selection.kit, TestKit::ApiStrip);
        assert_eq!(report.source_label(), "API Strip (auto)");

        let ph = report.reading(Parameter::Ph).unwrap();
        assert_eq!(ph.value, 7.2);
        assert_eq!(ph.confidence, 100.0);
        assert_eq!(ph.color, Color::new(210, 120, 60));
        assert_eq!(report.readings.len(), 5);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_readings_follow_kit_order() {
        let config = AnalyzerConfig::default_calibration();
        let img = strip_photo(&config, &[]);

        let report = WaterTestAnalyzer::new(&config).analyze(&img, Some("api"));
        let order: Vec<Parameter> = report.readings.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, TestKit::ApiStrip.parameters());
    }

    #[test]
    fn test_uncalibrated_parameter_skipped_silently() {
        let mut config = AnalyzerConfig::default_calibration();
        config.kits.strip.charts.remove(&Parameter::Gh);
        config.kits.strip.regions.remove(&Parameter::Kh);
        let img = strip_photo(&config, &[]);

        let report = WaterTestAnalyzer::new(&config).analyze(&img, Some("strip"));
        assert_eq!(report.readings.len(), 3);
        assert!(report.failures.is_empty());
        assert!(report.reading(Parameter::Gh).is_none());
        assert!(report.reading(Parameter::Kh).is_none());
    }

    #[test]
    fn test_empty_chart_fails_only_that_parameter() {
        let mut config = AnalyzerConfig::default_calibration();
        config
            .kits
            .strip
            .charts
            .insert(Parameter::Nitrite, ReferenceChart::default());
        let img = strip_photo(&config, &[]);

        let report = WaterTestAnalyzer::new(&config).analyze(&img, Some("strip"));
        assert_eq!(report.readings.len(), 4);
        assert_eq!(report.failures.len(), 1);
        let (parameter, err) = &report.failures[0];
        assert_eq!(*parameter, Parameter::Nitrite);
        assert!(matches!(err, AnalysisError::ConfigurationError { .. }));
        assert!(err.to_string().contains("nitrite"));
    }

    #[test]
    fn test_out_of_bounds_region_fails_only_that_parameter() {
        let config = AnalyzerConfig::default_calibration();
        // Tube layout reaches down to y = 700; a 600x600 photo cuts every tube off
        let img = RgbImage::from_pixel(600, 600, Rgb([200, 200, 200]));

        let report = WaterTestAnalyzer::new(&config).analyze(&img, Some("tubes"));
        assert_eq!(report.selection.kit, TestKit::NtLabsTubes);
        assert!(report.readings.is_empty());
        assert_eq!(report.failures.len(), 4);
        assert!(report
            .failures
            .iter()
            .all(|(_, e)| matches!(e, AnalysisError::RegionOutOfBounds { .. })));
    }

    #[test]
    fn test_badge_requested_explicitly() {
        let mut config = AnalyzerConfig::default_calibration();
        config.kits.badge.regions.insert(Parameter::Ammonia, [0, 0, 10, 10]);
        config.kits.badge.charts.insert(
            Parameter::Ammonia,
            ReferenceChart::new(vec![
                ChartEntry::new(Color::new(240, 220, 120), 0.0),
                ChartEntry::new(Color::new(60, 130, 120), 0.5),
            ]),
        );
        // Wide photo would auto-select the strip
        let img = RgbImage::from_pixel(60, 10, Rgb([62, 131, 119]));

        let report = WaterTestAnalyzer::new(&config).analyze(&img, Some("Seachem Badge"));
        assert_eq!(report.source_label(), "Seachem Badge");
        let ammonia = report.reading(Parameter::Ammonia).unwrap();
        assert_eq!(ammonia.value, 0.5);
        assert_eq!(ammonia.confidence, 100.0);
    }

    #[test]
    fn test_mean_confidence() {
        let config = AnalyzerConfig::default_calibration();
        let report = WaterTestReport {
            selection: select_kit(Some("strip"), 10, 10),
            readings: vec![
                (
                    Parameter::Ph,
                    ParameterReading {
                        value: 7.2,
                        confidence: 100.0,
                        color: Color::new(0, 0, 0),
                        distance: 0.0,
                    },
                ),
                (
                    Parameter::Kh,
                    ParameterReading {
                        value: 80.0,
                        confidence: 70.0,
                        color: Color::new(0, 0, 0),
                        distance: 50.0,
                    },
                ),
            ],
            failures: Vec::new(),
            processing_time: Duration::ZERO,
        };
        assert_eq!(report.mean_confidence(), Some(85.0));

        let empty = WaterTestAnalyzer::new(&config)
            .analyze(&RgbImage::new(1, 1), Some("tube"));
        assert_eq!(empty.mean_confidence(), None);
    }
}
