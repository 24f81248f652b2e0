//! Published payload shapes for water-test results

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::calibration::Parameter;
use crate::color::Color;
use crate::constants::topics::WATER_TEST_PREFIX;
use crate::status::round_to_tenth;
use crate::water::{ParameterReading, WaterTestReport};

/// Topic of one parameter's latest reading, e.g. `aquarium/water_test/ph`
pub fn parameter_topic(parameter: Parameter) -> String {
    format!("{}/{}", WATER_TEST_PREFIX, parameter.key())
}

/// Latest reading of one chemistry parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterPayload {
    pub value: f64,
    /// One decimal
    pub confidence: f64,
    /// "ppm", or empty for pH
    pub unit: String,
    pub timestamp: DateTime<Local>,
    /// `[r, g, b]`
    pub measured_color: Color,
    /// `#RRGGBB`, for dashboard swatches
    pub measured_hex: String,
}

impl ParameterPayload {
    pub fn new(parameter: Parameter, reading: &ParameterReading, timestamp: DateTime<Local>) -> Self {
        Self {
            value: reading.value,
            confidence: round_to_tenth(reading.confidence),
            unit: parameter.unit().to_string(),
            timestamp,
            measured_color: reading.color,
            measured_hex: reading.color.to_hex(),
        }
    }
}

/// Summary of one water-test run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterTestSummary {
    pub timestamp: DateTime<Local>,
    /// Kit label, "(auto)" suffixed when inferred from the photo
    pub source: String,
    /// Mean parameter confidence, one decimal; 0 when nothing was read
    pub overall_confidence: f64,
    pub processing_time_seconds: f64,
    pub processor: String,
}

impl WaterTestSummary {
    pub fn from_report(report: &WaterTestReport, processor: &str, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            source: report.source_label().to_string(),
            overall_confidence: round_to_tenth(report.mean_confidence().unwrap_or(0.0)),
            processing_time_seconds: report.processing_time.as_secs_f64(),
            processor: processor.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::select_kit;
    use std::time::Duration;

    fn reading(value: f64, confidence: f64) -> ParameterReading {
        ParameterReading {
            value,
            confidence,
            color: Color::new(210, 120, 60),
            distance: 0.0,
        }
    }

    #[test]
    fn test_parameter_topics() {
        assert_eq!(parameter_topic(Parameter::Ph), "aquarium/water_test/ph");
        assert_eq!(parameter_topic(Parameter::Kh), "aquarium/water_test/kh");
    }

    #[test]
    fn test_parameter_payload_shape() {
        let payload = ParameterPayload::new(Parameter::Ph, &reading(7.2, 93.456), Local::now());
        assert_eq!(payload.confidence, 93.5);
        assert_eq!(payload.unit, "");
        assert_eq!(payload.measured_hex, "#D2783C");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["value"], 7.2);
        assert_eq!(json["measured_color"], serde_json::json!([210, 120, 60]));
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_ppm_unit() {
        let payload = ParameterPayload::new(Parameter::Nitrate, &reading(40.0, 80.0), Local::now());
        assert_eq!(payload.unit, "ppm");
    }

    #[test]
    fn test_summary_from_report() {
        let report = WaterTestReport {
            selection: select_kit(None, 1200, 300),
            readings: vec![
                (Parameter::Ph, reading(7.2, 100.0)),
                (Parameter::Nitrite, reading(0.0, 90.0)),
                (Parameter::Nitrate, reading(20.0, 85.25)),
            ],
            failures: Vec::new(),
            processing_time: Duration::from_millis(250),
        };

        let summary = WaterTestSummary::from_report(&report, "CPU", Local::now());
        assert_eq!(summary.source, "API Strip (auto)");
        assert_eq!(summary.overall_confidence, 91.8);
        assert_eq!(summary.processing_time_seconds, 0.25);
        assert_eq!(summary.processor, "CPU");
    }

    #[test]
    fn test_summary_without_readings() {
        let report = WaterTestReport {
            selection: select_kit(Some("tube"), 10, 10),
            readings: Vec::new(),
            failures: Vec::new(),
            processing_time: Duration::ZERO,
        };

        let summary = WaterTestSummary::from_report(&report, "CPU", Local::now());
        assert_eq!(summary.overall_confidence, 0.0);
        assert_eq!(summary.source, "NT Labs Tubes");
    }
}
