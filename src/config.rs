//! Configuration structures for the aquarium analyzer.
//!
//! This module defines where photos live and how each supported test kit is
//! calibrated: where its indicator patches sit in a photo and which reference
//! chart every patch is read against.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use aquarium_analyzer::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use the built-in calibration
//! let config = AnalyzerConfig::default_calibration();
//! # Ok::<(), aquarium_analyzer::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`KitCalibrations`]: one [`KitCalibration`] per supported kit
//! - [`KitCalibration`]: region rectangles and reference charts per parameter
//!
//! Calibration is loaded once and shared read-only by every analysis.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calibration::{ChartEntry, Parameter, ReferenceChart};
use crate::color::{Color, Region};
use crate::constants::runtime::{DEFAULT_PHOTO_ROOT, DEFAULT_PROCESSOR};
use crate::detection::TestKit;
use crate::{AnalysisError, Result};

/// Complete analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory relative image paths are resolved against
    #[serde(default = "default_photo_root")]
    pub photo_root: PathBuf,

    /// Processor identifier reported with water-test summaries
    #[serde(default = "default_processor")]
    pub processor: String,

    /// Per-kit calibration
    pub kits: KitCalibrations,
}

/// Calibration for every supported kit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitCalibrations {
    /// Seachem ammonia alert badge
    #[serde(default)]
    pub badge: KitCalibration,

    /// API 5-in-1 test strip
    #[serde(default)]
    pub strip: KitCalibration,

    /// NT Labs liquid test tubes
    #[serde(default)]
    pub tube: KitCalibration,
}

/// Where a kit's indicator patches are and what their colors mean.
///
/// Kits intentionally cover different parameter subsets; a parameter missing
/// from either map is simply not read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitCalibration {
    /// Pixel rectangle `[x1, y1, x2, y2]` per parameter.
    /// Validated at use time so one bad entry only affects its own parameter.
    #[serde(default)]
    pub regions: BTreeMap<Parameter, [u32; 4]>,

    /// Ordered reference chart per parameter
    #[serde(default)]
    pub charts: BTreeMap<Parameter, ReferenceChart>,
}

impl KitCalibration {
    /// Region for `parameter`, if configured
    ///
    /// Returns `Some(Err(_))` for an empty or inverted rectangle.
    pub fn region(&self, parameter: Parameter) -> Option<Result<Region>> {
        self.regions
            .get(&parameter)
            .map(|&bounds| Region::try_from(bounds))
    }

    /// Reference chart for `parameter`, if configured
    pub fn chart(&self, parameter: Parameter) -> Option<&ReferenceChart> {
        self.charts.get(&parameter)
    }

    /// Parameters that have both a region and a chart
    pub fn covered_parameters(&self) -> Vec<Parameter> {
        self.regions
            .keys()
            .filter(|p| self.charts.contains_key(p))
            .copied()
            .collect()
    }
}

impl AnalyzerConfig {
    /// Calibration for one kit
    pub fn kit(&self, kit: TestKit) -> &KitCalibration {
        match kit {
            TestKit::SeachemBadge => &self.kits.badge,
            TestKit::ApiStrip => &self.kits.strip,
            TestKit::NtLabsTubes => &self.kits.tube,
        }
    }

    /// Built-in calibration for the reference photo layouts
    ///
    /// - Badge: square photo, badge disc centered in an 800x800 frame
    /// - Strip: 1200x300 landscape photo, five pads left to right
    /// - Tubes: 1200x900 photo, four tubes left to right
    pub fn default_calibration() -> Self {
        let badge = KitCalibration {
            regions: BTreeMap::from([(Parameter::Ammonia, [350, 350, 450, 450])]),
            charts: BTreeMap::from([(
                Parameter::Ammonia,
                chart(&[
                    ([240, 220, 120], 0.0),
                    ([200, 210, 110], 0.02),
                    ([160, 195, 110], 0.05),
                    ([120, 180, 115], 0.1),
                    ([90, 160, 120], 0.2),
                    ([60, 130, 120], 0.5),
                    ([40, 100, 110], 1.0),
                ]),
            )]),
        };

        let strip = KitCalibration {
            regions: BTreeMap::from([
                (Parameter::Ph, [120, 120, 180, 180]),
                (Parameter::Nitrite, [340, 120, 400, 180]),
                (Parameter::Nitrate, [560, 120, 620, 180]),
                (Parameter::Kh, [780, 120, 840, 180]),
                (Parameter::Gh, [1000, 120, 1060, 180]),
            ]),
            charts: BTreeMap::from([
                (
                    Parameter::Ph,
                    chart(&[
                        ([235, 200, 80], 6.0),
                        ([230, 180, 70], 6.4),
                        ([220, 150, 60], 6.8),
                        ([210, 120, 60], 7.2),
                        ([205, 95, 70], 7.6),
                        ([200, 75, 90], 8.0),
                        ([190, 60, 110], 8.4),
                    ]),
                ),
                (
                    Parameter::Nitrite,
                    chart(&[
                        ([250, 250, 245], 0.0),
                        ([245, 220, 225], 0.5),
                        ([240, 190, 205], 1.0),
                        ([230, 150, 180], 3.0),
                        ([220, 120, 160], 5.0),
                        ([210, 90, 140], 10.0),
                    ]),
                ),
                (
                    Parameter::Nitrate,
                    chart(&[
                        ([252, 248, 240], 0.0),
                        ([250, 225, 230], 20.0),
                        ([245, 195, 210], 40.0),
                        ([235, 160, 190], 80.0),
                        ([225, 120, 165], 160.0),
                        ([210, 90, 150], 200.0),
                    ]),
                ),
                (
                    Parameter::Kh,
                    chart(&[
                        ([240, 230, 120], 0.0),
                        ([200, 210, 130], 40.0),
                        ([160, 190, 140], 80.0),
                        ([120, 170, 150], 120.0),
                        ([90, 150, 155], 180.0),
                        ([60, 130, 160], 240.0),
                    ]),
                ),
                (
                    Parameter::Gh,
                    chart(&[
                        ([120, 160, 200], 0.0),
                        ([140, 140, 190], 30.0),
                        ([160, 120, 180], 60.0),
                        ([180, 100, 170], 120.0),
                        ([190, 80, 160], 180.0),
                    ]),
                ),
            ]),
        };

        let tube = KitCalibration {
            regions: BTreeMap::from([
                (Parameter::Ammonia, [100, 500, 200, 700]),
                (Parameter::Nitrite, [400, 500, 500, 700]),
                (Parameter::Nitrate, [700, 500, 800, 700]),
                (Parameter::Ph, [1000, 500, 1100, 700]),
            ]),
            charts: BTreeMap::from([
                (
                    Parameter::Ammonia,
                    chart(&[
                        ([230, 225, 120], 0.0),
                        ([200, 210, 110], 0.2),
                        ([170, 200, 110], 0.5),
                        ([140, 185, 110], 1.0),
                        ([110, 165, 105], 2.0),
                        ([80, 140, 100], 5.0),
                    ]),
                ),
                (
                    Parameter::Nitrite,
                    chart(&[
                        ([240, 230, 220], 0.0),
                        ([235, 200, 200], 0.1),
                        ([230, 170, 185], 0.25),
                        ([215, 130, 170], 0.5),
                        ([200, 100, 160], 1.0),
                        ([180, 70, 150], 2.0),
                    ]),
                ),
                (
                    Parameter::Nitrate,
                    chart(&[
                        ([245, 235, 200], 0.0),
                        ([240, 200, 170], 10.0),
                        ([235, 160, 140], 25.0),
                        ([225, 120, 110], 50.0),
                        ([210, 90, 90], 100.0),
                        ([190, 60, 70], 200.0),
                    ]),
                ),
                (
                    Parameter::Ph,
                    chart(&[
                        ([220, 200, 60], 6.0),
                        ([190, 190, 70], 6.5),
                        ([140, 170, 90], 7.0),
                        ([90, 150, 120], 7.5),
                        ([60, 120, 150], 8.0),
                    ]),
                ),
            ]),
        };

        Self {
            photo_root: default_photo_root(),
            processor: default_processor(),
            kits: KitCalibrations { badge, strip, tube },
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config_load(format!("cannot read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config_load(format!("cannot parse {}", path.display()), e)
        })?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AnalysisError::config_load("cannot serialize configuration", e)
        })?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config_load(format!("cannot write {}", path.display()), e)
        })?;
        Ok(())
    }
}

fn chart(entries: &[([u8; 3], f64)]) -> ReferenceChart {
    entries
        .iter()
        .map(|&(rgb, value)| ChartEntry::new(Color::from(rgb), value))
        .collect()
}

fn default_photo_root() -> PathBuf {
    PathBuf::from(DEFAULT_PHOTO_ROOT)
}

fn default_processor() -> String {
    DEFAULT_PROCESSOR.to_string()
}
