//! Request handling
//!
//! [`AquariumAnalyzer`] receives analysis requests one at a time, runs the
//! matching analysis on the referenced photo, publishes the results and
//! keeps the overall tank status current. Every failure stays inside its
//! request: it is logged, nothing is published for it, and the next request
//! starts from the same aggregation state.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Local;
use image::RgbImage;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::constants::topics;
use crate::image_loader::{load_image, resolve_image_path};
use crate::inspection::{FixedInspector, TankInspector};
use crate::publish::{
    parameter_topic, publish_retained, ParameterPayload, Publisher, WaterTestSummary,
};
use crate::status::{StatusAggregator, Subsystem};
use crate::water::{WaterTestAnalyzer, WaterTestReport};
use crate::{AnalysisError, Result};

/// Kind of analysis a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    WaterTest,
    FishHealth,
    PlantGrowth,
    Cleanliness,
    Equipment,
    Feeding,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::WaterTest => "water_test",
            AnalysisType::FishHealth => "fish_health",
            AnalysisType::PlantGrowth => "plant_growth",
            AnalysisType::Cleanliness => "cleanliness",
            AnalysisType::Equipment => "equipment",
            AnalysisType::Feeding => "feeding",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "water_test" => Ok(AnalysisType::WaterTest),
            "fish_health" => Ok(AnalysisType::FishHealth),
            "plant_growth" => Ok(AnalysisType::PlantGrowth),
            "cleanliness" => Ok(AnalysisType::Cleanliness),
            "equipment" => Ok(AnalysisType::Equipment),
            "feeding" => Ok(AnalysisType::Feeding),
            other => Err(AnalysisError::UnknownAnalysisType {
                analysis_type: other.to_string(),
            }),
        }
    }
}

/// Inbound analysis request
///
/// `analysis_type` stays a string so unknown types can be reported by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub analysis_type: String,
    /// Relative to the photo root, or absolute
    pub image_path: PathBuf,
    /// Free-text kit hint for water tests; absent means auto-detect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
}

impl AnalysisRequest {
    pub fn new(analysis_type: AnalysisType, image_path: impl Into<PathBuf>) -> Self {
        Self {
            analysis_type: analysis_type.to_string(),
            image_path: image_path.into(),
            test_type: None,
        }
    }

    pub fn with_test_type(mut self, test_type: impl Into<String>) -> Self {
        self.test_type = Some(test_type.into());
        self
    }

    /// Parse a request from its JSON wire form
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(AnalysisError::invalid_request)
    }
}

/// Single-threaded analysis service
///
/// Requests are processed to completion in arrival order; the status
/// aggregator is owned here and only touched between requests.
pub struct AquariumAnalyzer<P: Publisher> {
    config: AnalyzerConfig,
    publisher: P,
    status: StatusAggregator,
    inspector: Box<dyn TankInspector>,
}

impl<P: Publisher> AquariumAnalyzer<P> {
    /// Create a service with the placeholder inspector for non-water analyses
    pub fn new(config: AnalyzerConfig, publisher: P) -> Self {
        Self::with_inspector(config, publisher, Box::new(FixedInspector))
    }

    pub fn with_inspector(
        config: AnalyzerConfig,
        publisher: P,
        inspector: Box<dyn TankInspector>,
    ) -> Self {
        Self {
            config,
            publisher,
            status: StatusAggregator::new(),
            inspector,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn status(&self) -> &StatusAggregator {
        &self.status
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn into_publisher(self) -> P {
        self.publisher
    }

    /// Publish the startup state: overall status from whatever scores are
    /// known, and the monthly cost estimate
    pub fn start(&mut self) {
        self.publish_overall_status();
        let costs = self.inspector.monthly_costs();
        self.publish(topics::MONTHLY_COSTS, &costs);
    }

    /// Handle one raw JSON request
    pub fn handle_message(&mut self, payload: &str) -> Result<()> {
        let request = AnalysisRequest::from_json(payload).map_err(|e| {
            error!("Message error: {}", e);
            e
        })?;
        self.handle_request(&request)
    }

    /// Handle one request; failures are logged and returned, never published
    pub fn handle_request(&mut self, request: &AnalysisRequest) -> Result<()> {
        info!(
            "Analysis request: {} - {}",
            request.analysis_type,
            request.image_path.display()
        );

        let result = self.process(request);
        if let Err(err) = &result {
            match err {
                AnalysisError::UnknownAnalysisType { .. } => warn!("{}", err),
                _ => error!("Request abandoned: {}", err),
            }
        }
        result
    }

    fn process(&mut self, request: &AnalysisRequest) -> Result<()> {
        let analysis_type: AnalysisType = request.analysis_type.parse()?;
        let path = resolve_image_path(&self.config.photo_root, &request.image_path);
        let image = load_image(&path)?;

        match analysis_type {
            AnalysisType::WaterTest => {
                self.analyze_water_test(&image, request.test_type.as_deref())
            }
            AnalysisType::FishHealth => self.analyze_fish_health(&image),
            AnalysisType::PlantGrowth => self.analyze_plant_growth(&image),
            AnalysisType::Cleanliness => self.analyze_cleanliness(&image),
            AnalysisType::Equipment => self.analyze_equipment(&image),
            AnalysisType::Feeding => self.analyze_feeding(&image),
        }
        Ok(())
    }

    fn analyze_water_test(&mut self, image: &RgbImage, test_type: Option<&str>) {
        let report = WaterTestAnalyzer::new(&self.config).analyze(image, test_type);
        self.publish_water_test_results(&report);

        // Whole-number score; the summary keeps one decimal
        let water_score = report
            .mean_confidence()
            .map(f64::round)
            .unwrap_or(Subsystem::WaterQuality.default_score());
        self.status.record(Subsystem::WaterQuality, water_score);
        self.publish_overall_status();

        info!(
            "Water test complete: {} in {:.2}s",
            report.source_label(),
            report.processing_time.as_secs_f64()
        );
    }

    fn publish_water_test_results(&mut self, report: &WaterTestReport) {
        let timestamp = Local::now();

        for (parameter, reading) in &report.readings {
            let payload = ParameterPayload::new(*parameter, reading, timestamp);
            self.publish(&parameter_topic(*parameter), &payload);
        }

        let summary = WaterTestSummary::from_report(report, &self.config.processor, timestamp);
        self.publish(topics::WATER_TEST_RESULTS, &summary);
    }

    fn analyze_fish_health(&mut self, image: &RgbImage) {
        let fish = self.inspector.fish_health(image);
        self.publish(topics::FISH_HEALTH, &fish);
        self.publish(
            topics::FISH_ACTIVITY,
            &serde_json::json!({ "activity_level": fish.activity_level }),
        );
        self.status.record(Subsystem::FishHealth, f64::from(fish.overall_health));
        self.publish_overall_status();
        info!("Fish health analysis complete");
    }

    fn analyze_plant_growth(&mut self, image: &RgbImage) {
        let plants = self.inspector.plant_growth(image);
        self.publish(topics::PLANT_COVERAGE, &plants.coverage);
        self.publish(topics::PLANT_ALGAE, &plants.algae);
        self.publish(
            topics::PLANT_HEALTH,
            &serde_json::json!({ "health_score": plants.health_score }),
        );
        self.status.record(Subsystem::PlantGrowth, f64::from(plants.health_score));
        self.publish_overall_status();
        info!("Plant analysis complete");
    }

    fn analyze_cleanliness(&mut self, image: &RgbImage) {
        let cleanliness = self.inspector.cleanliness(image);
        self.publish(topics::CLEANLINESS_SCORE, &cleanliness);
        self.status.record(Subsystem::Maintenance, f64::from(cleanliness.overall_score));
        self.publish_overall_status();
        info!("Cleanliness analysis complete");
    }

    fn analyze_equipment(&mut self, image: &RgbImage) {
        let equipment = self.inspector.equipment(image);
        self.publish(topics::EQUIPMENT_HEATER, &equipment.heater);
        self.publish(topics::EQUIPMENT_FILTER, &equipment.filter);
        self.publish(topics::EQUIPMENT_LIGHT, &equipment.light);
        self.status.record(Subsystem::Equipment, equipment.score());
        self.publish_overall_status();
        info!("Equipment analysis complete");
    }

    /// Feeding has no subsystem score; the overall status is left alone
    fn analyze_feeding(&mut self, image: &RgbImage) {
        let feeding = self.inspector.feeding(image);
        self.publish(topics::FEEDING_LATEST, &feeding);
        info!("Feeding analysis complete");
    }

    fn publish_overall_status(&mut self) {
        let status = self.status.overall_status();
        self.publish(topics::OVERALL_STATUS, &status);
        info!("Overall tank score: {}", status.total_score);
    }

    /// Publish retained state; delivery failures are logged and do not
    /// affect the analysis
    fn publish<T: Serialize + ?Sized>(&mut self, topic: &str, payload: &T) {
        if let Err(err) = publish_retained(&mut self.publisher, topic, payload) {
            warn!("{}", err);
        }
    }
}
