//! Overall tank status
//!
//! Keeps the latest score of every monitored subsystem and derives the
//! overall tank score as their mean. Subsystems that never reported use
//! documented defaults, so the overall score is always defined.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::constants::subsystem_defaults;

/// Monitored part of the tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    WaterQuality,
    FishHealth,
    PlantGrowth,
    Equipment,
    /// Tank cleanliness
    Maintenance,
}

impl Subsystem {
    pub const ALL: [Subsystem; 5] = [
        Subsystem::WaterQuality,
        Subsystem::FishHealth,
        Subsystem::PlantGrowth,
        Subsystem::Equipment,
        Subsystem::Maintenance,
    ];

    /// Score assumed until the subsystem reports
    pub fn default_score(&self) -> f64 {
        match self {
            Subsystem::WaterQuality => subsystem_defaults::WATER_QUALITY,
            Subsystem::FishHealth => subsystem_defaults::FISH_HEALTH,
            Subsystem::PlantGrowth => subsystem_defaults::PLANT_GROWTH,
            Subsystem::Equipment => subsystem_defaults::EQUIPMENT,
            Subsystem::Maintenance => subsystem_defaults::MAINTENANCE,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Snapshot of all subsystem scores plus their mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatus {
    pub water_quality: f64,
    pub fish_health: f64,
    pub plant_growth: f64,
    pub equipment: f64,
    pub maintenance: f64,
    /// Mean of the five scores, one decimal
    pub total_score: f64,
    pub timestamp: DateTime<Local>,
}

/// Latest score per subsystem
///
/// Scores live for the life of the process and are overwritten in place.
/// The overall status is derived on every read, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusAggregator {
    scores: [f64; 5],
}

impl Default for StatusAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusAggregator {
    /// Create an aggregator holding the default score of every subsystem
    pub fn new() -> Self {
        Self {
            scores: Subsystem::ALL.map(|s| s.default_score()),
        }
    }

    /// Replace the latest score of `subsystem`
    pub fn record(&mut self, subsystem: Subsystem, score: f64) {
        self.scores[subsystem.index()] = score;
    }

    pub fn score(&self, subsystem: Subsystem) -> f64 {
        self.scores[subsystem.index()]
    }

    /// Mean of the current scores, rounded to one decimal
    pub fn total_score(&self) -> f64 {
        let mean = self.scores.iter().sum::<f64>() / self.scores.len() as f64;
        round_to_tenth(mean)
    }

    /// Current overall status stamped with the time of the call
    pub fn overall_status(&self) -> OverallStatus {
        OverallStatus {
            water_quality: self.score(Subsystem::WaterQuality),
            fish_health: self.score(Subsystem::FishHealth),
            plant_growth: self.score(Subsystem::PlantGrowth),
            equipment: self.score(Subsystem::Equipment),
            maintenance: self.score(Subsystem::Maintenance),
            total_score: self.total_score(),
            timestamp: Local::now(),
        }
    }
}

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
