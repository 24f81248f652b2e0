//! Non-water tank observations
//!
//! Fish, plant, cleanliness, equipment and feeding analysis sit behind the
//! [`TankInspector`] trait. The only implementation, [`FixedInspector`],
//! is a placeholder that reports fixed observations without looking at the
//! photo; no detection or segmentation is attempted.

use chrono::{DateTime, Local};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Fish health and behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishObservation {
    pub overall_health: u32,
    pub total_fish: u32,
    pub fish_present: u32,
    pub activity_level: u32,
    pub alert: String,
    pub timestamp: DateTime<Local>,
}

/// Plant coverage and growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantCoverage {
    pub coverage_percent: u32,
    pub weekly_change: i32,
    pub growth_rate: f64,
    pub timestamp: DateTime<Local>,
}

/// Algae coverage breakdown, percent of visible surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgaeObservation {
    pub total_coverage: u32,
    pub green_algae: u32,
    pub brown_algae: u32,
    pub black_beard: u32,
    pub blue_green: u32,
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantObservation {
    pub coverage: PlantCoverage,
    pub algae: AlgaeObservation,
    pub health_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanlinessObservation {
    pub overall_score: u32,
    pub glass_clarity: u32,
    pub substrate: u32,
    pub decorations: u32,
    pub water_clarity: u32,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaterStatus {
    pub efficiency: u32,
    pub status: String,
    /// Degrees of drift around the set point
    pub temperature_stability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterStatus {
    /// Litres per hour
    pub flow_rate: u32,
    pub status: String,
    pub percent_rated: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightStatus {
    pub intensity: u32,
    /// Color temperature in Kelvin
    pub spectrum: u32,
    pub output_percent: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentObservation {
    pub heater: HeaterStatus,
    pub filter: FilterStatus,
    pub light: LightStatus,
}

impl EquipmentObservation {
    /// Equipment subsystem score: mean of heater efficiency, filter rating
    /// and light output, rounded to a whole number
    pub fn score(&self) -> f64 {
        let total = self.heater.efficiency + self.filter.percent_rated + self.light.output_percent;
        (f64::from(total) / 3.0).round()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingObservation {
    pub score: u32,
    /// Seconds until the first fish reacted
    pub response_time: u32,
    pub consumption_percent: u32,
    pub waste_percent: u32,
    pub fish_participated: String,
    pub timestamp: DateTime<Local>,
}

/// Monthly running-cost estimate in the owner's currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCosts {
    pub total: u32,
    pub test_strips: u32,
    pub food: u32,
    pub fertilizer: u32,
    pub electricity: u32,
    pub timestamp: DateTime<Local>,
}

/// Source of the non-water observations
pub trait TankInspector {
    fn fish_health(&self, image: &RgbImage) -> FishObservation;
    fn plant_growth(&self, image: &RgbImage) -> PlantObservation;
    fn cleanliness(&self, image: &RgbImage) -> CleanlinessObservation;
    fn equipment(&self, image: &RgbImage) -> EquipmentObservation;
    fn feeding(&self, image: &RgbImage) -> FeedingObservation;
    fn monthly_costs(&self) -> MonthlyCosts;
}

/// Placeholder inspector returning the same observations for every photo
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedInspector;

impl TankInspector for FixedInspector {
    fn fish_health(&self, _image: &RgbImage) -> FishObservation {
        FishObservation {
            overall_health: 95,
            total_fish: 8,
            fish_present: 8,
            activity_level: 85,
            alert: "none".into(),
            timestamp: Local::now(),
        }
    }

    fn plant_growth(&self, _image: &RgbImage) -> PlantObservation {
        PlantObservation {
            coverage: PlantCoverage {
                coverage_percent: 52,
                weekly_change: 7,
                growth_rate: 2.3,
                timestamp: Local::now(),
            },
            algae: AlgaeObservation {
                total_coverage: 4,
                green_algae: 2,
                brown_algae: 1,
                black_beard: 0,
                blue_green: 0,
                trend: "decreasing".into(),
            },
            health_score: 88,
        }
    }

    fn cleanliness(&self, _image: &RgbImage) -> CleanlinessObservation {
        CleanlinessObservation {
            overall_score: 87,
            glass_clarity: 95,
            substrate: 85,
            decorations: 80,
            water_clarity: 95,
            timestamp: Local::now(),
        }
    }

    fn equipment(&self, _image: &RgbImage) -> EquipmentObservation {
        EquipmentObservation {
            heater: HeaterStatus {
                efficiency: 94,
                status: "working".into(),
                temperature_stability: 0.2,
            },
            filter: FilterStatus {
                flow_rate: 285,
                status: "excellent".into(),
                percent_rated: 95,
            },
            light: LightStatus {
                intensity: 85,
                spectrum: 6480,
                output_percent: 92,
            },
        }
    }

    fn feeding(&self, _image: &RgbImage) -> FeedingObservation {
        FeedingObservation {
            score: 98,
            response_time: 3,
            consumption_percent: 97,
            waste_percent: 3,
            fish_participated: "8/8".into(),
            timestamp: Local::now(),
        }
    }

    fn monthly_costs(&self) -> MonthlyCosts {
        MonthlyCosts {
            total: 47,
            test_strips: 8,
            food: 15,
            fertilizer: 6,
            electricity: 18,
            timestamp: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_score_rounds_mean() {
        let equipment = FixedInspector.equipment(&RgbImage::new(1, 1));
        // (94 + 95 + 92) / 3 = 93.67
        assert_eq!(equipment.score(), 94.0);
    }

    #[test]
    fn test_fixed_observations_ignore_photo() {
        let small = RgbImage::new(1, 1);
        let large = RgbImage::new(64, 48);

        assert_eq!(
            FixedInspector.plant_growth(&small).health_score,
            FixedInspector.plant_growth(&large).health_score
        );
        assert_eq!(FixedInspector.cleanliness(&large).overall_score, 87);
        assert_eq!(FixedInspector.fish_health(&small).overall_health, 95);
    }

    #[test]
    fn test_monthly_costs_sum() {
        let costs = FixedInspector.monthly_costs();
        assert_eq!(
            costs.test_strips + costs.food + costs.fertilizer + costs.electricity,
            costs.total
        );
    }

    #[test]
    fn test_whole_number_fields_serialize_as_integers() {
        let fish = serde_json::to_value(FixedInspector.fish_health(&RgbImage::new(1, 1))).unwrap();
        assert_eq!(fish["overall_health"], serde_json::json!(95));
        assert!(fish["overall_health"].is_u64());

        let costs = serde_json::to_value(FixedInspector.monthly_costs()).unwrap();
        assert!(costs["total"].is_u64());
        assert_eq!(costs["total"], serde_json::json!(47));

        let plants = FixedInspector.plant_growth(&RgbImage::new(1, 1));
        let coverage = serde_json::to_value(&plants.coverage).unwrap();
        assert!(coverage["coverage_percent"].is_u64());
        assert!(coverage["growth_rate"].is_f64());
    }
}
