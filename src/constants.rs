//! Calibration constants and reference values for test-kit analysis
//!
//! This module contains the hand-tuned values the matching pipeline relies on.
//! They were tuned against the kits in use, not derived statistically, so
//! they are kept as compile-time constants rather than configuration.

/// Chart matching distance weights
///
/// The red channel carries most of the chemical signal on the calibrated
/// kits, blue the least. Domain-tuned heuristic; the asymmetry is intended.
pub mod matching {
    /// Weight applied to the squared difference of each channel (R, G, B)
    pub const CHANNEL_WEIGHTS: [f64; 3] = [1.2, 1.0, 0.8];
}

/// Confidence decay curve breakpoints
///
/// Piecewise-linear mapping from match distance to a 0-100 confidence.
/// Each segment is continuous with its neighbour.
pub mod confidence {
    /// Distances below this are a perfect match
    pub const EXACT_LIMIT: f64 = 15.0;

    /// End of the gentle decay segment (confidence 90)
    pub const CLOSE_LIMIT: f64 = 30.0;

    /// End of the moderate decay segment (confidence 70)
    pub const FAIR_LIMIT: f64 = 50.0;

    /// End of the steep decay segment (confidence 40)
    pub const POOR_LIMIT: f64 = 80.0;

    /// Span over which the final segment falls from 40 to 0
    pub const TAIL_SPAN: f64 = 40.0;

    pub const MAX_CONFIDENCE: f64 = 100.0;
}

/// Region extraction parameters
pub mod extraction {
    /// Tukey fence multiplier applied to the interquartile range
    pub const IQR_FENCE_FACTOR: f64 = 1.5;

    /// Lower quartile percentile
    pub const Q1_PERCENTILE: f64 = 25.0;

    /// Upper quartile percentile
    pub const Q3_PERCENTILE: f64 = 75.0;
}

/// Test-kit selection parameters
pub mod kits {
    /// Photos wider than this width/height ratio are treated as strips
    pub const STRIP_ASPECT_RATIO: f64 = 2.0;
}

/// Initial subsystem scores used until an analysis reports a value
pub mod subsystem_defaults {
    pub const WATER_QUALITY: f64 = 90.0;
    pub const FISH_HEALTH: f64 = 95.0;
    pub const PLANT_GROWTH: f64 = 88.0;
    pub const EQUIPMENT: f64 = 90.0;
    pub const MAINTENANCE: f64 = 87.0;
}

/// Message bus topics
pub mod topics {
    /// Prefix for per-parameter water readings
    pub const WATER_TEST_PREFIX: &str = "aquarium/water_test";
    pub const WATER_TEST_RESULTS: &str = "aquarium/water_test/results";
    pub const OVERALL_STATUS: &str = "aquarium/status/overall";

    pub const FISH_HEALTH: &str = "aquarium/fish/health";
    pub const FISH_ACTIVITY: &str = "aquarium/fish/activity";

    pub const PLANT_COVERAGE: &str = "aquarium/plants/coverage";
    pub const PLANT_ALGAE: &str = "aquarium/plants/algae";
    pub const PLANT_HEALTH: &str = "aquarium/plants/health";

    pub const CLEANLINESS_SCORE: &str = "aquarium/cleanliness/score";

    pub const EQUIPMENT_HEATER: &str = "aquarium/equipment/heater";
    pub const EQUIPMENT_FILTER: &str = "aquarium/equipment/filter";
    pub const EQUIPMENT_LIGHT: &str = "aquarium/equipment/light";

    pub const FEEDING_LATEST: &str = "aquarium/feeding/latest";

    pub const MONTHLY_COSTS: &str = "aquarium/analytics/costs";
}

/// Runtime defaults
pub mod runtime {
    /// Photo root used when neither configuration nor environment provide one
    pub const DEFAULT_PHOTO_ROOT: &str = "/media/photos";

    /// Processor identifier reported in water-test summaries
    pub const DEFAULT_PROCESSOR: &str = "CPU";
}
