//! Robust color extraction from indicator regions
//!
//! Extracts a representative color from a rectangular patch of a kit photo:
//! - Collects every pixel inside the region
//! - Removes outliers per channel with Tukey fences around the quartiles
//! - Averages the surviving samples and truncates to integers
//!
//! Trimming each channel independently suppresses glare, shadow and label
//! text without needing a learned model.

use image::RgbImage;

use crate::{
    color::{Color, Region},
    constants::extraction::{IQR_FENCE_FACTOR, Q1_PERCENTILE, Q3_PERCENTILE},
    AnalysisError, Result,
};

/// Per-channel statistics gathered while extracting a region
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    pub q1: f64,
    pub q3: f64,
    /// Samples that survived the fence
    pub kept: usize,
    pub mean: f64,
}

/// Extraction result with the statistics behind it
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSample {
    /// Representative color
    pub color: Color,
    /// Number of pixels inside the region
    pub pixel_count: usize,
    /// Statistics for R, G, B
    pub channels: [ChannelStats; 3],
}

/// Region extractor implementing IQR-fenced channel means
pub struct RegionExtractor {
    fence_factor: f64,
    q1_percentile: f64,
    q3_percentile: f64,
}

impl Default for RegionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionExtractor {
    /// Create an extractor with the standard 1.5 x IQR fence
    pub fn new() -> Self {
        Self {
            fence_factor: IQR_FENCE_FACTOR,
            q1_percentile: Q1_PERCENTILE,
            q3_percentile: Q3_PERCENTILE,
        }
    }

    /// Create an extractor with custom fence parameters
    pub fn with_params(fence_factor: f64, q1_percentile: f64, q3_percentile: f64) -> Self {
        Self {
            fence_factor,
            q1_percentile,
            q3_percentile,
        }
    }

    /// Extract the representative color of `region`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::RegionOutOfBounds` if the region does not fit
    /// inside the image.
    pub fn extract(&self, image: &RgbImage, region: Region) -> Result<Color> {
        Ok(self.sample(image, region)?.color)
    }

    /// Extract the representative color together with channel statistics
    pub fn sample(&self, image: &RgbImage, region: Region) -> Result<RegionSample> {
        let (width, height) = image.dimensions();
        if !region.fits_within(width, height) {
            return Err(AnalysisError::RegionOutOfBounds {
                region,
                width,
                height,
            });
        }

        let mut channel_values: [Vec<f64>; 3] = std::array::from_fn(|_| Vec::with_capacity(region.area()));
        for y in region.y1()..region.y2() {
            for x in region.x1()..region.x2() {
                let pixel = image.get_pixel(x, y);
                for (values, &value) in channel_values.iter_mut().zip(pixel.0.iter()) {
                    values.push(value as f64);
                }
            }
        }

        let [red, green, blue] = channel_values.map(|values| self.fenced_mean(values));
        let color = Color::new(
            truncate_channel(red.mean),
            truncate_channel(green.mean),
            truncate_channel(blue.mean),
        );

        Ok(RegionSample {
            color,
            pixel_count: region.area(),
            channels: [red, green, blue],
        })
    }

    /// Mean of the samples inside the Tukey fences of one channel
    ///
    /// Falls back to the unfiltered mean if the fence removes every sample.
    fn fenced_mean(&self, mut values: Vec<f64>) -> ChannelStats {
        let unfiltered_mean = mean(&values);

        values.sort_by(f64::total_cmp);
        let q1 = percentile(&values, self.q1_percentile);
        let q3 = percentile(&values, self.q3_percentile);
        let iqr = q3 - q1;
        let low = q1 - self.fence_factor * iqr;
        let high = q3 + self.fence_factor * iqr;

        let kept: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| *v >= low && *v <= high)
            .collect();

        let mean = if kept.is_empty() {
            unfiltered_mean
        } else {
            mean(&kept)
        };

        ChannelStats {
            q1,
            q3,
            kept: kept.len(),
            mean,
        }
    }
}

/// Percentile of sorted samples with linear interpolation between ranks
pub(crate) fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (pct / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let frac = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn truncate_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
