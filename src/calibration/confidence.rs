//! Match distance to confidence mapping
//!
//! Hand-tuned piecewise-linear decay, not a probability model:
//!
//! | distance      | confidence                       |
//! |---------------|----------------------------------|
//! | d < 15        | 100                              |
//! | 15 <= d < 30  | 100 - (d - 15) / 15 * 10         |
//! | 30 <= d < 50  | 90 - (d - 30) / 20 * 20          |
//! | 50 <= d < 80  | 70 - (d - 50) / 30 * 30          |
//! | d >= 80       | max(0, 40 - (d - 80) / 40 * 40)  |

use crate::constants::confidence::{
    CLOSE_LIMIT, EXACT_LIMIT, FAIR_LIMIT, MAX_CONFIDENCE, POOR_LIMIT, TAIL_SPAN,
};

/// Confidence in [0, 100] for a chart match distance
pub fn confidence(distance: f64) -> f64 {
    let d = distance;
    if d < EXACT_LIMIT {
        MAX_CONFIDENCE
    } else if d < CLOSE_LIMIT {
        100.0 - (d - EXACT_LIMIT) / (CLOSE_LIMIT - EXACT_LIMIT) * 10.0
    } else if d < FAIR_LIMIT {
        90.0 - (d - CLOSE_LIMIT) / (FAIR_LIMIT - CLOSE_LIMIT) * 20.0
    } else if d < POOR_LIMIT {
        70.0 - (d - FAIR_LIMIT) / (POOR_LIMIT - FAIR_LIMIT) * 30.0
    } else {
        (40.0 - (d - POOR_LIMIT) / TAIL_SPAN * 40.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_breakpoints() {
        assert_close(confidence(0.0), 100.0);
        assert_close(confidence(15.0), 100.0);
        assert_close(confidence(30.0), 90.0);
        assert_close(confidence(50.0), 70.0);
        assert_close(confidence(80.0), 40.0);
        assert_close(confidence(120.0), 0.0);
        assert_close(confidence(500.0), 0.0);
    }

    #[test]
    fn test_segment_midpoints() {
        assert_close(confidence(22.5), 95.0);
        assert_close(confidence(40.0), 80.0);
        assert_close(confidence(65.0), 55.0);
        assert_close(confidence(100.0), 20.0);
    }

    #[test]
    fn test_continuous_at_breakpoints() {
        for limit in [EXACT_LIMIT, CLOSE_LIMIT, FAIR_LIMIT, POOR_LIMIT] {
            let below = confidence(limit - 1e-9);
            let at = confidence(limit);
            assert!((below - at).abs() < 1e-6, "jump at {}", limit);
        }
    }

    #[test]
    fn test_non_increasing() {
        let mut previous = confidence(0.0);
        for step in 1..=1600 {
            let current = confidence(step as f64 * 0.1);
            assert!(current <= previous + 1e-12);
            assert!((0.0..=100.0).contains(&current));
            previous = current;
        }
    }
}
