//! Test-kit selection
//!
//! Decides which calibrated layout applies to a photo:
//! - An explicit kit hint wins when it names a known kit
//! - Otherwise wide photos are read as strips, everything else as tubes
//!
//! Badges are never inferred; they have to be requested by name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calibration::Parameter;
use crate::constants::kits::STRIP_ASPECT_RATIO;

/// Commercial water-test product types with their own layout and charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKit {
    /// Seachem Ammonia Alert badge
    SeachemBadge,
    /// API 5-in-1 test strip
    ApiStrip,
    /// NT Labs liquid test tubes
    NtLabsTubes,
}

impl TestKit {
    pub const ALL: [TestKit; 3] = [TestKit::SeachemBadge, TestKit::ApiStrip, TestKit::NtLabsTubes];

    /// Parameters the kit reads, in reading order
    pub fn parameters(&self) -> &'static [Parameter] {
        match self {
            TestKit::SeachemBadge => &[Parameter::Ammonia],
            TestKit::ApiStrip => &[
                Parameter::Ph,
                Parameter::Nitrite,
                Parameter::Nitrate,
                Parameter::Kh,
                Parameter::Gh,
            ],
            TestKit::NtLabsTubes => &[
                Parameter::Ammonia,
                Parameter::Nitrite,
                Parameter::Nitrate,
                Parameter::Ph,
            ],
        }
    }

    /// Product name used when the kit was requested explicitly
    pub fn label(&self) -> &'static str {
        match self {
            TestKit::SeachemBadge => "Seachem Badge",
            TestKit::ApiStrip => "API 5-in-1 Strip",
            TestKit::NtLabsTubes => "NT Labs Tubes",
        }
    }

    /// Product name used when the kit was inferred from the photo
    pub fn auto_label(&self) -> &'static str {
        match self {
            // never inferred
            TestKit::SeachemBadge => self.label(),
            TestKit::ApiStrip => "API Strip (auto)",
            TestKit::NtLabsTubes => "NT Labs (auto)",
        }
    }

    /// Kit named by a free-text hint, matched case-insensitively by substring
    ///
    /// Checked in order: badge, then strip ("api" or "strip"), then tube
    /// ("nt" or "tube").
    pub fn from_hint(hint: &str) -> Option<TestKit> {
        let hint = hint.to_lowercase();
        if hint.contains("badge") {
            Some(TestKit::SeachemBadge)
        } else if hint.contains("api") || hint.contains("strip") {
            Some(TestKit::ApiStrip)
        } else if hint.contains("nt") || hint.contains("tube") {
            Some(TestKit::NtLabsTubes)
        } else {
            None
        }
    }

    /// Kit inferred from photo proportions
    pub fn from_dimensions(width: u32, height: u32) -> TestKit {
        if height > 0 && width as f64 / height as f64 > STRIP_ASPECT_RATIO {
            TestKit::ApiStrip
        } else {
            TestKit::NtLabsTubes
        }
    }
}

impl fmt::Display for TestKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of kit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KitSelection {
    pub kit: TestKit,
    /// Whether the kit came from the photo rather than the request
    pub inferred: bool,
}

impl KitSelection {
    /// Source label reported with the results
    pub fn source_label(&self) -> &'static str {
        if self.inferred {
            self.kit.auto_label()
        } else {
            self.kit.label()
        }
    }
}

/// Pick the kit for a photo of `width` x `height` given an optional hint
///
/// An absent hint, "auto", or any text naming no known kit falls back to the
/// aspect-ratio rule.
pub fn select_kit(test_type: Option<&str>, width: u32, height: u32) -> KitSelection {
    match test_type.and_then(TestKit::from_hint) {
        Some(kit) => KitSelection {
            kit,
            inferred: false,
        },
        None => KitSelection {
            kit: TestKit::from_dimensions(width, height),
            inferred: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_photo_selects_strip() {
        let selection = select_kit(None, 1200, 400);
        assert_eq!(selection.kit, TestKit::ApiStrip);
        assert!(selection.inferred);
        assert_eq!(selection.source_label(), "API Strip (auto)");
    }

    #[test]
    fn test_near_square_photo_selects_tubes() {
        let selection = select_kit(None, 1200, 1000);
        assert_eq!(selection.kit, TestKit::NtLabsTubes);
        assert_eq!(selection.source_label(), "NT Labs (auto)");
    }

    #[test]
    fn test_exact_ratio_two_is_not_a_strip() {
        assert_eq!(TestKit::from_dimensions(800, 400), TestKit::NtLabsTubes);
        assert_eq!(TestKit::from_dimensions(801, 400), TestKit::ApiStrip);
    }

    #[test]
    fn test_badge_hint_overrides_aspect_ratio() {
        let selection = select_kit(Some("seachem badge"), 1500, 500);
        assert_eq!(selection.kit, TestKit::SeachemBadge);
        assert!(!selection.inferred);
        assert_eq!(selection.source_label(), "Seachem Badge");
    }

    #[test]
    fn test_hints_case_insensitive() {
        assert_eq!(TestKit::from_hint("API"), Some(TestKit::ApiStrip));
        assert_eq!(TestKit::from_hint("Test Strip"), Some(TestKit::ApiStrip));
        assert_eq!(TestKit::from_hint("NT Labs"), Some(TestKit::NtLabsTubes));
        assert_eq!(TestKit::from_hint("TUBES"), Some(TestKit::NtLabsTubes));
        assert_eq!(TestKit::from_hint("auto"), None);
        assert_eq!(TestKit::from_hint(""), None);
    }

    #[test]
    fn test_auto_hint_uses_dimensions() {
        let selection = select_kit(Some("auto"), 300, 1000);
        assert_eq!(selection.kit, TestKit::NtLabsTubes);
        assert!(selection.inferred);
    }

    #[test]
    fn test_badge_never_inferred() {
        for (w, h) in [(100, 100), (1000, 10), (10, 1000)] {
            assert_ne!(TestKit::from_dimensions(w, h), TestKit::SeachemBadge);
        }
    }

    #[test]
    fn test_kit_parameter_lists() {
        assert_eq!(TestKit::SeachemBadge.parameters(), &[Parameter::Ammonia]);
        assert_eq!(TestKit::ApiStrip.parameters().len(), 5);
        assert_eq!(TestKit::NtLabsTubes.parameters().len(), 4);
    }
}
