//! Engine configuration: fusion weights, per-field thresholds and importance
//! weights, and missing-signal defaults.
//!
//! All tables are immutable data owned by the engine. The numeric values are
//! hand-tuned against a review corpus; changing a breakpoint changes which
//! fields land in PASS/REVIEW/FAIL, so treat them as behavior, not styling.

use chrono::{Datelike, Utc};
use serde::Serialize;

/// Per-field acceptance thresholds. Fields not listed use
/// [`EngineConfig::default_field_threshold`].
const FIELD_THRESHOLDS: &[(&str, u8)] = &[
    // Identifier fields
    ("aadhaar_number", 75),
    ("pan", 75),
    ("voter_id", 75),
    ("dl_number", 75),
    ("roll_no", 75),
    // Names
    ("name", 75),
    ("student_name", 75),
    ("dob", 70),
    ("father_name", 75),
    ("mother_name", 75),
    // Contact
    ("mobile", 80),
    ("address", 75),
    // Dates
    ("issue_date", 70),
    ("valid_till", 70),
    ("year", 75),
    // Other
    ("gender", 75),
    ("school_name", 75),
    ("cgpa", 70),
];

/// Relative importance of each field in the document-level aggregate.
/// Unlisted fields weigh 1.0.
const IMPORTANCE_WEIGHTS: &[(&str, f64)] = &[
    ("aadhaar_number", 1.5),
    ("pan", 1.5),
    ("voter_id", 1.5),
    ("dl_number", 1.5),
    ("name", 1.3),
    ("student_name", 1.3),
    ("dob", 1.2),
    ("father_name", 1.0),
    ("mother_name", 0.9),
    ("mobile", 1.0),
    ("address", 0.9),
    ("issue_date", 0.8),
    ("valid_till", 0.8),
    ("year", 0.8),
    ("gender", 0.7),
    ("school_name", 0.8),
    ("roll_no", 1.0),
    ("cgpa", 0.7),
];

/// Weights used to fuse the four per-field confidence components.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FusionWeights {
    pub ocr: f64,
    pub pattern: f64,
    pub quality: f64,
    pub business: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            ocr: 0.40,
            pattern: 0.30,
            quality: 0.20,
            business: 0.10,
        }
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fusion: FusionWeights,
    /// Neutral image-quality score used when no quality signal is supplied.
    pub default_image_quality: f64,
    /// Threshold for fields not in the static table.
    pub default_field_threshold: u8,
    /// A field within this many points below its threshold is REVIEW, not FAIL.
    pub review_band: u8,
    /// Overall confidence below this suggests re-capturing the document.
    pub rescan_confidence_floor: u8,
    /// This many REVIEW/FAIL fields also suggests re-capture.
    pub rescan_flag_count: usize,
    /// Latest birth year accepted by cross-field date validation.
    pub max_dob_year: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fusion: FusionWeights::default(),
            default_image_quality: 75.0,
            default_field_threshold: 80,
            review_band: 10,
            rescan_confidence_floor: 70,
            rescan_flag_count: 3,
            max_dob_year: Utc::now().year(),
        }
    }
}

impl EngineConfig {
    /// Acceptance threshold for a field name.
    pub fn field_threshold(&self, field: &str) -> u8 {
        FIELD_THRESHOLDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, t)| *t)
            .unwrap_or(self.default_field_threshold)
    }

    /// Importance weight for a field name in the document aggregate.
    pub fn importance_weight(&self, field: &str) -> f64 {
        IMPORTANCE_WEIGHTS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, w)| *w)
            .unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_thresholds_are_75() {
        let config = EngineConfig::default();
        for field in ["aadhaar_number", "pan", "voter_id", "dl_number"] {
            assert_eq!(config.field_threshold(field), 75);
        }
    }

    #[test]
    fn unlisted_field_uses_default_threshold() {
        let config = EngineConfig::default();
        assert_eq!(config.field_threshold("husband_name"), 80);
    }

    #[test]
    fn identifiers_outweigh_secondary_fields() {
        let config = EngineConfig::default();
        assert!(config.importance_weight("pan") > config.importance_weight("gender"));
        assert!(config.importance_weight("name") > config.importance_weight("address"));
    }

    #[test]
    fn fusion_weights_sum_to_one() {
        let w = FusionWeights::default();
        let sum = w.ocr + w.pattern + w.quality + w.business;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn max_dob_year_is_current_year() {
        let config = EngineConfig::default();
        assert!(config.max_dob_year >= 2024);
    }
}
