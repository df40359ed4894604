//! Weighted fusion of the four per-field confidence signals.
//!
//! OCR word confidence and image quality are page-level signals shared by
//! every field on the document; pattern and business scores are computed per
//! field. Missing page-level signals degrade to proxies rather than failing:
//! the pattern score stands in for OCR confidence, and a fixed neutral
//! default stands in for image quality.

use crate::config::EngineConfig;
use crate::models::enums::FieldStatus;
use crate::pipeline::types::{ConfidenceBreakdown, OcrWordStats};

use super::business::business_confidence;
use super::pattern::pattern_confidence;

/// A field's fused confidence with its component breakdown.
#[derive(Debug, Clone)]
pub struct FusedConfidence {
    pub final_confidence: u8,
    pub breakdown: ConfidenceBreakdown,
}

/// Fuse the four signals for one resolved field value.
pub fn fuse_field(
    config: &EngineConfig,
    field_name: &str,
    value: &str,
    ocr_stats: Option<&OcrWordStats>,
    image_quality: Option<f64>,
) -> FusedConfidence {
    let pattern = pattern_confidence(field_name, value);
    let business = business_confidence(field_name, value);

    let ocr = match ocr_stats {
        Some(stats) => stats.average,
        None => {
            tracing::debug!(field = field_name, "no OCR stats, pattern score as proxy");
            f64::from(pattern)
        }
    };

    let quality = match image_quality {
        Some(quality) => quality,
        None => {
            tracing::debug!(
                field = field_name,
                default = config.default_image_quality,
                "no image quality signal, using neutral default"
            );
            config.default_image_quality
        }
    };

    let weights = &config.fusion;
    let fused = ocr * weights.ocr
        + f64::from(pattern) * weights.pattern
        + quality * weights.quality
        + f64::from(business) * weights.business;

    FusedConfidence {
        final_confidence: fused.round() as u8,
        breakdown: ConfidenceBreakdown {
            tesseract_ocr: round1(ocr),
            pattern_match: pattern,
            image_quality: round1(quality),
            business_rules: business,
        },
    }
}

/// Bucket a final (post-adjustment) confidence against a field threshold.
pub fn field_status(config: &EngineConfig, confidence: u8, threshold: u8) -> FieldStatus {
    if confidence >= threshold {
        FieldStatus::Pass
    } else if u32::from(confidence) + u32::from(config.review_band) >= u32::from(threshold) {
        FieldStatus::Review
    } else {
        FieldStatus::Fail
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
