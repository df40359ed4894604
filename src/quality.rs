//! Page-level image-quality scoring from raw capture metrics.
//!
//! The engine consumes a single 0–100 quality score as one of its four
//! confidence signals. Callers that measure sharpness/brightness/contrast
//! during preprocessing can derive that score here; the pixel work itself
//! (decoding, Laplacian, histogram) belongs to the capture layer.

use serde::{Deserialize, Serialize};

/// Raw metrics measured from the captured page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Variance of the Laplacian over the greyscale page. Sharp text ≥ 100.
    pub sharpness: f64,
    /// Mean greyscale brightness, 0–255.
    pub brightness: f64,
    /// Greyscale standard deviation.
    pub contrast: f64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Good,
    Blurry,
    PoorLighting,
    LowContrast,
}

/// Quality assessment: level, 0–100 score, and human-readable issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub level: QualityLevel,
    pub score: u8,
    pub issues: Vec<String>,
    pub needs_preprocessing: bool,
}

/// Score a page from its raw metrics.
///
/// Component scores are each capped at 100 and combined
/// 40% sharpness, 30% contrast, 20% brightness, 10% resolution.
pub fn assess_quality(metrics: &QualityMetrics) -> QualityReport {
    let sharpness_score = (metrics.sharpness / 500.0 * 100.0).min(100.0);
    let contrast_score = (metrics.contrast / 80.0 * 100.0).min(100.0);
    let brightness_score = 100.0 - (metrics.brightness - 127.0).abs() / 1.27;
    let min_dim = metrics.width.min(metrics.height);
    let resolution_score = (f64::from(min_dim) / 800.0 * 100.0).min(100.0);

    let score = (sharpness_score * 0.4
        + contrast_score * 0.3
        + brightness_score * 0.2
        + resolution_score * 0.1) as u8;

    let mut level = QualityLevel::Good;
    let mut issues = Vec::new();

    if metrics.sharpness < 100.0 {
        level = QualityLevel::Blurry;
        issues.push("Image is blurry - text edges not sharp".to_string());
    }

    if metrics.brightness < 50.0 {
        level = QualityLevel::PoorLighting;
        issues.push("Image too dark - insufficient lighting".to_string());
    } else if metrics.brightness > 200.0 {
        level = QualityLevel::PoorLighting;
        issues.push("Image too bright - overexposed".to_string());
    }

    if metrics.contrast < 30.0 {
        level = QualityLevel::LowContrast;
        issues.push("Low contrast - text hard to distinguish from background".to_string());
    }

    if min_dim < 600 {
        issues.push(format!(
            "Low resolution ({}x{}) - recommend 800px minimum",
            metrics.width, metrics.height
        ));
    }

    let needs_preprocessing = level != QualityLevel::Good || !issues.is_empty();

    QualityReport {
        level,
        score,
        issues,
        needs_preprocessing,
    }
}
