use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::classify::Classification;
use super::extract::{LabeledBox, SubjectRow};
use crate::models::enums::{DocumentType, FieldStatus};

/// Everything the engine consumes for one document, assembled by the caller
/// from the OCR engine, the box detector, and the capture-quality check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    pub raw_text: String,
    /// Skips classification entirely when set.
    pub document_type_hint: Option<DocumentType>,
    /// Spatially located label/value snippets from an external detector.
    pub spatial_boxes: Option<Vec<LabeledBox>>,
    /// Page-level OCR word-confidence statistics.
    pub ocr_word_stats: Option<OcrWordStats>,
    /// Page-level image quality, 0–100.
    pub image_quality_score: Option<f64>,
}

/// Summary statistics over the OCR engine's per-word confidences for a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrWordStats {
    pub average: f64,
    pub median: f64,
    pub min: u8,
    pub max: u8,
    pub word_count: usize,
    pub low_conf_words: usize,
    pub high_conf_words: usize,
}

impl OcrWordStats {
    /// Build stats from a per-word confidence list (each 0–100).
    ///
    /// Low-confidence words are those below 70, high-confidence at or above
    /// 85. Average and median are rounded to two decimals.
    pub fn from_confidences(confidences: &[u8]) -> Self {
        if confidences.is_empty() {
            return Self::default();
        }

        let sum: u32 = confidences.iter().map(|&c| u32::from(c)).sum();
        let average = round2(f64::from(sum) / confidences.len() as f64);

        let mut sorted = confidences.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            round2((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
        } else {
            f64::from(sorted[mid])
        };

        Self {
            average,
            median,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            word_count: confidences.len(),
            low_conf_words: confidences.iter().filter(|&&c| c < 70).count(),
            high_conf_words: confidences.iter().filter(|&&c| c >= 85).count(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// The four component scores that fused into a field's final confidence.
/// Read-only once produced; cross-field adjustment touches the final score,
/// never the breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub tesseract_ocr: f64,
    pub pattern_match: u8,
    pub image_quality: f64,
    pub business_rules: u8,
}

/// Outcome of one cross-field plausibility check. Only fields subject to a
/// semantic check carry a finding; absence means "not checked", not "valid".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossValidationFinding {
    pub valid: bool,
    /// Signed confidence delta, zero or negative.
    pub adjustment: i32,
    pub reason: String,
}

/// One extracted field with its confidence verdict — the externally visible
/// unit. Unresolved schema fields appear with a null value and confidence 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedField {
    pub value: Option<String>,
    pub confidence: u8,
    pub breakdown: ConfidenceBreakdown,
    pub threshold: u8,
    pub status: FieldStatus,
    pub cross_validation: Option<CrossValidationFinding>,
}

/// A field flagged for human attention in the result metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowConfidenceField {
    pub field: String,
    pub confidence: u8,
    pub threshold: u8,
    pub status: FieldStatus,
}

/// Record of the structural completeness penalty applied to tabular types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablePenalty {
    pub original_confidence: u8,
    pub penalized_confidence: u8,
    pub multiplier: f64,
    pub row_count: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub low_confidence_fields: Vec<LowConfidenceField>,
    pub low_confidence_count: usize,
    pub suggest_rescan: bool,
    pub table_penalty: Option<TablePenalty>,
}

/// Complete engine output for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub document_type: DocumentType,
    pub classification: Classification,
    pub fields: BTreeMap<String, AnnotatedField>,
    /// Subject rows, populated only for tabular document types.
    pub table: Vec<SubjectRow>,
    pub overall_confidence: u8,
    /// First 30 lines of the recognized text, for review display.
    pub raw_text_preview: String,
    pub metadata: ResultMetadata,
}
