//! Document processing orchestrator.
//!
//! Single entry point that drives the full pipeline:
//! classify → extract → fuse per-field confidence → cross-validate → aggregate.
//!
//! The engine is pure and infallible: no I/O, no locking, and no string
//! input can make it return an error. Every degradation is score-based and
//! local to the field or signal that caused it.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::models::enums::{ClassifierStrategy, DocumentType, FieldStatus};
use crate::models::schema::field_schema;
use crate::pipeline::classify::{self, Classification, TypeScores};
use crate::pipeline::confidence::{
    field_status, fuse_field, marksheet_table_penalty, overall_confidence, validate_cross_fields,
};
use crate::pipeline::extract::helpers::split_lines;
use crate::pipeline::extract::{extract_fields, parse_subject_table};
use crate::pipeline::types::{
    AnnotatedField, ConfidenceBreakdown, DocumentInput, ExtractionResult, LowConfidenceField,
    ResultMetadata,
};

/// Number of recognized-text lines carried into the result for review display.
const PREVIEW_LINES: usize = 30;

/// The confidence-scored extraction engine.
///
/// Stateless per call: identical inputs produce byte-identical results, so a
/// single engine can serve concurrent documents without locking.
pub struct ExtractionEngine {
    config: EngineConfig,
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ExtractionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline over one document input.
    pub fn process(&self, input: &DocumentInput) -> ExtractionResult {
        let classification = match input.document_type_hint {
            Some(doc_type) => {
                tracing::debug!(document_type = %doc_type, "classification bypassed by hint");
                Classification {
                    document_type: doc_type,
                    confidence: 100,
                    scores: TypeScores::default(),
                    strategy: ClassifierStrategy::Hint,
                }
            }
            None => classify::classify(&input.raw_text),
        };
        let doc_type = classification.document_type;

        let raw_fields = extract_fields(doc_type, &input.raw_text, input.spatial_boxes.as_deref());

        let table = if doc_type == DocumentType::Marksheet {
            parse_subject_table(&split_lines(&input.raw_text))
        } else {
            Vec::new()
        };

        let findings = validate_cross_fields(&raw_fields, self.config.max_dob_year);

        let mut fields: BTreeMap<String, AnnotatedField> = BTreeMap::new();
        for name in field_schema(doc_type) {
            let value = raw_fields.get(*name).cloned().flatten();
            let annotated = match value {
                Some(value) if !value.trim().is_empty() => {
                    let fused = fuse_field(
                        &self.config,
                        name,
                        &value,
                        input.ocr_word_stats.as_ref(),
                        input.image_quality_score,
                    );
                    let finding = findings.get(*name).cloned();
                    let adjustment = finding.as_ref().map_or(0, |f| f.adjustment);
                    let adjusted =
                        (i32::from(fused.final_confidence) + adjustment).max(0) as u8;
                    let threshold = self.config.field_threshold(name);
                    AnnotatedField {
                        value: Some(value),
                        confidence: adjusted,
                        breakdown: fused.breakdown,
                        threshold,
                        status: field_status(&self.config, adjusted, threshold),
                        cross_validation: finding,
                    }
                }
                _ => self.null_placeholder(name),
            };
            fields.insert((*name).to_string(), annotated);
        }

        let unpenalized = overall_confidence(&self.config, &fields);
        let (overall, table_penalty) = if doc_type == DocumentType::Marksheet {
            match marksheet_table_penalty(unpenalized, table.len()) {
                Some(penalty) => {
                    tracing::warn!(
                        original = penalty.original_confidence,
                        penalized = penalty.penalized_confidence,
                        rows = penalty.row_count,
                        "marksheet table penalty applied"
                    );
                    (penalty.penalized_confidence, Some(penalty))
                }
                None => (unpenalized, None),
            }
        } else {
            (unpenalized, None)
        };

        let low_confidence_fields: Vec<LowConfidenceField> = fields
            .iter()
            .filter(|(_, field)| {
                matches!(field.status, FieldStatus::Review | FieldStatus::Fail)
            })
            .map(|(name, field)| LowConfidenceField {
                field: name.clone(),
                confidence: field.confidence,
                threshold: field.threshold,
                status: field.status,
            })
            .collect();

        let suggest_rescan = overall < self.config.rescan_confidence_floor
            || low_confidence_fields.len() >= self.config.rescan_flag_count;
        if suggest_rescan {
            tracing::info!(
                overall,
                flagged = low_confidence_fields.len(),
                "document flagged for re-capture"
            );
        }

        ExtractionResult {
            document_type: doc_type,
            classification,
            fields,
            table,
            overall_confidence: overall,
            raw_text_preview: preview(&input.raw_text),
            metadata: ResultMetadata {
                low_confidence_count: low_confidence_fields.len(),
                low_confidence_fields,
                suggest_rescan,
                table_penalty,
            },
        }
    }

    /// Placeholder for a schema field the extractor did not resolve: null
    /// value, confidence 0, all-zero breakdown.
    fn null_placeholder(&self, name: &str) -> AnnotatedField {
        let threshold = self.config.field_threshold(name);
        AnnotatedField {
            value: None,
            confidence: 0,
            breakdown: ConfidenceBreakdown::default(),
            threshold,
            status: field_status(&self.config, 0, threshold),
            cross_validation: None,
        }
    }
}

fn preview(text: &str) -> String {
    text.lines()
        .take(PREVIEW_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}
