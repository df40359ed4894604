//! Veridoc — document classification and confidence-scored field extraction.
//!
//! Takes noisy OCR text (plus optional spatial label boxes, OCR word-confidence
//! stats, and a page quality score) and produces a typed, per-field
//! confidence-annotated extraction result. The engine is pure and stateless:
//! identical inputs always produce identical output, no I/O is performed, and
//! no input string can make it fail — degradation is score-based throughout.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod quality;

pub use config::EngineConfig;
pub use models::enums::{ClassifierStrategy, DocumentType, FieldStatus};
pub use pipeline::processor::ExtractionEngine;
pub use pipeline::types::{DocumentInput, ExtractionResult, OcrWordStats};
