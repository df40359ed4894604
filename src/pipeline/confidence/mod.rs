//! Per-field confidence scoring and document-level aggregation.
//!
//! Four independent signals — pattern plausibility, business-rule sanity,
//! page-level OCR word confidence, and image quality — fuse into one 0–100
//! score per field. Cross-field checks then adjust scores downward for
//! logical contradictions, and the aggregator rolls the adjusted scores into
//! one document confidence.

pub mod aggregate;
pub mod business;
pub mod cross_validate;
pub mod fuse;
pub mod pattern;

pub use aggregate::{marksheet_table_penalty, overall_confidence};
pub use business::business_confidence;
pub use cross_validate::validate_cross_fields;
pub use fuse::{field_status, fuse_field, FusedConfidence};
pub use pattern::pattern_confidence;
