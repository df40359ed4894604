//! Per-type field extractors. One extractor per document type, each a pure
//! function from recognized text (plus optional spatial boxes) to the type's
//! full fixed field schema. Extractors share cleanup helpers but no other
//! structure; their internal steps are unrelated.

pub mod aadhaar;
pub mod helpers;
pub mod licence;
pub mod marksheet;
pub mod pan;
pub mod table;
pub mod types;
pub mod voter;

pub use table::{parse_subject_table, SubjectRow};
pub use types::{empty_field_map, BoundingBox, LabeledBox, RawFieldMap};

use crate::models::enums::DocumentType;

/// Run the extractor for a document type.
///
/// Always returns the type's full schema with null for unfound fields.
/// Unknown documents get an empty map — no extractor runs.
pub fn extract_fields(
    doc_type: DocumentType,
    text: &str,
    boxes: Option<&[LabeledBox]>,
) -> RawFieldMap {
    match doc_type {
        DocumentType::Pan => pan::extract(text),
        DocumentType::Aadhaar => aadhaar::extract(text),
        DocumentType::VoterId => voter::extract(text, boxes),
        DocumentType::DrivingLicence => licence::extract(text),
        DocumentType::Marksheet => marksheet::extract(text),
        DocumentType::Unknown => RawFieldMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schema::field_schema;

    #[test]
    fn empty_text_still_reports_full_schema() {
        for ty in DocumentType::CONCRETE {
            let map = extract_fields(ty, "", None);
            let schema = field_schema(ty);
            assert_eq!(map.len(), schema.len(), "{ty} schema size mismatch");
            for key in schema {
                assert!(map.contains_key(*key), "{ty} missing key {key}");
                assert!(map[*key].is_none(), "{ty} key {key} should be null");
            }
        }
    }

    #[test]
    fn unknown_type_extracts_nothing() {
        let map = extract_fields(DocumentType::Unknown, "some text", None);
        assert!(map.is_empty());
    }

    #[test]
    fn gibberish_text_reports_full_schema_of_nulls() {
        let map = extract_fields(DocumentType::Pan, "zz@@##!!", None);
        assert_eq!(map.len(), 4);
        assert!(map.values().all(Option::is_none));
    }
}
