use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::enums::DocumentType;
use crate::models::schema::field_schema;

/// Flat field-name → raw-value map produced by one extractor. Always carries
/// the full fixed schema of its document type, null for unfound fields.
pub type RawFieldMap = BTreeMap<String, Option<String>>;

/// The all-null baseline for a document type.
pub fn empty_field_map(doc_type: DocumentType) -> RawFieldMap {
    field_schema(doc_type)
        .iter()
        .map(|name| ((*name).to_string(), None))
        .collect()
}

/// Axis-aligned box in page coordinates, (x1, y1) top-left.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn center_y(&self) -> f32 {
        (self.y1 + self.y2) / 2.0
    }
}

/// A recognized text snippet with its location, from an external detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledBox {
    pub text: String,
    pub bounding_box: BoundingBox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_carries_full_schema() {
        let map = empty_field_map(DocumentType::Aadhaar);
        assert_eq!(map.len(), 7);
        assert!(map.values().all(Option::is_none));
        assert!(map.contains_key("aadhaar_number"));
        assert!(map.contains_key("mobile"));
    }

    #[test]
    fn unknown_map_is_empty() {
        assert!(empty_field_map(DocumentType::Unknown).is_empty());
    }
}
