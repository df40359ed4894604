use super::enums::DocumentType;

/// Fixed field schema per document type.
///
/// Every extraction for a type reports exactly these keys, with null for
/// anything not found. Downstream form layouts depend on this set never
/// varying between documents of the same type.
pub fn field_schema(doc_type: DocumentType) -> &'static [&'static str] {
    match doc_type {
        DocumentType::Pan => &["pan", "name", "father_name", "dob"],
        DocumentType::Aadhaar => &[
            "aadhaar_number",
            "name",
            "dob",
            "gender",
            "father_name",
            "address",
            "mobile",
        ],
        DocumentType::VoterId => &[
            "voter_id",
            "name",
            "father_name",
            "husband_name",
            "dob",
            "gender",
        ],
        DocumentType::DrivingLicence => &[
            "dl_number",
            "name",
            "dob",
            "issue_date",
            "valid_till",
            "father_name",
            "address",
        ],
        DocumentType::Marksheet => &[
            "student_name",
            "father_name",
            "mother_name",
            "school_name",
            "dob",
            "roll_no",
            "year",
            "cgpa",
        ],
        DocumentType::Unknown => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_concrete_type_has_a_schema() {
        for ty in DocumentType::CONCRETE {
            assert!(!field_schema(ty).is_empty(), "{ty} has empty schema");
        }
    }

    #[test]
    fn unknown_schema_is_empty() {
        assert!(field_schema(DocumentType::Unknown).is_empty());
    }

    #[test]
    fn schema_keys_are_unique() {
        for ty in DocumentType::CONCRETE {
            let keys = field_schema(ty);
            let mut sorted: Vec<_> = keys.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), keys.len(), "{ty} has duplicate keys");
        }
    }
}
