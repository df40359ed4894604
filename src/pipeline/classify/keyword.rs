//! Keyword classification: ordered exact-match rules, first hit wins.
//! Precision-oriented; returns no numeric confidence. Kept as the fallback
//! under the weighted strategy for documents the scorer is unsure about.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::enums::DocumentType;

static RE_PAN_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").unwrap());
static RE_AADHAAR_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\s*\d{4}\s*\d{4}\b").unwrap());

const AADHAAR_KEYWORDS: &[&str] = &["AADHAAR", "AADHAR", "UNIQUE IDENTIFICATION", "UIDAI"];
const LICENCE_KEYWORDS: &[&str] = &["DRIVING LICENCE", "DRIVING LICENSE", "TRANSPORT AUTHORITY"];
const VOTER_KEYWORDS: &[&str] = &["ELECTION COMMISSION", "ELECTOR", "EPIC NO"];
const MARKSHEET_KEYWORDS: &[&str] = &["MARKSHEET", "MARKS MEMO", "GRADE POINT", "CGPA", "BOARD OF"];

/// Classify by exact keyword/shape triggers. First matching rule wins.
pub fn classify_keyword(text: &str) -> DocumentType {
    if text.trim().is_empty() {
        return DocumentType::Unknown;
    }

    let txt = text.to_uppercase();

    if RE_PAN_SHAPE.is_match(&txt) {
        return DocumentType::Pan;
    }
    if txt.contains("INCOME TAX") || txt.contains("PERMANENT ACCOUNT") {
        return DocumentType::Pan;
    }

    // An Aadhaar-shaped number alone is not enough; any 12-digit group
    // matches, so require an issuer keyword alongside it.
    if RE_AADHAAR_SHAPE.is_match(&txt) && AADHAAR_KEYWORDS.iter().any(|kw| txt.contains(kw)) {
        return DocumentType::Aadhaar;
    }

    if LICENCE_KEYWORDS.iter().any(|kw| txt.contains(kw)) {
        return DocumentType::DrivingLicence;
    }

    if VOTER_KEYWORDS.iter().any(|kw| txt.contains(kw)) {
        return DocumentType::VoterId;
    }

    if MARKSHEET_KEYWORDS.iter().any(|kw| txt.contains(kw)) {
        return DocumentType::Marksheet;
    }

    DocumentType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_unknown() {
        assert_eq!(classify_keyword(""), DocumentType::Unknown);
        assert_eq!(classify_keyword("   "), DocumentType::Unknown);
    }

    #[test]
    fn pan_shape_wins() {
        assert_eq!(classify_keyword("ABCDE1234F"), DocumentType::Pan);
    }

    #[test]
    fn pan_issuer_keyword_wins() {
        assert_eq!(
            classify_keyword("Income Tax Department"),
            DocumentType::Pan
        );
    }

    #[test]
    fn aadhaar_number_alone_not_enough() {
        assert_eq!(classify_keyword("1234 5678 9012"), DocumentType::Unknown);
    }

    #[test]
    fn aadhaar_number_with_keyword() {
        assert_eq!(
            classify_keyword("1234 5678 9012\nUIDAI"),
            DocumentType::Aadhaar
        );
    }

    #[test]
    fn licence_keywords() {
        assert_eq!(
            classify_keyword("Driving Licence\nDL05 20110012345"),
            DocumentType::DrivingLicence
        );
    }

    #[test]
    fn voter_keywords() {
        assert_eq!(
            classify_keyword("Election Commission of India"),
            DocumentType::VoterId
        );
    }

    #[test]
    fn marksheet_keywords() {
        assert_eq!(classify_keyword("CGPA 9.2"), DocumentType::Marksheet);
    }

    #[test]
    fn pan_rule_precedes_marksheet_rule() {
        // Both a PAN shape and a marksheet keyword: first rule wins.
        assert_eq!(classify_keyword("ABCDE1234F CGPA 9.2"), DocumentType::Pan);
    }

    #[test]
    fn unrelated_text_is_unknown() {
        assert_eq!(
            classify_keyword("Dear sir, please find attached"),
            DocumentType::Unknown
        );
    }
}
