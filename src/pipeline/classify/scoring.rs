//! Weighted-scoring classification: each document type accumulates points
//! from independent signals (identifier shape, issuer keywords, field
//! keywords, date shapes) and loses points for keywords tied to other types
//! or to non-final documents (applications, enrolment and learner forms,
//! sample papers). Recall-oriented counterpart to the keyword strategy.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::enums::DocumentType;

static RE_PAN_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").unwrap());
static RE_FATHERS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFATHER'?S? NAME\b").unwrap());
static RE_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}[/-]\d{2}[/-]\d{4}\b").unwrap());
static RE_AADHAAR_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\s*\d{4}\s*\d{4}\b").unwrap());
static RE_RELATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(S/O|D/O|C/O)\b").unwrap());
static RE_VOTER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,4}[0-9]{6,10}\b").unwrap());
static RE_EPIC_NO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bEPIC\s*NO\b").unwrap());
static RE_PART_NO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bPART\s*NO\b").unwrap());
static RE_DL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2}[0-9O]{6,20}\b").unwrap());
static RE_VALID_TILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bVALID\s*(TILL|UPTO)\b").unwrap());
static RE_VEHICLE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(LMV|MCWG|TRANS)\b").unwrap());
static RE_GRADE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(A1|A2|B1|B2|C1|C2|GRADE|CGPA)\b").unwrap());
static RE_INSTITUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(SCHOOL|COLLEGE|INSTITUTE)\b").unwrap());
static RE_ROLL_NO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bROLL\s*NO\b").unwrap());

/// Raw accumulated score per concrete document type, floored at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScores {
    pub pan: i32,
    pub aadhaar: i32,
    pub voter_id: i32,
    pub driving_licence: i32,
    pub marksheet: i32,
}

impl TypeScores {
    fn floor_at_zero(&mut self) {
        self.pan = self.pan.max(0);
        self.aadhaar = self.aadhaar.max(0);
        self.voter_id = self.voter_id.max(0);
        self.driving_licence = self.driving_licence.max(0);
        self.marksheet = self.marksheet.max(0);
    }

    /// Highest-scoring type; ties resolve in declaration order.
    pub fn best(&self) -> (DocumentType, i32) {
        let entries = [
            (DocumentType::Pan, self.pan),
            (DocumentType::Aadhaar, self.aadhaar),
            (DocumentType::VoterId, self.voter_id),
            (DocumentType::DrivingLicence, self.driving_licence),
            (DocumentType::Marksheet, self.marksheet),
        ];
        let mut best = entries[0];
        for entry in &entries[1..] {
            if entry.1 > best.1 {
                best = *entry;
            }
        }
        best
    }
}

/// Outcome of the weighted strategy.
#[derive(Debug, Clone)]
pub struct WeightedScore {
    pub document_type: DocumentType,
    pub confidence: u8,
    pub scores: TypeScores,
}

/// Score the recognized text against all five type profiles.
pub fn score_document(text: &str) -> WeightedScore {
    if text.trim().is_empty() {
        return WeightedScore {
            document_type: DocumentType::Unknown,
            confidence: 0,
            scores: TypeScores::default(),
        };
    }

    let txt = text.to_uppercase();
    let head500 = head(&txt, 500);
    let head300 = head(&txt, 300);
    let mut scores = TypeScores::default();

    // PAN
    if RE_PAN_SHAPE.is_match(&txt) {
        scores.pan += 50;
    }
    if head500.contains("INCOME TAX") {
        scores.pan += 40;
    }
    if head500.contains("PERMANENT ACCOUNT") {
        scores.pan += 30;
    }
    if txt.contains("GOVT. OF INDIA INCOME TAX") {
        scores.pan += 20;
    }
    if RE_FATHERS_NAME.is_match(&txt) {
        scores.pan += 15;
    }
    if RE_DATE_SHAPE.is_match(&txt) {
        scores.pan += 10;
    }
    if txt.contains("AADHAAR") || txt.contains("ELECTION") || txt.contains("DRIVING") {
        scores.pan -= 30;
    }
    if txt.contains("APPLICATION") || head300.contains("FORM") {
        scores.pan -= 20;
    }

    // Aadhaar
    if RE_AADHAAR_SHAPE.is_match(&txt) {
        scores.aadhaar += 50;
    }
    if head500.contains("UIDAI") {
        scores.aadhaar += 40;
    }
    if txt.contains("AADHAAR") || txt.contains("AADHAR") {
        scores.aadhaar += 30;
    }
    if txt.contains("UNIQUE IDENTIFICATION") {
        scores.aadhaar += 25;
    }
    if txt.contains("GOVERNMENT OF INDIA") {
        scores.aadhaar += 20;
    }
    if RE_RELATION.is_match(&txt) {
        scores.aadhaar += 15;
    }
    if txt.contains("VID") {
        scores.aadhaar += 10;
    }
    if txt.contains("INCOME TAX") || txt.contains("ELECTION") {
        scores.aadhaar -= 30;
    }
    if txt.contains("ENROLMENT") || head300.contains("APPLICATION") {
        scores.aadhaar -= 25;
    }

    // Voter ID
    if RE_VOTER_SHAPE.is_match(&txt) {
        scores.voter_id += 50;
    }
    if head500.contains("ELECTION COMMISSION") {
        scores.voter_id += 40;
    }
    if head500.contains("ELECTORAL") {
        scores.voter_id += 30;
    }
    if txt.contains("ELECTOR") {
        scores.voter_id += 25;
    }
    if RE_EPIC_NO.is_match(&txt) {
        scores.voter_id += 20;
    }
    if RE_PART_NO.is_match(&txt) {
        scores.voter_id += 15;
    }
    if txt.contains("AADHAAR") || txt.contains("INCOME TAX") || txt.contains("DRIVING") {
        scores.voter_id -= 30;
    }

    // Driving Licence
    if RE_DL_SHAPE.is_match(&txt) {
        scores.driving_licence += 50;
    }
    if head500.contains("DRIVING LICENCE") || head500.contains("DRIVING LICENSE") {
        scores.driving_licence += 40;
    }
    if head500.contains("TRANSPORT") {
        scores.driving_licence += 30;
    }
    if RE_VALID_TILL.is_match(&txt) {
        scores.driving_licence += 25;
    }
    if txt.contains("MOTOR VEHICLE") {
        scores.driving_licence += 20;
    }
    if RE_VEHICLE_CLASS.is_match(&txt) {
        scores.driving_licence += 15;
    }
    if txt.contains("AADHAAR") || txt.contains("INCOME TAX") || txt.contains("ELECTION") {
        scores.driving_licence -= 30;
    }
    if txt.contains("LEARNER") || head300.contains("APPLICATION") {
        scores.driving_licence -= 25;
    }

    // Marksheet
    if RE_GRADE_TOKEN.is_match(&txt) {
        scores.marksheet += 50;
    }
    if head500.contains("BOARD OF") {
        scores.marksheet += 40;
    }
    if head500.contains("EXAMINATION") {
        scores.marksheet += 35;
    }
    if txt.contains("MARKS") {
        scores.marksheet += 30;
    }
    if txt.contains("MARKSHEET") {
        scores.marksheet += 25;
    }
    if RE_INSTITUTION.is_match(&txt) {
        scores.marksheet += 20;
    }
    if RE_ROLL_NO.is_match(&txt) {
        scores.marksheet += 20;
    }
    if txt.contains("SUBJECT") {
        scores.marksheet += 15;
    }
    if txt.contains("SAMPLE PAPER") || txt.contains("PRACTICE") {
        scores.marksheet -= 30;
    }

    scores.floor_at_zero();

    let (best_type, best_score) = scores.best();
    if best_score == 0 {
        return WeightedScore {
            document_type: DocumentType::Unknown,
            confidence: 0,
            scores,
        };
    }

    WeightedScore {
        document_type: best_type,
        confidence: score_to_confidence(best_score),
        scores,
    }
}

/// Map a raw accumulated score onto 0–100 confidence.
///
/// Scores at or above 100 compress toward 95 (diminishing returns), [70,100)
/// passes through, [50,70) compresses toward 50, below 50 passes through.
fn score_to_confidence(score: i32) -> u8 {
    let confidence = if score >= 100 {
        (70.0 + f64::from(score - 70) * 0.5).min(95.0)
    } else if score >= 70 {
        f64::from(score)
    } else if score >= 50 {
        50.0 + f64::from(score - 50) * 0.5
    } else {
        f64::from(score)
    };
    confidence as u8
}

/// Character-safe prefix of at most `n` characters.
fn head(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_unknown_zero() {
        let result = score_document("   \n  ");
        assert_eq!(result.document_type, DocumentType::Unknown);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.scores, TypeScores::default());
    }

    #[test]
    fn aadhaar_signals_accumulate() {
        let text = "Government of India\nUIDAI\n1234 5678 9012\nS/O Ram Kumar";
        let result = score_document(text);
        assert_eq!(result.document_type, DocumentType::Aadhaar);
        // 50 (number) + 40 (UIDAI) + 20 (GoI) + 15 (S/O) = 125
        assert_eq!(result.scores.aadhaar, 125);
        assert_eq!(result.confidence, 95);
    }

    #[test]
    fn pan_shape_plus_issuer_wins() {
        let text = "INCOME TAX DEPARTMENT\nPermanent Account Number\nABCDE1234F";
        let result = score_document(text);
        assert_eq!(result.document_type, DocumentType::Pan);
        assert!(result.confidence >= 70, "got {}", result.confidence);
    }

    #[test]
    fn application_keyword_penalizes_pan() {
        let with_app = score_document("INCOME TAX\nABCDE1234F\nAPPLICATION");
        let without = score_document("INCOME TAX\nABCDE1234F");
        assert!(with_app.scores.pan < without.scores.pan);
    }

    #[test]
    fn scores_never_negative() {
        let result = score_document("APPLICATION FORM AADHAAR ENROLMENT");
        assert!(result.scores.pan >= 0);
        assert!(result.scores.driving_licence >= 0);
    }

    #[test]
    fn marksheet_grades_and_board() {
        let text = "BOARD OF SECONDARY EDUCATION\nEXAMINATION 2023\nMARKS\nROLL NO 1234567\nSUBJECT GRADE";
        let result = score_document(text);
        assert_eq!(result.document_type, DocumentType::Marksheet);
        assert!(result.confidence >= 70);
    }

    #[test]
    fn confidence_mapping_breakpoints() {
        assert_eq!(score_to_confidence(49), 49);
        assert_eq!(score_to_confidence(50), 50);
        assert_eq!(score_to_confidence(60), 55);
        assert_eq!(score_to_confidence(69), 59);
        assert_eq!(score_to_confidence(70), 70);
        assert_eq!(score_to_confidence(99), 99);
        assert_eq!(score_to_confidence(100), 85);
        assert_eq!(score_to_confidence(120), 95);
        assert_eq!(score_to_confidence(200), 95);
    }

    #[test]
    fn tie_resolves_in_declaration_order() {
        let scores = TypeScores {
            pan: 40,
            aadhaar: 40,
            ..TypeScores::default()
        };
        assert_eq!(scores.best().0, DocumentType::Pan);
    }

    #[test]
    fn head_is_char_safe() {
        assert_eq!(head("héllo", 2), "hé");
        assert_eq!(head("ab", 10), "ab");
    }
}
