pub mod keyword;
pub mod scoring;

pub use keyword::classify_keyword;
pub use scoring::{score_document, TypeScores, WeightedScore};

use serde::{Deserialize, Serialize};

use crate::models::enums::{ClassifierStrategy, DocumentType};

/// Document-type decision with its evidence. Produced once per document and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub document_type: DocumentType,
    pub confidence: u8,
    pub scores: TypeScores,
    pub strategy: ClassifierStrategy,
}

/// Combine both strategies.
///
/// The weighted scorer wins outright at confidence ≥ 70. Below that, the
/// precision-oriented keyword rules take over; if they also come up empty
/// but the scorer still has some evidence (≥ 50), its guess is preferred
/// over declaring Unknown. Any non-Unknown answer beats Unknown.
pub fn classify(text: &str) -> Classification {
    let scored = score_document(text);

    if scored.confidence >= 70 {
        tracing::debug!(
            document_type = %scored.document_type,
            confidence = scored.confidence,
            "weighted classification accepted"
        );
        return Classification {
            document_type: scored.document_type,
            confidence: scored.confidence,
            scores: scored.scores,
            strategy: ClassifierStrategy::WeightedScoring,
        };
    }

    let keyword_type = classify_keyword(text);
    tracing::debug!(
        keyword_type = %keyword_type,
        weighted_confidence = scored.confidence,
        "keyword fallback"
    );

    if keyword_type != DocumentType::Unknown {
        return Classification {
            document_type: keyword_type,
            confidence: scored.confidence,
            scores: scored.scores,
            strategy: ClassifierStrategy::KeywordRule,
        };
    }

    if scored.confidence >= 50 {
        tracing::debug!(
            document_type = %scored.document_type,
            confidence = scored.confidence,
            "keyword rules empty, using weighted guess"
        );
        return Classification {
            document_type: scored.document_type,
            confidence: scored.confidence,
            scores: scored.scores,
            strategy: ClassifierStrategy::ScoreFallback,
        };
    }

    Classification {
        document_type: DocumentType::Unknown,
        confidence: scored.confidence,
        scores: scored.scores,
        strategy: ClassifierStrategy::KeywordRule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_weighted_evidence_wins() {
        let text = "Government of India\nUIDAI\n1234 5678 9012\nS/O Ram Kumar";
        let result = classify(text);
        assert_eq!(result.document_type, DocumentType::Aadhaar);
        assert_eq!(result.strategy, ClassifierStrategy::WeightedScoring);
        assert!(result.confidence >= 70);
    }

    #[test]
    fn keyword_rule_resolves_weak_scorer() {
        // PAN shape alone scores 50 (< 70 after mapping) but the keyword
        // rule triggers on the exact shape.
        let text = "ABCDE1234F";
        let result = classify(text);
        assert_eq!(result.document_type, DocumentType::Pan);
    }

    #[test]
    fn empty_text_is_unknown_zero() {
        let result = classify("");
        assert_eq!(result.document_type, DocumentType::Unknown);
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn weighted_guess_preferred_over_unknown() {
        // "ELECTOR" (25) + voter shape (50) = 75 → passes outright; use a
        // weaker mix: ELECTORAL outside head window won't score, so craft
        // a mid-evidence marksheet: MARKS (30) + SUBJECT (15) + school (20)
        // = 65 → confidence 57, keyword rules silent.
        let text = "MARKS OBTAINED\nSUBJECT LIST\nLITTLE FLOWER SCHOOL";
        let result = classify(text);
        assert_eq!(result.document_type, DocumentType::Marksheet);
        assert_eq!(result.strategy, ClassifierStrategy::ScoreFallback);
        assert!(result.confidence >= 50 && result.confidence < 70);
    }

    #[test]
    fn gibberish_stays_unknown() {
        let result = classify("lorem ipsum dolor sit amet");
        assert_eq!(result.document_type, DocumentType::Unknown);
    }
}
