//! Subject-row table parsing for marksheets.
//!
//! OCR flattens the subject table into interleaved text lines, so rows are
//! recovered by scanning: a grade token plus a 1–3 digit marks number found
//! together in a rolling 4-line window yields one row, or subject / grade /
//! marks as three consecutive lines. Row count feeds the document-level
//! completeness penalty.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::helpers::title_case;

static RE_GRADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(A[1-4]|A1|A2|B|C|D|E|F)\b").unwrap());
static RE_MARKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,3})(?:\.\d+)?\b").unwrap());
static RE_SUBJECT_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(FIRST|SECOND|THIRD|FOURTH|FIFTH|LANGUAGE|CURRICULAR|CO-CURRICULAR|AREA|VALUE|EDUCATION|WORK|&|AND|THE|SUBJECT|SUBJECTS|GRADE|POINT|CODE)\b")
        .unwrap()
});
static RE_SUBJECT_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[():\-|,.\\/]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One recovered subject row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRow {
    pub subject: String,
    pub grade: String,
    pub marks: String,
}

/// Reduce an OCR subject cell to its subject word.
///
/// Strips ordinal/filler tokens and punctuation, then keeps the last
/// alphabetic token of length ≥ 3, title-cased.
pub fn clean_subject(raw: &str) -> Option<String> {
    let upper = raw.to_uppercase();
    let no_filler = RE_SUBJECT_FILLER.replace_all(&upper, " ");
    let no_punct = RE_SUBJECT_PUNCT.replace_all(&no_filler, " ");
    let collapsed = RE_WHITESPACE.replace_all(&no_punct, " ");
    let collapsed = collapsed.trim();
    if collapsed.is_empty() {
        return None;
    }
    for token in collapsed.split(' ').rev() {
        if token.len() >= 3 && token.chars().all(|c| c.is_alphabetic()) {
            return Some(title_case(token));
        }
    }
    Some(title_case(collapsed))
}

/// Parse subject rows from the recognized text lines.
///
/// Rows are deduplicated on (subject uppercased, grade, marks), input order
/// preserved.
pub fn parse_subject_table(lines: &[&str]) -> Vec<SubjectRow> {
    let mut rows = Vec::new();
    let n = lines.len();
    let mut used = vec![false; n];

    for i in 0..n {
        if used[i] {
            continue;
        }

        // Grade and marks anywhere in a 4-line window: subject is the window
        // text before the grade token.
        let end = (i + 4).min(n);
        let window = lines[i..end].join(" ");
        if let Some(grade_m) = RE_GRADE.find(&window) {
            if let Some(marks_m) = RE_MARKS.captures(&window) {
                if let Some(subject) = clean_subject(&window[..grade_m.start()]) {
                    rows.push(SubjectRow {
                        subject,
                        grade: grade_m.as_str().trim().to_string(),
                        marks: marks_m[1].trim().to_string(),
                    });
                    used[i..end].fill(true);
                    continue;
                }
            }
        }

        // Subject line, grade line, marks line as three consecutive lines.
        if i + 2 < n {
            if let (Some(grade_m), Some(marks_m)) =
                (RE_GRADE.find(lines[i + 1]), RE_MARKS.captures(lines[i + 2]))
            {
                if let Some(subject) = clean_subject(lines[i]) {
                    rows.push(SubjectRow {
                        subject,
                        grade: grade_m.as_str().trim().to_string(),
                        marks: marks_m[1].trim().to_string(),
                    });
                    used[i..=i + 2].fill(true);
                }
            }
        }
    }

    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert((row.subject.to_uppercase(), row.grade.clone(), row.marks.clone())));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_subject_keeps_last_alpha_token() {
        assert_eq!(
            clean_subject("FIRST LANGUAGE ENGLISH"),
            Some("English".to_string())
        );
        assert_eq!(clean_subject("MATHEMATICS (041)"), Some("Mathematics".to_string()));
        assert_eq!(clean_subject("  "), None);
    }

    #[test]
    fn clean_subject_drops_filler_only_input() {
        assert_eq!(clean_subject("SUBJECT GRADE POINT"), None);
    }

    #[test]
    fn inline_row_parsed_from_single_line() {
        let rows = parse_subject_table(&["MATHEMATICS A1 95"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "Mathematics");
        assert_eq!(rows[0].grade, "A1");
        assert_eq!(rows[0].marks, "95");
    }

    #[test]
    fn three_line_row_parsed() {
        let rows = parse_subject_table(&["SCIENCE", "B", "78"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "Science");
        assert_eq!(rows[0].grade, "B");
        assert_eq!(rows[0].marks, "78");
    }

    #[test]
    fn window_is_consumed_after_match() {
        // Both subjects land in separate windows; the second must not be
        // swallowed by the first window's consumption.
        let rows = parse_subject_table(&[
            "ENGLISH A1 91",
            "x",
            "y",
            "z",
            "MATHEMATICS A2 88",
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].subject, "Mathematics");
    }

    #[test]
    fn duplicate_rows_removed() {
        let rows = parse_subject_table(&["ENGLISH A1 91", "a", "b", "c", "ENGLISH A1 91"]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn no_rows_from_prose() {
        let rows = parse_subject_table(&["This certifies the student passed", "with distinction"]);
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_subject_table(&[]).is_empty());
    }
}
