//! Marksheet field extraction.
//!
//! Board marksheets lay the candidate block out as three consecutive lines
//! (student / father / mother) after the roll-number anchor line, so the name
//! extraction is positional with labelled captures layered on top. Subject
//! rows are parsed separately in [`super::table`].

use std::sync::LazyLock;

use regex::Regex;

use super::helpers::split_lines;
use super::types::{empty_field_map, RawFieldMap};
use crate::models::enums::DocumentType;

static RE_SCHOOL_LABELLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^SCHOOL\s*[:\-]?\s*.+").unwrap());
static RE_INSTITUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(SCHOOL|INSTITUTE|COLLEGE)\b").unwrap());
static RE_ROLL_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bROLL\b").unwrap());
static RE_ROLL_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bROLL\s*(?:NO)?\.?\s*[:\-]?\s*([0-9]{7,12})\b").unwrap()
});
static RE_BARE_ROLL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{7,12}$").unwrap());
static RE_DOB_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:DOB|DATE\s*OF\s*BIRTH)[\s:\-]*([0-3]?\d[/\-.][01]?\d[/\-.]\d{4})\b")
        .unwrap()
});
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-3]?\d[/\-.][01]?\d[/\-.]\d{4})\b").unwrap());
static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)EXAMINATION\s+held\s+in\s+\w+-?(20\d{2})").unwrap());
static RE_CGPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:CGPA|GPA|GRADE\s*POINT)[\s.:;\-]*([0-9]{1,2}\.[0-9]{1,2})").unwrap()
});
static RE_NAME_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(REGULAR|ROLL|PC/)").unwrap());
static RE_CERTIFIED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CERTIFIED\s+THAT\s+([A-Z\s]+)").unwrap());
static RE_FATHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FATHER'?S\s+NAME\s+([A-Z\s]+)").unwrap());
static RE_MOTHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)MOTHER'?S\s+NAME\s+([A-Z\s]+)").unwrap());

pub fn extract(text: &str) -> RawFieldMap {
    let mut fields = empty_field_map(DocumentType::Marksheet);
    let lines = split_lines(text);

    extract_school(&lines, &mut fields);
    extract_roll(&lines, &mut fields);

    let dob = RE_DOB_LABELLED
        .captures(text)
        .or_else(|| RE_DATE.captures(text))
        .map(|caps| caps[1].to_string());
    fields.insert("dob".into(), dob);

    for line in &lines {
        if let Some(caps) = RE_YEAR.captures(line) {
            fields.insert("year".into(), Some(caps[1].to_string()));
            break;
        }
    }

    if let Some(caps) = RE_CGPA.captures(text) {
        fields.insert("cgpa".into(), Some(caps[1].to_string()));
    }

    extract_names(&lines, &mut fields);

    fields
}

fn extract_school(lines: &[&str], fields: &mut RawFieldMap) {
    for line in lines {
        if RE_SCHOOL_LABELLED.is_match(line) {
            fields.insert("school_name".into(), Some(line.trim().to_string()));
            return;
        }
    }
    for line in lines {
        if RE_INSTITUTION.is_match(line) {
            fields.insert("school_name".into(), Some(line.trim().to_string()));
            return;
        }
    }
}

fn extract_roll(lines: &[&str], fields: &mut RawFieldMap) {
    for (i, line) in lines.iter().enumerate() {
        if !RE_ROLL_LABEL.is_match(line) {
            continue;
        }
        if let Some(caps) = RE_ROLL_VALUE.captures(line) {
            fields.insert("roll_no".into(), Some(caps[1].to_string()));
            return;
        }
        if let Some(next) = lines.get(i + 1) {
            if RE_BARE_ROLL.is_match(next.trim()) {
                fields.insert("roll_no".into(), Some(next.trim().to_string()));
                return;
            }
        }
    }
}

/// The candidate block: student, father and mother names on the three lines
/// after the roll/regular anchor line, each with a labelled capture and a
/// whole-line fallback.
fn extract_names(lines: &[&str], fields: &mut RawFieldMap) {
    for (i, line) in lines.iter().enumerate() {
        if !RE_NAME_ANCHOR.is_match(line) {
            continue;
        }

        if let Some(next) = lines.get(i + 1) {
            let value = RE_CERTIFIED
                .captures(next)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_else(|| next.trim().to_string());
            fields.insert("student_name".into(), Some(value));
        }
        if let Some(next) = lines.get(i + 2) {
            let value = RE_FATHER
                .captures(next)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_else(|| next.trim().to_string());
            fields.insert("father_name".into(), Some(value));
        }
        if let Some(next) = lines.get(i + 3) {
            let value = RE_MOTHER
                .captures(next)
                .map(|caps| caps[1].trim().to_string())
                .unwrap_or_else(|| next.trim().to_string());
            fields.insert("mother_name".into(), Some(value));
        }
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "BOARD OF SECONDARY EDUCATION\n\
        LITTLE FLOWER SCHOOL\n\
        ROLL NO: 123456789\n\
        CERTIFIED THAT AMIT VERMA\n\
        FATHER'S NAME SUNIL VERMA\n\
        MOTHER'S NAME ANITA VERMA\n\
        DOB: 05/06/2006\n\
        EXAMINATION held in March-2022\n\
        CGPA: 9.2";

    #[test]
    fn school_from_institution_keyword() {
        let fields = extract(SAMPLE);
        assert_eq!(
            fields["school_name"].as_deref(),
            Some("LITTLE FLOWER SCHOOL")
        );
    }

    #[test]
    fn school_label_line_kept_whole() {
        let fields = extract("SCHOOL: ST MARYS CONVENT\nROLL NO 123456789");
        assert_eq!(
            fields["school_name"].as_deref(),
            Some("SCHOOL: ST MARYS CONVENT")
        );
    }

    #[test]
    fn roll_number_on_label_line() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["roll_no"].as_deref(), Some("123456789"));
    }

    #[test]
    fn roll_number_on_following_line() {
        let fields = extract("ROLL NO\n987654321");
        assert_eq!(fields["roll_no"].as_deref(), Some("987654321"));
    }

    #[test]
    fn year_from_examination_line() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["year"].as_deref(), Some("2022"));
    }

    #[test]
    fn cgpa_from_label() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["cgpa"].as_deref(), Some("9.2"));
    }

    #[test]
    fn candidate_block_after_roll_anchor() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["student_name"].as_deref(), Some("AMIT VERMA"));
        assert_eq!(fields["father_name"].as_deref(), Some("SUNIL VERMA"));
        assert_eq!(fields["mother_name"].as_deref(), Some("ANITA VERMA"));
    }

    #[test]
    fn dob_extracted() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["dob"].as_deref(), Some("05/06/2006"));
    }

    #[test]
    fn empty_text_gives_all_null_schema() {
        let fields = extract("");
        assert_eq!(fields.len(), 8);
        assert!(fields.values().all(Option::is_none));
    }
}
