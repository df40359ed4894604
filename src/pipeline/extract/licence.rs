//! Driving licence field extraction.
//!
//! The licence number tolerates OCR confusing O for 0 and spaces inside the
//! number. A licence carries up to three dates; labelled dates are consumed
//! first, then any remaining date-shaped substrings fill the remaining slots
//! in text order.

use std::sync::LazyLock;

use regex::Regex;

use super::helpers::{normalize_name, split_lines};
use super::types::{empty_field_map, RawFieldMap};
use crate::models::enums::DocumentType;

static RE_DL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2}[0O]?\d{6,20})\b").unwrap());
static RE_DL_NUMBER_SPACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2}[0O]?\s*\d[\d\s]{5,20})\b").unwrap());
static RE_NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bNAME\b").unwrap());
static RE_NAME_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Name\s*[:\-]?\s*(.+)").unwrap());
static RE_SIGNATURE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Holder.?s Signature").unwrap());
static RE_RELATION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(S/O|D/O|W/O|FATHER)\b").unwrap());
static RE_RELATION_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:S/O|D/O|W/O|FATHER'?S? NAME)[:\-]?\s*(.+)").unwrap());
static RE_ADDRESS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*ADDRESS\s*[:\-]?\s*").unwrap());
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}[/-]\d{2}[/-]\d{4})").unwrap());
static RE_DOB_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Date of Birth|DOB)[\s:]*(\d{2}[/-]\d{2}[/-]\d{4})").unwrap()
});
static RE_ISSUE_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Issue Date|Date of First Issue)[\s:]*(\d{2}[/-]\d{2}[/-]\d{4})").unwrap()
});
static RE_VALID_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Validity|Valid Till)[\s:]*(\d{2}[/-]\d{2}[/-]\d{4})").unwrap()
});

pub fn extract(text: &str) -> RawFieldMap {
    let mut fields = empty_field_map(DocumentType::DrivingLicence);
    if text.trim().is_empty() {
        return fields;
    }
    let lines = split_lines(text);

    extract_number(&lines, &mut fields);

    for line in &lines {
        if RE_NAME_LABEL.is_match(line) {
            if let Some(caps) = RE_NAME_VALUE.captures(line) {
                let cleaned = RE_SIGNATURE_NOISE.replace_all(&caps[1], "");
                fields.insert("name".into(), normalize_name(&cleaned));
                break;
            }
        }
    }

    for line in &lines {
        if RE_RELATION_LABEL.is_match(line) {
            if let Some(caps) = RE_RELATION_VALUE.captures(line) {
                fields.insert("father_name".into(), normalize_name(&caps[1]));
                break;
            }
        }
    }

    extract_address(text, &mut fields);
    extract_dates(text, &mut fields);

    fields
}

fn extract_number(lines: &[&str], fields: &mut RawFieldMap) {
    for line in lines {
        let compact: String = line.split_whitespace().collect();
        if let Some(caps) = RE_DL_NUMBER.captures(&compact) {
            fields.insert("dl_number".into(), Some(caps[1].to_string()));
            return;
        }
    }
    // Space-tolerant pass over the joined text for numbers OCR split apart.
    let joined = lines.join(" ");
    if let Some(caps) = RE_DL_NUMBER_SPACED.captures(&joined) {
        let compact: String = caps[1].split_whitespace().collect();
        fields.insert("dl_number".into(), Some(compact));
    }
}

/// Lines following the ADDRESS label, up to the first blank line.
fn extract_address(text: &str, fields: &mut RawFieldMap) {
    let raw_lines: Vec<&str> = text.lines().collect();
    let mut address_lines: Vec<String> = Vec::new();
    let mut start = None;

    for (i, line) in raw_lines.iter().enumerate() {
        if line.to_uppercase().contains("ADDRESS") {
            start = Some(i);
            let rest = RE_ADDRESS_PREFIX.replace(line, "").trim().to_string();
            if !rest.is_empty() {
                address_lines.push(rest);
            }
            break;
        }
    }

    if let Some(start) = start {
        for line in &raw_lines[start + 1..] {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                address_lines.push(trimmed.to_string());
            } else if !address_lines.is_empty() {
                break;
            }
        }
    }

    if !address_lines.is_empty() {
        fields.insert("address".into(), Some(address_lines.join(", ")));
    }
}

/// Labelled dates are consumed first; remaining date-shaped substrings fill
/// issue_date then valid_till in text order.
fn extract_dates(text: &str, fields: &mut RawFieldMap) {
    let mut remaining: Vec<String> = Vec::new();
    for caps in RE_DATE.captures_iter(text) {
        let date = caps[1].to_string();
        if !remaining.contains(&date) {
            remaining.push(date);
        }
    }

    let labelled: [(&Regex, &str); 3] = [
        (&RE_DOB_LABELLED, "dob"),
        (&RE_ISSUE_LABELLED, "issue_date"),
        (&RE_VALID_LABELLED, "valid_till"),
    ];
    for (re, field) in labelled {
        if let Some(caps) = re.captures(text) {
            let date = caps[1].to_string();
            remaining.retain(|d| *d != date);
            fields.insert((*field).to_string(), Some(date));
        }
    }

    if fields["issue_date"].is_none() && !remaining.is_empty() {
        fields.insert("issue_date".into(), Some(remaining.remove(0)));
    }
    if fields["valid_till"].is_none() && !remaining.is_empty() {
        fields.insert("valid_till".into(), Some(remaining.remove(0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "INDIAN UNION DRIVING LICENCE\n\
        DL No: KA0120110012345\n\
        Name: ARJUN RAO Holder's Signature\n\
        S/O: MOHAN RAO\n\
        Address: 12 MG Road\n\
        Bengaluru\n\
        \n\
        DOB: 01/01/1995\n\
        Issue Date: 10/02/2015\n\
        Valid Till: 09/02/2035";

    #[test]
    fn dl_number_extracted_per_line() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["dl_number"].as_deref(), Some("KA0120110012345"));
    }

    #[test]
    fn dl_number_recovered_from_spaced_digits() {
        let fields = extract("Licence KA01 2011 0012345 issued");
        assert_eq!(fields["dl_number"].as_deref(), Some("KA0120110012345"));
    }

    #[test]
    fn name_with_signature_noise_removed() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["name"].as_deref(), Some("ARJUN RAO"));
    }

    #[test]
    fn father_from_relation_marker() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["father_name"].as_deref(), Some("MOHAN RAO"));
    }

    #[test]
    fn address_collected_until_blank_line() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["address"].as_deref(), Some("12 MG Road, Bengaluru"));
    }

    #[test]
    fn labelled_dates_win() {
        let fields = extract(SAMPLE);
        assert_eq!(fields["dob"].as_deref(), Some("01/01/1995"));
        assert_eq!(fields["issue_date"].as_deref(), Some("10/02/2015"));
        assert_eq!(fields["valid_till"].as_deref(), Some("09/02/2035"));
    }

    #[test]
    fn unlabelled_dates_fill_remaining_slots_in_text_order() {
        let text = "DOB: 01/01/1995\n10/02/2015\n09/02/2035";
        let fields = extract(text);
        assert_eq!(fields["dob"].as_deref(), Some("01/01/1995"));
        assert_eq!(fields["issue_date"].as_deref(), Some("10/02/2015"));
        assert_eq!(fields["valid_till"].as_deref(), Some("09/02/2035"));
    }

    #[test]
    fn empty_text_gives_all_null_schema() {
        let fields = extract("");
        assert_eq!(fields.len(), 7);
        assert!(fields.values().all(Option::is_none));
    }
}
