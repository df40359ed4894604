//! PAN card field extraction. The card is label-driven: NAME and FATHER'S
//! NAME headings with the value on the same line or the one below.

use std::sync::LazyLock;

use regex::Regex;

use super::helpers::{normalize_name, split_lines};
use super::types::{empty_field_map, RawFieldMap};
use crate::models::enums::DocumentType;

static RE_PAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{5}[0-9]{4}[A-Z])\b").unwrap());
static RE_DOB_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:DOB|DATE OF BIRTH)[:\s]*([0-9]{2}[/-][0-9]{2}[/-][0-9]{4})").unwrap()
});
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{2}[/-][0-9]{2}[/-][0-9]{4}\b").unwrap());
static RE_NAME_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)NAME\s*[:\-]?\s*(.+)").unwrap());
static RE_FATHER_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FATHER'?S?\s*NAME\s*[:\-]?\s*(.+)").unwrap());

pub fn extract(text: &str) -> RawFieldMap {
    let mut fields = empty_field_map(DocumentType::Pan);
    let upper = text.to_uppercase();
    let lines = split_lines(text);

    if let Some(caps) = RE_PAN.captures(&upper) {
        fields.insert("pan".into(), Some(caps[1].to_string()));
    }

    if let Some(caps) = RE_DOB_LABELLED.captures(&upper) {
        fields.insert("dob".into(), Some(caps[1].to_string()));
    } else if let Some(m) = RE_DATE.find(text) {
        fields.insert("dob".into(), Some(m.as_str().to_string()));
    }

    for (i, line) in lines.iter().enumerate() {
        let line_upper = line.to_uppercase();

        if line_upper.contains("FATHER") && fields["father_name"].is_none() {
            let value = RE_FATHER_VALUE
                .captures(line)
                .and_then(|caps| normalize_name(&caps[1]))
                .or_else(|| lines.get(i + 1).and_then(|next| normalize_name(next)));
            fields.insert("father_name".into(), value);
        } else if line_upper.contains("NAME") && fields["name"].is_none() {
            let value = RE_NAME_VALUE
                .captures(line)
                .and_then(|caps| normalize_name(&caps[1]))
                .or_else(|| lines.get(i + 1).and_then(|next| normalize_name(next)));
            fields.insert("name".into(), value);
        }
    }

    fields
}
