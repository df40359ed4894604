//! Voter ID (EPIC) field extraction.
//!
//! When spatial label boxes are supplied by the detector, label-keyed
//! right-of-label lookup is authoritative: if any field resolves from boxes,
//! raw-text patterns are skipped entirely. Otherwise falls back to anchored
//! text extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::helpers::{normalize_name, right_of_label, split_lines};
use super::types::{empty_field_map, LabeledBox, RawFieldMap};
use crate::models::enums::DocumentType;

static RE_EPIC_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3,4}[0-9]{6,10})\b").unwrap());
static RE_EPIC_LABELLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Epic no\.?\s*[:\-]?\s*([A-Z0-9]{6,20})").unwrap());
static RE_NAME_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Name[ ,:/\-]*([A-Za-z .'\-]+)").unwrap());
static RE_FATHER_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Father'?s Name\s*[:;+\-_]*\s*([A-Za-z .'\-]+)").unwrap());
static RE_DOB_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Date of Birth[ /:]*([0-9]{2}[-/][0-9]{2}[-/][0-9]{4})").unwrap()
});
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2}[-/][0-9]{2}[-/][0-9]{4})").unwrap());
static RE_GENDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Sex|Gender)\s*[:;+\-_]*\s*(Male|Female|Other)").unwrap()
});

pub fn extract(text: &str, boxes: Option<&[LabeledBox]>) -> RawFieldMap {
    let mut fields = empty_field_map(DocumentType::VoterId);

    if let Some(boxes) = boxes {
        if extract_from_boxes(boxes, &mut fields) {
            tracing::debug!("voter fields resolved from spatial boxes");
            return fields;
        }
    }

    extract_from_text(text, &mut fields);
    fields
}

/// Label-keyed extraction from spatial boxes. Returns true when at least one
/// field resolved, which makes the box result authoritative.
fn extract_from_boxes(boxes: &[LabeledBox], fields: &mut RawFieldMap) -> bool {
    let mut any = false;
    for label in boxes {
        let text = label.text.to_lowercase();
        if text.is_empty() {
            continue;
        }

        let target = if text.contains("name") && !text.contains("father") && !text.contains("husband")
        {
            "name"
        } else if text.contains("father") {
            "father_name"
        } else if text.contains("husband") {
            "husband_name"
        } else if text.contains("birth") {
            "dob"
        } else if text.contains("gender") {
            "gender"
        } else if text.contains("epic no") || (text.contains("epic") && text.contains("no")) {
            "voter_id"
        } else {
            continue;
        };

        if fields[target].is_none() {
            if let Some(value) = right_of_label(label, boxes) {
                fields.insert(target.to_string(), Some(value));
                any = true;
            }
        }
    }
    any
}

fn extract_from_text(text: &str, fields: &mut RawFieldMap) {
    let lines = split_lines(text);

    let epic = RE_EPIC_SHAPE
        .captures(text)
        .or_else(|| RE_EPIC_LABELLED.captures(text))
        .map(|caps| caps[1].to_string());
    fields.insert("voter_id".into(), epic);

    if let Some(caps) = RE_NAME_VALUE.captures(text) {
        fields.insert("name".into(), normalize_name(&caps[1]));
    }

    for line in &lines {
        if let Some(caps) = RE_FATHER_VALUE.captures(line) {
            // Keep at most the first three alphabetic words; OCR often glues
            // trailing label text onto the value.
            let words: Vec<&str> = caps[1]
                .split_whitespace()
                .filter(|w| w.chars().all(|c| c.is_alphabetic()) && w.len() > 1)
                .take(3)
                .collect();
            if !words.is_empty() {
                fields.insert("father_name".into(), normalize_name(&words.join(" ")));
                break;
            }
        }
    }

    let dob = RE_DOB_LABELLED
        .captures(text)
        .or_else(|| RE_DATE.captures(text))
        .map(|caps| caps[1].to_string());
    fields.insert("dob".into(), dob);

    if let Some(caps) = RE_GENDER.captures(text) {
        let mut chars = caps[1].chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        };
        fields.insert("gender".into(), Some(capitalized));
    }
}
