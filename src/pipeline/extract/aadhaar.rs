//! Aadhaar card field extraction.
//!
//! The number, date of birth, gender and mobile come from anchored shapes.
//! Name and father's name hang off the relation markers (C/O, S/O, D/O, W/O)
//! printed next to the holder's name. The address is a free-text block:
//! collection starts at the first line with a street/house marker and stops
//! at region boilerplate (VTC, district, state, PIN).

use std::sync::LazyLock;

use regex::Regex;

use super::helpers::{is_probable_name, remove_case_insensitive, split_lines, title_case};
use super::types::{empty_field_map, RawFieldMap};
use crate::models::enums::DocumentType;

static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\s*(\d{4})\s*(\d{4})\b").unwrap());
static RE_DOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4})\b").unwrap());
static RE_GENDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(male|female|transgender)\b").unwrap());
static RE_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\d])([6-9]\d{9})(?:[^\d]|$)").unwrap());
static RE_NAME_WITH_RELATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z\s]{5,30})\s+(?:C/O|D/O|S/O|W/O)[^\w]*([A-Za-z\s]{5,50})$").unwrap()
});
static RE_RELATION_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:C/O|D/O|S/O|W/O)[^\w]*([A-Za-z\s]{5,50})").unwrap());
static RE_RELATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(C/O|D/O|S/O|W/O)").unwrap());
static RE_HOUSE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+[-/]\d+").unwrap());
static RE_HOUSE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)flat no|house no|building").unwrap());
static RE_ADDRESS_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(VTC|PO|District|State|PIN|Mobile|Aadhaar|VID)\b").unwrap());
static RE_VTC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bVTC\b").unwrap());
static RE_NON_ADDRESS_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s,\-./]").unwrap());
static RE_NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z\s]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Keywords that open an address block.
const ADDRESS_MARKERS: &[&str] = &[
    "road", "street", "flat", "house", "building", "apartment", "near", "opposite",
];

pub fn extract(text: &str) -> RawFieldMap {
    let mut fields = empty_field_map(DocumentType::Aadhaar);
    let lines = split_lines(text);
    if lines.is_empty() {
        return fields;
    }

    for line in &lines {
        if let Some(caps) = RE_NUMBER.captures(line) {
            fields.insert(
                "aadhaar_number".into(),
                Some(format!("{}{}{}", &caps[1], &caps[2], &caps[3])),
            );
            break;
        }
    }

    for line in &lines {
        if let Some(caps) = RE_DOB.captures(line) {
            fields.insert("dob".into(), Some(caps[1].to_string()));
            break;
        }
    }

    for line in &lines {
        if let Some(caps) = RE_GENDER.captures(line) {
            fields.insert("gender".into(), Some(title_case(&caps[1])));
            break;
        }
    }

    for line in &lines {
        if let Some(caps) = RE_MOBILE.captures(line) {
            fields.insert("mobile".into(), Some(caps[1].to_string()));
            break;
        }
    }

    extract_names(&lines, &mut fields);
    extract_address(&lines, &mut fields);

    fields
}

/// Name and father's name from relation markers: either both on one line
/// ("KOTTANGI CHARAN C/O Kottangi Satya") or a name line followed by a
/// relation line.
fn extract_names(lines: &[&str], fields: &mut RawFieldMap) {
    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = RE_NAME_WITH_RELATION.captures(line) {
            let name = RE_WHITESPACE.replace_all(caps[1].trim(), " ").to_string();
            let father = RE_WHITESPACE.replace_all(caps[2].trim(), " ").to_string();
            if name.len() > 3 {
                fields.insert("name".into(), Some(title_case(&name)));
            }
            if father.len() > 3 {
                fields.insert("father_name".into(), Some(title_case(&father)));
            }
            return;
        }

        if i + 1 < lines.len() {
            let current = RE_NON_ALPHA.replace_all(lines[i], " ");
            let current = current.trim();
            if current == current.to_uppercase()
                && is_probable_name(current)
                && RE_RELATION_MARKER.is_match(lines[i + 1])
            {
                fields.insert("name".into(), Some(title_case(current)));
                if let Some(caps) = RE_RELATION_VALUE.captures(lines[i + 1]) {
                    let father = RE_WHITESPACE.replace_all(caps[1].trim(), " ");
                    fields.insert("father_name".into(), Some(title_case(&father)));
                }
                return;
            }
        }
    }
}

/// Free-text address block. Collection starts at the first street/house
/// marker and stops at region boilerplate; already-extracted name strings are
/// stripped from collected lines. Falls back to the lines between the name
/// line and the VTC line.
fn extract_address(lines: &[&str], fields: &mut RawFieldMap) {
    let name = fields.get("name").cloned().flatten();
    let father = fields.get("father_name").cloned().flatten();

    let mut address_lines: Vec<String> = Vec::new();
    let mut started = false;

    for line in lines {
        let lower = line.to_lowercase();

        if ADDRESS_MARKERS.iter().any(|marker| lower.contains(marker))
            || RE_HOUSE_NUMBER.is_match(line)
            || RE_HOUSE_LABEL.is_match(line)
        {
            started = true;
        }

        if started
            && (RE_ADDRESS_STOP.is_match(line)
                || lower.contains("government")
                || lower.contains("unique identification"))
        {
            break;
        }

        if started {
            if let Some(cleaned) = clean_address_line(line, name.as_deref(), father.as_deref()) {
                if !address_lines.contains(&cleaned) {
                    address_lines.push(cleaned);
                }
            }
        }
    }

    // No marker found: take the lines between the name line and the VTC line.
    if address_lines.is_empty() {
        if let Some(name) = &name {
            let name_upper = name.to_uppercase();
            let name_idx = lines
                .iter()
                .position(|line| line.to_uppercase().contains(&name_upper));
            let vtc_idx = lines.iter().position(|line| RE_VTC.is_match(line));

            if let (Some(start), Some(end)) = (name_idx, vtc_idx) {
                for line in lines.iter().take(end).skip(start + 1) {
                    let upper = line.to_uppercase();
                    if upper.contains(&name_upper) {
                        continue;
                    }
                    if let Some(father) = &father {
                        if upper.contains(&father.to_uppercase()) {
                            continue;
                        }
                    }
                    if let Some(cleaned) = clean_address_line(line, None, None) {
                        if !address_lines.contains(&cleaned) {
                            address_lines.push(cleaned);
                        }
                    }
                }
            }
        }
    }

    if !address_lines.is_empty() {
        fields.insert("address".into(), Some(address_lines.join(", ")));
    }
}

fn clean_address_line(line: &str, name: Option<&str>, father: Option<&str>) -> Option<String> {
    let mut cleaned = RE_NON_ADDRESS_CHARS.replace_all(line, " ").to_string();
    cleaned = RE_WHITESPACE.replace_all(&cleaned, " ").trim().to_string();
    if let Some(name) = name {
        cleaned = remove_case_insensitive(&cleaned, name);
    }
    if let Some(father) = father {
        cleaned = remove_case_insensitive(&cleaned, father);
    }
    let cleaned = cleaned
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '-'))
        .to_string();
    if cleaned.len() > 5 {
        Some(cleaned)
    } else {
        None
    }
}
