//! Cleanup and scanning helpers shared by the per-type extractors.

use std::sync::LazyLock;

use regex::Regex;

use super::types::LabeledBox;

/// Maximum vertical-center distance for a value box to pair with a label box.
const LABEL_Y_TOLERANCE: f32 = 40.0;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:\-]+$").unwrap());
static RE_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z .'\-]+$").unwrap());

/// Keywords that disqualify a line from being a person's name.
const NAME_STOPWORDS: &[&str] = &[
    "government",
    "india",
    "authority",
    "unique",
    "identification",
    "number",
    "aadhaar",
    "address",
    "pin",
    "code",
    "signature",
    "enrolment",
    "mobile",
];

/// Trimmed, non-empty lines of the recognized text.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Strip leading/trailing whitespace and label punctuation from a value.
pub fn clean_value(val: &str) -> Option<String> {
    let cleaned = val
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';' | '_' | '-'))
        .trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Collapse inner whitespace and drop trailing label punctuation.
pub fn normalize_name(s: &str) -> Option<String> {
    let collapsed = RE_WHITESPACE.replace_all(s.trim(), " ");
    let trimmed = RE_TRAILING_PUNCT.replace(&collapsed, "").trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Title-case a name: first letter of each word upper, the rest lower.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether a snippet plausibly is a person's name rather than
/// boilerplate or separator noise.
pub fn is_probable_name(text: &str) -> bool {
    let stripped = text.trim_matches(|c: char| matches!(c, ' ' | '.' | '\'' | '-'));
    if stripped.len() < 3 {
        return false;
    }
    if text.chars().all(|c| c == '-' || c == '—') {
        return false;
    }
    let lower = text.to_lowercase();
    RE_NAME_CHARS.is_match(text)
        && text.len() > 3
        && text.len() < 50
        && !NAME_STOPWORDS.iter().any(|kw| lower.contains(kw))
}

/// Find the value box sitting to the right of a label box.
///
/// Candidates must start right of the label's left edge with vertical centers
/// within tolerance; the leftmost candidate wins.
pub fn right_of_label(label: &LabeledBox, boxes: &[LabeledBox]) -> Option<String> {
    let mut candidates: Vec<(&LabeledBox, f32)> = boxes
        .iter()
        .filter(|other| {
            other.bounding_box.x1 > label.bounding_box.x1
                && (other.bounding_box.center_y() - label.bounding_box.center_y()).abs()
                    < LABEL_Y_TOLERANCE
        })
        .map(|other| (other, other.bounding_box.x1))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates.first().and_then(|(boxed, _)| clean_value(&boxed.text))
}

/// Remove every case-insensitive occurrence of `needle` from `haystack`.
pub fn remove_case_insensitive(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let lower_haystack = haystack.to_lowercase();
    let lower_needle = needle.to_lowercase();
    // Lowercasing can change byte lengths for non-ASCII text; fall back to
    // the untouched string rather than splice at a bad offset.
    if lower_haystack.len() != haystack.len() {
        return haystack.to_string();
    }
    let mut result = String::with_capacity(haystack.len());
    let mut pos = 0;
    while let Some(found) = lower_haystack[pos..].find(&lower_needle) {
        result.push_str(&haystack[pos..pos + found]);
        pos += found + lower_needle.len();
    }
    result.push_str(&haystack[pos..]);
    result
}
