//! Business-rule sanity scoring: generic plausibility checks that apply to
//! any field regardless of shape — length, character set, repetition, case.
//! Starts at 100 and deducts per violation, floored at 0.

use std::sync::LazyLock;

use regex::Regex;

static RE_SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s,.\-/()]").unwrap());

/// Fields whose value must contain at least one digit.
const DIGIT_REQUIRED: &[&str] = &["aadhaar_number", "pan", "mobile", "roll_no"];

const NAME_FIELDS: &[&str] = &["name", "father_name", "mother_name", "student_name"];

/// Score a field value against the generic sanity rules, 0–100.
pub fn business_confidence(field_name: &str, value: &str) -> u8 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }

    let mut score: i32 = 100;
    let len = value.chars().count();

    if len == 1 {
        score -= 40;
    } else if len > 200 {
        score -= 30;
    }

    let special_count = RE_SPECIAL_CHARS.find_iter(value).count();
    if special_count > 0 {
        score -= (special_count as i32 * 5).min(30);
    }

    if NAME_FIELDS.contains(&field_name) && is_single_cased(value) {
        score -= 10;
    }

    if has_repeated_run(value, 5) {
        score -= 30;
    }

    if DIGIT_REQUIRED.contains(&field_name) && !value.chars().any(|c| c.is_ascii_digit()) {
        score -= 50;
    }

    score.max(0) as u8
}

/// True when every cased character is uppercase, or every one lowercase.
fn is_single_cased(value: &str) -> bool {
    let mut has_cased = false;
    let mut all_upper = true;
    let mut all_lower = true;
    for c in value.chars() {
        if c.is_uppercase() {
            has_cased = true;
            all_lower = false;
        } else if c.is_lowercase() {
            has_cased = true;
            all_upper = false;
        }
    }
    has_cased && (all_upper || all_lower)
}

/// True when the value contains `run` or more identical consecutive
/// characters. Scan, not regex — the regex engine has no backreferences.
fn has_repeated_run(value: &str, run: usize) -> bool {
    let mut count = 0;
    let mut previous = None;
    for c in value.chars() {
        if Some(c) == previous {
            count += 1;
            if count >= run {
                return true;
            }
        } else {
            previous = Some(c);
            count = 1;
        }
    }
    false
}
