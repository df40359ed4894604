//! Pattern-plausibility scoring: how well a raw value matches the textual
//! shape expected for its field. Exact-format matches score high, loose
//! superset matches medium, everything else low. Empty values fail closed
//! to 0.
//!
//! The breakpoints are hand-tuned against a review corpus; they are behavior,
//! not styling.

use std::sync::LazyLock;

use regex::Regex;

static RE_AADHAAR_EXACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{12}$").unwrap());
static RE_AADHAAR_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10,14}$").unwrap());
static RE_PAN_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static RE_PAN_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]{10}$").unwrap());
static RE_VOTER_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3,4}[0-9]{6,10}$").unwrap());
static RE_VOTER_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]{9,15}$").unwrap());
static RE_DL_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9O]{6,20}$").unwrap());
static RE_DL_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2}").unwrap());
static RE_DL_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{6,}").unwrap());
static RE_MOBILE_EXACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());
static RE_MOBILE_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());
static RE_ROLL_EXACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{7,12}$").unwrap());
static RE_ROLL_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5,15}$").unwrap());
static RE_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[/-]\d{1,2}[/-]\d{4}$").unwrap());
static RE_NOISE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[|_\[\]{}]").unwrap());
static RE_SCHOOL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(SCHOOL|COLLEGE|INSTITUTE|ACADEMY|UNIVERSITY)\b").unwrap()
});
static RE_YEAR_EXACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(19|20)\d{2}$").unwrap());
static RE_YEAR_LOOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Score a field value's shape plausibility, 0–100.
pub fn pattern_confidence(field_name: &str, value: &str) -> u8 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }

    let confidence: f64 = match field_name {
        "aadhaar_number" => {
            let compact = value.replace(' ', "");
            if RE_AADHAAR_EXACT.is_match(&compact) {
                0.98
            } else if RE_AADHAAR_LOOSE.is_match(&compact) {
                0.75
            } else {
                0.40
            }
        }
        "pan" => {
            if RE_PAN_EXACT.is_match(value) {
                0.98
            } else if RE_PAN_LOOSE.is_match(value) {
                0.70
            } else {
                0.35
            }
        }
        "voter_id" => {
            if RE_VOTER_EXACT.is_match(value) {
                0.95
            } else if RE_VOTER_LOOSE.is_match(value) {
                0.65
            } else {
                0.40
            }
        }
        "dl_number" => {
            if RE_DL_EXACT.is_match(value) {
                0.95
            } else if RE_DL_LETTERS.is_match(value) && RE_DL_DIGITS.is_match(value) {
                0.75
            } else {
                0.45
            }
        }
        "mobile" => {
            if RE_MOBILE_EXACT.is_match(value) {
                0.97
            } else if RE_MOBILE_LOOSE.is_match(value) {
                0.65
            } else {
                0.35
            }
        }
        "roll_no" => {
            if RE_ROLL_EXACT.is_match(value) {
                0.92
            } else if RE_ROLL_LOOSE.is_match(value) {
                0.75
            } else {
                0.50
            }
        }
        "dob" | "issue_date" | "valid_till" => date_confidence(value),
        "gender" => {
            if matches!(
                value.to_lowercase().as_str(),
                "male" | "female" | "transgender" | "m" | "f"
            ) {
                0.99
            } else {
                0.50
            }
        }
        "name" | "father_name" | "mother_name" | "student_name" => name_confidence(value),
        "address" => address_confidence(value),
        "school_name" => {
            let len = value.chars().count();
            if len < 5 {
                0.40
            } else if len > 100 {
                0.50
            } else if RE_SCHOOL_KEYWORD.is_match(value) {
                0.90
            } else {
                0.65
            }
        }
        "cgpa" => match value.parse::<f64>() {
            Ok(v) if (0.0..=10.0).contains(&v) => 0.92,
            Ok(v) if (0.0..=100.0).contains(&v) => 0.65,
            Ok(_) => 0.40,
            Err(_) => 0.30,
        },
        "year" => {
            if RE_YEAR_EXACT.is_match(value) {
                0.95
            } else if RE_YEAR_LOOSE.is_match(value) {
                0.65
            } else {
                0.35
            }
        }
        _ => {
            let len = value.chars().count();
            if len < 2 {
                0.40
            } else if len > 100 {
                0.55
            } else {
                0.65
            }
        }
    };

    (confidence * 100.0).round() as u8
}

/// Date shapes: calendar-plausible 0.95, shape but out-of-range 0.60, shape
/// but unparsable 0.50, no shape 0.40.
fn date_confidence(value: &str) -> f64 {
    if !RE_DATE_SHAPE.is_match(value) {
        return 0.40;
    }
    let parts: Vec<Option<i32>> = value
        .split(['/', '-'])
        .map(|part| part.parse::<i32>().ok())
        .collect();
    match (parts.first(), parts.get(1), parts.get(2)) {
        (Some(Some(day)), Some(Some(month)), Some(Some(year))) => {
            if (1..=31).contains(day) && (1..=12).contains(month) && (1900..=2100).contains(year) {
                0.95
            } else {
                0.60
            }
        }
        _ => 0.50,
    }
}

fn name_confidence(value: &str) -> f64 {
    let len = value.chars().count();
    if len < 3 {
        return 0.30;
    }
    if len > 50 {
        return 0.50;
    }

    let alpha_count = value
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .count();
    let alpha_ratio = alpha_count as f64 / len as f64;

    let mut confidence = if alpha_ratio >= 0.90 {
        let word_count = value.split_whitespace().count();
        if (2..=5).contains(&word_count) {
            0.88
        } else if word_count == 1 {
            0.75
        } else {
            0.70
        }
    } else if alpha_ratio >= 0.70 {
        0.60
    } else {
        0.35
    };

    if RE_NOISE_CHARS.is_match(value) {
        confidence *= 0.75;
    }
    if value.split_whitespace().any(|word| word.chars().count() == 1) {
        confidence *= 0.85;
    }
    confidence
}

fn address_confidence(value: &str) -> f64 {
    let len = value.chars().count();
    if len < 10 {
        return 0.40;
    }
    if len > 200 {
        return 0.55;
    }

    let has_letters = value.chars().any(|c| c.is_alphabetic());
    let has_numbers = value.chars().any(|c| c.is_ascii_digit());
    let has_comma = value.contains(',');

    if has_letters && has_numbers && has_comma {
        0.85
    } else if has_letters && (has_numbers || has_comma) {
        0.75
    } else if has_letters {
        0.60
    } else {
        0.40
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_scores_zero() {
        assert_eq!(pattern_confidence("pan", ""), 0);
        assert_eq!(pattern_confidence("name", "   "), 0);
    }

    #[test]
    fn aadhaar_strict_beats_loose_beats_garbage() {
        let strict = pattern_confidence("aadhaar_number", "1234 5678 9012");
        let loose = pattern_confidence("aadhaar_number", "12345678901");
        let garbage = pattern_confidence("aadhaar_number", "12AB");
        assert_eq!(strict, 98);
        assert_eq!(loose, 75);
        assert_eq!(garbage, 40);
        assert!(strict > loose && loose > garbage);
    }

    #[test]
    fn pan_strict_beats_loose_beats_garbage() {
        assert_eq!(pattern_confidence("pan", "ABCDE1234F"), 98);
        assert_eq!(pattern_confidence("pan", "AB12CD34EF"), 70);
        assert_eq!(pattern_confidence("pan", "nope"), 35);
    }

    #[test]
    fn dl_number_partial_shape_scores_medium() {
        assert_eq!(pattern_confidence("dl_number", "KA0120110012345"), 95);
        assert_eq!(pattern_confidence("dl_number", "KA-2011-0012345"), 75);
        assert_eq!(pattern_confidence("dl_number", "12345"), 45);
    }

    #[test]
    fn mobile_prefix_matters() {
        assert_eq!(pattern_confidence("mobile", "9876543210"), 97);
        assert_eq!(pattern_confidence("mobile", "1234567890"), 65);
        assert_eq!(pattern_confidence("mobile", "98765"), 35);
    }

    #[test]
    fn calendar_valid_date_beats_out_of_range() {
        assert_eq!(pattern_confidence("dob", "15/08/1998"), 95);
        assert_eq!(pattern_confidence("dob", "45/13/1998"), 60);
        assert_eq!(pattern_confidence("dob", "August 15"), 40);
    }

    #[test]
    fn gender_token_set() {
        assert_eq!(pattern_confidence("gender", "Female"), 99);
        assert_eq!(pattern_confidence("gender", "M"), 99);
        assert_eq!(pattern_confidence("gender", "unknown"), 50);
    }

    #[test]
    fn two_to_five_word_name_scores_highest() {
        let two_words = pattern_confidence("name", "Ram Kumar");
        let one_word = pattern_confidence("name", "Ram");
        let many = pattern_confidence("name", "A B C D E F G");
        assert_eq!(two_words, 88);
        assert_eq!(one_word, 75);
        assert!(many < one_word);
    }

    #[test]
    fn noisy_name_penalized() {
        let clean = pattern_confidence("name", "Ram Kumar");
        let noisy = pattern_confidence("name", "Ram|Kumar xx");
        assert!(noisy < clean);
    }

    #[test]
    fn address_with_numbers_and_commas_scores_highest() {
        assert_eq!(pattern_confidence("address", "12 MG Road, Bengaluru"), 85);
        assert_eq!(pattern_confidence("address", "MG Road Bengaluru East"), 60);
        assert_eq!(pattern_confidence("address", "short"), 40);
    }

    #[test]
    fn school_keyword_scores_high() {
        assert_eq!(pattern_confidence("school_name", "Little Flower School"), 90);
        assert_eq!(pattern_confidence("school_name", "Little Flower"), 65);
    }

    #[test]
    fn cgpa_ten_scale_beats_percent_scale() {
        assert_eq!(pattern_confidence("cgpa", "9.2"), 92);
        assert_eq!(pattern_confidence("cgpa", "85"), 65);
        assert_eq!(pattern_confidence("cgpa", "150"), 40);
        assert_eq!(pattern_confidence("cgpa", "nine"), 30);
    }

    #[test]
    fn year_century_prefix_required_for_top_score() {
        assert_eq!(pattern_confidence("year", "2022"), 95);
        assert_eq!(pattern_confidence("year", "3022"), 65);
        assert_eq!(pattern_confidence("year", "22"), 35);
    }

    #[test]
    fn unlisted_field_gets_length_based_default() {
        assert_eq!(pattern_confidence("husband_name", "Mohan Lal"), 65);
        assert_eq!(pattern_confidence("husband_name", "X"), 40);
    }
}
