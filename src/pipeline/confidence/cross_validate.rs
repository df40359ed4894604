//! Cross-field plausibility checks, run once the whole field set is known.
//!
//! Adjustments are zero or negative — a check can only take confidence away.
//! Coverage is deliberately narrow: date-of-birth calendar validity, the
//! marksheet year and CGPA ranges, the gender token set, and the
//! parent-name-equals-name mis-segmentation signal. A present, valid dob,
//! year or cgpa still yields a finding (valid, adjustment 0); gender and
//! parent-name checks report only violations.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::extract::RawFieldMap;
use crate::pipeline::types::CrossValidationFinding;

static RE_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[/-]\d{1,2}[/-]\d{4}").unwrap());

const VALID_GENDERS: &[&str] = &["male", "female", "transgender", "m", "f", "other"];

/// Check the completed field set; returns findings keyed by field name.
pub fn validate_cross_fields(
    fields: &RawFieldMap,
    max_dob_year: i32,
) -> BTreeMap<String, CrossValidationFinding> {
    let mut findings = BTreeMap::new();

    if let Some(dob) = value_of(fields, "dob") {
        findings.insert("dob".to_string(), check_dob(dob, max_dob_year));
    }

    if let Some(year) = value_of(fields, "year") {
        findings.insert("year".to_string(), check_year(year));
    }

    if let Some(cgpa) = value_of(fields, "cgpa") {
        findings.insert("cgpa".to_string(), check_cgpa(cgpa));
    }

    let name = value_of(fields, "name").or_else(|| value_of(fields, "student_name"));
    if let (Some(name), Some(father)) = (name, value_of(fields, "father_name")) {
        if name.trim().to_lowercase() == father.trim().to_lowercase() {
            findings.insert(
                "father_name".to_string(),
                CrossValidationFinding {
                    valid: false,
                    adjustment: -50,
                    reason: "Father name same as student name (suspicious)".to_string(),
                },
            );
        }
    }

    if let Some(gender) = value_of(fields, "gender") {
        if !VALID_GENDERS.contains(&gender.trim().to_lowercase().as_str()) {
            findings.insert(
                "gender".to_string(),
                CrossValidationFinding {
                    valid: false,
                    adjustment: -40,
                    reason: format!("Invalid gender value: {gender}"),
                },
            );
        }
    }

    findings
}

fn value_of<'a>(fields: &'a RawFieldMap, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
}

fn check_dob(dob: &str, max_year: i32) -> CrossValidationFinding {
    if !RE_DATE_PREFIX.is_match(dob) {
        return invalid(-50, "Invalid date format");
    }

    let parts: Vec<&str> = dob.split(['/', '-']).collect();
    let parsed: Option<(i32, i32, i32)> = match parts.as_slice() {
        [day, month, year] => match (day.parse(), month.parse(), year.parse()) {
            (Ok(day), Ok(month), Ok(year)) => Some((day, month, year)),
            _ => None,
        },
        _ => None,
    };

    let Some((day, month, year)) = parsed else {
        return invalid(-50, "Failed to parse date");
    };

    if !(1..=31).contains(&day) {
        return invalid(-40, &format!("Invalid day: {day}"));
    }
    if !(1..=12).contains(&month) {
        return invalid(-40, &format!("Invalid month: {month}"));
    }
    if !(1900..=max_year).contains(&year) {
        return invalid(-30, &format!("Unrealistic year: {year}"));
    }

    CrossValidationFinding {
        valid: true,
        adjustment: 0,
        reason: "Valid date".to_string(),
    }
}

fn check_year(year: &str) -> CrossValidationFinding {
    match year.trim().parse::<i32>() {
        Ok(value) if (1990..=2025).contains(&value) => CrossValidationFinding {
            valid: true,
            adjustment: 0,
            reason: "Valid year".to_string(),
        },
        Ok(value) => invalid(-30, &format!("Unrealistic year: {value}")),
        Err(_) => invalid(-40, "Year is not numeric"),
    }
}

fn check_cgpa(cgpa: &str) -> CrossValidationFinding {
    match cgpa.trim().parse::<f64>() {
        Ok(value) if (0.0..=10.0).contains(&value) => CrossValidationFinding {
            valid: true,
            adjustment: 0,
            reason: "Valid CGPA".to_string(),
        },
        Ok(value) => invalid(-35, &format!("CGPA out of range: {value}")),
        Err(_) => invalid(-30, "CGPA is not numeric"),
    }
}

fn invalid(adjustment: i32, reason: &str) -> CrossValidationFinding {
    CrossValidationFinding {
        valid: false,
        adjustment,
        reason: reason.to_string(),
    }
}
