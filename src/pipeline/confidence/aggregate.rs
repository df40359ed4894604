//! Document-level confidence aggregation.
//!
//! The overall score is an importance-weighted mean of the adjusted per-field
//! confidences. Fields with a null or whitespace value are skipped entirely —
//! they neither raise nor lower the score. Marksheets additionally take a
//! multiplicative penalty when too few subject rows were recovered.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::pipeline::types::{AnnotatedField, TablePenalty};

/// Importance-weighted mean of per-field confidences, skipping null fields.
pub fn overall_confidence(
    config: &EngineConfig,
    fields: &BTreeMap<String, AnnotatedField>,
) -> u8 {
    let mut total_weighted = 0.0;
    let mut total_weight = 0.0;

    for (name, field) in fields {
        let resolved = field
            .value
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty());
        if !resolved {
            continue;
        }
        let weight = config.importance_weight(name);
        total_weighted += f64::from(field.confidence) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 0;
    }
    (total_weighted / total_weight).round() as u8
}

/// Structural completeness penalty for marksheets, by subject-row count:
/// 0 rows ×0.60, 1–2 ×0.75, 3–4 ×0.90, 5+ no penalty.
pub fn marksheet_table_penalty(overall: u8, row_count: usize) -> Option<TablePenalty> {
    let multiplier = match row_count {
        0 => 0.60,
        1..=2 => 0.75,
        3..=4 => 0.90,
        _ => return None,
    };

    let penalized = (f64::from(overall) * multiplier) as u8;
    Some(TablePenalty {
        original_confidence: overall,
        penalized_confidence: penalized,
        multiplier,
        row_count,
        reason: format!("Marksheet has only {row_count} subjects"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::FieldStatus;
    use crate::pipeline::types::ConfidenceBreakdown;

    fn annotated(value: Option<&str>, confidence: u8) -> AnnotatedField {
        AnnotatedField {
            value: value.map(String::from),
            confidence,
            breakdown: ConfidenceBreakdown::default(),
            threshold: 80,
            status: FieldStatus::Pass,
            cross_validation: None,
        }
    }

    #[test]
    fn weighted_mean_favors_important_fields() {
        let config = EngineConfig::default();
        let fields: BTreeMap<String, AnnotatedField> = [
            ("pan".to_string(), annotated(Some("ABCDE1234F"), 100)),
            ("gender".to_string(), annotated(Some("Male"), 50)),
        ]
        .into_iter()
        .collect();
        // (100*1.5 + 50*0.7) / 2.2 = 84.09 → 84
        assert_eq!(overall_confidence(&config, &fields), 84);
    }

    #[test]
    fn null_fields_do_not_count_for_or_against() {
        let config = EngineConfig::default();
        let mut with_nulls: BTreeMap<String, AnnotatedField> =
            [("pan".to_string(), annotated(Some("ABCDE1234F"), 90))]
                .into_iter()
                .collect();
        let without_nulls = with_nulls.clone();

        for name in ["name", "father_name", "dob", "mobile", "address"] {
            with_nulls.insert(name.to_string(), annotated(None, 0));
        }
        with_nulls.insert("gender".to_string(), annotated(Some("   "), 0));

        assert_eq!(
            overall_confidence(&config, &with_nulls),
            overall_confidence(&config, &without_nulls)
        );
    }

    #[test]
    fn empty_field_set_scores_zero() {
        let config = EngineConfig::default();
        assert_eq!(overall_confidence(&config, &BTreeMap::new()), 0);
    }

    #[test]
    fn all_null_fields_score_zero() {
        let config = EngineConfig::default();
        let fields: BTreeMap<String, AnnotatedField> =
            [("pan".to_string(), annotated(None, 0))].into_iter().collect();
        assert_eq!(overall_confidence(&config, &fields), 0);
    }

    #[test]
    fn penalty_table_matches_row_counts() {
        // Row counts {0, 2, 4, 6} on an unpenalized 100 → {60, 75, 90, 100}.
        assert_eq!(marksheet_table_penalty(100, 0).unwrap().penalized_confidence, 60);
        assert_eq!(marksheet_table_penalty(100, 2).unwrap().penalized_confidence, 75);
        assert_eq!(marksheet_table_penalty(100, 4).unwrap().penalized_confidence, 90);
        assert!(marksheet_table_penalty(100, 6).is_none());
    }

    #[test]
    fn penalty_records_row_count_and_multiplier() {
        let penalty = marksheet_table_penalty(80, 1).unwrap();
        assert_eq!(penalty.original_confidence, 80);
        assert_eq!(penalty.penalized_confidence, 60);
        assert_eq!(penalty.multiplier, 0.75);
        assert_eq!(penalty.row_count, 1);
        assert!(penalty.reason.contains("1 subjects"));
    }

    #[test]
    fn five_rows_or_more_never_penalized() {
        for rows in [5, 10, 40] {
            assert!(marksheet_table_penalty(90, rows).is_none());
        }
    }
}
