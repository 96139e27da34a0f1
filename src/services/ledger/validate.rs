use std::collections::HashSet;

use crate::models::ValidationIssue;
use crate::models::class_entries::{
    entities::{EntryType, NewClassEntry},
    requests::EntryDraft,
};
use crate::utils::{approx_eq, compensated_sum};

/// 校验完整的构成集合
///
/// 逐条检查类型、分值与重复项，再比较分值之和与总分。
/// 每条被违反的规则各产生一条问题，全部通过时返回待写入的集合。
pub fn validate_entry_set(
    total_score: f64,
    entries: &[EntryDraft],
) -> Result<Vec<NewClassEntry>, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let total_valid = total_score.is_finite() && total_score > 0.0;
    if !total_valid {
        issues.push(ValidationIssue::NonPositiveTotalScore { total_score });
    }

    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(entries.len());
    let mut portions_valid = true;

    for (index, draft) in entries.iter().enumerate() {
        if !(draft.portion.is_finite() && draft.portion > 0.0) {
            portions_valid = false;
            issues.push(ValidationIssue::NonPositivePortion {
                index,
                portion: draft.portion,
            });
        }

        let entry_type = match draft.entry_type.parse::<EntryType>() {
            Ok(entry_type) => entry_type,
            Err(_) => {
                issues.push(ValidationIssue::UnknownEntryType {
                    index,
                    value: draft.entry_type.clone(),
                });
                continue;
            }
        };

        if !seen.insert((entry_type, draft.entry_id)) {
            issues.push(ValidationIssue::DuplicateEntry {
                index,
                entry_type,
                entry_id: draft.entry_id,
            });
            continue;
        }

        accepted.push(NewClassEntry {
            entry_type,
            entry_id: draft.entry_id,
            portion: draft.portion,
        });
    }

    // 总分或分值本身无效时，求和比较没有意义
    if total_valid && portions_valid {
        let actual = compensated_sum(entries.iter().map(|e| e.portion));
        if !approx_eq(actual, total_score) {
            issues.push(ValidationIssue::PortionSumMismatch {
                expected: total_score,
                actual,
            });
        }
    }

    if issues.is_empty() {
        Ok(accepted)
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drafts(items: &[(&str, i64, f64)]) -> Vec<EntryDraft> {
        items
            .iter()
            .map(|(t, id, p)| EntryDraft::new(t, *id, *p))
            .collect()
    }

    #[test]
    fn test_accepts_exact_sum() {
        let entries = drafts(&[("exam", 1, 40.0), ("exercise", 2, 30.0), ("project", 3, 30.0)]);
        let accepted = validate_entry_set(100.0, &entries).unwrap();
        assert_eq!(accepted.len(), 3);
        assert_eq!(accepted[0].entry_type, EntryType::Exam);
    }

    #[test]
    fn test_sum_mismatch() {
        let entries = drafts(&[("exam", 1, 40.0), ("exercise", 2, 30.0), ("project", 3, 25.0)]);
        let issues = validate_entry_set(100.0, &entries).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::PortionSumMismatch {
                expected: 100.0,
                actual: 95.0
            }]
        );
    }

    #[test]
    fn test_tolerance_absorbs_rounding() {
        let entries = drafts(&[
            ("exam", 1, 33.3333),
            ("exam", 2, 33.3333),
            ("exercise", 3, 33.3334),
        ]);
        assert!(validate_entry_set(100.0, &entries).is_ok());

        let drifted = drafts(&[("exam", 1, 50.0), ("exam", 2, 50.01)]);
        assert!(validate_entry_set(100.0, &drifted).is_err());
    }

    #[test]
    fn test_one_issue_per_rule() {
        let entries = drafts(&[("quiz", 1, 50.0), ("exam", 2, -5.0), ("exam", 2, 55.0)]);
        let issues = validate_entry_set(0.0, &entries).unwrap_err();

        assert!(issues.contains(&ValidationIssue::NonPositiveTotalScore { total_score: 0.0 }));
        assert!(issues.contains(&ValidationIssue::UnknownEntryType {
            index: 0,
            value: "quiz".into()
        }));
        assert!(issues.contains(&ValidationIssue::NonPositivePortion {
            index: 1,
            portion: -5.0
        }));
        assert!(issues.contains(&ValidationIssue::DuplicateEntry {
            index: 2,
            entry_type: EntryType::Exam,
            entry_id: 2
        }));
        // 总分无效时不再报告求和不一致
        assert!(
            !issues
                .iter()
                .any(|i| matches!(i, ValidationIssue::PortionSumMismatch { .. }))
        );
    }

    #[test]
    fn test_entry_type_is_case_insensitive() {
        let entries = drafts(&[(" Exam ", 1, 100.0)]);
        assert!(validate_entry_set(100.0, &entries).is_ok());
    }

    #[test]
    fn test_empty_set_does_not_sum_to_total() {
        let issues = validate_entry_set(100.0, &[]).unwrap_err();
        assert!(matches!(
            issues[0],
            ValidationIssue::PortionSumMismatch { actual, .. } if actual == 0.0
        ));
    }

    #[test]
    fn test_nan_portion_rejected() {
        let entries = drafts(&[("exam", 1, f64::NAN)]);
        let issues = validate_entry_set(100.0, &entries).unwrap_err();
        assert!(matches!(
            issues[0],
            ValidationIssue::NonPositivePortion { index: 0, .. }
        ));
    }
}
