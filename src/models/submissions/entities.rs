use serde::{Deserialize, Serialize};

use crate::models::common::ValidationIssue;

/// 一次提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub unit_id: i64,
    // 学生 ID 或小组 ID，取决于单元类型
    pub actor_id: i64,
    pub file_name: String,
    // 文件存储返回的不透明路径
    pub file_path: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub is_final: bool,
}

// 排序字段
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    None,
    SubmissionDate,
    TeamName,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::None => write!(f, "none"),
            SortBy::SubmissionDate => write!(f, "submission_date"),
            SortBy::TeamName => write!(f, "team_name"),
        }
    }
}

// 排序方向，None 表示不排序
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::None => write!(f, "none"),
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 校验后的排序方式
///
/// 不排序是独立的取值，不携带方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionSort {
    Unsorted,
    BySubmissionDate(SortDirection),
    ByTeamName(SortDirection),
}

impl SubmissionSort {
    /// 由查询参数构造，排序字段与方向必须同时为空或同时给出
    pub fn from_parts(sort_by: SortBy, sort_order: SortOrder) -> Result<Self, ValidationIssue> {
        let direction = match sort_order {
            SortOrder::None => None,
            SortOrder::Ascending => Some(SortDirection::Ascending),
            SortOrder::Descending => Some(SortDirection::Descending),
        };

        match (sort_by, direction) {
            (SortBy::None, None) => Ok(SubmissionSort::Unsorted),
            (SortBy::SubmissionDate, Some(direction)) => {
                Ok(SubmissionSort::BySubmissionDate(direction))
            }
            (SortBy::TeamName, Some(direction)) => Ok(SubmissionSort::ByTeamName(direction)),
            _ => Err(ValidationIssue::InvalidSortCombination {
                sort_by,
                sort_order,
            }),
        }
    }

    pub fn sort_by(&self) -> SortBy {
        match self {
            SubmissionSort::Unsorted => SortBy::None,
            SubmissionSort::BySubmissionDate(_) => SortBy::SubmissionDate,
            SubmissionSort::ByTeamName(_) => SortBy::TeamName,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsorted_requires_no_direction() {
        assert_eq!(
            SubmissionSort::from_parts(SortBy::None, SortOrder::None),
            Ok(SubmissionSort::Unsorted)
        );
        assert!(SubmissionSort::from_parts(SortBy::None, SortOrder::Ascending).is_err());
        assert!(SubmissionSort::from_parts(SortBy::None, SortOrder::Descending).is_err());
    }

    #[test]
    fn test_sort_field_requires_direction() {
        let err = SubmissionSort::from_parts(SortBy::TeamName, SortOrder::None).unwrap_err();
        assert_eq!(
            err,
            ValidationIssue::InvalidSortCombination {
                sort_by: SortBy::TeamName,
                sort_order: SortOrder::None,
            }
        );
    }

    #[test]
    fn test_valid_combinations() {
        assert_eq!(
            SubmissionSort::from_parts(SortBy::SubmissionDate, SortOrder::Descending),
            Ok(SubmissionSort::BySubmissionDate(SortDirection::Descending))
        );
        assert_eq!(
            SubmissionSort::from_parts(SortBy::TeamName, SortOrder::Ascending),
            Ok(SubmissionSort::ByTeamName(SortDirection::Ascending))
        );
    }

    #[test]
    fn test_query_params_deserialize() {
        let sort_by: SortBy = serde_json::from_str("\"submission_date\"").expect("sort_by");
        let sort_order: SortOrder = serde_json::from_str("\"descending\"").expect("sort_order");
        assert_eq!(sort_by, SortBy::SubmissionDate);
        assert_eq!(sort_order, SortOrder::Descending);
    }
}
