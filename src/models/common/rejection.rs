//! 业务拒绝
//!
//! 预期内的失败（校验、权限、未找到、文件格式）以数据形式返回给调用方，
//! 不作为异常抛出。

use serde::Serialize;
use std::fmt;

use crate::models::class_entries::entities::EntryType;
use crate::models::submissions::entities::{SortBy, SortOrder};
use crate::models::units::entities::UnitKind;

/// 业务操作结果：`Err` 为预期内的拒绝
pub type Outcome<T> = std::result::Result<T, Rejection>;

/// 拒绝类别，供外层映射到不同的对外信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCategory {
    Validation,
    Authorization,
    NotFound,
    Format,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    ClassNotFound { class_id: i64 },
    UnitNotFound { unit_id: i64 },
    SubmissionNotFound { submission_id: i64 },
    /// 提交主体没有该单元的选课或小组关系，或调用者不能代表该主体
    ActorNotAuthorizedForUnit { actor_id: i64, unit_id: i64 },
    /// 调用者不是该班级的教师
    CallerNotAuthorized { caller_id: i64, reason: String },
    /// 文件无法解析或表头与模板不符
    InvalidTemplateFormat { reason: String },
    Validation { issues: Vec<ValidationIssue> },
}

impl Rejection {
    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Rejection::Validation { issues }
    }

    pub fn invalid_template<T: Into<String>>(reason: T) -> Self {
        Rejection::InvalidTemplateFormat {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> RejectionCategory {
        match self {
            Rejection::ClassNotFound { .. }
            | Rejection::UnitNotFound { .. }
            | Rejection::SubmissionNotFound { .. } => RejectionCategory::NotFound,
            Rejection::ActorNotAuthorizedForUnit { .. } | Rejection::CallerNotAuthorized { .. } => {
                RejectionCategory::Authorization
            }
            Rejection::InvalidTemplateFormat { .. } => RejectionCategory::Format,
            Rejection::Validation { .. } => RejectionCategory::Validation,
        }
    }

    /// 校验失败时的具体问题列表
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Rejection::Validation { issues } => issues,
            _ => &[],
        }
    }

    pub fn message(&self) -> String {
        match self {
            Rejection::ClassNotFound { class_id } => format!("班级不存在: {class_id}"),
            Rejection::UnitNotFound { unit_id } => format!("评分单元不存在: {unit_id}"),
            Rejection::SubmissionNotFound { submission_id } => {
                format!("提交不存在: {submission_id}")
            }
            Rejection::ActorNotAuthorizedForUnit { actor_id, unit_id } => {
                format!("提交主体 {actor_id} 无权访问评分单元 {unit_id}")
            }
            Rejection::CallerNotAuthorized { reason, .. } => reason.clone(),
            Rejection::InvalidTemplateFormat { reason } => format!("模板格式无效: {reason}"),
            Rejection::Validation { issues } => issues
                .iter()
                .map(ValidationIssue::message)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// 单条校验问题，每条对应一条被违反的规则
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    NonPositiveTotalScore {
        total_score: f64,
    },
    NonPositivePortion {
        index: usize,
        portion: f64,
    },
    UnknownEntryType {
        index: usize,
        value: String,
    },
    DuplicateEntry {
        index: usize,
        entry_type: EntryType,
        entry_id: i64,
    },
    PortionSumMismatch {
        expected: f64,
        actual: f64,
    },
    InvalidSortCombination {
        sort_by: SortBy,
        sort_order: SortOrder,
    },
    SortNotApplicable {
        sort_by: SortBy,
        unit_kind: UnitKind,
    },
    SubmissionsNotAccepted {
        unit_id: i64,
        unit_kind: UnitKind,
    },
    EmptyFileName,
    EmptyArtifact,
    ArtifactTooLarge {
        size: usize,
        limit: usize,
    },
}

impl ValidationIssue {
    pub fn message(&self) -> String {
        match self {
            ValidationIssue::NonPositiveTotalScore { total_score } => {
                format!("总分必须大于 0，当前为 {total_score}")
            }
            ValidationIssue::NonPositivePortion { index, portion } => {
                format!("第 {} 项的分值必须大于 0，当前为 {portion}", index + 1)
            }
            ValidationIssue::UnknownEntryType { index, value } => format!(
                "第 {} 项的类型无效: '{value}'，支持: exam, exercise, project",
                index + 1
            ),
            ValidationIssue::DuplicateEntry {
                index,
                entry_type,
                entry_id,
            } => format!("第 {} 项重复: {entry_type} {entry_id}", index + 1),
            ValidationIssue::PortionSumMismatch { expected, actual } => {
                format!("各项分值之和 {actual} 与总分 {expected} 不一致")
            }
            ValidationIssue::InvalidSortCombination {
                sort_by,
                sort_order,
            } => format!("排序字段 {sort_by} 不能与排序方向 {sort_order} 组合"),
            ValidationIssue::SortNotApplicable { sort_by, unit_kind } => {
                format!("{unit_kind} 类型的单元不支持按 {sort_by} 排序")
            }
            ValidationIssue::SubmissionsNotAccepted { unit_id, unit_kind } => {
                format!("评分单元 {unit_id} ({unit_kind}) 不接受提交")
            }
            ValidationIssue::EmptyFileName => "文件名不能为空".to_string(),
            ValidationIssue::EmptyArtifact => "提交文件内容为空".to_string(),
            ValidationIssue::ArtifactTooLarge { size, limit } => {
                format!("提交文件大小 {size} 字节超过上限 {limit} 字节")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            Rejection::UnitNotFound { unit_id: 1 }.category(),
            RejectionCategory::NotFound
        );
        assert_eq!(
            Rejection::ActorNotAuthorizedForUnit {
                actor_id: 1,
                unit_id: 2
            }
            .category(),
            RejectionCategory::Authorization
        );
        assert_eq!(
            Rejection::invalid_template("header mismatch").category(),
            RejectionCategory::Format
        );
        assert_eq!(
            Rejection::validation(vec![ValidationIssue::EmptyArtifact]).category(),
            RejectionCategory::Validation
        );
    }

    #[test]
    fn test_validation_message_joins_issues() {
        let rejection = Rejection::validation(vec![
            ValidationIssue::NonPositiveTotalScore { total_score: 0.0 },
            ValidationIssue::PortionSumMismatch {
                expected: 100.0,
                actual: 95.0,
            },
        ]);
        let message = rejection.message();
        assert!(message.contains("总分"));
        assert!(message.contains("95"));
        assert_eq!(rejection.issues().len(), 2);
    }

    #[test]
    fn test_serialized_shape_is_tagged() {
        let value = serde_json::to_value(Rejection::SubmissionNotFound { submission_id: 7 })
            .expect("serialize");
        assert_eq!(value["kind"], "submission_not_found");
        assert_eq!(value["submission_id"], 7);
    }
}
