use serde::Deserialize;

use super::entities::{SortBy, SortOrder};

/// 上传一次提交
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub unit_id: i64,
    pub actor_id: i64,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// 指定某次提交为最终提交
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SetFinalRequest {
    pub unit_id: i64,
    pub actor_id: i64,
    pub submission_id: i64,
}

/// 单元提交列表查询参数
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SubmissionListQuery {
    pub unit_id: i64,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}
