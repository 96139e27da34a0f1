use serde::Serialize;

use super::entities::Submission;

/// 提交列表项，附带提交主体名称
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListItem {
    #[serde(flatten)]
    pub submission: Submission,
    pub actor_name: String,
}

/// 提交附件内容
#[derive(Debug, Clone)]
pub struct SubmissionArtifact {
    pub submission: Submission,
    pub content: Vec<u8>,
}
