use serde::{Deserialize, Serialize};

/// 项目小组，作为项目阶段的提交主体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub class_id: i64,
    pub project_id: i64,
    pub team_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
