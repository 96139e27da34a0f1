use serde::{Deserialize, Serialize};

/// 提交主体在某单元上的成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: i64,
    pub unit_id: i64,
    pub actor_id: i64,
    pub score: f64,
    // 导入时的来源行号，仅用于报告
    pub row_origin: Option<i32>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

/// 待写入的成绩
#[derive(Debug, Clone, PartialEq)]
pub struct NewScoreRecord {
    pub actor_id: i64,
    pub score: f64,
    pub row_origin: Option<i32>,
}
