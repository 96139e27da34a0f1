use serde::Deserialize;

/// 调用方提交的单个构成项，类型以原始字符串接收，由账本校验
#[derive(Debug, Clone, Deserialize)]
pub struct EntryDraft {
    pub entry_id: i64,
    pub entry_type: String,
    pub portion: f64,
}

impl EntryDraft {
    pub fn new(entry_type: &str, entry_id: i64, portion: f64) -> Self {
        Self {
            entry_id,
            entry_type: entry_type.to_string(),
            portion,
        }
    }
}

/// 整体替换班级成绩构成
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceEntriesRequest {
    pub class_id: i64,
    pub total_score: f64,
    pub entries: Vec<EntryDraft>,
}
