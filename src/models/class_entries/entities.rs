use serde::{Deserialize, Serialize};

/// 成绩构成项类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Exam,
    Exercise,
    Project,
}

impl EntryType {
    pub const EXAM: &'static str = "exam";
    pub const EXERCISE: &'static str = "exercise";
    pub const PROJECT: &'static str = "project";
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::Exam => write!(f, "{}", EntryType::EXAM),
            EntryType::Exercise => write!(f, "{}", EntryType::EXERCISE),
            EntryType::Project => write!(f, "{}", EntryType::PROJECT),
        }
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            EntryType::EXAM => Ok(EntryType::Exam),
            EntryType::EXERCISE => Ok(EntryType::Exercise),
            EntryType::PROJECT => Ok(EntryType::Project),
            _ => Err(format!("Invalid entry type: {s}")),
        }
    }
}

/// 班级总分中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub id: i64,
    pub class_id: i64,
    pub entry_type: EntryType,
    /// 对应的考试、练习或项目 ID
    pub entry_id: i64,
    pub portion: f64,
}

/// 通过校验、待写入的构成项
#[derive(Debug, Clone, PartialEq)]
pub struct NewClassEntry {
    pub entry_type: EntryType,
    pub entry_id: i64,
    pub portion: f64,
}

/// 班级的完整成绩构成
#[derive(Debug, Clone, Serialize)]
pub struct ClassEntrySet {
    pub class_id: i64,
    pub total_score: f64,
    pub entries: Vec<ClassEntry>,
}
