use serde::{Deserialize, Serialize};

// 班级内角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassUserRole {
    Student, // 学生
    Teacher, // 教师
}

impl ClassUserRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
}

impl<'de> Deserialize<'de> for ClassUserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的班级用户角色: '{s}'. 支持的角色: student, teacher"
            ))
        })
    }
}

impl std::fmt::Display for ClassUserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassUserRole::Student => write!(f, "{}", ClassUserRole::STUDENT),
            ClassUserRole::Teacher => write!(f, "{}", ClassUserRole::TEACHER),
        }
    }
}

impl std::str::FromStr for ClassUserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ClassUserRole::STUDENT => Ok(ClassUserRole::Student),
            ClassUserRole::TEACHER => Ok(ClassUserRole::Teacher),
            _ => Err(format!("Invalid class user role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassUser {
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub role: ClassUserRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
