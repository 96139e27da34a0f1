use serde::{Deserialize, Serialize};

/// 可评分单元类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Exam,     // 考试，只登记成绩
    Exercise, // 练习，个人提交
    Phase,    // 项目阶段，小组提交
}

impl UnitKind {
    pub const EXAM: &'static str = "exam";
    pub const EXERCISE: &'static str = "exercise";
    pub const PHASE: &'static str = "phase";

    pub fn accepts_submissions(&self) -> bool {
        matches!(self, UnitKind::Exercise | UnitKind::Phase)
    }

    pub fn actor_kind(&self) -> ActorKind {
        match self {
            UnitKind::Exam | UnitKind::Exercise => ActorKind::Student,
            UnitKind::Phase => ActorKind::Team,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Exam => write!(f, "{}", UnitKind::EXAM),
            UnitKind::Exercise => write!(f, "{}", UnitKind::EXERCISE),
            UnitKind::Phase => write!(f, "{}", UnitKind::PHASE),
        }
    }
}

impl std::str::FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UnitKind::EXAM => Ok(UnitKind::Exam),
            UnitKind::EXERCISE => Ok(UnitKind::Exercise),
            UnitKind::PHASE => Ok(UnitKind::Phase),
            _ => Err(format!("Invalid unit kind: {s}")),
        }
    }
}

/// 提交主体类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Student,
    Team,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradableUnit {
    pub id: i64,
    pub class_id: i64,
    // 项目阶段所属项目，其余类型为空
    pub project_id: Option<i64>,
    pub kind: UnitKind,
    pub title: String,
    pub max_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl GradableUnit {
    pub fn actor_kind(&self) -> ActorKind {
        self.kind.actor_kind()
    }

    pub fn accepts_score(&self, score: f64) -> bool {
        score.is_finite() && (0.0..=self.max_score).contains(&score)
    }
}

/// 与单元关联的提交主体（学生或小组）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitActor {
    pub actor_id: i64,
    pub name: String,
    /// 成绩表中的标识：学生为学号，小组为小组编号
    pub identifier: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_kind_round_trip() {
        for kind in [UnitKind::Exam, UnitKind::Exercise, UnitKind::Phase] {
            assert_eq!(kind.to_string().parse::<UnitKind>(), Ok(kind));
        }
        assert!("homework".parse::<UnitKind>().is_err());
    }

    #[test]
    fn test_actor_kind() {
        assert_eq!(UnitKind::Exercise.actor_kind(), ActorKind::Student);
        assert_eq!(UnitKind::Phase.actor_kind(), ActorKind::Team);
        assert!(!UnitKind::Exam.accepts_submissions());
    }

    #[test]
    fn test_accepts_score_bounds() {
        let unit = GradableUnit {
            id: 1,
            class_id: 1,
            project_id: None,
            kind: UnitKind::Exam,
            title: "Midterm".to_string(),
            max_score: 20.0,
            created_at: chrono::Utc::now(),
        };
        assert!(unit.accepts_score(0.0));
        assert!(unit.accepts_score(20.0));
        assert!(!unit.accepts_score(20.5));
        assert!(!unit.accepts_score(-1.0));
        assert!(!unit.accepts_score(f64::NAN));
    }
}
