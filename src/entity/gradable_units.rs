//! 可评分单元实体

use sea_orm::entity::prelude::*;

use crate::errors::GradingError;
use crate::models::units::entities::GradableUnit;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gradable_units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub project_id: Option<i64>,
    pub kind: String,
    pub title: String,
    pub max_score: f64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
    #[sea_orm(has_many = "super::score_records::Entity")]
    ScoreRecords,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::score_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScoreRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_unit(self) -> crate::errors::Result<GradableUnit> {
        use chrono::{DateTime, Utc};

        let kind = self.kind.parse().map_err(|e: String| {
            GradingError::consistency_violation(format!("评分单元 {} 类型无效: {e}", self.id))
        })?;

        Ok(GradableUnit {
            id: self.id,
            class_id: self.class_id,
            project_id: self.project_id,
            kind,
            title: self.title,
            max_score: self.max_score,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        })
    }
}
