//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub unit_id: i64,
    pub actor_id: i64,
    pub file_name: String,
    pub file_path: String,
    pub submitted_at: i64,
    pub is_final: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gradable_units::Entity",
        from = "Column::UnitId",
        to = "super::gradable_units::Column::Id"
    )]
    Unit,
}

impl Related<super::gradable_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::Submission;
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            unit_id: self.unit_id,
            actor_id: self.actor_id,
            file_name: self.file_name,
            file_path: self.file_path,
            submitted_at: DateTime::<Utc>::from_timestamp_millis(self.submitted_at)
                .unwrap_or_default(),
            is_final: self.is_final,
        }
    }
}
