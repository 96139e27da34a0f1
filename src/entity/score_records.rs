//! 成绩记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "score_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub unit_id: i64,
    pub actor_id: i64,
    pub score: f64,
    pub row_origin: Option<i32>,
    pub recorded_at: i64,
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
    pub fn into_score_record(self) -> crate::models::scores::entities::ScoreRecord {
        use crate::models::scores::entities::ScoreRecord;
        use chrono::{DateTime, Utc};

        ScoreRecord {
            id: self.id,
            unit_id: self.unit_id,
            actor_id: self.actor_id,
            score: self.score,
            row_origin: self.row_origin,
            recorded_at: DateTime::<Utc>::from_timestamp(self.recorded_at, 0).unwrap_or_default(),
        }
    }
}
