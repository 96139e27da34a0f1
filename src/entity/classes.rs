//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub class_name: String,
    pub total_score: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::class_users::Entity")]
    ClassUsers,
    #[sea_orm(has_many = "super::class_entries::Entity")]
    ClassEntries,
    #[sea_orm(has_many = "super::gradable_units::Entity")]
    GradableUnits,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::class_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassUsers.def()
    }
}

impl Related<super::class_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassEntries.def()
    }
}

impl Related<super::gradable_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradableUnits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::Class;
        use chrono::{DateTime, Utc};

        Class {
            id: self.id,
            class_name: self.class_name,
            teacher_id: self.teacher_id,
            total_score: self.total_score,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
