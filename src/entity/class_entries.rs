//! 班级成绩构成实体

use sea_orm::entity::prelude::*;

use crate::errors::GradingError;
use crate::models::class_entries::entities::ClassEntry;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub entry_type: String,
    pub entry_id: i64,
    pub portion: f64,
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
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，类型字段无法识别说明库中数据已损坏
    pub fn into_class_entry(self) -> crate::errors::Result<ClassEntry> {
        let entry_type = self.entry_type.parse().map_err(|e: String| {
            GradingError::consistency_violation(format!("成绩构成项 {} 类型无效: {e}", self.id))
        })?;

        Ok(ClassEntry {
            id: self.id,
            class_id: self.class_id,
            entry_type,
            entry_id: self.entry_id,
            portion: self.portion,
        })
    }
}
