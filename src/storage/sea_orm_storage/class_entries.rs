//! 成绩构成存储操作

use super::SeaOrmStorage;
use crate::entity::class_entries::{ActiveModel, Column, Entity as ClassEntries};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::errors::{GradingError, Result};
use crate::models::class_entries::entities::{ClassEntry, NewClassEntry};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 列出班级的成绩构成
    pub async fn list_class_entries_impl(&self, class_id: i64) -> Result<Vec<ClassEntry>> {
        let results = ClassEntries::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询成绩构成失败: {e}")))?;

        results.into_iter().map(|m| m.into_class_entry()).collect()
    }

    /// 整体替换成绩构成
    ///
    /// 删除旧集合、更新班级总分、写入新集合在同一事务内完成，
    /// 任何读者都不会看到分值之和与总分不一致的中间状态。
    pub async fn replace_class_entries_impl(
        &self,
        class_id: i64,
        total_score: f64,
        entries: Vec<NewClassEntry>,
    ) -> Result<Vec<ClassEntry>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradingError::database_operation(format!("开启事务失败: {e}")))?;

        Classes::update_many()
            .col_expr(ClassColumn::TotalScore, Expr::value(total_score))
            .col_expr(ClassColumn::UpdatedAt, Expr::value(now))
            .filter(ClassColumn::Id.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("更新班级总分失败: {e}")))?;

        ClassEntries::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("删除旧成绩构成失败: {e}")))?;

        let mut inserted = Vec::with_capacity(entries.len());
        for entry in entries {
            let model = ActiveModel {
                class_id: Set(class_id),
                entry_type: Set(entry.entry_type.to_string()),
                entry_id: Set(entry.entry_id),
                portion: Set(entry.portion),
                created_at: Set(now),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| GradingError::database_operation(format!("写入成绩构成失败: {e}")))?;
            inserted.push(result.into_class_entry()?);
        }

        txn.commit()
            .await
            .map_err(|e| GradingError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted)
    }
}
