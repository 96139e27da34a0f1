//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::gradable_units::Entity as GradableUnits;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{GradingError, Result};
use crate::models::submissions::entities::Submission;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, DbBackend,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建提交并设为最终提交
    ///
    /// 新行的插入与最终标记的切换在同一事务内完成。
    pub async fn create_final_submission_impl(
        &self,
        unit_id: i64,
        actor_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp_millis();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradingError::database_operation(format!("开启事务失败: {e}")))?;

        Self::lock_unit(&txn, unit_id).await?;

        let model = ActiveModel {
            unit_id: Set(unit_id),
            actor_id: Set(actor_id),
            file_name: Set(file_name.to_string()),
            file_path: Set(file_path.to_string()),
            submitted_at: Set(now),
            is_final: Set(false),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("创建提交失败: {e}")))?;

        Self::flip_final(&txn, unit_id, actor_id, inserted.id).await?;

        let created = Submissions::find_by_id(inserted.id)
            .one(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| GradingError::consistency_violation("新建的提交在事务内不可见"))?;

        txn.commit()
            .await
            .map_err(|e| GradingError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 切换最终提交
    ///
    /// 先执行写入再校验目标行，目标不属于该主体/单元时整体回滚，
    /// 返回 `None`。
    pub async fn set_final_submission_impl(
        &self,
        unit_id: i64,
        actor_id: i64,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradingError::database_operation(format!("开启事务失败: {e}")))?;

        Self::lock_unit(&txn, unit_id).await?;
        Self::flip_final(&txn, unit_id, actor_id, submission_id).await?;

        let target = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询提交失败: {e}")))?;

        match target {
            Some(model) if model.unit_id == unit_id && model.actor_id == actor_id => {
                txn.commit()
                    .await
                    .map_err(|e| GradingError::database_operation(format!("提交事务失败: {e}")))?;
                Ok(Some(model.into_submission()))
            }
            _ => {
                txn.rollback()
                    .await
                    .map_err(|e| GradingError::database_operation(format!("回滚事务失败: {e}")))?;
                Ok(None)
            }
        }
    }

    /// 锁定单元行，使同一单元上切换最终提交的事务在数据库层排队
    ///
    /// 在读已提交隔离级别下，切换语句看不到其他事务尚未提交的新行，
    /// 不排队时两个事务可能各自留下一个最终提交。
    /// SQLite 的写事务本身串行，且先读后写会引发快照冲突，这里跳过。
    async fn lock_unit(txn: &DatabaseTransaction, unit_id: i64) -> Result<()> {
        if txn.get_database_backend() == DbBackend::Sqlite {
            return Ok(());
        }

        GradableUnits::find_by_id(unit_id)
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("锁定评分单元失败: {e}")))?;

        Ok(())
    }

    /// 单条语句完成「取消旧最终提交、设置新最终提交」
    ///
    /// 只触及当前为最终提交的行与目标行。
    async fn flip_final(
        txn: &DatabaseTransaction,
        unit_id: i64,
        actor_id: i64,
        submission_id: i64,
    ) -> Result<u64> {
        let result = Submissions::update_many()
            .col_expr(
                Column::IsFinal,
                Expr::case(Column::Id.eq(submission_id), Expr::value(true))
                    .finally(Expr::value(false))
                    .into(),
            )
            .filter(Column::UnitId.eq(unit_id))
            .filter(Column::ActorId.eq(actor_id))
            .filter(
                Condition::any()
                    .add(Column::IsFinal.eq(true))
                    .add(Column::Id.eq(submission_id)),
            )
            .exec(txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("切换最终提交失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 获取某主体在某单元的全部提交（最新在前）
    pub async fn list_actor_submissions_impl(
        &self,
        unit_id: i64,
        actor_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::UnitId.eq(unit_id))
            .filter(Column::ActorId.eq(actor_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询提交历史失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 获取某单元的全部提交
    pub async fn list_unit_submissions_impl(&self, unit_id: i64) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::UnitId.eq(unit_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }
}
