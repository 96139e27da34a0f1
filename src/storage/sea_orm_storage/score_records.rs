//! 成绩记录存储操作

use super::SeaOrmStorage;
use crate::entity::score_records::{ActiveModel, Column, Entity as ScoreRecords};
use crate::errors::{GradingError, Result};
use crate::models::scores::entities::{NewScoreRecord, ScoreRecord};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// 批量覆盖写入成绩
    ///
    /// 全部写入在同一事务内，(unit_id, actor_id) 已存在时覆盖分数，
    /// 重复导入同一文件结果不变。
    pub async fn commit_score_records_impl(
        &self,
        unit_id: i64,
        records: Vec<NewScoreRecord>,
    ) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradingError::database_operation(format!("开启事务失败: {e}")))?;

        let mut written = 0;
        for record in records {
            let model = ActiveModel {
                unit_id: Set(unit_id),
                actor_id: Set(record.actor_id),
                score: Set(record.score),
                row_origin: Set(record.row_origin),
                recorded_at: Set(now),
                ..Default::default()
            };

            ScoreRecords::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::UnitId, Column::ActorId])
                        .update_columns([Column::Score, Column::RowOrigin, Column::RecordedAt])
                        .to_owned(),
                )
                .exec(&txn)
                .await
                .map_err(|e| GradingError::database_operation(format!("写入成绩失败: {e}")))?;
            written += 1;
        }

        txn.commit()
            .await
            .map_err(|e| GradingError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(written)
    }

    /// 列出单元的全部成绩
    pub async fn list_score_records_impl(&self, unit_id: i64) -> Result<Vec<ScoreRecord>> {
        let results = ScoreRecords::find()
            .filter(Column::UnitId.eq(unit_id))
            .order_by_asc(Column::ActorId)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_score_record()).collect())
    }
}
