//! 评分单元存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::class_users::{Column as ClassUserColumn, Entity as ClassUsers};
use crate::entity::gradable_units::{ActiveModel, Entity as GradableUnits};
use crate::entity::teams::{Column as TeamColumn, Entity as Teams};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradingError, Result};
use crate::models::{
    class_users::entities::ClassUserRole,
    units::{
        entities::{ActorKind, GradableUnit, UnitActor},
        requests::CreateUnitRequest,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评分单元
    pub async fn create_unit_impl(&self, unit: CreateUnitRequest) -> Result<GradableUnit> {
        if !unit.max_score.is_finite() || unit.max_score < 0.0 {
            return Err(GradingError::invalid_record(format!(
                "评分单元满分必须为非负数，当前为 {}",
                unit.max_score
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(unit.class_id),
            project_id: Set(unit.project_id),
            kind: Set(unit.kind.to_string()),
            title: Set(unit.title),
            max_score: Set(unit.max_score),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("创建评分单元失败: {e}")))?;

        result.into_unit()
    }

    /// 通过 ID 获取评分单元
    pub async fn get_unit_by_id_impl(&self, unit_id: i64) -> Result<Option<GradableUnit>> {
        let result = GradableUnits::find_by_id(unit_id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询评分单元失败: {e}")))?;

        result.map(|m| m.into_unit()).transpose()
    }

    /// 列出与单元关联的提交主体
    ///
    /// 个人单元：班级内的学生；小组单元：所属项目的小组。
    pub async fn list_unit_actors_impl(&self, unit: &GradableUnit) -> Result<Vec<UnitActor>> {
        match unit.actor_kind() {
            ActorKind::Student => self.list_class_students(unit.class_id).await,
            ActorKind::Team => {
                let Some(project_id) = unit.project_id else {
                    return Ok(vec![]);
                };
                self.list_project_teams(unit.class_id, project_id).await
            }
        }
    }

    async fn list_class_students(&self, class_id: i64) -> Result<Vec<UnitActor>> {
        let members = ClassUsers::find()
            .filter(ClassUserColumn::ClassId.eq(class_id))
            .filter(ClassUserColumn::Role.eq(ClassUserRole::STUDENT))
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询班级学生失败: {e}")))?;

        let user_ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        // 批量查询用户信息
        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询用户信息失败: {e}")))?;
        let user_map: HashMap<i64, _> = users
            .into_iter()
            .map(|u| (u.id, u.into_user()))
            .collect();

        Ok(user_ids
            .into_iter()
            .filter_map(|id| user_map.get(&id))
            .map(|user| UnitActor {
                actor_id: user.id,
                name: user.name().to_string(),
                identifier: user.identifier_number.clone().unwrap_or_default(),
            })
            .collect())
    }

    async fn list_project_teams(&self, class_id: i64, project_id: i64) -> Result<Vec<UnitActor>> {
        let teams = Teams::find()
            .filter(TeamColumn::ClassId.eq(class_id))
            .filter(TeamColumn::ProjectId.eq(project_id))
            .order_by_asc(TeamColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询项目小组失败: {e}")))?;

        Ok(teams
            .into_iter()
            .map(|team| UnitActor {
                actor_id: team.id,
                identifier: team.id.to_string(),
                name: team.team_name,
            })
            .collect())
    }
}
