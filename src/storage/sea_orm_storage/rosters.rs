//! 名册存储操作（用户、班级、班级成员、小组）

use super::SeaOrmStorage;
use crate::entity::class_users::{
    ActiveModel as ClassUserActiveModel, Column as ClassUserColumn, Entity as ClassUsers,
};
use crate::entity::classes::{ActiveModel as ClassActiveModel, Entity as Classes};
use crate::entity::team_members::{
    ActiveModel as TeamMemberActiveModel, Column as TeamMemberColumn, Entity as TeamMembers,
};
use crate::entity::teams::{ActiveModel as TeamActiveModel, Entity as Teams};
use crate::entity::users::ActiveModel as UserActiveModel;
use crate::errors::{GradingError, Result};
use crate::models::{
    class_users::entities::{ClassUser, ClassUserRole},
    classes::{entities::Class, requests::CreateClassRequest},
    teams::{entities::Team, requests::CreateTeamRequest},
    users::{entities::User, requests::CreateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, user: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = UserActiveModel {
            username: Set(user.username),
            display_name: Set(user.display_name),
            identifier_number: Set(user.identifier_number),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 创建班级
    pub async fn create_class_impl(&self, class: CreateClassRequest) -> Result<Class> {
        if !class.total_score.is_finite() || class.total_score <= 0.0 {
            return Err(GradingError::invalid_record(format!(
                "班级总分必须大于 0，当前为 {}",
                class.total_score
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let model = ClassActiveModel {
            teacher_id: Set(class.teacher_id),
            class_name: Set(class.class_name),
            total_score: Set(class.total_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 加入班级
    pub async fn add_class_user_impl(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser> {
        let now = chrono::Utc::now().timestamp();

        let model = ClassUserActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("加入班级失败: {e}")))?;

        Ok(result.into_class_user())
    }

    /// 获取用户在班级中的角色
    pub async fn get_class_user_role_impl(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Option<ClassUserRole>> {
        let result = ClassUsers::find()
            .filter(
                Condition::all()
                    .add(ClassUserColumn::ClassId.eq(class_id))
                    .add(ClassUserColumn::UserId.eq(user_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询班级成员失败: {e}")))?;

        Ok(result.map(|m| m.into_class_user().role))
    }

    /// 创建小组
    pub async fn create_team_impl(&self, team: CreateTeamRequest) -> Result<Team> {
        let now = chrono::Utc::now().timestamp();

        let model = TeamActiveModel {
            class_id: Set(team.class_id),
            project_id: Set(team.project_id),
            team_name: Set(team.team_name),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("创建小组失败: {e}")))?;

        Ok(result.into_team())
    }

    /// 通过 ID 获取小组
    pub async fn get_team_by_id_impl(&self, team_id: i64) -> Result<Option<Team>> {
        let result = Teams::find_by_id(team_id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_team()))
    }

    /// 添加小组成员
    pub async fn add_team_member_impl(&self, team_id: i64, user_id: i64) -> Result<()> {
        let model = TeamMemberActiveModel {
            team_id: Set(team_id),
            user_id: Set(user_id),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("添加小组成员失败: {e}")))?;

        Ok(())
    }

    /// 是否为小组成员
    pub async fn is_team_member_impl(&self, team_id: i64, user_id: i64) -> Result<bool> {
        let count = TeamMembers::find()
            .filter(
                Condition::all()
                    .add(TeamMemberColumn::TeamId.eq(team_id))
                    .add(TeamMemberColumn::UserId.eq(user_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(count > 0)
    }
}
