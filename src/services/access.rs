//! 调用者与提交主体的权限判断
//!
//! 这里的函数只读取存储，不做任何写入。

use tracing::warn;

use crate::errors::Result;
use crate::models::{
    Caller, Outcome, Rejection, class_users::entities::ClassUserRole, classes::entities::Class,
    units::entities::{ActorKind, GradableUnit},
};
use crate::storage::Storage;

pub(crate) async fn load_class(storage: &dyn Storage, class_id: i64) -> Result<Outcome<Class>> {
    Ok(storage
        .get_class_by_id(class_id)
        .await?
        .ok_or(Rejection::ClassNotFound { class_id }))
}

pub(crate) async fn load_unit(
    storage: &dyn Storage,
    unit_id: i64,
) -> Result<Outcome<GradableUnit>> {
    Ok(storage
        .get_unit_by_id(unit_id)
        .await?
        .ok_or(Rejection::UnitNotFound { unit_id }))
}

/// 管理员、班级创建者或以教师身份加入班级的用户
pub(crate) async fn is_class_instructor(
    storage: &dyn Storage,
    caller: &Caller,
    class: &Class,
) -> Result<bool> {
    if caller.is_admin() || class.teacher_id == caller.user_id {
        return Ok(true);
    }

    let role = storage
        .get_class_user_role(class.id, caller.user_id)
        .await?;
    Ok(role == Some(ClassUserRole::Teacher))
}

pub(crate) async fn authorize_instructor(
    storage: &dyn Storage,
    caller: &Caller,
    class: &Class,
) -> Result<Outcome<()>> {
    if is_class_instructor(storage, caller, class).await? {
        return Ok(Ok(()));
    }

    warn!(
        "用户 {} 尝试执行班级 {} 的教师操作被拒绝",
        caller.user_id, class.id
    );
    Ok(Err(Rejection::CallerNotAuthorized {
        caller_id: caller.user_id,
        reason: format!("用户 {} 不是班级 {} 的教师", caller.user_id, class.id),
    }))
}

/// 提交主体是否与单元关联
///
/// 个人单元要求主体是班级内的学生；小组单元要求主体是单元所属项目的小组。
pub(crate) async fn is_actor_associated(
    storage: &dyn Storage,
    unit: &GradableUnit,
    actor_id: i64,
) -> Result<bool> {
    match unit.actor_kind() {
        ActorKind::Student => {
            let role = storage.get_class_user_role(unit.class_id, actor_id).await?;
            Ok(role == Some(ClassUserRole::Student))
        }
        ActorKind::Team => {
            let Some(team) = storage.get_team_by_id(actor_id).await? else {
                return Ok(false);
            };
            Ok(team.class_id == unit.class_id && Some(team.project_id) == unit.project_id)
        }
    }
}

/// 调用者能否代表该主体操作：学生本人或小组成员，管理员不受限
async fn can_act_for(
    storage: &dyn Storage,
    caller: &Caller,
    unit: &GradableUnit,
    actor_id: i64,
) -> Result<bool> {
    if caller.is_admin() {
        return Ok(true);
    }

    match unit.actor_kind() {
        ActorKind::Student => Ok(caller.user_id == actor_id),
        ActorKind::Team => storage.is_team_member(actor_id, caller.user_id).await,
    }
}

/// 写操作：主体须与单元关联，且调用者能代表该主体
pub(crate) async fn authorize_actor(
    storage: &dyn Storage,
    caller: &Caller,
    unit: &GradableUnit,
    actor_id: i64,
) -> Result<Outcome<()>> {
    if is_actor_associated(storage, unit, actor_id).await?
        && can_act_for(storage, caller, unit, actor_id).await?
    {
        return Ok(Ok(()));
    }

    warn!(
        "用户 {} 无权代表主体 {} 操作评分单元 {}",
        caller.user_id, actor_id, unit.id
    );
    Ok(Err(Rejection::ActorNotAuthorizedForUnit {
        actor_id,
        unit_id: unit.id,
    }))
}

/// 读操作：在写权限之外，班级教师也可查看
pub(crate) async fn authorize_actor_view(
    storage: &dyn Storage,
    caller: &Caller,
    unit: &GradableUnit,
    actor_id: i64,
) -> Result<Outcome<()>> {
    if !is_actor_associated(storage, unit, actor_id).await? {
        return Ok(Err(Rejection::ActorNotAuthorizedForUnit {
            actor_id,
            unit_id: unit.id,
        }));
    }

    if can_act_for(storage, caller, unit, actor_id).await? {
        return Ok(Ok(()));
    }

    if let Some(class) = storage.get_class_by_id(unit.class_id).await?
        && is_class_instructor(storage, caller, &class).await?
    {
        return Ok(Ok(()));
    }

    Ok(Err(Rejection::ActorNotAuthorizedForUnit {
        actor_id,
        unit_id: unit.id,
    }))
}

/// 加载单元所属班级并校验教师权限
pub(crate) async fn authorize_unit_instructor(
    storage: &dyn Storage,
    caller: &Caller,
    unit: &GradableUnit,
) -> Result<Outcome<Class>> {
    let class = try_outcome!(load_class(storage, unit.class_id).await?);
    try_outcome!(authorize_instructor(storage, caller, &class).await?);
    Ok(Ok(class))
}
