use super::LedgerService;
use crate::errors::Result;
use crate::models::{Caller, Outcome, Rejection, class_entries::entities::ClassEntrySet};
use crate::services::access;

pub async fn get_entries(
    service: &LedgerService,
    caller: &Caller,
    class_id: i64,
) -> Result<Outcome<ClassEntrySet>> {
    let storage = service.storage();

    let class = try_outcome!(access::load_class(storage, class_id).await?);

    // 教师与班级学生都可以查看成绩构成
    if !access::is_class_instructor(storage, caller, &class).await?
        && storage
            .get_class_user_role(class.id, caller.user_id)
            .await?
            .is_none()
    {
        return Ok(Err(Rejection::CallerNotAuthorized {
            caller_id: caller.user_id,
            reason: format!("用户 {} 不属于班级 {}", caller.user_id, class.id),
        }));
    }

    let entries = storage.list_class_entries(class.id).await?;

    Ok(Ok(ClassEntrySet {
        class_id: class.id,
        total_score: class.total_score,
        entries,
    }))
}
