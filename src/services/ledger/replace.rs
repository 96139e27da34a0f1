use tracing::{info, warn};

use super::{LedgerService, validate_entry_set};
use crate::errors::Result;
use crate::models::{
    Caller, Outcome, Rejection,
    class_entries::{entities::ClassEntrySet, requests::ReplaceEntriesRequest},
};
use crate::services::access;

pub async fn replace_entries(
    service: &LedgerService,
    caller: &Caller,
    req: ReplaceEntriesRequest,
) -> Result<Outcome<ClassEntrySet>> {
    let storage = service.storage();

    let class = try_outcome!(access::load_class(storage, req.class_id).await?);
    try_outcome!(access::authorize_instructor(storage, caller, &class).await?);

    let entries = match validate_entry_set(req.total_score, &req.entries) {
        Ok(entries) => entries,
        Err(issues) => {
            warn!(
                "班级 {} 的成绩构成校验失败: {} 个问题",
                class.id,
                issues.len()
            );
            return Ok(Err(Rejection::validation(issues)));
        }
    };

    let _guard = service.locks.lock(class.id).await;
    let stored = storage
        .replace_class_entries(class.id, req.total_score, entries)
        .await?;

    info!(
        "用户 {} 替换了班级 {} 的成绩构成: 总分 {}，共 {} 项",
        caller.user_id,
        class.id,
        req.total_score,
        stored.len()
    );

    Ok(Ok(ClassEntrySet {
        class_id: class.id,
        total_score: req.total_score,
        entries: stored,
    }))
}
