use tracing::{debug, error, info};

use super::SubmissionService;
use crate::errors::{GradingError, Result};
use crate::models::{
    Caller, Outcome, Rejection,
    submissions::{entities::Submission, requests::SetFinalRequest},
};
use crate::services::access;

pub async fn set_final(
    service: &SubmissionService,
    caller: &Caller,
    req: SetFinalRequest,
) -> Result<Outcome<Submission>> {
    let storage = service.storage();

    let unit = try_outcome!(access::load_unit(storage, req.unit_id).await?);
    try_outcome!(access::authorize_actor(storage, caller, &unit, req.actor_id).await?);

    let not_found = Rejection::SubmissionNotFound {
        submission_id: req.submission_id,
    };

    let _guard = service.locks.lock((unit.id, req.actor_id)).await;

    // 提交必须属于该 (单元, 主体)
    let Some(target) = storage
        .get_submission_by_id(req.submission_id)
        .await?
        .filter(|s| s.unit_id == unit.id && s.actor_id == req.actor_id)
    else {
        return Ok(Err(not_found));
    };

    if target.is_final {
        debug!("提交 {} 已是最终提交，无需切换", target.id);
        return Ok(Ok(target));
    }

    let Some(updated) = storage
        .set_final_submission(unit.id, req.actor_id, target.id)
        .await?
    else {
        return Ok(Err(not_found));
    };

    info!(
        "用户 {} 将主体 {} 在评分单元 {} 上的最终提交切换为 {}",
        caller.user_id, req.actor_id, unit.id, updated.id
    );

    Ok(Ok(updated))
}

pub async fn get_final(
    service: &SubmissionService,
    caller: &Caller,
    unit_id: i64,
    actor_id: i64,
) -> Result<Outcome<Option<Submission>>> {
    let storage = service.storage();

    let unit = try_outcome!(access::load_unit(storage, unit_id).await?);
    try_outcome!(access::authorize_actor_view(storage, caller, &unit, actor_id).await?);

    let submissions = storage.list_actor_submissions(unit.id, actor_id).await?;
    let total = submissions.len();
    let mut finals: Vec<Submission> = submissions.into_iter().filter(|s| s.is_final).collect();

    match (finals.len(), total) {
        (0, 0) => Ok(Ok(None)),
        (1, _) => Ok(Ok(finals.pop())),
        (count, total) => {
            error!(
                "一致性错误: 主体 {} 在评分单元 {} 上有 {} 个提交，其中 {} 个为最终提交",
                actor_id, unit.id, total, count
            );
            Err(GradingError::consistency_violation(format!(
                "主体 {actor_id} 在评分单元 {} 上的最终提交数量为 {count}",
                unit.id
            )))
        }
    }
}
