use tracing::{info, warn};

use super::SubmissionService;
use crate::errors::Result;
use crate::models::{
    Caller, Outcome, Rejection, ValidationIssue,
    submissions::{entities::Submission, requests::SubmitRequest},
};
use crate::services::access;
use crate::utils::sanitize_file_name;

pub async fn submit(
    service: &SubmissionService,
    caller: &Caller,
    req: SubmitRequest,
) -> Result<Outcome<Submission>> {
    let storage = service.storage();

    let unit = try_outcome!(access::load_unit(storage, req.unit_id).await?);
    if !unit.kind.accepts_submissions() {
        return Ok(Err(Rejection::validation(vec![
            ValidationIssue::SubmissionsNotAccepted {
                unit_id: unit.id,
                unit_kind: unit.kind,
            },
        ])));
    }

    try_outcome!(access::authorize_actor(storage, caller, &unit, req.actor_id).await?);

    // 附件校验
    let mut issues = Vec::new();
    let file_name = sanitize_file_name(&req.file_name);
    if file_name.is_none() {
        issues.push(ValidationIssue::EmptyFileName);
    }
    if req.content.is_empty() {
        issues.push(ValidationIssue::EmptyArtifact);
    } else if req.content.len() > service.upload.max_size {
        issues.push(ValidationIssue::ArtifactTooLarge {
            size: req.content.len(),
            limit: service.upload.max_size,
        });
    }
    let Some(file_name) = file_name.filter(|_| issues.is_empty()) else {
        return Ok(Err(Rejection::validation(issues)));
    };

    let _guard = service.locks.lock((unit.id, req.actor_id)).await;

    let folder = format!(
        "{}/{}/{}",
        service.upload.submission_folder, unit.id, req.actor_id
    );
    let file_path = service.files.save(&folder, &file_name, &req.content).await?;

    let submission = match storage
        .create_final_submission(unit.id, req.actor_id, &file_name, &file_path)
        .await
    {
        Ok(submission) => submission,
        Err(e) => {
            // 记录写入失败时清理已保存的附件
            if let Err(cleanup) = service.files.delete(&file_path).await {
                warn!("清理附件 {} 失败: {}", file_path, cleanup);
            }
            return Err(e);
        }
    };

    info!(
        "主体 {} 在评分单元 {} 上提交了 {}（提交 {}），已设为最终提交",
        req.actor_id, unit.id, file_name, submission.id
    );

    Ok(Ok(submission))
}
