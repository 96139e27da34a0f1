use super::SubmissionService;
use crate::errors::Result;
use crate::models::{Caller, Outcome, Rejection, submissions::responses::SubmissionArtifact};
use crate::services::access;

pub async fn read_artifact(
    service: &SubmissionService,
    caller: &Caller,
    submission_id: i64,
) -> Result<Outcome<SubmissionArtifact>> {
    let storage = service.storage();

    let Some(submission) = storage.get_submission_by_id(submission_id).await? else {
        return Ok(Err(Rejection::SubmissionNotFound { submission_id }));
    };

    let unit = try_outcome!(access::load_unit(storage, submission.unit_id).await?);
    try_outcome!(
        access::authorize_actor_view(storage, caller, &unit, submission.actor_id).await?
    );

    let content = service.files.read(&submission.file_path).await?;

    Ok(Ok(SubmissionArtifact {
        submission,
        content,
    }))
}
