use super::SubmissionService;
use crate::errors::Result;
use crate::models::{Caller, Outcome, submissions::entities::Submission};
use crate::services::access;

pub async fn history(
    service: &SubmissionService,
    caller: &Caller,
    unit_id: i64,
    actor_id: i64,
) -> Result<Outcome<Vec<Submission>>> {
    let storage = service.storage();

    let unit = try_outcome!(access::load_unit(storage, unit_id).await?);
    try_outcome!(access::authorize_actor_view(storage, caller, &unit, actor_id).await?);

    let submissions = storage.list_actor_submissions(unit.id, actor_id).await?;
    Ok(Ok(submissions))
}
