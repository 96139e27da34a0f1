use super::ScoreService;
use crate::errors::Result;
use crate::models::{Caller, Outcome, scores::entities::ScoreRecord};
use crate::services::access;

pub async fn list_scores(
    service: &ScoreService,
    caller: &Caller,
    unit_id: i64,
) -> Result<Outcome<Vec<ScoreRecord>>> {
    let storage = service.storage();

    let unit = try_outcome!(access::load_unit(storage, unit_id).await?);
    try_outcome!(access::authorize_unit_instructor(storage, caller, &unit).await?);

    let records = storage.list_score_records(unit.id).await?;
    Ok(Ok(records))
}
