use std::collections::HashMap;

use tracing::debug;

use super::SubmissionService;
use crate::errors::Result;
use crate::models::{
    Caller, Outcome, Rejection, ValidationIssue,
    submissions::{
        entities::{SortDirection, SubmissionSort},
        requests::SubmissionListQuery,
        responses::SubmissionListItem,
    },
    units::entities::ActorKind,
};
use crate::services::access;

pub async fn list_all(
    service: &SubmissionService,
    caller: &Caller,
    query: SubmissionListQuery,
) -> Result<Outcome<Vec<SubmissionListItem>>> {
    let storage = service.storage();

    // 排序参数在任何查询之前校验
    let sort = match SubmissionSort::from_parts(query.sort_by, query.sort_order) {
        Ok(sort) => sort,
        Err(issue) => return Ok(Err(Rejection::validation(vec![issue]))),
    };

    let unit = try_outcome!(access::load_unit(storage, query.unit_id).await?);
    if matches!(sort, SubmissionSort::ByTeamName(_)) && unit.actor_kind() != ActorKind::Team {
        return Ok(Err(Rejection::validation(vec![
            ValidationIssue::SortNotApplicable {
                sort_by: sort.sort_by(),
                unit_kind: unit.kind,
            },
        ])));
    }

    try_outcome!(access::authorize_unit_instructor(storage, caller, &unit).await?);

    let names: HashMap<i64, String> = storage
        .list_unit_actors(&unit)
        .await?
        .into_iter()
        .map(|actor| (actor.actor_id, actor.name))
        .collect();

    let mut items: Vec<SubmissionListItem> = storage
        .list_unit_submissions(unit.id)
        .await?
        .into_iter()
        .map(|submission| {
            let actor_name = names
                .get(&submission.actor_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", submission.actor_id));
            SubmissionListItem {
                submission,
                actor_name,
            }
        })
        .collect();

    sort_items(&mut items, sort);

    debug!(
        "评分单元 {} 共 {} 个提交，排序方式 {:?}",
        unit.id,
        items.len(),
        sort
    );

    Ok(Ok(items))
}

/// 按排序方式重排，相同键再按提交时间与 ID 排列保证结果稳定
fn sort_items(items: &mut [SubmissionListItem], sort: SubmissionSort) {
    match sort {
        SubmissionSort::Unsorted => {}
        SubmissionSort::BySubmissionDate(direction) => {
            items.sort_by(|a, b| {
                let ord = (a.submission.submitted_at, a.submission.id)
                    .cmp(&(b.submission.submitted_at, b.submission.id));
                apply_direction(ord, direction)
            });
        }
        SubmissionSort::ByTeamName(direction) => {
            items.sort_by(|a, b| {
                let ord = a.actor_name.cmp(&b.actor_name).then_with(|| {
                    (a.submission.submitted_at, a.submission.id)
                        .cmp(&(b.submission.submitted_at, b.submission.id))
                });
                apply_direction(ord, direction)
            });
        }
    }
}

fn apply_direction(ord: std::cmp::Ordering, direction: SortDirection) -> std::cmp::Ordering {
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}
