use tracing::info;

use super::ScoreService;
use crate::errors::Result;
use crate::models::{Caller, Outcome, scores::responses::TemplateFile};
use crate::services::access;
use crate::sheets::{CellValue, workbook::write_xlsx};

/// 模板列出单元关联的全部主体，分数列留空
pub async fn generate_template(
    service: &ScoreService,
    caller: &Caller,
    unit_id: i64,
) -> Result<Outcome<TemplateFile>> {
    let storage = service.storage();

    let unit = try_outcome!(access::load_unit(storage, unit_id).await?);
    try_outcome!(access::authorize_unit_instructor(storage, caller, &unit).await?);

    let actors = storage.list_unit_actors(&unit).await?;
    let rows: Vec<Vec<CellValue>> = actors
        .iter()
        .map(|actor| {
            vec![
                CellValue::from_text(&actor.name),
                CellValue::from_text(&actor.identifier),
                CellValue::Empty,
            ]
        })
        .collect();

    let template = service.template();
    let headers: Vec<String> = template.headers().iter().map(|h| h.to_string()).collect();
    let content = write_xlsx(&template.worksheet_name, &headers, &rows)?;

    info!(
        "为评分单元 {} 生成成绩模板，共 {} 个主体",
        unit.id,
        actors.len()
    );

    Ok(Ok(TemplateFile {
        file_name: template.file_name.clone(),
        content_type: template.content_type.clone(),
        content,
    }))
}
