use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::{ImportTemplate, ScoreService};
use crate::errors::Result;
use crate::models::{
    Caller, Outcome, Rejection,
    scores::{
        entities::NewScoreRecord,
        responses::{ImportReport, RowValidation},
    },
    units::entities::GradableUnit,
};
use crate::services::access;
use crate::sheets::{CellValue, SheetGrid};

/// 表头之后的一行数据，`row_number` 为文件中的行号（表头为第 1 行）
#[derive(Debug, Clone, PartialEq)]
struct DataRow {
    row_number: usize,
    name: CellValue,
    identifier: CellValue,
    score: CellValue,
}

pub async fn import_scores(
    service: &ScoreService,
    caller: &Caller,
    unit_id: i64,
    content: &[u8],
) -> Result<Outcome<ImportReport>> {
    let storage = service.storage();
    let template = service.template();

    let unit = try_outcome!(access::load_unit(storage, unit_id).await?);
    try_outcome!(access::authorize_unit_instructor(storage, caller, &unit).await?);

    // 第一步：解析并核对表头，不符合模板时不处理任何数据行
    let grid = match service.parser.parse(content, &template.worksheet_name) {
        Ok(grid) => grid,
        Err(e) => {
            warn!("评分单元 {} 的成绩表无法解析: {}", unit.id, e);
            return Ok(Err(Rejection::invalid_template(e.message())));
        }
    };
    if let Err(reason) = check_header(&grid, template) {
        warn!("评分单元 {} 的成绩表表头不符: {}", unit.id, reason);
        return Ok(Err(Rejection::invalid_template(reason)));
    }

    // 第二步：读取数据行直到第一个整行空白
    let rows = extract_rows(&grid, service.max_rows + 1);
    if rows.len() > service.max_rows {
        return Ok(Err(Rejection::invalid_template(format!(
            "数据行超过上限 {} 行",
            service.max_rows
        ))));
    }

    // 第三步：逐行校验
    let actors: HashMap<String, i64> = storage
        .list_unit_actors(&unit)
        .await?
        .into_iter()
        .filter(|actor| !actor.identifier.trim().is_empty())
        .map(|actor| (actor.identifier.trim().to_string(), actor.actor_id))
        .collect();
    let (validations, records) = validate_rows(&rows, &actors, &unit);

    // 第四步：任一行无效则整批拒绝
    let invalid = validations.iter().filter(|row| !row.is_valid).count();
    if invalid > 0 {
        warn!(
            "评分单元 {} 的成绩导入被拒绝: {} 行中有 {} 行无效，未写入任何成绩",
            unit.id,
            validations.len(),
            invalid
        );
        return Ok(Ok(ImportReport {
            unit_id: unit.id,
            committed: false,
            written: 0,
            rows: validations,
        }));
    }

    let written = {
        let _guard = service.locks.lock(unit.id).await;
        storage.commit_score_records(unit.id, records).await?
    };

    info!(
        "用户 {} 向评分单元 {} 导入了 {} 条成绩",
        caller.user_id, unit.id, written
    );

    Ok(Ok(ImportReport {
        unit_id: unit.id,
        committed: true,
        written,
        rows: validations,
    }))
}

/// 表头须与模板逐列完全一致（不去除空白），末尾的空单元格忽略
fn check_header(grid: &SheetGrid, template: &ImportTemplate) -> std::result::Result<(), String> {
    let Some(header_row) = grid.rows.first() else {
        return Err("文件中没有表头".to_string());
    };

    let mut actual: Vec<String> = header_row.iter().map(CellValue::as_text).collect();
    while actual.last().is_some_and(|cell| cell.is_empty()) {
        actual.pop();
    }

    let expected = template.headers();
    if actual.len() == expected.len() && actual.iter().zip(expected).all(|(a, e)| a == e) {
        Ok(())
    } else {
        Err(format!(
            "表头应为 [{}]，实际为 [{}]",
            expected.join(", "),
            actual.join(", ")
        ))
    }
}

/// 从第 2 行开始读取，模板列全部为空的行是数据区的结束标记，
/// 该行及之后的内容都不处理。最多读取 `limit` 行。
fn extract_rows(grid: &SheetGrid, limit: usize) -> Vec<DataRow> {
    let cell = |row: &[CellValue], idx: usize| row.get(idx).cloned().unwrap_or(CellValue::Empty);

    grid.rows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, row)| DataRow {
            row_number: idx + 1,
            name: cell(row.as_slice(), 0),
            identifier: cell(row.as_slice(), 1),
            score: cell(row.as_slice(), 2),
        })
        .take_while(|row| !(row.name.is_blank() && row.identifier.is_blank() && row.score.is_blank()))
        .take(limit)
        .collect()
}

/// 每行独立校验，同一标识在文件中重复出现时后出现的行无效
fn validate_rows(
    rows: &[DataRow],
    actors: &HashMap<String, i64>,
    unit: &GradableUnit,
) -> (Vec<RowValidation>, Vec<NewScoreRecord>) {
    let mut validations = Vec::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let mut errors = Vec::new();

        let identifier = row.identifier.as_text().trim().to_string();
        let actor_id = if identifier.is_empty() {
            errors.push("标识为空".to_string());
            None
        } else if let Some(first_row) = first_seen.get(&identifier) {
            errors.push(format!("标识 {identifier} 与第 {first_row} 行重复"));
            None
        } else {
            first_seen.insert(identifier.clone(), row.row_number);
            match actors.get(&identifier) {
                Some(actor_id) => Some(*actor_id),
                None => {
                    errors.push(format!("标识 {identifier} 不属于该评分单元"));
                    None
                }
            }
        };

        let score = if row.score.is_blank() {
            errors.push("分数为空".to_string());
            None
        } else {
            match row.score.as_number() {
                Some(score) if unit.accepts_score(score) => Some(score),
                Some(score) => {
                    errors.push(format!("分数 {score} 超出范围 0 到 {}", unit.max_score));
                    None
                }
                None => {
                    errors.push(format!("分数 {} 不是有效数字", row.score.as_text()));
                    None
                }
            }
        };

        if let (Some(actor_id), Some(score), true) = (actor_id, score, errors.is_empty()) {
            records.push(NewScoreRecord {
                actor_id,
                score,
                row_origin: i32::try_from(row.row_number).ok(),
            });
        } else {
            debug!("第 {} 行无效: {}", row.row_number, errors.join("; "));
        }

        validations.push(RowValidation {
            row_number: row.row_number,
            is_valid: errors.is_empty(),
            errors,
        });
    }

    (validations, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::units::entities::UnitKind;

    fn template() -> ImportTemplate {
        ImportTemplate {
            file_name: "score_template.xlsx".into(),
            worksheet_name: "Scores".into(),
            content_type: "application/octet-stream".into(),
            name_header: "Name".into(),
            identifier_header: "IdentifierNumber".into(),
            score_header: "Score".into(),
        }
    }

    fn text(s: &str) -> CellValue {
        CellValue::from_text(s)
    }

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        SheetGrid::new(
            rows.iter()
                .map(|row| row.iter().map(|c| text(c)).collect())
                .collect(),
        )
    }

    fn unit(max_score: f64) -> GradableUnit {
        GradableUnit {
            id: 1,
            class_id: 1,
            project_id: None,
            kind: UnitKind::Exam,
            title: "Quiz".into(),
            max_score,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_header_exact_match() {
        let ok = grid(&[&["Name", "IdentifierNumber", "Score", ""]]);
        assert!(check_header(&ok, &template()).is_ok());

        let reordered = grid(&[&["IdentifierNumber", "Name", "Score"]]);
        assert!(check_header(&reordered, &template()).is_err());

        let renamed = grid(&[&["name", "IdentifierNumber", "Score"]]);
        assert!(check_header(&renamed, &template()).is_err());

        let extra = grid(&[&["Name", "IdentifierNumber", "Score", "Comment"]]);
        assert!(check_header(&extra, &template()).is_err());

        let padded = grid(&[&["  Name ", "IdentifierNumber\t", "Score  "]]);
        assert!(check_header(&padded, &template()).is_err());

        assert!(check_header(&SheetGrid::default(), &template()).is_err());
    }

    #[test]
    fn test_extraction_stops_at_blank_row() {
        let g = grid(&[
            &["Name", "IdentifierNumber", "Score"],
            &["Alice", "S1", "18"],
            &["", " ", ""],
            &["Bob", "S2", "25"],
        ]);
        let rows = extract_rows(&g, 100);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_number, 2);
    }

    #[test]
    fn test_extraction_treats_missing_row_as_blank() {
        let mut g = grid(&[&["Name", "IdentifierNumber", "Score"], &["Alice", "S1", "18"]]);
        g.rows.push(Vec::new());
        g.rows.push(vec![text("Bob"), text("S2"), text("1")]);
        assert_eq!(extract_rows(&g, 100).len(), 1);
    }

    #[test]
    fn test_row_rules() {
        let g = grid(&[
            &["Name", "IdentifierNumber", "Score"],
            &["Alice", "S1", "18"],
            &["Bob", "S2", "25"],
            &["Carol", "S9", "5"],
            &["Alice again", "S1", "10"],
            &["Dan", "S3", ""],
            &["Eve", "S4", "abc"],
            &["", "", "7"],
        ]);
        let actors: HashMap<String, i64> = [("S1", 1), ("S2", 2), ("S3", 3), ("S4", 4)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let rows = extract_rows(&g, 100);
        let (validations, records) = validate_rows(&rows, &actors, &unit(20.0));

        assert_eq!(validations.len(), 7);
        let valid: Vec<bool> = validations.iter().map(|v| v.is_valid).collect();
        assert_eq!(valid, vec![true, false, false, false, false, false, false]);
        assert!(validations[0].errors.is_empty());
        assert_eq!(validations[1].row_number, 3);
        assert!(validations[3].errors[0].contains("第 2 行"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].row_origin, Some(2));
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        let g = grid(&[
            &["Name", "IdentifierNumber", "Score"],
            &["A", "S1", "0"],
            &["B", "S2", "20"],
            &["C", "S3", "-0.5"],
        ]);
        let actors: HashMap<String, i64> = [("S1", 1), ("S2", 2), ("S3", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let (validations, _) = validate_rows(&extract_rows(&g, 100), &actors, &unit(20.0));
        assert!(validations[0].is_valid);
        assert!(validations[1].is_valid);
        assert!(!validations[2].is_valid);
    }

    #[test]
    fn test_numeric_identifier_cells() {
        let g = SheetGrid::new(vec![
            vec![text("Name"), text("IdentifierNumber"), text("Score")],
            vec![text("Team A"), CellValue::Number(7.0), CellValue::Number(12.5)],
        ]);
        let actors: HashMap<String, i64> = [("7".to_string(), 7)].into_iter().collect();
        let (validations, records) = validate_rows(&extract_rows(&g, 100), &actors, &unit(20.0));
        assert!(validations[0].is_valid);
        assert_eq!(records[0].actor_id, 7);
        assert_eq!(records[0].score, 12.5);
    }
}
