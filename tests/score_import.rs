mod common;

use hwsystem_grading::models::{
    Rejection, RejectionCategory, scores::entities::ScoreRecord, units::entities::UnitKind,
};
use hwsystem_grading::sheets::{
    CellValue,
    workbook::{parse_xlsx, write_xlsx},
};
use hwsystem_grading::storage::Storage;

const HEADER: &str = "Name,IdentifierNumber,Score";

fn scores_of(records: &[ScoreRecord]) -> Vec<(i64, f64)> {
    records.iter().map(|r| (r.actor_id, r.score)).collect()
}

#[tokio::test]
async fn out_of_range_score_rejects_whole_batch() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1"), ("bob", "S2")]).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exam, 20.0).await;

    let content = common::csv(&[HEADER, "Alice,S1,18", "Bob,S2,25"]);
    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), unit.id, &content)
        .await
        .unwrap()
        .unwrap();

    assert!(!report.committed);
    assert_eq!(report.written, 0);
    assert_eq!(report.rows.len(), 2);
    assert!(report.rows[0].is_valid);
    assert!(!report.rows[1].is_valid);
    assert_eq!(report.rows[1].row_number, 3);
    assert_eq!(report.invalid_rows().count(), 1);

    assert!(storage.list_score_records(unit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn one_bad_row_in_ten_writes_nothing() {
    let t = common::setup().await;
    let storage = t.storage();
    let students: Vec<(String, String)> = (1..=10)
        .map(|i| (format!("student{i}"), format!("S{i}")))
        .collect();
    let pairs: Vec<(&str, &str)> = students
        .iter()
        .map(|(n, s)| (n.as_str(), s.as_str()))
        .collect();
    let fx = common::create_class(storage, &pairs).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exercise, 20.0).await;

    let mut lines = vec![HEADER.to_string()];
    for (i, (name, number)) in students.iter().enumerate() {
        let score = if i == 4 { "abc".to_string() } else { format!("{}", i + 5) };
        lines.push(format!("{name},{number},{score}"));
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), unit.id, &common::csv(&refs))
        .await
        .unwrap()
        .unwrap();

    assert!(!report.committed);
    assert_eq!(report.rows.len(), 10);
    let invalid: Vec<usize> = report.invalid_rows().map(|r| r.row_number).collect();
    assert_eq!(invalid, vec![6]);
    assert!(storage.list_score_records(unit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn reimporting_same_file_is_idempotent() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1"), ("bob", "S2")]).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exam, 20.0).await;
    let teacher = fx.teacher_caller();
    let content = common::csv(&[HEADER, "Alice,S1,18", "Bob,S2,12.5"]);

    let first = t
        .engine
        .scores
        .import_scores(&teacher, unit.id, &content)
        .await
        .unwrap()
        .unwrap();
    assert!(first.committed);
    assert_eq!(first.written, 2);
    let after_first = storage.list_score_records(unit.id).await.unwrap();

    let second = t
        .engine
        .scores
        .import_scores(&teacher, unit.id, &content)
        .await
        .unwrap()
        .unwrap();
    assert!(second.committed);
    let after_second = storage.list_score_records(unit.id).await.unwrap();

    assert_eq!(after_second.len(), 2);
    assert_eq!(scores_of(&after_first), scores_of(&after_second));
    assert_eq!(
        scores_of(&after_second),
        vec![(fx.students[0].id, 18.0), (fx.students[1].id, 12.5)]
    );

    // 新文件覆盖已有成绩
    let corrected = common::csv(&[HEADER, "Bob,S2,14"]);
    t.engine
        .scores
        .import_scores(&teacher, unit.id, &corrected)
        .await
        .unwrap()
        .unwrap();
    let listed = t
        .engine
        .scores
        .list_scores(&teacher, unit.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        scores_of(&listed),
        vec![(fx.students[0].id, 18.0), (fx.students[1].id, 14.0)]
    );
}

#[tokio::test]
async fn header_mismatch_is_format_rejection() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1")]).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exam, 20.0).await;
    let teacher = fx.teacher_caller();

    for header in [
        "Name,Score,IdentifierNumber",
        "Name,IdentifierNumber",
        "Name,IdentifierNumber,Score,Comment",
        "name,identifiernumber,score",
        "  Name , IdentifierNumber\t,Score  ",
    ] {
        let rejection = t
            .engine
            .scores
            .import_scores(&teacher, unit.id, &common::csv(&[header, "Alice,S1,18"]))
            .await
            .unwrap()
            .unwrap_err();
        assert!(
            matches!(rejection, Rejection::InvalidTemplateFormat { .. }),
            "{header}: {rejection:?}"
        );
    }

    // 无法识别的文件
    let rejection = t
        .engine
        .scores
        .import_scores(&teacher, unit.id, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Format);

    let rejection = t
        .engine
        .scores
        .import_scores(&teacher, unit.id, &[])
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Format);

    assert!(storage.list_score_records(unit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_row_ends_data_region() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1"), ("bob", "S2")]).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exam, 20.0).await;

    // 空行之后的内容即使无效也不处理
    let content = common::csv(&[HEADER, "Alice,S1,18", ",,", "Bob,S2,999", "garbage"]);
    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), unit.id, &content)
        .await
        .unwrap()
        .unwrap();

    assert!(report.committed);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(
        scores_of(&storage.list_score_records(unit.id).await.unwrap()),
        vec![(fx.students[0].id, 18.0)]
    );

    // 真正的空行同样结束数据区
    let content = common::csv(&[HEADER, "Alice,S1,19", "", "Bob,S2,999"]);
    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), unit.id, &content)
        .await
        .unwrap()
        .unwrap();
    assert!(report.committed);
    assert_eq!(report.written, 1);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].row_number, 2);
    assert_eq!(
        scores_of(&storage.list_score_records(unit.id).await.unwrap()),
        vec![(fx.students[0].id, 19.0)]
    );

    // 只有表头时视为空导入
    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), unit.id, &common::csv(&[HEADER]))
        .await
        .unwrap()
        .unwrap();
    assert!(report.committed);
    assert_eq!(report.written, 0);
}

#[tokio::test]
async fn generated_template_imports_after_filling_in() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1"), ("bob", "S2")]).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exercise, 20.0).await;
    let teacher = fx.teacher_caller();

    let template = t
        .engine
        .scores
        .generate_template(&teacher, unit.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(template.file_name, "score_template.xlsx");

    let grid = parse_xlsx(&template.content, "Scores").unwrap();
    assert_eq!(grid.rows.len(), 3);
    let headers: Vec<String> = grid.rows[0].iter().map(CellValue::as_text).collect();
    assert_eq!(headers, vec!["Name", "IdentifierNumber", "Score"]);

    // 填写分数后原样导入
    let filled: Vec<Vec<CellValue>> = grid.rows[1..]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            vec![
                row[0].clone(),
                row[1].clone(),
                CellValue::Number(10.0 + i as f64),
            ]
        })
        .collect();
    let content = write_xlsx("Scores", &headers, &filled).unwrap();

    let report = t
        .engine
        .scores
        .import_scores(&teacher, unit.id, &content)
        .await
        .unwrap()
        .unwrap();
    assert!(report.committed);
    assert_eq!(report.written, 2);
    assert_eq!(storage.list_score_records(unit.id).await.unwrap().len(), 2);

    // 工作表名称不符
    let renamed = write_xlsx("Sheet1", &headers, &filled).unwrap();
    let rejection = t
        .engine
        .scores
        .import_scores(&teacher, unit.id, &renamed)
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Format);
}

#[tokio::test]
async fn team_units_are_identified_by_team() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1"), ("bob", "S2")]).await;
    let phase = common::create_unit(storage, fx.class.id, UnitKind::Phase, 30.0).await;
    let team = common::create_team(
        storage,
        fx.class.id,
        "Tigers",
        &[fx.students[0].id, fx.students[1].id],
    )
    .await;

    // 小组单元不接受学号
    let by_student = common::csv(&[HEADER, "Alice,S1,20"]);
    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), phase.id, &by_student)
        .await
        .unwrap()
        .unwrap();
    assert!(!report.committed);

    let by_team = common::csv(&[HEADER, &format!("Tigers,{},27.5", team.id)]);
    let report = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), phase.id, &by_team)
        .await
        .unwrap()
        .unwrap();
    assert!(report.committed);
    assert_eq!(
        scores_of(&storage.list_score_records(phase.id).await.unwrap()),
        vec![(team.id, 27.5)]
    );
}

#[tokio::test]
async fn only_instructors_import() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1")]).await;
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exam, 20.0).await;
    let content = common::csv(&[HEADER, "Alice,S1,20"]);

    let rejection = t
        .engine
        .scores
        .import_scores(&fx.student_caller(0), unit.id, &content)
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Authorization);

    let rejection = t
        .engine
        .scores
        .generate_template(&fx.student_caller(0), unit.id)
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Authorization);

    let rejection = t
        .engine
        .scores
        .import_scores(&fx.teacher_caller(), 404, &content)
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection, Rejection::UnitNotFound { unit_id: 404 });

    assert!(storage.list_score_records(unit.id).await.unwrap().is_empty());
}
