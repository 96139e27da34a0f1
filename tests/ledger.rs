mod common;

use hwsystem_grading::models::{
    Caller, Rejection, RejectionCategory, ValidationIssue,
    class_entries::{
        entities::EntryType,
        requests::{EntryDraft, ReplaceEntriesRequest},
    },
    class_users::entities::ClassUserRole,
};

fn request(class_id: i64, total: f64, portions: [f64; 3]) -> ReplaceEntriesRequest {
    ReplaceEntriesRequest {
        class_id,
        total_score: total,
        entries: vec![
            EntryDraft::new("exam", 1, portions[0]),
            EntryDraft::new("exercise", 2, portions[1]),
            EntryDraft::new("project", 3, portions[2]),
        ],
    }
}

#[tokio::test]
async fn replace_accepts_matching_sum_and_rejects_drift() {
    let t = common::setup().await;
    let fx = common::create_class(t.storage(), &[("alice", "S1")]).await;
    let teacher = fx.teacher_caller();
    let ledger = &t.engine.ledger;

    let set = ledger
        .replace_entries(&teacher, request(fx.class.id, 100.0, [40.0, 30.0, 30.0]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(set.entries.len(), 3);
    assert_eq!(set.entries[0].entry_type, EntryType::Exam);

    let rejection = ledger
        .replace_entries(&teacher, request(fx.class.id, 100.0, [40.0, 30.0, 25.0]))
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Validation);
    assert_eq!(
        rejection.issues(),
        &[ValidationIssue::PortionSumMismatch {
            expected: 100.0,
            actual: 95.0
        }]
    );

    // 被拒绝后原有构成保持不变
    let stored = ledger
        .get_entries(&teacher, fx.class.id)
        .await
        .unwrap()
        .unwrap();
    let portions: Vec<f64> = stored.entries.iter().map(|e| e.portion).collect();
    assert_eq!(portions, vec![40.0, 30.0, 30.0]);
    assert_eq!(stored.total_score, 100.0);
}

#[tokio::test]
async fn replace_discards_previous_set_and_updates_total() {
    let t = common::setup().await;
    let fx = common::create_class(t.storage(), &[]).await;
    let teacher = fx.teacher_caller();
    let ledger = &t.engine.ledger;

    ledger
        .replace_entries(&teacher, request(fx.class.id, 100.0, [40.0, 30.0, 30.0]))
        .await
        .unwrap()
        .unwrap();

    let replacement = ReplaceEntriesRequest {
        class_id: fx.class.id,
        total_score: 50.0,
        entries: vec![EntryDraft::new("exam", 9, 20.5), EntryDraft::new("exam", 10, 29.5)],
    };
    ledger
        .replace_entries(&teacher, replacement)
        .await
        .unwrap()
        .unwrap();

    let stored = ledger
        .get_entries(&teacher, fx.class.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.total_score, 50.0);
    let ids: Vec<i64> = stored.entries.iter().map(|e| e.entry_id).collect();
    assert_eq!(ids, vec![9, 10]);
}

#[tokio::test]
async fn replace_requires_class_instructor() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1")]).await;
    let ledger = &t.engine.ledger;

    let rejection = ledger
        .replace_entries(
            &fx.student_caller(0),
            request(fx.class.id, 100.0, [40.0, 30.0, 30.0]),
        )
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection.category(), RejectionCategory::Authorization);

    // 以教师身份加入班级的用户同样可以修改
    let assistant = common::create_user(storage, "assistant", None).await;
    storage
        .add_class_user(fx.class.id, assistant.id, ClassUserRole::Teacher)
        .await
        .unwrap();
    assert!(
        ledger
            .replace_entries(
                &Caller::instructor(assistant.id),
                request(fx.class.id, 100.0, [40.0, 30.0, 30.0]),
            )
            .await
            .unwrap()
            .is_ok()
    );

    // 学生可以查看
    assert!(
        ledger
            .get_entries(&fx.student_caller(0), fx.class.id)
            .await
            .unwrap()
            .is_ok()
    );
}

#[tokio::test]
async fn replace_unknown_class_is_not_found() {
    let t = common::setup().await;
    let rejection = t
        .engine
        .ledger
        .replace_entries(&Caller::admin(1), request(999, 100.0, [40.0, 30.0, 30.0]))
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(rejection, Rejection::ClassNotFound { class_id: 999 });
}
