mod common;

use hwsystem_grading::models::{
    classes::requests::CreateClassRequest,
    units::{entities::UnitKind, requests::CreateUnitRequest},
};
use hwsystem_grading::storage::Storage;

#[tokio::test]
async fn unit_max_score_must_be_non_negative() {
    let t = common::setup().await;
    let storage = t.storage();
    let fx = common::create_class(storage, &[("alice", "S1")]).await;

    for max_score in [-1.0, f64::NAN, f64::INFINITY] {
        let err = storage
            .create_unit(CreateUnitRequest {
                class_id: fx.class.id,
                project_id: None,
                kind: UnitKind::Exam,
                title: "Quiz".to_string(),
                max_score,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    // 满分为 0 的单元允许存在，只能登记 0 分
    let unit = common::create_unit(storage, fx.class.id, UnitKind::Exam, 0.0).await;
    assert_eq!(unit.max_score, 0.0);
}

#[tokio::test]
async fn class_total_score_must_be_positive() {
    let t = common::setup().await;
    let storage = t.storage();
    let teacher = common::create_user(storage, "teacher", None).await;

    for total_score in [0.0, -10.0] {
        let err = storage
            .create_class(CreateClassRequest {
                teacher_id: teacher.id,
                class_name: "Compilers".to_string(),
                total_score,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }
}
