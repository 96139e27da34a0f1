#![allow(dead_code)]

use std::sync::Arc;

use hwsystem_grading::config::{
    AppConfig, AppSettings, DatabaseConfig, ImportConfig, ImportTemplateConfig, UploadConfig,
};
use hwsystem_grading::models::{
    Caller,
    class_users::entities::ClassUserRole,
    classes::{entities::Class, requests::CreateClassRequest},
    teams::{entities::Team, requests::CreateTeamRequest},
    units::{
        entities::{GradableUnit, UnitKind},
        requests::CreateUnitRequest,
    },
    users::{entities::User, requests::CreateUserRequest},
};
use hwsystem_grading::runtime::{EngineContext, prepare_engine};
use hwsystem_grading::storage::Storage;
use tempfile::TempDir;

pub const PROJECT_ID: i64 = 42;

pub struct TestEngine {
    // 临时目录在测试结束时删除
    pub dir: TempDir,
    pub engine: EngineContext,
}

impl TestEngine {
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.engine.storage
    }
}

pub fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        app: AppSettings {
            environment: "test".into(),
            log_level: "debug".into(),
        },
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", dir.path().join("grading.db").display()),
            pool_size: 4,
            timeout: 30,
        },
        upload: UploadConfig {
            dir: dir.path().join("uploads").display().to_string(),
            submission_folder: "submissions".into(),
            max_size: 1024,
        },
        import: ImportConfig {
            template: ImportTemplateConfig {
                file_name: "score_template.xlsx".into(),
                worksheet_name: "Scores".into(),
                content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                    .into(),
                column_headers: vec!["Name".into(), "IdentifierNumber".into(), "Score".into()],
            },
            max_rows: 50,
        },
    }
}

pub async fn setup() -> TestEngine {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir);
    let engine = prepare_engine(&config).await.expect("engine");
    TestEngine { dir, engine }
}

pub async fn create_user(storage: &Arc<dyn Storage>, username: &str, number: Option<&str>) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            display_name: Some(username.to_string()),
            identifier_number: number.map(str::to_string),
        })
        .await
        .expect("create user")
}

/// 一个教师、若干学生的班级
pub struct ClassFixture {
    pub teacher: User,
    pub class: Class,
    pub students: Vec<User>,
}

impl ClassFixture {
    pub fn teacher_caller(&self) -> Caller {
        Caller::instructor(self.teacher.id)
    }

    pub fn student_caller(&self, idx: usize) -> Caller {
        Caller::student(self.students[idx].id)
    }
}

pub async fn create_class(
    storage: &Arc<dyn Storage>,
    students: &[(&str, &str)],
) -> ClassFixture {
    let teacher = create_user(storage, "teacher", None).await;
    let class = storage
        .create_class(CreateClassRequest {
            teacher_id: teacher.id,
            class_name: "Software Engineering".to_string(),
            total_score: 100.0,
        })
        .await
        .expect("create class");

    let mut users = Vec::new();
    for (name, number) in students {
        let user = create_user(storage, name, Some(number)).await;
        storage
            .add_class_user(class.id, user.id, ClassUserRole::Student)
            .await
            .expect("enroll");
        users.push(user);
    }

    ClassFixture {
        teacher,
        class,
        students: users,
    }
}

pub async fn create_unit(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    kind: UnitKind,
    max_score: f64,
) -> GradableUnit {
    let project_id = (kind == UnitKind::Phase).then_some(PROJECT_ID);
    storage
        .create_unit(CreateUnitRequest {
            class_id,
            project_id,
            kind,
            title: format!("{kind} unit"),
            max_score,
        })
        .await
        .expect("create unit")
}

pub async fn create_team(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    name: &str,
    members: &[i64],
) -> Team {
    let team = storage
        .create_team(CreateTeamRequest {
            class_id,
            project_id: PROJECT_ID,
            team_name: name.to_string(),
        })
        .await
        .expect("create team");
    for member in members {
        storage
            .add_team_member(team.id, *member)
            .await
            .expect("add member");
    }
    team
}

pub fn csv(rows: &[&str]) -> Vec<u8> {
    let mut content = rows.join("\n");
    content.push('\n');
    content.into_bytes()
}
