use crate::models::{
    class_entries::entities::{ClassEntry, NewClassEntry},
    class_users::entities::{ClassUser, ClassUserRole},
    classes::{entities::Class, requests::CreateClassRequest},
    scores::entities::{NewScoreRecord, ScoreRecord},
    submissions::entities::Submission,
    teams::{entities::Team, requests::CreateTeamRequest},
    units::{
        entities::{GradableUnit, UnitActor},
        requests::CreateUnitRequest,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod file_store;
pub mod sea_orm_storage;

pub use file_store::{FileStore, LocalFileStore};

/// 持久化协作者
///
/// 需要原子性的写操作（替换成绩构成、切换最终提交、批量写入成绩）
/// 由实现方保证在单个事务或单条语句内完成。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 名册（仅提供核心逻辑读取所需的最小 CRUD）
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 加入班级
    async fn add_class_user(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser>;
    // 获取用户在班级中的角色
    async fn get_class_user_role(&self, class_id: i64, user_id: i64)
    -> Result<Option<ClassUserRole>>;
    // 创建小组
    async fn create_team(&self, team: CreateTeamRequest) -> Result<Team>;
    // 通过ID获取小组
    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>>;
    // 添加小组成员
    async fn add_team_member(&self, team_id: i64, user_id: i64) -> Result<()>;
    // 是否为小组成员
    async fn is_team_member(&self, team_id: i64, user_id: i64) -> Result<bool>;

    /// 评分单元
    async fn create_unit(&self, unit: CreateUnitRequest) -> Result<GradableUnit>;
    async fn get_unit_by_id(&self, unit_id: i64) -> Result<Option<GradableUnit>>;
    // 与单元关联的全部提交主体
    async fn list_unit_actors(&self, unit: &GradableUnit) -> Result<Vec<UnitActor>>;

    /// 成绩构成
    async fn list_class_entries(&self, class_id: i64) -> Result<Vec<ClassEntry>>;
    // 在一个事务内整体替换班级的成绩构成与总分
    async fn replace_class_entries(
        &self,
        class_id: i64,
        total_score: f64,
        entries: Vec<NewClassEntry>,
    ) -> Result<Vec<ClassEntry>>;

    /// 提交
    // 新建提交并在同一事务内将其设为唯一的最终提交
    async fn create_final_submission(
        &self,
        unit_id: i64,
        actor_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 原子地切换最终提交，返回切换后的目标提交
    async fn set_final_submission(
        &self,
        unit_id: i64,
        actor_id: i64,
        submission_id: i64,
    ) -> Result<Option<Submission>>;
    // 某主体在某单元的全部提交，最新的在前
    async fn list_actor_submissions(&self, unit_id: i64, actor_id: i64)
    -> Result<Vec<Submission>>;
    // 某单元的全部提交，按写入顺序
    async fn list_unit_submissions(&self, unit_id: i64) -> Result<Vec<Submission>>;

    /// 成绩
    // 在一个事务内覆盖写入成绩，返回写入条数
    async fn commit_score_records(&self, unit_id: i64, records: Vec<NewScoreRecord>)
    -> Result<usize>;
    async fn list_score_records(&self, unit_id: i64) -> Result<Vec<ScoreRecord>>;
}
