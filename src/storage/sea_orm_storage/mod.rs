//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod class_entries;
mod rosters;
mod score_records;
mod submissions;
mod units;

use crate::config::DatabaseConfig;
use crate::errors::{GradingError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并执行迁移
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradingError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradingError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| GradingError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradingError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradingError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 名册模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn add_class_user(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser> {
        self.add_class_user_impl(class_id, user_id, role).await
    }

    async fn get_class_user_role(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Option<ClassUserRole>> {
        self.get_class_user_role_impl(class_id, user_id).await
    }

    async fn create_team(&self, team: CreateTeamRequest) -> Result<Team> {
        self.create_team_impl(team).await
    }

    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        self.get_team_by_id_impl(team_id).await
    }

    async fn add_team_member(&self, team_id: i64, user_id: i64) -> Result<()> {
        self.add_team_member_impl(team_id, user_id).await
    }

    async fn is_team_member(&self, team_id: i64, user_id: i64) -> Result<bool> {
        self.is_team_member_impl(team_id, user_id).await
    }

    // 评分单元模块
    async fn create_unit(&self, unit: CreateUnitRequest) -> Result<GradableUnit> {
        self.create_unit_impl(unit).await
    }

    async fn get_unit_by_id(&self, unit_id: i64) -> Result<Option<GradableUnit>> {
        self.get_unit_by_id_impl(unit_id).await
    }

    async fn list_unit_actors(&self, unit: &GradableUnit) -> Result<Vec<UnitActor>> {
        self.list_unit_actors_impl(unit).await
    }

    // 成绩构成模块
    async fn list_class_entries(&self, class_id: i64) -> Result<Vec<ClassEntry>> {
        self.list_class_entries_impl(class_id).await
    }

    async fn replace_class_entries(
        &self,
        class_id: i64,
        total_score: f64,
        entries: Vec<NewClassEntry>,
    ) -> Result<Vec<ClassEntry>> {
        self.replace_class_entries_impl(class_id, total_score, entries)
            .await
    }

    // 提交模块
    async fn create_final_submission(
        &self,
        unit_id: i64,
        actor_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<Submission> {
        self.create_final_submission_impl(unit_id, actor_id, file_name, file_path)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn set_final_submission(
        &self,
        unit_id: i64,
        actor_id: i64,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        self.set_final_submission_impl(unit_id, actor_id, submission_id)
            .await
    }

    async fn list_actor_submissions(
        &self,
        unit_id: i64,
        actor_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_actor_submissions_impl(unit_id, actor_id).await
    }

    async fn list_unit_submissions(&self, unit_id: i64) -> Result<Vec<Submission>> {
        self.list_unit_submissions_impl(unit_id).await
    }

    // 成绩模块
    async fn commit_score_records(
        &self,
        unit_id: i64,
        records: Vec<NewScoreRecord>,
    ) -> Result<usize> {
        self.commit_score_records_impl(unit_id, records).await
    }

    async fn list_score_records(&self, unit_id: i64) -> Result<Vec<ScoreRecord>> {
        self.list_score_records_impl(unit_id).await
    }
}
