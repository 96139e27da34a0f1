use std::sync::Arc;

use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{LedgerService, ScoreService, SubmissionService};
use crate::sheets::{AutoSheetParser, SheetParser};
use crate::storage::{FileStore, LocalFileStore, Storage, sea_orm_storage::SeaOrmStorage};

/// 组装完成的引擎
pub struct EngineContext {
    pub storage: Arc<dyn Storage>,
    pub files: Arc<dyn FileStore>,
    pub ledger: LedgerService,
    pub submissions: SubmissionService,
    pub scores: ScoreService,
}

/// 初始化日志
///
/// 开发环境输出带文件与行号的彩色日志，其余环境输出 JSON。
/// 返回的 guard 必须在进程生命周期内保持存活，否则缓冲中的日志会丢失。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    guard
}

/// 宿主进程的启动入口：加载 `.env`、初始化全局配置与日志
pub fn bootstrap() -> Result<(&'static AppConfig, WorkerGuard)> {
    dotenv::dotenv().ok();
    AppConfig::init()?;
    let config = AppConfig::get();
    let guard = init_tracing(config);
    Ok((config, guard))
}

/// 连接存储并组装三个服务
pub async fn prepare_engine(config: &AppConfig) -> Result<EngineContext> {
    let start = chrono::Utc::now();

    warn!(
        "Preparing grading engine...
        Project: {}
        Version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_async(&config.database).await?);
    let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(&config.upload.dir));
    let parser: Arc<dyn SheetParser> = Arc::new(AutoSheetParser);

    let ledger = LedgerService::new(storage.clone());
    let submissions = SubmissionService::new(storage.clone(), files.clone(), config.upload.clone());
    let scores = ScoreService::from_config(storage.clone(), parser, &config.import)?;

    debug!(
        "Grading engine prepared in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start)
            .num_milliseconds()
    );

    Ok(EngineContext {
        storage,
        files,
        ledger,
        submissions,
        scores,
    })
}
