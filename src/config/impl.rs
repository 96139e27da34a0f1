use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("database.url", "grading.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.timeout", 30)?
            .set_default("upload.dir", "uploads")?
            .set_default("upload.submission_folder", "submissions")?
            .set_default("upload.max_size", 50_i64 * 1024 * 1024)?
            .set_default("import.max_rows", 1000)?
            .set_default("import.template.file_name", "score_template.xlsx")?
            .set_default("import.template.worksheet_name", "Scores")?
            .set_default(
                "import.template.content_type",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            )?
            .set_default(
                "import.template.column_headers",
                vec!["Name", "IdentifierNumber", "Score"],
            )?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("GRADING")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(
            config.import.template.column_headers,
            vec!["Name", "IdentifierNumber", "Score"]
        );
        assert_eq!(config.import.template.worksheet_name, "Scores");
        assert!(config.import.max_rows > 0);
        assert!(config.upload.max_size > 0);
    }
}
