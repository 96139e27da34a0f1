use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub upload: UploadConfig,
    pub import: ImportConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 提交附件存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,               // 存储根目录
    pub submission_folder: String, // 提交附件子目录
    pub max_size: usize,           // 单文件最大字节数
}

/// 成绩导入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub template: ImportTemplateConfig,
    pub max_rows: usize,
}

/// 成绩表模板
///
/// 生成的模板文件与导入的文件都必须满足这份约定。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTemplateConfig {
    pub file_name: String,
    pub worksheet_name: String,
    pub content_type: String,
    /// 有序表头：姓名、学号（或小组编号）、分数
    pub column_headers: Vec<String>,
}
