//! 统一错误处理模块
//!
//! 这里只描述基础设施层面的故障（数据库、文件、配置等），
//! 业务层面的预期失败（校验、权限、未找到）见 [`crate::models::Rejection`]。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_grading_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GradingError {
            $($variant(String),)*
        }

        impl GradingError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradingError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradingError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradingError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradingError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradingError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_grading_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Configuration("E005", "Configuration Error"),
    SheetWrite("E006", "Sheet Write Error"),
    ConsistencyViolation("E007", "Consistency Violation"),
    InvalidRecord("E008", "Invalid Record"),
}

impl GradingError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradingError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradingError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradingError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GradingError {
    fn from(err: std::io::Error) -> Self {
        GradingError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for GradingError {
    fn from(err: config::ConfigError) -> Self {
        GradingError::Configuration(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for GradingError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        GradingError::SheetWrite(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradingError>;
