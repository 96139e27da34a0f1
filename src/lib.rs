//! HWSystem Grading - 成绩与提交一致性引擎
//!
//! 负责班级成绩构成、最终提交的唯一性以及成绩表的整批导入。
//! 传输层、认证与通知由外部系统负责，本 crate 以库的形式被调用。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 基础设施错误
//! - `models`: 业务数据模型与拒绝类型
//! - `runtime`: 日志初始化与引擎组装
//! - `services`: 成绩构成账本、提交版本库、成绩导入
//! - `sheets`: xlsx / csv 读写
//! - `storage`: 数据存储层（SeaORM）与附件存储
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod sheets;
pub mod storage;
pub mod utils;
