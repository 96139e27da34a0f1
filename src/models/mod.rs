//! 业务数据模型
//!
//! 与 `entity` 模块中的数据库实体分离，服务层只处理这里的类型。

pub mod class_entries;
pub mod class_users;
pub mod classes;
pub mod common;
pub mod scores;
pub mod submissions;
pub mod teams;
pub mod units;
pub mod users;

pub use common::{Caller, Outcome, Rejection, RejectionCategory, ValidationIssue};
