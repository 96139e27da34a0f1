use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserRole;

/// 发起调用的用户
///
/// 每个操作都显式接收调用者，不从请求上下文里隐式读取。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: i64,
    pub role: UserRole,
}

impl Caller {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn student(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Student)
    }

    pub fn instructor(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Instructor)
    }

    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
