use serde::Deserialize;

// 用户创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: Option<String>,
    pub identifier_number: Option<String>,
}
