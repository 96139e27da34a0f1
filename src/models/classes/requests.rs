use serde::Deserialize;

// 创建班级请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub teacher_id: i64,
    pub class_name: String,
    pub total_score: f64,
}
