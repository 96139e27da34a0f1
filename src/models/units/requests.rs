use serde::Deserialize;

use super::entities::UnitKind;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUnitRequest {
    pub class_id: i64,
    pub project_id: Option<i64>,
    pub kind: UnitKind,
    pub title: String,
    pub max_score: f64,
}
