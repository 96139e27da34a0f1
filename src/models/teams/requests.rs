use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub class_id: i64,
    pub project_id: i64,
    pub team_name: String,
}
