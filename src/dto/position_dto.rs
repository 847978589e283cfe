use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::position::PositionStatus;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub title: String,
    pub department: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validation::no_blank_entries"))]
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub openings: Option<i32>,
    /// Defaults to the caller.
    pub hiring_manager: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePositionPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub title: Option<String>,
    pub department: Option<String>,
    #[validate(custom(function = "crate::utils::validation::no_blank_entries"))]
    pub required_skills: Option<Vec<String>>,
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub openings: Option<i32>,
    pub status: Option<PositionStatus>,
    pub hiring_manager: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionListQuery {
    pub status: Option<PositionStatus>,
    pub hiring_manager: Option<Uuid>,
}
