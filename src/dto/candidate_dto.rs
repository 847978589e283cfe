use serde::Deserialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::candidate::CandidateStatus;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validation::no_blank_entries"))]
    pub skills: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub experience: Vec<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub education: Vec<JsonValue>,
    pub resume_path: Option<String>,
    /// Only `Active` or `Passive`; pipeline stages come from applications.
    pub status: Option<CandidateStatus>,
}

/// Personal fields only. Pipeline cache fields are not accepted here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "crate::utils::validation::no_blank_entries"))]
    pub skills: Option<Vec<String>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub experience: Option<Vec<JsonValue>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub education: Option<Vec<JsonValue>>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateListQuery {
    pub status: Option<CandidateStatus>,
}
