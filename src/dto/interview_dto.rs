use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::interview::{InterviewResult, InterviewStatus};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewPayload {
    pub candidate_id: Option<Uuid>,
    pub candidate_first_name: Option<String>,
    pub candidate_last_name: Option<String>,
    pub application_id: Option<Uuid>,
    pub interviewer_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub job_position: Option<String>,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub date: String,
    pub time: Option<String>,
    pub interview_mode: Option<String>,
    pub status: Option<InterviewStatus>,
    pub result: Option<InterviewResult>,
    #[validate(range(min = 0, max = 5))]
    pub rating: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub notify_manager: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInterviewPayload {
    pub candidate_id: Option<Uuid>,
    pub candidate_first_name: Option<String>,
    pub candidate_last_name: Option<String>,
    pub interviewer_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub job_position: Option<String>,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub date: Option<String>,
    pub time: Option<String>,
    pub interview_mode: Option<String>,
    pub status: Option<InterviewStatus>,
    pub result: Option<InterviewResult>,
    #[validate(range(min = 0, max = 5))]
    pub rating: Option<i32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub notify_manager: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendLinkPayload {
    #[validate(url)]
    pub meeting_link: String,
}
