use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    application::{
        Application, ApplicationSource, ApplicationStatus, CommunicationEntry, InterviewSummary,
        OnboardingStatus,
    },
    candidate::Candidate,
    interview::Interview,
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPayload {
    pub position_id: Uuid,
    #[validate(length(min = 1))]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    pub candidate_id: Uuid,
    pub position_id: Uuid,
    pub notes: Option<String>,
    #[validate(length(min = 1))]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
    pub source: Option<ApplicationSource>,
    pub position_id: Option<Uuid>,
}

/// Optional body of review / reject / hire.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPayload {
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub status: ApplicationStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub interview_date: String,
    pub interview_time: Option<String>,
    pub notes: Option<String>,
    pub interview_mode: Option<String>,
    pub interviewer_id: Option<Uuid>,
}

/// An application with its candidate and position references resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: Uuid,
    pub source: ApplicationSource,
    pub status: ApplicationStatus,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub position_id: Uuid,
    pub position_title: String,
    pub submitted_by: Option<Uuid>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub interviews: Vec<InterviewSummary>,
    pub communication: Vec<CommunicationEntry>,
    pub onboarding_status: Option<OnboardingStatus>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationView {
    pub fn new(
        application: Application,
        candidate_name: String,
        candidate_email: Option<String>,
        position_title: String,
    ) -> Self {
        Self {
            id: application.id,
            source: application.source,
            status: application.status,
            candidate_id: application.candidate,
            candidate_name,
            candidate_email,
            position_id: application.position,
            position_title,
            submitted_by: application.submitted_by,
            resume_url: application.resume_url,
            notes: application.notes,
            interviews: application.interviews,
            communication: application.communication,
            onboarding_status: application.onboarding_status,
            applied_at: application.applied_at,
            updated_at: application.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TransitionTarget {
    Application,
    Candidate,
}

/// Result of a status move; exactly one of `application` / `candidate` is set,
/// matching `target`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub target: TransitionTarget,
    pub id: Uuid,
    pub status: String,
    pub onboarding_status: Option<OnboardingStatus>,
    pub application: Option<ApplicationView>,
    pub candidate: Option<Candidate>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub application: ApplicationView,
    pub interview: Interview,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub target: TransitionTarget,
    pub id: Uuid,
    pub source: Option<ApplicationSource>,
    pub position_id: Option<Uuid>,
    pub position_title: String,
    pub status: String,
    pub onboarding_status: Option<OnboardingStatus>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
