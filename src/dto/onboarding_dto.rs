use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::application_dto::TransitionTarget;
use crate::models::application::{ApplicationSource, OnboardingStatus};

/// One hired person. Legacy candidate-level hires carry no source.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingEntry {
    pub target: TransitionTarget,
    pub id: Uuid,
    pub source: Option<ApplicationSource>,
    pub candidate_id: Option<Uuid>,
    pub candidate_name: String,
    pub candidate_email: Option<String>,
    pub position_title: String,
    pub onboarding_status: Option<OnboardingStatus>,
    pub hired_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatusPayload {
    pub onboarding_status: OnboardingStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatusResponse {
    pub target: TransitionTarget,
    pub id: Uuid,
    pub onboarding_status: OnboardingStatus,
}
