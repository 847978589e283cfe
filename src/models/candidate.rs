use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use super::application::{ApplicationStatus, OnboardingStatus};

string_enum! {
    /// Profile-level status. `Active`/`Passive` are set by people; the pipeline
    /// values are a cache derived from the candidate's applications.
    pub enum CandidateStatus {
        Active => "Active",
        Passive => "Passive",
        Applied => "Applied",
        Screening => "Screening",
        UnderReview => "Under Review",
        Interview => "Interview",
        Offer => "Offer",
        Hired => "Hired",
        Rejected => "Rejected",
    }
}

impl From<ApplicationStatus> for CandidateStatus {
    fn from(value: ApplicationStatus) -> Self {
        match value {
            ApplicationStatus::Applied => CandidateStatus::Applied,
            ApplicationStatus::Screening => CandidateStatus::Screening,
            ApplicationStatus::UnderReview => CandidateStatus::UnderReview,
            ApplicationStatus::Interview => CandidateStatus::Interview,
            ApplicationStatus::Offer => CandidateStatus::Offer,
            ApplicationStatus::Hired => CandidateStatus::Hired,
            ApplicationStatus::Rejected => CandidateStatus::Rejected,
        }
    }
}

impl CandidateStatus {
    /// Pipeline stage this status corresponds to, if any.
    pub fn as_pipeline(self) -> Option<ApplicationStatus> {
        match self {
            CandidateStatus::Active | CandidateStatus::Passive => None,
            CandidateStatus::Applied => Some(ApplicationStatus::Applied),
            CandidateStatus::Screening => Some(ApplicationStatus::Screening),
            CandidateStatus::UnderReview => Some(ApplicationStatus::UnderReview),
            CandidateStatus::Interview => Some(ApplicationStatus::Interview),
            CandidateStatus::Offer => Some(ApplicationStatus::Offer),
            CandidateStatus::Hired => Some(ApplicationStatus::Hired),
            CandidateStatus::Rejected => Some(ApplicationStatus::Rejected),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub user: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub experience: Vec<JsonValue>,
    #[schema(value_type = Vec<Object>)]
    pub education: Vec<JsonValue>,
    pub resume_path: Option<String>,
    pub status: CandidateStatus,
    pub job_id: Option<Uuid>,
    pub position: Option<String>,
    pub onboarding_status: Option<OnboardingStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub status: Option<CandidateStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_statuses_map_both_ways() {
        for stage in ApplicationStatus::ALL {
            let status = CandidateStatus::from(*stage);
            assert_eq!(status.as_pipeline(), Some(*stage));
        }
        assert_eq!(CandidateStatus::Active.as_pipeline(), None);
    }
}
