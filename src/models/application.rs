use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::interview::InterviewStatus;

string_enum! {
    /// Canonical hiring-pipeline stages, ordered from least to most advanced
    /// except for `Rejected`, which is terminal but ranks lowest.
    pub enum ApplicationStatus {
        Applied => "Applied",
        Screening => "Screening",
        UnderReview => "Under Review",
        Interview => "Interview",
        Offer => "Offer",
        Hired => "Hired",
        Rejected => "Rejected",
    }
}

impl ApplicationStatus {
    pub fn rank(self) -> u8 {
        match self {
            ApplicationStatus::Rejected => 0,
            ApplicationStatus::Applied => 1,
            ApplicationStatus::Screening => 2,
            ApplicationStatus::UnderReview => 3,
            ApplicationStatus::Interview => 4,
            ApplicationStatus::Offer => 5,
            ApplicationStatus::Hired => 6,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }
}

string_enum! {
    /// Which actor placed the candidate against the position.
    pub enum ApplicationSource {
        Direct => "direct",
        Recruiter => "recruiter",
    }
}

string_enum! {
    pub enum OnboardingStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Completed => "Completed",
    }
}

/// Embedded copy of an interview scheduled through the application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummary {
    pub interview_id: Uuid,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
    pub status: InterviewStatus,
    pub notes: Option<String>,
}

/// Timeline entry appended on every write to an application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationEntry {
    pub at: DateTime<Utc>,
    pub actor: Option<Uuid>,
    pub kind: String,
    pub from: Option<ApplicationStatus>,
    pub to: Option<ApplicationStatus>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub candidate: Uuid,
    pub position: Uuid,
    pub source: ApplicationSource,
    pub submitted_by: Option<Uuid>,
    pub status: ApplicationStatus,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub interviews: Vec<InterviewSummary>,
    pub communication: Vec<CommunicationEntry>,
    pub onboarding_status: Option<OnboardingStatus>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        candidate: Uuid,
        position: Uuid,
        source: ApplicationSource,
        submitted_by: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            candidate,
            position,
            source,
            submitted_by,
            status: ApplicationStatus::Applied,
            resume_url: None,
            notes: None,
            interviews: Vec::new(),
            communication: vec![CommunicationEntry {
                at: now,
                actor: submitted_by,
                kind: match source {
                    ApplicationSource::Direct => "applied".to_string(),
                    ApplicationSource::Recruiter => "submitted".to_string(),
                },
                from: None,
                to: Some(ApplicationStatus::Applied),
                note: None,
            }],
            onboarding_status: None,
            applied_at: now,
            updated_at: now,
        }
    }

    /// Moves to `to`, recording the step in the communication log.
    pub fn record_transition(&mut self, actor: Option<Uuid>, to: ApplicationStatus, note: Option<String>) {
        let now = Utc::now();
        self.communication.push(CommunicationEntry {
            at: now,
            actor,
            kind: "status_change".to_string(),
            from: Some(self.status),
            to: Some(to),
            note,
        });
        self.status = to;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub candidate: Option<Uuid>,
    pub position: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
    pub source: Option<ApplicationSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_application_starts_applied_with_one_log_entry() {
        let app = Application::new(Uuid::new_v4(), Uuid::new_v4(), ApplicationSource::Recruiter, None);
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.communication.len(), 1);
        assert_eq!(app.communication[0].kind, "submitted");
    }

    #[test]
    fn record_transition_logs_previous_status() {
        let mut app = Application::new(Uuid::new_v4(), Uuid::new_v4(), ApplicationSource::Direct, None);
        app.record_transition(None, ApplicationStatus::UnderReview, None);
        let last = app.communication.last().unwrap();
        assert_eq!(last.from, Some(ApplicationStatus::Applied));
        assert_eq!(last.to, Some(ApplicationStatus::UnderReview));
        assert_eq!(app.status, ApplicationStatus::UnderReview);
    }

    #[test]
    fn rejected_ranks_below_every_active_stage() {
        for status in ApplicationStatus::ALL {
            if *status != ApplicationStatus::Rejected {
                assert!(status.rank() > ApplicationStatus::Rejected.rank());
            }
        }
        assert!(ApplicationStatus::Hired.is_terminal());
        assert!(!ApplicationStatus::Offer.is_terminal());
    }
}
