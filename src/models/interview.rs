use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

string_enum! {
    pub enum InterviewStatus {
        Pending => "Pending",
        Scheduled => "Scheduled",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

string_enum! {
    pub enum InterviewResult {
        Pending => "Pending",
        Pass => "Pass",
        Fail => "Fail",
    }
}

/// A scheduled interview. The name and title fields are copies of data owned
/// by the candidate, position and interviewer records; they are re-filled from
/// those records on every write that carries the reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub candidate_id: Option<Uuid>,
    pub candidate_first_name: String,
    pub candidate_last_name: String,
    pub application_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub interviewer_id: Option<Uuid>,
    pub interviewer_name: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub job_position: Option<String>,
    pub interview_mode: Option<String>,
    pub status: InterviewStatus,
    pub result: InterviewResult,
    pub rating: Option<i32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub notify_manager: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Interview {
    pub fn candidate_name(&self) -> String {
        format!("{} {}", self.candidate_first_name, self.candidate_last_name)
            .trim()
            .to_string()
    }

    /// Editing stops once the candidate passed.
    pub fn is_locked(&self) -> bool {
        self.result == InterviewResult::Pass
    }
}

#[derive(Debug, Clone, Default)]
pub struct InterviewFilter {
    pub interviewer: Option<Uuid>,
    pub candidate: Option<Uuid>,
}
