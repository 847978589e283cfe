use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

string_enum! {
    pub enum PositionStatus {
        Open => "Open",
        Closed => "Closed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub required_skills: Vec<String>,
    pub location: Option<String>,
    pub openings: i32,
    pub status: PositionStatus,
    pub hiring_manager: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Owner is either the assigned hiring manager or the creator.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.hiring_manager == user_id || self.created_by == user_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct PositionFilter {
    pub status: Option<PositionStatus>,
    pub hiring_manager: Option<Uuid>,
}
