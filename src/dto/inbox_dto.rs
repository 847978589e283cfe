use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::message::{Message, ReadState};

/// Inbox row. `message` mirrors `body` and `status` mirrors `isRead` for
/// older clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub recipient: Option<Uuid>,
    pub to: Option<String>,
    pub sender: Option<Uuid>,
    pub from: Option<String>,
    pub subject: String,
    pub body: String,
    pub message: String,
    pub status: ReadState,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            recipient: m.recipient,
            to: m.to,
            sender: m.sender,
            from: m.from,
            subject: m.subject,
            message: m.body.clone(),
            body: m.body,
            status: ReadState::from(m.is_read),
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MessageStatusPayload {
    pub status: ReadState,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadAllResponse {
    pub updated: usize,
}
