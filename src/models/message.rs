use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Legacy address used for broadcast messages to manager-class users.
pub const SYSTEM_ADDRESS: &str = "System";

string_enum! {
    /// Wire form of the read flag.
    pub enum ReadState {
        Read => "read",
        Unread => "unread",
    }
}

impl ReadState {
    pub fn is_read(self) -> bool {
        self == ReadState::Read
    }
}

impl From<bool> for ReadState {
    fn from(is_read: bool) -> Self {
        if is_read {
            ReadState::Read
        } else {
            ReadState::Unread
        }
    }
}

/// Inbox notification. `is_read` is the single stored read flag; the legacy
/// `status` string is derived from it at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub recipient: Option<Uuid>,
    pub to: Option<String>,
    pub sender: Option<Uuid>,
    pub from: Option<String>,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub recipient: Option<Uuid>,
    pub to: Option<String>,
    pub sender: Option<Uuid>,
    pub from: Option<String>,
    pub subject: String,
    pub body: String,
}

impl NewMessage {
    pub fn to_user(recipient: Uuid, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient),
            to: None,
            sender: None,
            from: None,
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn from_user(mut self, sender: &User) -> Self {
        self.sender = Some(sender.id);
        self.from = Some(sender.display_name());
        self
    }
}

impl From<NewMessage> for Message {
    fn from(value: NewMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: value.recipient,
            to: value.to,
            sender: value.sender,
            from: value.from,
            subject: value.subject,
            body: value.body,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// Who is asking for an inbox, reduced to what the visibility rule needs.
#[derive(Debug, Clone)]
pub struct Audience {
    pub user_id: Uuid,
    pub email: String,
    pub include_system: bool,
}

impl Audience {
    pub fn of(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            include_system: user.role.is_manager_class(),
        }
    }

    pub fn can_see(&self, message: &Message) -> bool {
        if message.recipient == Some(self.user_id) {
            return true;
        }
        match message.to.as_deref() {
            Some(to) if to.eq_ignore_ascii_case(&self.email) => true,
            Some(SYSTEM_ADDRESS) => self.include_system,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audience(include_system: bool) -> Audience {
        Audience {
            user_id: Uuid::new_v4(),
            email: "manager@example.com".into(),
            include_system,
        }
    }

    fn message(recipient: Option<Uuid>, to: Option<&str>) -> Message {
        Message::from(NewMessage {
            recipient,
            to: to.map(str::to_string),
            sender: None,
            from: None,
            subject: "s".into(),
            body: "b".into(),
        })
    }

    #[test]
    fn recipient_match_ignores_legacy_address() {
        let a = audience(false);
        let b = audience(false);
        let msg = message(Some(a.user_id), Some("someone-else@example.com"));
        assert!(a.can_see(&msg));
        assert!(!b.can_see(&msg));
    }

    #[test]
    fn legacy_email_address_matches_case_insensitively() {
        let a = audience(false);
        assert!(a.can_see(&message(None, Some("Manager@Example.com"))));
    }

    #[test]
    fn system_messages_only_reach_manager_class() {
        let msg = message(None, Some(SYSTEM_ADDRESS));
        assert!(audience(true).can_see(&msg));
        assert!(!audience(false).can_see(&msg));
    }
}
