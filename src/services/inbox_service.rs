use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    message::{Audience, Message, NewMessage},
    user::User,
};
use crate::repository::DynStore;

#[derive(Clone)]
pub struct InboxService {
    store: DynStore,
}

impl InboxService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Best-effort delivery: a failed insert is logged and swallowed so the
    /// write that triggered it still succeeds.
    pub async fn notify(&self, message: NewMessage) {
        let message = Message::from(message);
        match self.store.insert_message(&message).await {
            Ok(()) => tracing::info!(
                message_id = %message.id,
                recipient = ?message.recipient,
                subject = %message.subject,
                "notification sent"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                recipient = ?message.recipient,
                subject = %message.subject,
                "failed to store notification"
            ),
        }
    }

    pub async fn list(&self, user: &User) -> Result<Vec<Message>> {
        self.store.list_messages_for(&Audience::of(user)).await
    }

    pub async fn unread_count(&self, user: &User) -> Result<usize> {
        let messages = self.list(user).await?;
        Ok(messages.iter().filter(|m| !m.is_read).count())
    }

    pub async fn set_read(&self, user: &User, id: Uuid, is_read: bool) -> Result<Message> {
        let mut message = self
            .store
            .message_by_id(id)
            .await?
            .filter(|m| Audience::of(user).can_see(m))
            .ok_or_else(|| Error::NotFound("Message not found".to_string()))?;
        if message.is_read != is_read {
            self.store.set_message_read(id, is_read).await?;
            message.is_read = is_read;
        }
        Ok(message)
    }

    pub async fn mark_all_read(&self, user: &User) -> Result<usize> {
        let unread: Vec<Message> = self
            .list(user)
            .await?
            .into_iter()
            .filter(|m| !m.is_read)
            .collect();
        for message in &unread {
            self.store.set_message_read(message.id, true).await?;
        }
        tracing::debug!(user_id = %user.id, updated = unread.len(), "inbox marked read");
        Ok(unread.len())
    }
}
