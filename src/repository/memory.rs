use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationFilter, ApplicationSource},
    candidate::{Candidate, CandidateFilter},
    interview::{Interview, InterviewFilter},
    message::{Audience, Message},
    position::{Position, PositionFilter},
    purchase_order::PurchaseOrder,
    user::{normalize_email, User, UserFilter},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    positions: HashMap<Uuid, Position>,
    candidates: HashMap<Uuid, Candidate>,
    applications: HashMap<Uuid, Application>,
    interviews: HashMap<Uuid, Interview>,
    messages: HashMap<Uuid, Message>,
    purchase_orders: HashMap<Uuid, PurchaseOrder>,
}

/// Process-local store. A single lock guards all tables so the uniqueness
/// checks below are atomic with their inserts.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn replace<T>(map: &mut HashMap<Uuid, T>, id: Uuid, value: T, entity: &str) -> Result<()> {
    match map.get_mut(&id) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(Error::NotFound(format!("{} not found", entity))),
    }
}

fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.email == user.email) {
            return Err(Error::Conflict("A user with this email already exists".into()));
        }
        t.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>> {
        let t = self.tables.read().await;
        let items: Vec<User> = t
            .users
            .values()
            .filter(|u| filter.approved.map_or(true, |a| u.is_approved == a))
            .filter(|u| filter.role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        Ok(newest_first(items, |u: &User| u.created_at))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut t = self.tables.write().await;
        replace(&mut t.users, user.id, user.clone(), "User")
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }

    async fn insert_position(&self, position: &Position) -> Result<()> {
        let mut t = self.tables.write().await;
        t.positions.insert(position.id, position.clone());
        Ok(())
    }

    async fn position_by_id(&self, id: Uuid) -> Result<Option<Position>> {
        Ok(self.tables.read().await.positions.get(&id).cloned())
    }

    async fn position_by_title(&self, title: &str) -> Result<Option<Position>> {
        let t = self.tables.read().await;
        Ok(t
            .positions
            .values()
            .filter(|p| p.title == title)
            .max_by_key(|p| p.created_at)
            .cloned())
    }

    async fn list_positions(&self, filter: PositionFilter) -> Result<Vec<Position>> {
        let t = self.tables.read().await;
        let items: Vec<Position> = t
            .positions
            .values()
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .filter(|p| filter.hiring_manager.map_or(true, |m| p.hiring_manager == m))
            .cloned()
            .collect();
        Ok(newest_first(items, |p: &Position| p.created_at))
    }

    async fn update_position(&self, position: &Position) -> Result<()> {
        let mut t = self.tables.write().await;
        replace(&mut t.positions, position.id, position.clone(), "Position")
    }

    async fn delete_position(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.write().await.positions.remove(&id).is_some())
    }

    async fn insert_candidate(&self, candidate: &Candidate) -> Result<()> {
        let mut t = self.tables.write().await;
        if t.candidates.values().any(|c| c.email == candidate.email) {
            return Err(Error::Conflict(
                "A candidate with this email address already exists".into(),
            ));
        }
        t.candidates.insert(candidate.id, candidate.clone());
        Ok(())
    }

    async fn candidate_by_id(&self, id: Uuid) -> Result<Option<Candidate>> {
        Ok(self.tables.read().await.candidates.get(&id).cloned())
    }

    async fn candidate_by_email(&self, email: &str) -> Result<Option<Candidate>> {
        let email = normalize_email(email);
        let t = self.tables.read().await;
        Ok(t.candidates.values().find(|c| c.email == email).cloned())
    }

    async fn candidate_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>> {
        let t = self.tables.read().await;
        Ok(t
            .candidates
            .values()
            .find(|c| c.user == Some(user_id))
            .cloned())
    }

    async fn list_candidates(&self, filter: CandidateFilter) -> Result<Vec<Candidate>> {
        let t = self.tables.read().await;
        let items: Vec<Candidate> = t
            .candidates
            .values()
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        Ok(newest_first(items, |c: &Candidate| c.created_at))
    }

    async fn update_candidate(&self, candidate: &Candidate) -> Result<()> {
        let mut t = self.tables.write().await;
        replace(&mut t.candidates, candidate.id, candidate.clone(), "Candidate")
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.write().await.candidates.remove(&id).is_some())
    }

    async fn insert_application(&self, application: &Application) -> Result<()> {
        let mut t = self.tables.write().await;
        if application.source == ApplicationSource::Recruiter
            && t.applications.values().any(|a| {
                a.source == ApplicationSource::Recruiter
                    && a.candidate == application.candidate
                    && a.position == application.position
            })
        {
            return Err(Error::Conflict(
                "Candidate has already been submitted for this position".into(),
            ));
        }
        t.applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn application_by_id(&self, id: Uuid) -> Result<Option<Application>> {
        Ok(self.tables.read().await.applications.get(&id).cloned())
    }

    async fn find_application(
        &self,
        candidate: Uuid,
        position: Uuid,
        source: ApplicationSource,
    ) -> Result<Option<Application>> {
        let t = self.tables.read().await;
        Ok(t
            .applications
            .values()
            .find(|a| a.candidate == candidate && a.position == position && a.source == source)
            .cloned())
    }

    async fn list_applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>> {
        let t = self.tables.read().await;
        let items: Vec<Application> = t
            .applications
            .values()
            .filter(|a| filter.candidate.map_or(true, |c| a.candidate == c))
            .filter(|a| filter.position.map_or(true, |p| a.position == p))
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.source.map_or(true, |s| a.source == s))
            .cloned()
            .collect();
        Ok(newest_first(items, |a: &Application| a.applied_at))
    }

    async fn update_application(&self, application: &Application) -> Result<()> {
        let mut t = self.tables.write().await;
        replace(
            &mut t.applications,
            application.id,
            application.clone(),
            "Application",
        )
    }

    async fn insert_interview(&self, interview: &Interview) -> Result<()> {
        let mut t = self.tables.write().await;
        t.interviews.insert(interview.id, interview.clone());
        Ok(())
    }

    async fn interview_by_id(&self, id: Uuid) -> Result<Option<Interview>> {
        Ok(self.tables.read().await.interviews.get(&id).cloned())
    }

    async fn list_interviews(&self, filter: InterviewFilter) -> Result<Vec<Interview>> {
        let t = self.tables.read().await;
        let items: Vec<Interview> = t
            .interviews
            .values()
            .filter(|i| filter.interviewer.map_or(true, |u| i.interviewer_id == Some(u)))
            .filter(|i| filter.candidate.map_or(true, |c| i.candidate_id == Some(c)))
            .cloned()
            .collect();
        Ok(newest_first(items, |i: &Interview| i.created_at))
    }

    async fn update_interview(&self, interview: &Interview) -> Result<()> {
        let mut t = self.tables.write().await;
        replace(&mut t.interviews, interview.id, interview.clone(), "Interview")
    }

    async fn delete_interview(&self, id: Uuid) -> Result<bool> {
        Ok(self.tables.write().await.interviews.remove(&id).is_some())
    }

    async fn insert_message(&self, message: &Message) -> Result<()> {
        let mut t = self.tables.write().await;
        t.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn message_by_id(&self, id: Uuid) -> Result<Option<Message>> {
        Ok(self.tables.read().await.messages.get(&id).cloned())
    }

    async fn list_messages_for(&self, audience: &Audience) -> Result<Vec<Message>> {
        let t = self.tables.read().await;
        let items: Vec<Message> = t
            .messages
            .values()
            .filter(|m| audience.can_see(m))
            .cloned()
            .collect();
        Ok(newest_first(items, |m: &Message| m.created_at))
    }

    async fn set_message_read(&self, id: Uuid, is_read: bool) -> Result<()> {
        let mut t = self.tables.write().await;
        let message = t
            .messages
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Message not found".into()))?;
        message.is_read = is_read;
        Ok(())
    }

    async fn insert_purchase_order(&self, order: &PurchaseOrder) -> Result<()> {
        let mut t = self.tables.write().await;
        t.purchase_orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn purchase_order_by_id(&self, id: Uuid) -> Result<Option<PurchaseOrder>> {
        Ok(self.tables.read().await.purchase_orders.get(&id).cloned())
    }

    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        let t = self.tables.read().await;
        let items: Vec<PurchaseOrder> = t.purchase_orders.values().cloned().collect();
        Ok(newest_first(items, |o: &PurchaseOrder| o.created_at))
    }

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<()> {
        let mut t = self.tables.write().await;
        replace(&mut t.purchase_orders, order.id, order.clone(), "Purchase order")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn recruiter_submission_pair_is_unique() {
        let store = MemoryStore::new();
        let (candidate, position) = (Uuid::new_v4(), Uuid::new_v4());
        let first = Application::new(candidate, position, ApplicationSource::Recruiter, None);
        store.insert_application(&first).await.unwrap();

        let second = Application::new(candidate, position, ApplicationSource::Recruiter, None);
        let err = store.insert_application(&second).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let direct = Application::new(candidate, position, ApplicationSource::Direct, None);
        store.insert_application(&direct).await.unwrap();
    }

    #[tokio::test]
    async fn update_of_unknown_record_is_not_found() {
        let store = MemoryStore::new();
        let user = User::new("ghost@example.com", "h".into(), Role::Admin, json!({}));
        let err = store.update_user(&user).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn user_lookup_by_email_is_case_insensitive() {
        let store = MemoryStore::new();
        let user = User::new("Case@Example.com", "h".into(), Role::Candidate, json!({}));
        store.insert_user(&user).await.unwrap();
        let found = store.user_by_email("CASE@example.COM").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }
}
