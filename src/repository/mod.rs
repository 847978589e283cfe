//! Persistence interface for every collection the pipeline touches.
//!
//! Services only talk to [`Store`]; [`postgres::PgStore`] is the production
//! implementation and [`memory::MemoryStore`] backs tests and local runs.
//! `update_*` methods overwrite the whole record and fail with
//! `Error::NotFound` when the id is unknown.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    application::{Application, ApplicationFilter, ApplicationSource},
    candidate::{Candidate, CandidateFilter},
    interview::{Interview, InterviewFilter},
    message::{Audience, Message},
    position::{Position, PositionFilter},
    purchase_order::PurchaseOrder,
    user::{User, UserFilter},
};

pub mod memory;
pub mod postgres;

pub type DynStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>>;
    async fn update_user(&self, user: &User) -> Result<()>;
    async fn delete_user(&self, id: Uuid) -> Result<bool>;

    async fn insert_position(&self, position: &Position) -> Result<()>;
    async fn position_by_id(&self, id: Uuid) -> Result<Option<Position>>;
    /// Exact, case-sensitive title match; the most recently created wins.
    async fn position_by_title(&self, title: &str) -> Result<Option<Position>>;
    async fn list_positions(&self, filter: PositionFilter) -> Result<Vec<Position>>;
    async fn update_position(&self, position: &Position) -> Result<()>;
    async fn delete_position(&self, id: Uuid) -> Result<bool>;

    async fn insert_candidate(&self, candidate: &Candidate) -> Result<()>;
    async fn candidate_by_id(&self, id: Uuid) -> Result<Option<Candidate>>;
    async fn candidate_by_email(&self, email: &str) -> Result<Option<Candidate>>;
    async fn candidate_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>>;
    async fn list_candidates(&self, filter: CandidateFilter) -> Result<Vec<Candidate>>;
    async fn update_candidate(&self, candidate: &Candidate) -> Result<()>;
    async fn delete_candidate(&self, id: Uuid) -> Result<bool>;

    /// Fails with `Error::Conflict` when a recruiter submission already exists
    /// for the same (candidate, position) pair. The check and the insert are
    /// atomic with respect to other inserts.
    async fn insert_application(&self, application: &Application) -> Result<()>;
    async fn application_by_id(&self, id: Uuid) -> Result<Option<Application>>;
    async fn find_application(
        &self,
        candidate: Uuid,
        position: Uuid,
        source: ApplicationSource,
    ) -> Result<Option<Application>>;
    async fn list_applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>>;
    async fn update_application(&self, application: &Application) -> Result<()>;

    async fn insert_interview(&self, interview: &Interview) -> Result<()>;
    async fn interview_by_id(&self, id: Uuid) -> Result<Option<Interview>>;
    async fn list_interviews(&self, filter: InterviewFilter) -> Result<Vec<Interview>>;
    async fn update_interview(&self, interview: &Interview) -> Result<()>;
    async fn delete_interview(&self, id: Uuid) -> Result<bool>;

    async fn insert_message(&self, message: &Message) -> Result<()>;
    async fn message_by_id(&self, id: Uuid) -> Result<Option<Message>>;
    /// Messages visible to `audience`, newest first.
    async fn list_messages_for(&self, audience: &Audience) -> Result<Vec<Message>>;
    async fn set_message_read(&self, id: Uuid, is_read: bool) -> Result<()>;

    async fn insert_purchase_order(&self, order: &PurchaseOrder) -> Result<()>;
    async fn purchase_order_by_id(&self, id: Uuid) -> Result<Option<PurchaseOrder>>;
    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>>;
    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<()>;
}
