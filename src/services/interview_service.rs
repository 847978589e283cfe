use uuid::Uuid;

use super::{candidate_service::CandidateService, inbox_service::InboxService};
use crate::dto::interview_dto::{CreateInterviewPayload, SendLinkPayload, UpdateInterviewPayload};
use crate::error::{Error, Result};
use crate::models::{
    interview::{Interview, InterviewFilter, InterviewResult, InterviewStatus},
    message::NewMessage,
    position::Position,
    user::{Role, User, MANAGERS, PIPELINE_STAFF},
};
use crate::repository::DynStore;
use crate::utils::time::{now, parse_slot, Slot};

#[derive(Clone)]
pub struct InterviewService {
    store: DynStore,
    candidates: CandidateService,
    inbox: InboxService,
}

impl InterviewService {
    pub fn new(store: DynStore, candidates: CandidateService, inbox: InboxService) -> Self {
        Self {
            store,
            candidates,
            inbox,
        }
    }

    pub async fn list(&self, actor: &User) -> Result<Vec<Interview>> {
        let filter = match actor.role {
            Role::Interviewer => InterviewFilter {
                interviewer: Some(actor.id),
                ..Default::default()
            },
            Role::Candidate => match self.store.candidate_by_user(actor.id).await? {
                Some(own) => InterviewFilter {
                    candidate: Some(own.id),
                    ..Default::default()
                },
                None => return Ok(Vec::new()),
            },
            _ => InterviewFilter::default(),
        };
        self.store.list_interviews(filter).await
    }

    pub async fn mine(&self, actor: &User) -> Result<Vec<Interview>> {
        self.store
            .list_interviews(InterviewFilter {
                interviewer: Some(actor.id),
                ..Default::default()
            })
            .await
    }

    pub async fn get(&self, actor: &User, id: Uuid) -> Result<Interview> {
        let interview = self.interview(id).await?;
        if PIPELINE_STAFF.contains(&actor.role) || interview.interviewer_id == Some(actor.id) {
            return Ok(interview);
        }
        if actor.role == Role::Candidate {
            if let Some(own) = self.store.candidate_by_user(actor.id).await? {
                if interview.candidate_id == Some(own.id) {
                    return Ok(interview);
                }
            }
        }
        Err(Error::Forbidden("Not allowed to view this interview".to_string()))
    }

    pub async fn create(&self, actor: &User, payload: CreateInterviewPayload) -> Result<Interview> {
        actor.ensure_role(PIPELINE_STAFF)?;
        let slot = upcoming_slot(&payload.date, payload.time.as_deref())?;

        let ts = now();
        let mut interview = Interview {
            id: Uuid::new_v4(),
            candidate_id: payload.candidate_id,
            candidate_first_name: payload.candidate_first_name.unwrap_or_default(),
            candidate_last_name: payload.candidate_last_name.unwrap_or_default(),
            application_id: payload.application_id,
            position_id: payload.position_id,
            interviewer_id: payload.interviewer_id,
            interviewer_name: None,
            date: payload.date.trim().to_string(),
            time: payload.time,
            scheduled_at: Some(slot.instant()),
            job_position: payload.job_position,
            interview_mode: payload.interview_mode,
            status: payload.status.unwrap_or(InterviewStatus::Pending),
            result: payload.result.unwrap_or(InterviewResult::Pending),
            rating: payload.rating,
            meeting_link: None,
            notes: payload.notes,
            notify_manager: payload.notify_manager,
            created_by: Some(actor.id),
            created_at: ts,
            updated_at: ts,
        };
        self.fill_from_refs(&mut interview, true).await?;
        if interview.candidate_name().is_empty() {
            return Err(Error::BadRequest(
                "Either candidateId or a candidate name is required".to_string(),
            ));
        }

        self.store.insert_interview(&interview).await?;
        tracing::info!(
            interview_id = %interview.id,
            candidate_id = ?interview.candidate_id,
            interviewer_id = ?interview.interviewer_id,
            "interview created"
        );

        if interview.notify_manager {
            self.notify_manager(actor, &interview).await;
        }
        Ok(interview)
    }

    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        payload: UpdateInterviewPayload,
    ) -> Result<Interview> {
        actor.ensure_role(PIPELINE_STAFF)?;
        let mut interview = self.interview(id).await?;
        if interview.is_locked() {
            return Err(Error::Conflict(
                "Interview has been passed and can no longer be edited".to_string(),
            ));
        }

        let date_changed = payload.date.is_some() || payload.time.is_some();
        if let Some(v) = payload.date {
            interview.date = v.trim().to_string();
        }
        if let Some(v) = payload.time {
            interview.time = Some(v);
        }
        if date_changed {
            let slot = upcoming_slot(&interview.date, interview.time.as_deref())?;
            interview.scheduled_at = Some(slot.instant());
        }

        let refs_changed = payload.candidate_id.is_some()
            || payload.position_id.is_some()
            || payload.interviewer_id.is_some();
        if let Some(v) = payload.candidate_id {
            interview.candidate_id = Some(v);
        }
        if let Some(v) = payload.candidate_first_name {
            interview.candidate_first_name = v;
        }
        if let Some(v) = payload.candidate_last_name {
            interview.candidate_last_name = v;
        }
        if let Some(v) = payload.position_id {
            interview.position_id = Some(v);
        }
        if let Some(v) = payload.job_position {
            interview.job_position = Some(v);
        }
        if let Some(v) = payload.interviewer_id {
            interview.interviewer_id = Some(v);
        }
        if let Some(v) = payload.interview_mode {
            interview.interview_mode = Some(v);
        }
        if let Some(v) = payload.status {
            interview.status = v;
        }
        if let Some(v) = payload.result {
            interview.result = v;
        }
        if let Some(v) = payload.rating {
            interview.rating = Some(v);
        }
        if let Some(v) = payload.meeting_link {
            interview.meeting_link = Some(v);
        }
        if let Some(v) = payload.notes {
            interview.notes = Some(v);
        }
        if let Some(v) = payload.notify_manager {
            interview.notify_manager = v;
        }
        self.fill_from_refs(&mut interview, refs_changed).await?;
        interview.updated_at = now();

        self.store.update_interview(&interview).await?;
        tracing::info!(
            interview_id = %interview.id,
            status = %interview.status,
            result = %interview.result,
            actor = %actor.id,
            "interview updated"
        );
        self.sync_summary(&interview).await;
        Ok(interview)
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<()> {
        actor.ensure_role(PIPELINE_STAFF)?;
        if !self.store.delete_interview(id).await? {
            return Err(Error::NotFound("Interview not found".to_string()));
        }
        tracing::info!(interview_id = %id, actor = %actor.id, "interview deleted");
        Ok(())
    }

    /// Stores the meeting link, promotes a pending interview to scheduled and
    /// tells the candidate when they have an account.
    pub async fn send_link(&self, actor: &User, id: Uuid, payload: SendLinkPayload) -> Result<Interview> {
        let mut interview = self.interview(id).await?;
        if interview.interviewer_id != Some(actor.id) && !MANAGERS.contains(&actor.role) {
            return Err(Error::Forbidden(
                "Only the assigned interviewer or a manager can send the link".to_string(),
            ));
        }

        interview.meeting_link = Some(payload.meeting_link.clone());
        if interview.status == InterviewStatus::Pending {
            interview.status = InterviewStatus::Scheduled;
        }
        interview.updated_at = now();
        self.store.update_interview(&interview).await?;
        tracing::info!(interview_id = %id, status = %interview.status, "meeting link sent");
        self.sync_summary(&interview).await;

        let account = match interview.candidate_id {
            Some(cid) => match self.store.candidate_by_id(cid).await {
                Ok(c) => c.and_then(|c| c.user),
                Err(e) => {
                    tracing::warn!(error = %e, candidate_id = %cid, "candidate lookup failed");
                    None
                }
            },
            None => None,
        };
        match account {
            Some(user_id) => {
                let when = match &interview.time {
                    Some(t) => format!("{} {}", interview.date, t),
                    None => interview.date.clone(),
                };
                let title = interview
                    .job_position
                    .clone()
                    .unwrap_or_else(|| "your application".to_string());
                self.inbox
                    .notify(
                        NewMessage::to_user(
                            user_id,
                            format!("Interview link: {}", title),
                            format!(
                                "Your interview for {} on {} is ready. Join here: {}",
                                title, when, payload.meeting_link
                            ),
                        )
                        .from_user(actor),
                    )
                    .await;
            }
            None => tracing::info!(interview_id = %id, "candidate has no account, link not delivered"),
        }
        Ok(interview)
    }

    async fn interview(&self, id: Uuid) -> Result<Interview> {
        self.store
            .interview_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Interview not found".to_string()))
    }

    /// Refreshes the copied names from the referenced records. Unknown refs
    /// are an error only when they were just supplied.
    async fn fill_from_refs(&self, interview: &mut Interview, strict_refs: bool) -> Result<()> {
        if let Some(cid) = interview.candidate_id {
            match self.store.candidate_by_id(cid).await? {
                Some(c) => {
                    interview.candidate_first_name = c.first_name;
                    interview.candidate_last_name = c.last_name;
                }
                None if strict_refs => return Err(Error::NotFound("Candidate not found".to_string())),
                None => {}
            }
        }
        if let Some(pid) = interview.position_id {
            match self.store.position_by_id(pid).await? {
                Some(p) => interview.job_position = Some(p.title),
                None if strict_refs => return Err(Error::NotFound("Position not found".to_string())),
                None => {}
            }
        }
        if let Some(uid) = interview.interviewer_id {
            match self.store.user_by_id(uid).await? {
                Some(u) => interview.interviewer_name = Some(u.display_name()),
                None if strict_refs => return Err(Error::NotFound("Interviewer not found".to_string())),
                None => {}
            }
        }
        Ok(())
    }

    async fn resolve_position(&self, interview: &Interview) -> Result<Option<Position>> {
        if let Some(pid) = interview.position_id {
            if let Some(p) = self.store.position_by_id(pid).await? {
                return Ok(Some(p));
            }
        }
        match interview.job_position.as_deref() {
            Some(title) => self.store.position_by_title(title).await,
            None => Ok(None),
        }
    }

    async fn notify_manager(&self, actor: &User, interview: &Interview) {
        let position = match self.resolve_position(interview).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                tracing::warn!(
                    interview_id = %interview.id,
                    job_position = ?interview.job_position,
                    "no position found for manager notification"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, interview_id = %interview.id, "position lookup failed");
                return;
            }
        };
        let when = match &interview.time {
            Some(t) => format!("{} {}", interview.date, t),
            None => interview.date.clone(),
        };
        self.inbox
            .notify(
                NewMessage::to_user(
                    position.hiring_manager,
                    format!("Interview scheduled: {}", position.title),
                    format!(
                        "{} is scheduled to interview for {} on {}.",
                        interview.candidate_name(),
                        position.title,
                        when
                    ),
                )
                .from_user(actor),
            )
            .await;
    }

    /// Mirrors date, status and notes into the application's embedded copy.
    async fn sync_summary(&self, interview: &Interview) {
        let Some(app_id) = interview.application_id else {
            return;
        };
        let result = async {
            let Some(mut application) = self.store.application_by_id(app_id).await? else {
                return Ok(());
            };
            let Some(summary) = application
                .interviews
                .iter_mut()
                .find(|s| s.interview_id == interview.id)
            else {
                return Ok(());
            };
            summary.date = interview.date.clone();
            summary.time = interview.time.clone();
            summary.interview_type = interview.interview_mode.clone();
            summary.status = interview.status;
            summary.notes = interview.notes.clone();
            application.updated_at = now();
            self.store.update_application(&application).await?;
            self.candidates.sync(application.candidate).await;
            Ok::<(), Error>(())
        }
        .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, interview_id = %interview.id, "interview summary sync failed");
        }
    }
}

/// Parses an entered slot and refuses one that has already gone by.
fn upcoming_slot(date: &str, time: Option<&str>) -> Result<Slot> {
    let slot = parse_slot(date, time)
        .ok_or_else(|| Error::BadRequest(format!("Invalid interview date '{}'", date)))?;
    if slot.is_past(now()) {
        return Err(Error::BadRequest(
            "Interview date cannot be in the past".to_string(),
        ));
    }
    Ok(slot)
}
