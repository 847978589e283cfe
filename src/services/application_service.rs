use std::collections::HashMap;

use uuid::Uuid;

use super::{
    candidate_service::CandidateService,
    inbox_service::InboxService,
    workflow::{check_transition, NAME_UNAVAILABLE, UNKNOWN_POSITION},
};
use crate::dto::application_dto::{
    ApplicationListQuery, ApplicationView, ApplyPayload, HistoryEntry, ScheduleResponse,
    SchedulePayload, SubmitPayload, TransitionResponse, TransitionTarget,
};
use crate::error::{Error, Result};
use crate::models::{
    application::{
        Application, ApplicationFilter, ApplicationSource, ApplicationStatus, InterviewSummary,
        OnboardingStatus,
    },
    candidate::Candidate,
    interview::{Interview, InterviewResult, InterviewStatus},
    message::NewMessage,
    position::Position,
    user::{normalize_email, Role, User, PIPELINE_STAFF},
};
use crate::repository::DynStore;
use crate::utils::time::{now, parse_slot};

/// Record a status move lands on. Ids are looked up as applications first and
/// fall back to legacy candidate-level status.
#[derive(Debug, Clone)]
pub enum HiringTarget {
    Application(Application),
    Candidate(Candidate),
}

#[derive(Clone)]
pub struct ApplicationService {
    store: DynStore,
    candidates: CandidateService,
    inbox: InboxService,
    strict: bool,
}

impl ApplicationService {
    pub fn new(
        store: DynStore,
        candidates: CandidateService,
        inbox: InboxService,
        strict: bool,
    ) -> Self {
        Self {
            store,
            candidates,
            inbox,
            strict,
        }
    }

    pub async fn apply(&self, actor: &User, payload: ApplyPayload) -> Result<ApplicationView> {
        if actor.role != Role::Candidate {
            return Err(Error::Forbidden("Only candidates can apply".to_string()));
        }
        let candidate = self.candidates.for_user(actor).await?;
        let position = self.open_position(payload.position_id).await?;
        if self
            .store
            .find_application(candidate.id, position.id, ApplicationSource::Direct)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "You have already applied for this position".to_string(),
            ));
        }

        let mut application =
            Application::new(candidate.id, position.id, ApplicationSource::Direct, Some(actor.id));
        application.resume_url = payload.resume_url;
        self.store.insert_application(&application).await?;
        tracing::info!(
            application_id = %application.id,
            candidate_id = %candidate.id,
            position_id = %position.id,
            source = %application.source,
            "application created"
        );

        self.candidates.sync(candidate.id).await;
        self.inbox
            .notify(
                NewMessage::to_user(
                    position.hiring_manager,
                    format!("New application: {}", position.title),
                    format!("{} applied for {}.", candidate.full_name(), position.title),
                )
                .from_user(actor),
            )
            .await;

        Ok(view(application, Some(&candidate), Some(&position)))
    }

    pub async fn submit(&self, actor: &User, payload: SubmitPayload) -> Result<ApplicationView> {
        actor.ensure_role(&[Role::Recruiter, Role::Admin])?;
        let candidate = self.candidates.get_by_id(payload.candidate_id).await?;
        let position = self.open_position(payload.position_id).await?;
        if self
            .store
            .find_application(candidate.id, position.id, ApplicationSource::Recruiter)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "Candidate has already been submitted for this position".to_string(),
            ));
        }

        let mut application = Application::new(
            candidate.id,
            position.id,
            ApplicationSource::Recruiter,
            Some(actor.id),
        );
        application.notes = payload.notes;
        application.resume_url = payload.resume_url.or_else(|| candidate.resume_path.clone());
        self.store.insert_application(&application).await?;
        tracing::info!(
            application_id = %application.id,
            candidate_id = %candidate.id,
            position_id = %position.id,
            source = %application.source,
            "candidate submitted"
        );

        self.candidates.sync(candidate.id).await;
        self.inbox
            .notify(
                NewMessage::to_user(
                    position.hiring_manager,
                    format!("New submission: {}", position.title),
                    format!(
                        "{} submitted {} for {}.",
                        actor.display_name(),
                        candidate.full_name(),
                        position.title
                    ),
                )
                .from_user(actor),
            )
            .await;

        Ok(view(application, Some(&candidate), Some(&position)))
    }

    pub async fn list(&self, actor: &User, query: ApplicationListQuery) -> Result<Vec<ApplicationView>> {
        let mut filter = ApplicationFilter {
            candidate: None,
            position: query.position_id,
            status: query.status,
            source: query.source,
        };
        if actor.role == Role::Candidate {
            match self.store.candidate_by_user(actor.id).await? {
                Some(own) => filter.candidate = Some(own.id),
                None => return Ok(Vec::new()),
            }
        } else {
            actor.ensure_role(PIPELINE_STAFF)?;
        }
        let applications = self.store.list_applications(filter).await?;
        self.populate(applications).await
    }

    pub async fn get(&self, actor: &User, id: Uuid) -> Result<ApplicationView> {
        let application = self.application(id).await?;
        self.ensure_can_view(actor, &application).await?;
        let mut views = self.populate(vec![application]).await?;
        views
            .pop()
            .ok_or_else(|| Error::Internal("application view went missing".to_string()))
    }

    /// Every application of the candidate with this email, plus the candidate
    /// record itself when it carries a pipeline status but no applications.
    pub async fn history(&self, actor: &User, email: &str) -> Result<Vec<HistoryEntry>> {
        let email = normalize_email(email);
        if !PIPELINE_STAFF.contains(&actor.role) && actor.email != email {
            return Err(Error::Forbidden(
                "Not allowed to view this candidate's history".to_string(),
            ));
        }
        let Some(candidate) = self.store.candidate_by_email(&email).await? else {
            return Ok(Vec::new());
        };

        let applications = self
            .store
            .list_applications(ApplicationFilter {
                candidate: Some(candidate.id),
                ..Default::default()
            })
            .await?;

        if applications.is_empty() {
            if candidate.status.as_pipeline().is_none() {
                return Ok(Vec::new());
            }
            return Ok(vec![HistoryEntry {
                target: TransitionTarget::Candidate,
                id: candidate.id,
                source: None,
                position_id: candidate.job_id,
                position_title: candidate
                    .position
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_POSITION.to_string()),
                status: candidate.status.to_string(),
                onboarding_status: candidate.onboarding_status,
                applied_at: candidate.created_at,
                updated_at: candidate.updated_at,
            }]);
        }

        let mut titles: HashMap<Uuid, String> = HashMap::new();
        let mut entries = Vec::with_capacity(applications.len());
        for application in applications {
            let title = match titles.get(&application.position) {
                Some(t) => t.clone(),
                None => {
                    let t = self.position_title(application.position).await;
                    titles.insert(application.position, t.clone());
                    t
                }
            };
            entries.push(HistoryEntry {
                target: TransitionTarget::Application,
                id: application.id,
                source: Some(application.source),
                position_id: Some(application.position),
                position_title: title,
                status: application.status.to_string(),
                onboarding_status: application.onboarding_status,
                applied_at: application.applied_at,
                updated_at: application.updated_at,
            });
        }
        Ok(entries)
    }

    pub async fn review(&self, actor: &User, id: Uuid, note: Option<String>) -> Result<TransitionResponse> {
        self.transition(actor, id, ApplicationStatus::UnderReview, note).await
    }

    pub async fn reject(&self, actor: &User, id: Uuid, note: Option<String>) -> Result<TransitionResponse> {
        self.transition(actor, id, ApplicationStatus::Rejected, note).await
    }

    pub async fn hire(&self, actor: &User, id: Uuid, note: Option<String>) -> Result<TransitionResponse> {
        self.transition(actor, id, ApplicationStatus::Hired, note).await
    }

    pub async fn set_status(
        &self,
        actor: &User,
        id: Uuid,
        status: ApplicationStatus,
        note: Option<String>,
    ) -> Result<TransitionResponse> {
        self.transition(actor, id, status, note).await
    }

    pub async fn resolve(&self, id: Uuid) -> Result<HiringTarget> {
        if let Some(application) = self.store.application_by_id(id).await? {
            return Ok(HiringTarget::Application(application));
        }
        if let Some(candidate) = self.store.candidate_by_id(id).await? {
            return Ok(HiringTarget::Candidate(candidate));
        }
        Err(Error::NotFound(
            "No application or candidate found with this id".to_string(),
        ))
    }

    async fn transition(
        &self,
        actor: &User,
        id: Uuid,
        to: ApplicationStatus,
        note: Option<String>,
    ) -> Result<TransitionResponse> {
        actor.ensure_role(PIPELINE_STAFF)?;
        match self.resolve(id).await? {
            HiringTarget::Application(mut application) => {
                let from = application.status;
                check_transition(from, to, self.strict)?;
                application.record_transition(Some(actor.id), to, note);
                if to == ApplicationStatus::Hired && from != ApplicationStatus::Hired {
                    application.onboarding_status = Some(OnboardingStatus::Pending);
                }
                self.store.update_application(&application).await?;
                tracing::info!(
                    application_id = %application.id,
                    from = %from,
                    to = %to,
                    actor = %actor.id,
                    "application status changed"
                );
                self.candidates.sync(application.candidate).await;

                let onboarding_status = application.onboarding_status;
                let view = self.populate(vec![application]).await?.pop();
                Ok(TransitionResponse {
                    target: TransitionTarget::Application,
                    id,
                    status: to.to_string(),
                    onboarding_status,
                    application: view,
                    candidate: None,
                })
            }
            HiringTarget::Candidate(mut candidate) => {
                let from = candidate.status;
                if let Some(stage) = from.as_pipeline() {
                    check_transition(stage, to, self.strict)?;
                }
                candidate.status = to.into();
                if to == ApplicationStatus::Hired && from.as_pipeline() != Some(ApplicationStatus::Hired) {
                    candidate.onboarding_status = Some(OnboardingStatus::Pending);
                }
                candidate.updated_at = now();
                self.store.update_candidate(&candidate).await?;
                tracing::info!(
                    candidate_id = %candidate.id,
                    from = %from,
                    to = %to,
                    actor = %actor.id,
                    "candidate status changed"
                );
                Ok(TransitionResponse {
                    target: TransitionTarget::Candidate,
                    id,
                    status: candidate.status.to_string(),
                    onboarding_status: candidate.onboarding_status,
                    application: None,
                    candidate: Some(candidate),
                })
            }
        }
    }

    /// Creates an interview from the application and moves it to `Interview`.
    pub async fn schedule(
        &self,
        actor: &User,
        id: Uuid,
        payload: SchedulePayload,
    ) -> Result<ScheduleResponse> {
        actor.ensure_role(PIPELINE_STAFF)?;
        let mut application = self.application(id).await?;
        let from = application.status;
        check_transition(from, ApplicationStatus::Interview, self.strict)?;

        let slot = parse_slot(&payload.interview_date, payload.interview_time.as_deref());
        if self.strict {
            match slot {
                None => return Err(Error::BadRequest("Invalid interview date".to_string())),
                Some(s) if s.is_past(now()) => {
                    return Err(Error::BadRequest(
                        "Interview date cannot be in the past".to_string(),
                    ))
                }
                _ => {}
            }
        }

        let candidate = self.store.candidate_by_id(application.candidate).await?;
        let position = self.store.position_by_id(application.position).await?;
        let interviewer = match payload.interviewer_id {
            Some(uid) => Some(
                self.store
                    .user_by_id(uid)
                    .await?
                    .ok_or_else(|| Error::NotFound("Interviewer not found".to_string()))?,
            ),
            None => None,
        };

        let (first_name, last_name) = match &candidate {
            Some(c) => (c.first_name.clone(), c.last_name.clone()),
            None => (NAME_UNAVAILABLE.to_string(), String::new()),
        };
        let ts = now();
        let interview = Interview {
            id: Uuid::new_v4(),
            candidate_id: Some(application.candidate),
            candidate_first_name: first_name,
            candidate_last_name: last_name,
            application_id: Some(application.id),
            position_id: Some(application.position),
            interviewer_id: interviewer.as_ref().map(|u| u.id),
            interviewer_name: interviewer.as_ref().map(User::display_name),
            date: payload.interview_date.trim().to_string(),
            time: payload.interview_time.clone(),
            scheduled_at: slot.map(|s| s.instant()),
            job_position: position.as_ref().map(|p| p.title.clone()),
            interview_mode: payload.interview_mode.clone(),
            status: InterviewStatus::Pending,
            result: InterviewResult::Pending,
            rating: None,
            meeting_link: None,
            notes: payload.notes.clone(),
            notify_manager: false,
            created_by: Some(actor.id),
            created_at: ts,
            updated_at: ts,
        };
        self.store.insert_interview(&interview).await?;

        application.interviews.push(InterviewSummary {
            interview_id: interview.id,
            date: interview.date.clone(),
            time: interview.time.clone(),
            interview_type: interview.interview_mode.clone(),
            status: interview.status,
            notes: interview.notes.clone(),
        });
        application.record_transition(Some(actor.id), ApplicationStatus::Interview, payload.notes);
        self.store.update_application(&application).await?;
        tracing::info!(
            application_id = %application.id,
            interview_id = %interview.id,
            from = %from,
            to = %ApplicationStatus::Interview,
            actor = %actor.id,
            "interview scheduled from application"
        );

        self.candidates.sync(application.candidate).await;
        self.candidates
            .mark_stage(
                application.candidate,
                application.position,
                position.as_ref().map(|p| p.title.clone()),
                ApplicationStatus::Interview,
            )
            .await;
        Ok(ScheduleResponse {
            application: view(application, candidate.as_ref(), position.as_ref()),
            interview,
        })
    }

    async fn application(&self, id: Uuid) -> Result<Application> {
        self.store
            .application_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    async fn open_position(&self, id: Uuid) -> Result<Position> {
        let position = self
            .store
            .position_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Position not found".to_string()))?;
        if !position.is_open() {
            return Err(Error::BadRequest(
                "Position is closed and no longer accepts applications".to_string(),
            ));
        }
        Ok(position)
    }

    async fn ensure_can_view(&self, actor: &User, application: &Application) -> Result<()> {
        if PIPELINE_STAFF.contains(&actor.role) {
            return Ok(());
        }
        if actor.role == Role::Candidate {
            if let Some(own) = self.store.candidate_by_user(actor.id).await? {
                if own.id == application.candidate {
                    return Ok(());
                }
            }
        }
        Err(Error::Forbidden("Not allowed to view this application".to_string()))
    }

    async fn position_title(&self, id: Uuid) -> String {
        match self.store.position_by_id(id).await {
            Ok(Some(p)) => p.title,
            Ok(None) => UNKNOWN_POSITION.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, position_id = %id, "position lookup failed");
                UNKNOWN_POSITION.to_string()
            }
        }
    }

    /// Resolves candidate and position references. Lookups that fail or find
    /// nothing fall back to placeholders so one bad row never fails a list.
    pub async fn populate(&self, applications: Vec<Application>) -> Result<Vec<ApplicationView>> {
        let mut candidates: HashMap<Uuid, Option<Candidate>> = HashMap::new();
        let mut positions: HashMap<Uuid, Option<Position>> = HashMap::new();
        let mut views = Vec::with_capacity(applications.len());

        for application in applications {
            if !candidates.contains_key(&application.candidate) {
                let found = self
                    .store
                    .candidate_by_id(application.candidate)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!(error = %e, candidate_id = %application.candidate, "candidate lookup failed");
                        None
                    });
                candidates.insert(application.candidate, found);
            }
            if !positions.contains_key(&application.position) {
                let found = self
                    .store
                    .position_by_id(application.position)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!(error = %e, position_id = %application.position, "position lookup failed");
                        None
                    });
                positions.insert(application.position, found);
            }
            let candidate = candidates.get(&application.candidate).and_then(Option::as_ref);
            let position = positions.get(&application.position).and_then(Option::as_ref);
            views.push(view(application, candidate, position));
        }
        Ok(views)
    }
}

fn view(
    application: Application,
    candidate: Option<&Candidate>,
    position: Option<&Position>,
) -> ApplicationView {
    let candidate_name = candidate
        .map(Candidate::full_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| NAME_UNAVAILABLE.to_string());
    let candidate_email = candidate.map(|c| c.email.clone());
    let position_title = position
        .map(|p| p.title.clone())
        .unwrap_or_else(|| UNKNOWN_POSITION.to_string());
    ApplicationView::new(application, candidate_name, candidate_email, position_title)
}
