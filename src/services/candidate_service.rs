use uuid::Uuid;

use super::workflow::derive_candidate_cache;
use crate::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::{
    application::{ApplicationFilter, ApplicationStatus},
    candidate::{Candidate, CandidateFilter, CandidateStatus},
    user::{normalize_email, Role, User, PIPELINE_STAFF},
};
use crate::repository::DynStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct CandidateService {
    store: DynStore,
}

impl CandidateService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, actor: &User, payload: CreateCandidatePayload) -> Result<Candidate> {
        let own_profile = actor.role == Role::Candidate;
        if !own_profile && !PIPELINE_STAFF.contains(&actor.role) {
            return Err(Error::Forbidden(
                "Only staff or the candidate themselves can create a profile".to_string(),
            ));
        }
        if own_profile && self.store.candidate_by_user(actor.id).await?.is_some() {
            return Err(Error::Conflict("You already have a candidate profile".to_string()));
        }

        let status = payload.status.unwrap_or(CandidateStatus::Active);
        if status.as_pipeline().is_some() {
            return Err(Error::BadRequest(
                "Profile status must be 'Active' or 'Passive'".to_string(),
            ));
        }

        let email = normalize_email(&payload.email);
        if self.store.candidate_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(
                "A candidate with this email address already exists".to_string(),
            ));
        }

        let ts = now();
        let candidate = Candidate {
            id: Uuid::new_v4(),
            user: own_profile.then_some(actor.id),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email,
            phone: payload.phone,
            skills: payload.skills,
            experience: payload.experience,
            education: payload.education,
            resume_path: payload.resume_path,
            status,
            job_id: None,
            position: None,
            onboarding_status: None,
            created_at: ts,
            updated_at: ts,
        };
        self.store.insert_candidate(&candidate).await?;
        tracing::info!(candidate_id = %candidate.id, created_by = %actor.id, "candidate profile created");
        Ok(candidate)
    }

    /// Links a fresh candidate account to a profile: an unlinked profile with
    /// the same email is claimed, otherwise a new one is created from the
    /// registration names.
    pub async fn attach_account(&self, user: &User, first_name: &str, last_name: &str) -> Result<Candidate> {
        if let Some(mut existing) = self.store.candidate_by_email(&user.email).await? {
            if existing.user.is_some() && existing.user != Some(user.id) {
                return Err(Error::Conflict(
                    "A candidate with this email address already exists".to_string(),
                ));
            }
            existing.user = Some(user.id);
            existing.updated_at = now();
            self.store.update_candidate(&existing).await?;
            return Ok(existing);
        }

        let ts = now();
        let candidate = Candidate {
            id: Uuid::new_v4(),
            user: Some(user.id),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: user.email.clone(),
            phone: None,
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            resume_path: None,
            status: CandidateStatus::Active,
            job_id: None,
            position: None,
            onboarding_status: None,
            created_at: ts,
            updated_at: ts,
        };
        self.store.insert_candidate(&candidate).await?;
        Ok(candidate)
    }

    pub async fn list(&self, actor: &User, query: CandidateListQuery) -> Result<Vec<Candidate>> {
        if !PIPELINE_STAFF.contains(&actor.role) && actor.role != Role::Interviewer {
            return Err(Error::Forbidden("Not allowed to browse candidates".to_string()));
        }
        self.store
            .list_candidates(CandidateFilter {
                status: query.status,
            })
            .await
    }

    pub async fn get(&self, actor: &User, id: Uuid) -> Result<Candidate> {
        let candidate = self.get_by_id(id).await?;
        ensure_can_view(actor, &candidate)?;
        Ok(candidate)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        self.store
            .candidate_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn for_user(&self, user: &User) -> Result<Candidate> {
        self.store
            .candidate_by_user(user.id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate profile not found".to_string()))
    }

    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        payload: UpdateCandidatePayload,
    ) -> Result<Candidate> {
        let mut candidate = self.get_by_id(id).await?;
        let is_owner = candidate.user == Some(actor.id);
        if !is_owner && !PIPELINE_STAFF.contains(&actor.role) {
            return Err(Error::Forbidden("Not allowed to edit this candidate".to_string()));
        }

        if let Some(email) = payload.email {
            let email = normalize_email(&email);
            if email != candidate.email {
                if self.store.candidate_by_email(&email).await?.is_some() {
                    return Err(Error::Conflict(
                        "A candidate with this email address already exists".to_string(),
                    ));
                }
                candidate.email = email;
            }
        }
        if let Some(v) = payload.first_name {
            candidate.first_name = v.trim().to_string();
        }
        if let Some(v) = payload.last_name {
            candidate.last_name = v.trim().to_string();
        }
        if let Some(v) = payload.phone {
            candidate.phone = Some(v);
        }
        if let Some(v) = payload.skills {
            candidate.skills = v;
        }
        if let Some(v) = payload.experience {
            candidate.experience = v;
        }
        if let Some(v) = payload.education {
            candidate.education = v;
        }
        if let Some(v) = payload.resume_path {
            candidate.resume_path = Some(v);
        }
        candidate.updated_at = now();
        self.store.update_candidate(&candidate).await?;
        Ok(candidate)
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<()> {
        if actor.role != Role::Admin {
            return Err(Error::Forbidden("Only admins can delete candidates".to_string()));
        }
        if !self.store.delete_candidate(id).await? {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        tracing::info!(candidate_id = %id, "candidate deleted");
        Ok(())
    }

    /// Re-derives status, jobId, position title and onboarding status from
    /// the candidate's applications.
    pub async fn refresh_cache(&self, candidate_id: Uuid) -> Result<()> {
        let Some(mut candidate) = self.store.candidate_by_id(candidate_id).await? else {
            return Ok(());
        };
        let applications = self
            .store
            .list_applications(ApplicationFilter {
                candidate: Some(candidate_id),
                ..Default::default()
            })
            .await?;
        let Some(cache) = derive_candidate_cache(&applications) else {
            return Ok(());
        };

        let title = self
            .store
            .position_by_id(cache.job_id)
            .await?
            .map(|p| p.title);
        if title.is_some() || candidate.job_id != Some(cache.job_id) {
            candidate.position = title;
        }
        candidate.job_id = Some(cache.job_id);
        candidate.status = cache.status.into();
        candidate.onboarding_status = cache.onboarding_status;
        candidate.updated_at = now();
        self.store.update_candidate(&candidate).await?;
        tracing::debug!(
            candidate_id = %candidate_id,
            status = %candidate.status,
            job_id = %cache.job_id,
            "candidate cache refreshed"
        );
        Ok(())
    }

    /// Points the cache at the stage an action just moved one application
    /// into, even when another application ranks higher.
    pub async fn mark_stage(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        title: Option<String>,
        stage: ApplicationStatus,
    ) {
        let result = async move {
            let Some(mut candidate) = self.store.candidate_by_id(candidate_id).await? else {
                return Ok(());
            };
            candidate.status = stage.into();
            candidate.job_id = Some(job_id);
            if title.is_some() {
                candidate.position = title;
            }
            candidate.updated_at = now();
            self.store.update_candidate(&candidate).await
        }
        .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, candidate_id = %candidate_id, stage = %stage, "candidate stage update failed");
        }
    }

    /// [`Self::refresh_cache`] that logs failures instead of returning them.
    pub async fn sync(&self, candidate_id: Uuid) {
        if let Err(e) = self.refresh_cache(candidate_id).await {
            tracing::warn!(error = %e, candidate_id = %candidate_id, "candidate cache sync failed");
        }
    }

    /// Re-labels cached position titles after a position is renamed.
    pub async fn rename_position(&self, position_id: Uuid, title: &str) {
        let candidates = match self.store.list_candidates(CandidateFilter::default()).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, position_id = %position_id, "could not load candidates for title sync");
                return;
            }
        };
        for mut candidate in candidates
            .into_iter()
            .filter(|c| c.job_id == Some(position_id))
        {
            candidate.position = Some(title.to_string());
            candidate.updated_at = now();
            if let Err(e) = self.store.update_candidate(&candidate).await {
                tracing::warn!(error = %e, candidate_id = %candidate.id, "position title sync failed");
            }
        }
    }
}

pub fn ensure_can_view(actor: &User, candidate: &Candidate) -> Result<()> {
    if candidate.user == Some(actor.id)
        || PIPELINE_STAFF.contains(&actor.role)
        || actor.role == Role::Interviewer
    {
        Ok(())
    } else {
        Err(Error::Forbidden("Not allowed to view this candidate".to_string()))
    }
}
