use std::collections::HashSet;

use uuid::Uuid;

use super::{
    application_service::{ApplicationService, HiringTarget},
    candidate_service::CandidateService,
    workflow::{NAME_UNAVAILABLE, UNKNOWN_POSITION},
};
use crate::dto::{
    application_dto::TransitionTarget,
    onboarding_dto::{OnboardingEntry, OnboardingStatusResponse},
};
use crate::error::Result;
use crate::models::{
    application::{ApplicationFilter, ApplicationStatus, CommunicationEntry, OnboardingStatus},
    candidate::{CandidateFilter, CandidateStatus},
    user::{User, MANAGERS, PIPELINE_STAFF},
};
use crate::repository::DynStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct OnboardingService {
    store: DynStore,
    applications: ApplicationService,
    candidates: CandidateService,
}

impl OnboardingService {
    pub fn new(store: DynStore, applications: ApplicationService, candidates: CandidateService) -> Self {
        Self {
            store,
            applications,
            candidates,
        }
    }

    /// Hired applications of both sources, then candidates marked hired at
    /// profile level that have no hired application behind them.
    pub async fn list(&self, actor: &User) -> Result<Vec<OnboardingEntry>> {
        actor.ensure_role(PIPELINE_STAFF)?;
        let hired = self
            .store
            .list_applications(ApplicationFilter {
                status: Some(ApplicationStatus::Hired),
                ..Default::default()
            })
            .await?;
        let covered: HashSet<Uuid> = hired.iter().map(|a| a.candidate).collect();

        let mut entries: Vec<OnboardingEntry> = self
            .applications
            .populate(hired)
            .await?
            .into_iter()
            .map(|v| OnboardingEntry {
                target: TransitionTarget::Application,
                id: v.id,
                source: Some(v.source),
                candidate_id: Some(v.candidate_id),
                candidate_name: v.candidate_name,
                candidate_email: v.candidate_email,
                position_title: v.position_title,
                onboarding_status: v.onboarding_status,
                hired_at: v.updated_at,
            })
            .collect();

        let legacy = self
            .store
            .list_candidates(CandidateFilter {
                status: Some(CandidateStatus::Hired),
            })
            .await?;
        entries.extend(legacy.into_iter().filter(|c| !covered.contains(&c.id)).map(|c| {
            let name = c.full_name();
            OnboardingEntry {
                target: TransitionTarget::Candidate,
                id: c.id,
                source: None,
                candidate_id: Some(c.id),
                candidate_name: if name.is_empty() {
                    NAME_UNAVAILABLE.to_string()
                } else {
                    name
                },
                candidate_email: Some(c.email),
                position_title: c.position.unwrap_or_else(|| UNKNOWN_POSITION.to_string()),
                onboarding_status: c.onboarding_status,
                hired_at: c.updated_at,
            }
        }));
        Ok(entries)
    }

    /// Any of the three values is accepted regardless of the current one.
    pub async fn update_status(
        &self,
        actor: &User,
        id: Uuid,
        status: OnboardingStatus,
    ) -> Result<OnboardingStatusResponse> {
        actor.ensure_role(MANAGERS)?;
        match self.applications.resolve(id).await? {
            HiringTarget::Application(mut application) => {
                let previous = application.onboarding_status;
                let ts = now();
                application.onboarding_status = Some(status);
                application.communication.push(CommunicationEntry {
                    at: ts,
                    actor: Some(actor.id),
                    kind: "onboarding".to_string(),
                    from: None,
                    to: None,
                    note: Some(format!("Onboarding set to {}", status)),
                });
                application.updated_at = ts;
                self.store.update_application(&application).await?;
                tracing::info!(
                    application_id = %id,
                    from = ?previous,
                    to = %status,
                    actor = %actor.id,
                    "onboarding status changed"
                );
                self.candidates.sync(application.candidate).await;
                Ok(OnboardingStatusResponse {
                    target: TransitionTarget::Application,
                    id,
                    onboarding_status: status,
                })
            }
            HiringTarget::Candidate(mut candidate) => {
                let previous = candidate.onboarding_status;
                candidate.onboarding_status = Some(status);
                candidate.updated_at = now();
                self.store.update_candidate(&candidate).await?;
                tracing::info!(
                    candidate_id = %id,
                    from = ?previous,
                    to = %status,
                    actor = %actor.id,
                    "candidate onboarding status changed"
                );
                Ok(OnboardingStatusResponse {
                    target: TransitionTarget::Candidate,
                    id,
                    onboarding_status: status,
                })
            }
        }
    }
}
