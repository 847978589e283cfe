//! Pure rules of the hiring pipeline: which status moves are allowed and how
//! a candidate's cached fields follow from their applications.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, OnboardingStatus};

/// Rendered when an application points at a candidate that no longer exists.
pub const NAME_UNAVAILABLE: &str = "Name Unavailable";
/// Rendered when an application points at a position that no longer exists.
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Permissive mode accepts every move. Strict mode refuses to leave `Hired`
/// or `Rejected` and refuses to go back to an earlier stage; rejecting is
/// always a valid move out of an active stage.
pub fn check_transition(from: ApplicationStatus, to: ApplicationStatus, strict: bool) -> Result<()> {
    if !strict || from == to {
        return Ok(());
    }
    if from.is_terminal() {
        return Err(Error::Conflict(format!(
            "Cannot move from '{}' to '{}': '{}' is final",
            from, to, from
        )));
    }
    if to != ApplicationStatus::Rejected && to.rank() < from.rank() {
        return Err(Error::Conflict(format!(
            "Cannot move backwards from '{}' to '{}'",
            from, to
        )));
    }
    Ok(())
}

/// Candidate fields derived from the full set of that candidate's applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineCache {
    pub status: ApplicationStatus,
    pub job_id: Uuid,
    pub onboarding_status: Option<OnboardingStatus>,
}

/// `None` when the candidate has no applications; the profile keeps whatever
/// it has (legacy candidate-level status) in that case.
pub fn derive_candidate_cache(applications: &[Application]) -> Option<PipelineCache> {
    let latest = applications.iter().max_by_key(|a| a.updated_at)?;

    let status = applications
        .iter()
        .map(|a| a.status)
        .filter(|s| *s != ApplicationStatus::Rejected)
        .max_by_key(|s| s.rank())
        .unwrap_or(ApplicationStatus::Rejected);

    let onboarding_status = applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Hired)
        .max_by_key(|a| a.updated_at)
        .and_then(|a| a.onboarding_status);

    Some(PipelineCache {
        status,
        job_id: latest.position,
        onboarding_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationSource;
    use chrono::Duration;

    fn app(position: Uuid, status: ApplicationStatus, age_minutes: i64) -> Application {
        let mut a = Application::new(Uuid::new_v4(), position, ApplicationSource::Direct, None);
        a.status = status;
        a.updated_at = a.updated_at - Duration::minutes(age_minutes);
        a
    }

    #[test]
    fn permissive_mode_allows_leaving_terminal_states() {
        assert!(check_transition(ApplicationStatus::Hired, ApplicationStatus::UnderReview, false).is_ok());
        assert!(check_transition(ApplicationStatus::Rejected, ApplicationStatus::Hired, false).is_ok());
    }

    #[test]
    fn strict_mode_refuses_terminal_and_backward_moves() {
        let err = check_transition(ApplicationStatus::Hired, ApplicationStatus::UnderReview, true).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
        assert!(check_transition(ApplicationStatus::Rejected, ApplicationStatus::Applied, true).is_err());
        assert!(check_transition(ApplicationStatus::Offer, ApplicationStatus::Screening, true).is_err());
    }

    #[test]
    fn strict_mode_allows_forward_moves_and_rejection() {
        assert!(check_transition(ApplicationStatus::Applied, ApplicationStatus::Interview, true).is_ok());
        assert!(check_transition(ApplicationStatus::Offer, ApplicationStatus::Rejected, true).is_ok());
        assert!(check_transition(ApplicationStatus::Hired, ApplicationStatus::Hired, true).is_ok());
    }

    #[test]
    fn no_applications_means_no_cache() {
        assert_eq!(derive_candidate_cache(&[]), None);
    }

    #[test]
    fn cache_takes_most_advanced_status_and_latest_position() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let apps = vec![
            app(p1, ApplicationStatus::Offer, 30),
            app(p2, ApplicationStatus::Applied, 1),
        ];
        let cache = derive_candidate_cache(&apps).unwrap();
        assert_eq!(cache.status, ApplicationStatus::Offer);
        assert_eq!(cache.job_id, p2);
        assert_eq!(cache.onboarding_status, None);
    }

    #[test]
    fn rejected_only_when_every_application_is_rejected() {
        let p = Uuid::new_v4();
        let all_rejected = vec![
            app(p, ApplicationStatus::Rejected, 5),
            app(Uuid::new_v4(), ApplicationStatus::Rejected, 1),
        ];
        assert_eq!(
            derive_candidate_cache(&all_rejected).unwrap().status,
            ApplicationStatus::Rejected
        );

        let mixed = vec![
            app(p, ApplicationStatus::Rejected, 1),
            app(Uuid::new_v4(), ApplicationStatus::Applied, 5),
        ];
        assert_eq!(derive_candidate_cache(&mixed).unwrap().status, ApplicationStatus::Applied);
    }

    #[test]
    fn onboarding_comes_from_the_hired_application() {
        let mut hired = app(Uuid::new_v4(), ApplicationStatus::Hired, 10);
        hired.onboarding_status = Some(OnboardingStatus::InProgress);
        let other = app(Uuid::new_v4(), ApplicationStatus::Screening, 1);
        let cache = derive_candidate_cache(&[hired, other]).unwrap();
        assert_eq!(cache.status, ApplicationStatus::Hired);
        assert_eq!(cache.onboarding_status, Some(OnboardingStatus::InProgress));
    }
}
