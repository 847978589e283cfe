use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

string_enum! {
    /// Account role; every route authorizes against it.
    pub enum Role {
        Candidate => "candidate",
        Employer => "employer",
        HiringManager => "hiringManager",
        Recruiter => "recruiter",
        Admin => "admin",
        Interviewer => "interviewer",
    }
}

impl Role {
    /// Candidates and admins can log in right after registering.
    pub fn auto_approved(self) -> bool {
        matches!(self, Role::Candidate | Role::Admin)
    }

    /// Roles that also read inbox messages addressed to `"System"`.
    pub fn is_manager_class(self) -> bool {
        matches!(self, Role::Admin | Role::HiringManager | Role::Employer)
    }
}

/// Roles that own positions and decide on hires.
pub const MANAGERS: &[Role] = &[Role::Admin, Role::HiringManager, Role::Employer];

/// Roles allowed to move applications through the pipeline.
pub const PIPELINE_STAFF: &[Role] = &[
    Role::Admin,
    Role::HiringManager,
    Role::Employer,
    Role::Recruiter,
];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub is_approved: bool,
    #[schema(value_type = Object)]
    pub profile: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, password_hash: String, role: Role, profile: JsonValue) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            role,
            is_approved: role.auto_approved(),
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn ensure_role(&self, roles: &[Role]) -> Result<()> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(Error::Forbidden(format!(
                "Role '{}' is not allowed to perform this action",
                self.role
            )))
        }
    }

    pub fn display_name(&self) -> String {
        let first = self.profile.get("firstName").and_then(JsonValue::as_str);
        let last = self.profile.get("lastName").and_then(JsonValue::as_str);
        match (first, last) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.to_string(),
            _ => self
                .profile
                .get("name")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.email.clone()),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub approved: Option<bool>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_candidates_and_admins_auto_approve() {
        let approved: Vec<Role> = Role::ALL
            .iter()
            .copied()
            .filter(|r| r.auto_approved())
            .collect();
        assert_eq!(approved, vec![Role::Candidate, Role::Admin]);
    }

    #[test]
    fn new_user_normalizes_email_and_approval() {
        let user = User::new(" Jane@Example.COM ", "hash".into(), Role::Recruiter, json!({}));
        assert_eq!(user.email, "jane@example.com");
        assert!(!user.is_approved);
    }

    #[test]
    fn display_name_prefers_profile_names() {
        let user = User::new(
            "a@b.c",
            "h".into(),
            Role::Interviewer,
            json!({"firstName": "Ada", "lastName": "Lovelace"}),
        );
        assert_eq!(user.display_name(), "Ada Lovelace");
        let bare = User::new("x@y.z", "h".into(), Role::Interviewer, json!({}));
        assert_eq!(bare.display_name(), "x@y.z");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User::new("a@b.c", "secret-hash".into(), Role::Admin, json!({}));
        let body = serde_json::to_string(&user).unwrap();
        assert!(!body.contains("secret-hash"));
        assert!(body.contains("\"isApproved\":true"));
    }
}
