use std::sync::Arc;

use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use super::candidate_service::CandidateService;
use crate::config::Config;
use crate::dto::auth_dto::{LoginPayload, RegisterPayload, UserListQuery};
use crate::error::{Error, Result};
use crate::models::user::{Role, User, UserFilter};
use crate::repository::DynStore;
use crate::utils::{
    crypto::{hash_password, verify_password},
    time::now,
    token::issue_token,
};

#[derive(Clone)]
pub struct AuthService {
    store: DynStore,
    config: Arc<Config>,
    candidates: CandidateService,
}

impl AuthService {
    pub fn new(store: DynStore, config: Arc<Config>, candidates: CandidateService) -> Self {
        Self {
            store,
            config,
            candidates,
        }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        if self.store.user_by_email(&payload.email).await?.is_some() {
            return Err(Error::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let profile = match payload.profile {
            Some(JsonValue::Object(map)) => JsonValue::Object(map),
            Some(JsonValue::Null) | None => json!({}),
            Some(_) => return Err(Error::BadRequest("profile must be an object".to_string())),
        };
        let password_hash = hash_password(&payload.password)?;
        let user = User::new(&payload.email, password_hash, payload.role, profile);
        self.store.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, approved = user.is_approved, "user registered");

        if user.role == Role::Candidate {
            let first = user.profile.get("firstName").and_then(JsonValue::as_str);
            let last = user.profile.get("lastName").and_then(JsonValue::as_str);
            if let (Some(first), Some(last)) = (first, last) {
                if let Err(e) = self.candidates.attach_account(&user, first, last).await {
                    tracing::warn!(error = %e, user_id = %user.id, "could not link candidate profile");
                }
            }
        }
        Ok(user)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<(String, User)> {
        let invalid = || Error::Unauthorized("Invalid email or password".to_string());
        let user = self
            .store
            .user_by_email(&payload.email)
            .await?
            .ok_or_else(invalid)?;
        if !verify_password(&payload.password, &user.password_hash) {
            return Err(invalid());
        }
        if !user.is_approved {
            return Err(Error::Forbidden(
                "Your account is awaiting admin approval".to_string(),
            ));
        }
        let token = issue_token(&user, &self.config.jwt_secret, self.config.jwt_expiry_hours)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((token, user))
    }

    pub async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>> {
        self.store
            .list_users(UserFilter {
                approved: query.approved,
                role: query.role,
            })
            .await
    }

    pub async fn approve(&self, admin: &User, id: Uuid) -> Result<User> {
        let mut user = self.user_by_id(id).await?;
        if !user.is_approved {
            user.is_approved = true;
            user.updated_at = now();
            self.store.update_user(&user).await?;
            tracing::info!(user_id = %id, approved_by = %admin.id, "user approved");
        }
        Ok(user)
    }

    /// Hard-deletes a pending account; approved accounts cannot be rejected.
    pub async fn reject(&self, admin: &User, id: Uuid) -> Result<()> {
        let user = self.user_by_id(id).await?;
        if user.is_approved {
            return Err(Error::Conflict(
                "Only users awaiting approval can be rejected".to_string(),
            ));
        }
        self.store.delete_user(id).await?;
        tracing::info!(user_id = %id, rejected_by = %admin.id, "pending user rejected");
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<User> {
        self.store
            .user_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }
}
