use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use crate::{
    error::{Error, Result},
    models::user::{Role, User},
    utils::token::decode_token,
    AppState,
};

/// The authenticated caller, reloaded from storage on every request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn require_role(&self, roles: &[Role]) -> Result<()> {
        self.0.ensure_role(roles)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| Error::Unauthorized("Authentication required".to_string()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("Missing authorization header".to_string()))?;
    let value = header
        .to_str()
        .map_err(|_| Error::Unauthorized("Malformed authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Unauthorized("Unsupported authorization scheme".to_string()))
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(req.headers())?;
    let claims = decode_token(token, &state.config.jwt_secret)?;
    let user = state
        .store
        .user_by_id(claims.sub)
        .await?
        .ok_or_else(|| Error::Unauthorized("User no longer exists".to_string()))?;
    if !user.is_approved {
        return Err(Error::Unauthorized("Account is not approved".to_string()));
    }
    req.extensions_mut().insert(AuthUser(user));
    Ok(next.run(req).await)
}
