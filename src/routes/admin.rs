use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::auth_dto::{UserListQuery, UserResponse},
    error::Result,
    middleware::auth::AuthUser,
    models::user::Role,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("approved" = Option<bool>, Query, description = "Filter by approval state"),
        ("role" = Option<Role>, Query, description = "Filter by role")
    ),
    responses(
        (status = 200, description = "Users", body = Vec<UserResponse>),
        (status = 403, description = "Admins only")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;
    let users = state.auth_service.list_users(query).await?;
    Ok(Json(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/approve",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User approved", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn approve_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;
    let user = state.auth_service.approve(&auth.0, id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}/reject",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "Pending user removed"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User is already approved")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn reject_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    auth.require_role(&[Role::Admin])?;
    state.auth_service.reject(&auth.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
