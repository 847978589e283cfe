use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload},
    error::Result,
    middleware::auth::AuthUser,
    models::candidate::{Candidate, CandidateStatus},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created", body = Candidate),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already used")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.create(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    params(("status" = Option<CandidateStatus>, Query, description = "Filter by status")),
    responses(
        (status = 200, description = "Candidates", body = Vec<Candidate>),
        (status = 403, description = "Not allowed")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list(&user, query).await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/candidates/me",
    responses(
        (status = 200, description = "Caller's candidate profile", body = Candidate),
        (status = 404, description = "No profile linked to this account")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn my_candidate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.for_user(&user).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate found", body = Candidate),
        (status = 404, description = "Candidate not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get(&user, id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    put,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = Candidate),
        (status = 404, description = "Candidate not found"),
        (status = 409, description = "Email already used")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.update(&user, id, payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Candidate not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.candidate_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
