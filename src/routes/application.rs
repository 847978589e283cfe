use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplicationView, ApplyPayload, HistoryEntry, ScheduleResponse,
        SchedulePayload, StatusPayload, SubmitPayload, TransitionPayload, TransitionResponse,
    },
    error::Result,
    middleware::auth::AuthUser,
    models::application::{ApplicationSource, ApplicationStatus},
    AppState,
};

fn note_of(body: Option<Json<TransitionPayload>>) -> Option<String> {
    body.and_then(|Json(p)| p.note)
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application created", body = ApplicationView),
        (status = 400, description = "Position closed or invalid payload"),
        (status = 404, description = "Position or candidate profile not found"),
        (status = 409, description = "Already applied")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.apply(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = SubmitPayload,
    responses(
        (status = 201, description = "Candidate submitted", body = ApplicationView),
        (status = 404, description = "Candidate or position not found"),
        (status = 409, description = "Candidate already submitted for this position")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn submit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<SubmitPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.submit(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("status" = Option<ApplicationStatus>, Query, description = "Filter by status"),
        ("source" = Option<ApplicationSource>, Query, description = "Filter by source"),
        ("positionId" = Option<Uuid>, Query, description = "Filter by position")
    ),
    responses(
        (status = 200, description = "Applications with resolved references", body = Vec<ApplicationView>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list(&user, query).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application found", body = ApplicationView),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get(&user, id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/applications/history/{email}",
    params(("email" = String, Path, description = "Candidate email")),
    responses(
        (status = 200, description = "Application history", body = Vec<HistoryEntry>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    let entries = state.application_service.history(&user, &email).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/review",
    params(("id" = Uuid, Path, description = "Application or candidate ID")),
    request_body(content = TransitionPayload, description = "Optional note"),
    responses(
        (status = 200, description = "Moved to Under Review", body = TransitionResponse),
        (status = 404, description = "Nothing found with this id"),
        (status = 409, description = "Move not allowed")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<TransitionPayload>>,
) -> Result<impl IntoResponse> {
    let result = state.application_service.review(&user, id, note_of(body)).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/reject",
    params(("id" = Uuid, Path, description = "Application or candidate ID")),
    request_body(content = TransitionPayload, description = "Optional note"),
    responses(
        (status = 200, description = "Rejected", body = TransitionResponse),
        (status = 404, description = "Nothing found with this id"),
        (status = 409, description = "Move not allowed")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn reject(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<TransitionPayload>>,
) -> Result<impl IntoResponse> {
    let result = state.application_service.reject(&user, id, note_of(body)).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/hire",
    params(("id" = Uuid, Path, description = "Application or candidate ID")),
    request_body(content = TransitionPayload, description = "Optional note"),
    responses(
        (status = 200, description = "Hired, onboarding Pending", body = TransitionResponse),
        (status = 404, description = "Nothing found with this id"),
        (status = 409, description = "Move not allowed")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn hire(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<TransitionPayload>>,
) -> Result<impl IntoResponse> {
    let result = state.application_service.hire(&user, id, note_of(body)).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application or candidate ID")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status changed", body = TransitionResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Nothing found with this id"),
        (status = 409, description = "Move not allowed")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn set_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse> {
    let result = state
        .application_service
        .set_status(&user, id, payload.status, payload.note)
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/schedule",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = SchedulePayload,
    responses(
        (status = 200, description = "Interview created", body = ScheduleResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn schedule(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SchedulePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let result = state.application_service.schedule(&user, id, payload).await?;
    Ok(Json(result))
}
