use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::interview_dto::{CreateInterviewPayload, SendLinkPayload, UpdateInterviewPayload},
    error::Result,
    middleware::auth::AuthUser,
    models::interview::Interview,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/interviews",
    responses(
        (status = 200, description = "Interviews visible to the caller", body = Vec<Interview>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list(&user).await?;
    Ok(Json(interviews))
}

#[utoipa::path(
    get,
    path = "/api/interviews/mine",
    responses(
        (status = 200, description = "Interviews assigned to the caller", body = Vec<Interview>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn my_interviews(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.mine(&user).await?;
    Ok(Json(interviews))
}

#[utoipa::path(
    get,
    path = "/api/interviews/{id}",
    params(("id" = Uuid, Path, description = "Interview ID")),
    responses(
        (status = 200, description = "Interview found", body = Interview),
        (status = 404, description = "Interview not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get(&user, id).await?;
    Ok(Json(interview))
}

#[utoipa::path(
    post,
    path = "/api/interviews",
    request_body = CreateInterviewPayload,
    responses(
        (status = 201, description = "Interview created", body = Interview),
        (status = 400, description = "Invalid or past date"),
        (status = 404, description = "Referenced record not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_interview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.create(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

#[utoipa::path(
    put,
    path = "/api/interviews/{id}",
    params(("id" = Uuid, Path, description = "Interview ID")),
    request_body = UpdateInterviewPayload,
    responses(
        (status = 200, description = "Interview updated", body = Interview),
        (status = 400, description = "Invalid or past date"),
        (status = 404, description = "Interview not found"),
        (status = 409, description = "Interview already passed")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.update(&user, id, payload).await?;
    Ok(Json(interview))
}

#[utoipa::path(
    delete,
    path = "/api/interviews/{id}",
    params(("id" = Uuid, Path, description = "Interview ID")),
    responses(
        (status = 204, description = "Interview deleted"),
        (status = 404, description = "Interview not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn delete_interview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.interview_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/interviews/{id}/send-link",
    params(("id" = Uuid, Path, description = "Interview ID")),
    request_body = SendLinkPayload,
    responses(
        (status = 200, description = "Link stored", body = Interview),
        (status = 403, description = "Not the assigned interviewer"),
        (status = 404, description = "Interview not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn send_link(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SendLinkPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.send_link(&user, id, payload).await?;
    Ok(Json(interview))
}
