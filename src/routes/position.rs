use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::position_dto::{CreatePositionPayload, PositionListQuery, UpdatePositionPayload},
    error::Result,
    middleware::auth::AuthUser,
    models::position::{Position, PositionStatus},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/positions",
    request_body = CreatePositionPayload,
    responses(
        (status = 201, description = "Position created", body = Position),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Not a manager")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_position(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreatePositionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let position = state.position_service.create(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(position)))
}

#[utoipa::path(
    get,
    path = "/api/positions",
    params(
        ("status" = Option<PositionStatus>, Query, description = "Filter by status"),
        ("hiringManager" = Option<Uuid>, Query, description = "Filter by hiring manager")
    ),
    responses(
        (status = 200, description = "Positions", body = Vec<Position>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_positions(
    State(state): State<AppState>,
    Query(query): Query<PositionListQuery>,
) -> Result<impl IntoResponse> {
    let positions = state.position_service.list(query).await?;
    Ok(Json(positions))
}

#[utoipa::path(
    get,
    path = "/api/positions/{id}",
    params(("id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position found", body = Position),
        (status = 404, description = "Position not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let position = state.position_service.get(id).await?;
    Ok(Json(position))
}

#[utoipa::path(
    put,
    path = "/api/positions/{id}",
    params(("id" = Uuid, Path, description = "Position ID")),
    request_body = UpdatePositionPayload,
    responses(
        (status = 200, description = "Position updated", body = Position),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Position not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_position(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePositionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let position = state.position_service.update(&user, id, payload).await?;
    Ok(Json(position))
}

#[utoipa::path(
    put,
    path = "/api/positions/{id}/close",
    params(("id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position closed", body = Position),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Position not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn close_position(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let position = state.position_service.close(&user, id).await?;
    Ok(Json(position))
}

#[utoipa::path(
    delete,
    path = "/api/positions/{id}",
    params(("id" = Uuid, Path, description = "Position ID")),
    responses(
        (status = 204, description = "Position deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Position not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn delete_position(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.position_service.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
