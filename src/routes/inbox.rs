use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::inbox_dto::{MessageResponse, MessageStatusPayload, ReadAllResponse, UnreadCountResponse},
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/inbox",
    responses(
        (status = 200, description = "Messages visible to the caller, newest first", body = Vec<MessageResponse>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let messages = state.inbox_service.list(&user).await?;
    Ok(Json(
        messages
            .into_iter()
            .map(MessageResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/inbox/unread-count",
    responses(
        (status = 200, description = "Unread message count", body = UnreadCountResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn unread_count(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let count = state.inbox_service.unread_count(&user).await?;
    Ok(Json(UnreadCountResponse { count }))
}

#[utoipa::path(
    put,
    path = "/api/inbox/{id}/status",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = MessageStatusPayload,
    responses(
        (status = 200, description = "Read flag updated", body = MessageResponse),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn set_message_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MessageStatusPayload>,
) -> Result<impl IntoResponse> {
    let message = state
        .inbox_service
        .set_read(&user, id, payload.status.is_read())
        .await?;
    Ok(Json(MessageResponse::from(message)))
}

#[utoipa::path(
    put,
    path = "/api/inbox/read-all",
    responses(
        (status = 200, description = "Every visible message marked read", body = ReadAllResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn read_all(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let updated = state.inbox_service.mark_all_read(&user).await?;
    Ok(Json(ReadAllResponse { updated }))
}
