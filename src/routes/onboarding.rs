use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::onboarding_dto::{OnboardingEntry, OnboardingStatusPayload, OnboardingStatusResponse},
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/onboarding",
    responses(
        (status = 200, description = "Hired people and their onboarding state", body = Vec<OnboardingEntry>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_onboarding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let entries = state.onboarding_service.list(&user).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    put,
    path = "/api/onboarding/{id}/status",
    params(("id" = Uuid, Path, description = "Application or candidate ID")),
    request_body = OnboardingStatusPayload,
    responses(
        (status = 200, description = "Onboarding status set", body = OnboardingStatusResponse),
        (status = 404, description = "Nothing found with this id")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_onboarding_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OnboardingStatusPayload>,
) -> Result<impl IntoResponse> {
    let result = state
        .onboarding_service
        .update_status(&user, id, payload.onboarding_status)
        .await?;
    Ok(Json(result))
}
