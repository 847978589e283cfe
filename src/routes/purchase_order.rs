use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::purchase_order_dto::{CreatePurchaseOrderPayload, DecisionPayload},
    error::Result,
    middleware::auth::AuthUser,
    models::purchase_order::PurchaseOrder,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/purchase-orders",
    request_body = CreatePurchaseOrderPayload,
    responses(
        (status = 201, description = "Purchase order requested", body = PurchaseOrder),
        (status = 400, description = "Invalid payload")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreatePurchaseOrderPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let order = state.purchase_order_service.create(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders",
    responses(
        (status = 200, description = "Purchase orders", body = Vec<PurchaseOrder>)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let orders = state.purchase_order_service.list(&user).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/api/purchase-orders/{id}",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Purchase order found", body = PurchaseOrder),
        (status = 404, description = "Purchase order not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let order = state.purchase_order_service.get(&user, id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    put,
    path = "/api/purchase-orders/{id}/status",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    request_body = DecisionPayload,
    responses(
        (status = 200, description = "Decision recorded", body = PurchaseOrder),
        (status = 400, description = "Decision must be Approved or Rejected"),
        (status = 404, description = "Purchase order not found"),
        (status = 409, description = "Already decided")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn decide_purchase_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DecisionPayload>,
) -> Result<impl IntoResponse> {
    let order = state
        .purchase_order_service
        .decide(&user, id, payload.status)
        .await?;
    Ok(Json(order))
}
