use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::purchase_order::PurchaseOrderStatus;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderPayload {
    pub candidate_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    /// When set, candidate and position are taken from the application.
    pub application_id: Option<Uuid>,
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub vendor: String,
    pub amount: Decimal,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DecisionPayload {
    pub status: PurchaseOrderStatus,
}
