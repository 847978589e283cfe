use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

string_enum! {
    pub enum PurchaseOrderStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub candidate: Option<Uuid>,
    pub position: Option<Uuid>,
    pub application: Option<Uuid>,
    pub vendor: String,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    pub status: PurchaseOrderStatus,
    pub requested_by: Uuid,
    pub decided_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
