use rust_decimal::Decimal;
use uuid::Uuid;

use super::inbox_service::InboxService;
use crate::dto::purchase_order_dto::CreatePurchaseOrderPayload;
use crate::error::{Error, Result};
use crate::models::{
    message::NewMessage,
    purchase_order::{PurchaseOrder, PurchaseOrderStatus},
    user::{User, MANAGERS, PIPELINE_STAFF},
};
use crate::repository::DynStore;
use crate::utils::time::now;

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Clone)]
pub struct PurchaseOrderService {
    store: DynStore,
    inbox: InboxService,
}

impl PurchaseOrderService {
    pub fn new(store: DynStore, inbox: InboxService) -> Self {
        Self { store, inbox }
    }

    pub async fn create(&self, actor: &User, payload: CreatePurchaseOrderPayload) -> Result<PurchaseOrder> {
        actor.ensure_role(PIPELINE_STAFF)?;
        if payload.amount <= Decimal::ZERO {
            return Err(Error::BadRequest("Amount must be greater than zero".to_string()));
        }

        let (mut candidate, mut position) = (payload.candidate_id, payload.position_id);
        if let Some(app_id) = payload.application_id {
            let application = self
                .store
                .application_by_id(app_id)
                .await?
                .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
            candidate = Some(application.candidate);
            position = Some(application.position);
        }
        if let Some(cid) = candidate {
            if self.store.candidate_by_id(cid).await?.is_none() {
                return Err(Error::NotFound("Candidate not found".to_string()));
            }
        }
        if let Some(pid) = position {
            if self.store.position_by_id(pid).await?.is_none() {
                return Err(Error::NotFound("Position not found".to_string()));
            }
        }

        let ts = now();
        let order = PurchaseOrder {
            id: Uuid::new_v4(),
            candidate,
            position,
            application: payload.application_id,
            vendor: payload.vendor.trim().to_string(),
            amount: payload.amount,
            currency: payload
                .currency
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            description: payload.description,
            status: PurchaseOrderStatus::Pending,
            requested_by: actor.id,
            decided_by: None,
            created_at: ts,
            updated_at: ts,
        };
        self.store.insert_purchase_order(&order).await?;
        tracing::info!(
            purchase_order_id = %order.id,
            amount = %order.amount,
            currency = %order.currency,
            requested_by = %actor.id,
            "purchase order requested"
        );
        Ok(order)
    }

    pub async fn list(&self, actor: &User) -> Result<Vec<PurchaseOrder>> {
        actor.ensure_role(PIPELINE_STAFF)?;
        self.store.list_purchase_orders().await
    }

    pub async fn get(&self, actor: &User, id: Uuid) -> Result<PurchaseOrder> {
        actor.ensure_role(PIPELINE_STAFF)?;
        self.order(id).await
    }

    /// `Pending` orders can be approved or rejected exactly once.
    pub async fn decide(&self, actor: &User, id: Uuid, status: PurchaseOrderStatus) -> Result<PurchaseOrder> {
        actor.ensure_role(MANAGERS)?;
        if status == PurchaseOrderStatus::Pending {
            return Err(Error::BadRequest(
                "A decision must be 'Approved' or 'Rejected'".to_string(),
            ));
        }
        let mut order = self.order(id).await?;
        if order.status != PurchaseOrderStatus::Pending {
            return Err(Error::Conflict(format!(
                "Purchase order has already been {}",
                order.status.as_str().to_lowercase()
            )));
        }

        order.status = status;
        order.decided_by = Some(actor.id);
        order.updated_at = now();
        self.store.update_purchase_order(&order).await?;
        tracing::info!(
            purchase_order_id = %id,
            to = %status,
            actor = %actor.id,
            "purchase order decided"
        );

        self.inbox
            .notify(
                NewMessage::to_user(
                    order.requested_by,
                    format!("Purchase order {}", status.as_str().to_lowercase()),
                    format!(
                        "Your purchase order for {} ({} {}) was {} by {}.",
                        order.vendor,
                        order.amount,
                        order.currency,
                        status.as_str().to_lowercase(),
                        actor.display_name()
                    ),
                )
                .from_user(actor),
            )
            .await;
        Ok(order)
    }

    async fn order(&self, id: Uuid) -> Result<PurchaseOrder> {
        self.store
            .purchase_order_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Purchase order not found".to_string()))
    }
}
