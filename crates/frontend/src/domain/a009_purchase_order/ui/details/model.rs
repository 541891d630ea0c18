use crate::shared::api::{self, ApiError};
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::a009_purchase_order::aggregate::{PaymentUpdate, PurchaseOrder, PurchaseOrderDto};
use contracts::domain::common::Resource;

pub async fn fetch_by_id(id: &str) -> Result<PurchaseOrder, ApiError> {
    api::fetch_one(PurchaseOrder::endpoint(), id).await
}

pub async fn fetch_suppliers(take: usize) -> Vec<Supplier> {
    api::fetch_list_or_empty(Supplier::endpoint(), take).await
}

pub async fn fetch_collections(take: usize) -> Vec<Collection> {
    api::fetch_list_or_empty(Collection::endpoint(), take).await
}

pub async fn save_form(dto: &PurchaseOrderDto) -> Result<PurchaseOrder, ApiError> {
    match dto.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => api::patch_json(PurchaseOrder::endpoint(), id, dto).await,
        None => api::post_json(PurchaseOrder::endpoint(), dto).await,
    }
}

/// PATCH with the new cumulative paid amount.
pub async fn record_payment(id: &str, paid_amount: f64) -> Result<PurchaseOrder, ApiError> {
    api::patch_json(PurchaseOrder::endpoint(), id, &PaymentUpdate { paid_amount }).await
}

pub async fn delete_by_id(id: &str) -> Result<(), ApiError> {
    api::delete(PurchaseOrder::endpoint(), id).await
}
