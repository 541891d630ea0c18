use crate::shared::api::{fetch_listing, Listing};
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::common::Resource;

pub async fn load_purchase_orders(take: usize) -> Listing<PurchaseOrder> {
    fetch_listing(PurchaseOrder::endpoint(), take).await
}
