use crate::shared::api::{fetch_listing, Listing};
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::common::Resource;

pub async fn load_budgets(take: usize) -> (Listing<Collection>, Listing<PurchaseOrder>) {
    let collections = fetch_listing(Collection::endpoint(), take).await;
    let purchase_orders = fetch_listing(PurchaseOrder::endpoint(), take).await;
    (collections, purchase_orders)
}
