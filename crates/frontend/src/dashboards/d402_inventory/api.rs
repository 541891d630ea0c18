use crate::shared::api::{fetch_list_or_empty, fetch_listing, Listing};
use contracts::domain::a004_warehouse::aggregate::Warehouse;
use contracts::domain::a005_inventory::aggregate::InventoryItem;
use contracts::domain::common::Resource;

/// Stock records plus the warehouse directory. A missing directory only
/// costs names and capacity, so it is not reported.
pub async fn load_stock(take: usize) -> (Listing<InventoryItem>, Vec<Warehouse>) {
    let items = fetch_listing(InventoryItem::endpoint(), take).await;
    let warehouses = fetch_list_or_empty(Warehouse::endpoint(), take).await;
    (items, warehouses)
}
