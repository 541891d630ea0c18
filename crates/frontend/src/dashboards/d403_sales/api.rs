use crate::shared::api::{fetch_listing, Listing};
use contracts::domain::a007_order::aggregate::SalesOrder;
use contracts::domain::common::Resource;

/// All orders; the date range is applied client-side.
pub async fn load_orders(take: usize) -> Listing<SalesOrder> {
    fetch_listing(SalesOrder::endpoint(), take).await
}
