//! Tab key → view. Every tab key the app opens is matched here.

use crate::dashboards::{
    FulfillmentDashboard, InventoryDashboard, OpenToBuyDashboard, PayablesDashboard,
    ReceivablesDashboard, SalesDashboard,
};
use crate::domain::a001_customer::ui::CustomerList;
use crate::domain::a002_supplier::ui::SupplierList;
use crate::domain::a003_product::ui::ProductList;
use crate::domain::a005_inventory::ui::InventoryList;
use crate::domain::a006_collection::ui::CollectionList;
use crate::domain::a007_order::ui::OrderList;
use crate::domain::a008_proforma_invoice::ui::InvoiceList;
use crate::domain::a009_purchase_order::ui::PurchaseOrderList;
use crate::domain::a010_size_chart::ui::{SizeChartDetail, SizeChartList};
use crate::domain::a011_bom::ui::{BomDetail, BomList};
use crate::domain::a012_production::ui::{ProductionOrderDetail, ProductionOrderList};
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

const SIZE_CHART_DETAIL: &str = "a010_size_chart_detail_";
const BOM_DETAIL: &str = "a011_bom_detail_";
const PRODUCTION_ORDER_DETAIL: &str = "a012_production_order_detail_";

/// Renders the content of a tab by its key.
///
/// `tabs_store` closes detail tabs through their `on_close`.
/// Unknown keys get a placeholder.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));

    match key {
        // Dashboards
        "d400_receivables" => view! { <ReceivablesDashboard /> }.into_any(),
        "d401_payables" => view! { <PayablesDashboard /> }.into_any(),
        "d402_inventory" => view! { <InventoryDashboard /> }.into_any(),
        "d403_sales" => view! { <SalesDashboard /> }.into_any(),
        "d404_fulfillment" => view! { <FulfillmentDashboard /> }.into_any(),
        "d405_open_to_buy" => view! { <OpenToBuyDashboard /> }.into_any(),

        // Sales
        "a001_customer" => view! { <CustomerList /> }.into_any(),
        "a007_order" => view! { <OrderList /> }.into_any(),
        "a008_proforma_invoice" => view! { <InvoiceList /> }.into_any(),

        // Purchasing
        "a002_supplier" => view! { <SupplierList /> }.into_any(),
        "a009_purchase_order" => view! { <PurchaseOrderList /> }.into_any(),
        "a006_collection" => view! { <CollectionList /> }.into_any(),

        // Catalog
        "a003_product" => view! { <ProductList /> }.into_any(),
        "a005_inventory" => view! { <InventoryList /> }.into_any(),
        "a010_size_chart" => view! { <SizeChartList /> }.into_any(),
        k if k.starts_with(SIZE_CHART_DETAIL) => {
            let id = k.trim_start_matches(SIZE_CHART_DETAIL).to_string();
            view! { <SizeChartDetail id=id on_close=on_close /> }.into_any()
        }

        // Production
        "a011_bom" => view! { <BomList /> }.into_any(),
        k if k.starts_with(BOM_DETAIL) => {
            let id = k.trim_start_matches(BOM_DETAIL).to_string();
            view! { <BomDetail id=id on_close=on_close /> }.into_any()
        }
        "a012_production_order" => view! { <ProductionOrderList /> }.into_any(),
        k if k.starts_with(PRODUCTION_ORDER_DETAIL) => {
            let id = k.trim_start_matches(PRODUCTION_ORDER_DETAIL).to_string();
            view! { <ProductionOrderDetail id=id on_close=on_close /> }.into_any()
        }

        _ => {
            log!("Unknown tab type: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}
