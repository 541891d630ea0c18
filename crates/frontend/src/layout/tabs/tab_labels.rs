//! Tab titles.
//!
//! Resource lists take `list_name` from contracts; dashboards are named here.

use contracts::domain::a001_customer::aggregate::Customer;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a003_product::aggregate::Product;
use contracts::domain::a005_inventory::aggregate::InventoryItem;
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::a007_order::aggregate::SalesOrder;
use contracts::domain::a008_proforma_invoice::aggregate::ProformaInvoice;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::a010_size_chart::aggregate::SizeChart;
use contracts::domain::a011_bom::aggregate::Bom;
use contracts::domain::a012_production::aggregate::ProductionOrder;
use contracts::domain::common::Resource;

/// Readable title of a list or dashboard tab. Unknown keys give "".
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_customer" => Customer::list_name(),
        "a002_supplier" => Supplier::list_name(),
        "a003_product" => Product::list_name(),
        "a005_inventory" => InventoryItem::list_name(),
        "a006_collection" => Collection::list_name(),
        "a007_order" => SalesOrder::list_name(),
        "a008_proforma_invoice" => ProformaInvoice::list_name(),
        "a009_purchase_order" => PurchaseOrder::list_name(),
        "a010_size_chart" => SizeChart::list_name(),
        "a011_bom" => Bom::list_name(),
        "a012_production_order" => ProductionOrder::list_name(),

        "d400_receivables" => "Receivables",
        "d401_payables" => "Payables",
        "d402_inventory" => "Inventory overview",
        "d403_sales" => "Sales analytics",
        "d404_fulfillment" => "Fulfillment",
        "d405_open_to_buy" => "Open to buy",

        _ => "",
    }
}

/// Title of a detail tab: «<entity> · <identifier>».
pub fn detail_tab_label(entity_label: &'static str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("d405_open_to_buy"), "Open to buy");
        assert_eq!(tab_label_for_key("a012_production_order"), ProductionOrder::list_name());
        assert_eq!(tab_label_for_key("nope"), "");
    }

    #[test]
    fn test_detail_tab_label() {
        assert_eq!(detail_tab_label("BOM", "BOM-7"), "BOM · BOM-7");
    }
}
