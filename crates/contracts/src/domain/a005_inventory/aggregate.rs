use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Stock position of one SKU/size in one warehouse (a005)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// On hand
    #[serde(default)]
    pub quantity: i64,
    /// Allocated to open orders
    #[serde(default)]
    pub reserved: i64,
    #[serde(default)]
    pub reorder_point: Option<i64>,
    #[serde(default)]
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            StockStatus::InStock => "success",
            StockStatus::LowStock => "warning",
            StockStatus::OutOfStock => "error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "in_stock" => Some(StockStatus::InStock),
            "low_stock" => Some(StockStatus::LowStock),
            "out_of_stock" => Some(StockStatus::OutOfStock),
            _ => None,
        }
    }
}

impl InventoryItem {
    /// Free to sell: on hand minus reserved, never negative.
    pub fn available(&self) -> i64 {
        (self.quantity - self.reserved).max(0)
    }

    pub fn effective_reorder_point(&self, default_reorder_point: i64) -> i64 {
        self.reorder_point.unwrap_or(default_reorder_point)
    }

    pub fn stock_status(&self, default_reorder_point: i64) -> StockStatus {
        let available = self.available();
        if available == 0 {
            StockStatus::OutOfStock
        } else if available <= self.effective_reorder_point(default_reorder_point) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Units needed to get back above the reorder point.
    pub fn shortfall(&self, default_reorder_point: i64) -> i64 {
        (self.effective_reorder_point(default_reorder_point) - self.available() + 1).max(0)
    }

    pub fn stock_value(&self) -> f64 {
        self.quantity.max(0) as f64 * self.unit_cost
    }

    pub fn display_name(&self) -> String {
        let name = self.product_name.as_deref().unwrap_or(&self.sku);
        match (self.size.as_deref(), self.color.as_deref()) {
            (Some(size), Some(color)) => format!("{} / {} / {}", name, color, size),
            (Some(size), None) => format!("{} / {}", name, size),
            (None, Some(color)) => format!("{} / {}", name, color),
            (None, None) => name.to_string(),
        }
    }
}

impl Searchable for InventoryItem {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.sku, filter)
            || self.product_name.as_deref().is_some_and(|n| contains_ci(n, filter))
            || self.color.as_deref().is_some_and(|c| contains_ci(c, filter))
    }
}

impl Sortable for InventoryItem {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "product" => cmp_str_ci(&self.display_name(), &other.display_name()),
            "size" => cmp_str_ci(
                self.size.as_deref().unwrap_or(""),
                other.size.as_deref().unwrap_or(""),
            ),
            "quantity" => self.quantity.cmp(&other.quantity),
            "reserved" => self.reserved.cmp(&other.reserved),
            "available" => self.available().cmp(&other.available()),
            "stock_value" => cmp_f64(self.stock_value(), other.stock_value()),
            _ => cmp_str_ci(&self.sku, &other.sku),
        }
    }
}

impl Resource for InventoryItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.sku
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "inventory"
    }

    fn endpoint() -> &'static str {
        "/inventory"
    }

    fn element_name() -> &'static str {
        "Stock position"
    }

    fn list_name() -> &'static str {
        "Inventory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, reserved: i64, reorder_point: Option<i64>) -> InventoryItem {
        InventoryItem {
            sku: "DR-01".into(),
            quantity,
            reserved,
            reorder_point,
            unit_cost: 12.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_available_never_negative() {
        assert_eq!(item(5, 8, None).available(), 0);
        assert_eq!(item(10, 3, None).available(), 7);
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(item(5, 5, Some(3)).stock_status(10), StockStatus::OutOfStock);
        assert_eq!(item(13, 10, Some(3)).stock_status(10), StockStatus::LowStock);
        assert_eq!(item(14, 10, Some(3)).stock_status(10), StockStatus::InStock);
        assert_eq!(item(20, 0, None).stock_status(10), StockStatus::InStock);
        assert_eq!(item(10, 0, None).stock_status(10), StockStatus::LowStock);
    }

    #[test]
    fn test_shortfall_and_value() {
        assert_eq!(item(4, 0, Some(10)).shortfall(0), 7);
        assert_eq!(item(40, 0, Some(10)).shortfall(0), 0);
        assert_eq!(item(4, 0, None).stock_value(), 50.0);
    }
}
