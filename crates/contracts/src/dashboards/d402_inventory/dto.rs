use crate::domain::a004_warehouse::aggregate::Warehouse;
use crate::domain::a005_inventory::aggregate::{InventoryItem, StockStatus};
use serde::{Deserialize, Serialize};

pub const UNASSIGNED_WAREHOUSE: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub warehouse_id: Option<String>,
    pub name: String,
    pub units: i64,
    pub available: i64,
    pub value: f64,
    pub sku_count: usize,
    /// Units against capacity, percent
    pub utilization: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderLine {
    pub item_id: String,
    pub sku: String,
    pub name: String,
    pub warehouse: String,
    pub available: i64,
    pub reorder_point: i64,
    pub shortfall: i64,
    pub status: StockStatus,
}

/// Stock position across warehouses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryOverview {
    pub total_units: i64,
    pub available_units: i64,
    pub reserved_units: i64,
    pub stock_value: f64,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub by_warehouse: Vec<WarehouseStock>,
    /// Largest shortfall first
    pub reorder: Vec<ReorderLine>,
}

impl InventoryOverview {
    pub fn compute(items: &[InventoryItem], warehouses: &[Warehouse], default_reorder_point: i64) -> Self {
        let mut overview = InventoryOverview::default();

        for item in items {
            let status = item.stock_status(default_reorder_point);
            overview.total_units += item.quantity.max(0);
            overview.available_units += item.available();
            overview.reserved_units += item.reserved.max(0);
            overview.stock_value += item.stock_value();
            match status {
                StockStatus::InStock => overview.in_stock += 1,
                StockStatus::LowStock => overview.low_stock += 1,
                StockStatus::OutOfStock => overview.out_of_stock += 1,
            }

            let warehouse = item
                .warehouse_id
                .as_deref()
                .and_then(|id| warehouses.iter().find(|w| w.id == id));
            let warehouse_id = warehouse.map(|w| w.id.clone());
            let warehouse_name = warehouse
                .map(Warehouse::display_name)
                .unwrap_or_else(|| UNASSIGNED_WAREHOUSE.to_string());

            match overview
                .by_warehouse
                .iter_mut()
                .find(|w| w.warehouse_id == warehouse_id)
            {
                Some(row) => {
                    row.units += item.quantity.max(0);
                    row.available += item.available();
                    row.value += item.stock_value();
                    row.sku_count += 1;
                }
                None => overview.by_warehouse.push(WarehouseStock {
                    warehouse_id,
                    name: warehouse_name.clone(),
                    units: item.quantity.max(0),
                    available: item.available(),
                    value: item.stock_value(),
                    sku_count: 1,
                    utilization: None,
                }),
            }

            if status != StockStatus::InStock {
                overview.reorder.push(ReorderLine {
                    item_id: item.id.clone(),
                    sku: item.sku.clone(),
                    name: item.display_name(),
                    warehouse: warehouse_name,
                    available: item.available(),
                    reorder_point: item.effective_reorder_point(default_reorder_point),
                    shortfall: item.shortfall(default_reorder_point),
                    status,
                });
            }
        }

        for row in &mut overview.by_warehouse {
            row.utilization = row
                .warehouse_id
                .as_deref()
                .and_then(|id| warehouses.iter().find(|w| w.id == id))
                .and_then(|w| w.utilization(row.units));
        }
        // Named warehouses alphabetically, unassigned stock last
        overview.by_warehouse.sort_by(|a, b| {
            a.warehouse_id
                .is_none()
                .cmp(&b.warehouse_id.is_none())
                .then_with(|| a.name.cmp(&b.name))
        });
        overview
            .reorder
            .sort_by(|a, b| b.shortfall.cmp(&a.shortfall).then_with(|| a.sku.cmp(&b.sku)));
        overview
    }

    pub fn sku_count(&self) -> usize {
        self.in_stock + self.low_stock + self.out_of_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, wh: Option<&str>, qty: i64, reserved: i64, rp: Option<i64>, cost: f64) -> InventoryItem {
        InventoryItem {
            id: sku.to_lowercase(),
            sku: sku.into(),
            warehouse_id: wh.map(str::to_string),
            quantity: qty,
            reserved,
            reorder_point: rp,
            unit_cost: cost,
            ..Default::default()
        }
    }

    fn warehouses() -> Vec<Warehouse> {
        vec![
            Warehouse {
                id: "w1".into(),
                code: "MAIN".into(),
                name: "Main".into(),
                capacity: Some(448),
                ..Default::default()
            },
            Warehouse {
                id: "w2".into(),
                name: "Annex".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_overview_totals() {
        let items = vec![
            item("TEE-S", Some("w1"), 100, 20, None, 5.0),
            item("TEE-M", Some("w1"), 12, 4, None, 5.0),
            item("JEAN-30", Some("w2"), 3, 3, Some(5), 20.0),
            item("CAP", Some("w9"), 40, 0, Some(50), 2.0),
        ];
        let o = InventoryOverview::compute(&items, &warehouses(), 10);

        assert_eq!(o.total_units, 155);
        assert_eq!(o.reserved_units, 27);
        assert_eq!(o.available_units, 128);
        assert_eq!(o.stock_value, 700.0);
        assert_eq!((o.in_stock, o.low_stock, o.out_of_stock), (1, 2, 1));
        assert_eq!(o.sku_count(), 4);

        let names: Vec<&str> = o.by_warehouse.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Annex", "Main (MAIN)", UNASSIGNED_WAREHOUSE]);
        let main = &o.by_warehouse[1];
        assert_eq!(main.units, 112);
        assert_eq!(main.sku_count, 2);
        assert_eq!(main.utilization, Some(25.0));
        assert_eq!(o.by_warehouse[0].utilization, None);
    }

    #[test]
    fn test_reorder_sorted_by_shortfall() {
        let items = vec![
            item("TEE-M", Some("w1"), 12, 4, None, 5.0),
            item("JEAN-30", Some("w2"), 3, 3, Some(5), 20.0),
            item("CAP", None, 40, 0, Some(50), 2.0),
        ];
        let o = InventoryOverview::compute(&items, &warehouses(), 10);
        let skus: Vec<(&str, i64)> = o.reorder.iter().map(|r| (r.sku.as_str(), r.shortfall)).collect();
        assert_eq!(skus, vec![("CAP", 11), ("JEAN-30", 6), ("TEE-M", 3)]);
        assert_eq!(o.reorder[0].warehouse, UNASSIGNED_WAREHOUSE);
        assert_eq!(o.reorder[1].status, StockStatus::OutOfStock);
    }
}
