use crate::domain::a006_collection::aggregate::Collection;
use crate::domain::a009_purchase_order::aggregate::PurchaseOrder;
use crate::shared::finance::{budget_utilization, FinancialDocument};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionBudget {
    pub collection_id: String,
    pub name: String,
    pub season: String,
    pub budget: f64,
    /// Purchase orders placed for the collection, cancelled excluded
    pub committed: f64,
    pub purchase_orders: usize,
    /// Budget minus committed; negative when over budget
    pub remaining: f64,
    pub utilization: Option<f64>,
    pub open_to_buy: f64,
}

impl CollectionBudget {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Buying budget against commitments, per collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenToBuyReport {
    pub rows: Vec<CollectionBudget>,
    pub total_budget: f64,
    pub total_committed: f64,
    pub total_remaining: f64,
    pub total_open_to_buy: f64,
    /// Committed spend on orders without a known collection
    pub unallocated: f64,
}

impl OpenToBuyReport {
    pub fn compute(collections: &[Collection], purchase_orders: &[PurchaseOrder]) -> Self {
        let live: Vec<&PurchaseOrder> = purchase_orders.iter().filter(|po| !po.is_void()).collect();

        let rows: Vec<CollectionBudget> = collections
            .iter()
            .map(|c| {
                let linked: Vec<&&PurchaseOrder> = live
                    .iter()
                    .filter(|po| po.collection_id.as_deref() == Some(c.id.as_str()))
                    .collect();
                let committed: f64 = linked.iter().map(|po| po.billed()).sum();
                CollectionBudget {
                    collection_id: c.id.clone(),
                    name: c.name.clone(),
                    season: c.season_label(),
                    budget: c.budget,
                    committed,
                    purchase_orders: linked.len(),
                    remaining: c.budget - committed,
                    utilization: budget_utilization(committed, c.budget),
                    open_to_buy: c.otb_plan(committed).open_to_buy(),
                }
            })
            .collect();

        let unallocated: f64 = live
            .iter()
            .filter(|po| {
                po.collection_id
                    .as_deref()
                    .map_or(true, |id| !collections.iter().any(|c| c.id == id))
            })
            .map(|po| po.billed())
            .sum();

        Self {
            total_budget: rows.iter().map(|r| r.budget).sum(),
            total_committed: rows.iter().map(|r| r.committed).sum(),
            total_remaining: rows.iter().map(|r| r.remaining).sum(),
            total_open_to_buy: rows.iter().map(|r| r.open_to_buy).sum(),
            unallocated,
            rows,
        }
    }

    pub fn total_utilization(&self) -> Option<f64> {
        budget_utilization(self.total_committed, self.total_budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: &str, budget: f64) -> Collection {
        Collection {
            id: id.into(),
            name: id.to_uppercase(),
            budget,
            planned_sales: 10000.0,
            planned_end_inventory: 2000.0,
            beginning_inventory: 3000.0,
            ..Default::default()
        }
    }

    fn po(collection: Option<&str>, total: f64, status: &str) -> PurchaseOrder {
        PurchaseOrder {
            collection_id: collection.map(str::to_string),
            total_amount: total,
            status: Some(status.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_to_buy_report() {
        let collections = vec![collection("ss25", 8000.0), collection("aw25", 0.0)];
        let orders = vec![
            po(Some("ss25"), 5000.0, "confirmed"),
            po(Some("ss25"), 1000.0, "received"),
            po(Some("ss25"), 4000.0, "cancelled"),
            po(Some("aw25"), 500.0, "sent"),
            po(None, 300.0, "sent"),
            po(Some("old"), 200.0, "sent"),
        ];
        let r = OpenToBuyReport::compute(&collections, &orders);

        let ss = &r.rows[0];
        assert_eq!(ss.committed, 6000.0);
        assert_eq!(ss.purchase_orders, 2);
        assert_eq!(ss.remaining, 2000.0);
        assert_eq!(ss.utilization, Some(75.0));
        assert_eq!(ss.open_to_buy, 3000.0);
        assert!(!ss.is_over_budget());

        let aw = &r.rows[1];
        assert_eq!(aw.utilization, None);
        assert!(aw.is_over_budget());

        assert_eq!(r.total_budget, 8000.0);
        assert_eq!(r.total_committed, 6500.0);
        assert_eq!(r.unallocated, 500.0);
        assert_eq!(r.total_utilization(), Some(81.25));
    }

    #[test]
    fn test_over_budget_collection() {
        let collections = vec![collection("resort", 1000.0)];
        let orders = vec![
            po(Some("resort"), 900.0, "confirmed"),
            po(Some("resort"), 600.0, "sent"),
        ];
        let r = OpenToBuyReport::compute(&collections, &orders);

        let row = &r.rows[0];
        assert!(row.is_over_budget());
        assert_eq!(row.remaining, -500.0);
        assert_eq!(row.utilization, Some(150.0));
        assert_eq!(row.open_to_buy, 7500.0);
        assert_eq!(r.total_remaining, -500.0);
        assert_eq!(r.total_utilization(), Some(150.0));
    }

    #[test]
    fn test_unmatched_orders_are_unallocated() {
        let orders = vec![
            po(Some("fw19"), 400.0, "sent"),
            po(None, 250.0, "confirmed"),
            po(Some("fw19"), 1000.0, "cancelled"),
        ];
        let r = OpenToBuyReport::compute(&[collection("ss25", 5000.0)], &orders);
        assert_eq!(r.rows[0].committed, 0.0);
        assert_eq!(r.rows[0].purchase_orders, 0);
        assert_eq!(r.unallocated, 650.0);

        let no_collections = OpenToBuyReport::compute(&[], &orders);
        assert!(no_collections.rows.is_empty());
        assert_eq!(no_collections.unallocated, 650.0);
        assert_eq!(no_collections.total_utilization(), None);
    }

    #[test]
    fn test_empty_lists_give_empty_report() {
        let r = OpenToBuyReport::compute(&[], &[]);
        assert!(r.rows.is_empty());
        assert_eq!(r.total_budget, 0.0);
        assert_eq!(r.total_open_to_buy, 0.0);
        assert_eq!(r.unallocated, 0.0);
        assert_eq!(r.total_utilization(), None);
    }
}
