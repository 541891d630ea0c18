use crate::dashboards::ledger::LedgerSummary;
use crate::domain::a009_purchase_order::aggregate::PurchaseOrder;
use crate::shared::finance::{AgingThresholds, FinancialDocument};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TOP_CREDITORS: usize = 5;

/// Accounts payable overview built from purchase orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayablesSummary {
    pub ledger: LedgerSummary,
    /// Value of orders placed but not yet received
    pub committed_spend: f64,
    pub open_orders: usize,
    pub late_deliveries: usize,
}

impl PayablesSummary {
    pub fn compute(
        purchase_orders: &[PurchaseOrder],
        today: NaiveDate,
        thresholds: &AgingThresholds,
        due_soon_days: i64,
    ) -> Self {
        let ledger =
            LedgerSummary::compute(purchase_orders, today, thresholds, due_soon_days, TOP_CREDITORS);

        let open: Vec<&PurchaseOrder> = purchase_orders
            .iter()
            .filter(|po| !po.is_void() && !po.is_received())
            .collect();

        Self {
            ledger,
            committed_spend: open.iter().map(|po| po.billed()).sum(),
            open_orders: open.len(),
            late_deliveries: open.iter().filter(|po| po.is_delivery_late(today)).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::finance::PaymentStatus;

    fn po(no: &str, supplier: &str, status: &str, due: &str, total: f64, paid: f64) -> PurchaseOrder {
        PurchaseOrder {
            id: no.to_lowercase(),
            po_number: no.into(),
            supplier_name: Some(supplier.into()),
            order_date: "2024-05-01".into(),
            due_date: Some(due.into()),
            expected_delivery: Some("2024-06-20".into()),
            total_amount: total,
            paid_amount: paid,
            status: Some(status.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_payables_summary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let orders = vec![
            po("PO-1", "Textil SA", "received", "2024-06-01", 4000.0, 1000.0),
            po("PO-2", "Textil SA", "confirmed", "2024-07-15", 2500.0, 0.0),
            po("PO-3", "Buttons Ltd", "sent", "2024-07-03", 600.0, 0.0),
            po("PO-4", "Buttons Ltd", "cancelled", "2024-06-01", 900.0, 0.0),
        ];
        let s = PayablesSummary::compute(&orders, today, &AgingThresholds::default(), 7);

        assert_eq!(s.ledger.document_count, 3);
        assert_eq!(s.ledger.outstanding, 6100.0);
        assert_eq!(s.ledger.overdue_amount, 3000.0);
        assert_eq!(s.ledger.due_soon_count, 1);
        assert_eq!(s.ledger.by_status.get(PaymentStatus::Pending).amount, 3100.0);
        assert_eq!(s.ledger.top_counterparties[0].name, "Textil SA");
        assert_eq!(s.ledger.top_counterparties[0].outstanding, 5500.0);

        assert_eq!(s.committed_spend, 3100.0);
        assert_eq!(s.open_orders, 2);
        assert_eq!(s.late_deliveries, 2);
    }

    #[test]
    fn test_top_creditors_by_open_balance() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let orders = vec![
            po("PO-1", "Knit Co", "confirmed", "2024-08-01", 500.0, 0.0),
            po("PO-2", "Denim Mill", "confirmed", "2024-08-01", 700.0, 0.0),
            po("PO-3", "Beta Trims", "confirmed", "2024-08-01", 100.0, 0.0),
            po("PO-4", "Alpha Labels", "confirmed", "2024-08-01", 100.0, 0.0),
            po("PO-5", "Zip World", "confirmed", "2024-08-01", 50.0, 0.0),
            po("PO-6", "Knit Co", "confirmed", "2024-08-01", 200.0, 100.0),
            po("PO-7", "Settled Ltd", "received", "2024-06-01", 5000.0, 5000.0),
        ];
        let s = PayablesSummary::compute(&orders, today, &AgingThresholds::default(), 7);

        let names: Vec<&str> = s
            .ledger
            .top_counterparties
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Denim Mill", "Knit Co", "Alpha Labels", "Beta Trims", "Zip World"]);
        assert_eq!(s.ledger.top_counterparties.len(), TOP_CREDITORS);
        assert_eq!(s.ledger.top_counterparties[1].outstanding, 600.0);
        assert_eq!(s.ledger.top_counterparties[1].documents, 2);
    }

    #[test]
    fn test_no_purchase_orders() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let s = PayablesSummary::compute(&[], today, &AgingThresholds::default(), 7);
        assert_eq!(s.ledger.document_count, 0);
        assert_eq!(s.ledger.outstanding, 0.0);
        assert_eq!(s.ledger.collection_rate, None);
        assert!(s.ledger.top_counterparties.is_empty());
        assert_eq!(s.committed_spend, 0.0);
        assert_eq!(s.open_orders, 0);
    }
}
