use crate::dashboards::ledger::LedgerSummary;
use crate::domain::a008_proforma_invoice::aggregate::ProformaInvoice;
use crate::shared::finance::{days_sales_outstanding, parse_date, AgingThresholds, FinancialDocument};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TOP_DEBTORS: usize = 5;
/// Look-back window for days sales outstanding
pub const DSO_PERIOD_DAYS: i64 = 90;

/// Accounts receivable overview built from proforma invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivablesSummary {
    pub ledger: LedgerSummary,
    pub dso: Option<f64>,
}

impl ReceivablesSummary {
    pub fn compute(
        invoices: &[ProformaInvoice],
        today: NaiveDate,
        thresholds: &AgingThresholds,
        due_soon_days: i64,
    ) -> Self {
        let ledger = LedgerSummary::compute(invoices, today, thresholds, due_soon_days, TOP_DEBTORS);

        let period_start = today - chrono::Duration::days(DSO_PERIOD_DAYS);
        let credit_sales: f64 = invoices
            .iter()
            .filter(|inv| !inv.is_void())
            .filter(|inv| {
                parse_date(&inv.issue_date).is_some_and(|d| d > period_start && d <= today)
            })
            .map(|inv| inv.billed())
            .sum();
        let dso = days_sales_outstanding(ledger.outstanding, credit_sales, DSO_PERIOD_DAYS);

        Self { ledger, dso }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::finance::{AgingBucket, PaymentStatus};

    fn invoice(no: &str, customer: &str, issue: &str, due: &str, total: f64, paid: f64) -> ProformaInvoice {
        ProformaInvoice {
            id: no.to_lowercase(),
            invoice_number: no.into(),
            customer_name: Some(customer.into()),
            issue_date: issue.into(),
            due_date: Some(due.into()),
            total_amount: total,
            paid_amount: paid,
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn invoices() -> Vec<ProformaInvoice> {
        vec![
            invoice("PI-1", "Atelier Nord", "2024-04-01", "2024-05-01", 1000.0, 0.0),
            invoice("PI-2", "Atelier Nord", "2024-06-01", "2024-07-05", 500.0, 100.0),
            invoice("PI-3", "Mode Sud", "2024-05-15", "2024-06-15", 300.0, 300.0),
            invoice("PI-4", "Mode Sud", "2024-06-10", "2024-08-10", 200.0, 0.0),
            ProformaInvoice {
                status: Some("cancelled".into()),
                ..invoice("PI-5", "Ghost", "2024-06-01", "2024-06-02", 9999.0, 0.0)
            },
        ]
    }

    #[test]
    fn test_totals_exclude_void() {
        let s = ReceivablesSummary::compute(&invoices(), today(), &AgingThresholds::default(), 7);
        let l = &s.ledger;
        assert_eq!(l.document_count, 4);
        assert_eq!(l.total_billed, 2000.0);
        assert_eq!(l.total_paid, 400.0);
        assert_eq!(l.outstanding, 1600.0);
        assert_eq!(l.overdue_amount, 1000.0);
        assert_eq!(l.overdue_count, 1);
        assert_eq!(l.due_soon_count, 1);
        assert_eq!(l.due_soon_amount, 400.0);
        assert_eq!(l.collection_rate, Some(20.0));
        assert_eq!(l.overdue_share(), Some(62.5));
    }

    #[test]
    fn test_status_and_aging() {
        let s = ReceivablesSummary::compute(&invoices(), today(), &AgingThresholds::default(), 7);
        let l = &s.ledger;
        assert_eq!(l.by_status.get(PaymentStatus::Overdue).count, 1);
        assert_eq!(l.by_status.get(PaymentStatus::Partial).amount, 400.0);
        assert_eq!(l.by_status.get(PaymentStatus::Paid).amount, 300.0);
        assert_eq!(l.by_status.get(PaymentStatus::Pending).count, 1);
        assert_eq!(l.aging.amount(AgingBucket::Days31To60), 1000.0);
        assert_eq!(l.aging.amount(AgingBucket::Current), 600.0);
        assert_eq!(l.aging.total, 1600.0);
    }

    #[test]
    fn test_top_debtors_and_dso() {
        let s = ReceivablesSummary::compute(&invoices(), today(), &AgingThresholds::default(), 7);
        let top = &s.ledger.top_counterparties;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Atelier Nord");
        assert_eq!(top[0].outstanding, 1400.0);
        assert_eq!(top[0].overdue, 1000.0);
        assert_eq!(top[1].documents, 1);

        // 1600 open against 1000 billed in the last 90 days
        assert_eq!(s.dso, Some(144.0));
    }

    #[test]
    fn test_empty_input() {
        let s = ReceivablesSummary::compute(&[], today(), &AgingThresholds::default(), 7);
        assert_eq!(s.ledger.document_count, 0);
        assert_eq!(s.ledger.collection_rate, None);
        assert_eq!(s.ledger.aging.lines.len(), 5);
        assert_eq!(s.dso, None);
    }
}
