use crate::shared::finance::{
    aging_summary, collection_rate, is_due_soon, AgingSummary, AgingThresholds, FinancialDocument,
    PaymentStatus, StatusBreakdown,
};
use crate::shared::list::cmp_f64;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Open balance of one customer or supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartyBalance {
    pub name: String,
    pub outstanding: f64,
    pub overdue: f64,
    pub documents: usize,
}

/// Totals shared by the receivables and payables dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub document_count: usize,
    pub total_billed: f64,
    pub total_paid: f64,
    pub outstanding: f64,
    pub overdue_amount: f64,
    pub overdue_count: usize,
    pub due_soon_amount: f64,
    pub due_soon_count: usize,
    pub by_status: StatusBreakdown,
    pub aging: AgingSummary,
    /// Paid share of billed, percent
    pub collection_rate: Option<f64>,
    /// Largest open balances first
    pub top_counterparties: Vec<CounterpartyBalance>,
}

impl LedgerSummary {
    /// Void documents are left out of every figure.
    pub fn compute<D: FinancialDocument>(
        documents: &[D],
        today: NaiveDate,
        thresholds: &AgingThresholds,
        due_soon_days: i64,
        top_n: usize,
    ) -> Self {
        let live: Vec<&D> = documents.iter().filter(|d| !d.is_void()).collect();

        let mut summary = LedgerSummary {
            document_count: live.len(),
            total_billed: 0.0,
            total_paid: 0.0,
            outstanding: 0.0,
            overdue_amount: 0.0,
            overdue_count: 0,
            due_soon_amount: 0.0,
            due_soon_count: 0,
            by_status: StatusBreakdown::default(),
            aging: aging_summary(
                live.iter().map(|d| (d.outstanding(), d.due_date())),
                today,
                thresholds,
            ),
            collection_rate: None,
            top_counterparties: Vec::new(),
        };
        let mut balances: Vec<CounterpartyBalance> = Vec::new();

        for doc in &live {
            let open = doc.outstanding();
            let status = doc.payment_status(today);
            summary.total_billed += doc.billed();
            summary.total_paid += doc.paid();
            summary.outstanding += open;
            summary.by_status.add(
                status,
                if status == PaymentStatus::Paid {
                    doc.billed()
                } else {
                    open
                },
            );
            if status == PaymentStatus::Overdue {
                summary.overdue_amount += open;
                summary.overdue_count += 1;
            } else if status != PaymentStatus::Paid
                && is_due_soon(doc.due_date(), today, due_soon_days)
            {
                summary.due_soon_amount += open;
                summary.due_soon_count += 1;
            }

            if status == PaymentStatus::Paid {
                continue;
            }
            let name = doc.counterparty();
            let overdue = if status == PaymentStatus::Overdue { open } else { 0.0 };
            match balances.iter_mut().find(|b| b.name == name) {
                Some(balance) => {
                    balance.outstanding += open;
                    balance.overdue += overdue;
                    balance.documents += 1;
                }
                None => balances.push(CounterpartyBalance {
                    name,
                    outstanding: open,
                    overdue,
                    documents: 1,
                }),
            }
        }

        balances.sort_by(|a, b| cmp_f64(b.outstanding, a.outstanding).then_with(|| a.name.cmp(&b.name)));
        balances.truncate(top_n);
        summary.top_counterparties = balances;
        summary.collection_rate = collection_rate(summary.total_paid, summary.total_billed);
        summary
    }

    /// Overdue share of the open balance, percent.
    pub fn overdue_share(&self) -> Option<f64> {
        if self.outstanding <= 0.0 {
            None
        } else {
            Some(self.overdue_amount / self.outstanding * 100.0)
        }
    }
}
