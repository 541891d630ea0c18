use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::finance::FinancialDocument;
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Proforma invoice issued to a customer, i.e. an account receivable (a008)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProformaInvoice {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// Status as stored by the API; only "cancelled"/"void" are honoured, the
    /// payment status is always derived.
    #[serde(default)]
    pub status: Option<String>,
}

impl FinancialDocument for ProformaInvoice {
    fn document_no(&self) -> &str {
        &self.invoice_number
    }

    fn counterparty(&self) -> String {
        self.customer_name
            .clone()
            .or_else(|| self.customer_id.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    fn billed(&self) -> f64 {
        self.total_amount
    }

    fn paid(&self) -> f64 {
        self.paid_amount
    }

    fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    fn is_void(&self) -> bool {
        matches!(
            self.status.as_deref().map(str::to_lowercase).as_deref(),
            Some("cancelled") | Some("canceled") | Some("void")
        )
    }
}

impl Searchable for ProformaInvoice {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.invoice_number, filter)
            || self.customer_name.as_deref().is_some_and(|n| contains_ci(n, filter))
    }
}

impl Sortable for ProformaInvoice {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "invoice_number" => cmp_str_ci(&self.invoice_number, &other.invoice_number),
            "customer" => cmp_str_ci(&self.counterparty(), &other.counterparty()),
            "due_date" => self.due_date.cmp(&other.due_date),
            "total_amount" => cmp_f64(self.total_amount, other.total_amount),
            "paid_amount" => cmp_f64(self.paid_amount, other.paid_amount),
            "outstanding" => cmp_f64(
                FinancialDocument::outstanding(self),
                FinancialDocument::outstanding(other),
            ),
            _ => self.issue_date.cmp(&other.issue_date),
        }
    }
}

impl Resource for ProformaInvoice {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.invoice_number
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn collection_name() -> &'static str {
        "proforma_invoice"
    }

    fn endpoint() -> &'static str {
        "/proforma-invoices"
    }

    fn element_name() -> &'static str {
        "Proforma invoice"
    }

    fn list_name() -> &'static str {
        "Receivables"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::finance::{AgingBucket, AgingThresholds, PaymentStatus};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn test_derived_status_ignores_stored_status() {
        let inv: ProformaInvoice = serde_json::from_str(
            r#"{"id":"i1","invoice_number":"PI-1","issue_date":"2024-01-01",
                "due_date":"2024-01-31","total_amount":1000,"paid_amount":250,"status":"paid"}"#,
        )
        .unwrap();
        assert_eq!(inv.payment_status(today()), PaymentStatus::Overdue);
        assert_eq!(FinancialDocument::outstanding(&inv), 750.0);
        assert_eq!(
            inv.aging_bucket(today(), &AgingThresholds::default()),
            AgingBucket::Days31To60
        );
        assert!(!inv.is_void());
    }

    #[test]
    fn test_void_and_counterparty() {
        let inv = ProformaInvoice {
            customer_id: Some("c9".into()),
            status: Some("Void".into()),
            ..Default::default()
        };
        assert!(inv.is_void());
        assert_eq!(inv.counterparty(), "c9");
    }
}
