//! Display helpers shared by the receivable and payable pages.

use chrono::NaiveDate;
use contracts::shared::finance::{AgingBucket, FinancialDocument, PaymentStatus};

/// Filter value selecting cancelled/void documents
pub const VOID_FILTER: &str = "void";

/// Label and badge variant; void documents are shown as such instead of a payment status.
pub fn document_status<D: FinancialDocument>(doc: &D, today: NaiveDate) -> (&'static str, &'static str) {
    if doc.is_void() {
        ("Void", "neutral")
    } else {
        let status = doc.payment_status(today);
        (status.label(), status.badge_variant())
    }
}

/// Empty filter accepts all; `VOID_FILTER` accepts only void documents; a payment
/// status code accepts live documents in that status.
pub fn matches_status_filter<D: FinancialDocument>(doc: &D, filter: &str, today: NaiveDate) -> bool {
    if filter.is_empty() {
        return true;
    }
    if filter == VOID_FILTER {
        return doc.is_void();
    }
    match PaymentStatus::from_code(filter) {
        Some(status) => !doc.is_void() && doc.payment_status(today) == status,
        None => true,
    }
}

pub fn aging_variant(bucket: AgingBucket) -> &'static str {
    match bucket {
        AgingBucket::Current => "neutral",
        AgingBucket::Days1To30 => "warning",
        AgingBucket::Days31To60 | AgingBucket::Days61To90 | AgingBucket::Over90 => "error",
    }
}

/// "12 d late", "due in 5 d", "due today" or "—" without a due date.
pub fn due_label(days_past_due: Option<i64>) -> String {
    match days_past_due {
        None => "—".to_string(),
        Some(0) => "due today".to_string(),
        Some(d) if d > 0 => format!("{} d late", d),
        Some(d) => format!("due in {} d", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a008_proforma_invoice::aggregate::ProformaInvoice;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    fn invoice(total: f64, paid: f64, due: &str, status: Option<&str>) -> ProformaInvoice {
        ProformaInvoice {
            id: "i".into(),
            invoice_number: "PI-1".into(),
            issue_date: "2024-01-01".into(),
            due_date: Some(due.into()),
            total_amount: total,
            paid_amount: paid,
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_document_status() {
        assert_eq!(document_status(&invoice(100.0, 0.0, "2024-03-01", None), today()), ("Overdue", "error"));
        assert_eq!(document_status(&invoice(100.0, 100.0, "2024-03-01", None), today()), ("Paid", "success"));
        assert_eq!(
            document_status(&invoice(100.0, 0.0, "2024-03-01", Some("cancelled")), today()),
            ("Void", "neutral")
        );
    }

    #[test]
    fn test_status_filter() {
        let overdue = invoice(100.0, 0.0, "2024-03-01", None);
        let void = invoice(100.0, 0.0, "2024-03-01", Some("void"));
        assert!(matches_status_filter(&overdue, "", today()));
        assert!(matches_status_filter(&overdue, "overdue", today()));
        assert!(!matches_status_filter(&overdue, "paid", today()));
        assert!(!matches_status_filter(&void, "overdue", today()));
        assert!(matches_status_filter(&void, VOID_FILTER, today()));
        assert!(!matches_status_filter(&overdue, VOID_FILTER, today()));
    }

    #[test]
    fn test_due_label() {
        assert_eq!(due_label(None), "—");
        assert_eq!(due_label(Some(0)), "due today");
        assert_eq!(due_label(Some(12)), "12 d late");
        assert_eq!(due_label(Some(-5)), "due in 5 d");
        assert_eq!(aging_variant(AgingBucket::Over90), "error");
    }
}
