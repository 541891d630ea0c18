use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::finance::{parse_date, FinancialDocument, SETTLED_EPSILON};
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_cost: f64,
}

impl PurchaseOrderLine {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// Purchase order placed with a supplier, i.e. an account payable (a009)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub po_number: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    /// Collection the goods are bought for (open-to-buy)
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub order_date: String,
    /// Payment due date
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub expected_delivery: Option<String>,
    /// Billed total; computed from lines when zero and lines are present
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    /// "draft", "sent", "confirmed", "received", "cancelled"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lines: Vec<PurchaseOrderLine>,
}

impl PurchaseOrder {
    pub fn lines_total(&self) -> f64 {
        self.lines.iter().map(PurchaseOrderLine::line_total).sum()
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("draft")
    }

    pub fn is_received(&self) -> bool {
        self.status_label().eq_ignore_ascii_case("received")
    }

    /// Delivery is late when goods are not received and the expected date has passed.
    pub fn is_delivery_late(&self, today: chrono::NaiveDate) -> bool {
        if self.is_received() || self.is_void() {
            return false;
        }
        self.expected_delivery
            .as_deref()
            .and_then(parse_date)
            .is_some_and(|d| d < today)
    }

    /// Validates a payment against the open balance.
    pub fn validate_payment(&self, amount: f64) -> Result<f64, String> {
        if self.is_void() {
            return Err("Cannot record a payment on a cancelled purchase order".into());
        }
        if !(amount > 0.0) {
            return Err("Payment amount must be positive".into());
        }
        let open = FinancialDocument::outstanding(self);
        if amount > open + SETTLED_EPSILON {
            return Err(format!(
                "Payment {:.2} exceeds outstanding balance {:.2}",
                amount, open
            ));
        }
        Ok(self.paid_amount + amount)
    }
}

impl FinancialDocument for PurchaseOrder {
    fn document_no(&self) -> &str {
        &self.po_number
    }

    fn counterparty(&self) -> String {
        self.supplier_name
            .clone()
            .or_else(|| self.supplier_id.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    fn billed(&self) -> f64 {
        if self.total_amount == 0.0 && !self.lines.is_empty() {
            self.lines_total()
        } else {
            self.total_amount
        }
    }

    fn paid(&self) -> f64 {
        self.paid_amount
    }

    fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    fn is_void(&self) -> bool {
        matches!(
            self.status_label().to_lowercase().as_str(),
            "cancelled" | "canceled"
        )
    }
}

/// Form payload for create/update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderDto {
    pub id: Option<String>,
    pub po_number: String,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub collection_id: Option<String>,
    pub order_date: String,
    pub due_date: Option<String>,
    pub expected_delivery: Option<String>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: Option<String>,
}

impl From<PurchaseOrder> for PurchaseOrderDto {
    fn from(po: PurchaseOrder) -> Self {
        let total_amount = po.billed();
        Self {
            id: Some(po.id),
            po_number: po.po_number,
            supplier_id: po.supplier_id,
            supplier_name: po.supplier_name,
            collection_id: po.collection_id,
            order_date: po.order_date,
            due_date: po.due_date,
            expected_delivery: po.expected_delivery,
            total_amount,
            paid_amount: po.paid_amount,
            status: po.status,
        }
    }
}

impl PurchaseOrderDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.po_number.trim().is_empty() {
            return Err("PO number is required".into());
        }
        if self.supplier_id.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err("Supplier is required".into());
        }
        let order_date = parse_date(&self.order_date).ok_or("Order date must be YYYY-MM-DD")?;
        if let Some(due) = self.due_date.as_deref().filter(|d| !d.is_empty()) {
            let due = parse_date(due).ok_or("Due date must be YYYY-MM-DD")?;
            if due < order_date {
                return Err("Due date cannot be before the order date".into());
            }
        }
        if self.total_amount < 0.0 || self.paid_amount < 0.0 {
            return Err("Amounts cannot be negative".into());
        }
        if self.paid_amount > self.total_amount + SETTLED_EPSILON {
            return Err("Paid amount cannot exceed the total".into());
        }
        Ok(())
    }
}

/// PATCH body for recording a payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub paid_amount: f64,
}

impl Searchable for PurchaseOrder {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.po_number, filter)
            || self.supplier_name.as_deref().is_some_and(|n| contains_ci(n, filter))
            || self.status.as_deref().is_some_and(|s| contains_ci(s, filter))
    }
}

impl Sortable for PurchaseOrder {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "po_number" => cmp_str_ci(&self.po_number, &other.po_number),
            "supplier" => cmp_str_ci(&self.counterparty(), &other.counterparty()),
            "due_date" => self.due_date.cmp(&other.due_date),
            "expected_delivery" => self.expected_delivery.cmp(&other.expected_delivery),
            "total_amount" => cmp_f64(self.billed(), other.billed()),
            "outstanding" => cmp_f64(
                FinancialDocument::outstanding(self),
                FinancialDocument::outstanding(other),
            ),
            "status" => cmp_str_ci(self.status_label(), other.status_label()),
            _ => self.order_date.cmp(&other.order_date),
        }
    }
}

impl Resource for PurchaseOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.po_number
    }

    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn collection_name() -> &'static str {
        "purchase_order"
    }

    fn endpoint() -> &'static str {
        "/purchase-orders"
    }

    fn element_name() -> &'static str {
        "Purchase order"
    }

    fn list_name() -> &'static str {
        "Payables"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::finance::PaymentStatus;
    use chrono::NaiveDate;

    fn po() -> PurchaseOrder {
        PurchaseOrder {
            id: "po1".into(),
            po_number: "PO-100".into(),
            supplier_id: Some("s1".into()),
            order_date: "2024-04-01".into(),
            due_date: Some("2024-05-01".into()),
            expected_delivery: Some("2024-04-20".into()),
            lines: vec![
                PurchaseOrderLine {
                    quantity: 100.0,
                    unit_cost: 4.5,
                    ..Default::default()
                },
                PurchaseOrderLine {
                    quantity: 10.0,
                    unit_cost: 5.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_billed_falls_back_to_lines() {
        assert_eq!(po().billed(), 500.0);
        let explicit = PurchaseOrder {
            total_amount: 480.0,
            ..po()
        };
        assert_eq!(explicit.billed(), 480.0);
    }

    #[test]
    fn test_payment_validation() {
        let order = PurchaseOrder {
            paid_amount: 100.0,
            ..po()
        };
        assert_eq!(order.validate_payment(150.0), Ok(250.0));
        assert!(order.validate_payment(0.0).is_err());
        assert!(order.validate_payment(f64::NAN).is_err());
        assert!(order.validate_payment(401.0).is_err());

        let cancelled = PurchaseOrder {
            status: Some("Cancelled".into()),
            ..po()
        };
        assert!(cancelled.validate_payment(10.0).is_err());
    }

    #[test]
    fn test_late_delivery_and_status() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 25).unwrap();
        assert!(po().is_delivery_late(today));
        let received = PurchaseOrder {
            status: Some("received".into()),
            ..po()
        };
        assert!(!received.is_delivery_late(today));
        assert_eq!(po().payment_status(today), PaymentStatus::Pending);
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = PurchaseOrderDto::from(po());
        assert!(dto.validate().is_ok());
        dto.due_date = Some("2024-03-01".into());
        assert_eq!(
            dto.validate().unwrap_err(),
            "Due date cannot be before the order date"
        );
        dto.due_date = None;
        dto.paid_amount = 600.0;
        assert!(dto.validate().is_err());
        dto.paid_amount = 0.0;
        dto.supplier_id = None;
        assert_eq!(dto.validate().unwrap_err(), "Supplier is required");
    }
}
