use super::error::WorkflowError;
use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::finance::parse_date;
use crate::shared::list::{cmp_str_ci, contains_ci, Searchable, Sortable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Lifecycle of a production order. Unknown API values map to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductionStatus {
    #[default]
    Draft,
    PendingApproval,
    Approved,
    InProgress,
    Completed,
    Cancelled,
}

impl From<String> for ProductionStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "pending_approval" | "pending" | "submitted" => ProductionStatus::PendingApproval,
            "approved" => ProductionStatus::Approved,
            "in_progress" | "started" | "wip" => ProductionStatus::InProgress,
            "completed" | "done" | "finished" => ProductionStatus::Completed,
            "cancelled" | "canceled" => ProductionStatus::Cancelled,
            _ => ProductionStatus::Draft,
        }
    }
}

impl From<ProductionStatus> for String {
    fn from(value: ProductionStatus) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for ProductionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ProductionStatus {
    pub fn all() -> [ProductionStatus; 6] {
        [
            ProductionStatus::Draft,
            ProductionStatus::PendingApproval,
            ProductionStatus::Approved,
            ProductionStatus::InProgress,
            ProductionStatus::Completed,
            ProductionStatus::Cancelled,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProductionStatus::Draft => "draft",
            ProductionStatus::PendingApproval => "pending_approval",
            ProductionStatus::Approved => "approved",
            ProductionStatus::InProgress => "in_progress",
            ProductionStatus::Completed => "completed",
            ProductionStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductionStatus::Draft => "Draft",
            ProductionStatus::PendingApproval => "Pending approval",
            ProductionStatus::Approved => "Approved",
            ProductionStatus::InProgress => "In progress",
            ProductionStatus::Completed => "Completed",
            ProductionStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            ProductionStatus::Draft => "neutral",
            ProductionStatus::PendingApproval => "warning",
            ProductionStatus::Approved => "primary",
            ProductionStatus::InProgress => "primary",
            ProductionStatus::Completed => "success",
            ProductionStatus::Cancelled => "error",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ProductionStatus::Completed | ProductionStatus::Cancelled)
    }

    pub fn can_transition(&self, to: ProductionStatus) -> bool {
        use ProductionStatus::*;
        match (*self, to) {
            (Draft, PendingApproval) => true,
            (PendingApproval, Approved) | (PendingApproval, Draft) => true,
            (Approved, InProgress) => true,
            (InProgress, Completed) => true,
            (from, Cancelled) => !from.is_closed(),
            _ => false,
        }
    }

    pub fn transition(&self, to: ProductionStatus) -> Result<ProductionStatus, WorkflowError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(WorkflowError::InvalidTransition { from: *self, to })
        }
    }
}

/// Production order for a finished product (a012)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub bom_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub collection_id: Option<String>,
    /// Planned units
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub status: ProductionStatus,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Own workshop or contract manufacturer
    #[serde(default)]
    pub factory: Option<String>,
}

impl ProductionOrder {
    pub fn product_label(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.product_id.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_date)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_closed() && self.due_day().is_some_and(|d| d < today)
    }

    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.due_day().map(|d| (d - today).num_days())
    }
}

impl Searchable for ProductionOrder {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.order_number, filter)
            || self.product_name.as_deref().is_some_and(|n| contains_ci(n, filter))
            || self.factory.as_deref().is_some_and(|f| contains_ci(f, filter))
            || contains_ci(self.status.label(), filter)
    }
}

impl Sortable for ProductionOrder {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "order_number" => cmp_str_ci(&self.order_number, &other.order_number),
            "product" => cmp_str_ci(&self.product_label(), &other.product_label()),
            "quantity" => self.quantity.cmp(&other.quantity),
            "status" => (self.status as u8).cmp(&(other.status as u8)),
            "start_date" => self.start_date.cmp(&other.start_date),
            _ => self.due_date.cmp(&other.due_date),
        }
    }
}

impl Resource for ProductionOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.order_number
    }

    fn aggregate_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "production_order"
    }

    fn endpoint() -> &'static str {
        "/production-orders"
    }

    fn element_name() -> &'static str {
        "Production order"
    }

    fn list_name() -> &'static str {
        "Production orders"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        let order: ProductionOrder = serde_json::from_str(
            r#"{"id":7,"order_number":"MO-7","quantity":300,"status":"In Progress"}"#,
        )
        .unwrap();
        assert_eq!(order.id, "7");
        assert_eq!(order.status, ProductionStatus::InProgress);
        assert_eq!(
            serde_json::to_value(order.status).unwrap(),
            serde_json::json!("in_progress")
        );
        assert_eq!(ProductionStatus::from("???".to_string()), ProductionStatus::Draft);
    }

    #[test]
    fn test_transitions() {
        use ProductionStatus::*;
        assert_eq!(Draft.transition(PendingApproval), Ok(PendingApproval));
        assert_eq!(InProgress.transition(Cancelled), Ok(Cancelled));
        assert_eq!(
            Draft.transition(Completed),
            Err(WorkflowError::InvalidTransition {
                from: Draft,
                to: Completed
            })
        );
        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Cancelled));
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let order = ProductionOrder {
            due_date: Some("2024-06-01".into()),
            status: ProductionStatus::InProgress,
            ..Default::default()
        };
        assert!(order.is_overdue(today));
        assert_eq!(order.days_remaining(today), Some(-9));
        let done = ProductionOrder {
            status: ProductionStatus::Completed,
            ..order
        };
        assert!(!done.is_overdue(today));
    }
}
