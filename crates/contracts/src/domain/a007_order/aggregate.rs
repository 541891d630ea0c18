use crate::domain::common::id::deserialize_opt_id;
use crate::domain::common::{deserialize_id, Resource};
use crate::shared::finance::parse_date;
use crate::shared::list::{cmp_f64, cmp_str_ci, contains_ci, Searchable, Sortable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Fulfillment state of a sales order. Unknown API values map to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FulfillmentStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl From<String> for FulfillmentStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "processing" | "picking" | "packed" => FulfillmentStatus::Processing,
            "shipped" | "in_transit" => FulfillmentStatus::Shipped,
            "delivered" | "completed" => FulfillmentStatus::Delivered,
            "cancelled" | "canceled" => FulfillmentStatus::Cancelled,
            "returned" | "refunded" => FulfillmentStatus::Returned,
            _ => FulfillmentStatus::Pending,
        }
    }
}

impl From<FulfillmentStatus> for String {
    fn from(value: FulfillmentStatus) -> Self {
        value.code().to_string()
    }
}

impl FulfillmentStatus {
    pub fn all() -> [FulfillmentStatus; 6] {
        [
            FulfillmentStatus::Pending,
            FulfillmentStatus::Processing,
            FulfillmentStatus::Shipped,
            FulfillmentStatus::Delivered,
            FulfillmentStatus::Cancelled,
            FulfillmentStatus::Returned,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "pending",
            FulfillmentStatus::Processing => "processing",
            FulfillmentStatus::Shipped => "shipped",
            FulfillmentStatus::Delivered => "delivered",
            FulfillmentStatus::Cancelled => "cancelled",
            FulfillmentStatus::Returned => "returned",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "Pending",
            FulfillmentStatus::Processing => "Processing",
            FulfillmentStatus::Shipped => "Shipped",
            FulfillmentStatus::Delivered => "Delivered",
            FulfillmentStatus::Cancelled => "Cancelled",
            FulfillmentStatus::Returned => "Returned",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "neutral",
            FulfillmentStatus::Processing => "primary",
            FulfillmentStatus::Shipped => "primary",
            FulfillmentStatus::Delivered => "success",
            FulfillmentStatus::Cancelled => "error",
            FulfillmentStatus::Returned => "warning",
        }
    }

    /// Not yet handed over to the carrier.
    pub fn is_open(&self) -> bool {
        matches!(self, FulfillmentStatus::Pending | FulfillmentStatus::Processing)
    }

    /// Counts as revenue in sales analytics.
    pub fn is_revenue(&self) -> bool {
        !matches!(self, FulfillmentStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    /// Absolute discount on the line
    #[serde(default)]
    pub discount: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        (self.quantity as f64 * self.unit_price - self.discount).max(0.0)
    }

    /// Key used to group lines per product in analytics.
    pub fn product_key(&self) -> String {
        self.product_id
            .clone()
            .or_else(|| self.sku.clone())
            .or_else(|| self.product_name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn product_label(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.sku.clone())
            .unwrap_or_else(|| self.product_key())
    }
}

/// Sales order (a007)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub status: FulfillmentStatus,
    /// "web", "retail", "wholesale", "marketplace" ...
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    /// Order total as billed; computed from lines when absent
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub shipped_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub warehouse_id: Option<String>,
}

impl SalesOrder {
    pub fn total_amount(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.items.iter().map(OrderLine::line_total).sum())
    }

    pub fn units(&self) -> i64 {
        self.items.iter().map(|l| l.quantity.max(0)).sum()
    }

    pub fn order_day(&self) -> Option<NaiveDate> {
        parse_date(&self.order_date)
    }

    /// Days between ordering and shipping.
    pub fn days_to_ship(&self) -> Option<i64> {
        let shipped = parse_date(self.shipped_at.as_deref()?)?;
        Some((shipped - self.order_day()?).num_days())
    }

    pub fn channel_label(&self) -> String {
        self.channel
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("direct")
            .to_string()
    }

    pub fn customer_label(&self) -> String {
        self.customer_name
            .clone()
            .or_else(|| self.customer_id.clone())
            .unwrap_or_else(|| "—".to_string())
    }
}

impl Searchable for SalesOrder {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.order_number, filter)
            || self.customer_name.as_deref().is_some_and(|n| contains_ci(n, filter))
            || self.channel.as_deref().is_some_and(|c| contains_ci(c, filter))
            || self.items.iter().any(|l| {
                l.sku.as_deref().is_some_and(|s| contains_ci(s, filter))
                    || l.product_name.as_deref().is_some_and(|n| contains_ci(n, filter))
            })
    }
}

impl Sortable for SalesOrder {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "order_number" => cmp_str_ci(&self.order_number, &other.order_number),
            "customer" => cmp_str_ci(&self.customer_label(), &other.customer_label()),
            "channel" => cmp_str_ci(&self.channel_label(), &other.channel_label()),
            "status" => self.status.code().cmp(other.status.code()),
            "units" => self.units().cmp(&other.units()),
            "total" => cmp_f64(self.total_amount(), other.total_amount()),
            _ => self.order_date.cmp(&other.order_date),
        }
    }
}

impl Resource for SalesOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.order_number
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn endpoint() -> &'static str {
        "/orders"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_lenient() {
        let order: SalesOrder = serde_json::from_str(
            r#"{"id":1,"order_number":"SO-1","order_date":"2024-05-01","status":"Canceled",
                "items":[{"sku":"TS","quantity":2,"unit_price":15.0,"discount":5.0}]}"#,
        )
        .unwrap();
        assert_eq!(order.status, FulfillmentStatus::Cancelled);
        assert_eq!(order.total_amount(), 25.0);
        assert_eq!(order.units(), 2);

        let unknown: FulfillmentStatus = String::from("on-the-moon").into();
        assert_eq!(unknown, FulfillmentStatus::Pending);
    }

    #[test]
    fn test_explicit_total_wins() {
        let order = SalesOrder {
            total: Some(99.0),
            items: vec![OrderLine {
                quantity: 1,
                unit_price: 10.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(order.total_amount(), 99.0);
    }

    #[test]
    fn test_days_to_ship() {
        let order = SalesOrder {
            order_date: "2024-05-01T10:00:00Z".into(),
            shipped_at: Some("2024-05-04".into()),
            ..Default::default()
        };
        assert_eq!(order.days_to_ship(), Some(3));
        assert_eq!(SalesOrder::default().days_to_ship(), None);
    }
}
