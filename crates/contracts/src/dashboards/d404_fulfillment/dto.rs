use crate::domain::a007_order::aggregate::{FulfillmentStatus, SalesOrder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Open orders older than this are late
pub const SHIP_WITHIN_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: FulfillmentStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateShipment {
    pub order_id: String,
    pub order_number: String,
    pub customer: String,
    pub order_date: String,
    pub days_open: i64,
    pub status: FulfillmentStatus,
}

/// Order pipeline health
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentOverview {
    pub total_orders: usize,
    /// One entry per status, in status order
    pub by_status: Vec<StatusCount>,
    /// Delivered share of non-cancelled orders, percent
    pub fulfillment_rate: Option<f64>,
    pub average_days_to_ship: Option<f64>,
    /// Oldest first
    pub late_shipments: Vec<LateShipment>,
}

impl FulfillmentOverview {
    pub fn compute(orders: &[SalesOrder], today: NaiveDate) -> Self {
        let by_status: Vec<StatusCount> = FulfillmentStatus::all()
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: orders.iter().filter(|o| o.status == status).count(),
            })
            .collect();

        let active = orders
            .iter()
            .filter(|o| o.status != FulfillmentStatus::Cancelled)
            .count();
        let delivered = orders
            .iter()
            .filter(|o| o.status == FulfillmentStatus::Delivered)
            .count();
        let fulfillment_rate = if active > 0 {
            Some(delivered as f64 / active as f64 * 100.0)
        } else {
            None
        };

        let ship_days: Vec<i64> = orders
            .iter()
            .filter_map(SalesOrder::days_to_ship)
            .filter(|d| *d >= 0)
            .collect();
        let average_days_to_ship = if ship_days.is_empty() {
            None
        } else {
            Some(ship_days.iter().sum::<i64>() as f64 / ship_days.len() as f64)
        };

        let mut late_shipments: Vec<LateShipment> = orders
            .iter()
            .filter(|o| o.status.is_open())
            .filter_map(|o| {
                let days_open = (today - o.order_day()?).num_days();
                (days_open > SHIP_WITHIN_DAYS).then(|| LateShipment {
                    order_id: o.id.clone(),
                    order_number: o.order_number.clone(),
                    customer: o.customer_label(),
                    order_date: o.order_date.clone(),
                    days_open,
                    status: o.status,
                })
            })
            .collect();
        late_shipments.sort_by(|a, b| b.days_open.cmp(&a.days_open));

        Self {
            total_orders: orders.len(),
            by_status,
            fulfillment_rate,
            average_days_to_ship,
            late_shipments,
        }
    }

    pub fn count(&self, status: FulfillmentStatus) -> usize {
        self.by_status
            .iter()
            .find(|s| s.status == status)
            .map_or(0, |s| s.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(no: &str, date: &str, status: FulfillmentStatus, shipped: Option<&str>) -> SalesOrder {
        SalesOrder {
            id: no.to_lowercase(),
            order_number: no.into(),
            order_date: date.into(),
            status,
            shipped_at: shipped.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_fulfillment_overview() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let orders = vec![
            order("SO-1", "2024-06-01", FulfillmentStatus::Delivered, Some("2024-06-03")),
            order("SO-2", "2024-06-02", FulfillmentStatus::Shipped, Some("2024-06-06")),
            order("SO-3", "2024-06-03", FulfillmentStatus::Pending, None),
            order("SO-4", "2024-06-09", FulfillmentStatus::Processing, None),
            order("SO-5", "2024-06-01", FulfillmentStatus::Processing, None),
            order("SO-6", "2024-06-01", FulfillmentStatus::Cancelled, None),
        ];
        let f = FulfillmentOverview::compute(&orders, today);

        assert_eq!(f.total_orders, 6);
        assert_eq!(f.count(FulfillmentStatus::Processing), 2);
        assert_eq!(f.count(FulfillmentStatus::Returned), 0);
        assert_eq!(f.by_status.len(), 6);
        assert_eq!(f.fulfillment_rate, Some(20.0));
        assert_eq!(f.average_days_to_ship, Some(3.0));

        let late: Vec<&str> = f.late_shipments.iter().map(|l| l.order_number.as_str()).collect();
        assert_eq!(late, vec!["SO-5", "SO-3"]);
        assert_eq!(f.late_shipments[0].days_open, 9);
    }

    #[test]
    fn test_empty() {
        let f = FulfillmentOverview::compute(&[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(f.fulfillment_rate, None);
        assert_eq!(f.average_days_to_ship, None);
        assert!(f.late_shipments.is_empty());
    }
}
