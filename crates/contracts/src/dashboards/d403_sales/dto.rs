use crate::domain::a007_order::aggregate::{FulfillmentStatus, SalesOrder};
use crate::shared::list::cmp_f64;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TOP_PRODUCTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRevenue {
    /// "YYYY-MM"
    pub period: String,
    pub revenue: f64,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRevenue {
    pub channel: String,
    pub revenue: f64,
    pub orders: usize,
    /// Share of total revenue, percent
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub key: String,
    pub label: String,
    pub units: i64,
    pub revenue: f64,
}

/// Sales figures for a date range; cancelled orders never count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalytics {
    pub order_count: usize,
    pub revenue: f64,
    pub units: i64,
    pub average_order_value: f64,
    pub cancelled_count: usize,
    pub returned_count: usize,
    /// Returned share of counted orders, percent
    pub return_rate: f64,
    /// Ascending by period
    pub by_month: Vec<PeriodRevenue>,
    /// Highest revenue first
    pub by_channel: Vec<ChannelRevenue>,
    pub top_products: Vec<ProductSales>,
}

fn in_range(order: &SalesOrder, date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> bool {
    if date_from.is_none() && date_to.is_none() {
        return true;
    }
    match order.order_day() {
        Some(day) => {
            date_from.map_or(true, |from| day >= from) && date_to.map_or(true, |to| day <= to)
        }
        None => false,
    }
}

impl SalesAnalytics {
    pub fn compute(
        orders: &[SalesOrder],
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Self {
        let mut analytics = SalesAnalytics::default();
        let mut months: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut channels: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut products: BTreeMap<String, ProductSales> = BTreeMap::new();

        for order in orders.iter().filter(|o| in_range(o, date_from, date_to)) {
            if !order.status.is_revenue() {
                analytics.cancelled_count += 1;
                continue;
            }
            let total = order.total_amount();
            analytics.order_count += 1;
            analytics.revenue += total;
            analytics.units += order.units();
            if order.status == FulfillmentStatus::Returned {
                analytics.returned_count += 1;
            }

            if let Some(day) = order.order_day() {
                let month = months.entry(day.format("%Y-%m").to_string()).or_default();
                month.0 += total;
                month.1 += 1;
            }
            let channel = channels.entry(order.channel_label()).or_default();
            channel.0 += total;
            channel.1 += 1;

            for line in &order.items {
                let entry = products.entry(line.product_key()).or_insert_with(|| ProductSales {
                    key: line.product_key(),
                    label: line.product_label(),
                    units: 0,
                    revenue: 0.0,
                });
                entry.units += line.quantity.max(0);
                entry.revenue += line.line_total();
            }
        }

        if analytics.order_count > 0 {
            analytics.average_order_value = analytics.revenue / analytics.order_count as f64;
            analytics.return_rate =
                analytics.returned_count as f64 / analytics.order_count as f64 * 100.0;
        }

        analytics.by_month = months
            .into_iter()
            .map(|(period, (revenue, orders))| PeriodRevenue {
                period,
                revenue,
                orders,
            })
            .collect();

        let revenue = analytics.revenue;
        analytics.by_channel = channels
            .into_iter()
            .map(|(channel, (channel_revenue, orders))| ChannelRevenue {
                channel,
                revenue: channel_revenue,
                orders,
                share: if revenue > 0.0 {
                    channel_revenue / revenue * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        analytics
            .by_channel
            .sort_by(|a, b| cmp_f64(b.revenue, a.revenue).then_with(|| a.channel.cmp(&b.channel)));

        let mut top: Vec<ProductSales> = products.into_values().collect();
        top.sort_by(|a, b| cmp_f64(b.revenue, a.revenue).then_with(|| a.key.cmp(&b.key)));
        top.truncate(TOP_PRODUCTS);
        analytics.top_products = top;

        analytics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a007_order::aggregate::OrderLine;

    fn order(date: &str, status: FulfillmentStatus, channel: Option<&str>, lines: Vec<(&str, i64, f64)>) -> SalesOrder {
        SalesOrder {
            order_date: date.into(),
            status,
            channel: channel.map(str::to_string),
            items: lines
                .into_iter()
                .map(|(sku, quantity, unit_price)| OrderLine {
                    sku: Some(sku.into()),
                    quantity,
                    unit_price,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn orders() -> Vec<SalesOrder> {
        vec![
            order("2024-04-03", FulfillmentStatus::Delivered, Some("web"), vec![("TEE", 2, 20.0), ("CAP", 1, 10.0)]),
            order("2024-05-10", FulfillmentStatus::Shipped, Some("retail"), vec![("JEAN", 1, 80.0)]),
            order("2024-05-20", FulfillmentStatus::Returned, Some("web"), vec![("TEE", 1, 20.0)]),
            order("2024-05-21", FulfillmentStatus::Cancelled, Some("web"), vec![("JEAN", 5, 80.0)]),
            order("2024-06-01", FulfillmentStatus::Pending, None, vec![("TEE", 3, 20.0)]),
        ]
    }

    #[test]
    fn test_totals_exclude_cancelled() {
        let a = SalesAnalytics::compute(&orders(), None, None);
        assert_eq!(a.order_count, 4);
        assert_eq!(a.cancelled_count, 1);
        assert_eq!(a.revenue, 210.0);
        assert_eq!(a.units, 8);
        assert_eq!(a.average_order_value, 52.5);
        assert_eq!(a.return_rate, 25.0);
    }

    #[test]
    fn test_breakdowns() {
        let a = SalesAnalytics::compute(&orders(), None, None);
        let months: Vec<(&str, f64)> = a.by_month.iter().map(|m| (m.period.as_str(), m.revenue)).collect();
        assert_eq!(months, vec![("2024-04", 50.0), ("2024-05", 100.0), ("2024-06", 60.0)]);

        assert_eq!(a.by_channel[0].channel, "retail");
        assert_eq!(a.by_channel[0].revenue, 80.0);
        assert_eq!(a.by_channel[1].channel, "web");
        assert_eq!(a.by_channel[1].orders, 2);
        assert!(a.by_channel.iter().any(|c| c.channel == "direct"));

        assert_eq!(a.top_products[0].key, "TEE");
        assert_eq!(a.top_products[0].units, 6);
        assert_eq!(a.top_products[0].revenue, 120.0);
        assert_eq!(a.top_products.len(), 3);
    }

    #[test]
    fn test_date_range() {
        let from = NaiveDate::from_ymd_opt(2024, 5, 1);
        let to = NaiveDate::from_ymd_opt(2024, 5, 31);
        let a = SalesAnalytics::compute(&orders(), from, to);
        assert_eq!(a.order_count, 2);
        assert_eq!(a.cancelled_count, 1);
        assert_eq!(a.revenue, 100.0);

        let empty = SalesAnalytics::compute(&[], None, None);
        assert_eq!(empty.average_order_value, 0.0);
        assert!(empty.by_month.is_empty());
    }
}
