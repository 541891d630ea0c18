use crate::dashboards::d403_sales::api;
use crate::shared::components::date_range_picker::{month_bounds, DateRangePicker};
use crate::shared::components::table::{format_money, format_number_int, format_percent};
use crate::shared::components::StatCard;
use crate::shared::config::use_config;
use crate::shared::date_utils::today;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use chrono::{Duration, NaiveDate};
use contracts::dashboards::d403_sales::dto::SalesAnalytics;
use contracts::domain::a007_order::aggregate::SalesOrder;
use contracts::shared::finance::parse_date;
use contracts::shared::indicators::{change_percent, IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Return rate above this is flagged
const RETURN_RATE_WARNING_PERCENT: f64 = 8.0;

/// Range of the same length right before `from..=to`.
pub fn previous_range(from: NaiveDate, to: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if to < from {
        return None;
    }
    let prev_to = from - Duration::days(1);
    let prev_from = prev_to - (to - from);
    Some((prev_from, prev_to))
}

/// "2024-03" -> "Mar 2024"
pub fn month_label(period: &str) -> String {
    parse_date(&format!("{}-01", period))
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| period.to_string())
}

fn parse_bound(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        parse_date(value)
    }
}

#[component]
pub fn SalesDashboard() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let symbol = StoredValue::new(currency.clone());

    let (month_start, month_end) = month_bounds(today())
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .unwrap_or_default();
    let date_from = RwSignal::new(month_start);
    let date_to = RwSignal::new(month_end);

    let orders = RwSignal::new(None::<Vec<SalesOrder>>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let listing = api::load_orders(config.page_size()).await;
            if let Some(e) = listing.failure {
                error.set(Some(format!("Cannot load orders, showing no sales: {}", e)));
            }
            orders.set(Some(listing.items));
            loading.set(false);
        });
    };
    load();

    let range = Memo::new(move |_| (parse_bound(&date_from.get()), parse_bound(&date_to.get())));
    let analytics = Memo::new(move |_| {
        let (from, to) = range.get();
        orders.with(|o| o.as_ref().map(|o| SalesAnalytics::compute(o, from, to)))
    });
    let previous = Memo::new(move |_| {
        let (Some(from), Some(to)) = range.get() else {
            return None;
        };
        let (prev_from, prev_to) = previous_range(from, to)?;
        orders.with(|o| o.as_ref().map(|o| SalesAnalytics::compute(o, Some(prev_from), Some(prev_to))))
    });

    let figure = move |f: fn(&SalesAnalytics) -> f64| Signal::derive(move || analytics.with(|a| a.as_ref().map(f)));
    let change = move |f: fn(&SalesAnalytics) -> f64| {
        Signal::derive(move || {
            let current = analytics.with(|a| a.as_ref().map(f))?;
            let before = previous.with(|p| p.as_ref().map(f))?;
            change_percent(current, before)
        })
    };
    let return_rate = figure(|a| a.return_rate);

    let on_range = Callback::new(move |(from, to): (String, String)| {
        date_from.set(from);
        date_to.set(to);
    });

    view! {
        <PageFrame page_id="d403_sales--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sales analytics"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <DateRangePicker
                    date_from=Signal::derive(move || date_from.get())
                    date_to=Signal::derive(move || date_to.get())
                    on_change=on_range
                    label="Order date".to_string()
                />
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--warning">{e}</div> })}

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard
                        label="Revenue"
                        icon_name="trending-up"
                        value=figure(|a| a.revenue)
                        format=ValueFormat::money(&currency)
                        change_percent=change(|a| a.revenue)
                    />
                    <StatCard
                        label="Orders"
                        icon_name="orders"
                        value=figure(|a| a.order_count as f64)
                        format=ValueFormat::Integer
                        change_percent=change(|a| a.order_count as f64)
                        subtitle=Signal::derive(move || analytics.with(|a| a.as_ref().map(|a| format!("{} cancelled", a.cancelled_count))))
                    />
                    <StatCard
                        label="Average order"
                        icon_name="wallet"
                        value=figure(|a| a.average_order_value)
                        format=ValueFormat::money(&currency)
                        change_percent=change(|a| a.average_order_value)
                    />
                    <StatCard
                        label="Units sold"
                        icon_name="products"
                        value=figure(|a| a.units as f64)
                        format=ValueFormat::Integer
                        change_percent=change(|a| a.units as f64)
                    />
                    <StatCard
                        label="Return rate"
                        icon_name="refresh"
                        value=return_rate
                        format=ValueFormat::percent()
                        status=Signal::derive(move || IndicatorStatus::lower_is_better(return_rate.get().unwrap_or(0.0), RETURN_RATE_WARNING_PERCENT))
                    />
                </div>

                <div class="dashboard-grid">
                    <div class="dashboard-block">
                        <h3 class="dashboard-block__title">"By month"</h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Month"</th>
                                    <th class="text-right">"Orders"</th>
                                    <th class="text-right">"Revenue"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || analytics.get().map(|a| a.by_month.into_iter().map(|m| view! {
                                    <tr>
                                        <td>{month_label(&m.period)}</td>
                                        <td class="text-right">{m.orders}</td>
                                        <td class="text-right">{format!("{}{}", symbol.get_value(), format_money(m.revenue))}</td>
                                    </tr>
                                }).collect_view())}
                            </tbody>
                        </table>
                    </div>

                    <div class="dashboard-block">
                        <h3 class="dashboard-block__title">"By channel"</h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Channel"</th>
                                    <th class="text-right">"Orders"</th>
                                    <th class="text-right">"Revenue"</th>
                                    <th class="text-right">"Share"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || analytics.get().map(|a| a.by_channel.into_iter().map(|c| view! {
                                    <tr>
                                        <td>{c.channel.clone()}</td>
                                        <td class="text-right">{c.orders}</td>
                                        <td class="text-right">{format!("{}{}", symbol.get_value(), format_money(c.revenue))}</td>
                                        <td class="text-right">
                                            <div class="progress">
                                                <div class="progress__bar" style=format!("width: {:.0}%", c.share)></div>
                                            </div>
                                            {format_percent(Some(c.share))}
                                        </td>
                                    </tr>
                                }).collect_view())}
                            </tbody>
                        </table>
                    </div>

                    <div class="dashboard-block dashboard-block--wide">
                        <h3 class="dashboard-block__title">"Top products"</h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"#"</th>
                                    <th>"Product"</th>
                                    <th class="text-right">"Units"</th>
                                    <th class="text-right">"Revenue"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || analytics.get().map(|a| a.top_products.into_iter().enumerate().map(|(i, p)| view! {
                                    <tr>
                                        <td>{i + 1}</td>
                                        <td>{p.label.clone()}</td>
                                        <td class="text-right">{format_number_int(p.units as f64)}</td>
                                        <td class="text-right">{format!("{}{}", symbol.get_value(), format_money(p.revenue))}</td>
                                    </tr>
                                }).collect_view())}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_range() {
        assert_eq!(
            previous_range(day(2024, 6, 1), day(2024, 6, 30)),
            Some((day(2024, 5, 2), day(2024, 5, 31)))
        );
        assert_eq!(
            previous_range(day(2024, 6, 10), day(2024, 6, 10)),
            Some((day(2024, 6, 9), day(2024, 6, 9)))
        );
        assert_eq!(previous_range(day(2024, 6, 10), day(2024, 6, 1)), None);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2024-03"), "Mar 2024");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("2024-02-29"), Some(day(2024, 2, 29)));
    }
}
