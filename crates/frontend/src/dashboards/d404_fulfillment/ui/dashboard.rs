use crate::dashboards::d404_fulfillment::api;
use crate::dashboards::ledger::share_of;
use crate::shared::components::table::format_percent;
use crate::shared::components::{Badge, StatCard};
use crate::shared::config::use_config;
use crate::shared::date_utils::{format_date, today};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d404_fulfillment::dto::{FulfillmentOverview, SHIP_WITHIN_DAYS};
use contracts::domain::a007_order::aggregate::FulfillmentStatus;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const FULFILLMENT_GOOD_PERCENT: f64 = 90.0;
const FULFILLMENT_WARNING_PERCENT: f64 = 70.0;

#[component]
pub fn FulfillmentDashboard() -> impl IntoView {
    let config = use_config();
    let today = today();

    let overview = RwSignal::new(None::<FulfillmentOverview>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let listing = api::load_orders(config.page_size()).await;
            if let Some(e) = listing.failure {
                error.set(Some(format!("Cannot load orders, showing no orders: {}", e)));
            }
            overview.set(Some(FulfillmentOverview::compute(&listing.items, today)));
            loading.set(false);
        });
    };
    load();

    let rate = Signal::derive(move || overview.with(|o| o.as_ref().and_then(|o| o.fulfillment_rate)));
    let open = Signal::derive(move || {
        overview.with(|o| {
            o.as_ref().map(|o| {
                FulfillmentStatus::all()
                    .into_iter()
                    .filter(FulfillmentStatus::is_open)
                    .map(|s| o.count(s))
                    .sum::<usize>() as f64
            })
        })
    });
    let late = Signal::derive(move || overview.with(|o| o.as_ref().map(|o| o.late_shipments.len() as f64)));

    view! {
        <PageFrame page_id="d404_fulfillment--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Fulfillment"</h1>
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

            {move || error.get().map(|e| view! { <div class="alert alert--warning">{e}</div> })}

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard
                        label="Orders"
                        icon_name="orders"
                        value=Signal::derive(move || overview.with(|o| o.as_ref().map(|o| o.total_orders as f64)))
                        format=ValueFormat::Integer
                    />
                    <StatCard label="Open" icon_name="clock" value=open format=ValueFormat::Integer />
                    <StatCard
                        label="Fulfillment rate"
                        icon_name="check"
                        value=rate
                        format=ValueFormat::percent()
                        status=Signal::derive(move || IndicatorStatus::higher_is_better(rate.get(), FULFILLMENT_GOOD_PERCENT, FULFILLMENT_WARNING_PERCENT))
                        subtitle=Signal::derive(|| Some("delivered of non-cancelled".to_string()))
                    />
                    <StatCard
                        label="Days to ship"
                        icon_name="shipments"
                        value=Signal::derive(move || overview.with(|o| o.as_ref().and_then(|o| o.average_days_to_ship)))
                        format=ValueFormat::Number { decimals: 1 }
                        subtitle=Signal::derive(|| Some("average, shipped orders".to_string()))
                    />
                    <StatCard
                        label="Late shipments"
                        icon_name="alert-triangle"
                        value=late
                        format=ValueFormat::Integer
                        status=Signal::derive(move || IndicatorStatus::lower_is_better(late.get().unwrap_or(0.0), 0.0))
                        subtitle=Signal::derive(|| Some(format!("open longer than {} days", SHIP_WITHIN_DAYS)))
                    />
                </div>

                <div class="dashboard-grid">
                    <div class="dashboard-block">
                        <h3 class="dashboard-block__title">"Pipeline"</h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Status"</th>
                                    <th class="text-right">"Orders"</th>
                                    <th class="text-right">"Share"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || overview.get().map(|o| {
                                    let total = o.total_orders as f64;
                                    o.by_status.into_iter().map(|s| view! {
                                        <tr>
                                            <td><Badge variant=s.status.badge_variant().to_string()>{s.status.label()}</Badge></td>
                                            <td class="text-right">{s.count}</td>
                                            <td class="text-right">{format_percent(share_of(s.count as f64, total))}</td>
                                        </tr>
                                    }).collect_view()
                                })}
                            </tbody>
                        </table>
                    </div>

                    <div class="dashboard-block dashboard-block--wide">
                        <h3 class="dashboard-block__title">"Late shipments"</h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Order #"</th>
                                    <th>"Customer"</th>
                                    <th>"Ordered"</th>
                                    <th class="text-right">"Days open"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let rows = overview.with(|o| o.as_ref().map(|o| o.late_shipments.clone()).unwrap_or_default());
                                    if rows.is_empty() {
                                        return view! { <tr><td colspan="5" class="text-muted">"No late shipments"</td></tr> }.into_any();
                                    }
                                    rows.into_iter().map(|l| view! {
                                        <tr>
                                            <td>{l.order_number.clone()}</td>
                                            <td>{l.customer.clone()}</td>
                                            <td>{format_date(&l.order_date)}</td>
                                            <td class="text-right text-error">{l.days_open}</td>
                                            <td><Badge variant=l.status.badge_variant().to_string()>{l.status.label()}</Badge></td>
                                        </tr>
                                    }).collect_view().into_any()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
