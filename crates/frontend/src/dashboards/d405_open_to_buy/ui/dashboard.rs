use crate::dashboards::d405_open_to_buy::api;
use crate::domain::a006_collection::ui::list::utilization_variant;
use crate::shared::components::table::{format_money, format_percent};
use crate::shared::components::{Badge, StatCard};
use crate::shared::config::use_config;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d405_open_to_buy::dto::OpenToBuyReport;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Budget used above this share is a warning
const UTILIZATION_WARNING_PERCENT: f64 = 90.0;

pub fn utilization_status(utilization: Option<f64>) -> IndicatorStatus {
    match utilization {
        None => IndicatorStatus::Neutral,
        Some(u) if u > 100.0 => IndicatorStatus::Bad,
        Some(u) if u >= UTILIZATION_WARNING_PERCENT => IndicatorStatus::Warning,
        Some(_) => IndicatorStatus::Good,
    }
}

#[component]
pub fn OpenToBuyDashboard() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let symbol = StoredValue::new(currency.clone());

    let report = RwSignal::new(None::<OpenToBuyReport>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let (collections, purchase_orders) = api::load_budgets(config.page_size()).await;
            let failures: Vec<String> = [collections.failure, purchase_orders.failure]
                .into_iter()
                .flatten()
                .collect();
            if !failures.is_empty() {
                error.set(Some(format!("Some lists could not be loaded and are shown empty: {}", failures.join("; "))));
            }
            report.set(Some(OpenToBuyReport::compute(&collections.items, &purchase_orders.items)));
            loading.set(false);
        });
    };
    load();

    let figure = move |f: fn(&OpenToBuyReport) -> f64| Signal::derive(move || report.with(|r| r.as_ref().map(f)));
    let utilization = Signal::derive(move || report.with(|r| r.as_ref().and_then(OpenToBuyReport::total_utilization)));
    let money = move |v: f64| format!("{}{}", symbol.get_value(), format_money(v));

    view! {
        <PageFrame page_id="d405_open_to_buy--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Open to buy"</h1>
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
                    <StatCard label="Budget" icon_name="wallet" value=figure(|r| r.total_budget) format=ValueFormat::money(&currency) />
                    <StatCard label="Committed" icon_name="purchases" value=figure(|r| r.total_committed) format=ValueFormat::money(&currency) />
                    <StatCard
                        label="Budget used"
                        icon_name="percent"
                        value=utilization
                        format=ValueFormat::percent()
                        status=Signal::derive(move || utilization_status(utilization.get()))
                    />
                    <StatCard label="Open to buy" icon_name="trending-up" value=figure(|r| r.total_open_to_buy) format=ValueFormat::money(&currency) />
                    <StatCard
                        label="Unallocated"
                        icon_name="alert-triangle"
                        value=figure(|r| r.unallocated)
                        format=ValueFormat::money(&currency)
                        subtitle=Signal::derive(|| Some("POs without a known collection".to_string()))
                    />
                </div>

                <div class="table-wrapper">
                    <table class="simple-table">
                        <thead>
                            <tr>
                                <th>"Collection"</th>
                                <th>"Season"</th>
                                <th class="text-right">"POs"</th>
                                <th class="text-right">"Budget"</th>
                                <th class="text-right">"Committed"</th>
                                <th class="text-right">"Remaining"</th>
                                <th>"Used"</th>
                                <th class="text-right">"Open to buy"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || report.get().map(|r| r.rows.into_iter().map(|row| {
                                let remaining_class = if row.is_over_budget() { "text-right text-error" } else { "text-right" };
                                let otb_class = if row.open_to_buy < 0.0 { "text-right text-error" } else { "text-right" };
                                view! {
                                    <tr>
                                        <td>{row.name.clone()}</td>
                                        <td>{row.season.clone()}</td>
                                        <td class="text-right">{row.purchase_orders}</td>
                                        <td class="text-right">{money(row.budget)}</td>
                                        <td class="text-right">{money(row.committed)}</td>
                                        <td class=remaining_class>{money(row.remaining)}</td>
                                        <td><Badge variant=utilization_variant(&row).to_string()>{format_percent(row.utilization)}</Badge></td>
                                        <td class=otb_class><strong>{money(row.open_to_buy)}</strong></td>
                                    </tr>
                                }
                            }).collect_view())}
                        </tbody>
                    </table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_status() {
        assert_eq!(utilization_status(None), IndicatorStatus::Neutral);
        assert_eq!(utilization_status(Some(40.0)), IndicatorStatus::Good);
        assert_eq!(utilization_status(Some(95.0)), IndicatorStatus::Warning);
        assert_eq!(utilization_status(Some(130.0)), IndicatorStatus::Bad);
    }
}
