use crate::dashboards::d402_inventory::api;
use crate::shared::components::table::{format_money, format_number_int, format_percent};
use crate::shared::components::{Badge, StatCard};
use crate::shared::config::use_config;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d402_inventory::dto::InventoryOverview;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Warehouses fuller than this are flagged
const UTILIZATION_WARNING_PERCENT: f64 = 90.0;
/// Rows of the reorder table
const REORDER_ROWS: usize = 20;

pub fn utilization_class(utilization: Option<f64>) -> &'static str {
    match utilization {
        Some(u) if u > 100.0 => "text-right text-error",
        Some(u) if u >= UTILIZATION_WARNING_PERCENT => "text-right text-warning",
        _ => "text-right",
    }
}

#[component]
pub fn InventoryDashboard() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let reorder_point = config.config.with_untracked(|c| c.inventory.default_reorder_point);

    let overview = RwSignal::new(None::<InventoryOverview>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let (items, warehouses) = api::load_stock(config.page_size()).await;
            if let Some(e) = items.failure {
                error.set(Some(format!("Cannot load inventory, showing no stock: {}", e)));
            }
            overview.set(Some(InventoryOverview::compute(&items.items, &warehouses, reorder_point)));
            loading.set(false);
        });
    };
    load();

    let figure = move |f: fn(&InventoryOverview) -> f64| Signal::derive(move || overview.with(|o| o.as_ref().map(f)));
    let low = figure(|o| o.low_stock as f64);
    let out = figure(|o| o.out_of_stock as f64);
    let symbol = StoredValue::new(currency.clone());

    view! {
        <PageFrame page_id="d402_inventory--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inventory overview"</h1>
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
                    <StatCard label="SKUs" icon_name="products" value=figure(|o| o.sku_count() as f64) format=ValueFormat::Integer />
                    <StatCard
                        label="Units on hand"
                        icon_name="inventory"
                        value=figure(|o| o.total_units as f64)
                        format=ValueFormat::Integer
                        subtitle=Signal::derive(move || overview.with(|o| o.as_ref().map(|o| {
                            format!("{} available, {} reserved", format_number_int(o.available_units as f64), format_number_int(o.reserved_units as f64))
                        })))
                    />
                    <StatCard label="Stock value" icon_name="wallet" value=figure(|o| o.stock_value) format=ValueFormat::money(&currency) />
                    <StatCard
                        label="Low stock"
                        icon_name="alert-triangle"
                        value=low
                        format=ValueFormat::Integer
                        status=Signal::derive(move || if low.get().unwrap_or(0.0) > 0.0 { IndicatorStatus::Warning } else { IndicatorStatus::Good })
                    />
                    <StatCard
                        label="Out of stock"
                        icon_name="alert-triangle"
                        value=out
                        format=ValueFormat::Integer
                        status=Signal::derive(move || IndicatorStatus::lower_is_better(out.get().unwrap_or(0.0), 0.0))
                    />
                </div>

                <div class="dashboard-grid">
                    <div class="dashboard-block">
                        <h3 class="dashboard-block__title">"By warehouse"</h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Warehouse"</th>
                                    <th class="text-right">"SKUs"</th>
                                    <th class="text-right">"Units"</th>
                                    <th class="text-right">"Available"</th>
                                    <th class="text-right">"Value"</th>
                                    <th class="text-right">"Utilization"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || overview.get().map(|o| o.by_warehouse.into_iter().map(|w| view! {
                                    <tr>
                                        <td>{w.name.clone()}</td>
                                        <td class="text-right">{w.sku_count}</td>
                                        <td class="text-right">{format_number_int(w.units as f64)}</td>
                                        <td class="text-right">{format_number_int(w.available as f64)}</td>
                                        <td class="text-right">{format!("{}{}", symbol.get_value(), format_money(w.value))}</td>
                                        <td class=utilization_class(w.utilization)>{format_percent(w.utilization)}</td>
                                    </tr>
                                }).collect_view())}
                            </tbody>
                        </table>
                    </div>

                    <div class="dashboard-block dashboard-block--wide">
                        <h3 class="dashboard-block__title">
                            "Reorder"
                            {move || overview.with(|o| o.as_ref().filter(|o| o.reorder.len() > REORDER_ROWS).map(|o| {
                                format!(" (top {} of {})", REORDER_ROWS, o.reorder.len())
                            }))}
                        </h3>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"SKU"</th>
                                    <th>"Item"</th>
                                    <th>"Warehouse"</th>
                                    <th class="text-right">"Available"</th>
                                    <th class="text-right">"Reorder point"</th>
                                    <th class="text-right">"Shortfall"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let lines = overview.with(|o| o.as_ref().map(|o| o.reorder.clone()).unwrap_or_default());
                                    if lines.is_empty() {
                                        return view! { <tr><td colspan="7" class="text-muted">"Every SKU is above its reorder point"</td></tr> }.into_any();
                                    }
                                    lines.into_iter().take(REORDER_ROWS).map(|line| view! {
                                        <tr>
                                            <td>{line.sku.clone()}</td>
                                            <td>{line.name.clone()}</td>
                                            <td>{line.warehouse.clone()}</td>
                                            <td class="text-right">{line.available}</td>
                                            <td class="text-right">{line.reorder_point}</td>
                                            <td class="text-right"><strong>{line.shortfall}</strong></td>
                                            <td><Badge variant=line.status.badge_variant().to_string()>{line.status.label()}</Badge></td>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_class() {
        assert_eq!(utilization_class(None), "text-right");
        assert_eq!(utilization_class(Some(50.0)), "text-right");
        assert_eq!(utilization_class(Some(95.0)), "text-right text-warning");
        assert_eq!(utilization_class(Some(120.0)), "text-right text-error");
    }
}
