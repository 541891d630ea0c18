use crate::dashboards::d401_payables::api;
use crate::dashboards::ledger::{AgingTable, CounterpartyTable, LedgerSignals, StatusTable};
use crate::shared::components::StatCard;
use crate::shared::config::use_config;
use crate::shared::date_utils::today;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d401_payables::dto::PayablesSummary;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Late deliveries above this count turn the card red
const LATE_DELIVERIES_WARNING: f64 = 2.0;

#[component]
pub fn PayablesDashboard() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let (thresholds, due_soon_days) =
        config.config.with_untracked(|c| (c.finance.thresholds(), c.finance.due_soon_days));
    let today = today();

    let orders = RwSignal::new(None::<Vec<PurchaseOrder>>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let listing = api::load_purchase_orders(config.page_size()).await;
            if let Some(e) = listing.failure {
                error.set(Some(format!("Cannot load purchase orders, showing an empty ledger: {}", e)));
            }
            orders.set(Some(listing.items));
            loading.set(false);
        });
    };
    load();

    let summary = Memo::new(move |_| {
        orders.with(|po| {
            po.as_ref()
                .map(|po| PayablesSummary::compute(po, today, &thresholds, due_soon_days))
        })
    });
    let ledger = LedgerSignals {
        summary: Memo::new(move |_| summary.with(|s| s.as_ref().map(|s| s.ledger.clone()))),
    };
    let late = Signal::derive(move || summary.with(|s| s.as_ref().map(|s| s.late_deliveries as f64)));

    view! {
        <PageFrame page_id="d401_payables--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Payables"</h1>
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
                        label="Outstanding"
                        icon_name="payments"
                        value=ledger.value(|l| l.outstanding)
                        format=ValueFormat::money(&currency)
                        subtitle=ledger.caption(|l| (l.document_count, l.total_billed), currency.clone())
                    />
                    <StatCard
                        label="Overdue"
                        icon_name="alert-triangle"
                        value=ledger.value(|l| l.overdue_amount)
                        format=ValueFormat::money(&currency)
                        status=Signal::derive(move || {
                            let overdue = ledger.summary.with(|s| s.as_ref().map_or(0.0, |l| l.overdue_amount));
                            IndicatorStatus::lower_is_better(overdue, 0.0)
                        })
                        subtitle=ledger.caption(|l| (l.overdue_count, l.overdue_amount), currency.clone())
                    />
                    <StatCard
                        label=format!("Due in {} days", due_soon_days)
                        icon_name="calendar"
                        value=ledger.value(|l| l.due_soon_amount)
                        format=ValueFormat::money(&currency)
                        subtitle=ledger.caption(|l| (l.due_soon_count, l.due_soon_amount), currency.clone())
                    />
                    <StatCard
                        label="Committed spend"
                        icon_name="purchases"
                        value=Signal::derive(move || summary.with(|s| s.as_ref().map(|s| s.committed_spend)))
                        format=ValueFormat::money(&currency)
                        subtitle=Signal::derive(move || summary.with(|s| s.as_ref().map(|s| format!("{} open orders", s.open_orders))))
                    />
                    <StatCard
                        label="Late deliveries"
                        icon_name="shipments"
                        value=late
                        format=ValueFormat::Integer
                        status=Signal::derive(move || IndicatorStatus::lower_is_better(late.get().unwrap_or(0.0), LATE_DELIVERIES_WARNING))
                    />
                </div>

                <div class="dashboard-grid">
                    <AgingTable aging=ledger.aging() currency=currency.clone() />
                    <StatusTable breakdown=ledger.by_status() currency=currency.clone() />
                    <CounterpartyTable title="Top creditors" column="Supplier" rows=ledger.top() currency=currency.clone() />
                </div>
            </div>
        </PageFrame>
    }
}
