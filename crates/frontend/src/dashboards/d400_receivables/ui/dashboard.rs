use crate::dashboards::d400_receivables::api;
use crate::dashboards::ledger::{AgingTable, CounterpartyTable, LedgerSignals, StatusTable};
use crate::shared::components::StatCard;
use crate::shared::config::use_config;
use crate::shared::date_utils::today;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d400_receivables::dto::{ReceivablesSummary, DSO_PERIOD_DAYS};
use contracts::domain::a008_proforma_invoice::aggregate::ProformaInvoice;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Collection rate at or above this is healthy
const COLLECTION_GOOD_PERCENT: f64 = 80.0;
const COLLECTION_WARNING_PERCENT: f64 = 50.0;
/// Overdue share of the open balance that turns the card red
const OVERDUE_WARNING_PERCENT: f64 = 20.0;

#[component]
pub fn ReceivablesDashboard() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let (thresholds, due_soon_days) =
        config.config.with_untracked(|c| (c.finance.thresholds(), c.finance.due_soon_days));
    let today = today();

    let invoices = RwSignal::new(None::<Vec<ProformaInvoice>>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let listing = api::load_invoices(config.page_size()).await;
            if let Some(e) = listing.failure {
                error.set(Some(format!("Cannot load invoices, showing an empty ledger: {}", e)));
            }
            invoices.set(Some(listing.items));
            loading.set(false);
        });
    };
    load();

    let summary = Memo::new(move |_| {
        invoices.with(|inv| {
            inv.as_ref()
                .map(|inv| ReceivablesSummary::compute(inv, today, &thresholds, due_soon_days))
        })
    });
    let ledger = LedgerSignals {
        summary: Memo::new(move |_| summary.with(|s| s.as_ref().map(|s| s.ledger.clone()))),
    };
    let overdue_share = ledger.optional(|l| l.overdue_share());

    view! {
        <PageFrame page_id="d400_receivables--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Receivables"</h1>
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
                        icon_name="invoices"
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
                            IndicatorStatus::lower_is_better(overdue_share.get().unwrap_or(0.0), OVERDUE_WARNING_PERCENT)
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
                        label="Collection rate"
                        icon_name="percent"
                        value=ledger.optional(|l| l.collection_rate)
                        format=ValueFormat::percent()
                        status=Signal::derive(move || IndicatorStatus::higher_is_better(
                            ledger.summary.with(|s| s.as_ref().and_then(|l| l.collection_rate)),
                            COLLECTION_GOOD_PERCENT,
                            COLLECTION_WARNING_PERCENT,
                        ))
                    />
                    <StatCard
                        label="DSO"
                        icon_name="clock"
                        value=Signal::derive(move || summary.with(|s| s.as_ref().and_then(|s| s.dso)))
                        format=ValueFormat::Number { decimals: 0 }
                        subtitle=Signal::derive(move || Some(format!("days, last {} days of sales", DSO_PERIOD_DAYS)))
                    />
                </div>

                <div class="dashboard-grid">
                    <AgingTable aging=ledger.aging() currency=currency.clone() />
                    <StatusTable breakdown=ledger.by_status() currency=currency.clone() />
                    <CounterpartyTable title="Top debtors" column="Customer" rows=ledger.top() currency=currency.clone() />
                </div>
            </div>
        </PageFrame>
    }
}
