pub mod approvals;
pub mod batches;
pub mod traceability;
pub mod wip;

use crate::domain::a012_production::store::use_production_store;
use crate::layout::notifications::use_notifications;
use crate::shared::api::{fetch_one, patch_json, ApiError};
use crate::shared::components::Badge;
use crate::shared::date_utils::{format_opt_date, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::confirm_action;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use approvals::ApprovalPanel;
use batches::BatchPanel;
use contracts::domain::a012_production::aggregate::{ProductionOrder, ProductionStatus};
use contracts::domain::common::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use thaw::*;
use traceability::TraceabilitySearch;
use wip::WipPanel;

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: ProductionStatus,
}

async fn update_status(id: &str, status: ProductionStatus) -> Result<ProductionOrder, ApiError> {
    patch_json(ProductionOrder::endpoint(), id, &StatusUpdate { status }).await
}

#[component]
pub fn ProductionOrderDetail(id: String, on_close: Callback<()>) -> impl IntoView {
    let store = use_production_store();
    let notifications = use_notifications();
    let order = RwSignal::new(None::<ProductionOrder>);
    let error = RwSignal::new(None::<String>);

    {
        let id = id.clone();
        spawn_local(async move {
            match fetch_one::<ProductionOrder>(ProductionOrder::endpoint(), &id).await {
                Ok(loaded) => {
                    store.ensure(&loaded);
                    order.set(Some(loaded));
                }
                Err(e) => {
                    log::error!("production order {}: {}", id, e);
                    error.set(Some(format!("Cannot load production order: {}", e)));
                }
            }
        });
    }

    let loaded_id = Memo::new(move |_| order.with(|o| o.as_ref().map(|o| o.id.clone())));
    let status = Memo::new(move |_| order.with(|o| o.as_ref().map(|o| store.status(o))));
    let can_cancel = Memo::new(move |_| {
        status
            .get()
            .is_some_and(|s| s.can_transition(ProductionStatus::Cancelled))
    });

    let cancel_order = move || {
        let Some(current) = order.get_untracked() else {
            return;
        };
        if !confirm_action(&format!("Cancel production order {}?", current.order_number)) {
            return;
        }
        let from = store.status(&current);
        if let Err(e) = from.transition(ProductionStatus::Cancelled) {
            notifications.error(e.to_string());
            return;
        }
        spawn_local(async move {
            match update_status(&current.id, ProductionStatus::Cancelled).await {
                Ok(updated) => {
                    notifications.success(format!("Production order {} cancelled", updated.order_number));
                    order.set(Some(updated));
                }
                Err(e) => notifications.error(format!("Cannot cancel production order: {}", e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a012_production_order--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || order.with(|o| o.as_ref().map(|o| o.order_number.clone()).unwrap_or_else(|| ProductionOrder::element_name().to_string()))}
                    </h1>
                    {move || status.get().map(|s| view! {
                        <Badge variant=s.badge_variant().to_string()>{s.label()}</Badge>
                    })}
                </div>
                <div class="page__header-right">
                    <Show when=move || can_cancel.get()>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel_order()>
                            {icon("delete")}
                            " Cancel order"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="page__content">
                {move || order.get().map(|o| {
                    let overdue = o.is_overdue(today());
                    view! {
                        <div class="details-container">
                            <div class="details-summary">
                                <div class="summary-item">
                                    <span class="summary-item__label">"Product"</span>
                                    <span class="summary-item__value">{o.product_label()}</span>
                                </div>
                                <div class="summary-item">
                                    <span class="summary-item__label">"Quantity"</span>
                                    <span class="summary-item__value">{o.quantity}</span>
                                </div>
                                <div class="summary-item">
                                    <span class="summary-item__label">"Factory"</span>
                                    <span class="summary-item__value">{o.factory.clone().unwrap_or_else(|| "—".to_string())}</span>
                                </div>
                                <div class="summary-item">
                                    <span class="summary-item__label">"Start"</span>
                                    <span class="summary-item__value">{format_opt_date(o.start_date.as_deref())}</span>
                                </div>
                                <div class="summary-item">
                                    <span class="summary-item__label">"Due"</span>
                                    <span class={if overdue { "summary-item__value text-error" } else { "summary-item__value" }}>
                                        {format_opt_date(o.due_date.as_deref())}
                                    </span>
                                </div>
                            </div>
                        </div>
                    }
                })}

                {move || loaded_id.get().and_then(|_| order.get_untracked()).map(|o| {
                    view! {
                        <ApprovalPanel order=o.clone() />
                        <WipPanel order=o.clone() />
                        <BatchPanel order=o />
                    }
                })}

                <TraceabilitySearch />
            </div>
        </PageFrame>
    }
}
