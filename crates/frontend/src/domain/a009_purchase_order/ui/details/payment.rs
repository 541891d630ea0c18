use super::model;
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::format_money;
use crate::shared::config::use_config;
use crate::shared::form_utils::parse_opt_f64;
use crate::shared::icons::icon;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::shared::finance::FinancialDocument;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Records a payment against the open balance of a purchase order.
#[component]
pub fn PaymentForm(
    order: PurchaseOrder,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let currency = use_config().currency();
    let notifications = use_notifications();

    let open = order.outstanding();
    let amount = RwSignal::new(format!("{:.2}", open));
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let title = format!("Payment for {} · {}", order.po_number, order.counterparty());
    let order = StoredValue::new(order);

    let submit = move || {
        let po = order.get_value();
        let entered = parse_opt_f64(&amount.get_untracked()).unwrap_or(0.0);
        let new_paid = match po.validate_payment(entered) {
            Ok(paid) => paid,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match model::record_payment(&po.id, new_paid).await {
                Ok(_) => {
                    notifications.success(format!("Payment recorded on {}", po.po_number));
                    on_saved.run(());
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    notifications.error(format!("Cannot record payment: {}", e));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="details-container payment-form">
            <div class="details-header">
                <h3>{title}</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-static">
                    {format!("Outstanding: {}{}", currency, format_money(open))}
                </div>
                <div class="form-group">
                    <label for="payment_amount">"Amount"</label>
                    <input
                        type="number"
                        id="payment_amount"
                        min="0"
                        step="0.01"
                        prop:value=move || amount.get()
                        on:input=move |ev| amount.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| submit()
                    disabled=move || saving.get()
                >
                    {icon("check")}
                    "Record payment"
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {icon("x")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
