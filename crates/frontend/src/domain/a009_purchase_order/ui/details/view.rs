use super::view_model::{PurchaseOrderDetailsViewModel, PO_STATUSES};
use crate::layout::notifications::use_notifications;
use crate::shared::config::use_config;
use crate::shared::form_utils::{opt_text, parse_f64_or_zero};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn PurchaseOrderDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let config = use_config();
    let notifications = use_notifications();
    let vm = PurchaseOrderDetailsViewModel::new();
    vm.load(id, config.page_size());

    view! {
        <div class="details-container purchase-order-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit purchase order" } else { "New purchase order" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-row">
                    <div class="form-group">
                        <label for="po_number">"PO number"</label>
                        <input
                            type="text"
                            id="po_number"
                            prop:value=move || vm.form.get().po_number
                            on:input=move |ev| vm.form.update(|f| f.po_number = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="status">"Status"</label>
                        <select
                            id="status"
                            on:change=move |ev| vm.form.update(|f| f.status = opt_text(&event_target_value(&ev)))
                        >
                            {move || {
                                let current = vm.form.with(|f| f.status.clone().unwrap_or_default());
                                PO_STATUSES
                                    .into_iter()
                                    .map(|s| view! { <option value=s selected={current == s}>{s}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="supplier">"Supplier"</label>
                        <select id="supplier" on:change=move |ev| vm.select_supplier(event_target_value(&ev))>
                            <option value="">"—"</option>
                            {move || {
                                let current = vm.form.with(|f| f.supplier_id.clone());
                                vm.suppliers
                                    .get()
                                    .into_iter()
                                    .map(|s| {
                                        let is_selected = current.as_deref() == Some(s.id.as_str());
                                        view! { <option value=s.id.clone() selected=is_selected>{s.name.clone()}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="collection">"Collection"</label>
                        <select
                            id="collection"
                            on:change=move |ev| vm.form.update(|f| f.collection_id = opt_text(&event_target_value(&ev)))
                        >
                            <option value="">"—"</option>
                            {move || {
                                let current = vm.form.with(|f| f.collection_id.clone());
                                vm.collections
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        let is_selected = current.as_deref() == Some(c.id.as_str());
                                        view! { <option value=c.id.clone() selected=is_selected>{c.name.clone()}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="order_date">"Order date"</label>
                        <input
                            type="date"
                            id="order_date"
                            prop:value=move || vm.form.get().order_date
                            on:change=move |ev| vm.form.update(|f| f.order_date = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="due_date">"Payment due"</label>
                        <input
                            type="date"
                            id="due_date"
                            prop:value=move || vm.form.get().due_date.unwrap_or_default()
                            on:change=move |ev| vm.form.update(|f| f.due_date = opt_text(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="expected_delivery">"Expected delivery"</label>
                        <input
                            type="date"
                            id="expected_delivery"
                            prop:value=move || vm.form.get().expected_delivery.unwrap_or_default()
                            on:change=move |ev| vm.form.update(|f| f.expected_delivery = opt_text(&event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="total_amount">"Total"</label>
                        <input
                            type="number"
                            id="total_amount"
                            min="0"
                            step="0.01"
                            prop:value=move || vm.form.get().total_amount.to_string()
                            on:change=move |ev| vm.form.update(|f| f.total_amount = parse_f64_or_zero(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="paid_amount">"Paid"</label>
                        <input
                            type="number"
                            id="paid_amount"
                            min="0"
                            step="0.01"
                            prop:value=move || vm.form.get().paid_amount.to_string()
                            on:change=move |ev| vm.form.update(|f| f.paid_amount = parse_f64_or_zero(&event_target_value(&ev)))
                        />
                    </div>
                </div>

                {move || vm.form.with(|f| f.validate().err()).map(|hint| view! {
                    <div class="form-hint">{hint}</div>
                })}
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(notifications, on_saved)
                    disabled=move || !vm.is_form_valid() || vm.saving.get()
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {icon("x")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
