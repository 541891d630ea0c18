use super::view_model::SupplierDetailsViewModel;
use crate::layout::notifications::use_notifications;
use crate::shared::form_utils::{opt_text, opt_to_input, parse_opt_f64, parse_opt_u32};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn SupplierDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = SupplierDetailsViewModel::new();
    vm.load_if_needed(id);
    let notifications = use_notifications();

    view! {
        <div class="details-container supplier-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit supplier" } else { "New supplier" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        placeholder="Company name"
                    />
                </div>

                <div class="form-group">
                    <label for="contact_name">"Contact"</label>
                    <input
                        type="text"
                        id="contact_name"
                        prop:value=move || vm.form.get().contact_name.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.contact_name = opt_text(&event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        prop:value=move || vm.form.get().email.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.email = opt_text(&event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="phone">"Phone"</label>
                    <input
                        type="text"
                        id="phone"
                        prop:value=move || vm.form.get().phone.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.phone = opt_text(&event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="country">"Country"</label>
                    <input
                        type="text"
                        id="country"
                        prop:value=move || vm.form.get().country.unwrap_or_default()
                        on:input=move |ev| vm.form.update(|f| f.country = opt_text(&event_target_value(&ev)))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="payment_terms_days">"Payment terms, days"</label>
                        <input
                            type="number"
                            id="payment_terms_days"
                            min="0"
                            prop:value=move || opt_to_input(vm.form.get().payment_terms_days)
                            on:input=move |ev| vm.form.update(|f| f.payment_terms_days = parse_opt_u32(&event_target_value(&ev)))
                        />
                    </div>

                    <div class="form-group">
                        <label for="lead_time_days">"Lead time, days"</label>
                        <input
                            type="number"
                            id="lead_time_days"
                            min="0"
                            prop:value=move || opt_to_input(vm.form.get().lead_time_days)
                            on:input=move |ev| vm.form.update(|f| f.lead_time_days = parse_opt_u32(&event_target_value(&ev)))
                        />
                    </div>

                    <div class="form-group">
                        <label for="rating">"Rating (0-5)"</label>
                        <input
                            type="number"
                            id="rating"
                            min="0"
                            max="5"
                            step="0.1"
                            prop:value=move || opt_to_input(vm.form.get().rating)
                            on:input=move |ev| vm.form.update(|f| f.rating = parse_opt_f64(&event_target_value(&ev)))
                        />
                    </div>
                </div>

                <div class="form-group form-group--inline">
                    <input
                        type="checkbox"
                        id="active"
                        prop:checked=move || vm.form.get().active
                        on:change=move |ev| vm.form.update(|f| f.active = event_target_checked(&ev))
                    />
                    <label for="active">"Active"</label>
                </div>
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
