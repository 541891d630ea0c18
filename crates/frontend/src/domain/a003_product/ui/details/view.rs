use super::view_model::{ProductDetailsViewModel, PRODUCT_STATUSES};
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::{format_money, format_percent};
use crate::shared::config::use_config;
use crate::shared::form_utils::{opt_text, parse_f64_or_zero};
use crate::shared::icons::icon;
use contracts::domain::a003_product::aggregate::parse_list_field;
use leptos::prelude::*;

#[component]
pub fn ProductDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let config = use_config();
    let notifications = use_notifications();
    let vm = ProductDetailsViewModel::new();
    vm.load(id, config.page_size());

    view! {
        <div class="details-container product-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit product" } else { "New product" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-form">
                <div class="form-row">
                    <div class="form-group">
                        <label for="sku">"SKU"</label>
                        <input
                            type="text"
                            id="sku"
                            prop:value=move || vm.form.get().sku
                            on:input=move |ev| vm.form.update(|f| f.sku = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="name">"Name"</label>
                        <input
                            type="text"
                            id="name"
                            prop:value=move || vm.form.get().name
                            on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="category">"Category"</label>
                        <input
                            type="text"
                            id="category"
                            prop:value=move || vm.form.get().category.unwrap_or_default()
                            on:input=move |ev| vm.form.update(|f| f.category = opt_text(&event_target_value(&ev)))
                        />
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
                                        view! {
                                            <option value=c.id.clone() selected=is_selected>
                                                {format!("{} ({})", c.name, c.season_label())}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="status">"Status"</label>
                        <select
                            id="status"
                            on:change=move |ev| vm.form.update(|f| f.status = opt_text(&event_target_value(&ev)))
                        >
                            {move || {
                                let current = vm.form.with(|f| f.status.clone().unwrap_or_default());
                                PRODUCT_STATUSES
                                    .into_iter()
                                    .map(|s| view! { <option value=s selected={current == s}>{s}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="price">"Retail price"</label>
                        <input
                            type="number"
                            id="price"
                            min="0"
                            step="0.01"
                            prop:value=move || vm.form.get().price.to_string()
                            on:change=move |ev| vm.form.update(|f| f.price = parse_f64_or_zero(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label for="cost">"Unit cost"</label>
                        <input
                            type="number"
                            id="cost"
                            min="0"
                            step="0.01"
                            prop:value=move || vm.form.get().cost.to_string()
                            on:change=move |ev| vm.form.update(|f| f.cost = parse_f64_or_zero(&event_target_value(&ev)))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Margin"</label>
                        <div class="form-static">
                            {move || format_percent(vm.margin())}
                            " · profit "
                            {move || vm.form.with(|f| format_money(f.price - f.cost))}
                        </div>
                    </div>
                </div>

                <div class="form-group">
                    <label for="sizes">"Sizes (comma separated)"</label>
                    <input
                        type="text"
                        id="sizes"
                        placeholder="XS, S, M, L, XL"
                        prop:value=move || vm.form.get().sizes.join(", ")
                        on:change=move |ev| vm.form.update(|f| f.sizes = parse_list_field(&event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="colors">"Colors (comma separated)"</label>
                    <input
                        type="text"
                        id="colors"
                        prop:value=move || vm.form.get().colors.join(", ")
                        on:change=move |ev| vm.form.update(|f| f.colors = parse_list_field(&event_target_value(&ev)))
                    />
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
