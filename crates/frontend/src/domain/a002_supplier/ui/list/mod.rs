use crate::domain::a002_supplier::ui::details::{delete_by_id, SupplierDetails};
use crate::layout::notifications::use_notifications;
use crate::layout::{Modal, ModalService};
use crate::shared::components::table::{format_number_with_decimals, SortableHeaderCell};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::{confirm_action, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn days_label(days: Option<u32>) -> String {
    days.map(|d| format!("{} d", d)).unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn SupplierList() -> impl IntoView {
    let config = use_config();
    let notifications = use_notifications();

    let list = ListController::<Supplier>::new(
        TableQuery::sorted_by("name", true).with_page_size(config.page_size()),
    );
    let show_inactive = RwSignal::new(false);

    let modal = ModalService::new();
    provide_context(modal);
    // None: create, Some(id): edit
    let editing_id = RwSignal::new(None::<String>);

    let load = move || list.load(Supplier::endpoint(), config.page_size());
    load();

    let page = list.page_where(move |s: &Supplier| show_inactive.get() || s.active);

    let open_form = move |id: Option<String>| {
        editing_id.set(id);
        modal.show();
    };

    let delete_supplier = move |supplier: Supplier| {
        if !confirm_action(&format!("Delete supplier \"{}\"?", supplier.name)) {
            return;
        }
        spawn_local(async move {
            match delete_by_id(&supplier.id).await {
                Ok(()) => {
                    notifications.success(format!("Supplier \"{}\" deleted", supplier.name));
                    load();
                }
                Err(e) => notifications.error(format!("Cannot delete supplier: {}", e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a002_supplier--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Supplier::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.get().total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_form(None)>
                        {icon("plus")}
                        " New supplier"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <SearchInput
                                value=list.search()
                                on_change=list.on_search()
                                placeholder="Name, contact, email, country..."
                            />
                            <label class="filter-checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || show_inactive.get()
                                    on:change=move |ev| {
                                        show_inactive.set(event_target_checked(&ev));
                                        list.reset_page();
                                    }
                                />
                                " Show inactive"
                            </label>
                        </div>

                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || page.get().page)
                                total_pages=Signal::derive(move || page.get().total_pages)
                                total_count=Signal::derive(move || page.get().total_count)
                                page_size=Signal::derive(move || page.get().page_size)
                                on_page_change=list.on_page_change()
                                on_page_size_change=list.on_page_size_change()
                            />
                        </div>

                        <div class="filter-panel-header__right">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| load()
                                disabled=Signal::derive(move || list.loading.get())
                            >
                                {move || if list.loading.get() { "Loading..." } else { "Refresh" }}
                            </Button>
                        </div>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Name" sort_field="name" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <TableHeaderCell min_width=140.0>"Contact"</TableHeaderCell>
                                <TableHeaderCell min_width=180.0>"Email"</TableHeaderCell>
                                <SortableHeaderCell label="Country" sort_field="country" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <SortableHeaderCell label="Terms" sort_field="payment_terms_days" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <SortableHeaderCell label="Lead time" sort_field="lead_time_days" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 align="right" />
                                <SortableHeaderCell label="Rating" sort_field="rating" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=80.0 align="right" />
                                <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|s| s.id.clone()
                                children=move |supplier: Supplier| {
                                    let id = supplier.id.clone();
                                    let supplier_for_delete = supplier.clone();
                                    let (status, variant) = if supplier.active {
                                        ("Active", "success")
                                    } else {
                                        ("Inactive", "neutral")
                                    };

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_form(Some(id.clone()));
                                                        }
                                                    >
                                                        {supplier.name.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{supplier.contact_name.clone().unwrap_or_default()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{supplier.email.clone().unwrap_or_default()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{supplier.country.clone().unwrap_or_default()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="text-right">{days_label(supplier.payment_terms_days)}</TableCell>
                                            <TableCell class="text-right">{days_label(supplier.lead_time_days)}</TableCell>
                                            <TableCell class="text-right">
                                                {supplier.rating.map(|r| format_number_with_decimals(r, 1)).unwrap_or_else(|| "—".to_string())}
                                            </TableCell>
                                            <TableCell>
                                                <Badge variant=variant.to_string()>{status}</Badge>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| delete_supplier(supplier_for_delete.clone())
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>

            <Modal>
                {move || view! {
                    <SupplierDetails
                        id=editing_id.get()
                        on_saved=Callback::new(move |_| {
                            modal.hide();
                            load();
                        })
                        on_cancel=Callback::new(move |_| modal.hide())
                    />
                }}
            </Modal>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_label() {
        assert_eq!(days_label(Some(30)), "30 d");
        assert_eq!(days_label(None), "—");
    }
}
