use crate::domain::a012_production::store::use_production_store;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::table::{format_percent, SortableHeaderCell};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::date_utils::{format_opt_date, today};
use crate::shared::finance_ui::due_label;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use chrono::NaiveDate;
use contracts::domain::a012_production::aggregate::{ProductionOrder, ProductionStatus};
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use thaw::*;

/// Due column text; closed orders have nothing left to chase.
fn schedule_label(order: &ProductionOrder, today: NaiveDate) -> String {
    if order.status.is_closed() {
        return "—".to_string();
    }
    due_label(order.days_remaining(today).map(|d| -d))
}

#[component]
pub fn ProductionOrderList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let store = use_production_store();
    let config = use_config();
    let today = today();

    let list = ListController::<ProductionOrder>::new(
        TableQuery::sorted_by("due_date", true).with_page_size(config.page_size()),
    );
    let status_filter = RwSignal::new(String::new());
    let overdue_only = RwSignal::new(false);

    let load = move || list.load(ProductionOrder::endpoint(), config.page_size());
    load();

    let page = list.page_where(move |o: &ProductionOrder| {
        let status = status_filter.get();
        (status.is_empty() || store.status(o).code() == status)
            && (!overdue_only.get() || o.is_overdue(today))
    });

    let open_detail = move |id: String, number: String| {
        tabs_store.open_tab(
            &ProductionOrder::detail_key(&id),
            &detail_tab_label(ProductionOrder::element_name(), &number),
        );
    };

    view! {
        <PageFrame page_id="a012_production_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{ProductionOrder::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.get().total_count.to_string()}
                    </Badge>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <SearchInput
                                value=list.search()
                                on_change=list.on_search()
                                placeholder="Order #, product, factory..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    status_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All statuses"</option>
                                {ProductionStatus::all()
                                    .into_iter()
                                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                            <label class="filter-checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || overdue_only.get()
                                    on:change=move |ev| {
                                        overdue_only.set(event_target_checked(&ev));
                                        list.reset_page();
                                    }
                                />
                                " Overdue"
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
                                appearance=ButtonAppearance::Primary
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
                                <SortableHeaderCell label="Order #" sort_field="order_number" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 />
                                <SortableHeaderCell label="Product" sort_field="product" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=200.0 />
                                <TableHeaderCell min_width=140.0>"Factory"</TableHeaderCell>
                                <SortableHeaderCell label="Quantity" sort_field="quantity" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <SortableHeaderCell label="Status" sort_field="status" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=130.0 />
                                <TableHeaderCell min_width=90.0>"Packed"</TableHeaderCell>
                                <SortableHeaderCell label="Start" sort_field="start_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Due" sort_field="due_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <TableHeaderCell min_width=110.0>"Schedule"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|o| o.id.clone()
                                children=move |order: ProductionOrder| {
                                    let id = order.id.clone();
                                    let number = order.order_number.clone();
                                    let is_late = order.is_overdue(today);
                                    let progress_id = order.id.clone();
                                    let stored = StoredValue::new(order.clone());

                                    let order_number = order.order_number.clone();
                                    let product = order.product_label();
                                    let factory = order.factory.clone().unwrap_or_else(|| "—".to_string());
                                    let quantity = order.quantity;
                                    let start_date = format_opt_date(order.start_date.as_deref());
                                    let due_date = format_opt_date(order.due_date.as_deref());
                                    let schedule = schedule_label(&order, today);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id.clone(), number.clone());
                                                        }
                                                    >
                                                        {order_number}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{product}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{factory}</TableCell>
                                            <TableCell class="text-right">{quantity}</TableCell>
                                            <TableCell>
                                                {move || {
                                                    let status = stored.with_value(|o| store.status(o));
                                                    view! { <Badge variant=status.badge_variant().to_string()>{status.label()}</Badge> }
                                                }}
                                            </TableCell>
                                            <TableCell class="text-right">
                                                {move || format_percent(store.progress(&progress_id))}
                                            </TableCell>
                                            <TableCell>{start_date}</TableCell>
                                            <TableCell>{due_date}</TableCell>
                                            <TableCell class={if is_late { "text-error" } else { "" }}>
                                                {schedule}
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_label() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut order = ProductionOrder {
            due_date: Some("2024-06-07".into()),
            status: ProductionStatus::InProgress,
            ..Default::default()
        };
        assert_eq!(schedule_label(&order, today), "3 d late");
        order.due_date = Some("2024-06-14".into());
        assert_eq!(schedule_label(&order, today), "due in 4 d");
        order.status = ProductionStatus::Completed;
        assert_eq!(schedule_label(&order, today), "—");
        order.status = ProductionStatus::Draft;
        order.due_date = None;
        assert_eq!(schedule_label(&order, today), "—");
    }
}
