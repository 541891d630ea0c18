use crate::layout::{Modal, ModalService};
use crate::shared::components::table::{format_money, format_number_int, SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::date_utils::{format_date, format_opt_date};
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a007_order::aggregate::{FulfillmentStatus, OrderLine, SalesOrder};
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use std::collections::BTreeSet;
use thaw::*;

fn channels_of(orders: &[SalesOrder]) -> Vec<String> {
    orders
        .iter()
        .map(SalesOrder::channel_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[component]
fn OrderLines(order: SalesOrder, currency: String) -> impl IntoView {
    let total = order.total_amount();
    let lines = order.items.clone();

    view! {
        <div class="details-container order-lines">
            <div class="details-header">
                <h3>{format!("Order {}", order.order_number)}</h3>
                <Badge variant=order.status.badge_variant().to_string()>{order.status.label()}</Badge>
            </div>
            <div class="details-meta">
                <span>{order.customer_label()}</span>
                " · "
                <span>{order.channel_label()}</span>
                " · "
                <span>{format_date(&order.order_date)}</span>
            </div>
            <table class="simple-table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Size"</th>
                        <th class="text-right">"Qty"</th>
                        <th class="text-right">"Price"</th>
                        <th class="text-right">"Discount"</th>
                        <th class="text-right">"Total"</th>
                    </tr>
                </thead>
                <tbody>
                    {lines
                        .into_iter()
                        .map(|line: OrderLine| view! {
                            <tr>
                                <td>{line.product_label()}</td>
                                <td>{line.size.clone().unwrap_or_default()}</td>
                                <td class="text-right">{line.quantity}</td>
                                <td class="text-right">{format_money(line.unit_price)}</td>
                                <td class="text-right">{format_money(line.discount)}</td>
                                <td class="text-right">{format_money(line.line_total())}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="5">"Order total"</td>
                        <td class="text-right"><strong>{format!("{}{}", currency, format_money(total))}</strong></td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

#[component]
pub fn OrderList() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let currency_sv = StoredValue::new(currency.clone());

    let list = ListController::<SalesOrder>::new(
        TableQuery::sorted_by("order_date", false).with_page_size(config.page_size()),
    );
    let status_filter = RwSignal::new(String::new());
    let channel_filter = RwSignal::new(String::new());

    let modal = ModalService::new();
    provide_context(modal);
    let selected = RwSignal::new(None::<SalesOrder>);

    let load = move || list.load(SalesOrder::endpoint(), config.page_size());
    load();

    let channels = Memo::new(move |_| list.state.with(|s| channels_of(&s.items)));

    let page = list.page_where(move |o: &SalesOrder| {
        let status = status_filter.get();
        let channel = channel_filter.get();
        (status.is_empty() || o.status.code() == status)
            && (channel.is_empty() || o.channel_label() == channel)
    });

    let open_order = move |order: SalesOrder| {
        selected.set(Some(order));
        modal.show();
    };

    view! {
        <PageFrame page_id="a007_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{SalesOrder::list_name()}</h1>
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
                                placeholder="Order #, customer, SKU..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    status_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All statuses"</option>
                                {FulfillmentStatus::all()
                                    .into_iter()
                                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    channel_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All channels"</option>
                                {move || channels
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        let value = c.clone();
                                        view! { <option value=value>{c}</option> }
                                    })
                                    .collect_view()}
                            </select>
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
                    <Table attr:style="width: 100%; min-width: 1050px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Order #" sort_field="order_number" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 />
                                <SortableHeaderCell label="Date" sort_field="order_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <SortableHeaderCell label="Customer" sort_field="customer" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <SortableHeaderCell label="Channel" sort_field="channel" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Units" sort_field="units" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=80.0 align="right" />
                                <SortableHeaderCell label="Total" sort_field="total" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <SortableHeaderCell label="Status" sort_field="status" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <TableHeaderCell min_width=110.0>"Shipped"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|o| o.id.clone()
                                children=move |order: SalesOrder| {
                                    let total = order.total_amount();
                                    let order_for_click = order.clone();

                                    let order_number = order.order_number.clone();
                                    let order_date = format_date(&order.order_date);
                                    let customer = order.customer_label();
                                    let channel = order.channel_label();
                                    let units = format_number_int(order.units() as f64);
                                    let status_variant = order.status.badge_variant().to_string();
                                    let status_label = order.status.label();
                                    let shipped_at = format_opt_date(order.shipped_at.as_deref());
                                    let currency = currency.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_order(order_for_click.clone());
                                                        }
                                                    >
                                                        {order_number}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{order_date}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{customer}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{channel}</TableCell>
                                            <TableCell class="text-right">{units}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(total)) currency=currency.clone() show_currency=true />
                                            <TableCell>
                                                <Badge variant=status_variant>{status_label}</Badge>
                                            </TableCell>
                                            <TableCell>{shipped_at}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>

            <Modal class="modal-content--wide">
                {move || selected.get().map(|order| view! {
                    <OrderLines order=order currency=currency_sv.get_value() />
                })}
            </Modal>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_default_to_direct() {
        let orders = vec![
            SalesOrder { channel: Some("web".into()), ..Default::default() },
            SalesOrder { channel: None, ..Default::default() },
            SalesOrder { channel: Some("web".into()), ..Default::default() },
            SalesOrder { channel: Some("wholesale".into()), ..Default::default() },
        ];
        assert_eq!(channels_of(&orders), vec!["direct", "web", "wholesale"]);
    }
}
