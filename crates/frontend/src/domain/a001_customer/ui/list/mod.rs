use crate::domain::a001_customer::ui::profile::CustomerProfile;
use crate::layout::{Modal, ModalService};
use crate::shared::components::table::{format_number_int, SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::date_utils::format_opt_date;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_customer::aggregate::{Customer, LoyaltyTier};
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn CustomerList() -> impl IntoView {
    let config = use_config();
    let program = config.config.with_untracked(|c| c.loyalty.program());
    let currency = config.currency();

    let list = ListController::<Customer>::new(
        TableQuery::sorted_by("total_spent", false).with_page_size(config.page_size()),
    );
    let tier_filter = RwSignal::new(String::new());

    let modal = ModalService::new();
    provide_context(modal);
    let selected = RwSignal::new(None::<Customer>);

    let load = move || list.load(Customer::endpoint(), config.page_size());
    load();

    let page = list.page_where(move |c: &Customer| {
        let tier = tier_filter.get();
        tier.is_empty() || c.tier(&program).label() == tier
    });

    let open_profile = move |customer: Customer| {
        selected.set(Some(customer));
        modal.show();
    };

    view! {
        <PageFrame page_id="a001_customer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Customer::list_name()}</h1>
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
                                placeholder="Name, email, phone, city..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    tier_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All tiers"</option>
                                {[LoyaltyTier::Bronze, LoyaltyTier::Silver, LoyaltyTier::Gold, LoyaltyTier::Platinum]
                                    .into_iter()
                                    .map(|t| view! { <option value=t.label()>{t.label()}</option> })
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
                    <Table attr:style="width: 100%; min-width: 1100px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Name" sort_field="name" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <SortableHeaderCell label="Email" sort_field="email" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <TableHeaderCell min_width=140.0>"Location"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Segment"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Tier"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Points"</TableHeaderCell>
                                <SortableHeaderCell label="Orders" sort_field="orders_count" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=80.0 align="right" />
                                <SortableHeaderCell label="Total spent" sort_field="total_spent" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <SortableHeaderCell label="Avg. order" sort_field="average_order_value" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 align="right" />
                                <SortableHeaderCell label="Last order" sort_field="last_order_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|c| c.id.clone()
                                children=move |customer: Customer| {
                                    let tier = customer.tier(&program);
                                    let points = customer.points(&program);
                                    let total_spent = customer.total_spent;
                                    let aov = customer.average_order_value();
                                    let name = customer.name.clone();
                                    let customer_for_click = customer.clone();
                                    let email = customer.email.clone().unwrap_or_default();
                                    let location = customer.location();
                                    let segment = customer.segment.clone().unwrap_or_default();
                                    let orders_count = customer.orders_count;
                                    let last_order_date = format_opt_date(customer.last_order_date.as_deref());
                                    let currency = currency.clone();

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_profile(customer_for_click.clone());
                                                        }
                                                    >
                                                        {name}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {email}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{location}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{segment}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Badge variant=tier.badge_variant().to_string()>{tier.label()}</Badge>
                                            </TableCell>
                                            <TableCell class="text-right">{format_number_int(points as f64)}</TableCell>
                                            <TableCell class="text-right">{orders_count}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(total_spent)) currency=currency.clone() show_currency=true />
                                            <TableCellMoney value=Signal::derive(move || Some(aov)) />
                                            <TableCell>
                                                <TableCellLayout>{last_order_date}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>

            <Modal class="modal-content--wide">
                {move || selected.get().map(|customer| view! {
                    <CustomerProfile customer=customer on_close=Callback::new(move |_| modal.hide()) />
                })}
            </Modal>
        </PageFrame>
    }
}
