use crate::shared::api::fetch_list_or_empty;
use crate::shared::components::table::{format_percent, SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::date_utils::format_opt_date;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::dashboards::d405_open_to_buy::dto::{CollectionBudget, OpenToBuyReport};
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

pub fn utilization_variant(budget: &CollectionBudget) -> &'static str {
    match budget.utilization {
        _ if budget.is_over_budget() => "error",
        Some(u) if u >= 90.0 => "warning",
        Some(_) => "success",
        None => "neutral",
    }
}

#[component]
pub fn CollectionList() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();

    let list = ListController::<Collection>::new(
        TableQuery::sorted_by("launch_date", false).with_page_size(config.page_size()),
    );
    let purchase_orders = RwSignal::new(Vec::<PurchaseOrder>::new());

    let load = move || {
        list.load(Collection::endpoint(), config.page_size());
        spawn_local(async move {
            purchase_orders.set(fetch_list_or_empty(PurchaseOrder::endpoint(), config.page_size()).await);
        });
    };
    load();

    let budgets = Memo::new(move |_| {
        let report = list.state.with(|s| {
            purchase_orders.with(|pos| OpenToBuyReport::compute(&s.items, pos))
        });
        report
            .rows
            .into_iter()
            .map(|row| (row.collection_id.clone(), row))
            .collect::<HashMap<String, CollectionBudget>>()
    });

    let page = list.page();

    view! {
        <PageFrame page_id="a006_collection--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Collection::list_name()}</h1>
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
                                placeholder="Name or season..."
                            />
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
                                <SortableHeaderCell label="Season" sort_field="season" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Launch" sort_field="launch_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                                <SortableHeaderCell label="Budget" sort_field="budget" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <TableHeaderCell min_width=120.0>"Committed"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Remaining"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Used"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Open to buy"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|c| c.id.clone()
                                children=move |collection: Collection| {
                                    let budget = collection.budget;
                                    let id = StoredValue::new(collection.id.clone());
                                    let row = Memo::new(move |_| budgets.with(|b| b.get(&id.get_value()).cloned()));

                                    let name = collection.name.clone();
                                    let season = collection.season_label();
                                    let launch_date = format_opt_date(collection.launch_date.as_deref());
                                    let status = collection.status.clone().unwrap_or_default();
                                    let currency = currency.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{season}</TableCell>
                                            <TableCell>{launch_date}</TableCell>
                                            <TableCell>{status}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(budget)) currency=currency.clone() show_currency=true />
                                            <TableCellMoney value=Signal::derive(move || row.get().map(|r| r.committed)) />
                                            <TableCellMoney value=Signal::derive(move || row.get().map(|r| r.remaining)) color_by_sign=true />
                                            <TableCell>
                                                {move || row.get().map(|r| view! {
                                                    <Badge variant=utilization_variant(&r).to_string()>
                                                        {format_percent(r.utilization)}
                                                    </Badge>
                                                })}
                                            </TableCell>
                                            <TableCellMoney value=Signal::derive(move || row.get().map(|r| r.open_to_buy)) color_by_sign=true bold=true />
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

    fn budget(budget: f64, committed: f64, utilization: Option<f64>) -> CollectionBudget {
        CollectionBudget {
            collection_id: "c".into(),
            name: "C".into(),
            season: "SS 2025".into(),
            budget,
            committed,
            purchase_orders: 1,
            remaining: budget - committed,
            utilization,
            open_to_buy: 0.0,
        }
    }

    #[test]
    fn test_utilization_variant() {
        assert_eq!(utilization_variant(&budget(100.0, 120.0, Some(120.0))), "error");
        assert_eq!(utilization_variant(&budget(100.0, 95.0, Some(95.0))), "warning");
        assert_eq!(utilization_variant(&budget(100.0, 50.0, Some(50.0))), "success");
        assert_eq!(utilization_variant(&budget(0.0, 0.0, None)), "neutral");
    }
}
