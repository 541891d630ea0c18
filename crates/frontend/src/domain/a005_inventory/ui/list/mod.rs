use crate::shared::api::fetch_list_or_empty;
use crate::shared::components::table::{format_number_int, SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a004_warehouse::aggregate::Warehouse;
use contracts::domain::a005_inventory::aggregate::{InventoryItem, StockStatus};
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

/// Filter value for items without a known warehouse
const UNASSIGNED: &str = "__unassigned";

/// Warehouse filter: empty accepts all, `UNASSIGNED` accepts items whose warehouse is unknown.
fn matches_warehouse(item: &InventoryItem, filter: &str, known: &HashMap<String, String>) -> bool {
    match filter {
        "" => true,
        UNASSIGNED => item
            .warehouse_id
            .as_ref()
            .map_or(true, |id| !known.contains_key(id)),
        id => item.warehouse_id.as_deref() == Some(id),
    }
}

#[component]
pub fn InventoryList() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let default_reorder_point = config.config.with_untracked(|c| c.inventory.default_reorder_point);

    let list = ListController::<InventoryItem>::new(
        TableQuery::sorted_by("available", true).with_page_size(config.page_size()),
    );
    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    let warehouse_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());

    let warehouse_names = Memo::new(move |_| {
        warehouses.with(|ws| {
            ws.iter()
                .map(|w| (w.id.clone(), w.display_name()))
                .collect::<HashMap<String, String>>()
        })
    });

    let load = move || {
        list.load(InventoryItem::endpoint(), config.page_size());
        spawn_local(async move {
            warehouses.set(fetch_list_or_empty(Warehouse::endpoint(), config.page_size()).await);
        });
    };
    load();

    let page = list.page_where(move |item: &InventoryItem| {
        let warehouse = warehouse_filter.get();
        let status = status_filter.get();
        let warehouse_ok = warehouse_names.with(|known| matches_warehouse(item, &warehouse, known));
        let status_ok = StockStatus::from_code(&status)
            .map_or(true, |s| item.stock_status(default_reorder_point) == s);
        warehouse_ok && status_ok
    });

    let status_counts = Memo::new(move |_| {
        list.state.with(|s| {
            let mut counts: HashMap<StockStatus, usize> = HashMap::new();
            for item in &s.items {
                *counts.entry(item.stock_status(default_reorder_point)).or_default() += 1;
            }
            counts
        })
    });

    view! {
        <PageFrame page_id="a005_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{InventoryItem::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.get().total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    {[StockStatus::InStock, StockStatus::LowStock, StockStatus::OutOfStock]
                        .into_iter()
                        .map(|status| view! {
                            <Badge variant=status.badge_variant().to_string()>
                                {move || format!(
                                    "{}: {}",
                                    status.label(),
                                    status_counts.with(|c| c.get(&status).copied().unwrap_or(0)),
                                )}
                            </Badge>
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <SearchInput
                                value=list.search()
                                on_change=list.on_search()
                                placeholder="SKU, product, size, color..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    warehouse_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All warehouses"</option>
                                {move || warehouses
                                    .get()
                                    .into_iter()
                                    .map(|w| view! { <option value=w.id.clone()>{w.display_name()}</option> })
                                    .collect_view()}
                                <option value=UNASSIGNED>"Unassigned"</option>
                            </select>
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    status_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All stock levels"</option>
                                {[StockStatus::InStock, StockStatus::LowStock, StockStatus::OutOfStock]
                                    .into_iter()
                                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
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
                    <Table attr:style="width: 100%; min-width: 1150px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=110.0>"SKU"</TableHeaderCell>
                                <SortableHeaderCell label="Product" sort_field="product" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=200.0 />
                                <TableHeaderCell min_width=140.0>"Warehouse"</TableHeaderCell>
                                <SortableHeaderCell label="Size" sort_field="size" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=70.0 />
                                <SortableHeaderCell label="On hand" sort_field="quantity" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <SortableHeaderCell label="Reserved" sort_field="reserved" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <SortableHeaderCell label="Available" sort_field="available" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <TableHeaderCell min_width=90.0>"Reorder at"</TableHeaderCell>
                                <SortableHeaderCell label="Stock value" sort_field="stock_value" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <TableHeaderCell min_width=110.0>"Status"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|item| item.id.clone()
                                children=move |item: InventoryItem| {
                                    let status = item.stock_status(default_reorder_point);
                                    let stock_value = item.stock_value();
                                    let warehouse_id = item.warehouse_id.clone();
                                    let warehouse = move || {
                                        warehouse_id
                                            .as_ref()
                                            .and_then(|id| warehouse_names.with(|names| names.get(id).cloned()))
                                            .unwrap_or_else(|| "Unassigned".to_string())
                                    };

                                    let sku = item.sku.clone();
                                    let display_name = item.display_name();
                                    let size = item.size.clone().unwrap_or_default();
                                    let quantity = format_number_int(item.quantity as f64);
                                    let reserved = format_number_int(item.reserved as f64);
                                    let available = format_number_int(item.available() as f64);
                                    let reorder_point = item.effective_reorder_point(default_reorder_point);
                                    let currency = currency.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{sku}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{display_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{warehouse}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{size}</TableCell>
                                            <TableCell class="text-right">{quantity}</TableCell>
                                            <TableCell class="text-right">{reserved}</TableCell>
                                            <TableCell class="text-right">
                                                <strong>{available}</strong>
                                            </TableCell>
                                            <TableCell class="text-right">{reorder_point}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(stock_value)) currency=currency.clone() show_currency=true />
                                            <TableCell>
                                                <Badge variant=status.badge_variant().to_string()>{status.label()}</Badge>
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
    fn test_matches_warehouse() {
        let known = HashMap::from([("w1".to_string(), "Main".to_string())]);
        let in_main = InventoryItem {
            warehouse_id: Some("w1".into()),
            ..Default::default()
        };
        let orphan = InventoryItem {
            warehouse_id: Some("w9".into()),
            ..Default::default()
        };
        let nowhere = InventoryItem::default();

        assert!(matches_warehouse(&in_main, "", &known));
        assert!(matches_warehouse(&in_main, "w1", &known));
        assert!(!matches_warehouse(&orphan, "w1", &known));
        assert!(matches_warehouse(&orphan, UNASSIGNED, &known));
        assert!(matches_warehouse(&nowhere, UNASSIGNED, &known));
        assert!(!matches_warehouse(&in_main, UNASSIGNED, &known));
    }
}
