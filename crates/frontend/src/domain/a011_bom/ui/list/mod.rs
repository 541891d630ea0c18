use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a011_bom::aggregate::Bom;
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn BomList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let config = use_config();
    let currency = config.currency();

    let list = ListController::<Bom>::new(
        TableQuery::sorted_by("code", true).with_page_size(config.page_size()),
    );

    let load = move || list.load(Bom::endpoint(), config.page_size());
    load();

    let page = list.page();

    let open_detail = move |id: String, code: String| {
        tabs_store.open_tab(&Bom::detail_key(&id), &detail_tab_label("BOM", &code));
    };

    view! {
        <PageFrame page_id="a011_bom--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Bom::list_name()}</h1>
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
                                placeholder="Code, product, material..."
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
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Code" sort_field="code" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 />
                                <SortableHeaderCell label="Product" sort_field="product" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=200.0 />
                                <TableHeaderCell min_width=80.0>"Version"</TableHeaderCell>
                                <SortableHeaderCell label="Materials" sort_field="materials" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <SortableHeaderCell label="Material cost" sort_field="material_cost" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <TableHeaderCell min_width=110.0>"Labour + overhead"</TableHeaderCell>
                                <SortableHeaderCell label="Unit cost" sort_field="unit_cost" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|b| b.id.clone()
                                children=move |bom: Bom| {
                                    let id = bom.id.clone();
                                    let code = bom.code.clone();
                                    let material_cost = bom.material_cost();
                                    let conversion = bom.labour_cost + bom.overhead_cost;
                                    let unit_cost = bom.unit_cost();

                                    let bom_code = bom.code.clone();
                                    let product = bom.product_label();
                                    let version = bom.version.clone().unwrap_or_default();
                                    let line_count = bom.lines.len();
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
                                                            open_detail(id.clone(), code.clone());
                                                        }
                                                    >
                                                        {bom_code}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{product}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{version}</TableCell>
                                            <TableCell class="text-right">{line_count}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(material_cost)) />
                                            <TableCellMoney value=Signal::derive(move || Some(conversion)) />
                                            <TableCellMoney value=Signal::derive(move || Some(unit_cost)) currency=currency.clone() show_currency=true bold=true />
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
