use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a010_size_chart::aggregate::SizeChart;
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use thaw::*;

/// "XS – XL (6 sizes)" style summary of a chart's rows.
fn size_range(chart: &SizeChart) -> String {
    match (chart.rows.first(), chart.rows.last()) {
        (Some(first), Some(last)) if chart.rows.len() > 1 => {
            format!("{} – {} ({} sizes)", first.label, last.label, chart.rows.len())
        }
        (Some(only), _) => only.label.clone(),
        _ => "—".to_string(),
    }
}

#[component]
pub fn SizeChartList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let config = use_config();

    let list = ListController::<SizeChart>::new(
        TableQuery::sorted_by("name", true).with_page_size(config.page_size()),
    );

    let load = move || list.load(SizeChart::endpoint(), config.page_size());
    load();

    let page = list.page();

    let open_detail = move |id: String, name: String| {
        tabs_store.open_tab(
            &SizeChart::detail_key(&id),
            &detail_tab_label(SizeChart::element_name(), &name),
        );
    };

    view! {
        <PageFrame page_id="a010_size_chart--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{SizeChart::list_name()}</h1>
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
                                placeholder="Chart, brand, category..."
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
                    <Table attr:style="width: 100%; min-width: 800px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Chart" sort_field="name" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <SortableHeaderCell label="Brand" sort_field="brand" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=130.0 />
                                <SortableHeaderCell label="Category" sort_field="category" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 />
                                <SortableHeaderCell label="Size system" sort_field="region" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <TableHeaderCell min_width=70.0>"Unit"</TableHeaderCell>
                                <SortableHeaderCell label="Sizes" sort_field="sizes" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=160.0 />
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|c| c.id.clone()
                                children=move |chart: SizeChart| {
                                    let id = chart.id.clone();
                                    let name = chart.name.clone();

                                    let chart_name = chart.name.clone();
                                    let brand = chart.brand.clone().unwrap_or_default();
                                    let category = chart.category.clone().unwrap_or_default();
                                    let region = chart.region.code();
                                    let unit = chart.unit.label();
                                    let sizes = size_range(&chart);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id.clone(), name.clone());
                                                        }
                                                    >
                                                        {chart_name}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{brand}</TableCell>
                                            <TableCell>{category}</TableCell>
                                            <TableCell>{region}</TableCell>
                                            <TableCell>{unit}</TableCell>
                                            <TableCell>{sizes}</TableCell>
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
    use contracts::domain::a010_size_chart::aggregate::SizeRow;

    #[test]
    fn test_size_range() {
        let mut chart = SizeChart::default();
        assert_eq!(size_range(&chart), "—");
        chart.rows.push(SizeRow { label: "S".into(), ..Default::default() });
        assert_eq!(size_range(&chart), "S");
        chart.rows.push(SizeRow { label: "M".into(), ..Default::default() });
        chart.rows.push(SizeRow { label: "L".into(), ..Default::default() });
        assert_eq!(size_range(&chart), "S – L (3 sizes)");
    }
}
