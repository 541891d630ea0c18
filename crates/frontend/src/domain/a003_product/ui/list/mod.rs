use crate::domain::a003_product::ui::details::{delete_by_id, ProductDetails};
use crate::layout::notifications::use_notifications;
use crate::layout::{Modal, ModalService};
use crate::shared::api::fetch_list_or_empty;
use crate::shared::components::table::{format_percent, SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::{confirm_action, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a003_product::aggregate::Product;
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::common::Resource;
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{BTreeSet, HashMap};
use thaw::*;

/// Margin below this share of price is flagged
const LOW_MARGIN_PERCENT: f64 = 40.0;

fn status_variant(status: &str) -> &'static str {
    match status {
        "active" => "success",
        "draft" => "warning",
        "discontinued" => "error",
        _ => "neutral",
    }
}

fn margin_class(margin: Option<f64>) -> &'static str {
    match margin {
        Some(m) if m < 0.0 => "text-right text-error",
        Some(m) if m < LOW_MARGIN_PERCENT => "text-right text-warning",
        Some(_) => "text-right text-success",
        None => "text-right",
    }
}

/// Distinct non-empty categories, sorted
fn categories_of(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter_map(|p| p.category.clone())
        .filter(|c| !c.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[component]
pub fn ProductList() -> impl IntoView {
    let config = use_config();
    let notifications = use_notifications();
    let currency = config.currency();

    let list = ListController::<Product>::new(
        TableQuery::sorted_by("sku", true).with_page_size(config.page_size()),
    );
    let category_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let collection_names = RwSignal::new(HashMap::<String, String>::new());

    let modal = ModalService::new();
    provide_context(modal);
    let editing_id = RwSignal::new(None::<String>);

    let load = move || {
        list.load(Product::endpoint(), config.page_size());
        spawn_local(async move {
            let collections: Vec<Collection> =
                fetch_list_or_empty(Collection::endpoint(), config.page_size()).await;
            collection_names.set(collections.into_iter().map(|c| (c.id, c.name)).collect());
        });
    };
    load();

    let categories = Memo::new(move |_| list.state.with(|s| categories_of(&s.items)));

    let page = list.page_where(move |p: &Product| {
        let category = category_filter.get();
        let status = status_filter.get();
        (category.is_empty() || p.category.as_deref() == Some(category.as_str()))
            && (status.is_empty() || p.status_label() == status)
    });

    let open_form = move |id: Option<String>| {
        editing_id.set(id);
        modal.show();
    };

    let delete_product = move |product: Product| {
        if !confirm_action(&format!("Delete product {}?", product.sku)) {
            return;
        }
        spawn_local(async move {
            match delete_by_id(&product.id).await {
                Ok(()) => {
                    notifications.success(format!("Product {} deleted", product.sku));
                    load();
                }
                Err(e) => notifications.error(format!("Cannot delete product: {}", e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a003_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Product::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.get().total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_form(None)>
                        {icon("plus")}
                        " New product"
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
                                placeholder="SKU, name, category..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    category_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All categories"</option>
                                {move || categories
                                    .get()
                                    .into_iter()
                                    .map(|c| {
                                        let value = c.clone();
                                        view! { <option value=value>{c}</option> }
                                    })
                                    .collect_view()}
                            </select>
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    status_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All statuses"</option>
                                <option value="active">"active"</option>
                                <option value="draft">"draft"</option>
                                <option value="discontinued">"discontinued"</option>
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
                    <Table attr:style="width: 100%; min-width: 1150px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="SKU" sort_field="sku" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <SortableHeaderCell label="Name" sort_field="name" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <SortableHeaderCell label="Category" sort_field="category" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <TableHeaderCell min_width=130.0>"Collection"</TableHeaderCell>
                                <SortableHeaderCell label="Price" sort_field="price" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 align="right" />
                                <SortableHeaderCell label="Cost" sort_field="cost" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 align="right" />
                                <SortableHeaderCell label="Margin" sort_field="margin" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=90.0 align="right" />
                                <TableHeaderCell min_width=110.0>"Sizes"</TableHeaderCell>
                                <SortableHeaderCell label="Status" sort_field="status" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|p| p.id.clone()
                                children=move |product: Product| {
                                    let id = product.id.clone();
                                    let product_for_delete = product.clone();
                                    let price = product.price;
                                    let cost = product.cost;
                                    let margin = product.margin_percent();
                                    let status = product.status_label().to_string();
                                    let collection_id = product.collection_id.clone();
                                    let collection = move || {
                                        collection_id
                                            .as_ref()
                                            .and_then(|cid| collection_names.with(|names| names.get(cid).cloned()))
                                            .unwrap_or_default()
                                    };
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
                                                            open_form(Some(id.clone()));
                                                        }
                                                    >
                                                        {product.sku.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{product.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{product.category.clone().unwrap_or_default()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{collection}</TableCellLayout>
                                            </TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(price)) currency=currency.clone() show_currency=true />
                                            <TableCellMoney value=Signal::derive(move || Some(cost)) />
                                            <TableCell class=margin_class(margin)>{format_percent(margin)}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{product.sizes.join(", ")}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Badge variant=status_variant(&status).to_string()>{status.clone()}</Badge>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| delete_product(product_for_delete.clone())
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

            <Modal class="modal-content--wide">
                {move || view! {
                    <ProductDetails
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
    fn test_margin_class() {
        assert_eq!(margin_class(Some(-5.0)), "text-right text-error");
        assert_eq!(margin_class(Some(25.0)), "text-right text-warning");
        assert_eq!(margin_class(Some(62.0)), "text-right text-success");
        assert_eq!(margin_class(None), "text-right");
    }

    #[test]
    fn test_categories_of() {
        let products = vec![
            Product { category: Some("Tops".into()), ..Default::default() },
            Product { category: Some("Denim".into()), ..Default::default() },
            Product { category: Some("Tops".into()), ..Default::default() },
            Product { category: None, ..Default::default() },
        ];
        assert_eq!(categories_of(&products), vec!["Denim".to_string(), "Tops".to_string()]);
        assert_eq!(status_variant("draft"), "warning");
    }
}
