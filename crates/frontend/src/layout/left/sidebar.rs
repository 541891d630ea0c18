//! Sidebar with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use leptos::prelude::*;
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn menu_item(key: &'static str, icon_name: &'static str) -> (&'static str, &'static str, &'static str) {
    (key, tab_label_for_key(key), icon_name)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "dashboards",
            label: "Dashboards",
            icon: "bar-chart",
            items: vec![
                menu_item("d400_receivables", "invoices"),
                menu_item("d401_payables", "payments"),
                menu_item("d402_inventory", "inventory"),
                menu_item("d403_sales", "trending-up"),
                menu_item("d404_fulfillment", "shipments"),
                menu_item("d405_open_to_buy", "wallet"),
            ],
        },
        MenuGroup {
            id: "sales",
            label: "Sales",
            icon: "orders",
            items: vec![
                menu_item("a001_customer", "customers"),
                menu_item("a007_order", "orders"),
                menu_item("a008_proforma_invoice", "invoices"),
            ],
        },
        MenuGroup {
            id: "purchasing",
            label: "Purchasing",
            icon: "purchases",
            items: vec![
                menu_item("a002_supplier", "suppliers"),
                menu_item("a009_purchase_order", "purchases"),
                menu_item("a006_collection", "layers"),
            ],
        },
        MenuGroup {
            id: "catalog",
            label: "Catalog & stock",
            icon: "products",
            items: vec![
                menu_item("a003_product", "products"),
                menu_item("a005_inventory", "inventory"),
                menu_item("a010_size_chart", "ruler"),
            ],
        },
        MenuGroup {
            id: "production",
            label: "Production",
            icon: "factory",
            items: vec![
                menu_item("a011_bom", "list"),
                menu_item("a012_production_order", "factory"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["dashboards".to_string()]);

    let groups = get_menu_groups();

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id.to_string();
                let group_id_for_exp = group_id.clone();
                let group_id_for_click = group_id.clone();
                let items_stored = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = group_id_for_click.clone();
                                expanded_groups.update(move |items| {
                                    if let Some(pos) = items.iter().position(|x| x == &gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id_for_exp)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items_stored.get_value().into_iter().map(|(id, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(id)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| {
                                                ctx.open_tab(id, label);
                                            }
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_item_has_a_label() {
        for group in get_menu_groups() {
            for (id, label, _) in group.items {
                assert!(!label.is_empty(), "no label for {}", id);
            }
        }
    }
}
