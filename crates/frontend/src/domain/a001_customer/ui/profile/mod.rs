//! Customer profile: loyalty standing plus order history.

use crate::shared::api::fetch_list_or_empty;
use crate::shared::components::table::{format_money, format_number_int};
use crate::shared::components::Badge;
use crate::shared::config::use_config;
use crate::shared::date_utils::{format_date, format_opt_date};
use crate::shared::icons::icon;
use contracts::domain::a001_customer::aggregate::Customer;
use contracts::domain::a007_order::aggregate::SalesOrder;
use contracts::domain::common::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Orders of one customer, newest first.
fn orders_of(customer_id: &str, mut orders: Vec<SalesOrder>) -> Vec<SalesOrder> {
    orders.retain(|o| o.customer_id.as_deref() == Some(customer_id));
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    orders
}

#[component]
pub fn CustomerProfile(customer: Customer, on_close: Callback<()>) -> impl IntoView {
    let config = use_config();
    let program = config.config.with_untracked(|c| c.loyalty.program());
    let currency = config.currency();

    let tier = customer.tier(&program);
    let points = customer.points(&program);
    let to_next = customer.points_to_next_tier(&program);
    let next_label = tier.next().map(|t| t.label()).unwrap_or("");

    let orders = RwSignal::new(Vec::<SalesOrder>::new());
    let loading = RwSignal::new(true);

    let customer_id = customer.id.clone();
    spawn_local(async move {
        let path = format!(
            "{}?customer_id={}",
            SalesOrder::endpoint(),
            urlencoding::encode(&customer_id)
        );
        let fetched = fetch_list_or_empty::<SalesOrder>(&path, config.page_size()).await;
        orders.set(orders_of(&customer_id, fetched));
        loading.set(false);
    });

    let currency_sv = StoredValue::new(currency.clone());

    view! {
        <div class="details-container">
            <div class="modal-header">
                <h3 class="modal-title">{customer.name.clone()}</h3>
                <Badge variant=tier.badge_variant().to_string()>{tier.label()}</Badge>
                <button class="modal-close" on:click=move |_| on_close.run(()) title="Close">
                    {icon("x")}
                </button>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label>"Email"</label>
                    <span>{customer.email.clone().unwrap_or_else(|| "—".to_string())}</span>
                </div>
                <div class="form-group">
                    <label>"Phone"</label>
                    <span>{customer.phone.clone().unwrap_or_else(|| "—".to_string())}</span>
                </div>
                <div class="form-group">
                    <label>"Location"</label>
                    <span>{customer.location()}</span>
                </div>
                <div class="form-group">
                    <label>"Customer since"</label>
                    <span>{format_opt_date(customer.created_at.as_deref())}</span>
                </div>
            </div>

            <div class="stat-row">
                <div class="stat-row__item">
                    <span class="stat-row__label">"Points"</span>
                    <span class="stat-row__value">{format_number_int(points as f64)}</span>
                </div>
                <div class="stat-row__item">
                    <span class="stat-row__label">"To next tier"</span>
                    <span class="stat-row__value">
                        {match to_next {
                            Some(missing) => format!("{} to {}", format_number_int(missing as f64), next_label),
                            None => "Top tier".to_string(),
                        }}
                    </span>
                </div>
                <div class="stat-row__item">
                    <span class="stat-row__label">"Lifetime spend"</span>
                    <span class="stat-row__value">{format!("{}{}", currency, format_money(customer.total_spent))}</span>
                </div>
                <div class="stat-row__item">
                    <span class="stat-row__label">"Avg. order"</span>
                    <span class="stat-row__value">{format!("{}{}", currency, format_money(customer.average_order_value()))}</span>
                </div>
            </div>

            <h4 class="details-section__title">"Order history"</h4>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="placeholder">"Loading orders..."</div> }
            >
                <Show
                    when=move || !orders.with(Vec::is_empty)
                    fallback=|| view! { <div class="placeholder">"No orders yet"</div> }
                >
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Order"</TableHeaderCell>
                                <TableHeaderCell>"Date"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Units"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || orders.get()
                                key=|o| o.id.clone()
                                children=move |order: SalesOrder| {
                                    let currency = currency_sv.get_value();
                                    let order_number = order.order_number.clone();
                                    let order_date = format_date(&order.order_date);
                                    let status_variant = order.status.badge_variant().to_string();
                                    let status_label = order.status.label();
                                    let units = order.units();
                                    let total = format!("{}{}", currency, format_money(order.total_amount()));
                                    view! {
                                        <TableRow>
                                            <TableCell>{order_number}</TableCell>
                                            <TableCell>{order_date}</TableCell>
                                            <TableCell>
                                                <Badge variant=status_variant>{status_label}</Badge>
                                            </TableCell>
                                            <TableCell class="text-right">{units}</TableCell>
                                            <TableCell class="text-right">
                                                {total}
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, customer: Option<&str>, date: &str) -> SalesOrder {
        SalesOrder {
            id: id.to_string(),
            customer_id: customer.map(str::to_string),
            order_date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_orders_of_filters_and_sorts_newest_first() {
        let orders = vec![
            order("1", Some("c1"), "2024-01-10"),
            order("2", Some("c2"), "2024-02-01"),
            order("3", Some("c1"), "2024-03-05"),
            order("4", None, "2024-03-06"),
        ];
        let ids: Vec<String> = orders_of("c1", orders).into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }
}
