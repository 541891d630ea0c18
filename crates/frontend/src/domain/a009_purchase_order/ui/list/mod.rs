use crate::domain::a009_purchase_order::ui::details::{delete_by_id, PaymentForm, PurchaseOrderDetails};
use crate::layout::notifications::use_notifications;
use crate::layout::{Modal, ModalService};
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::date_utils::{format_date, format_opt_date, today};
use crate::shared::finance_ui::{aging_variant, document_status, matches_status_filter, VOID_FILTER};
use crate::shared::icons::icon;
use crate::shared::list_state::ListController;
use crate::shared::list_utils::{confirm_action, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::common::Resource;
use contracts::shared::finance::{FinancialDocument, PaymentStatus};
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Content of the page modal
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    /// None: create
    Edit(Option<String>),
    Payment(PurchaseOrder),
}

/// Payments are accepted while something is owed on a live order.
fn can_record_payment(po: &PurchaseOrder) -> bool {
    !po.is_void() && po.outstanding() > 0.0
}

#[component]
pub fn PurchaseOrderList() -> impl IntoView {
    let config = use_config();
    let notifications = use_notifications();
    let currency = config.currency();
    let thresholds = config.config.with_untracked(|c| c.finance.thresholds());
    let today = today();

    let list = ListController::<PurchaseOrder>::new(
        TableQuery::sorted_by("order_date", false).with_page_size(config.page_size()),
    );
    let status_filter = RwSignal::new(String::new());
    let late_only = RwSignal::new(false);

    let modal = ModalService::new();
    provide_context(modal);
    let dialog = RwSignal::new(None::<Dialog>);

    let load = move || list.load(PurchaseOrder::endpoint(), config.page_size());
    load();

    let page = list.page_where(move |po: &PurchaseOrder| {
        matches_status_filter(po, &status_filter.get(), today)
            && (!late_only.get() || po.is_delivery_late(today))
    });

    let open_dialog = move |d: Dialog| {
        dialog.set(Some(d));
        modal.show();
    };

    let close_and_reload = Callback::new(move |_| {
        modal.hide();
        load();
    });
    let close = Callback::new(move |_| modal.hide());

    let delete_order = move |po: PurchaseOrder| {
        if !confirm_action(&format!("Delete purchase order {}?", po.po_number)) {
            return;
        }
        spawn_local(async move {
            match delete_by_id(&po.id).await {
                Ok(()) => {
                    notifications.success(format!("Purchase order {} deleted", po.po_number));
                    load();
                }
                Err(e) => notifications.error(format!("Cannot delete purchase order: {}", e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a009_purchase_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{PurchaseOrder::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.get().total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_dialog(Dialog::Edit(None))>
                        {icon("plus")}
                        " New purchase order"
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
                                placeholder="PO #, supplier, status..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    status_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All payment states"</option>
                                {PaymentStatus::all()
                                    .into_iter()
                                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                                    .collect_view()}
                                <option value=VOID_FILTER>"Cancelled"</option>
                            </select>
                            <label class="filter-checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || late_only.get()
                                    on:change=move |ev| {
                                        late_only.set(event_target_checked(&ev));
                                        list.reset_page();
                                    }
                                />
                                " Late deliveries"
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
                    <Table attr:style="width: 100%; min-width: 1300px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="PO #" sort_field="po_number" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <SortableHeaderCell label="Supplier" sort_field="supplier" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=170.0 />
                                <SortableHeaderCell label="Ordered" sort_field="order_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Due" sort_field="due_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Delivery" sort_field="expected_delivery" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 />
                                <SortableHeaderCell label="Total" sort_field="total_amount" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <SortableHeaderCell label="Outstanding" sort_field="outstanding" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <SortableHeaderCell label="Order status" sort_field="status" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <TableHeaderCell min_width=90.0>"Payment"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Aging"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|po| po.id.clone()
                                children=move |po: PurchaseOrder| {
                                    let (status_label, status_variant) = document_status(&po, today);
                                    let bucket = po.aging_bucket(today, &thresholds);
                                    let billed = po.billed();
                                    let outstanding = po.outstanding();
                                    let is_live = !po.is_void();
                                    let is_late = po.is_delivery_late(today);
                                    let payable = can_record_payment(&po);
                                    let id = po.id.clone();
                                    let po_for_payment = po.clone();
                                    let po_for_delete = po.clone();

                                    let po_number = po.po_number.clone();
                                    let counterparty = po.counterparty();
                                    let order_date = format_date(&po.order_date);
                                    let due_date = format_opt_date(po.due_date.as_deref());
                                    let expected_delivery = format_opt_date(po.expected_delivery.as_deref());
                                    let po_status = po.status_label().to_string();
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
                                                            open_dialog(Dialog::Edit(Some(id.clone())));
                                                        }
                                                    >
                                                        {po_number}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{counterparty}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{order_date}</TableCell>
                                            <TableCell>{due_date}</TableCell>
                                            <TableCell class={if is_late { "text-error" } else { "" }}>
                                                {expected_delivery}
                                                {is_late.then(|| " (late)")}
                                            </TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(billed)) currency=currency.clone() show_currency=true />
                                            <TableCellMoney value=Signal::derive(move || Some(outstanding)) bold=true />
                                            <TableCell>{po_status}</TableCell>
                                            <TableCell>
                                                <Badge variant=status_variant.to_string()>{status_label}</Badge>
                                            </TableCell>
                                            <TableCell>
                                                {is_live.then(|| view! {
                                                    <Badge variant=aging_variant(bucket).to_string()>{bucket.label(&thresholds)}</Badge>
                                                })}
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        disabled={!payable}
                                                        on_click=move |_| open_dialog(Dialog::Payment(po_for_payment.clone()))
                                                    >
                                                        {icon("wallet")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        on_click=move |_| delete_order(po_for_delete.clone())
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </Flex>
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
                {move || dialog.get().map(|d| match d {
                    Dialog::Edit(id) => view! {
                        <PurchaseOrderDetails id=id on_saved=close_and_reload on_cancel=close />
                    }.into_any(),
                    Dialog::Payment(order) => view! {
                        <PaymentForm order=order on_saved=close_and_reload on_cancel=close />
                    }.into_any(),
                })}
            </Modal>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_record_payment() {
        let open = PurchaseOrder {
            total_amount: 1000.0,
            paid_amount: 400.0,
            status: Some("confirmed".into()),
            ..Default::default()
        };
        assert!(can_record_payment(&open));

        let settled = PurchaseOrder { paid_amount: 1000.0, ..open.clone() };
        assert!(!can_record_payment(&settled));

        let cancelled = PurchaseOrder { status: Some("cancelled".into()), ..open };
        assert!(!can_record_payment(&cancelled));
    }
}
