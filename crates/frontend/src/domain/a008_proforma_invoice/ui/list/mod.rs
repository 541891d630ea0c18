use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Badge, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::date_utils::{format_date, format_opt_date, today};
use crate::shared::finance_ui::{aging_variant, document_status, due_label, matches_status_filter, VOID_FILTER};
use crate::shared::list_state::ListController;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a008_proforma_invoice::aggregate::ProformaInvoice;
use contracts::domain::common::Resource;
use contracts::shared::finance::{AgingBucket, FinancialDocument, PaymentStatus};
use contracts::shared::list::TableQuery;
use leptos::prelude::*;
use thaw::*;

/// Aging filter: empty accepts all, otherwise the bucket's position in `AgingBucket::all()`.
fn bucket_from_filter(filter: &str) -> Option<AgingBucket> {
    filter
        .parse::<usize>()
        .ok()
        .and_then(|i| AgingBucket::all().get(i).copied())
}

#[component]
pub fn InvoiceList() -> impl IntoView {
    let config = use_config();
    let currency = config.currency();
    let currency_sv = StoredValue::new(currency.clone());
    let thresholds = config.config.with_untracked(|c| c.finance.thresholds());
    let today = today();

    let list = ListController::<ProformaInvoice>::new(
        TableQuery::sorted_by("due_date", true).with_page_size(config.page_size()),
    );
    let status_filter = RwSignal::new(String::new());
    let aging_filter = RwSignal::new(String::new());

    let load = move || list.load(ProformaInvoice::endpoint(), config.page_size());
    load();

    let page = list.page_where(move |inv: &ProformaInvoice| {
        let status = status_filter.get();
        let bucket = bucket_from_filter(&aging_filter.get());
        matches_status_filter(inv, &status, today)
            && bucket.map_or(true, |b| !inv.is_void() && inv.aging_bucket(today, &thresholds) == b)
    });

    // Live documents only
    let totals = Memo::new(move |_| {
        list.state.with(|s| {
            s.items.iter().filter(|inv| !inv.is_void()).fold((0.0, 0.0), |(open, overdue), inv| {
                let outstanding = inv.outstanding();
                let late = if inv.payment_status(today) == PaymentStatus::Overdue { outstanding } else { 0.0 };
                (open + outstanding, overdue + late)
            })
        })
    });

    view! {
        <PageFrame page_id="a008_proforma_invoice--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{ProformaInvoice::list_name()}</h1>
                    <Badge variant="primary".to_string()>
                        {move || page.get().total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Badge variant="neutral".to_string()>
                        {move || format!("Outstanding: {}{}", currency_sv.get_value(), format_money(totals.get().0))}
                    </Badge>
                    <Badge variant="error".to_string()>
                        {move || format!("Overdue: {}{}", currency_sv.get_value(), format_money(totals.get().1))}
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
                                placeholder="Invoice # or customer..."
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    status_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"All statuses"</option>
                                {PaymentStatus::all()
                                    .into_iter()
                                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                                    .collect_view()}
                                <option value=VOID_FILTER>"Void"</option>
                            </select>
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    aging_filter.set(event_target_value(&ev));
                                    list.reset_page();
                                }
                            >
                                <option value="">"Any age"</option>
                                {AgingBucket::all()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, b)| view! { <option value=i.to_string()>{b.label(&thresholds)}</option> })
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
                    <Table attr:style="width: 100%; min-width: 1200px;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Invoice #" sort_field="invoice_number" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 />
                                <SortableHeaderCell label="Customer" sort_field="customer" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=180.0 />
                                <SortableHeaderCell label="Issued" sort_field="issue_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Due" sort_field="due_date" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=100.0 />
                                <SortableHeaderCell label="Total" sort_field="total_amount" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <SortableHeaderCell label="Paid" sort_field="paid_amount" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=110.0 align="right" />
                                <SortableHeaderCell label="Outstanding" sort_field="outstanding" current_sort_field=list.sort_field() sort_ascending=list.sort_ascending() on_sort=list.on_sort() min_width=120.0 align="right" />
                                <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Aging"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Due in"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.get().items
                                key=|inv| inv.id.clone()
                                children=move |invoice: ProformaInvoice| {
                                    let (status_label, status_variant) = document_status(&invoice, today);
                                    let bucket = invoice.aging_bucket(today, &thresholds);
                                    let total = invoice.total_amount;
                                    let paid = invoice.paid_amount;
                                    let outstanding = invoice.outstanding();
                                    let is_live = !invoice.is_void();
                                    let currency = invoice.currency.clone().unwrap_or_else(|| currency.clone());

                                    let invoice_number = invoice.invoice_number.clone();
                                    let counterparty = invoice.counterparty();
                                    let issue_date = format_date(&invoice.issue_date);
                                    let due_date = format_opt_date(invoice.due_date.as_deref());
                                    let days_past_due = invoice.days_past_due(today);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{invoice_number}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{counterparty}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{issue_date}</TableCell>
                                            <TableCell>{due_date}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(total)) currency=currency show_currency=true />
                                            <TableCellMoney value=Signal::derive(move || Some(paid)) />
                                            <TableCellMoney value=Signal::derive(move || Some(outstanding)) bold=true />
                                            <TableCell>
                                                <Badge variant=status_variant.to_string()>{status_label}</Badge>
                                            </TableCell>
                                            <TableCell>
                                                {is_live.then(|| view! {
                                                    <Badge variant=aging_variant(bucket).to_string()>{bucket.label(&thresholds)}</Badge>
                                                })}
                                            </TableCell>
                                            <TableCell>
                                                {if is_live && outstanding > 0.0 {
                                                    due_label(days_past_due)
                                                } else {
                                                    "—".to_string()
                                                }}
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
    fn test_bucket_from_filter() {
        assert_eq!(bucket_from_filter(""), None);
        assert_eq!(bucket_from_filter("0"), Some(AgingBucket::Current));
        assert_eq!(bucket_from_filter("4"), Some(AgingBucket::Over90));
        assert_eq!(bucket_from_filter("9"), None);
    }
}
