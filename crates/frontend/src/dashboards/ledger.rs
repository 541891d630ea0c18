//! Blocks shared by the receivables and payables dashboards.

use crate::shared::components::table::{format_money, format_percent};
use crate::shared::components::Badge;
use crate::shared::finance_ui::aging_variant;
use contracts::dashboards::ledger::{CounterpartyBalance, LedgerSummary};
use contracts::shared::finance::{AgingSummary, PaymentStatus, StatusBreakdown};
use leptos::prelude::*;

/// Share of `part` in `total` in percent, `None` when there is no total.
pub fn share_of(part: f64, total: f64) -> Option<f64> {
    if total > 0.0 {
        Some(part / total * 100.0)
    } else {
        None
    }
}

/// "3 documents · $1 200.00"
pub fn count_and_amount(count: usize, amount: f64, currency: &str) -> String {
    let noun = if count == 1 { "document" } else { "documents" };
    format!("{} {} · {}{}", count, noun, currency, format_money(amount))
}

#[component]
pub fn AgingTable(#[prop(into)] aging: Signal<Option<AgingSummary>>, currency: String) -> impl IntoView {
    let currency = StoredValue::new(currency);
    view! {
        <div class="dashboard-block">
            <h3 class="dashboard-block__title">"Aging"</h3>
            <table class="simple-table">
                <thead>
                    <tr>
                        <th>"Bucket"</th>
                        <th class="text-right">"Documents"</th>
                        <th class="text-right">"Amount"</th>
                        <th class="text-right">"Share"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || aging.get().map(|a| {
                        let total = a.total;
                        a.lines.into_iter().map(|line| view! {
                            <tr>
                                <td><Badge variant=aging_variant(line.bucket).to_string()>{line.label.clone()}</Badge></td>
                                <td class="text-right">{line.count}</td>
                                <td class="text-right">{format!("{}{}", currency.get_value(), format_money(line.amount))}</td>
                                <td class="text-right">{format_percent(share_of(line.amount, total))}</td>
                            </tr>
                        }).collect_view()
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn StatusTable(#[prop(into)] breakdown: Signal<Option<StatusBreakdown>>, currency: String) -> impl IntoView {
    let currency = StoredValue::new(currency);
    view! {
        <div class="dashboard-block">
            <h3 class="dashboard-block__title">"By payment status"</h3>
            <table class="simple-table">
                <thead>
                    <tr>
                        <th>"Status"</th>
                        <th class="text-right">"Documents"</th>
                        <th class="text-right">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || breakdown.get().map(|b| {
                        PaymentStatus::all().into_iter().map(|status| {
                            let totals = b.get(status);
                            view! {
                                <tr>
                                    <td><Badge variant=status.badge_variant().to_string()>{status.label()}</Badge></td>
                                    <td class="text-right">{totals.count}</td>
                                    <td class="text-right">{format!("{}{}", currency.get_value(), format_money(totals.amount))}</td>
                                </tr>
                            }
                        }).collect_view()
                    })}
                </tbody>
            </table>
        </div>
    }
}

/// Largest open balances, customers or suppliers.
#[component]
pub fn CounterpartyTable(
    #[prop(into)] title: String,
    #[prop(into)] column: String,
    #[prop(into)] rows: Signal<Vec<CounterpartyBalance>>,
    currency: String,
) -> impl IntoView {
    let currency = StoredValue::new(currency);
    view! {
        <div class="dashboard-block">
            <h3 class="dashboard-block__title">{title}</h3>
            <table class="simple-table">
                <thead>
                    <tr>
                        <th>{column}</th>
                        <th class="text-right">"Documents"</th>
                        <th class="text-right">"Outstanding"</th>
                        <th class="text-right">"Overdue"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = rows.get();
                        if rows.is_empty() {
                            return view! { <tr><td colspan="4" class="text-muted">"Nothing outstanding"</td></tr> }.into_any();
                        }
                        rows.into_iter().map(|r| {
                            let overdue_class = if r.overdue > 0.0 { "text-right text-error" } else { "text-right" };
                            view! {
                                <tr>
                                    <td>{r.name.clone()}</td>
                                    <td class="text-right">{r.documents}</td>
                                    <td class="text-right">{format!("{}{}", currency.get_value(), format_money(r.outstanding))}</td>
                                    <td class=overdue_class>{format!("{}{}", currency.get_value(), format_money(r.overdue))}</td>
                                </tr>
                            }
                        }).collect_view().into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// Ledger figures as signals for the cards of a dashboard.
#[derive(Clone, Copy)]
pub struct LedgerSignals {
    pub summary: Memo<Option<LedgerSummary>>,
}

impl LedgerSignals {
    pub fn value(&self, f: fn(&LedgerSummary) -> f64) -> Signal<Option<f64>> {
        let summary = self.summary;
        Signal::derive(move || summary.with(|s| s.as_ref().map(f)))
    }

    pub fn optional(&self, f: fn(&LedgerSummary) -> Option<f64>) -> Signal<Option<f64>> {
        let summary = self.summary;
        Signal::derive(move || summary.with(|s| s.as_ref().and_then(f)))
    }

    pub fn aging(&self) -> Signal<Option<AgingSummary>> {
        let summary = self.summary;
        Signal::derive(move || summary.with(|s| s.as_ref().map(|s| s.aging.clone())))
    }

    pub fn by_status(&self) -> Signal<Option<StatusBreakdown>> {
        let summary = self.summary;
        Signal::derive(move || summary.with(|s| s.as_ref().map(|s| s.by_status.clone())))
    }

    pub fn top(&self) -> Signal<Vec<CounterpartyBalance>> {
        let summary = self.summary;
        Signal::derive(move || {
            summary.with(|s| s.as_ref().map(|s| s.top_counterparties.clone()).unwrap_or_default())
        })
    }

    /// Card subtitle of a count and its amount.
    pub fn caption(&self, f: fn(&LedgerSummary) -> (usize, f64), currency: String) -> Signal<Option<String>> {
        let summary = self.summary;
        Signal::derive(move || {
            summary.with(|s| {
                s.as_ref().map(|s| {
                    let (count, amount) = f(s);
                    count_and_amount(count, amount, &currency)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_of() {
        assert_eq!(share_of(25.0, 100.0), Some(25.0));
        assert_eq!(share_of(5.0, 0.0), None);
    }

    #[test]
    fn test_count_and_amount() {
        assert_eq!(count_and_amount(1, 250.0, "$"), "1 document · $250.00");
        assert_eq!(count_and_amount(3, 1200.0, "€"), "3 documents · €1 200.00");
    }
}
