//! Receivable/payable classification rules shared by invoices and purchase orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outstanding amounts at or below this are treated as settled (rounding noise).
pub const SETTLED_EPSILON: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    /// Badge variant used by the UI.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "neutral",
            PaymentStatus::Partial => "warning",
            PaymentStatus::Paid => "success",
            PaymentStatus::Overdue => "error",
        }
    }

    pub fn all() -> [PaymentStatus; 4] {
        [
            PaymentStatus::Pending,
            PaymentStatus::Partial,
            PaymentStatus::Paid,
            PaymentStatus::Overdue,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "partial" => Some(PaymentStatus::Partial),
            "paid" => Some(PaymentStatus::Paid),
            "overdue" => Some(PaymentStatus::Overdue),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

/// Parses `YYYY-MM-DD`, also accepting a full ISO datetime (the date part is used).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn outstanding(total: f64, paid: f64) -> f64 {
    (total - paid).max(0.0)
}

pub fn is_settled(total: f64, paid: f64) -> bool {
    outstanding(total, paid) <= SETTLED_EPSILON
}

/// Days elapsed since `due_date`; negative while the document is not yet due.
pub fn days_past_due(due_date: Option<&str>, today: NaiveDate) -> Option<i64> {
    let due = parse_date(due_date?)?;
    Some((today - due).num_days())
}

pub fn classify_payment(
    total: f64,
    paid: f64,
    due_date: Option<&str>,
    today: NaiveDate,
) -> PaymentStatus {
    if is_settled(total, paid) {
        return PaymentStatus::Paid;
    }
    if matches!(days_past_due(due_date, today), Some(days) if days > 0) {
        return PaymentStatus::Overdue;
    }
    if paid > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

/// Not overdue and due within `window_days` from today (inclusive).
pub fn is_due_soon(due_date: Option<&str>, today: NaiveDate, window_days: i64) -> bool {
    match days_past_due(due_date, today) {
        Some(days) => days <= 0 && -days <= window_days,
        None => false,
    }
}

/// A billed document with a payment side: proforma invoices (receivable) and
/// purchase orders (payable).
pub trait FinancialDocument {
    fn document_no(&self) -> &str;
    fn counterparty(&self) -> String;
    fn billed(&self) -> f64;
    fn paid(&self) -> f64;
    fn due_date(&self) -> Option<&str>;

    /// Excluded from every total (cancelled, void ...).
    fn is_void(&self) -> bool {
        false
    }

    fn outstanding(&self) -> f64 {
        outstanding(self.billed(), self.paid())
    }

    fn payment_status(&self, today: NaiveDate) -> PaymentStatus {
        classify_payment(self.billed(), self.paid(), self.due_date(), today)
    }

    fn days_past_due(&self, today: NaiveDate) -> Option<i64> {
        days_past_due(self.due_date(), today)
    }

    fn aging_bucket(&self, today: NaiveDate, thresholds: &AgingThresholds) -> AgingBucket {
        if is_settled(self.billed(), self.paid()) {
            AgingBucket::Current
        } else {
            aging_bucket(self.days_past_due(today), thresholds)
        }
    }
}

/// Upper day limits of the first three aging buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingThresholds {
    pub first: i64,
    pub second: i64,
    pub third: i64,
}

impl Default for AgingThresholds {
    fn default() -> Self {
        Self {
            first: 30,
            second: 60,
            third: 90,
        }
    }
}

impl AgingThresholds {
    /// Builds thresholds from a config list; falls back to defaults unless it is
    /// exactly three strictly increasing positive numbers.
    pub fn from_slice(values: &[i64]) -> Self {
        match values {
            [a, b, c] if *a > 0 && a < b && b < c => Self {
                first: *a,
                second: *b,
                third: *c,
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgingBucket {
    Current,
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub fn all() -> [AgingBucket; 5] {
        [
            AgingBucket::Current,
            AgingBucket::Days1To30,
            AgingBucket::Days31To60,
            AgingBucket::Days61To90,
            AgingBucket::Over90,
        ]
    }

    pub fn label(&self, thresholds: &AgingThresholds) -> String {
        match self {
            AgingBucket::Current => "Current".to_string(),
            AgingBucket::Days1To30 => format!("1-{} days", thresholds.first),
            AgingBucket::Days31To60 => {
                format!("{}-{} days", thresholds.first + 1, thresholds.second)
            }
            AgingBucket::Days61To90 => {
                format!("{}-{} days", thresholds.second + 1, thresholds.third)
            }
            AgingBucket::Over90 => format!("{}+ days", thresholds.third + 1),
        }
    }
}

pub fn aging_bucket(days_past_due: Option<i64>, thresholds: &AgingThresholds) -> AgingBucket {
    match days_past_due {
        None => AgingBucket::Current,
        Some(d) if d <= 0 => AgingBucket::Current,
        Some(d) if d <= thresholds.first => AgingBucket::Days1To30,
        Some(d) if d <= thresholds.second => AgingBucket::Days31To60,
        Some(d) if d <= thresholds.third => AgingBucket::Days61To90,
        Some(_) => AgingBucket::Over90,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgingLine {
    pub bucket: AgingBucket,
    pub label: String,
    pub amount: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgingSummary {
    /// Always one line per bucket, in bucket order.
    pub lines: Vec<AgingLine>,
    pub total: f64,
}

impl AgingSummary {
    pub fn amount(&self, bucket: AgingBucket) -> f64 {
        self.lines
            .iter()
            .find(|l| l.bucket == bucket)
            .map(|l| l.amount)
            .unwrap_or(0.0)
    }

    /// Share of the total in each bucket (0..=100), same order as `lines`.
    pub fn shares(&self) -> Vec<f64> {
        self.lines
            .iter()
            .map(|l| {
                if self.total > 0.0 {
                    l.amount / self.total * 100.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Buckets `(outstanding, due_date)` pairs. Settled entries are skipped.
pub fn aging_summary<'a, I>(entries: I, today: NaiveDate, thresholds: &AgingThresholds) -> AgingSummary
where
    I: IntoIterator<Item = (f64, Option<&'a str>)>,
{
    let mut lines: Vec<AgingLine> = AgingBucket::all()
        .iter()
        .map(|b| AgingLine {
            bucket: *b,
            label: b.label(thresholds),
            amount: 0.0,
            count: 0,
        })
        .collect();
    let mut total = 0.0;

    for (amount, due_date) in entries {
        if amount <= SETTLED_EPSILON {
            continue;
        }
        let bucket = aging_bucket(days_past_due(due_date, today), thresholds);
        if let Some(line) = lines.iter_mut().find(|l| l.bucket == bucket) {
            line.amount += amount;
            line.count += 1;
        }
        total += amount;
    }

    AgingSummary { lines, total }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusTotals {
    pub count: usize,
    pub amount: f64,
}

/// Document counts and outstanding amounts per payment status.
/// `Paid` amounts are the settled totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: StatusTotals,
    pub partial: StatusTotals,
    pub paid: StatusTotals,
    pub overdue: StatusTotals,
}

impl StatusBreakdown {
    pub fn add(&mut self, status: PaymentStatus, amount: f64) {
        let slot = self.slot_mut(status);
        slot.count += 1;
        slot.amount += amount;
    }

    pub fn get(&self, status: PaymentStatus) -> StatusTotals {
        match status {
            PaymentStatus::Pending => self.pending,
            PaymentStatus::Partial => self.partial,
            PaymentStatus::Paid => self.paid,
            PaymentStatus::Overdue => self.overdue,
        }
    }

    fn slot_mut(&mut self, status: PaymentStatus) -> &mut StatusTotals {
        match status {
            PaymentStatus::Pending => &mut self.pending,
            PaymentStatus::Partial => &mut self.partial,
            PaymentStatus::Paid => &mut self.paid,
            PaymentStatus::Overdue => &mut self.overdue,
        }
    }
}

/// Collected share of billed amount, percent.
pub fn collection_rate(paid: f64, billed: f64) -> Option<f64> {
    if billed <= 0.0 {
        None
    } else {
        Some(paid / billed * 100.0)
    }
}

pub fn budget_utilization(committed: f64, budget: f64) -> Option<f64> {
    if budget <= 0.0 {
        None
    } else {
        Some(committed / budget * 100.0)
    }
}

/// DSO = receivables / credit sales * days in period.
pub fn days_sales_outstanding(receivables: f64, credit_sales: f64, period_days: i64) -> Option<f64> {
    if credit_sales <= 0.0 || period_days <= 0 {
        None
    } else {
        Some(receivables / credit_sales * period_days as f64)
    }
}

/// Retail open-to-buy inputs for one planning period, all at cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenToBuyPlan {
    pub planned_sales: f64,
    pub planned_markdowns: f64,
    pub planned_end_inventory: f64,
    pub beginning_inventory: f64,
    pub on_order: f64,
}

impl OpenToBuyPlan {
    /// Negative result means the period is already over-bought.
    pub fn open_to_buy(&self) -> f64 {
        self.planned_sales + self.planned_markdowns + self.planned_end_inventory
            - self.beginning_inventory
            - self.on_order
    }

    pub fn is_overbought(&self) -> bool {
        self.open_to_buy() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_classify_payment() {
        assert_eq!(
            classify_payment(100.0, 100.0, Some("2024-01-01"), today()),
            PaymentStatus::Paid
        );
        assert_eq!(
            classify_payment(100.0, 99.999, Some("2024-01-01"), today()),
            PaymentStatus::Paid
        );
        assert_eq!(
            classify_payment(100.0, 40.0, Some("2024-06-29"), today()),
            PaymentStatus::Overdue
        );
        assert_eq!(
            classify_payment(100.0, 40.0, Some("2024-06-30"), today()),
            PaymentStatus::Partial
        );
        assert_eq!(
            classify_payment(100.0, 0.0, Some("2024-07-15T00:00:00Z"), today()),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn test_missing_due_date_is_never_overdue() {
        assert_eq!(classify_payment(100.0, 0.0, None, today()), PaymentStatus::Pending);
        assert_eq!(
            classify_payment(100.0, 0.0, Some("not a date"), today()),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn test_overpayment_has_no_negative_outstanding() {
        assert_eq!(outstanding(100.0, 130.0), 0.0);
    }

    #[test]
    fn test_aging_bucket_boundaries() {
        let t = AgingThresholds::default();
        assert_eq!(aging_bucket(None, &t), AgingBucket::Current);
        assert_eq!(aging_bucket(Some(0), &t), AgingBucket::Current);
        assert_eq!(aging_bucket(Some(1), &t), AgingBucket::Days1To30);
        assert_eq!(aging_bucket(Some(30), &t), AgingBucket::Days1To30);
        assert_eq!(aging_bucket(Some(31), &t), AgingBucket::Days31To60);
        assert_eq!(aging_bucket(Some(90), &t), AgingBucket::Days61To90);
        assert_eq!(aging_bucket(Some(91), &t), AgingBucket::Over90);
    }

    #[test]
    fn test_aging_summary_skips_settled_and_keeps_all_buckets() {
        let entries = vec![
            (100.0, Some("2024-07-10")),
            (50.0, Some("2024-06-20")),
            (0.0, Some("2024-01-01")),
            (25.0, Some("2024-02-01")),
        ];
        let summary = aging_summary(entries, today(), &AgingThresholds::default());
        assert_eq!(summary.lines.len(), 5);
        assert_eq!(summary.total, 175.0);
        assert_eq!(summary.amount(AgingBucket::Current), 100.0);
        assert_eq!(summary.amount(AgingBucket::Days1To30), 50.0);
        assert_eq!(summary.amount(AgingBucket::Over90), 25.0);
        assert_eq!(summary.amount(AgingBucket::Days31To60), 0.0);
        let shares: f64 = summary.shares().iter().sum();
        assert!((shares - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_from_config() {
        assert_eq!(AgingThresholds::from_slice(&[15, 45, 120]).second, 45);
        assert_eq!(AgingThresholds::from_slice(&[60, 30, 90]), AgingThresholds::default());
        assert_eq!(AgingThresholds::from_slice(&[30]), AgingThresholds::default());
        assert_eq!(
            AgingBucket::Over90.label(&AgingThresholds::default()),
            "91+ days"
        );
    }

    #[test]
    fn test_due_soon_window() {
        assert!(is_due_soon(Some("2024-07-03"), today(), 7));
        assert!(is_due_soon(Some("2024-06-30"), today(), 7));
        assert!(!is_due_soon(Some("2024-07-08"), today(), 7));
        assert!(!is_due_soon(Some("2024-06-29"), today(), 7));
    }

    #[test]
    fn test_open_to_buy() {
        let plan = OpenToBuyPlan {
            planned_sales: 50_000.0,
            planned_markdowns: 5_000.0,
            planned_end_inventory: 30_000.0,
            beginning_inventory: 25_000.0,
            on_order: 20_000.0,
        };
        assert_eq!(plan.open_to_buy(), 40_000.0);
        assert!(!plan.is_overbought());

        let over = OpenToBuyPlan { on_order: 70_000.0, ..plan };
        assert!(over.is_overbought());
    }

    #[test]
    fn test_ratios() {
        assert_eq!(collection_rate(25.0, 100.0), Some(25.0));
        assert_eq!(collection_rate(25.0, 0.0), None);
        assert_eq!(budget_utilization(50.0, 200.0), Some(25.0));
        assert_eq!(days_sales_outstanding(10_000.0, 30_000.0, 90), Some(30.0));
        assert_eq!(days_sales_outstanding(10_000.0, 0.0, 90), None);
    }

    #[test]
    fn test_status_breakdown() {
        let mut b = StatusBreakdown::default();
        b.add(PaymentStatus::Overdue, 10.0);
        b.add(PaymentStatus::Overdue, 5.0);
        assert_eq!(b.get(PaymentStatus::Overdue).count, 2);
        assert_eq!(b.get(PaymentStatus::Overdue).amount, 15.0);
        assert_eq!(PaymentStatus::from_code("PAID"), Some(PaymentStatus::Paid));
    }
}
