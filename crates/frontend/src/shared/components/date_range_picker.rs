use chrono::{Datelike, Duration, NaiveDate};
use leptos::prelude::*;
use thaw::*;

/// First and last day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)?;
    let next_month = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)?
    };
    Some((start, next_month - Duration::days(1)))
}

/// Month before the one containing `day`.
pub fn previous_month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let (start, _) = month_bounds(day)?;
    month_bounds(start - Duration::days(1))
}

fn to_iso(range: (NaiveDate, NaiveDate)) -> (String, String) {
    (
        range.0.format("%Y-%m-%d").to_string(),
        range.1.format("%Y-%m-%d").to_string(),
    )
}

/// Period selector: two date inputs plus quick presets.
///
/// Dates are `yyyy-mm-dd`; an empty string leaves that side open.
#[component]
pub fn DateRangePicker(
    #[prop(into)]
    date_from: Signal<String>,

    #[prop(into)]
    date_to: Signal<String>,

    /// Called with (from, to)
    on_change: Callback<(String, String)>,

    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let today = move || chrono::Local::now().date_naive();

    let on_current_month = move |_| {
        if let Some(range) = month_bounds(today()) {
            on_change.run(to_iso(range));
        }
    };

    // Steps back from the selected start, or from today when the range is open.
    let on_previous_month = move |_| {
        let anchor = NaiveDate::parse_from_str(&date_from.get_untracked(), "%Y-%m-%d")
            .unwrap_or_else(|_| today());
        if let Some(range) = previous_month_bounds(anchor) {
            on_change.run(to_iso(range));
        }
    };

    let on_year_to_date = move |_| {
        let now = today();
        if let Some(start) = NaiveDate::from_ymd_opt(now.year(), 1, 1) {
            on_change.run(to_iso((start, now)));
        }
    };

    let on_all_time = move |_| on_change.run((String::new(), String::new()));

    view! {
        <div class="date-range-picker">
            {label.map(|l| view! { <Label>{l}</Label> })}
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || date_from.get()
                    on:change=move |ev| on_change.run((event_target_value(&ev), date_to.get_untracked()))
                />
                <span>"—"</span>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || date_to.get()
                    on:change=move |ev| on_change.run((date_from.get_untracked(), event_target_value(&ev)))
                />
                <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=on_current_month>
                    "This month"
                </Button>
                <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=on_previous_month>
                    "Previous month"
                </Button>
                <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=on_year_to_date>
                    "Year to date"
                </Button>
                <Button appearance=ButtonAppearance::Subtle size=ButtonSize::Small on_click=on_all_time>
                    "All time"
                </Button>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(d(2024, 2, 14)), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(month_bounds(d(2023, 12, 31)), Some((d(2023, 12, 1), d(2023, 12, 31))));
    }

    #[test]
    fn test_previous_month_crosses_year() {
        assert_eq!(previous_month_bounds(d(2024, 1, 10)), Some((d(2023, 12, 1), d(2023, 12, 31))));
    }
}
