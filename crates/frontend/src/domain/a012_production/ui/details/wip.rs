use crate::domain::a012_production::store::use_production_store;
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::format_number_with_decimals;
use crate::shared::components::StatCard;
use crate::shared::icons::icon;
use chrono::Utc;
use contracts::domain::a012_production::aggregate::ProductionOrder;
use contracts::domain::a012_production::wip::{WipBoard, WipStage};
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;

/// Scrap above this share of the plan is flagged red
const SCRAP_WARNING_PERCENT: f64 = 3.0;

/// Unit count typed on the shop-floor form; blank counts as zero.
pub fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        Some(0)
    } else {
        raw.parse().ok()
    }
}

/// Stage to preselect: the first one with units waiting.
pub fn next_reporting_stage(board: &WipBoard) -> WipStage {
    board
        .stages
        .iter()
        .find(|t| t.waiting() > 0)
        .map(|t| t.stage)
        .unwrap_or(WipStage::Cutting)
}

fn stage_from_code(code: &str) -> Option<WipStage> {
    WipStage::all().into_iter().find(|s| format!("{:?}", s) == code)
}

/// Work in progress per stage with the shop-floor reporting form.
#[component]
pub fn WipPanel(order: ProductionOrder) -> impl IntoView {
    let store = use_production_store();
    let notifications = use_notifications();
    let order_id = order.id.clone();
    let order = StoredValue::new(order);

    let record = Memo::new(move |_| store.record(&order_id));
    let board = Memo::new(move |_| record.with(|r| r.as_ref().map(|r| r.wip.clone())));
    let approved = Memo::new(move |_| record.with(|r| r.as_ref().is_some_and(|r| r.approvals.is_approved())));

    let stage = RwSignal::new(WipStage::Cutting);
    let completed = RwSignal::new(String::new());
    let rejected = RwSignal::new(String::new());

    Effect::new(move |_| {
        if let Some(b) = board.get() {
            stage.set(next_reporting_stage(&b));
        }
    });

    let metric = move |f: fn(&WipBoard) -> f64| Signal::derive(move || board.with(|b| b.as_ref().map(f)));
    let scrap = metric(WipBoard::scrap_rate);

    let submit = move || {
        let (Some(done), Some(scrapped)) = (
            parse_count(&completed.get_untracked()),
            parse_count(&rejected.get_untracked()),
        ) else {
            notifications.error("Quantities must be whole numbers");
            return;
        };
        if done == 0 && scrapped == 0 {
            notifications.info("Nothing to report");
            return;
        }
        let at = stage.get_untracked();
        let result = order.with_value(|o| store.update(o, |r| r.record_wip(at, done, scrapped, Utc::now())));
        match result {
            Ok(()) => {
                notifications.success(format!("{}: {} done, {} rejected", at, done, scrapped));
                completed.set(String::new());
                rejected.set(String::new());
            }
            Err(e) => notifications.error(e),
        }
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>"Work in progress"</h3>
            </div>

            <div class="stat-grid">
                <StatCard label="Packed" icon_name="check" value=metric(WipBoard::overall_progress) format=ValueFormat::percent()
                    subtitle=Signal::derive(move || board.with(|b| b.as_ref().map(|b| format!("{} of {} units", b.packed(), b.planned))))
                />
                <StatCard label="Rejected" icon_name="alert-triangle" value=metric(|b| b.rejected_total() as f64) format=ValueFormat::Integer />
                <StatCard label="Scrap rate" icon_name="percent" value=scrap format=ValueFormat::percent()
                    status=Signal::derive(move || IndicatorStatus::lower_is_better(scrap.get().unwrap_or(0.0), SCRAP_WARNING_PERCENT))
                />
                <StatCard label="Bottleneck" icon_name="clock" value=Signal::derive(move || {
                        board.with(|b| b.as_ref().and_then(|b| b.bottleneck().and_then(|s| b.stage(s)).map(|t| t.waiting() as f64)))
                    })
                    format=ValueFormat::Integer
                    subtitle=Signal::derive(move || board.with(|b| b.as_ref().map(|b| match b.bottleneck() {
                        Some(s) => format!("units waiting at {}", s),
                        None => "nothing waiting".to_string(),
                    })))
                />
            </div>

            <div class="table-wrapper">
                <table class="simple-table">
                    <thead>
                        <tr>
                            <th>"Stage"</th>
                            <th class="text-right">"In"</th>
                            <th class="text-right">"Completed"</th>
                            <th class="text-right">"Rejected"</th>
                            <th class="text-right">"Waiting"</th>
                            <th>"Progress"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || board.get().map(|b| {
                            let bottleneck = b.bottleneck();
                            let planned = b.planned;
                            b.stages.into_iter().map(|t| {
                                let pct = t.progress_pct(planned);
                                view! {
                                    <tr class={if bottleneck == Some(t.stage) { "row--warning" } else { "" }}>
                                        <td>{t.stage.label()}</td>
                                        <td class="text-right">{t.quantity_in}</td>
                                        <td class="text-right">{t.completed}</td>
                                        <td class="text-right">{t.rejected}</td>
                                        <td class="text-right">{t.waiting()}</td>
                                        <td>
                                            <div class="progress">
                                                <div class="progress__bar" style=format!("width: {:.0}%", pct.min(100.0))></div>
                                            </div>
                                            <span class="progress__label">{format!("{}%", format_number_with_decimals(pct, 0))}</span>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        })}
                    </tbody>
                </table>
            </div>

            {move || board.get().filter(|b| b.is_finished() && b.packed() < b.planned).map(|b| view! {
                <div class="alert alert--warning">
                    {format!("Line cleared short: {} of {} units packed", b.packed(), b.planned)}
                </div>
            })}

            <Show
                when=move || approved.get()
                fallback=|| view! { <div class="form-static">"Shop-floor reports open once every approval stage is signed off"</div> }
            >
                <div class="details-form form-row">
                    <div class="form-group">
                        <label for="wip_stage">"Stage"</label>
                        <select
                            id="wip_stage"
                            on:change=move |ev| {
                                if let Some(s) = stage_from_code(&event_target_value(&ev)) {
                                    stage.set(s);
                                }
                            }
                        >
                            {move || {
                                let current = stage.get();
                                WipStage::all()
                                    .into_iter()
                                    .map(|s| view! { <option value=format!("{:?}", s) selected={s == current}>{s.label()}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="wip_completed">"Completed"</label>
                        <input
                            type="number"
                            id="wip_completed"
                            min="0"
                            step="1"
                            prop:value=move || completed.get()
                            on:input=move |ev| completed.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="wip_rejected">"Rejected"</label>
                        <input
                            type="number"
                            id="wip_rejected"
                            min="0"
                            step="1"
                            prop:value=move || rejected.get()
                            on:input=move |ev| rejected.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="details-actions">
                    <button class="btn btn-primary" on:click=move |_| submit()>
                        {icon("save")}
                        " Record"
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count(" 12 "), Some(12));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("2.5"), None);
    }

    #[test]
    fn test_next_reporting_stage() {
        let mut board = WipBoard::new("mo1", 10);
        assert_eq!(next_reporting_stage(&board), WipStage::Cutting);
        board.record(WipStage::Cutting, 10, 0, now()).unwrap();
        assert_eq!(next_reporting_stage(&board), WipStage::Sewing);
    }

    #[test]
    fn test_stage_codes() {
        for s in WipStage::all() {
            assert_eq!(stage_from_code(&format!("{:?}", s)), Some(s));
        }
        assert_eq!(stage_from_code("Ironing"), None);
    }
}
