use crate::domain::a012_production::store::use_production_store;
use crate::layout::notifications::use_notifications;
use crate::shared::components::Badge;
use crate::shared::date_utils::format_datetime;
use crate::shared::form_utils::opt_text;
use crate::shared::icons::icon;
use chrono::Utc;
use contracts::domain::a012_production::aggregate::ProductionOrder;
use contracts::domain::a012_production::approval::{ApprovalDecision, ApprovalFlow, ApprovalStage};
use leptos::prelude::*;

/// One line under the approvals table describing where the flow stands.
pub fn flow_summary(flow: &ApprovalFlow) -> String {
    if flow.is_approved() {
        return "All stages approved, production can start".to_string();
    }
    if flow.is_rejected() {
        let stage = flow
            .approvals
            .iter()
            .find(|a| a.decision == ApprovalDecision::Rejected)
            .map(|a| a.stage.label())
            .unwrap_or_default();
        return format!("Rejected at {}; reopen to resubmit", stage);
    }
    match flow.current_stage() {
        Some(stage) => format!(
            "Waiting for {} sign-off ({} of {} approved)",
            stage,
            flow.approved_count(),
            ApprovalStage::all().len()
        ),
        None => String::new(),
    }
}

/// Sequential sign-off of one production order.
#[component]
pub fn ApprovalPanel(order: ProductionOrder) -> impl IntoView {
    let store = use_production_store();
    let notifications = use_notifications();
    let order_id = order.id.clone();
    let order = StoredValue::new(order);

    let flow = Memo::new(move |_| store.record(&order_id).map(|r| r.approvals));
    let current = Memo::new(move |_| flow.with(|f| f.as_ref().and_then(ApprovalFlow::current_stage)));
    let rejected = Memo::new(move |_| flow.with(|f| f.as_ref().is_some_and(ApprovalFlow::is_rejected)));

    let approver = RwSignal::new(String::new());
    let comment = RwSignal::new(String::new());

    let decide = move |decision: ApprovalDecision| {
        let Some(stage) = current.get_untracked() else {
            return;
        };
        let name = approver.get_untracked();
        let note = opt_text(&comment.get_untracked());
        let result = order.with_value(|o| {
            store.update(o, |r| r.decide(stage, decision, &name, note, Utc::now()))
        });
        match result {
            Ok(()) => {
                notifications.success(format!("{}: {}", stage, decision.label()));
                comment.set(String::new());
            }
            Err(e) => notifications.error(e),
        }
    };

    let reopen = move || {
        let result = order.with_value(|o| {
            store.update(o, |r| {
                r.approvals.reopen();
                Ok(())
            })
        });
        if let Err(e) = result {
            notifications.error(e);
        }
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>"Approvals"</h3>
            </div>

            <div class="table-wrapper">
                <table class="simple-table">
                    <thead>
                        <tr>
                            <th>"Stage"</th>
                            <th>"Decision"</th>
                            <th>"Approver"</th>
                            <th>"Comment"</th>
                            <th>"Decided"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || flow.get().map(|f| f.approvals).unwrap_or_default().into_iter().map(|a| {
                            let is_current = current.get() == Some(a.stage);
                            view! {
                                <tr class={if is_current { "row--current" } else { "" }}>
                                    <td>{a.stage.label()}</td>
                                    <td><Badge variant=a.decision.badge_variant().to_string()>{a.decision.label()}</Badge></td>
                                    <td>{a.approver.unwrap_or_else(|| "—".to_string())}</td>
                                    <td>{a.comment.unwrap_or_default()}</td>
                                    <td>{a.decided_at.map(|t| format_datetime(&t.to_rfc3339())).unwrap_or_else(|| "—".to_string())}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <div class="form-static">
                {move || flow.with(|f| f.as_ref().map(flow_summary).unwrap_or_default())}
            </div>

            <Show when=move || current.get().is_some()>
                <div class="details-form form-row">
                    <div class="form-group">
                        <label for="approver">"Approver"</label>
                        <input
                            type="text"
                            id="approver"
                            placeholder="Name"
                            prop:value=move || approver.get()
                            on:input=move |ev| approver.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group form-group--wide">
                        <label for="approval_comment">"Comment"</label>
                        <input
                            type="text"
                            id="approval_comment"
                            prop:value=move || comment.get()
                            on:input=move |ev| comment.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="details-actions">
                    <button class="btn btn-primary" on:click=move |_| decide(ApprovalDecision::Approved)>
                        {icon("check")}
                        {move || format!(" Approve {}", current.get().map(|s| s.label()).unwrap_or_default())}
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| decide(ApprovalDecision::Rejected)>
                        {icon("x")}
                        " Reject"
                    </button>
                </div>
            </Show>

            <Show when=move || rejected.get()>
                <div class="details-actions">
                    <button class="btn btn-secondary" on:click=move |_| reopen()>
                        {icon("refresh")}
                        " Reopen"
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
    fn test_flow_summary() {
        let mut flow = ApprovalFlow::new("mo1");
        assert_eq!(flow_summary(&flow), "Waiting for Design sign-off (0 of 4 approved)");

        flow.decide(ApprovalStage::Design, ApprovalDecision::Approved, "ann", None, now())
            .unwrap();
        flow.decide(ApprovalStage::Sample, ApprovalDecision::Rejected, "bob", None, now())
            .unwrap();
        assert_eq!(flow_summary(&flow), "Rejected at Sample; reopen to resubmit");

        flow.reopen();
        for stage in [ApprovalStage::Sample, ApprovalStage::Costing, ApprovalStage::Production] {
            flow.decide(stage, ApprovalDecision::Approved, "ann", None, now())
                .unwrap();
        }
        assert_eq!(flow_summary(&flow), "All stages approved, production can start");
    }
}
