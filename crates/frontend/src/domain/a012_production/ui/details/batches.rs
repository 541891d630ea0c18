use crate::domain::a012_production::store::use_production_store;
use crate::layout::notifications::use_notifications;
use crate::shared::api::fetch_one;
use crate::shared::components::table::format_number_with_decimals;
use crate::shared::components::Badge;
use crate::shared::date_utils::{format_opt_date, today};
use crate::shared::form_utils::{opt_text, parse_opt_f64};
use crate::shared::icons::icon;
use contracts::domain::a011_bom::aggregate::Bom;
use contracts::domain::a012_production::aggregate::ProductionOrder;
use contracts::domain::a012_production::batch::{Batch, MaterialLot, QcStatus, Traceability};
use contracts::domain::common::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::wip::parse_count;

/// Editable material lot row of the new-batch form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LotDraft {
    pub material_id: Option<String>,
    pub material_name: String,
    pub supplier_id: Option<String>,
    pub supplier_lot: String,
    pub quantity: String,
}

/// One row per BOM material, quantities scaled to `units`.
pub fn drafts_from_bom(bom: &Bom, units: u32) -> Vec<LotDraft> {
    bom.requirements(units)
        .into_iter()
        .map(|req| {
            let supplier_id = bom
                .lines
                .iter()
                .find(|l| l.material_id == req.material_id && l.material_name == req.material_name)
                .and_then(|l| l.supplier_id.clone());
            LotDraft {
                material_id: req.material_id,
                material_name: req.material_name,
                supplier_id,
                supplier_lot: String::new(),
                quantity: format!("{:.2}", req.quantity),
            }
        })
        .collect()
}

/// Lots of the new batch. Blank rows are skipped; a material without its
/// supplier lot cannot be traced and is refused.
pub fn lots_from_drafts(drafts: &[LotDraft]) -> Result<Vec<MaterialLot>, String> {
    let mut lots = Vec::new();
    for draft in drafts {
        let name = draft.material_name.trim();
        let lot = draft.supplier_lot.trim();
        if name.is_empty() && lot.is_empty() {
            continue;
        }
        if name.is_empty() {
            return Err(format!("Lot {} has no material", lot));
        }
        if lot.is_empty() {
            return Err(format!("Supplier lot is required for {}", name));
        }
        let quantity = if draft.quantity.trim().is_empty() {
            0.0
        } else {
            parse_opt_f64(&draft.quantity)
                .filter(|q| *q >= 0.0)
                .ok_or_else(|| format!("Quantity of {} is not valid", name))?
        };
        lots.push(MaterialLot {
            material_id: draft.material_id.clone(),
            material_name: name.to_string(),
            supplier_id: draft.supplier_id.clone(),
            supplier_lot: lot.to_string(),
            quantity,
        });
    }
    Ok(lots)
}

pub fn lots_summary(lots: &[MaterialLot]) -> String {
    if lots.is_empty() {
        return "—".to_string();
    }
    lots.iter()
        .map(|l| format!("{} {} ({})", l.material_name, l.supplier_lot, format_number_with_decimals(l.quantity, 2)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn qc_from_label(label: &str) -> Option<QcStatus> {
    QcStatus::all().into_iter().find(|s| s.label() == label)
}

/// Batches registered for one order and the form for a new one.
#[component]
pub fn BatchPanel(order: ProductionOrder) -> impl IntoView {
    let store = use_production_store();
    let notifications = use_notifications();
    let order_id = order.id.clone();
    let bom_id = order.bom_id.clone();
    let order = StoredValue::new(order);

    let record = Memo::new(move |_| store.record(&order_id));
    let batches = Memo::new(move |_| record.with(|r| r.as_ref().map(|r| r.batches.clone()).unwrap_or_default()));
    let unbatched = Memo::new(move |_| record.with(|r| r.as_ref().map_or(0, |r| r.unbatched_units())));

    let bom = RwSignal::new(None::<Bom>);
    if let Some(bom_id) = bom_id {
        spawn_local(async move {
            match fetch_one::<Bom>(Bom::endpoint(), &bom_id).await {
                Ok(loaded) => bom.set(Some(loaded)),
                Err(e) => log::warn!("BOM {} of production order: {}", bom_id, e),
            }
        });
    }

    let quantity = RwSignal::new(String::new());
    let produced_at = RwSignal::new(today().format("%Y-%m-%d").to_string());
    let drafts = RwSignal::new(vec![LotDraft::default()]);

    let fill_from_bom = move || {
        let units = parse_count(&quantity.get_untracked()).unwrap_or(0);
        if units == 0 {
            notifications.info("Enter the batch quantity first");
            return;
        }
        if let Some(rows) = bom.with_untracked(|b| b.as_ref().map(|b| drafts_from_bom(b, units))) {
            drafts.set(rows);
        }
    };

    let edit_draft = move |idx: usize, apply: fn(&mut LotDraft, String), value: String| {
        drafts.update(|d| {
            if let Some(draft) = d.get_mut(idx) {
                apply(draft, value);
            }
        });
    };
    let draft_value = move |idx: usize, read: fn(&LotDraft) -> String| {
        drafts.with(|d| d.get(idx).map(read).unwrap_or_default())
    };

    let submit = move || {
        let Some(units) = parse_count(&quantity.get_untracked()) else {
            notifications.error("Batch quantity must be a whole number");
            return;
        };
        let lots = match drafts.with_untracked(|d| lots_from_drafts(d)) {
            Ok(lots) => lots,
            Err(e) => {
                notifications.error(e);
                return;
            }
        };
        let produced = opt_text(&produced_at.get_untracked());
        let id = uuid::Uuid::new_v4().to_string();
        let result = order.with_value(|o| {
            store.update(o, |r| r.add_batch(units, produced, lots, id).map(|b| b.batch_number.clone()))
        });
        match result {
            Ok(number) => {
                notifications.success(format!("Batch {} registered", number));
                quantity.set(String::new());
                drafts.set(vec![LotDraft::default()]);
            }
            Err(e) => notifications.error(e),
        }
    };

    let set_qc = move |batch_number: String, status: QcStatus| {
        let result = order.with_value(|o| store.update(o, |r| r.set_qc_status(&batch_number, status)));
        if let Err(e) = result {
            notifications.error(e);
        }
    };

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>"Batches"</h3>
                <Badge variant="neutral".to_string()>
                    {move || format!("{} packed units not batched", unbatched.get())}
                </Badge>
            </div>

            <div class="table-wrapper">
                <table class="simple-table">
                    <thead>
                        <tr>
                            <th>"Batch"</th>
                            <th class="text-right">"Units"</th>
                            <th>"Produced"</th>
                            <th>"Material lots"</th>
                            <th>"Suppliers"</th>
                            <th>"QC"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || batches.get()
                            key=|b| (b.id.clone(), b.qc_status)
                            children=move |batch: Batch| {
                                let number = StoredValue::new(batch.batch_number.clone());
                                let current = batch.qc_status;
                                let suppliers = Traceability::suppliers_of(&batch).join(", ");
                                view! {
                                    <tr>
                                        <td><strong>{batch.batch_number.clone()}</strong></td>
                                        <td class="text-right">{batch.quantity}</td>
                                        <td>{format_opt_date(batch.produced_at.as_deref())}</td>
                                        <td>{lots_summary(&batch.materials)}</td>
                                        <td>{if suppliers.is_empty() { "—".to_string() } else { suppliers }}</td>
                                        <td>
                                            <select
                                                class={format!("qc-select qc-select--{}", current.badge_variant())}
                                                on:change=move |ev| {
                                                    if let Some(s) = qc_from_label(&event_target_value(&ev)) {
                                                        set_qc(number.get_value(), s);
                                                    }
                                                }
                                            >
                                                {QcStatus::all()
                                                    .into_iter()
                                                    .map(|s| view! { <option value=s.label() selected={s == current}>{s.label()}</option> })
                                                    .collect_view()}
                                            </select>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <Show when=move || { unbatched.get() > 0 }>
                <div class="details-form form-row">
                    <div class="form-group">
                        <label for="batch_quantity">"Units"</label>
                        <input
                            type="number"
                            id="batch_quantity"
                            min="1"
                            step="1"
                            prop:max=move || unbatched.get().to_string()
                            prop:value=move || quantity.get()
                            on:input=move |ev| quantity.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="batch_produced">"Produced on"</label>
                        <input
                            type="date"
                            id="batch_produced"
                            prop:value=move || produced_at.get()
                            on:change=move |ev| produced_at.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <table class="simple-table lot-table">
                    <thead>
                        <tr>
                            <th>"Material"</th>
                            <th>"Supplier lot"</th>
                            <th>"Quantity"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each={move || (0..drafts.with(Vec::len)).collect::<Vec<_>>()}
                            key=|idx| *idx
                            children=move |idx: usize| view! {
                                <tr>
                                    <td>
                                        <input
                                            type="text"
                                            prop:value=move || draft_value(idx, |d| d.material_name.clone())
                                            on:input=move |ev| edit_draft(idx, |d, v| d.material_name = v, event_target_value(&ev))
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="text"
                                            placeholder="Lot #"
                                            prop:value=move || draft_value(idx, |d| d.supplier_lot.clone())
                                            on:input=move |ev| edit_draft(idx, |d, v| d.supplier_lot = v, event_target_value(&ev))
                                        />
                                    </td>
                                    <td>
                                        <input
                                            type="number"
                                            min="0"
                                            step="0.01"
                                            prop:value=move || draft_value(idx, |d| d.quantity.clone())
                                            on:change=move |ev| edit_draft(idx, |d, v| d.quantity = v, event_target_value(&ev))
                                        />
                                    </td>
                                    <td>
                                        <button
                                            class="btn btn-icon"
                                            title="Remove"
                                            on:click=move |_| drafts.update(|d| {
                                                if idx < d.len() {
                                                    d.remove(idx);
                                                }
                                            })
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>

                <div class="details-actions">
                    <button class="btn btn-secondary" on:click=move |_| drafts.update(|d| d.push(LotDraft::default()))>
                        {icon("plus")}
                        " Add lot"
                    </button>
                    <Show when=move || bom.with(Option::is_some)>
                        <button class="btn btn-secondary" on:click=move |_| fill_from_bom()>
                            {icon("layers")}
                            " Fill from BOM"
                        </button>
                    </Show>
                    <button class="btn btn-primary" on:click=move |_| submit()>
                        {icon("save")}
                        " Register batch"
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a011_bom::aggregate::BomLine;

    #[test]
    fn test_lots_from_drafts() {
        let drafts = vec![
            LotDraft {
                material_name: "Denim 12oz".into(),
                supplier_id: Some("s1".into()),
                supplier_lot: " L-881 ".into(),
                quantity: "42,5".into(),
                ..Default::default()
            },
            LotDraft::default(),
        ];
        let lots = lots_from_drafts(&drafts).unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].supplier_lot, "L-881");
        assert_eq!(lots[0].quantity, 42.5);

        let missing_lot = vec![LotDraft {
            material_name: "Zip".into(),
            ..Default::default()
        }];
        assert_eq!(
            lots_from_drafts(&missing_lot).unwrap_err(),
            "Supplier lot is required for Zip"
        );

        let bad_qty = vec![LotDraft {
            material_name: "Zip".into(),
            supplier_lot: "Z1".into(),
            quantity: "-2".into(),
            ..Default::default()
        }];
        assert!(lots_from_drafts(&bad_qty).is_err());
    }

    #[test]
    fn test_drafts_from_bom() {
        let bom = Bom {
            id: "b1".into(),
            code: "BOM-1".into(),
            lines: vec![BomLine {
                material_id: Some("m1".into()),
                material_name: "Denim".into(),
                quantity: 1.5,
                wastage_pct: 0.0,
                unit_cost: 4.0,
                supplier_id: Some("s1".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let drafts = drafts_from_bom(&bom, 10);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].quantity, "15.00");
        assert_eq!(drafts[0].supplier_id.as_deref(), Some("s1"));
        assert!(drafts[0].supplier_lot.is_empty());
    }
}
