use super::batches::lots_summary;
use crate::domain::a012_production::store::use_production_store;
use crate::shared::components::Badge;
use crate::shared::date_utils::format_opt_date;
use contracts::domain::a012_production::batch::{Batch, Traceability};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    Any,
    SupplierLot,
    Material,
}

impl TraceMode {
    pub fn all() -> [TraceMode; 3] {
        [TraceMode::Any, TraceMode::SupplierLot, TraceMode::Material]
    }

    pub fn code(&self) -> &'static str {
        match self {
            TraceMode::Any => "any",
            TraceMode::SupplierLot => "lot",
            TraceMode::Material => "material",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TraceMode::Any => "Batch, lot or material",
            TraceMode::SupplierLot => "Exact supplier lot",
            TraceMode::Material => "Material id or name",
        }
    }

    pub fn from_code(code: &str) -> TraceMode {
        TraceMode::all()
            .into_iter()
            .find(|m| m.code() == code)
            .unwrap_or(TraceMode::Any)
    }
}

/// Batches matching a traceability query. Exact lookups need a query.
pub fn trace(batches: &[Batch], mode: TraceMode, query: &str) -> Vec<Batch> {
    let index = Traceability::new(batches);
    let query = query.trim();
    let found = match mode {
        TraceMode::Any => index.search(query),
        _ if query.is_empty() => Vec::new(),
        TraceMode::SupplierLot => index.by_supplier_lot(query),
        TraceMode::Material => index.by_material(query),
    };
    found.into_iter().cloned().collect()
}

/// Recall lookup across the batches of every production order in the session.
#[component]
pub fn TraceabilitySearch() -> impl IntoView {
    let store = use_production_store();
    let mode = RwSignal::new(TraceMode::Any);
    let query = RwSignal::new(String::new());

    let results = Memo::new(move |_| {
        let batches = store.all_batches();
        query.with(|q| trace(&batches, mode.get(), q))
    });

    view! {
        <div class="details-container">
            <div class="details-header">
                <h3>"Traceability"</h3>
            </div>

            <div class="details-form form-row">
                <div class="form-group">
                    <label for="trace_mode">"Search by"</label>
                    <select
                        id="trace_mode"
                        on:change=move |ev| mode.set(TraceMode::from_code(&event_target_value(&ev)))
                    >
                        {TraceMode::all()
                            .into_iter()
                            .map(|m| view! { <option value=m.code()>{m.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-group form-group--wide">
                    <label for="trace_query">"Query"</label>
                    <input
                        type="text"
                        id="trace_query"
                        placeholder="MO-0042-B001, L-881, denim..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="table-wrapper">
                <table class="simple-table">
                    <thead>
                        <tr>
                            <th>"Batch"</th>
                            <th>"Production order"</th>
                            <th class="text-right">"Units"</th>
                            <th>"Produced"</th>
                            <th>"QC"</th>
                            <th>"Material lots"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let found = results.get();
                            if found.is_empty() {
                                return view! {
                                    <tr><td colspan="6" class="text-muted">"No batches found"</td></tr>
                                }.into_any();
                            }
                            found.into_iter().map(|b| {
                                let order_number = store
                                    .order_number(&b.production_order_id)
                                    .unwrap_or_else(|| b.production_order_id.clone());
                                view! {
                                    <tr>
                                        <td><strong>{b.batch_number.clone()}</strong></td>
                                        <td>{order_number}</td>
                                        <td class="text-right">{b.quantity}</td>
                                        <td>{format_opt_date(b.produced_at.as_deref())}</td>
                                        <td><Badge variant=b.qc_status.badge_variant().to_string()>{b.qc_status.label()}</Badge></td>
                                        <td>{lots_summary(&b.materials)}</td>
                                    </tr>
                                }
                            }).collect_view().into_any()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a012_production::batch::MaterialLot;

    fn batch(number: &str, order: &str, lot: &str, material: &str) -> Batch {
        Batch {
            id: number.to_lowercase(),
            batch_number: number.into(),
            production_order_id: order.into(),
            quantity: 10,
            materials: vec![MaterialLot {
                material_name: material.into(),
                supplier_lot: lot.into(),
                quantity: 5.0,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_trace_modes() {
        let batches = vec![
            batch("MO-1-B001", "mo1", "L-881", "Denim"),
            batch("MO-2-B001", "mo2", "L-8810", "Twill"),
        ];
        assert_eq!(trace(&batches, TraceMode::Any, "").len(), 2);
        assert_eq!(trace(&batches, TraceMode::Any, "l-881").len(), 2);
        assert_eq!(trace(&batches, TraceMode::SupplierLot, "l-881").len(), 1);
        assert_eq!(trace(&batches, TraceMode::Material, "twill")[0].batch_number, "MO-2-B001");
        assert!(trace(&batches, TraceMode::SupplierLot, "  ").is_empty());
    }

    #[test]
    fn test_mode_codes() {
        for m in TraceMode::all() {
            assert_eq!(TraceMode::from_code(m.code()), m);
        }
        assert_eq!(TraceMode::from_code("?"), TraceMode::Any);
    }
}
