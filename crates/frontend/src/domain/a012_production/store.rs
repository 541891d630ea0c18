//! Session state of the shop floor.
//!
//! Approvals, WIP reports and batches are not stored by the API; they live here
//! for the lifetime of the page, keyed by production order id.

use contracts::domain::a012_production::aggregate::{ProductionOrder, ProductionStatus};
use contracts::domain::a012_production::batch::Batch;
use contracts::domain::a012_production::record::ProductionRecord;
use contracts::domain::a012_production::WorkflowError;
use leptos::prelude::*;
use std::collections::HashMap;

/// Runs `action` on the record of `order`, creating the record on first use.
pub fn apply_to_record<T>(
    records: &mut HashMap<String, ProductionRecord>,
    order: &ProductionOrder,
    action: impl FnOnce(&mut ProductionRecord) -> Result<T, WorkflowError>,
) -> Result<T, WorkflowError> {
    let record = records
        .entry(order.id.clone())
        .or_insert_with(|| ProductionRecord::new(order));
    action(record)
}

/// Status shown for an order: what the recorded workflow implies, else the API value.
pub fn status_of(records: &HashMap<String, ProductionRecord>, order: &ProductionOrder) -> ProductionStatus {
    records
        .get(&order.id)
        .map(|r| r.derived_status(order.status))
        .unwrap_or(order.status)
}

#[derive(Clone, Copy)]
pub struct ProductionStore {
    records: RwSignal<HashMap<String, ProductionRecord>>,
}

impl ProductionStore {
    pub fn new() -> Self {
        Self {
            records: RwSignal::new(HashMap::new()),
        }
    }

    /// Tracked copy of an order's record.
    pub fn record(&self, order_id: &str) -> Option<ProductionRecord> {
        self.records.with(|m| m.get(order_id).cloned())
    }

    pub fn ensure(&self, order: &ProductionOrder) {
        let exists = self.records.with_untracked(|m| m.contains_key(&order.id));
        if !exists {
            self.records.update(|m| {
                m.insert(order.id.clone(), ProductionRecord::new(order));
            });
        }
    }

    /// Mutates one record; the error is ready for a toast.
    pub fn update<T>(
        &self,
        order: &ProductionOrder,
        action: impl FnOnce(&mut ProductionRecord) -> Result<T, WorkflowError>,
    ) -> Result<T, String> {
        self.records
            .try_update(|m| apply_to_record(m, order, action))
            .ok_or_else(|| "Production data is no longer available".to_string())?
            .map_err(|e| e.to_string())
    }

    pub fn status(&self, order: &ProductionOrder) -> ProductionStatus {
        self.records.with(|m| status_of(m, order))
    }

    /// Packed share of the plan, `None` until the order has a record.
    pub fn progress(&self, order_id: &str) -> Option<f64> {
        self.records.with(|m| m.get(order_id).map(|r| r.wip.overall_progress()))
    }

    /// Batches of every order, for traceability lookups.
    pub fn all_batches(&self) -> Vec<Batch> {
        self.records.with(|m| {
            let mut batches: Vec<Batch> = m.values().flat_map(|r| r.batches.iter().cloned()).collect();
            batches.sort_by(|a, b| a.batch_number.cmp(&b.batch_number));
            batches
        })
    }

    /// Order number of a record, for labelling batches.
    pub fn order_number(&self, order_id: &str) -> Option<String> {
        self.records
            .with(|m| m.get(order_id).map(|r| r.order_number.clone()))
    }
}

pub fn use_production_store() -> ProductionStore {
    use_context::<ProductionStore>().expect("ProductionStore not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use contracts::domain::a012_production::approval::{ApprovalDecision, ApprovalStage};
    use contracts::domain::a012_production::batch::QcStatus;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn order() -> ProductionOrder {
        ProductionOrder {
            id: "mo1".into(),
            order_number: "MO-0001".into(),
            quantity: 50,
            status: ProductionStatus::Draft,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_created_on_first_action() {
        let mut records = HashMap::new();
        let o = order();
        assert_eq!(status_of(&records, &o), ProductionStatus::Draft);

        apply_to_record(&mut records, &o, |r| {
            r.decide(ApprovalStage::Design, ApprovalDecision::Approved, "ann", None, now())
        })
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(status_of(&records, &o), ProductionStatus::PendingApproval);
    }

    #[test]
    fn test_failed_action_keeps_record() {
        let mut records = HashMap::new();
        let o = order();
        let err = apply_to_record(&mut records, &o, |r| {
            r.decide(ApprovalStage::Costing, ApprovalDecision::Approved, "ann", None, now())
        })
        .unwrap_err();
        assert!(matches!(err, WorkflowError::StageOutOfOrder { .. }));
        assert_eq!(records["mo1"].approvals.approved_count(), 0);
    }

    #[test]
    fn test_qc_update_on_unknown_batch_fails() {
        let mut records = HashMap::new();
        let o = order();
        let err = apply_to_record(&mut records, &o, |r| r.set_qc_status("MO-0001-B009", QcStatus::Failed)).unwrap_err();
        assert_eq!(err, WorkflowError::UnknownBatch("MO-0001-B009".into()));
        assert_eq!(err.to_string(), "Batch MO-0001-B009 not found");
    }
}
