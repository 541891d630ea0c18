use super::aggregate::{ProductionOrder, ProductionStatus};
use super::approval::{ApprovalDecision, ApprovalFlow, ApprovalStage};
use super::batch::{generate_batch_number, next_sequence, Batch, MaterialLot, QcStatus};
use super::error::WorkflowError;
use super::wip::{WipBoard, WipStage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shop-floor state kept for one production order: sign-off, WIP and batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub order_id: String,
    pub order_number: String,
    pub product_id: Option<String>,
    pub approvals: ApprovalFlow,
    pub wip: WipBoard,
    pub batches: Vec<Batch>,
}

impl ProductionRecord {
    pub fn new(order: &ProductionOrder) -> Self {
        Self {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            product_id: order.product_id.clone(),
            approvals: ApprovalFlow::new(order.id.clone()),
            wip: WipBoard::new(order.id.clone(), order.quantity),
            batches: Vec::new(),
        }
    }

    pub fn decide(
        &mut self,
        stage: ApprovalStage,
        decision: ApprovalDecision,
        approver: &str,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        self.approvals
            .decide(stage, decision, approver, comment, now)
            .map(|_| ())
    }

    /// Shop-floor reports are accepted only after full sign-off.
    pub fn record_wip(
        &mut self,
        stage: WipStage,
        completed: u32,
        rejected: u32,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        if !self.approvals.is_approved() {
            return Err(WorkflowError::NotApproved);
        }
        self.wip.record(stage, completed, rejected, now)
    }

    pub fn batched_units(&self) -> u32 {
        self.batches.iter().map(|b| b.quantity).sum()
    }

    /// Packed units not yet assigned to a batch.
    pub fn unbatched_units(&self) -> u32 {
        self.wip.packed().saturating_sub(self.batched_units())
    }

    /// Registers a batch of packed units with the lots it consumed.
    pub fn add_batch(
        &mut self,
        quantity: u32,
        produced_at: Option<String>,
        materials: Vec<MaterialLot>,
        id: String,
    ) -> Result<&Batch, WorkflowError> {
        if quantity == 0 {
            return Err(WorkflowError::EmptyBatch);
        }
        let available = self.unbatched_units();
        if quantity > available {
            return Err(WorkflowError::BatchExceedsPacked { available });
        }
        let seq = next_sequence(&self.batches, &self.order_id);
        self.batches.push(Batch {
            id,
            batch_number: generate_batch_number(&self.order_number, seq),
            production_order_id: self.order_id.clone(),
            product_id: self.product_id.clone(),
            quantity,
            produced_at,
            materials,
            qc_status: QcStatus::Pending,
        });
        self.batches.last().ok_or(WorkflowError::EmptyBatch)
    }

    pub fn set_qc_status(&mut self, batch_number: &str, status: QcStatus) -> Result<(), WorkflowError> {
        let batch = self
            .batches
            .iter_mut()
            .find(|b| b.batch_number == batch_number)
            .ok_or_else(|| WorkflowError::UnknownBatch(batch_number.to_string()))?;
        batch.qc_status = status;
        Ok(())
    }

    /// Status implied by the recorded state; closed API statuses are kept.
    pub fn derived_status(&self, api_status: ProductionStatus) -> ProductionStatus {
        if api_status.is_closed() {
            return api_status;
        }
        if self.wip.planned > 0 && self.wip.packed() >= self.wip.planned {
            ProductionStatus::Completed
        } else if self.wip.is_started() {
            ProductionStatus::InProgress
        } else if self.approvals.is_started() {
            self.approvals.production_status()
        } else {
            api_status
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn record() -> ProductionRecord {
        ProductionRecord::new(&ProductionOrder {
            id: "mo1".into(),
            order_number: "MO-0001".into(),
            quantity: 20,
            ..Default::default()
        })
    }

    fn approve_all(rec: &mut ProductionRecord) {
        for stage in ApprovalStage::all() {
            rec.decide(stage, ApprovalDecision::Approved, "lead", None, now())
                .unwrap();
        }
    }

    #[test]
    fn test_wip_requires_approval() {
        let mut rec = record();
        assert_eq!(
            rec.record_wip(WipStage::Cutting, 5, 0, now()),
            Err(WorkflowError::NotApproved)
        );
        approve_all(&mut rec);
        assert_eq!(rec.derived_status(ProductionStatus::PendingApproval), ProductionStatus::Approved);
        rec.record_wip(WipStage::Cutting, 5, 0, now()).unwrap();
        assert_eq!(rec.derived_status(ProductionStatus::Approved), ProductionStatus::InProgress);
        assert_eq!(rec.derived_status(ProductionStatus::Cancelled), ProductionStatus::Cancelled);
    }

    #[test]
    fn test_completed_only_when_plan_is_packed() {
        let mut rec = record();
        approve_all(&mut rec);
        rec.record_wip(WipStage::Cutting, 0, 20, now()).unwrap();
        assert_eq!(rec.wip.packed(), 0);
        assert_eq!(rec.derived_status(ProductionStatus::Approved), ProductionStatus::InProgress);

        let mut rec = record();
        approve_all(&mut rec);
        for stage in WipStage::all() {
            rec.record_wip(stage, 20, 0, now()).unwrap();
        }
        assert_eq!(rec.derived_status(ProductionStatus::InProgress), ProductionStatus::Completed);
    }

    #[test]
    fn test_batches_limited_to_packed_units() {
        let mut rec = record();
        approve_all(&mut rec);
        for stage in WipStage::all() {
            rec.record_wip(stage, 12, 0, now()).unwrap();
        }
        assert_eq!(rec.unbatched_units(), 12);

        let batch = rec.add_batch(10, Some("2024-06-02".into()), vec![], "b1".into()).unwrap();
        assert_eq!(batch.batch_number, "MO-0001-B001");
        assert_eq!(
            rec.add_batch(3, None, vec![], "b2".into()).unwrap_err(),
            WorkflowError::BatchExceedsPacked { available: 2 }
        );
        assert_eq!(rec.add_batch(0, None, vec![], "b2".into()).unwrap_err(), WorkflowError::EmptyBatch);
        let second = rec.add_batch(2, None, vec![], "b2".into()).unwrap();
        assert_eq!(second.batch_number, "MO-0001-B002");

        assert_eq!(rec.set_qc_status("MO-0001-B002", QcStatus::Passed), Ok(()));
        assert_eq!(
            rec.set_qc_status("nope", QcStatus::Passed),
            Err(WorkflowError::UnknownBatch("nope".into()))
        );
        assert_eq!(rec.batches[1].qc_status, QcStatus::Passed);
    }
}
