use super::aggregate::ProductionStatus;
use super::error::WorkflowError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign-off stages, in the order they must be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStage {
    Design,
    Sample,
    Costing,
    Production,
}

impl ApprovalStage {
    pub fn all() -> [ApprovalStage; 4] {
        [
            ApprovalStage::Design,
            ApprovalStage::Sample,
            ApprovalStage::Costing,
            ApprovalStage::Production,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStage::Design => "Design",
            ApprovalStage::Sample => "Sample",
            ApprovalStage::Costing => "Costing",
            ApprovalStage::Production => "Production",
        }
    }
}

impl fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalDecision {
    pub fn label(&self) -> &'static str {
        match self {
            ApprovalDecision::Pending => "Pending",
            ApprovalDecision::Approved => "Approved",
            ApprovalDecision::Rejected => "Rejected",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            ApprovalDecision::Pending => "neutral",
            ApprovalDecision::Approved => "success",
            ApprovalDecision::Rejected => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub stage: ApprovalStage,
    pub decision: ApprovalDecision,
    pub approver: Option<String>,
    pub comment: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Approval {
    fn pending(stage: ApprovalStage) -> Self {
        Self {
            stage,
            decision: ApprovalDecision::Pending,
            approver: None,
            comment: None,
            decided_at: None,
        }
    }
}

/// Sequential sign-off of a production order: one approval per stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalFlow {
    pub order_id: String,
    pub approvals: Vec<Approval>,
}

impl ApprovalFlow {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            approvals: ApprovalStage::all().into_iter().map(Approval::pending).collect(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.approvals
            .iter()
            .any(|a| a.decision == ApprovalDecision::Rejected)
    }

    pub fn is_approved(&self) -> bool {
        self.approvals
            .iter()
            .all(|a| a.decision == ApprovalDecision::Approved)
    }

    pub fn is_started(&self) -> bool {
        self.approvals
            .iter()
            .any(|a| a.decision != ApprovalDecision::Pending)
    }

    /// Stage waiting for a decision; `None` once the flow is closed.
    pub fn current_stage(&self) -> Option<ApprovalStage> {
        if self.is_rejected() {
            return None;
        }
        self.approvals
            .iter()
            .find(|a| a.decision == ApprovalDecision::Pending)
            .map(|a| a.stage)
    }

    pub fn approval(&self, stage: ApprovalStage) -> Option<&Approval> {
        self.approvals.iter().find(|a| a.stage == stage)
    }

    pub fn approved_count(&self) -> usize {
        self.approvals
            .iter()
            .filter(|a| a.decision == ApprovalDecision::Approved)
            .count()
    }

    pub fn decide(
        &mut self,
        stage: ApprovalStage,
        decision: ApprovalDecision,
        approver: &str,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&Approval, WorkflowError> {
        if decision == ApprovalDecision::Pending {
            return Err(WorkflowError::InvalidDecision);
        }
        if approver.trim().is_empty() {
            return Err(WorkflowError::MissingApprover);
        }
        let expected = self.current_stage().ok_or(WorkflowError::FlowClosed)?;
        if stage != expected {
            let already = self
                .approval(stage)
                .is_some_and(|a| a.decision != ApprovalDecision::Pending);
            return Err(if already {
                WorkflowError::AlreadyDecided(stage)
            } else {
                WorkflowError::StageOutOfOrder { stage, expected }
            });
        }

        let approval = self
            .approvals
            .iter_mut()
            .find(|a| a.stage == stage)
            .ok_or(WorkflowError::FlowClosed)?;
        approval.decision = decision;
        approval.approver = Some(approver.trim().to_string());
        approval.comment = comment.filter(|c| !c.trim().is_empty());
        approval.decided_at = Some(now);
        Ok(approval)
    }

    /// Clears the rejected stage and everything after it so the order can be resubmitted.
    pub fn reopen(&mut self) {
        let Some(idx) = self
            .approvals
            .iter()
            .position(|a| a.decision == ApprovalDecision::Rejected)
        else {
            return;
        };
        for approval in &mut self.approvals[idx..] {
            *approval = Approval::pending(approval.stage);
        }
    }

    /// Order status implied by the flow.
    pub fn production_status(&self) -> ProductionStatus {
        if self.is_approved() {
            ProductionStatus::Approved
        } else if self.is_rejected() {
            ProductionStatus::Draft
        } else {
            ProductionStatus::PendingApproval
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

    #[test]
    fn test_stages_must_be_decided_in_order() {
        let mut flow = ApprovalFlow::new("mo1");
        assert_eq!(flow.current_stage(), Some(ApprovalStage::Design));
        assert_eq!(
            flow.decide(ApprovalStage::Costing, ApprovalDecision::Approved, "ann", None, now()),
            Err(WorkflowError::StageOutOfOrder {
                stage: ApprovalStage::Costing,
                expected: ApprovalStage::Design
            })
        );
        flow.decide(ApprovalStage::Design, ApprovalDecision::Approved, "ann", None, now())
            .unwrap();
        assert_eq!(
            flow.decide(ApprovalStage::Design, ApprovalDecision::Approved, "ann", None, now()),
            Err(WorkflowError::AlreadyDecided(ApprovalStage::Design))
        );
        assert_eq!(flow.current_stage(), Some(ApprovalStage::Sample));
        assert_eq!(flow.production_status(), ProductionStatus::PendingApproval);
    }

    #[test]
    fn test_full_approval() {
        let mut flow = ApprovalFlow::new("mo1");
        for stage in ApprovalStage::all() {
            let approval = flow
                .decide(stage, ApprovalDecision::Approved, "lead", Some(" ".into()), now())
                .unwrap();
            assert_eq!(approval.comment, None);
        }
        assert!(flow.is_approved());
        assert_eq!(flow.current_stage(), None);
        assert_eq!(flow.approved_count(), 4);
        assert_eq!(flow.production_status(), ProductionStatus::Approved);
        assert_eq!(
            flow.decide(ApprovalStage::Production, ApprovalDecision::Rejected, "lead", None, now()),
            Err(WorkflowError::FlowClosed)
        );
    }

    #[test]
    fn test_rejection_closes_and_reopen() {
        let mut flow = ApprovalFlow::new("mo1");
        flow.decide(ApprovalStage::Design, ApprovalDecision::Approved, "ann", None, now())
            .unwrap();
        flow.decide(
            ApprovalStage::Sample,
            ApprovalDecision::Rejected,
            "bob",
            Some("Fit issue at hip".into()),
            now(),
        )
        .unwrap();
        assert!(flow.is_rejected());
        assert_eq!(flow.current_stage(), None);
        assert_eq!(flow.production_status(), ProductionStatus::Draft);
        assert_eq!(
            flow.decide(ApprovalStage::Costing, ApprovalDecision::Approved, "ann", None, now()),
            Err(WorkflowError::FlowClosed)
        );

        flow.reopen();
        assert_eq!(flow.current_stage(), Some(ApprovalStage::Sample));
        assert_eq!(flow.approved_count(), 1);
        assert_eq!(
            flow.approval(ApprovalStage::Design).map(|a| a.decision),
            Some(ApprovalDecision::Approved)
        );
        let sample = flow.approval(ApprovalStage::Sample).unwrap();
        assert_eq!(sample.decision, ApprovalDecision::Pending);
        assert_eq!(sample.comment, None);
        assert!(!flow.is_rejected());
    }

    #[test]
    fn test_invalid_input() {
        let mut flow = ApprovalFlow::new("mo1");
        assert_eq!(
            flow.decide(ApprovalStage::Design, ApprovalDecision::Pending, "ann", None, now()),
            Err(WorkflowError::InvalidDecision)
        );
        assert_eq!(
            flow.decide(ApprovalStage::Design, ApprovalDecision::Approved, "  ", None, now()),
            Err(WorkflowError::MissingApprover)
        );
        assert!(!flow.is_started());
    }
}
