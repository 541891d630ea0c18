use super::aggregate::ProductionStatus;
use super::approval::ApprovalStage;
use super::wip::WipStage;
use thiserror::Error;

/// Rejected production workflow actions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("{stage} cannot be decided before {expected}")]
    StageOutOfOrder {
        stage: ApprovalStage,
        expected: ApprovalStage,
    },

    #[error("{0} has already been decided")]
    AlreadyDecided(ApprovalStage),

    #[error("Approval flow is closed")]
    FlowClosed,

    #[error("A decision must approve or reject")]
    InvalidDecision,

    #[error("Approver is required")]
    MissingApprover,

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition {
        from: ProductionStatus,
        to: ProductionStatus,
    },

    #[error("Production is not approved yet")]
    NotApproved,

    #[error("{stage}: only {available} units waiting, {requested} reported")]
    QuantityExceeded {
        stage: WipStage,
        available: u32,
        requested: u32,
    },

    #[error("Batch quantity must be positive")]
    EmptyBatch,

    #[error("Only {available} packed units are not yet batched")]
    BatchExceedsPacked { available: u32 },

    #[error("Batch {0} not found")]
    UnknownBatch(String),
}
