use super::error::WorkflowError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shop-floor stages, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WipStage {
    Cutting,
    Sewing,
    Finishing,
    QualityCheck,
    Packing,
}

impl WipStage {
    pub fn all() -> [WipStage; 5] {
        [
            WipStage::Cutting,
            WipStage::Sewing,
            WipStage::Finishing,
            WipStage::QualityCheck,
            WipStage::Packing,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WipStage::Cutting => "Cutting",
            WipStage::Sewing => "Sewing",
            WipStage::Finishing => "Finishing",
            WipStage::QualityCheck => "Quality check",
            WipStage::Packing => "Packing",
        }
    }

    pub fn next(&self) -> Option<WipStage> {
        let all = WipStage::all();
        let idx = all.iter().position(|s| s == self)?;
        all.get(idx + 1).copied()
    }
}

impl fmt::Display for WipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WipTracking {
    pub stage: WipStage,
    /// Units received from the previous stage
    pub quantity_in: u32,
    pub completed: u32,
    pub rejected: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WipTracking {
    /// Units received but not yet completed or rejected.
    pub fn waiting(&self) -> u32 {
        self.quantity_in
            .saturating_sub(self.completed)
            .saturating_sub(self.rejected)
    }

    /// Completed share of the planned quantity, in percent.
    pub fn progress_pct(&self, planned: u32) -> f64 {
        if planned == 0 {
            return 0.0;
        }
        self.completed as f64 / planned as f64 * 100.0
    }
}

/// Work-in-progress of a production order across all stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WipBoard {
    pub order_id: String,
    pub planned: u32,
    pub stages: Vec<WipTracking>,
}

impl WipBoard {
    /// All planned units start waiting at cutting.
    pub fn new(order_id: impl Into<String>, planned: u32) -> Self {
        let stages = WipStage::all()
            .into_iter()
            .map(|stage| WipTracking {
                stage,
                quantity_in: if stage == WipStage::Cutting { planned } else { 0 },
                completed: 0,
                rejected: 0,
                updated_at: None,
            })
            .collect();
        Self {
            order_id: order_id.into(),
            planned,
            stages,
        }
    }

    pub fn stage(&self, stage: WipStage) -> Option<&WipTracking> {
        self.stages.iter().find(|t| t.stage == stage)
    }

    /// Reports units finished and scrapped at a stage since the last report.
    /// Completed units move on to the next stage.
    pub fn record(
        &mut self,
        stage: WipStage,
        completed: u32,
        rejected: u32,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        let tracking = self
            .stages
            .iter_mut()
            .find(|t| t.stage == stage)
            .ok_or(WorkflowError::QuantityExceeded {
                stage,
                available: 0,
                requested: completed.saturating_add(rejected),
            })?;
        let available = tracking.waiting();
        let requested = completed.saturating_add(rejected);
        if requested > available {
            return Err(WorkflowError::QuantityExceeded {
                stage,
                available,
                requested,
            });
        }
        tracking.completed += completed;
        tracking.rejected += rejected;
        tracking.updated_at = Some(now);

        if let Some(next) = stage.next() {
            if let Some(next_tracking) = self.stages.iter_mut().find(|t| t.stage == next) {
                next_tracking.quantity_in += completed;
            }
        }
        Ok(())
    }

    /// Stage with the most units waiting; earliest stage wins a tie.
    pub fn bottleneck(&self) -> Option<WipStage> {
        self.stages
            .iter()
            .filter(|t| t.waiting() > 0)
            .fold(None::<&WipTracking>, |best, t| match best {
                Some(b) if b.waiting() >= t.waiting() => Some(b),
                _ => Some(t),
            })
            .map(|t| t.stage)
    }

    pub fn packed(&self) -> u32 {
        self.stage(WipStage::Packing).map_or(0, |t| t.completed)
    }

    pub fn rejected_total(&self) -> u32 {
        self.stages.iter().map(|t| t.rejected).sum()
    }

    /// Packed share of the planned quantity, in percent.
    pub fn overall_progress(&self) -> f64 {
        if self.planned == 0 {
            return 0.0;
        }
        self.packed() as f64 / self.planned as f64 * 100.0
    }

    pub fn scrap_rate(&self) -> f64 {
        if self.planned == 0 {
            return 0.0;
        }
        self.rejected_total() as f64 / self.planned as f64 * 100.0
    }

    pub fn is_started(&self) -> bool {
        self.stages.iter().any(|t| t.completed > 0 || t.rejected > 0)
    }

    /// Nothing is left waiting at any stage.
    pub fn is_finished(&self) -> bool {
        self.is_started() && self.stages.iter().all(|t| t.waiting() == 0)
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
    fn test_record_feeds_next_stage() {
        let mut board = WipBoard::new("mo1", 100);
        board.record(WipStage::Cutting, 90, 5, now()).unwrap();
        let cutting = board.stage(WipStage::Cutting).unwrap();
        assert_eq!(cutting.waiting(), 5);
        assert_eq!(board.stage(WipStage::Sewing).unwrap().quantity_in, 90);
        assert_eq!(cutting.progress_pct(100), 90.0);
    }

    #[test]
    fn test_record_rejects_more_than_waiting() {
        let mut board = WipBoard::new("mo1", 50);
        assert_eq!(
            board.record(WipStage::Sewing, 1, 0, now()),
            Err(WorkflowError::QuantityExceeded {
                stage: WipStage::Sewing,
                available: 0,
                requested: 1
            })
        );
        board.record(WipStage::Cutting, 40, 0, now()).unwrap();
        assert!(board.record(WipStage::Cutting, 8, 3, now()).is_err());
        assert!(board.record(WipStage::Cutting, 8, 2, now()).is_ok());
    }

    #[test]
    fn test_bottleneck_and_progress() {
        let mut board = WipBoard::new("mo1", 100);
        assert_eq!(board.bottleneck(), Some(WipStage::Cutting));
        board.record(WipStage::Cutting, 100, 0, now()).unwrap();
        board.record(WipStage::Sewing, 30, 0, now()).unwrap();
        assert_eq!(board.bottleneck(), Some(WipStage::Sewing));
        for stage in [WipStage::Finishing, WipStage::QualityCheck] {
            board.record(stage, 30, 0, now()).unwrap();
        }
        board.record(WipStage::Packing, 25, 5, now()).unwrap();
        assert_eq!(board.packed(), 25);
        assert_eq!(board.overall_progress(), 25.0);
        assert_eq!(board.scrap_rate(), 5.0);
        assert!(!board.is_finished());
    }

    #[test]
    fn test_finished_when_nothing_waits() {
        let mut board = WipBoard::new("mo1", 10);
        assert!(!board.is_finished());
        for stage in WipStage::all() {
            board.record(stage, 10, 0, now()).unwrap();
        }
        assert!(board.is_finished());
        assert_eq!(board.bottleneck(), None);
        assert_eq!(WipBoard::new("x", 0).overall_progress(), 0.0);
    }
}
