//! Load state machine.

use std::fmt;
use std::path::{Path, PathBuf};

use airrep_model::ReportKind;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Stages of one report load, in order.
///
/// Transitions are strictly linear. `Consolidated` only occurs for kinds
/// that fold row groups. Any failure moves straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Unloaded,
    Read,
    MetadataExtracted,
    ColumnsNormalized,
    FieldsCoerced,
    DerivedComputed,
    Consolidated,
    Ready,
    Failed,
}

impl PipelineStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Read => "read",
            Self::MetadataExtracted => "metadata_extracted",
            Self::ColumnsNormalized => "columns_normalized",
            Self::FieldsCoerced => "fields_coerced",
            Self::DerivedComputed => "derived_computed",
            Self::Consolidated => "consolidated",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }

    /// The stage that follows `self` on the success path.
    pub const fn next(self, consolidates: bool) -> Option<Self> {
        match self {
            Self::Unloaded => Some(Self::Read),
            Self::Read => Some(Self::MetadataExtracted),
            Self::MetadataExtracted => Some(Self::ColumnsNormalized),
            Self::ColumnsNormalized => Some(Self::FieldsCoerced),
            Self::FieldsCoerced => Some(Self::DerivedComputed),
            Self::DerivedComputed if consolidates => Some(Self::Consolidated),
            Self::DerivedComputed | Self::Consolidated => Some(Self::Ready),
            Self::Ready | Self::Failed => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records the stages one load passes through and wraps step failures.
#[derive(Debug)]
pub(crate) struct StageTracker {
    kind: ReportKind,
    file: PathBuf,
    consolidates: bool,
    current: PipelineStage,
    history: Vec<PipelineStage>,
}

impl StageTracker {
    pub(crate) fn new(kind: ReportKind, file: &Path, consolidates: bool) -> Self {
        Self {
            kind,
            file: file.to_path_buf(),
            consolidates,
            current: PipelineStage::Unloaded,
            history: vec![PipelineStage::Unloaded],
        }
    }

    /// Runs `step` and enters the next stage on success.
    ///
    /// On failure the tracker moves to `Failed` and the error is wrapped with
    /// the stage that could not be entered.
    pub(crate) fn step<T>(
        &mut self,
        stage: PipelineStage,
        step: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        debug_assert_eq!(
            self.current.next(self.consolidates),
            Some(stage),
            "out-of-order stage"
        );
        match step() {
            Ok(value) => {
                debug!(from = %self.current, to = %stage, "stage complete");
                self.current = stage;
                self.history.push(stage);
                Ok(value)
            }
            Err(source) => {
                debug!(from = %self.current, failed = %stage, "stage failed");
                self.current = PipelineStage::Failed;
                self.history.push(PipelineStage::Failed);
                Err(PipelineError::Stage {
                    kind: self.kind,
                    file: self.file.clone(),
                    stage,
                    source: Box::new(source),
                })
            }
        }
    }

    /// Enters the stage that follows the current one.
    pub(crate) fn advance<T>(&mut self, step: impl FnOnce() -> Result<T>) -> Result<T> {
        let stage = self
            .current
            .next(self.consolidates)
            .unwrap_or(PipelineStage::Failed);
        self.step(stage, step)
    }

    pub(crate) fn into_history(self) -> Vec<PipelineStage> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_path_skips_consolidation() {
        let mut stage = PipelineStage::Unloaded;
        let mut path = vec![stage];
        while let Some(next) = stage.next(false) {
            path.push(next);
            stage = next;
        }
        assert_eq!(path.len(), 7);
        assert!(!path.contains(&PipelineStage::Consolidated));
        assert_eq!(stage, PipelineStage::Ready);
    }

    #[test]
    fn consolidating_kinds_pass_through_consolidated() {
        assert_eq!(
            PipelineStage::DerivedComputed.next(true),
            Some(PipelineStage::Consolidated)
        );
        assert_eq!(PipelineStage::Consolidated.next(true), Some(PipelineStage::Ready));
        assert!(PipelineStage::Failed.is_terminal());
    }

    #[test]
    fn failure_is_terminal_and_wrapped() {
        let mut tracker = StageTracker::new(ReportKind::Payment, Path::new("p.csv"), false);
        tracker.advance(|| Ok(())).unwrap();
        let err = tracker
            .advance(|| -> Result<()> {
                Err(PipelineError::Cache {
                    path: PathBuf::from("x"),
                    message: "disk full".to_string(),
                })
            })
            .unwrap_err();
        assert_eq!(err.stage(), Some(PipelineStage::MetadataExtracted));
        assert_eq!(tracker.current, PipelineStage::Failed);
        assert_eq!(
            tracker.into_history(),
            vec![
                PipelineStage::Unloaded,
                PipelineStage::Read,
                PipelineStage::Failed
            ]
        );
    }
}
