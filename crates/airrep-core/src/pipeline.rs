//! Report loading pipeline.
//!
//! One load runs the fixed sequence
//! read → metadata → columns → coercion → derived fields → (consolidation)
//! → projection, and either returns the complete canonical table or fails
//! with the stage that broke. There is no partial recovery.

use std::path::{Path, PathBuf};
use std::time::Instant;

use airrep_ingest::{extract_metadata, read_raw_report};
use airrep_model::{ReportKind, TrailerStage};
use airrep_transform::{
    ColumnNormalizer, DerivedFieldComputer, FieldCoercer, RecordConsolidator, ReportFrame,
    broadcast_metadata, drop_trailing_rows, project_canonical,
};
use tracing::{info, warn, warn_span};

use crate::cache::write_processed;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::stage::{PipelineStage, StageTracker};

/// Result of one load together with the stages it passed through.
#[derive(Debug)]
pub struct LoadRun {
    pub kind: ReportKind,
    pub path: PathBuf,
    /// Every stage entered, starting at `Unloaded`.
    pub stages: Vec<PipelineStage>,
    pub outcome: Result<LoadedReport>,
}

impl LoadRun {
    /// `Ready` or `Failed`.
    pub fn final_stage(&self) -> PipelineStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(PipelineStage::Unloaded)
    }

    pub fn into_result(self) -> Result<LoadedReport> {
        self.outcome
    }
}

/// A successful load.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub frame: ReportFrame,
    /// Where the processed copy was written, if the kind persists one.
    pub processed_path: Option<PathBuf>,
}

/// Loads report files into canonical tables.
#[derive(Debug, Clone, Default)]
pub struct ReportPipeline {
    config: PipelineConfig,
}

impl ReportPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads `file` (or the kind's default file) from the data directory.
    ///
    /// # Errors
    ///
    /// [`crate::PipelineError::Stage`] wrapping the originating error.
    pub fn load(&self, kind: ReportKind, file: Option<&Path>) -> Result<LoadedReport> {
        self.run(kind, file).into_result()
    }

    /// Like [`ReportPipeline::load`] but keeps the stage history.
    pub fn run(&self, kind: ReportKind, file: Option<&Path>) -> LoadRun {
        let path = self.config.resolve_input(kind, file);
        self.run_path(kind, &path)
    }

    /// Runs the pipeline on an already-resolved path.
    pub fn run_path(&self, kind: ReportKind, path: &Path) -> LoadRun {
        // Opened at warn so the default filter keeps kind/file on load warnings.
        let span = warn_span!("report_load", kind = %kind, file = %path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let spec = kind.spec();
        let mut tracker = StageTracker::new(kind, path, spec.consolidation.is_some());
        let outcome = self.execute(kind, path, &mut tracker);

        match &outcome {
            Ok(loaded) => info!(
                rows = loaded.frame.record_count(),
                columns = loaded.frame.data.width(),
                defaulted_invalid = loaded.frame.coercion.total_invalid(),
                duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "report loaded"
            ),
            Err(err) => warn!(error = %err, "report load failed"),
        }

        LoadRun {
            kind,
            path: path.to_path_buf(),
            stages: tracker.into_history(),
            outcome,
        }
    }

    fn execute(
        &self,
        kind: ReportKind,
        path: &Path,
        tracker: &mut StageTracker,
    ) -> Result<LoadedReport> {
        let spec = kind.spec();

        let raw = tracker.advance(|| Ok(read_raw_report(path, spec)?))?;

        let metadata =
            tracker.advance(|| Ok(extract_metadata(raw.metadata_lines(spec), spec.metadata)))?;
        let missing = metadata.missing_keys();
        if !missing.is_empty() {
            warn!(?missing, "report period unknown, metadata left empty");
        }

        let table = raw.table;
        let df = tracker.advance(|| {
            let df = table.into_dataframe()?;
            Ok(ColumnNormalizer::new(spec).normalize(&df)?)
        })?;

        let (df, mut coercion) = tracker.advance(|| {
            let (df, coercion) = FieldCoercer::new(spec).coerce(&df)?;
            let df = match spec.trailer_stage {
                TrailerStage::AfterRowFilter => drop_trailing_rows(&df, spec.trailer_rows),
                TrailerStage::Body => df,
            };
            Ok((df, coercion))
        })?;

        let mut df = tracker
            .advance(|| Ok(DerivedFieldComputer::new(spec).apply(&df, &mut coercion)?))?;

        if let Some(consolidation) = &spec.consolidation {
            df = tracker.advance(|| Ok(RecordConsolidator::new(consolidation).consolidate(&df)?))?;
        }

        tracker.advance(|| {
            let df = broadcast_metadata(&df, spec, &metadata)?;
            let data = project_canonical(&df, spec)?;
            let frame = ReportFrame::new(kind, data, path)
                .with_metadata(metadata)
                .with_coercion(coercion);
            let processed_path = if self.config.persist_processed && spec.persist_processed {
                Some(write_processed(&frame, &self.config.output_dir)?)
            } else {
                None
            };
            Ok(LoadedReport {
                frame,
                processed_path,
            })
        })
    }
}

/// Loads every kind whose default file exists in the data directory.
///
/// Missing files are skipped; other failures are returned per kind.
pub fn load_available(pipeline: &ReportPipeline) -> Vec<(ReportKind, Result<LoadedReport>)> {
    ReportKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let path = pipeline.config().resolve_input(kind, None);
            if !path.is_file() {
                return None;
            }
            Some((kind, pipeline.run_path(kind, &path).into_result()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn missing_file_fails_at_read() {
        let pipeline = ReportPipeline::new(PipelineConfig {
            data_dir: PathBuf::from("/nonexistent/airrep"),
            ..PipelineConfig::default()
        });
        let run = pipeline.run(ReportKind::Payment, None);
        assert_eq!(run.final_stage(), PipelineStage::Failed);
        assert_eq!(run.stages, vec![PipelineStage::Unloaded, PipelineStage::Failed]);
        let err = run.into_result().unwrap_err();
        assert_eq!(err.stage(), Some(PipelineStage::Read));
        assert!(err.is_not_found());
        assert!(matches!(err.root(), PipelineError::Ingest(_)));
    }
}
