//! The canonical table of one load.

use std::path::{Path, PathBuf};

use airrep_model::{CoercionReport, ReportKind, ReportMetadata};
use polars::prelude::DataFrame;

/// Suffix appended to the source stem for the persisted copy.
pub const PROCESSED_SUFFIX: &str = "_processed";

/// A normalized report table together with everything learned while
/// producing it.
///
/// Every row shares the same metadata; numeric columns hold no nulls.
#[derive(Debug, Clone)]
pub struct ReportFrame {
    pub kind: ReportKind,
    /// The canonical table.
    pub data: DataFrame,
    pub metadata: ReportMetadata,
    /// Per-field counts of defaulted values.
    pub coercion: CoercionReport,
    pub source_file: PathBuf,
}

impl ReportFrame {
    pub fn new(kind: ReportKind, data: DataFrame, source_file: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            data,
            metadata: ReportMetadata::new(),
            coercion: CoercionReport::new(),
            source_file: source_file.into(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: ReportMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_coercion(mut self, coercion: CoercionReport) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// File name of the persisted copy: `<stem>_processed.csv`.
    pub fn processed_file_name(&self) -> String {
        processed_file_name(&self.source_file)
    }
}

/// `<stem>_processed.csv` for a source path.
pub fn processed_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}{PROCESSED_SUFFIX}.csv")
}
