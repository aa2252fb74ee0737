//! Processed-file cache.
//!
//! The copy is a side effect of a load: it is overwritten on every load of
//! the same file name and never read back by the pipeline.

use std::path::{Path, PathBuf};

use airrep_ingest::any_to_string;
use airrep_transform::ReportFrame;
use polars::prelude::AnyValue;

use crate::error::{PipelineError, Result};

/// Writes `frame` to `<output_dir>/<stem>_processed.csv` and returns the path.
pub fn write_processed(frame: &ReportFrame, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(frame.processed_file_name());
    let cache_error = |message: String| PipelineError::Cache {
        path: path.clone(),
        message,
    };

    std::fs::create_dir_all(output_dir).map_err(|e| cache_error(e.to_string()))?;
    let mut writer = csv::Writer::from_path(&path).map_err(|e| cache_error(e.to_string()))?;

    writer
        .write_record(frame.column_names())
        .map_err(|e| cache_error(e.to_string()))?;
    let columns = frame.data.get_columns();
    for row in 0..frame.data.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(row).unwrap_or(AnyValue::Null)))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| cache_error(e.to_string()))?;
    }
    writer.flush().map_err(|e| cache_error(e.to_string()))?;

    tracing::info!(path = %path.display(), rows = frame.record_count(), "wrote processed file");
    Ok(path)
}
