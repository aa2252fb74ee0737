use airrep_model::ReportKind;
use thiserror::Error;

/// Errors raised while turning a raw body into a canonical table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Required canonical columns are absent after normalization.
    #[error("{kind} report is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        kind: ReportKind,
        columns: Vec<String>,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
