//! Error types for report loading.

use std::path::PathBuf;

use airrep_ingest::IngestError;
use airrep_model::ReportKind;
use airrep_transform::TransformError;
use thiserror::Error;

use crate::stage::PipelineStage;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The processed copy could not be written.
    #[error("failed to write processed file {path}: {message}")]
    Cache { path: PathBuf, message: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A load failed; carries the stage that was being entered.
    #[error("{kind} load of {} failed at {stage}: {source}", file.display())]
    Stage {
        kind: ReportKind,
        file: PathBuf,
        stage: PipelineStage,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    /// The error that started the failure, with stage context removed.
    pub fn root(&self) -> &PipelineError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Stage at which a load failed, if known.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// True when the input file or data directory does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::Ingest(err) if err.is_not_found())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_display_and_root() {
        let err = PipelineError::Stage {
            kind: ReportKind::Payment,
            file: PathBuf::from("data/CompanyPaymentReport.csv"),
            stage: PipelineStage::Read,
            source: Box::new(PipelineError::Ingest(IngestError::FileNotFound {
                path: PathBuf::from("data/CompanyPaymentReport.csv"),
            })),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"payment load of data/CompanyPaymentReport.csv failed at read: report file not found: data/CompanyPaymentReport.csv"
        );
        assert!(err.is_not_found());
        assert_eq!(err.stage(), Some(PipelineStage::Read));
    }
}
