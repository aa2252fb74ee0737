use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown report kind '{0}' (run `airrep kinds` for the supported list)")]
    UnknownReportKind(String),
}
