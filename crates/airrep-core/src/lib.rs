//! Report loading pipeline.
//!
//! Ties the ingest and transform crates together into one staged load per
//! report file:
//!
//! - [`ReportPipeline`]: runs the stages and returns a canonical [`airrep_transform::ReportFrame`]
//! - [`PipelineStage`]: the load state machine, reported on failure
//! - [`PipelineConfig`]: data/output directories from `airrep.toml` and the environment
//! - [`write_processed`]: the `<stem>_processed.csv` side copy

mod cache;
mod config;
mod error;
mod pipeline;
mod stage;

pub use cache::write_processed;
pub use config::{CONFIG_FILE_NAME, DATA_DIR_ENV_VAR, OUTPUT_DIR_ENV_VAR, PipelineConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{LoadRun, LoadedReport, ReportPipeline, load_available};
pub use stage::PipelineStage;
