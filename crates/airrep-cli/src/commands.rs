use std::path::Path;

use airrep_core::{LoadedReport, PipelineConfig, ReportPipeline};
use airrep_ingest::discover_report_files;
use anyhow::{Context, Result};
use tracing::info;

use airrep_cli::summary::{discovery_table, kinds_table};

use crate::cli::{DiscoverArgs, LoadArgs};

pub fn run_kinds() {
    println!("{}", kinds_table());
}

pub fn run_discover(config: &PipelineConfig, args: &DiscoverArgs) -> Result<()> {
    let data_dir = args.data_dir.as_deref().unwrap_or(&config.data_dir);
    let reports = discover_report_files(data_dir)
        .with_context(|| format!("discover reports in {}", data_dir.display()))?;
    info!(dir = %data_dir.display(), files = reports.len(), "discovered report files");
    if reports.is_empty() {
        println!("No CSV files in {}", data_dir.display());
        return Ok(());
    }
    println!("{}", discovery_table(&reports));
    Ok(())
}

pub fn run_load(config: PipelineConfig, args: &LoadArgs) -> Result<LoadedReport> {
    let config = apply_load_flags(config, args);
    let pipeline = ReportPipeline::new(config);
    pipeline
        .load(args.kind, args.file.as_deref())
        .with_context(|| format!("load {} report", args.kind))
}

/// Command-line flags win over the config file and environment.
fn apply_load_flags(mut config: PipelineConfig, args: &LoadArgs) -> PipelineConfig {
    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if args.no_cache {
        config.persist_processed = false;
    }
    config
}

pub fn load_config(explicit: Option<&Path>) -> Result<PipelineConfig> {
    PipelineConfig::discover(explicit).context("load configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use airrep_model::ReportKind;

    fn load_args() -> LoadArgs {
        LoadArgs {
            kind: ReportKind::Payment,
            file: None,
            data_dir: Some(PathBuf::from("/exports")),
            output_dir: None,
            no_cache: true,
            rows: 10,
        }
    }

    #[test]
    fn flags_override_config() {
        let config = apply_load_flags(PipelineConfig::default(), &load_args());
        assert_eq!(config.data_dir, PathBuf::from("/exports"));
        assert_eq!(config.output_dir, PathBuf::from("processed"));
        assert!(!config.persist_processed);
    }
}
