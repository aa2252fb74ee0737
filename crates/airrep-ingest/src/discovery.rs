//! Report file discovery in a data directory.

use std::path::{Path, PathBuf};

use airrep_model::ReportKind;

use crate::error::{IngestError, Result};

/// A CSV file found in the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredReport {
    pub path: PathBuf,
    /// Report kind matched from the file name, if any.
    pub kind: Option<ReportKind>,
}

impl DiscoveredReport {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source: e,
            })?
            .path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        // Skip our own cache artifacts when output shares the data directory.
        let is_processed = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with("_processed"));
        if is_csv && !is_processed {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Lists CSV files in `dir` and classifies each by its file name.
pub fn discover_report_files(dir: &Path) -> Result<Vec<DiscoveredReport>> {
    let reports = list_csv_files(dir)?
        .into_iter()
        .map(|path| {
            let kind = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(ReportKind::from_file_name);
            DiscoveredReport { path, kind }
        })
        .collect();
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in [
            "CompanyPaymentReport.csv",
            "AgentUserPrivileges (2).CSV",
            "notes.csv",
            "CompanyPaymentReport_processed.csv",
            "readme.txt",
        ] {
            std::fs::write(dir.path().join(name), "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("archive.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_csv_files() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "AgentUserPrivileges (2).CSV",
                "CompanyPaymentReport.csv",
                "notes.csv"
            ]
        );
    }

    #[test]
    fn test_discover_classifies_by_name() {
        let dir = create_test_dir();
        let reports = discover_report_files(dir.path()).unwrap();
        let kinds: Vec<_> = reports.iter().map(|report| report.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Some(ReportKind::AgentUserPrivileges),
                Some(ReportKind::Payment),
                None
            ]
        );
        assert_eq!(reports[2].file_name(), "notes.csv");
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let result = list_csv_files(&dir.path().join("missing"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
