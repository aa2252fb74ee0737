//! Raw report reading: decoding, preamble split, body parse, trailer removal.

use std::path::{Path, PathBuf};

use airrep_model::{ReportKind, ReportSpec, TrailerStage};
use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};

/// A report file split into its preamble and delimited body.
///
/// The file text itself is not retained once parsing completes.
#[derive(Debug, Clone)]
pub struct RawReport {
    pub kind: ReportKind,
    pub path: PathBuf,
    /// Leading free-text lines, trimmed.
    pub preamble: Vec<String>,
    /// Parsed body with the header row and any body-stage trailer removed.
    pub table: CsvTable,
    /// Number of trailing rows already dropped by the reader.
    pub trailer_removed: usize,
}

impl RawReport {
    /// Preamble lines that are scanned for metadata.
    pub fn metadata_lines(&self, spec: &ReportSpec) -> &[String] {
        let end = spec.metadata_lines.min(self.preamble.len());
        &self.preamble[..end]
    }

    /// File name component of the source path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Decodes file bytes as UTF-8 (BOM stripped), falling back to Windows-1252.
///
/// Exports saved from spreadsheet tools on Windows are not always UTF-8.
pub fn decode_report_bytes(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    tracing::debug!("report is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// Reads a report file according to `spec`.
///
/// # Errors
///
/// [`IngestError::FileNotFound`] when the file does not exist, and parse
/// errors when the body is not delimited text.
pub fn read_raw_report(path: &Path, spec: &ReportSpec) -> Result<RawReport> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let text = decode_report_bytes(&bytes);
    read_raw_report_from_text(&text, path, spec)
}

/// Splits already-decoded report text according to `spec`.
///
/// `path` is only used for error messages and the returned [`RawReport`].
pub fn read_raw_report_from_text(text: &str, path: &Path, spec: &ReportSpec) -> Result<RawReport> {
    let mut lines = text.split_inclusive('\n');
    let preamble: Vec<String> = lines
        .by_ref()
        .take(spec.preamble_lines)
        .map(|line| line.trim().to_string())
        .collect();
    let body: String = lines.collect();

    let empty = || IngestError::EmptyReport {
        path: path.to_path_buf(),
        preamble_lines: spec.preamble_lines,
    };
    if preamble.len() < spec.preamble_lines {
        return Err(empty());
    }
    let mut table = CsvTable::parse(&body, path)?.ok_or_else(empty)?;

    let trailer_removed = match spec.trailer_stage {
        TrailerStage::Body => table.drop_trailer(spec.trailer_rows),
        TrailerStage::AfterRowFilter => 0,
    };

    tracing::debug!(
        path = %path.display(),
        preamble = preamble.len(),
        columns = table.width(),
        rows = table.height(),
        trailer_removed,
        "read raw report"
    );

    Ok(RawReport {
        kind: spec.kind,
        path: path.to_path_buf(),
        preamble,
        table,
        trailer_removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_report_bytes(b"\xEF\xBB\xBFA,B\n"), "A,B\n");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // 0xE9 is 'é' in Windows-1252 and invalid as a lone UTF-8 byte.
        assert_eq!(decode_report_bytes(b"Caf\xE9,1\n"), "Café,1\n");
    }

    #[test]
    fn test_preamble_and_trailer() {
        let text = "Title\nFrom Date: 01/03/2024\nTo Date: 31/03/2024\n\n \n\
                    Agent/GSA Name,Currency,Net Amount\n\
                    Alpha,USD,\"1,500.00\"\nBeta,EUR,20\n\
                    ,,\nTotal,,\"1,520.00\"\nPrinted by admin,,\n";
        let spec = ReportKind::Payment.spec();
        let raw = read_raw_report_from_text(text, Path::new("CompanyPaymentReport.csv"), spec)
            .unwrap();
        assert_eq!(raw.preamble.len(), 5);
        assert_eq!(raw.preamble[1], "From Date: 01/03/2024");
        assert_eq!(raw.metadata_lines(spec).len(), 5);
        assert_eq!(raw.table.headers, vec!["Agent/GSA Name", "Currency", "Net Amount"]);
        assert_eq!(raw.table.height(), 2);
        assert_eq!(raw.table.rows[0][2], "1,500.00");
        assert_eq!(raw.trailer_removed, 3);
    }

    #[test]
    fn test_short_body_keeps_all_rows() {
        let text = "a\nb\nc\nd\ne\nAgent/GSA Name,Net Amount\nAlpha,10\nBeta,20\n";
        let raw = read_raw_report_from_text(text, Path::new("p.csv"), ReportKind::Payment.spec())
            .unwrap();
        assert_eq!(raw.table.height(), 2);
        assert_eq!(raw.trailer_removed, 0);
    }

    #[test]
    fn test_after_row_filter_trailer_is_deferred() {
        let text = "1\n2\n3\n4\n5\n6\nAgent Code,Agent Name\nA1,One\nA2,Two\nA3,Three\nA4,Four\n";
        let raw = read_raw_report_from_text(
            text,
            Path::new("AgentProductivity.csv"),
            ReportKind::AgentProductivity.spec(),
        )
        .unwrap();
        assert_eq!(raw.table.height(), 4);
        assert_eq!(raw.trailer_removed, 0);
    }

    #[test]
    fn test_too_short_for_preamble() {
        let result =
            read_raw_report_from_text("a\nb\n", Path::new("x.csv"), ReportKind::Payment.spec());
        assert!(matches!(
            result,
            Err(IngestError::EmptyReport {
                preamble_lines: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_raw_report(
            Path::new("/definitely/not/here.csv"),
            ReportKind::Payment.spec(),
        );
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
