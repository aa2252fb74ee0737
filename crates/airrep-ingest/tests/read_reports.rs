//! Reading real-shaped exports from disk.

use std::io::Write;

use airrep_ingest::{IngestError, discover_report_files, extract_metadata, read_raw_report};
use airrep_model::ReportKind;
use chrono::NaiveDate;
use tempfile::{NamedTempFile, TempDir};

fn write_temp(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

const INVOICE: &str = "\
Invoice Summary Report
\"Airline : Example Air\"
,,
\"Year : 2024\",,,
\"Month : March\",,,
,,
,,
,,
,,
\"Invoice Number\",\"Agent Code\",\"Agent Name\",,\"Invoice Total\"
INV-1,A1,Alpha Travel,,\"1,200.50\"
INV-2,A2,Beta Tours,,$300
Total,,,,\"1,500.50\"
,,,,
Generated by system,,,,
";

#[test]
fn invoice_metadata_and_body() {
    let file = write_temp(INVOICE.as_bytes());
    let spec = ReportKind::InvoiceSummary.spec();
    let raw = read_raw_report(file.path(), spec).unwrap();

    let metadata = extract_metadata(raw.metadata_lines(spec), spec.metadata);
    assert_eq!(metadata.text("report_year"), Some("2024"));
    assert_eq!(metadata.text("report_month"), Some("March"));

    assert_eq!(raw.table.width(), 5);
    assert_eq!(raw.table.height(), 2);
    assert_eq!(raw.table.rows[1][0], "INV-2");
    assert!(raw.table.column_is_empty(3));
}

#[test]
fn payment_period_from_file() {
    let text = "Company Payment Report\nFrom Date: 01/03/2024\nTo Date: 31/03/2024\n\n\n\
                Agent/GSA Name,Currency,Net Amount\nAlpha,USD,100\n,,\n,,\nTotal,,100\n";
    let file = write_temp(text.as_bytes());
    let spec = ReportKind::Payment.spec();
    let raw = read_raw_report(file.path(), spec).unwrap();
    let metadata = extract_metadata(raw.metadata_lines(spec), spec.metadata);

    assert_eq!(metadata.date("from_date"), NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(metadata.date("to_date"), NaiveDate::from_ymd_opt(2024, 3, 31));
    assert_eq!(raw.table.height(), 1);
}

#[test]
fn windows_1252_export_is_readable() {
    let mut bytes = b"Agent Name,No. of PAX\n".to_vec();
    bytes.extend_from_slice(b"Agence R\xE9union,4\n");
    let file = write_temp(&bytes);
    let raw = read_raw_report(file.path(), ReportKind::EmployeePerformance.spec()).unwrap();
    assert_eq!(raw.table.rows[0][0], "Agence Réunion");
}

#[test]
fn malformed_body_is_a_parse_error() {
    let file = write_temp(b"Agent Name,No. of PAX\nAlpha,4,unexpected\n");
    let result = read_raw_report(file.path(), ReportKind::EmployeePerformance.spec());
    match result {
        Err(err @ IngestError::RaggedRow { .. }) => {
            assert!(err.to_string().contains("has 3 fields, header has 2"));
        }
        other => panic!("expected ragged row error, got {other:?}"),
    }
}

#[test]
fn discovery_over_data_directory() {
    let dir = TempDir::new().unwrap();
    for kind in ReportKind::ALL {
        std::fs::write(dir.path().join(kind.default_file_name()), "x\n").unwrap();
    }
    let reports = discover_report_files(dir.path()).unwrap();
    assert_eq!(reports.len(), ReportKind::ALL.len());
    assert!(reports.iter().all(|report| report.kind.is_some()));
}
