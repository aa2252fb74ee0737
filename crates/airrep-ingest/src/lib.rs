//! Report ingestion utilities.
//!
//! This crate turns a raw back-office export into its three parts: the
//! free-text preamble, the delimited body, and the trailing summary rows
//! (which are dropped).
//!
//! # Features
//!
//! - **Raw reading**: decode the file, split off the preamble, parse the body
//! - **Metadata extraction**: labeled dates and values from preamble lines
//! - **Report discovery**: find exports in a data directory and classify them
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use airrep_ingest::{extract_metadata, read_raw_report};
//! use airrep_model::ReportKind;
//!
//! let spec = ReportKind::Payment.spec();
//! let raw = read_raw_report(Path::new("data/CompanyPaymentReport.csv"), spec)?;
//! let metadata = extract_metadata(raw.metadata_lines(spec), spec.metadata);
//! println!("{} rows, from {}", raw.table.height(), metadata.get("from_date"));
//! ```

mod csv_table;
mod dates;
mod discovery;
mod error;
mod metadata;
mod polars_utils;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Raw Reading ===
pub use csv_table::CsvTable;
pub use reader::{RawReport, decode_report_bytes, read_raw_report, read_raw_report_from_text};

// === Metadata ===
pub use dates::parse_day_first_date;
pub use metadata::{colon_value, extract_metadata};

// === Discovery ===
pub use discovery::{DiscoveredReport, discover_report_files, list_csv_files};

// === Polars Helpers ===
pub use polars_utils::{any_to_f64, any_to_i64, any_to_string, format_numeric};
