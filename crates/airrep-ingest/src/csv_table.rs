use std::collections::{HashMap, HashSet};
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::{IngestError, Result};

/// The delimited body of a report: one header row plus string cells.
///
/// Cells keep their raw text; blank detection trims whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl CsvTable {
    /// Parses delimited text whose first record is the header row.
    ///
    /// Rows shorter than the header are padded with blanks. Rows longer than the
    /// header are accepted only when the surplus cells are blank.
    pub fn parse(text: &str, path: &Path) -> Result<Option<Self>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record
                .map_err(|e| csv_error(path, &e))?
                .iter()
                .map(normalize_cell)
                .collect(),
            None => return Ok(None),
        };
        let width = headers.len();
        let mut rows = Vec::new();
        for (idx, record) in records.enumerate() {
            let record = record.map_err(|e| csv_error(path, &e))?;
            let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
            if row.len() > width {
                if row[width..].iter().any(|cell| !is_blank(cell)) {
                    return Err(IngestError::RaggedRow {
                        path: path.to_path_buf(),
                        row: idx + 1,
                        found: row.len(),
                        expected: width,
                    });
                }
                row.truncate(width);
            }
            row.resize(width, String::new());
            rows.push(row);
        }
        Ok(Some(Self { headers, rows }))
    }

    /// Number of body rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Index of the column named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cells of column `idx` in row order.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(idx).map_or("", String::as_str))
    }

    /// True if every cell of column `idx` is blank.
    pub fn column_is_empty(&self, idx: usize) -> bool {
        self.column_values(idx).all(is_blank)
    }

    /// Removes column `idx` from the header and every row.
    pub fn remove_column(&mut self, idx: usize) {
        if idx >= self.headers.len() {
            return;
        }
        self.headers.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
    }

    /// Drops `count` trailing rows, but only when more rows than that exist.
    ///
    /// Returns the number of rows removed.
    pub fn drop_trailer(&mut self, count: usize) -> usize {
        if count == 0 || self.rows.len() <= count {
            return 0;
        }
        let keep = self.rows.len() - count;
        self.rows.truncate(keep);
        count
    }

    /// Converts the table into a DataFrame of nullable string columns.
    ///
    /// Blank cells become nulls. Columns with a blank header are skipped.
    /// Repeated header names get a `.1`, `.2`, ... suffix so every column
    /// stays addressable.
    pub fn into_dataframe(self) -> Result<DataFrame> {
        let names = dedupe_names(&self.headers);
        let mut columns: Vec<Column> = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if is_blank(&self.headers[idx]) {
                continue;
            }
            let values: Vec<Option<String>> = self
                .rows
                .iter()
                .map(|row| {
                    let cell = row.get(idx).map_or("", String::as_str);
                    if is_blank(cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }
        let df = DataFrame::new(columns)?;
        Ok(df)
    }
}

/// Suffixed names skip any name already used or present elsewhere in the
/// header row, so the result is always unique.
fn dedupe_names(headers: &[String]) -> Vec<String> {
    let originals: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let mut assigned: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counts: HashMap<&str, usize> = HashMap::new();
    headers
        .iter()
        .map(|header| {
            let mut name = header.clone();
            if assigned.contains(&name) {
                let count = counts.entry(header.as_str()).or_insert(0);
                loop {
                    *count += 1;
                    let candidate = format!("{header}.{count}");
                    if !assigned.contains(&candidate) && !originals.contains(candidate.as_str()) {
                        name = candidate;
                        break;
                    }
                }
            }
            assigned.insert(name.clone());
            name
        })
        .collect()
}

fn csv_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
