//! Header cleaning, renaming and empty-column removal.

use std::collections::HashSet;

use airrep_model::{HeaderCase, Presence, ReportSpec};
use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Cleans a raw header: trim, newlines to spaces, collapse runs of spaces,
/// strip quote characters.
pub fn clean_header(raw: &str) -> String {
    let unquoted: String = raw
        .chars()
        .filter(|ch| *ch != '"')
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .collect();
    unquoted.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn snake_header(cleaned: &str) -> String {
    cleaned.to_lowercase().replace(' ', "_")
}

/// Maps raw source headers to canonical names for one report kind.
#[derive(Debug, Clone, Copy)]
pub struct ColumnNormalizer<'a> {
    spec: &'a ReportSpec,
}

impl<'a> ColumnNormalizer<'a> {
    pub fn new(spec: &'a ReportSpec) -> Self {
        Self { spec }
    }

    /// Canonical name for one raw header.
    pub fn canonical_name(&self, raw: &str) -> String {
        let cleaned = clean_header(raw);
        let cased = match self.spec.header_case {
            HeaderCase::Preserve => cleaned,
            HeaderCase::Snake => snake_header(&cleaned),
        };
        match self.spec.rename_for(&cased) {
            Some(canonical) => canonical.to_string(),
            None => cased,
        }
    }

    /// Renames every column and drops empty ones.
    ///
    /// Columns with an empty cleaned name are dropped. Columns without a
    /// single value are dropped too, unless they carry a canonical field.
    /// When two headers map to the same name the first one keeps it.
    ///
    /// # Errors
    ///
    /// [`TransformError::MissingColumns`] when a required field is absent.
    pub fn normalize(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut columns: Vec<Column> = Vec::with_capacity(df.width());
        let mut dropped = Vec::new();

        for column in df.get_columns() {
            let raw = column.name().to_string();
            let name = self.canonical_name(&raw);
            let is_canonical = self.spec.field(&name).is_some();
            let is_blank = column.null_count() == column.len();
            if name.is_empty() || (is_blank && !is_canonical) || seen.contains(&name) {
                dropped.push(raw);
                continue;
            }
            seen.insert(name.clone());
            columns.push(column.clone().with_name(name.as_str().into()));
        }

        if !dropped.is_empty() {
            debug!(kind = %self.spec.kind, ?dropped, "dropped source columns");
        }

        let missing: Vec<String> = self
            .spec
            .fields
            .iter()
            .filter(|field| field.presence == Presence::Required && !seen.contains(field.name))
            .map(|field| field.name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TransformError::MissingColumns {
                kind: self.spec.kind,
                columns: missing,
            });
        }

        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airrep_model::ReportKind;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        DataFrame::new(
            columns
                .into_iter()
                .map(|(name, values)| Series::new(name.into(), values).into_column())
                .collect(),
        )
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn clean_header_steps() {
        assert_eq!(clean_header("  Booked Load\n(Adult/Infant) "), "Booked Load (Adult/Infant)");
        assert_eq!(clean_header("\"Invoice  Total\""), "Invoice Total");
        assert_eq!(clean_header("\r\n"), "");
    }

    #[test]
    fn snake_case_before_rename() {
        let normalizer = ColumnNormalizer::new(ReportKind::SeatInventory.spec());
        assert_eq!(normalizer.canonical_name(" COS "), "class_of_service");
        assert_eq!(normalizer.canonical_name("Seats Allocate"), "seats_allocated");
        assert_eq!(normalizer.canonical_name("Fare Collection(USD)"), "fare_usd");
        assert_eq!(normalizer.canonical_name("Flight Date"), "flight_date");
    }

    #[test]
    fn preserved_case_unmapped_passes_through() {
        let normalizer = ColumnNormalizer::new(ReportKind::Payment.spec());
        assert_eq!(normalizer.canonical_name("Net\nAmount"), "net_amount");
        assert_eq!(normalizer.canonical_name("Receipt No"), "Receipt No");
    }

    #[test]
    fn drops_empty_columns_but_keeps_canonical() {
        let source = df(vec![
            ("Agent/GSA Name", vec![Some("Alpha"), Some("Beta")]),
            ("\n", vec![Some("x"), None]),
            ("Remarks", vec![None, None]),
            ("Currency", vec![None, None]),
            ("Net Amount", vec![Some("10"), Some("20")]),
        ]);
        let normalized = ColumnNormalizer::new(ReportKind::Payment.spec())
            .normalize(&source)
            .unwrap();
        assert_eq!(names(&normalized), vec!["agent_name", "currency", "net_amount"]);
    }

    #[test]
    fn missing_required_column() {
        let source = df(vec![("Agent/GSA Name", vec![Some("Alpha")])]);
        let err = ColumnNormalizer::new(ReportKind::Payment.spec())
            .normalize(&source)
            .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"payment report is missing required columns: net_amount");
    }
}
