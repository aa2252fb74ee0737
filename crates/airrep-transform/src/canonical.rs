//! Metadata broadcast and projection onto the canonical column set.

use airrep_model::{
    FieldType, MetadataExtract, MetadataValue, Presence, ReportMetadata, ReportSpec,
};
use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};

use crate::error::{Result, TransformError};
use crate::frame_utils::{date_series, has_column, set_column, text_series};

/// Adds one column per metadata rule, holding the same value on every row.
pub fn broadcast_metadata(
    df: &DataFrame,
    spec: &ReportSpec,
    metadata: &ReportMetadata,
) -> Result<DataFrame> {
    let mut out = df.clone();
    let height = df.height();
    for rule in spec.metadata {
        let value = metadata.get(rule.key);
        let series = match (rule.extract, value) {
            (MetadataExtract::DayFirstDate, MetadataValue::Date(date)) => {
                date_series(rule.column, &vec![Some(*date); height])?
            }
            (MetadataExtract::DayFirstDate, _) => {
                date_series(rule.column, &vec![None::<NaiveDate>; height])?
            }
            (MetadataExtract::ColonValue, MetadataValue::Text(text)) => {
                text_series(rule.column, vec![Some(text.clone()); height])
            }
            (MetadataExtract::ColonValue, _) => text_series(rule.column, vec![None; height]),
        };
        set_column(&mut out, series)?;
    }
    Ok(out)
}

fn fallback_series(name: &str, field_type: FieldType, height: usize) -> Result<Series> {
    Ok(match field_type {
        FieldType::Text => text_series(name, vec![None; height]),
        FieldType::Integer => Series::new(name.into(), vec![0_i64; height]),
        FieldType::Float => Series::new(name.into(), vec![0.0_f64; height]),
        FieldType::Date => date_series(name, &vec![None; height])?,
    })
}

/// Orders `df` as declared fields, then metadata columns, then (when the
/// kind allows it) the remaining source columns as text.
///
/// Absent optional fields are created with their fallback: zero for
/// numbers, null for text and dates.
pub fn project_canonical(df: &DataFrame, spec: &ReportSpec) -> Result<DataFrame> {
    let height = df.height();
    let mut columns: Vec<Column> = Vec::new();
    let mut missing = Vec::new();

    for field in spec.fields {
        if has_column(df, field.name) {
            columns.push(df.column(field.name)?.clone());
        } else if field.presence == Presence::Required {
            missing.push(field.name.to_string());
        } else {
            columns.push(fallback_series(field.name, field.field_type, height)?.into_column());
        }
    }
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns {
            kind: spec.kind,
            columns: missing,
        });
    }

    for rule in spec.metadata {
        if has_column(df, rule.column) {
            columns.push(df.column(rule.column)?.clone());
        }
    }

    if spec.passthrough {
        let canonical = spec.canonical_columns();
        for column in df.get_columns() {
            if canonical.contains(&column.name().as_str()) {
                continue;
            }
            columns.push(column.cast(&DataType::String)?);
        }
    }

    Ok(DataFrame::new(columns)?)
}
