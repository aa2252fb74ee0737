//! Column read/write helpers over Polars frames.

use airrep_ingest::{any_to_f64, any_to_i64, any_to_string};
use chrono::NaiveDate;
use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, IntoColumn, NamedFrom, NewChunkedArray, Series,
};

use crate::error::Result;

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Cell text per row; nulls and blank cells read as `None`.
pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        values.push(if value.trim().is_empty() {
            None
        } else {
            Some(value)
        });
    }
    Ok(values)
}

/// Numeric column as floats; absent columns and nulls read as zero.
pub(crate) fn f64_column_or_zero(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    if !has_column(df, name) {
        return Ok(vec![0.0; df.height()]);
    }
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_f64(value).unwrap_or(0.0));
    }
    Ok(values)
}

/// Integer column; absent columns and nulls read as zero.
pub(crate) fn i64_column_or_zero(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    if !has_column(df, name) {
        return Ok(vec![0; df.height()]);
    }
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_i64(value).unwrap_or(0));
    }
    Ok(values)
}

pub(crate) fn text_series(name: &str, values: Vec<Option<String>>) -> Series {
    Series::new(name.into(), values)
}

pub(crate) fn date_series(name: &str, values: &[Option<NaiveDate>]) -> Result<Series> {
    let days: Vec<Option<i32>> = values
        .iter()
        .map(|value| value.map(days_since_epoch))
        .collect();
    Ok(Series::new(name.into(), days).cast(&DataType::Date)?)
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    i32::try_from(date.signed_duration_since(epoch).num_days()).unwrap_or_default()
}

pub(crate) fn set_column(df: &mut DataFrame, series: Series) -> Result<()> {
    df.with_column(series.into_column())?;
    Ok(())
}

pub(crate) fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Drops `count` trailing rows when the frame has more rows than that.
pub fn drop_trailing_rows(df: &DataFrame, count: usize) -> DataFrame {
    if count == 0 || df.height() <= count {
        return df.clone();
    }
    df.slice(0, df.height() - count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn text_df(name: &str, values: &[Option<&str>]) -> DataFrame {
        let values: Vec<Option<String>> = values.iter().map(|v| v.map(str::to_string)).collect();
        DataFrame::new(vec![text_series(name, values).into_column()]).unwrap()
    }

    #[test]
    fn blank_strings_read_as_none() {
        let df = text_df("a", &[Some("x"), Some("  "), None]);
        assert_eq!(
            string_column(&df, "a").unwrap(),
            vec![Some("x".to_string()), None, None]
        );
    }

    #[test]
    fn missing_numeric_column_reads_as_zero() {
        let df = text_df("a", &[Some("x"), None]);
        assert_eq!(i64_column_or_zero(&df, "b").unwrap(), vec![0, 0]);
        assert_eq!(f64_column_or_zero(&df, "b").unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn date_series_round_trips_through_any_value() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1);
        let series = date_series("d", &[date, None]).unwrap();
        assert_eq!(series.dtype(), &DataType::Date);
        assert_eq!(series.null_count(), 1);
        let df = DataFrame::new(vec![Column::from(series)]).unwrap();
        assert_eq!(
            any_to_string(df.column("d").unwrap().get(0).unwrap()),
            "2024-03-01"
        );
    }

    #[test]
    fn trailing_rows_guard() {
        let df = text_df("a", &[Some("1"), Some("2"), Some("3")]);
        assert_eq!(drop_trailing_rows(&df, 3).height(), 3);
        assert_eq!(drop_trailing_rows(&df, 2).height(), 1);
        assert_eq!(drop_trailing_rows(&df, 0).height(), 3);
    }
}
