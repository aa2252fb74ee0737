//! Typed coercion of canonical fields.
//!
//! Every conversion goes through [`parse_or_default`], which never fails:
//! numbers fall back to zero and dates to null, and the outcome says which
//! case applied so the load can report how many values were defaulted.

use airrep_ingest::parse_day_first_date;
use airrep_model::{
    CoercionOutcome, CoercionReport, FieldSpec, FieldType, NumericRule, ReportSpec,
};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::warn;

use crate::error::Result;
use crate::frame_utils::{date_series, filter_rows, has_column, set_column, string_column, text_series};

/// A coerced cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Text(Option<String>),
    Integer(i64),
    Float(f64),
    Date(Option<NaiveDate>),
}

/// Value plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub value: CoercedValue,
    pub outcome: CoercionOutcome,
}

impl Coerced {
    fn parsed(value: CoercedValue) -> Self {
        Self {
            value,
            outcome: CoercionOutcome::Parsed,
        }
    }

    /// The value was defaulted because the raw cell was missing or invalid.
    pub fn is_defaulted(&self) -> bool {
        self.outcome != CoercionOutcome::Parsed
    }
}

fn fallback(field_type: FieldType) -> CoercedValue {
    match field_type {
        FieldType::Text => CoercedValue::Text(None),
        FieldType::Integer => CoercedValue::Integer(0),
        FieldType::Float => CoercedValue::Float(0.0),
        FieldType::Date => CoercedValue::Date(None),
    }
}

/// Applies a numeric cleaning rule to raw cell text.
///
/// Returns `None` when nothing numeric-looking is left.
pub fn clean_numeric(raw: &str, rule: NumericRule) -> Option<String> {
    let cleaned: String = match rule {
        NumericRule::Plain => raw
            .chars()
            .filter(|ch| *ch != ',' && !ch.is_whitespace())
            .collect(),
        NumericRule::Amount => raw
            .chars()
            .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
            .collect(),
        NumericRule::DigitRun => raw
            .chars()
            .skip_while(|ch| !ch.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect(),
    };
    (!cleaned.is_empty()).then_some(cleaned)
}

fn parse_float(cleaned: &str) -> Option<f64> {
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_integer(cleaned: &str) -> Option<i64> {
    if let Ok(value) = cleaned.parse::<i64>() {
        return Some(value);
    }
    // Decimal renderings such as "12.0" truncate toward zero.
    let value = parse_float(cleaned)?.trunc();
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    in_range.then_some(value as i64)
}

/// Converts one raw cell to `field_type`, substituting the type's fallback on
/// failure. Blank cells are [`CoercionOutcome::Missing`]; non-blank cells that
/// do not parse are [`CoercionOutcome::Invalid`].
pub fn parse_or_default(raw: Option<&str>, field_type: FieldType, rule: NumericRule) -> Coerced {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Coerced {
            value: fallback(field_type),
            outcome: CoercionOutcome::Missing,
        };
    };
    let parsed = match field_type {
        FieldType::Text => Some(CoercedValue::Text(Some(text.to_string()))),
        FieldType::Integer => clean_numeric(text, rule)
            .and_then(|cleaned| parse_integer(&cleaned))
            .map(CoercedValue::Integer),
        FieldType::Float => clean_numeric(text, rule)
            .and_then(|cleaned| parse_float(&cleaned))
            .map(CoercedValue::Float),
        FieldType::Date => parse_day_first_date(text).map(|date| CoercedValue::Date(Some(date))),
    };
    match parsed {
        Some(value) => Coerced::parsed(value),
        None => Coerced {
            value: fallback(field_type),
            outcome: CoercionOutcome::Invalid,
        },
    }
}

fn clean_text(raw: Option<String>, field: &FieldSpec) -> Option<String> {
    let text = raw?;
    let text = if field.strip_newlines {
        text.replace(['\n', '\r'], "")
    } else {
        text
    };
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Converts the canonical fields of a normalized frame to their declared types.
#[derive(Debug, Clone, Copy)]
pub struct FieldCoercer<'a> {
    spec: &'a ReportSpec,
}

impl<'a> FieldCoercer<'a> {
    pub fn new(spec: &'a ReportSpec) -> Self {
        Self { spec }
    }

    /// Coerces every declared field present in `df`, then drops rows whose
    /// `drop_blank_rows` fields were blank or unparseable.
    ///
    /// Absent fields are left to the canonical projection.
    pub fn coerce(&self, df: &DataFrame) -> Result<(DataFrame, CoercionReport)> {
        let mut out = df.clone();
        let mut report = CoercionReport::new();
        let mut keep = vec![true; df.height()];

        for field in self.spec.fields {
            if !has_column(df, field.name) {
                continue;
            }
            let raw = string_column(df, field.name)?;
            let series = self.coerce_field(field, raw, &mut report, &mut keep)?;
            set_column(&mut out, series)?;

            let counts = report.field(field.name);
            if counts.invalid > 0 {
                warn!(
                    kind = %self.spec.kind,
                    field = field.name,
                    invalid = counts.invalid,
                    "values could not be parsed and were defaulted"
                );
            }
        }

        if keep.iter().all(|keep| *keep) {
            return Ok((out, report));
        }
        let before = out.height();
        let out = filter_rows(&out, &keep)?;
        tracing::debug!(
            kind = %self.spec.kind,
            dropped = before - out.height(),
            "dropped rows with blank required values"
        );
        Ok((out, report))
    }

    fn coerce_field(
        &self,
        field: &FieldSpec,
        raw: Vec<Option<String>>,
        report: &mut CoercionReport,
        keep: &mut [bool],
    ) -> Result<Series> {
        if field.field_type == FieldType::Text {
            let values: Vec<Option<String>> = raw
                .into_iter()
                .map(|value| clean_text(value, field))
                .collect();
            for (idx, value) in values.iter().enumerate() {
                let outcome = if value.is_some() {
                    CoercionOutcome::Parsed
                } else {
                    CoercionOutcome::Missing
                };
                report.record(field.name, outcome);
                if field.drop_blank_rows && value.is_none() {
                    keep[idx] = false;
                }
            }
            return Ok(text_series(field.name, values));
        }

        let coerced: Vec<Coerced> = raw
            .iter()
            .map(|value| parse_or_default(value.as_deref(), field.field_type, field.numeric_rule))
            .collect();
        for (idx, cell) in coerced.iter().enumerate() {
            report.record(field.name, cell.outcome);
            if field.drop_blank_rows && cell.is_defaulted() {
                keep[idx] = false;
            }
        }

        let series = match field.field_type {
            FieldType::Integer => {
                let values: Vec<i64> = coerced
                    .iter()
                    .map(|cell| match cell.value {
                        CoercedValue::Integer(value) => value,
                        _ => 0,
                    })
                    .collect();
                Series::new(field.name.into(), values)
            }
            FieldType::Float => {
                let values: Vec<f64> = coerced
                    .iter()
                    .map(|cell| match cell.value {
                        CoercedValue::Float(value) => value,
                        _ => 0.0,
                    })
                    .collect();
                Series::new(field.name.into(), values)
            }
            FieldType::Date | FieldType::Text => {
                let values: Vec<Option<NaiveDate>> = coerced
                    .iter()
                    .map(|cell| match cell.value {
                        CoercedValue::Date(value) => value,
                        _ => None,
                    })
                    .collect();
                date_series(field.name, &values)?
            }
        };
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airrep_model::ReportKind;
    use polars::prelude::{DataType, IntoColumn};

    fn float(raw: &str, rule: NumericRule) -> Coerced {
        parse_or_default(Some(raw), FieldType::Float, rule)
    }

    #[test]
    fn plain_rule_strips_thousands_separators() {
        assert_eq!(float("1,234.50", NumericRule::Plain).value, CoercedValue::Float(1234.5));
        assert_eq!(float(" 2 000 ", NumericRule::Plain).value, CoercedValue::Float(2000.0));
        let invalid = float("USD 10", NumericRule::Plain);
        assert_eq!(invalid.value, CoercedValue::Float(0.0));
        assert_eq!(invalid.outcome, CoercionOutcome::Invalid);
    }

    #[test]
    fn amount_rule_strips_symbols() {
        assert_eq!(float("$1,200.50", NumericRule::Amount).value, CoercedValue::Float(1200.5));
        assert_eq!(float("(USD) -35.00", NumericRule::Amount).value, CoercedValue::Float(-35.0));
        assert_eq!(float("N/A", NumericRule::Amount).outcome, CoercionOutcome::Invalid);
    }

    #[test]
    fn digit_run_rule() {
        let pax = parse_or_default(Some("3 pax"), FieldType::Integer, NumericRule::DigitRun);
        assert_eq!(pax.value, CoercedValue::Integer(3));
        let none = parse_or_default(Some("none"), FieldType::Integer, NumericRule::DigitRun);
        assert_eq!(none.value, CoercedValue::Integer(0));
        assert_eq!(none.outcome, CoercionOutcome::Invalid);
    }

    #[test]
    fn integers_accept_decimals() {
        let value = parse_or_default(Some("12.9"), FieldType::Integer, NumericRule::Plain);
        assert_eq!(value.value, CoercedValue::Integer(12));
        let value = parse_or_default(Some("-1,000"), FieldType::Integer, NumericRule::Plain);
        assert_eq!(value.value, CoercedValue::Integer(-1000));
    }

    #[test]
    fn missing_versus_invalid() {
        let blank = parse_or_default(Some("   "), FieldType::Float, NumericRule::Plain);
        assert_eq!(blank.outcome, CoercionOutcome::Missing);
        assert_eq!(blank.value, CoercedValue::Float(0.0));
        let nan = parse_or_default(Some("nan"), FieldType::Float, NumericRule::Plain);
        assert_eq!(nan.outcome, CoercionOutcome::Invalid);
    }

    #[test]
    fn dates_default_to_null_not_zero() {
        let date = parse_or_default(Some("31/03/2024"), FieldType::Date, NumericRule::Plain);
        assert_eq!(date.value, CoercedValue::Date(NaiveDate::from_ymd_opt(2024, 3, 31)));
        let bad = parse_or_default(Some("soon"), FieldType::Date, NumericRule::Plain);
        assert_eq!(bad.value, CoercedValue::Date(None));
        assert_eq!(bad.outcome, CoercionOutcome::Invalid);
    }

    #[test]
    fn coerce_frame_filters_required_rows() {
        let df = DataFrame::new(vec![
            Series::new("agent_name".into(), vec![Some("Alpha"), Some("Beta"), Some("Gamma")])
                .into_column(),
            Series::new("net_amount".into(), vec![Some("1,500"), None, Some("abc")]).into_column(),
        ])
        .unwrap();
        let (out, report) = FieldCoercer::new(ReportKind::Payment.spec())
            .coerce(&df)
            .unwrap();
        assert_eq!(out.height(), 1);
        assert_eq!(out.column("net_amount").unwrap().dtype(), &DataType::Float64);
        let counts = report.field("net_amount");
        assert_eq!((counts.parsed, counts.missing, counts.invalid), (1, 1, 1));
    }

    #[test]
    fn strip_newlines_in_text_fields() {
        let df = DataFrame::new(vec![
            Series::new("flight_number".into(), vec![Some(" XY\n101 ")]).into_column(),
        ])
        .unwrap();
        let (out, _) = FieldCoercer::new(ReportKind::Enplanement.spec())
            .coerce(&df)
            .unwrap();
        let value = out.column("flight_number").unwrap().str().unwrap().get(0);
        assert_eq!(value, Some("XY101"));
    }
}
