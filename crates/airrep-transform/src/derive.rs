//! Fields computed from other fields after coercion.

use airrep_model::{CoercionReport, DerivedRule, FieldType, NumericRule, ReportSpec};
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use crate::coerce::{CoercedValue, parse_or_default};
use crate::error::Result;
use crate::frame_utils::{
    f64_column_or_zero, has_column, i64_column_or_zero, set_column, string_column,
};

/// `numerator / denominator * 100`, or zero when the denominator is not positive.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Splits a combined count such as `"120\5"` into its two parts.
///
/// A value without the separator keeps its first part and yields 0 for the
/// second. Unparseable parts are 0.
pub fn split_pair(raw: Option<&str>, separator: char) -> (i64, i64) {
    let (first, second) = split_parts(raw, separator);
    (integer_part(first), integer_part(second))
}

fn split_parts(raw: Option<&str>, separator: char) -> (Option<&str>, Option<&str>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    match raw.split_once(separator) {
        Some((first, rest)) => {
            let second = rest.trim_start_matches(separator).split(separator).next();
            (Some(first), second)
        }
        None => (Some(raw), None),
    }
}

fn integer_part(part: Option<&str>) -> i64 {
    match parse_or_default(part, FieldType::Integer, NumericRule::Plain).value {
        CoercedValue::Integer(value) => value,
        _ => 0,
    }
}

/// Applies the derived-field rules of a report kind.
#[derive(Debug, Clone, Copy)]
pub struct DerivedFieldComputer<'a> {
    spec: &'a ReportSpec,
}

impl<'a> DerivedFieldComputer<'a> {
    pub fn new(spec: &'a ReportSpec) -> Self {
        Self { spec }
    }

    /// Computes every rule in declaration order.
    ///
    /// Split parts are counted in `report` like any other coerced field.
    pub fn apply(&self, df: &DataFrame, report: &mut CoercionReport) -> Result<DataFrame> {
        let mut out = df.clone();
        for rule in self.spec.derived {
            match *rule {
                DerivedRule::Difference {
                    target,
                    minuend,
                    subtrahend,
                } => {
                    if has_column(&out, target) {
                        debug!(target, "source provides derived field, keeping it");
                        continue;
                    }
                    let left = i64_column_or_zero(&out, minuend)?;
                    let right = i64_column_or_zero(&out, subtrahend)?;
                    // Negative results are kept: they flag export corrections.
                    let values: Vec<i64> = left
                        .iter()
                        .zip(&right)
                        .map(|(left, right)| left.saturating_sub(*right))
                        .collect();
                    set_column(&mut out, Series::new(target.into(), values))?;
                }
                DerivedRule::Percentage {
                    target,
                    numerator,
                    denominator,
                } => {
                    let top = f64_column_or_zero(&out, numerator)?;
                    let bottom = f64_column_or_zero(&out, denominator)?;
                    let values: Vec<f64> = top
                        .iter()
                        .zip(&bottom)
                        .map(|(top, bottom)| percentage(*top, *bottom))
                        .collect();
                    set_column(&mut out, Series::new(target.into(), values))?;
                }
                DerivedRule::SplitPair {
                    source,
                    first,
                    second,
                    separator,
                } => {
                    if !has_column(&out, source) {
                        continue;
                    }
                    let raw = string_column(&out, source)?;
                    let mut firsts = Vec::with_capacity(raw.len());
                    let mut seconds = Vec::with_capacity(raw.len());
                    for value in &raw {
                        let (a, b) = split_parts(value.as_deref(), separator);
                        for (name, part, sink) in
                            [(first, a, &mut firsts), (second, b, &mut seconds)]
                        {
                            let coerced = parse_or_default(part, FieldType::Integer, NumericRule::Plain);
                            report.record(name, coerced.outcome);
                            sink.push(match coerced.value {
                                CoercedValue::Integer(value) => value,
                                _ => 0,
                            });
                        }
                    }
                    set_column(&mut out, Series::new(first.into(), firsts))?;
                    set_column(&mut out, Series::new(second.into(), seconds))?;
                    out = out.drop(source)?;
                }
            }
        }
        Ok(out)
    }
}
