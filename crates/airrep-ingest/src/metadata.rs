//! Labeled values from preamble lines.

use std::sync::LazyLock;

use airrep_model::{MetadataExtract, MetadataRule, MetadataValue, ReportMetadata};
use regex::Regex;
use tracing::warn;

use crate::dates::parse_day_first_date;

static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{4})\b").expect("Invalid date token regex")
});

/// Extracts one value per rule from `lines`.
///
/// A rule matches lines containing its label. When several lines match, the
/// last one wins. Misses and unparseable values yield
/// [`MetadataValue::Null`]; extraction never fails.
pub fn extract_metadata(lines: &[String], rules: &[MetadataRule]) -> ReportMetadata {
    let mut metadata = ReportMetadata::new();
    for rule in rules {
        let value = lines
            .iter()
            .filter(|line| line.contains(rule.label))
            .filter_map(|line| extract_value(line, rule))
            .last()
            .unwrap_or_default();
        if value.is_null() {
            warn!(key = rule.key, label = rule.label, "metadata value not found");
        }
        metadata.insert(rule.key, value);
    }
    metadata
}

fn extract_value(line: &str, rule: &MetadataRule) -> Option<MetadataValue> {
    match rule.extract {
        MetadataExtract::DayFirstDate => {
            let regex = &*DATE_TOKEN;
            // Prefer the token after the label so one line can carry both ends of a period.
            let after_label = line
                .find(rule.label)
                .map_or(line, |pos| &line[pos + rule.label.len()..]);
            let captures = regex
                .captures(after_label)
                .or_else(|| regex.captures(line))?;
            let token = captures.get(1)?.as_str();
            parse_day_first_date(token).map(MetadataValue::Date)
        }
        MetadataExtract::ColonValue => colon_value(line).map(MetadataValue::Text),
    }
}

/// Text after the last `:` of `line`, cut at the first `,`, trimmed and
/// unquoted. `None` when there is no colon or the value is empty.
pub fn colon_value(line: &str) -> Option<String> {
    let (_, after) = line.rsplit_once(':')?;
    let value = after
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches('"')
        .trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PERIOD: &[MetadataRule] = &[
        MetadataRule {
            key: "from_date",
            label: "From Date",
            extract: MetadataExtract::DayFirstDate,
            column: "report_from_date",
        },
        MetadataRule {
            key: "to_date",
            label: "To Date",
            extract: MetadataExtract::DayFirstDate,
            column: "report_to_date",
        },
    ];

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| (*line).to_string()).collect()
    }

    #[test]
    fn extracts_period_dates() {
        let preamble = lines(&[
            "Company Payment Report",
            "\"From Date: 01/03/2024\",,",
            "To Date: 31/03/2024",
        ]);
        let metadata = extract_metadata(&preamble, PERIOD);
        assert_eq!(metadata.date("from_date"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(metadata.date("to_date"), NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn missing_labels_are_null() {
        let metadata = extract_metadata(&lines(&["Company Payment Report"]), PERIOD);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.missing_keys(), vec!["from_date", "to_date"]);
    }

    #[test]
    fn period_on_one_line() {
        let preamble = lines(&["From Date: 01/03/2024 To Date: 31/03/2024"]);
        let metadata = extract_metadata(&preamble, PERIOD);
        assert_eq!(metadata.date("from_date"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(metadata.date("to_date"), NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn unparseable_date_is_null() {
        let metadata = extract_metadata(&lines(&["From Date: 45/13/2024"]), PERIOD);
        assert!(metadata.get("from_date").is_null());
    }

    #[test]
    fn colon_value_cuts_at_comma() {
        assert_eq!(colon_value("Year : 2024,,,"), Some("2024".to_string()));
        assert_eq!(colon_value("\"Month: March\""), Some("March".to_string()));
        assert_eq!(colon_value("Generated at 10:30"), Some("30".to_string()));
        assert_eq!(colon_value("Year:"), None);
        assert_eq!(colon_value("Year 2024"), None);
    }

    #[test]
    fn colon_rule_takes_last_matching_line() {
        let rules = [MetadataRule {
            key: "report_year",
            label: "Year",
            extract: MetadataExtract::ColonValue,
            column: "report_year",
        }];
        let metadata = extract_metadata(&lines(&["Year: 2023", "Year: 2024"]), &rules);
        assert_eq!(metadata.text("report_year"), Some("2024"));
    }
}
